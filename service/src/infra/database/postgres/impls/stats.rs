//! Statistics-related [`Database`] implementations.

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::listing,
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<read::Aggregate, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = read::Aggregate;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<read::Aggregate, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let tombstone = listing::Title::tombstone();

        const TOTALS_SQL: &str = "\
            SELECT COUNT(*) FILTER (WHERE TRIM(title) <> $1::VARCHAR)::INT4 \
                       AS active, \
                   COUNT(*) FILTER (WHERE TRIM(title) = $1::VARCHAR)::INT4 \
                       AS tombstoned \
            FROM listings";
        let totals = self
            .query_opt(TOTALS_SQL, &[&tombstone])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists");

        const PROFILES_SQL: &str = "\
            SELECT COUNT(*)::INT4 \
            FROM profiles";
        let profiles = self
            .query_opt(PROFILES_SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .expect("always exists")
            .get::<_, i32>(0);

        const PER_PROPERTY_SQL: &str = "\
            SELECT property_kind, COUNT(*)::INT4 AS count \
            FROM listings \
            WHERE TRIM(title) <> $1::VARCHAR \
            GROUP BY property_kind \
            ORDER BY count DESC, \
                     property_kind ASC";
        let per_property_kind = self
            .query(PER_PROPERTY_SQL, &[&tombstone])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::stats::PropertyKindCount {
                kind: row.get("property_kind"),
                count: row.get("count"),
            })
            .collect();

        const PER_TRANSACTION_SQL: &str = "\
            SELECT transaction_kind, COUNT(*)::INT4 AS count \
            FROM listings \
            WHERE TRIM(title) <> $1::VARCHAR \
            GROUP BY transaction_kind \
            ORDER BY count DESC, \
                     transaction_kind ASC";
        let per_transaction_kind = self
            .query(PER_TRANSACTION_SQL, &[&tombstone])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::stats::TransactionKindCount {
                kind: row.get("transaction_kind"),
                count: row.get("count"),
            })
            .collect();

        const TOP_OWNERS_SQL: &str = "\
            SELECT owner_id, MIN(owner_name) AS owner_name, \
                   COUNT(*)::INT4 AS count \
            FROM listings \
            WHERE TRIM(title) <> $1::VARCHAR \
            GROUP BY owner_id \
            ORDER BY count DESC, \
                     owner_name ASC \
            LIMIT 10";
        let top_owners = self
            .query(TOP_OWNERS_SQL, &[&tombstone])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| read::stats::OwnerCount {
                id: row.get("owner_id"),
                name: row.get("owner_name"),
                count: row.get("count"),
            })
            .collect();

        Ok(read::Aggregate {
            active_listings: totals.get("active"),
            tombstoned_listings: totals.get("tombstoned"),
            profiles,
            per_property_kind,
            per_transaction_kind,
            top_owners,
        })
    }
}
