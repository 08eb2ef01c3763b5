//! [`Listing`]-related [`Database`] implementations.

use common::{
    operations::{By, Delete, Insert, Select, Update},
    DateTime,
};
use itertools::Itertools as _;
use postgres_types::ToSql;
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

/// Columns of the `listings` table, in the order [`from_row`] expects them.
const COLUMNS: &str = "\
    id, title, description, \
    property_kind, transaction_kind, \
    land_area, building_area, bedrooms, bathrooms, \
    province, city, district, \
    price, \
    owner_id, owner_name, \
    image_url, \
    created_at";

/// Reconstructs a [`Listing`] from the provided [`Row`] of [`COLUMNS`].
fn from_row(row: &Row) -> Listing {
    Listing {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        property_kind: row.get("property_kind"),
        transaction_kind: row.get("transaction_kind"),
        land_area: row
            .get::<_, Option<i64>>("land_area")
            .map(u32::try_from)
            .transpose()
            .expect("`land_area` overflow"),
        building_area: row
            .get::<_, Option<i64>>("building_area")
            .map(u32::try_from)
            .transpose()
            .expect("`building_area` overflow"),
        bedrooms: row
            .get::<_, Option<i32>>("bedrooms")
            .map(u16::try_from)
            .transpose()
            .expect("`bedrooms` overflow"),
        bathrooms: row
            .get::<_, Option<i32>>("bathrooms")
            .map(u16::try_from)
            .transpose()
            .expect("`bathrooms` overflow"),
        province: row.get("province"),
        city: row.get("city"),
        district: row.get("district"),
        price: row.get("price"),
        owner_id: row.get("owner_id"),
        owner_name: row.get("owner_name"),
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}

impl<C> Database<Select<By<Option<Listing>, listing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM listings \
             WHERE id = $1::UUID \
             LIMIT 1",
        );
        self.query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.as_ref().map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Listing>, read::listing::list::Filter>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, read::listing::list::Filter>>,
    ) -> Result<Self::Ok, Self::Err> {
        let read::listing::list::Filter {
            owner,
            with_tombstoned,
        } = by.into_inner();

        let tombstone = listing::Title::tombstone();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let tombstone_idx = (!with_tombstoned).then(|| {
            ps.push(&tombstone);
            ps.len()
        });
        let owner_idx = owner.as_ref().map(|o| {
            ps.push(o);
            ps.len()
        });

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM listings \
             WHERE true \
                   {tombstones} \
                   {owner} \
             ORDER BY created_at DESC, \
                      id DESC",
            tombstones =
                tombstone_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND TRIM(title) <> ${idx}::VARCHAR"))
                }),
            owner = owner_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND owner_id = ${idx}::UUID"))
            }),
        );
        Ok(self
            .query(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C>
    Database<
        Select<
            By<read::listing::list::TotalCount, read::listing::list::Filter>,
        >,
    > for Postgres<C>
where
    C: Connection,
{
    type Ok = read::listing::list::TotalCount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::listing::list::TotalCount, read::listing::list::Filter>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let read::listing::list::Filter {
            owner,
            with_tombstoned,
        } = by.into_inner();

        let tombstone = listing::Title::tombstone();

        let mut ps: Vec<&(dyn ToSql + Sync)> = vec![];
        let tombstone_idx = (!with_tombstoned).then(|| {
            ps.push(&tombstone);
            ps.len()
        });
        let owner_idx = owner.as_ref().map(|o| {
            ps.push(o);
            ps.len()
        });

        let sql = format!(
            "SELECT COUNT(*)::INT4 \
             FROM listings \
             WHERE true \
                   {tombstones} \
                   {owner}",
            tombstones =
                tombstone_idx.into_iter().format_with("", |idx, f| {
                    f(&format_args!("AND TRIM(title) <> ${idx}::VARCHAR"))
                }),
            owner = owner_idx.into_iter().format_with("", |idx, f| {
                f(&format_args!("AND owner_id = ${idx}::UUID"))
            }),
        );
        self.query_opt(&sql, ps.as_slice())
            .await
            .map_err(tracerr::wrap!())
            .map(|row| row.expect("always exists").get::<_, i32>(0).into())
    }
}

impl<C> Database<Insert<Listing>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(listing))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Listing>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let Listing {
            id,
            title,
            description,
            property_kind,
            transaction_kind,
            land_area,
            building_area,
            bedrooms,
            bathrooms,
            province,
            city,
            district,
            price,
            owner_id,
            owner_name,
            image_url,
            created_at,
        } = listing;

        let land_area = land_area.map(i64::from);
        let building_area = building_area.map(i64::from);
        let bedrooms = bedrooms.map(i32::from);
        let bathrooms = bathrooms.map(i32::from);

        const SQL: &str = "\
            INSERT INTO listings (\
                id, title, description, \
                property_kind, transaction_kind, \
                land_area, building_area, bedrooms, bathrooms, \
                province, city, district, \
                price, \
                owner_id, owner_name, \
                image_url, \
                created_at, updated_at \
            ) VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::INT2, $5::INT2, \
                $6::INT8, $7::INT8, $8::INT4, $9::INT4, \
                $10::VARCHAR, $11::VARCHAR, $12::VARCHAR, \
                $13::NUMERIC, \
                $14::UUID, $15::VARCHAR, \
                $16::VARCHAR, \
                $17::TIMESTAMPTZ, NOW() \
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET title = EXCLUDED.title, \
                description = EXCLUDED.description, \
                property_kind = EXCLUDED.property_kind, \
                transaction_kind = EXCLUDED.transaction_kind, \
                land_area = EXCLUDED.land_area, \
                building_area = EXCLUDED.building_area, \
                bedrooms = EXCLUDED.bedrooms, \
                bathrooms = EXCLUDED.bathrooms, \
                province = EXCLUDED.province, \
                city = EXCLUDED.city, \
                district = EXCLUDED.district, \
                price = EXCLUDED.price, \
                owner_id = EXCLUDED.owner_id, \
                owner_name = EXCLUDED.owner_name, \
                image_url = EXCLUDED.image_url, \
                created_at = EXCLUDED.created_at, \
                updated_at = NOW()";
        self.exec(
            SQL,
            &[
                &id,
                &title,
                &description,
                &property_kind,
                &transaction_kind,
                &land_area,
                &building_area,
                &bedrooms,
                &bathrooms,
                &province,
                &city,
                &district,
                &price,
                &owner_id,
                &owner_name,
                &image_url,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Delete<By<Listing, listing::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: listing::Id = by.into_inner();

        const SQL: &str = "\
            DELETE FROM listings \
            WHERE id = $1::UUID";
        self.exec(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Delete<By<Listing, DateTime>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Listing, DateTime>>,
    ) -> Result<Self::Ok, Self::Err> {
        let deadline: DateTime = by.into_inner();
        let tombstone = listing::Title::tombstone();

        const SQL: &str = "\
            DELETE FROM listings \
            WHERE TRIM(title) = $1::VARCHAR \
              AND updated_at < $2::TIMESTAMPTZ";
        self.exec(SQL, &[&tombstone, &deadline])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
