//! [`Price`]-related definitions.

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;

/// Price of a listing.
///
/// Kept as an arbitrary-precision decimal, since listing prices routinely
/// exceed the safe range of an `f64`-shaped number and arrive as loosely
/// formatted strings (`"Rp 1.500.000.000"`, `"1,500,000,000"`, ...).
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "postgres",
    derive(postgres_types::FromSql, postgres_types::ToSql),
    postgres(transparent)
)]
pub struct Price(Decimal);

impl Price {
    /// Creates a new [`Price`] from the provided [`Decimal`], if it's not
    /// negative.
    #[must_use]
    pub fn new(amount: Decimal) -> Option<Self> {
        (!amount.is_sign_negative()).then_some(Self(amount))
    }

    /// Parses a [`Price`] out of a loosely formatted string by dropping
    /// every non-digit character first.
    ///
    /// [`None`] is returned if no digits remain, so callers treat the value
    /// as "no price": any bounded price filter excludes such a listing.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        let digits =
            input.chars().filter(char::is_ascii_digit).collect::<String>();
        if digits.is_empty() {
            return None;
        }
        Decimal::from_str(&digits).ok().and_then(Self::new)
    }

    /// Returns the underlying [`Decimal`] amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s).map_err(|_| "invalid amount")?;
        Self::new(amount).ok_or("negative amount")
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Price as a decimal string, preserving arbitrary precision.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Price = super::Price;

    impl Price {
        fn to_output<S: ScalarValue>(p: &Price) -> Value<S> {
            Value::scalar(p.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Price` input scalar from non-string \
                         value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Price` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Price;

    fn price(s: &str) -> Price {
        Price::from_str(s).unwrap()
    }

    #[test]
    fn parses_lenient() {
        assert_eq!(
            Price::parse_lenient("1500000000"),
            Some(price("1500000000")),
        );
        assert_eq!(
            Price::parse_lenient("Rp 1.500.000.000"),
            Some(price("1500000000")),
        );
        assert_eq!(
            Price::parse_lenient("1,500,000,000"),
            Some(price("1500000000")),
        );
    }

    #[test]
    fn lenient_parse_of_digitless_input_is_none() {
        assert_eq!(Price::parse_lenient("invalid"), None);
        assert_eq!(Price::parse_lenient(""), None);
        assert_eq!(Price::parse_lenient("hubungi pemilik"), None);
    }

    #[test]
    fn preserves_beyond_double_precision() {
        // 2^53 + 1 is not representable as an `f64`.
        let p = Price::parse_lenient("9007199254740993").unwrap();
        assert_eq!(p.to_string(), "9007199254740993");
    }

    #[test]
    fn from_str_is_strict() {
        assert!(Price::from_str("1500000000").is_ok());
        assert!(Price::from_str("Rp 100").is_err());
        assert!(Price::from_str("-5").is_err());
    }
}
