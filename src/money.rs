//! Signed integer cents. Nothing in this module ever touches `f64`.

use {rust_decimal::Decimal, std::str::FromStr, thiserror::Error};

/// Signed monetary amount in cents.
pub type Cents = i64;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("unparseable amount '{0}'")]
    Unparseable(String),
    #[error("amount '{0}' has more than two fractional digits")]
    TooPrecise(String),
}

/// Parses a decimal token (e.g. `"100.00"`, `"12"`, `"-3.5"`) into cents,
/// truncating toward zero. Uses `rust_decimal` purely as a string-exact
/// fixed-point parser so the input never round-trips through binary floats.
pub fn parse_cents(s: &str) -> Result<Cents, MoneyParseError> {
    let decimal =
        Decimal::from_str(s).map_err(|_| MoneyParseError::Unparseable(s.to_string()))?;
    if decimal.scale() > 2 {
        return Err(MoneyParseError::TooPrecise(s.to_string()));
    }
    let cents = decimal * Decimal::from(100);
    cents
        .trunc()
        .to_string()
        .parse::<i64>()
        .map_err(|_| MoneyParseError::Unparseable(s.to_string()))
}

/// Formats cents as `<sign><int>.<frac>` with no currency marker, exactly
/// two fractional digits, e.g. `-150` -> `"-1.50"`.
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_and_fractional_amounts() {
        assert_eq!(parse_cents("100.00").unwrap(), 10_000);
        assert_eq!(parse_cents("12").unwrap(), 1_200);
        assert_eq!(parse_cents("0.01").unwrap(), 1);
    }

    #[test]
    fn rejects_excess_precision() {
        assert!(matches!(
            parse_cents("9.999"),
            Err(MoneyParseError::TooPrecise(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_cents("free").is_err());
    }

    #[test]
    fn format_round_trips_two_decimals() {
        assert_eq!(format_cents(5000), "50.00");
        assert_eq!(format_cents(-150), "-1.50");
        assert_eq!(format_cents(1), "0.01");
    }
}
