use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point drift when summing.
/// 1 unit = 100 cents, so 250.00 = 25000 cents.
pub type Cents = i64;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    #[error("invalid money format: '{0}'")]
    InvalidFormat(String),

    #[error("amount too large: '{0}'")]
    Overflow(String),
}

/// Format cents as a plain decimal string.
/// Example: 5000 -> "50.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Format cents with a currency symbol placed after the sign.
/// Example: (1250, "₹") -> "₹12.50", (-1250, "₹") -> "-₹12.50"
pub fn format_amount(cents: Cents, symbol: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}{}.{:02}", sign, symbol, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "100" -> 10000, ".5" -> 50
/// More than two decimal places are truncated.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let trimmed = input.trim();
    let invalid = || ParseCentsError::InvalidFormat(trimmed.to_string());
    let overflow = || ParseCentsError::Overflow(trimmed.to_string());

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let mut parts = digits.split('.');
    let units_str = parts.next().unwrap_or("");
    let decimal_str = parts.next();
    if parts.next().is_some() {
        return Err(invalid());
    }
    if units_str.is_empty() && decimal_str.is_none_or(str::is_empty) {
        return Err(invalid());
    }
    if !units_str.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let units: i64 = if units_str.is_empty() {
        0
    } else {
        units_str.parse().map_err(|_| overflow())?
    };

    let decimal_cents: i64 = match decimal_str {
        None | Some("") => 0,
        Some(dec) => {
            if !dec.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let padded: String = dec.chars().chain("00".chars()).take(2).collect();
            padded.parse().map_err(|_| invalid())?
        }
    };

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(decimal_cents))
        .ok_or_else(overflow)?;
    Ok(if negative { -cents } else { cents })
}

/// Serde adapter storing cents as a JSON number in major units (`12.5`),
/// which is the shape the persisted ledger has always used.
pub mod major_units {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    use super::Cents;

    pub fn serialize<S: Serializer>(cents: &Cents, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*cents as f64 / 100.0)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Cents, D::Error> {
        let value = f64::deserialize(deserializer)?;
        let cents = (value * 100.0).round();
        if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
            return Err(D::Error::custom(format!("amount out of range: {value}")));
        }
        Ok(cents as Cents)
    }
}
