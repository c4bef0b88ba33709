use std::{
    fmt,
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Sub},
    str::FromStr,
};

use serde::{
    de::{self, Visitor},
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};
use thiserror::Error;

//----------------------------------------------     Money       ------------------------------------------------------
/// A currency amount with two decimal places, stored as an integer number of cents. Arithmetic saturates rather than
/// overflowing.
///
/// Both Shopify and Bitrix24 express amounts in the currency's major unit. Shopify sends them as decimal strings
/// (`"398.00"`), and occasionally as plain JSON numbers, so `Money` deserializes from either. It always serializes as a
/// JSON number, which is what the CRM expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a currency amount: {0}")]
pub struct MoneyParseError(String);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Converts a floating point amount in major units, rounding to the nearest cent.
    pub fn from_major(value: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((value * 100.0).round() as i64)
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_major(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Negative amounts are meaningless on a deal, so they are floored at zero.
    pub fn non_negative(self) -> Self {
        Self(self.0.max(0))
    }

    /// Splits the amount evenly over `parts`, truncating any remainder. Zero parts yields zero.
    pub fn per_unit(self, parts: i64) -> Self {
        if parts <= 0 {
            Self::ZERO
        } else {
            Self(self.0 / parts)
        }
    }
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parses a decimal string such as `12`, `12.5`, `-0.99` or `398.00`. More than two decimal places are rounded
    /// half-up to the nearest cent.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError("empty string".into()));
        }
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let mut parts = digits.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let frac = parts.next().unwrap_or_default();
        let is_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if (whole.is_empty() && frac.is_empty()) || !is_digits(whole) || !is_digits(frac) {
            return Err(MoneyParseError(s.to_string()));
        }
        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|e| MoneyParseError(format!("{s}. {e}")))?
        };
        let mut frac_digits = frac.bytes().map(|b| i64::from(b - b'0'));
        let tens = frac_digits.next().unwrap_or(0);
        let units = frac_digits.next().unwrap_or(0);
        let round_up = frac_digits.next().is_some_and(|d| d >= 5);
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(tens * 10 + units + i64::from(round_up)))
            .ok_or_else(|| MoneyParseError(format!("{s} is too large")))?;
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self(self.0.saturating_mul(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_major())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a decimal amount as a string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v.trim().is_empty() {
            return Ok(Money::ZERO);
        }
        v.parse::<Money>().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        v.checked_mul(100).map(Money).ok_or_else(|| E::custom(format!("{v} is too large")))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v).map_err(E::custom).and_then(|v| self.visit_i64(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Money::from_major(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Money::ZERO)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_decimal_strings() {
        assert_eq!("398.00".parse::<Money>().unwrap(), Money::from_cents(39_800));
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1_200));
        assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1_250));
        assert_eq!("-0.99".parse::<Money>().unwrap(), Money::from_cents(-99));
        assert_eq!(".75".parse::<Money>().unwrap(), Money::from_cents(75));
        assert_eq!("1.005".parse::<Money>().unwrap(), Money::from_cents(101));
        assert_eq!("1.004".parse::<Money>().unwrap(), Money::from_cents(100));
    }

    #[test]
    fn reject_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!(".".parse::<Money>().is_err());
        assert!("1,50".parse::<Money>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(Money::from_cents(39_800).to_string(), "398.00");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-1_250).to_string(), "-12.50");
    }

    #[test]
    fn deserialize_strings_and_numbers() {
        let v: Vec<Money> = serde_json::from_str(r#"["10.50", 3, 2.25, "", null]"#).unwrap();
        assert_eq!(v, vec![
            Money::from_cents(1_050),
            Money::from_cents(300),
            Money::from_cents(225),
            Money::ZERO,
            Money::ZERO
        ]);
    }

    #[test]
    fn serializes_as_number() {
        let s = serde_json::to_string(&Money::from_cents(39_800)).unwrap();
        assert_eq!(s, "398.0");
        let s = serde_json::to_string(&Money::from_cents(1_999)).unwrap();
        assert_eq!(s, "19.99");
    }

    #[test]
    fn arithmetic() {
        let total: Money = [Money::from_cents(100), Money::from_cents(250)].into_iter().sum();
        assert_eq!(total, Money::from_cents(350));
        assert_eq!(Money::from_cents(100) - Money::from_cents(250), Money::from_cents(-150));
        assert_eq!(Money::from_cents(-150).non_negative(), Money::ZERO);
        assert_eq!(Money::from_cents(1_000).per_unit(3), Money::from_cents(333));
        assert_eq!(Money::from_cents(1_000).per_unit(0), Money::ZERO);
        assert_eq!(Money::from_cents(250) * 3, Money::from_cents(750));
    }

    #[test]
    fn arithmetic_saturates() {
        let huge: Money = "90000000000000000".parse().unwrap();
        let total: Money = [huge, huge].into_iter().sum();
        assert_eq!(total, Money::from_cents(i64::MAX));
        let negative: Money = "-90000000000000000".parse().unwrap();
        assert_eq!(negative - huge, Money::from_cents(i64::MIN));
        assert_eq!(huge * 1_000, Money::from_cents(i64::MAX));
    }
}
