//! Value objects: no identity, equality by value, validated on construction.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShopError;

/// Name of a stocked item.
///
/// Non-empty, free of whitespace, and at most [`ItemName::MAX_LEN`] bytes.
/// Comparison is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemName(String);

impl ItemName {
    /// Longest accepted name, in bytes.
    pub const MAX_LEN: usize = 19;

    pub fn new(name: impl Into<String>) -> Result<Self, ShopError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ShopError::invalid("item name cannot be empty"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(ShopError::invalid(format!(
                "item name '{name}' exceeds {} bytes",
                Self::MAX_LEN
            )));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ShopError::invalid(format!(
                "item name '{name}' contains whitespace"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::borrow::Borrow<str> for ItemName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemName {
    type Error = ShopError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemName> for String {
    fn from(value: ItemName) -> Self {
        value.0
    }
}

impl FromStr for ItemName {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Non-negative unit price, held in minor units (cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    /// Build a price from signed cents, rejecting negative amounts.
    pub fn from_cents(cents: i64) -> Result<Self, ShopError> {
        u64::try_from(cents)
            .map(Self)
            .map_err(|_| ShopError::invalid(format!("price cannot be negative ({cents} cents)")))
    }

    pub fn cents(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Parses decimal amounts such as `3`, `3.5` or `3.50` (an optional leading `$`
/// is allowed). At most two fractional digits.
impl FromStr for Price {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let digits = raw.strip_prefix('$').unwrap_or(raw);
        let bad = || ShopError::invalid(format!("invalid price '{raw}'"));

        if digits.starts_with('-') {
            return Err(ShopError::invalid(format!("price cannot be negative ('{raw}')")));
        }

        let (whole, frac) = match digits.split_once('.') {
            Some((w, f)) => (w, f),
            None => (digits, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        if digits.contains('.') && (frac.is_empty() || frac.len() > 2) {
            return Err(bad());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }

        let whole: u64 = whole.parse().map_err(|_| bad())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| bad())? * 10,
            _ => frac.parse().map_err(|_| bad())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Price)
            .ok_or_else(bad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn item_name_rejects_empty_long_and_spaced_names() {
        assert!(ItemName::new("").is_err());
        assert!(ItemName::new("a".repeat(ItemName::MAX_LEN + 1)).is_err());
        assert!(ItemName::new("green apple").is_err());
        assert!(ItemName::new("a".repeat(ItemName::MAX_LEN)).is_ok());
    }

    #[test]
    fn item_names_are_case_sensitive() {
        let lower = ItemName::new("apple").unwrap();
        let upper = ItemName::new("Apple").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn item_name_deserialization_is_validated() {
        let ok: ItemName = serde_json::from_str("\"milk\"").unwrap();
        assert_eq!(ok.as_str(), "milk");
        assert!(serde_json::from_str::<ItemName>("\"two words\"").is_err());
    }

    #[test]
    fn price_parses_common_forms() {
        assert_eq!("3".parse::<Price>().unwrap().cents(), 300);
        assert_eq!("3.5".parse::<Price>().unwrap().cents(), 350);
        assert_eq!("3.05".parse::<Price>().unwrap().cents(), 305);
        assert_eq!("$0.99".parse::<Price>().unwrap().cents(), 99);
    }

    #[test]
    fn price_rejects_negative_and_malformed_input() {
        for input in ["-1", "-0.50", "1.234", "abc", "", "1.", ".5", "1.x"] {
            assert!(input.parse::<Price>().is_err(), "accepted {input:?}");
        }
        assert!(matches!(
            Price::from_cents(-1),
            Err(ShopError::InvalidArgument(_))
        ));
    }

    #[test]
    fn price_displays_as_dollars_and_cents() {
        assert_eq!(Price::from_cents(1250).unwrap().to_string(), "$12.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: the rendered form of any price parses back to the same amount.
        #[test]
        fn rendered_price_parses_back(cents in 0u64..10_000_000_000u64) {
            let price = Price(cents);
            let parsed: Price = price.to_string().parse().unwrap();
            prop_assert_eq!(parsed, price);
        }
    }
}
