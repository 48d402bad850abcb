//! Probation month keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six probation months.
///
/// Catalog documents key months by the strings `"1"`..`"6"`; signoff
/// records carry the month as a number. Both wire forms funnel through
/// this type so an out-of-range month cannot reach the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Month(u8);

#[derive(Debug, Error)]
#[error("month out of range (expected 1..=6): {0}")]
pub struct MonthOutOfRange(pub u8);

impl Month {
    /// All six months, in order.
    pub const ALL: [Month; 6] = [
        Month(1),
        Month(2),
        Month(3),
        Month(4),
        Month(5),
        Month(6),
    ];

    pub fn new(number: u8) -> Option<Self> {
        (1..=6).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// The month's key in the stored catalog map.
    pub fn as_key(self) -> &'static str {
        match self.0 {
            1 => "1",
            2 => "2",
            3 => "3",
            4 => "4",
            5 => "5",
            _ => "6",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        key.parse::<u8>().ok().and_then(Self::new)
    }
}

impl TryFrom<u8> for Month {
    type Error = MonthOutOfRange;

    fn try_from(number: u8) -> std::result::Result<Self, Self::Error> {
        Self::new(number).ok_or(MonthOutOfRange(number))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Month {}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_six() {
        for n in 1..=6u8 {
            assert_eq!(Month::try_from(n).unwrap().number(), n);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Month::try_from(0).is_err());
        assert!(Month::try_from(7).is_err());
    }

    #[test]
    fn key_round_trip() {
        for month in Month::ALL {
            assert_eq!(Month::from_key(month.as_key()), Some(month));
        }
        assert_eq!(Month::from_key("0"), None);
        assert_eq!(Month::from_key("seven"), None);
    }

    #[test]
    fn serializes_as_number() {
        let json = serde_json::to_value(Month::new(3).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(3));
        let back: Month = serde_json::from_value(json).unwrap();
        assert_eq!(back.number(), 3);
    }
}
