//! Bottle size classes a user can log.
//!
//! The set is closed. Each size's volume and wire label live in a single
//! table, so adding a size is one table row plus one enum variant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed bottle size enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BottleSize {
    Ml330,
    Ml500,
    Ml750,
    Ml1000,
    Ml1500,
}

struct SizeRow {
    size: BottleSize,
    millilitres: u32,
    label: &'static str,
}

/// Volume and label per size, in the same order as the enum discriminants.
const SIZE_TABLE: [SizeRow; BottleSize::COUNT] = [
    SizeRow { size: BottleSize::Ml330, millilitres: 330, label: "330ml" },
    SizeRow { size: BottleSize::Ml500, millilitres: 500, label: "500ml" },
    SizeRow { size: BottleSize::Ml750, millilitres: 750, label: "750ml" },
    SizeRow { size: BottleSize::Ml1000, millilitres: 1000, label: "1000ml" },
    SizeRow { size: BottleSize::Ml1500, millilitres: 1500, label: "1500ml" },
];

/// Error raised when a label does not name a known bottle size.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bottle size '{value}'; expected one of 330ml|500ml|750ml|1000ml|1500ml")]
pub struct InvalidBottleSize {
    value: String,
}

impl InvalidBottleSize {
    /// The rejected input.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}

impl BottleSize {
    /// Number of size classes.
    pub const COUNT: usize = 5;

    /// Every size, smallest first.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Ml330,
        Self::Ml500,
        Self::Ml750,
        Self::Ml1000,
        Self::Ml1500,
    ];

    const fn row(self) -> &'static SizeRow {
        &SIZE_TABLE[self.index()]
    }

    /// Position of this size in [`BottleSize::ALL`].
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Bottle volume in millilitres.
    ///
    /// # Examples
    /// ```
    /// use aqua::domain::BottleSize;
    ///
    /// assert_eq!(BottleSize::Ml750.millilitres(), 750);
    /// ```
    pub const fn millilitres(self) -> u32 {
        self.row().millilitres
    }

    /// Wire label, for example `"500ml"`.
    pub const fn label(self) -> &'static str {
        self.row().label
    }
}

impl FromStr for BottleSize {
    type Err = InvalidBottleSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SIZE_TABLE
            .iter()
            .find(|spec| spec.label == s)
            .map(|spec| spec.size)
            .ok_or_else(|| InvalidBottleSize {
                value: s.to_owned(),
            })
    }
}

impl fmt::Display for BottleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<BottleSize> for String {
    fn from(value: BottleSize) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for BottleSize {
    type Error = InvalidBottleSize;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn table_matches_enum_order() {
        for (position, size) in BottleSize::ALL.into_iter().enumerate() {
            assert_eq!(size.index(), position);
            assert_eq!(SIZE_TABLE[position].size, size);
        }
    }

    #[rstest]
    #[case("330ml", BottleSize::Ml330, 330)]
    #[case("500ml", BottleSize::Ml500, 500)]
    #[case("750ml", BottleSize::Ml750, 750)]
    #[case("1000ml", BottleSize::Ml1000, 1000)]
    #[case("1500ml", BottleSize::Ml1500, 1500)]
    fn parses_known_labels(#[case] label: &str, #[case] size: BottleSize, #[case] ml: u32) {
        let parsed: BottleSize = label.parse().expect("known label");
        assert_eq!(parsed, size);
        assert_eq!(parsed.millilitres(), ml);
        assert_eq!(parsed.to_string(), label);
    }

    #[rstest]
    #[case("250ml")]
    #[case("500")]
    #[case("500ML")]
    #[case(" 500ml")]
    #[case("")]
    fn rejects_unknown_labels(#[case] label: &str) {
        let err = label.parse::<BottleSize>().expect_err("unknown label");
        assert_eq!(err.value(), label);
    }

    #[rstest]
    fn serialises_as_label() {
        let value = serde_json::to_value(BottleSize::Ml1000).expect("serialise size");
        assert_eq!(value, "1000ml");
        let back: BottleSize = serde_json::from_value(value).expect("deserialise size");
        assert_eq!(back, BottleSize::Ml1000);
    }
}
