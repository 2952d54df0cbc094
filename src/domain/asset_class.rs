//! Asset classes and the subsets records are routed to.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::FiflagError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Cdb,
    Cri,
    Cra,
    Coe,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::Cdb,
        AssetClass::Cri,
        AssetClass::Cra,
        AssetClass::Coe,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AssetClass::Cdb => "CDB",
            AssetClass::Cri => "CRI",
            AssetClass::Cra => "CRA",
            AssetClass::Coe => "COE",
        }
    }

    /// Exact, case-sensitive lookup.
    pub fn from_key(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.key() == value)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AssetClass {
    type Err = FiflagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| FiflagError::UnknownAssetClass {
            value: s.to_string(),
        })
    }
}

/// Partition bucket a record is processed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subset {
    Class(AssetClass),
    Others,
}

impl Subset {
    /// Fixed emission order of partitions.
    pub const ALL: [Subset; 5] = [
        Subset::Class(AssetClass::Cdb),
        Subset::Class(AssetClass::Cri),
        Subset::Class(AssetClass::Cra),
        Subset::Class(AssetClass::Coe),
        Subset::Others,
    ];

    pub const OTHERS_KEY: &'static str = "Others";

    /// Routing depends only on the literal `AssetClass` value.
    pub fn route(asset_class: &str) -> Self {
        match AssetClass::from_key(asset_class) {
            Some(class) => Subset::Class(class),
            None => Subset::Others,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Subset::Class(class) => class.key(),
            Subset::Others => Self::OTHERS_KEY,
        }
    }

    pub fn asset_class(self) -> Option<AssetClass> {
        match self {
            Subset::Class(class) => Some(class),
            Subset::Others => None,
        }
    }
}

impl fmt::Display for Subset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
