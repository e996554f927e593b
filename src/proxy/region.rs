//! Proxy points of presence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the fixed geographic regions the proxy can route through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Region {
    #[default]
    UsEast,
    UsWest,
    UsCentral,
    NorthamericaNortheast,
    Southamerica,
    Asia,
    Australia,
    Europe,
    MiddleEast,
}

impl Region {
    pub const ALL: [Region; 9] = [
        Region::UsEast,
        Region::UsWest,
        Region::UsCentral,
        Region::NorthamericaNortheast,
        Region::Southamerica,
        Region::Asia,
        Region::Australia,
        Region::Europe,
        Region::MiddleEast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::UsEast => "us-east",
            Region::UsWest => "us-west",
            Region::UsCentral => "us-central",
            Region::NorthamericaNortheast => "northamerica-northeast",
            Region::Southamerica => "southamerica",
            Region::Asia => "asia",
            Region::Australia => "australia",
            Region::Europe => "europe",
            Region::MiddleEast => "middle-east",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown region '{0}'")]
pub struct UnknownRegion(pub String);

impl FromStr for Region {
    type Err = UnknownRegion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .iter()
            .copied()
            .find(|region| region.as_str() == s)
            .ok_or_else(|| UnknownRegion(s.to_string()))
    }
}
