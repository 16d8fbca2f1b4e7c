//! Remnant classes the extractor knows how to select.

use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::Serialize;

use crate::consts::{KW_BLACK_HOLE, KW_NEUTRON_STAR};

/// Stellar-remnant class targeted by a run. Fixed at invocation; the class
/// determines the default kw code and the naming of the output table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemnantClass {
    BlackHole,
    NeutronStar,
}

impl RemnantClass {
    /// Stellar-evolution type code matched against the `kw` column.
    pub fn kw_code(self) -> i64 {
        match self {
            RemnantClass::BlackHole => KW_BLACK_HOLE,
            RemnantClass::NeutronStar => KW_NEUTRON_STAR,
        }
    }

    /// Short tag used in the CSV id-column header and default file name
    /// ("bh_id" / "ns_id", "bh_history.csv" / "ns_history.csv").
    pub fn tag(self) -> &'static str {
        match self {
            RemnantClass::BlackHole => "bh",
            RemnantClass::NeutronStar => "ns",
        }
    }

    /// Human-readable name for messages.
    pub fn label(self) -> &'static str {
        match self {
            RemnantClass::BlackHole => "black hole",
            RemnantClass::NeutronStar => "neutron star",
        }
    }
}

impl fmt::Display for RemnantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for RemnantClass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bh" | "black-hole" | "blackhole" => Ok(RemnantClass::BlackHole),
            "ns" | "neutron-star" | "neutronstar" => Ok(RemnantClass::NeutronStar),
            other => Err(anyhow!(
                "unknown remnant class '{}' (expected 'bh' or 'ns')",
                other
            )),
        }
    }
}
