//! Release channels
//!
//! Mojang tags every manifest entry with a `type`. Only the two channels
//! below are tracked; each gets its own catalog file.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A release track partitioning versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Release,
    Snapshot,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown channel '{0}' (expected 'release' or 'snapshot')")]
pub struct ChannelParseError(pub String);

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Release => "release",
            Channel::Snapshot => "snapshot",
        }
    }

    /// File name of this channel's catalog, e.g. `release.json`
    pub fn catalog_file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = ChannelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "release" => Ok(Channel::Release),
            "snapshot" => Ok(Channel::Snapshot),
            other => Err(ChannelParseError(other.to_string())),
        }
    }
}
