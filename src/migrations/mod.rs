//! Migration discovery for the source adapter
//!
//! This module provides:
//! - Parsing of `{version}_{identifier}.{up|down}.{ext}` entry names
//! - The immutable, version-ordered migration index
//! - Up/down direction handling

pub mod filename;
pub mod index;

pub use filename::MigrationFile;
pub use index::{Migration, MigrationIndex};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Migration direction (up or down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(format!("unknown migration direction '{}'", other)),
        }
    }
}
