use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{ErrorKind, QuartermasterError};

/// The kinds of assets a character can hold in their inventory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    #[default]
    Item,
    Ship,
    Vehicle,
}

impl AssetType {
    pub fn all() -> [AssetType; 3] {
        [AssetType::Item, AssetType::Ship, AssetType::Vehicle]
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetType::Item => "item",
            AssetType::Ship => "ship",
            AssetType::Vehicle => "vehicle",
        }
    }
}

impl Display for AssetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AssetType {
    type Err = QuartermasterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "item" | "items" => Ok(AssetType::Item),
            "ship" | "ships" => Ok(AssetType::Ship),
            "vehicle" | "vehicles" => Ok(AssetType::Vehicle),
            other => {
                log::error!("Unknown asset type {}", other);
                Err(QuartermasterError::new(
                    &format!("Unknown asset type {}", other),
                    ErrorKind::NotFound,
                ))
            }
        }
    }
}
