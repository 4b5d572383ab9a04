use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Colour theme of the planner.
#[derive(
    Serialize,
    Deserialize,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Green,
    Blue,
    Purple,
    Orange,
    Ocean,
}

impl Theme {
    /// Unknown names resolve to [`Theme::Default`].
    pub fn parse_lenient(value: &str) -> Self {
        Theme::from_str(value.trim()).unwrap_or_default()
    }
}
