use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Symbolic trailing-window token used by every timeseries endpoint.
///
/// Windows are anchored at the last date present in the series being
/// filtered, never at wall-clock time, so the same series and token always
/// produce the same subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    #[serde(rename = "1w")]
    OneWeek,
    #[serde(rename = "1m")]
    OneMonth,
    #[serde(rename = "1y")]
    OneYear,
    #[default]
    Max,
}

impl Window {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OneWeek => "1w",
            Self::OneMonth => "1m",
            Self::OneYear => "1y",
            Self::Max => "max",
        }
    }
}
