use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

/// Resolve a row APR against the configured default, treating only a missing
/// value as "unreported". An explicit `0` is a legitimate APR and is kept.
pub fn resolve_apr_strict(row_apr: Option<Decimal>, default_apr: Decimal) -> Decimal {
    row_apr.unwrap_or(default_apr)
}

/// Resolve a row APR against the configured default, treating both a missing
/// value and an explicit `0` as "unreported".
///
/// This is NOT the same convention as [`resolve_apr_strict`]: the dual-pool
/// sub-positions have always substituted the default for a zero APR, while
/// the standard-chain path keeps zero. The divergence is kept on purpose so
/// both behaviors stay visible at their call sites.
pub fn resolve_apr_loose(row_apr: Option<Decimal>, default_apr: Decimal) -> Decimal {
    match row_apr {
        Some(apr) if !apr.is_zero() => apr,
        _ => default_apr,
    }
}

/// The APR a chain reports for one day, as shown on the dashboard.
///
/// Standard chains quote a single rate. The dual-pool chain quotes a band
/// built from whichever of its two sub-positions reported stake that day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AprQuote {
    /// No usable stake row for the day, rendered as `"N/A"`.
    Missing,
    /// Single resolved rate in percent.
    Rate(Decimal),
    /// Dual-pool band; each side is present iff its sub-position had stake.
    DualBand {
        init: Option<Decimal>,
        lp: Option<Decimal>,
    },
}

impl Serialize for AprQuote {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Missing
            | Self::DualBand {
                init: None,
                lp: None,
            } => serializer.serialize_str("N/A"),
            Self::Rate(rate) => Serialize::serialize(rate, serializer),
            Self::DualBand {
                init: Some(init),
                lp: Some(lp),
            } => serializer.serialize_str(&format!("{init:.2}% - {lp:.2}%")),
            Self::DualBand {
                init: Some(rate),
                lp: None,
            }
            | Self::DualBand {
                init: None,
                lp: Some(rate),
            } => serializer.serialize_str(&format!("{rate:.2}%")),
        }
    }
}
