use rust_decimal::{Decimal, dec};

/// Source tag stamped on every row and snapshot written by the scheduled job.
pub const INGEST_SOURCE: &str = "cron";

/// Denom of the dual-pool chain's native staking position.
pub const INITIA_NATIVE_DENOM: &str = "uinit";

/// Denom of the dual-pool chain's LP-token staking position.
pub const INITIA_LP_DENOM: &str =
    "move/543b35a39cfadad3da3c23249c474455d15efd2f94f849473226dee8a3c7a9e1";

/// One validator-side ingestion target: where to fetch it, which price id to
/// quote it with, and how to scale its raw base-denom amounts.
#[derive(Debug, Clone, Copy)]
pub struct ChainSource {
    /// Upstream path segment, also the lowercase chain identity.
    pub slug: &'static str,
    /// Price API id. Chains can share one (stHYPE settles at the HYPE price).
    pub price_id: &'static str,
    /// Divisor turning raw base-denom amounts into whole tokens.
    pub denom_factor: Decimal,
}

pub static CHAIN_SOURCES: [ChainSource; 6] = [
    ChainSource {
        slug: "celestia",
        price_id: "celestia",
        denom_factor: dec!(1_000_000),
    },
    ChainSource {
        slug: "hyperliquid",
        price_id: "hyperliquid",
        denom_factor: dec!(100_000_000),
    },
    ChainSource {
        slug: "dymension",
        price_id: "dymension",
        denom_factor: dec!(1_000_000_000_000_000_000),
    },
    ChainSource {
        slug: "initia",
        price_id: "initia",
        denom_factor: dec!(1_000_000),
    },
    ChainSource {
        slug: "sthype",
        price_id: "hyperliquid",
        denom_factor: dec!(1_000_000_000_000_000_000),
    },
    ChainSource {
        slug: "somnia",
        price_id: "somnia",
        denom_factor: dec!(1_000_000_000_000_000_000),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_are_unique_and_lowercase() {
        for (i, source) in CHAIN_SOURCES.iter().enumerate() {
            assert_eq!(source.slug, source.slug.to_lowercase());
            assert!(
                CHAIN_SOURCES[i + 1..]
                    .iter()
                    .all(|other| other.slug != source.slug)
            );
        }
    }

    #[test]
    fn test_denom_factors_are_powers_of_ten() {
        for source in &CHAIN_SOURCES {
            let digits = source.denom_factor.to_string();
            assert!(digits.starts_with('1'));
            assert!(digits[1..].chars().all(|c| c == '0'), "{digits}");
        }
    }
}
