pub mod chain;
pub mod metric;
pub mod window;

pub use chain::{CHAIN_CONFIGS, ChainConfig, PoolLayout, chain_config};
pub use metric::MetricKind;
pub use window::Window;
