pub mod historical_metric;
pub mod protocol_snapshot;

pub use historical_metric::{HistoricalMetric, NewHistoricalMetric};
pub use protocol_snapshot::{NewProtocolSnapshot, ProtocolSnapshot};
