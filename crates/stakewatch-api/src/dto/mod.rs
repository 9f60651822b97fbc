pub mod chain;
pub mod overview;
pub mod query;
pub mod response;
pub mod revenue;
pub mod ticker;

pub use chain::*;
pub use overview::*;
pub use query::*;
pub use response::*;
pub use revenue::*;
pub use ticker::*;
