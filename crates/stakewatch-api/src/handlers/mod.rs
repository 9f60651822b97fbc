pub mod chains;
pub mod overview;
pub mod revenue;
pub mod ticker;

pub use chains::*;
pub use overview::*;
pub use revenue::*;
pub use ticker::*;
