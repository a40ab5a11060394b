pub mod analysis;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod sheets;
pub mod source;
pub mod xlsx;

pub use error::{Result, StatsError};
pub use model::*;
