pub mod coords;
pub mod error;
pub mod normalize;
pub mod table;

pub use error::NormalizeError;
pub use normalize::{normalize_file, NormalizeConfig, RunSummary};
