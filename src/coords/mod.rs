pub mod columns;
pub mod parse;
pub mod repair;
pub mod types;

pub use columns::{resolve_columns, CoordColumns};
pub use parse::{format_coord, parse_coord};
pub use repair::{repair_pair, RepairedPair, RowOutcome};
pub use types::Axis;
