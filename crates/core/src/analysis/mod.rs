pub mod diff;
pub mod rollup;
pub mod tenure;

pub use diff::{diff, HoldingsDiff};
pub use tenure::{tenor_days, Tenure};
