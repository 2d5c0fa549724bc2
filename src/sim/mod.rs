/// Greedy per-day charge and discharge planning.
pub mod dispatch;
pub mod engine;
/// Aggregated revenue and degradation report.
pub mod report;
pub mod types;
pub mod wear;

pub use engine::{Simulator, simulate};
