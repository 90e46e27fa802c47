mod audit;
mod engine;
mod formatters;
mod state;
mod tracker;

pub use audit::{KeyUsage, KeyUsageReport};
pub use engine::{FillEngineOptions, FillReport, FillingEngine};
pub use formatters::{default_formatter, ErrorFormatter, ErrorFormatterRegistry, DEFAULT_FORMATTER};
pub use state::{ControlTag, Mode};
pub use tracker::PositionTracker;

#[cfg(test)]
mod tests;
