//! Descriptive statistics over a window of Lotofácil draws: how often each
//! number came out, how long it has been missing, and its longest streaks.

pub mod absence;
pub mod config;
pub mod engine;
pub mod error;
pub mod frequency;
pub mod ranker;
pub mod record;
pub mod report;
pub mod runs;

pub use config::{StatsConfig, TopK};
pub use engine::{StatsEngine, compute};
pub use error::StatsError;
pub use record::DrawRecord;
pub use report::StatisticsReport;
