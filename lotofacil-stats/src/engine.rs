use crate::absence::track_absences;
use crate::config::{StatsConfig, TopK};
use crate::error::Result;
use crate::frequency::count_occurrences;
use crate::record::DrawRecord;
use crate::report::StatisticsReport;
use crate::ranker::rank;
use crate::runs::analyze_runs;

/// Pure statistics pipeline over a draw window. Holds only its validated
/// configuration, so one engine can serve any number of callers.
#[derive(Debug, Clone, Default)]
pub struct StatsEngine {
    config: StatsConfig,
}

impl StatsEngine {
    pub fn new(config: StatsConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    pub fn compute<D: DrawRecord>(&self, window: &[D]) -> StatisticsReport {
        self.compute_top(window, self.config.top_k)
    }

    /// Same as [`compute`](Self::compute) with a call-site specific top-K.
    pub fn compute_top<D: DrawRecord>(&self, window: &[D], top_k: TopK) -> StatisticsReport {
        if window.is_empty() {
            return StatisticsReport::empty();
        }

        let counts = count_occurrences(window);
        let absences = track_absences(window);
        let runs = analyze_runs(window, self.config.min_run_length);

        log::debug!(
            "Estatísticas de {} concursos (top {}, sequência mínima {})",
            window.len(),
            top_k.get(),
            self.config.min_run_length
        );

        rank(counts, absences, runs, top_k, window.len())
    }
}

pub fn compute<D: DrawRecord>(window: &[D], config: &StatsConfig) -> Result<StatisticsReport> {
    Ok(StatsEngine::new(config.clone())?.compute(window))
}
