use serde::Serialize;

use crate::absence::AbsenceRecord;
use crate::frequency::OccurrenceCount;
use crate::runs::RunLengthRecord;

/// Ranked statistics of one draw window. Built once by the ranker and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    most_drawn: Vec<OccurrenceCount>,
    most_overdue: Vec<AbsenceRecord>,
    longest_occurrence_runs: Vec<RunLengthRecord>,
    longest_absence_runs: Vec<RunLengthRecord>,
    total_analyzed: usize,
}

impl StatisticsReport {
    pub(crate) fn new(
        most_drawn: Vec<OccurrenceCount>,
        most_overdue: Vec<AbsenceRecord>,
        longest_occurrence_runs: Vec<RunLengthRecord>,
        longest_absence_runs: Vec<RunLengthRecord>,
        total_analyzed: usize,
    ) -> Self {
        Self {
            most_drawn,
            most_overdue,
            longest_occurrence_runs,
            longest_absence_runs,
            total_analyzed,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), 0)
    }

    /// Highest occurrence counts first, at most top-K entries.
    pub fn most_drawn(&self) -> &[OccurrenceCount] {
        &self.most_drawn
    }

    /// Longest current absences first, at most top-K entries.
    pub fn most_overdue(&self) -> &[AbsenceRecord] {
        &self.most_overdue
    }

    pub fn longest_occurrence_runs(&self) -> &[RunLengthRecord] {
        &self.longest_occurrence_runs
    }

    pub fn longest_absence_runs(&self) -> &[RunLengthRecord] {
        &self.longest_absence_runs
    }

    pub fn total_analyzed(&self) -> usize {
        self.total_analyzed
    }

    pub fn is_empty(&self) -> bool {
        self.total_analyzed == 0
    }

    pub fn most_drawn_numbers(&self) -> Vec<u8> {
        self.most_drawn.iter().map(|c| c.number).collect()
    }

    pub fn most_overdue_numbers(&self) -> Vec<u8> {
        self.most_overdue.iter().map(|a| a.number).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
