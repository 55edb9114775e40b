use lotofacil_db::models::universe;
use serde::{Deserialize, Serialize};

use crate::record::{DrawRecord, newest_first};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunLengthRecord {
    pub number: u8,
    /// Qualifying run lengths in discovery order (newest draws first).
    pub runs: Vec<u32>,
}

impl RunLengthRecord {
    /// Longest run, 0 when nothing qualified.
    pub fn longest(&self) -> u32 {
        self.runs.iter().copied().max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLengths {
    pub occurrence: Vec<RunLengthRecord>,
    pub absence: Vec<RunLengthRecord>,
}

#[derive(Debug, Default)]
struct RunState {
    occurrence: u32,
    absence: u32,
    occurrence_runs: Vec<u32>,
    absence_runs: Vec<u32>,
}

impl RunState {
    fn close_occurrence(&mut self, min_run_length: usize) {
        if self.occurrence as usize >= min_run_length {
            self.occurrence_runs.push(self.occurrence);
        }
        self.occurrence = 0;
    }

    fn close_absence(&mut self, min_run_length: usize) {
        if self.absence as usize >= min_run_length {
            self.absence_runs.push(self.absence);
        }
        self.absence = 0;
    }
}

/// Maximal presence and absence runs of every universe number.
///
/// Draws are walked newest to oldest. Two draws only belong to the same run
/// when their draw numbers are adjacent: a missing draw number closes both
/// pending runs and the current draw opens a fresh one. Runs shorter than
/// `min_run_length` are dropped.
pub fn analyze_runs<D: DrawRecord>(window: &[D], min_run_length: usize) -> RunLengths {
    let ordered = newest_first(window);
    let mut states: Vec<RunState> = universe().map(|_| RunState::default()).collect();
    let mut previous: Option<u32> = None;

    for draw in &ordered {
        let current = draw.draw_number();
        let contiguous = previous.is_none_or(|p| current.checked_add(1) == Some(p));
        if !contiguous {
            log::debug!("Sequência interrompida entre os concursos {:?} e {}", previous, current);
        }

        for (number, state) in universe().zip(states.iter_mut()) {
            if !contiguous {
                state.close_occurrence(min_run_length);
                state.close_absence(min_run_length);
            }
            if draw.contains(number) {
                state.close_absence(min_run_length);
                state.occurrence += 1;
            } else {
                state.close_occurrence(min_run_length);
                state.absence += 1;
            }
        }

        previous = Some(current);
    }

    let mut occurrence = Vec::with_capacity(states.len());
    let mut absence = Vec::with_capacity(states.len());
    for (number, mut state) in universe().zip(states) {
        // The oldest run has no closing transition.
        state.close_occurrence(min_run_length);
        state.close_absence(min_run_length);
        occurrence.push(RunLengthRecord { number, runs: state.occurrence_runs });
        absence.push(RunLengthRecord { number, runs: state.absence_runs });
    }

    RunLengths { occurrence, absence }
}
