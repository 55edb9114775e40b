use lotofacil_db::models::{UNIVERSE_SIZE, universe};
use serde::{Deserialize, Serialize};

use crate::record::DrawRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceCount {
    pub number: u8,
    pub occurrences: u32,
}

/// One entry per universe number, ascending. Window order is irrelevant.
pub fn count_occurrences<D: DrawRecord>(window: &[D]) -> Vec<OccurrenceCount> {
    let mut counts = vec![0u32; UNIVERSE_SIZE as usize];

    for draw in window {
        for &n in draw.drawn_numbers() {
            if let Some(count) = counts.get_mut(n.wrapping_sub(1) as usize) {
                *count += 1;
            }
        }
    }

    universe()
        .zip(counts)
        .map(|(number, occurrences)| OccurrenceCount { number, occurrences })
        .collect()
}
