use std::cmp::Reverse;

use crate::absence::AbsenceRecord;
use crate::config::TopK;
use crate::frequency::OccurrenceCount;
use crate::report::StatisticsReport;
use crate::runs::{RunLengthRecord, RunLengths};

/// Sorts every list by its metric, descending, with ties broken by
/// ascending number. Only the frequency and overdue lists are cut to top-K.
pub fn rank(
    mut counts: Vec<OccurrenceCount>,
    mut absences: Vec<AbsenceRecord>,
    runs: RunLengths,
    top_k: TopK,
    total_analyzed: usize,
) -> StatisticsReport {
    counts.sort_by_key(|c| (Reverse(c.occurrences), c.number));
    counts.truncate(top_k.get());

    absences.sort_by_key(|a| (Reverse(a.draws_since_last_seen), a.number));
    absences.truncate(top_k.get());

    let RunLengths { occurrence, absence } = runs;

    StatisticsReport::new(
        counts,
        absences,
        sort_by_longest(occurrence),
        sort_by_longest(absence),
        total_analyzed,
    )
}

fn sort_by_longest(mut records: Vec<RunLengthRecord>) -> Vec<RunLengthRecord> {
    records.sort_by_key(|r| (Reverse(r.longest()), r.number));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(values: &[u32]) -> Vec<OccurrenceCount> {
        values
            .iter()
            .enumerate()
            .map(|(i, &occurrences)| OccurrenceCount { number: i as u8 + 1, occurrences })
            .collect()
    }

    fn no_runs() -> RunLengths {
        RunLengths { occurrence: vec![], absence: vec![] }
    }

    #[test]
    fn test_truncates_to_top_k_descending() {
        let values: Vec<u32> = (0..25).map(|i| (i * 7 % 25) as u32).collect();
        let report = rank(counts(&values), vec![], no_runs(), TopK::new(5).unwrap(), 10);

        let got: Vec<u32> = report.most_drawn().iter().map(|c| c.occurrences).collect();
        assert_eq!(got, vec![24, 23, 22, 21, 20]);
    }

    #[test]
    fn test_top_k_larger_than_universe() {
        let report = rank(counts(&[1; 25]), vec![], no_runs(), TopK::new(40).unwrap(), 1);
        assert_eq!(report.most_drawn().len(), 25);
    }

    #[test]
    fn test_ties_break_by_ascending_number() {
        let report = rank(counts(&[3, 5, 5, 3, 5]), vec![], no_runs(), TopK::new(4).unwrap(), 5);
        assert_eq!(report.most_drawn_numbers(), vec![2, 3, 5, 1]);
    }

    #[test]
    fn test_absences_sorted_and_truncated() {
        let absences = vec![
            AbsenceRecord { number: 1, draws_since_last_seen: 0, last_seen_draw_number: Some(9) },
            AbsenceRecord { number: 2, draws_since_last_seen: 4, last_seen_draw_number: Some(5) },
            AbsenceRecord { number: 3, draws_since_last_seen: 9, last_seen_draw_number: None },
            AbsenceRecord { number: 4, draws_since_last_seen: 4, last_seen_draw_number: Some(5) },
        ];
        let report = rank(vec![], absences, no_runs(), TopK::new(3).unwrap(), 9);
        assert_eq!(report.most_overdue_numbers(), vec![3, 2, 4]);
    }

    #[test]
    fn test_runs_sorted_by_longest_and_not_truncated() {
        let occurrence = vec![
            RunLengthRecord { number: 1, runs: vec![2, 2] },
            RunLengthRecord { number: 2, runs: vec![] },
            RunLengthRecord { number: 3, runs: vec![2, 5] },
            RunLengthRecord { number: 4, runs: vec![3] },
        ];
        let runs = RunLengths { occurrence, absence: vec![] };
        let report = rank(vec![], vec![], runs, TopK::new(1).unwrap(), 8);

        let order: Vec<u8> = report.longest_occurrence_runs().iter().map(|r| r.number).collect();
        assert_eq!(order, vec![3, 4, 1, 2]);
        assert_eq!(report.longest_occurrence_runs()[0].runs, vec![2, 5]);
    }
}
