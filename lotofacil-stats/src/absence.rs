use lotofacil_db::models::universe;
use serde::{Deserialize, Serialize};

use crate::record::{DrawRecord, newest_first};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsenceRecord {
    pub number: u8,
    pub draws_since_last_seen: u32,
    /// `None` when the number never shows up in the window.
    pub last_seen_draw_number: Option<u32>,
}

/// Current overdue streak of every universe number, ascending by number.
///
/// The scan starts at the newest draw and stops at the first draw holding
/// the number; that draw is the one reported as last seen.
pub fn track_absences<D: DrawRecord>(window: &[D]) -> Vec<AbsenceRecord> {
    let ordered = newest_first(window);

    universe()
        .map(|number| {
            let mut draws_since_last_seen = 0u32;
            let mut last_seen_draw_number = None;

            for draw in &ordered {
                if draw.contains(number) {
                    last_seen_draw_number = Some(draw.draw_number());
                    break;
                }
                draws_since_last_seen += 1;
            }

            AbsenceRecord {
                number,
                draws_since_last_seen,
                last_seen_draw_number,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::testing::{TestDraw, draw};

    #[test]
    fn test_empty_window() {
        let absences = track_absences::<TestDraw>(&[]);
        assert_eq!(absences.len(), 25);
        for a in &absences {
            assert_eq!(a.draws_since_last_seen, 0);
            assert_eq!(a.last_seen_draw_number, None);
        }
    }

    #[test]
    fn test_counts_from_newest_draw() {
        let window = vec![draw(10, &[1]), draw(11, &[2]), draw(12, &[3])];
        let absences = track_absences(&window);

        assert_eq!(absences[2].draws_since_last_seen, 0);
        assert_eq!(absences[2].last_seen_draw_number, Some(12));
        assert_eq!(absences[1].draws_since_last_seen, 1);
        assert_eq!(absences[1].last_seen_draw_number, Some(11));
        assert_eq!(absences[0].draws_since_last_seen, 2);
        assert_eq!(absences[0].last_seen_draw_number, Some(10));
    }

    #[test]
    fn test_never_seen_spans_whole_window() {
        let window = vec![draw(1, &[1]), draw(2, &[1]), draw(3, &[1])];
        let absences = track_absences(&window);
        assert_eq!(absences[24].draws_since_last_seen, 3);
        assert_eq!(absences[24].last_seen_draw_number, None);
    }

    #[test]
    fn test_last_seen_is_the_draw_where_the_scan_stopped() {
        let window = vec![draw(20, &[4]), draw(21, &[5]), draw(22, &[5])];
        let absences = track_absences(&window);
        assert_eq!(absences[3].last_seen_draw_number, Some(20));
    }

    #[test]
    fn test_last_seen_is_not_overwritten_by_newest_draw() {
        // Number 4 is missing from the newest draw (22): reporting 22 as
        // its last appearance would contradict the two-draw streak.
        let window = vec![draw(22, &[5]), draw(21, &[5]), draw(20, &[4])];
        let absences = track_absences(&window);
        assert_eq!(absences[3].draws_since_last_seen, 2);
        assert_ne!(absences[3].last_seen_draw_number, Some(22));
        assert_eq!(absences[3].last_seen_draw_number, Some(20));
    }
}
