use lotofacil_db::models::Draw;

/// Read-only view of one draw as the analyzers see it.
pub trait DrawRecord {
    fn draw_number(&self) -> u32;

    fn drawn_numbers(&self) -> &[u8];

    fn contains(&self, number: u8) -> bool {
        self.drawn_numbers().contains(&number)
    }
}

impl DrawRecord for Draw {
    fn draw_number(&self) -> u32 {
        self.number
    }

    fn drawn_numbers(&self) -> &[u8] {
        &self.numbers
    }

    fn contains(&self, number: u8) -> bool {
        Draw::contains(self, number)
    }
}

impl<D: DrawRecord + ?Sized> DrawRecord for &D {
    fn draw_number(&self) -> u32 {
        (**self).draw_number()
    }

    fn drawn_numbers(&self) -> &[u8] {
        (**self).drawn_numbers()
    }

    fn contains(&self, number: u8) -> bool {
        (**self).contains(number)
    }
}

/// Draws of the window, newest first. Ties keep their input order.
pub(crate) fn newest_first<D: DrawRecord>(window: &[D]) -> Vec<&D> {
    let mut ordered: Vec<&D> = window.iter().collect();
    ordered.sort_by(|a, b| b.draw_number().cmp(&a.draw_number()));
    ordered
}

#[cfg(test)]
pub(crate) mod testing {
    use super::DrawRecord;

    /// Lightweight draw for analyzer tests; no 15-number invariant.
    #[derive(Debug, Clone)]
    pub struct TestDraw {
        pub number: u32,
        pub numbers: Vec<u8>,
    }

    impl DrawRecord for TestDraw {
        fn draw_number(&self) -> u32 {
            self.number
        }

        fn drawn_numbers(&self) -> &[u8] {
            &self.numbers
        }
    }

    pub fn draw(number: u32, numbers: &[u8]) -> TestDraw {
        TestDraw {
            number,
            numbers: numbers.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::draw;
    use super::*;

    #[test]
    fn test_newest_first_sorts_descending() {
        let window = vec![draw(8, &[1]), draw(10, &[2]), draw(9, &[3])];
        let ordered: Vec<u32> = newest_first(&window).iter().map(|d| d.draw_number()).collect();
        assert_eq!(ordered, vec![10, 9, 8]);
    }

    #[test]
    fn test_draw_record_for_model_draw() {
        let numbers: Vec<u8> = (1..=15).collect();
        let d = Draw::new(12, chrono::NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), &numbers).unwrap();
        assert_eq!(d.draw_number(), 12);
        assert_eq!(d.drawn_numbers().len(), 15);
        assert!(DrawRecord::contains(&d, 15));
        assert!(!DrawRecord::contains(&d, 16));
    }
}
