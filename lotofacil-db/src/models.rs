use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Numbers 1..=25 a draw picks from.
pub const UNIVERSE_SIZE: u8 = 25;

/// Numbers picked per draw.
pub const PICK_COUNT: usize = 15;

pub fn universe() -> std::ops::RangeInclusive<u8> {
    1..=UNIVERSE_SIZE
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("Um concurso deve ter exatamente 15 dezenas (recebidas: {0})")]
    WrongCount(usize),

    #[error("Dezena {0} fora do intervalo (1-25)")]
    OutOfRange(u8),

    #[error("Dezena repetida no mesmo concurso: {0}")]
    Duplicate(u8),

    #[error("Número do concurso deve ser maior que zero")]
    InvalidNumber,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prizes {
    pub winners_15: u32,
    pub winners_14: u32,
    pub winners_13: u32,
    pub winners_12: u32,
    pub winners_11: u32,
    pub payout_15: f64,
    pub payout_14: f64,
    pub payout_13: f64,
    pub payout_12: f64,
    pub payout_11: f64,
    pub jackpot_15: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draw {
    pub number: u32,
    pub date: NaiveDate,
    /// Kept sorted ascending by every constructor in this crate.
    pub numbers: [u8; PICK_COUNT],
    pub total_revenue: f64,
    pub prizes: Prizes,
    /// Drawn here but not in the previous draw.
    pub absent_in_previous: Vec<u8>,
    /// Drawn here and in the previous draw.
    pub repeated_from_previous: Vec<u8>,
    /// Top ranked numbers of the window that preceded this draw.
    pub pre_draw_most_drawn: Vec<u8>,
    pub pre_draw_most_overdue: Vec<u8>,
}

impl Draw {
    pub fn new(number: u32, date: NaiveDate, numbers: &[u8]) -> Result<Self, DrawError> {
        if number == 0 {
            return Err(DrawError::InvalidNumber);
        }
        validate_numbers(numbers)?;

        let mut sorted = [0u8; PICK_COUNT];
        sorted.copy_from_slice(numbers);
        sorted.sort_unstable();

        Ok(Self {
            number,
            date,
            numbers: sorted,
            total_revenue: 0.0,
            prizes: Prizes::default(),
            absent_in_previous: Vec::new(),
            repeated_from_previous: Vec::new(),
            pre_draw_most_drawn: Vec::new(),
            pre_draw_most_overdue: Vec::new(),
        })
    }

    pub fn with_revenue(mut self, total_revenue: f64) -> Self {
        self.total_revenue = total_revenue;
        self
    }

    pub fn contains(&self, n: u8) -> bool {
        self.numbers.contains(&n)
    }

    pub fn not_drawn(&self) -> Vec<u8> {
        universe().filter(|&n| !self.contains(n)).collect()
    }

    /// Fills the fields that compare this draw with the one just before it.
    pub fn link_previous(&mut self, previous: Option<&Draw>) {
        match previous {
            Some(prev) => {
                let (repeated, fresh): (Vec<u8>, Vec<u8>) =
                    self.numbers.iter().partition(|&&n| prev.contains(n));
                self.repeated_from_previous = repeated;
                self.absent_in_previous = fresh;
            }
            None => {
                self.repeated_from_previous.clear();
                self.absent_in_previous.clear();
            }
        }
    }
}

pub fn validate_numbers(numbers: &[u8]) -> Result<(), DrawError> {
    if numbers.len() != PICK_COUNT {
        return Err(DrawError::WrongCount(numbers.len()));
    }
    let mut seen = [false; UNIVERSE_SIZE as usize + 1];
    for &n in numbers {
        if n < 1 || n > UNIVERSE_SIZE {
            return Err(DrawError::OutOfRange(n));
        }
        if seen[n as usize] {
            return Err(DrawError::Duplicate(n));
        }
        seen[n as usize] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
    }

    fn first_fifteen() -> Vec<u8> {
        (1..=15).collect()
    }

    #[test]
    fn test_validate_numbers_ok() {
        assert!(validate_numbers(&first_fifteen()).is_ok());
        assert!(validate_numbers(&(11..=25).collect::<Vec<u8>>()).is_ok());
    }

    #[test]
    fn test_validate_numbers_wrong_count() {
        assert_eq!(validate_numbers(&[1, 2, 3]), Err(DrawError::WrongCount(3)));
        assert_eq!(
            validate_numbers(&(1..=16).collect::<Vec<u8>>()),
            Err(DrawError::WrongCount(16))
        );
    }

    #[test]
    fn test_validate_numbers_out_of_range() {
        let mut nums = first_fifteen();
        nums[0] = 0;
        assert_eq!(validate_numbers(&nums), Err(DrawError::OutOfRange(0)));
        nums[0] = 26;
        assert_eq!(validate_numbers(&nums), Err(DrawError::OutOfRange(26)));
    }

    #[test]
    fn test_validate_numbers_duplicate() {
        let mut nums = first_fifteen();
        nums[14] = 1;
        assert_eq!(validate_numbers(&nums), Err(DrawError::Duplicate(1)));
    }

    #[test]
    fn test_new_sorts_numbers() {
        let nums: Vec<u8> = (11..=25).rev().collect();
        let draw = Draw::new(7, date(), &nums).unwrap();
        assert_eq!(draw.numbers[0], 11);
        assert_eq!(draw.numbers[14], 25);
    }

    #[test]
    fn test_new_rejects_draw_zero() {
        assert_eq!(
            Draw::new(0, date(), &first_fifteen()),
            Err(DrawError::InvalidNumber)
        );
    }

    #[test]
    fn test_not_drawn() {
        let draw = Draw::new(1, date(), &first_fifteen()).unwrap();
        assert_eq!(draw.not_drawn(), (16..=25).collect::<Vec<u8>>());
        assert!(draw.contains(15));
        assert!(!draw.contains(16));
    }

    #[test]
    fn test_contains_does_not_depend_on_order() {
        let mut draw = Draw::new(1, date(), &first_fifteen()).unwrap();
        draw.numbers.reverse();
        assert!((1..=15).all(|n| draw.contains(n)));
        assert!(!draw.contains(16));
        assert_eq!(draw.not_drawn(), (16..=25).collect::<Vec<u8>>());
    }

    #[test]
    fn test_link_previous() {
        let previous = Draw::new(1, date(), &first_fifteen()).unwrap();
        let mut current = Draw::new(2, date(), &(6..=20).collect::<Vec<u8>>()).unwrap();

        current.link_previous(Some(&previous));
        assert_eq!(current.repeated_from_previous, (6..=15).collect::<Vec<u8>>());
        assert_eq!(current.absent_in_previous, (16..=20).collect::<Vec<u8>>());

        current.link_previous(None);
        assert!(current.repeated_from_previous.is_empty());
        assert!(current.absent_in_previous.is_empty());
    }

    #[test]
    fn test_draw_serializes_date_as_iso() {
        let draw = Draw::new(3, date(), &first_fifteen()).unwrap();
        let json = serde_json::to_value(&draw).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert_eq!(json["number"], 3);
    }
}
