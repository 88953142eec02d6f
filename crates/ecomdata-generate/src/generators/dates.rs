use chrono::{Days, NaiveDate};
use rand::Rng;

use crate::errors::GenerationError;

/// Inclusive calendar window relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Two years ago up to yesterday.
    pub fn signup(reference: NaiveDate) -> Result<Self, GenerationError> {
        Self::relative(reference, 730, 1)
    }

    /// One year ago up to today.
    pub fn order(reference: NaiveDate) -> Result<Self, GenerationError> {
        Self::relative(reference, 365, 0)
    }

    fn relative(
        reference: NaiveDate,
        days_back: u64,
        end_offset: u64,
    ) -> Result<Self, GenerationError> {
        let start = reference.checked_sub_days(Days::new(days_back));
        let end = reference.checked_sub_days(Days::new(end_offset));
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(GenerationError::InvalidOptions(format!(
                "reference date {reference} is out of range"
            ))),
        }
    }

    /// Draw a day uniformly from the window.
    pub fn sample(&self, rng: &mut impl Rng) -> NaiveDate {
        let span = (self.end - self.start).num_days().max(0) as u64;
        let offset = rng.random_range(0..=span);
        self.start
            .checked_add_days(Days::new(offset))
            .unwrap_or(self.end)
    }
}
