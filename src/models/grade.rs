//! Recall-quality grades and the learning phase they imply.
use crate::error::{Result, ReviewError};
use std::fmt;

/// A recall-quality score between 0 (complete blackout) and 5 (perfect recall).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    pub const MAX: u8 = 5;

    /// Grade that is offered as the default button while a card is in retention.
    pub const RETENTION_DEFAULT: Grade = Grade(4);

    pub fn new(value: u8) -> Result<Self> {
        if value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(ReviewError::InvalidGrade(value.into()))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All grades in ascending order.
    pub fn all() -> impl Iterator<Item = Grade> {
        (0..=Self::MAX).map(Grade)
    }
}

impl TryFrom<i32> for Grade {
    type Error = ReviewError;

    fn try_from(value: i32) -> Result<Self> {
        let value = u8::try_from(value).map_err(|_| ReviewError::InvalidGrade(value))?;
        Self::new(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a card is still being learned or is being retained.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Acquisition,
    Retention,
}

impl Phase {
    /// Cards whose last grade was 0 or 1 are still in acquisition. Cards that
    /// were never graded count as retention.
    pub fn of(last_grade: Option<Grade>) -> Self {
        match last_grade {
            Some(grade) if grade.value() <= 1 => Phase::Acquisition,
            _ => Phase::Retention,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Phase::Acquisition => 0,
            Phase::Retention => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_range() {
        for value in 0..=5 {
            assert_eq!(Grade::new(value).unwrap().value(), value);
        }
        assert!(matches!(Grade::new(6), Err(ReviewError::InvalidGrade(6))));
        assert!(matches!(Grade::new(255), Err(ReviewError::InvalidGrade(255))));
    }

    #[test]
    fn test_grade_from_int() {
        assert_eq!(Grade::try_from(3).unwrap().value(), 3);
        for value in [-1, 6, 256, 261, i32::MIN, i32::MAX] {
            let result = Grade::try_from(value);
            assert!(matches!(result, Err(ReviewError::InvalidGrade(v)) if v == value));
        }
    }

    #[test]
    fn test_all_grades() {
        let values: Vec<u8> = Grade::all().map(Grade::value).collect();
        assert_eq!(values, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_phase() {
        assert_eq!(Phase::of(None), Phase::Retention);
        assert_eq!(Phase::of(Some(Grade(0))), Phase::Acquisition);
        assert_eq!(Phase::of(Some(Grade(1))), Phase::Acquisition);
        for value in 2..=5 {
            assert_eq!(Phase::of(Some(Grade(value))), Phase::Retention);
        }
    }
}
