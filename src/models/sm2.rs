//! SM-2 (SuperMemo 2) spaced repetition algorithm implementation.
//!
//! The SM-2 algorithm calculates optimal review intervals based on recall quality:
//! - Each card has an easiness factor (EF) that adjusts based on performance
//! - Quality grades 0-2: Reset interval and repetitions (card needs relearning)
//! - Quality grades 3-5: Increase interval progressively (1 day → 6 days → EF multiplier)
//! - EF is adjusted after each review and has a minimum value of 1.3

use super::{Grade, ReviewData};
use std::time::{Duration, SystemTime};

const MIN_EASINESS_FACTOR: f64 = 1.3;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Calculates new review data according to the SM-2 algorithm.
pub fn calculate_next_review(
    review_data: &ReviewData,
    grade: Grade,
    current_date: SystemTime,
) -> ReviewData {
    let q = grade.value() as f64;
    let new_ef = (review_data.easiness_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02)))
        .max(MIN_EASINESS_FACTOR);

    let (new_interval, new_repetitions) = if grade.value() < 3 {
        (0, 0)
    } else {
        let new_reps = review_data.repetitions + 1;
        let new_int = match new_reps {
            1 => 1,
            2 => 6,
            _ => (review_data.interval_days as f64 * new_ef).round() as i32,
        };
        (new_int, new_reps)
    };

    let next_date = current_date + Duration::from_secs((new_interval as u64) * SECONDS_PER_DAY);

    ReviewData {
        card_id: review_data.card_id,
        easiness_factor: new_ef,
        interval_days: new_interval,
        repetitions: new_repetitions,
        next_review_date: next_date,
        last_grade: Some(grade),
    }
}
