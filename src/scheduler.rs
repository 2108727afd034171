//! SM-2 scheduling over the card store.
use crate::database::Database;
use crate::error::Result;
use crate::models::sm2::calculate_next_review;
use crate::models::{Card, Grade, Interval};
use crate::session::Scheduler;
use std::time::Duration;

pub struct Sm2Scheduler {
    db: Database,
    /// The card graded most recently, avoided when another card is due.
    last_graded: Option<i64>,
}

impl Sm2Scheduler {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            last_graded: None,
        }
    }
}

impl Scheduler for Sm2Scheduler {
    fn select_next_card(&mut self, learn_ahead: bool) -> Result<Option<Card>> {
        if let Some(card) = self.db.next_due_card(self.last_graded)? {
            return Ok(Some(card));
        }
        if learn_ahead {
            return self.db.upcoming_card();
        }
        Ok(None)
    }

    fn record_grade(
        &mut self,
        card: &Card,
        grade: Grade,
        thinking_time: Duration,
    ) -> Result<Interval> {
        let review_data = self.db.review_data(card.id)?;
        let current_date = self.db.current_date()?;
        let new_review = calculate_next_review(&review_data, grade, current_date);
        self.db.update_review_data(&new_review)?;

        let interval = Interval::from_days(new_review.interval_days);
        self.db.log_review(card.id, grade, thinking_time, interval)?;
        self.last_graded = Some(card.id);
        log::debug!(
            "Card {} EF={:.2} reps={} interval={}",
            card.id,
            new_review.easiness_factor,
            new_review.repetitions,
            interval
        );
        Ok(interval)
    }
}
