//! Services the review session drives but does not own the logic of.
use super::ViewState;
use crate::error::Result;
use crate::models::{Card, Grade, Interval};
use std::time::Duration;

pub trait CardStore {
    /// Total number of cards available for study.
    fn card_count(&self) -> Result<usize>;
    /// Identifies the active store in the window title.
    fn store_name(&self) -> String;
}

pub trait Scheduler {
    /// Picks the next card to review. Returns `None` when nothing is due and
    /// `learn_ahead` is false.
    fn select_next_card(&mut self, learn_ahead: bool) -> Result<Option<Card>>;

    /// Records a grade for `card`, given the time the user spent thinking
    /// before revealing the answer, and returns the newly scheduled interval.
    fn record_grade(&mut self, card: &Card, grade: Grade, thinking_time: Duration)
    -> Result<Interval>;
}

/// Receives the complete view after every transition.
pub trait PresentationSurface {
    fn show(&mut self, view: &ViewState);
}
