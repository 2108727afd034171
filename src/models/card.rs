//! A card is a question/answer pair filed under a category.
use super::Grade;

/// Name of the category cards land in when none is given.
pub const DEFAULT_CATEGORY: &str = "<default>";

#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub id: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
    /// The grade given at the most recent review, if the card was ever reviewed.
    pub last_grade: Option<Grade>,
    /// The answer is laid out on top of the question, so only one of them is
    /// shown at a time.
    pub answer_on_top: bool,
}

impl Card {
    pub fn has_default_category(&self) -> bool {
        self.category.is_empty() || self.category == DEFAULT_CATEGORY
    }
}
