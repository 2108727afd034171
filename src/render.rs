//! Turns stored card text into the text shown on screen.
use crate::models::Card;

pub trait CardRenderer {
    fn rendered_question(&self, card: &Card) -> String;
    fn rendered_answer(&self, card: &Card) -> String;
}

/// Renders card text as plain text: surrounding whitespace is trimmed and
/// Windows line endings are normalized.
#[derive(Default, Clone, Copy)]
pub struct PlainTextRenderer;

impl PlainTextRenderer {
    fn render(text: &str) -> String {
        text.trim().replace("\r\n", "\n")
    }
}

impl CardRenderer for PlainTextRenderer {
    fn rendered_question(&self, card: &Card) -> String {
        Self::render(&card.question)
    }

    fn rendered_answer(&self, card: &Card) -> String {
        Self::render(&card.answer)
    }
}
