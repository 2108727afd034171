//! Derivation of everything the review screen shows from the session state.
//!
//! The view is rebuilt from scratch after every transition, so no control can
//! drift out of step with the state it reflects.

use super::SessionState;
use super::tooltips::tooltip;
use crate::config::ReviewConfig;
use crate::models::{Card, Grade, Phase};
use crate::render::CardRenderer;
use crate::text::{TextKey, TextResolver};

#[derive(Clone, Debug, PartialEq)]
pub struct ShowButton {
    pub caption: String,
    pub enabled: bool,
    /// Triggered by the default key (Space/Enter).
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GradeButton {
    pub grade: Grade,
    pub caption: String,
    pub tooltip: String,
    pub is_default: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub title: String,
    pub edit_current_card_enabled: bool,
    pub delete_current_card_enabled: bool,
    pub edit_deck_enabled: bool,
    pub question_visible: bool,
    pub answer_visible: bool,
    pub question_label: String,
    pub answer_label: String,
    pub question: String,
    pub answer: String,
    pub show_button: ShowButton,
    pub grades_title: String,
    pub grades_enabled: bool,
    pub default_grade: Option<Grade>,
    pub grade_buttons: Vec<GradeButton>,
}

/// Everything the view depends on besides the renderer and the text table.
pub struct ViewInputs<'a> {
    pub state: SessionState,
    pub card: Option<&'a Card>,
    pub config: &'a ReviewConfig,
    pub store_name: &'a str,
    pub store_has_cards: bool,
}

pub fn derive_view_state(
    inputs: &ViewInputs<'_>,
    renderer: &dyn CardRenderer,
    text: &dyn TextResolver,
) -> ViewState {
    let state = inputs.state;
    let card = inputs.card;
    let has_card = card.is_some();
    let answer_on_top = card.is_some_and(|card| card.answer_on_top);

    let title = format!("{} - {}", text.text(TextKey::AppName), inputs.store_name);

    let edit_current_card_enabled = has_card
        && (!inputs.config.only_editable_when_answer_shown
            || state == SessionState::AwaitingGrade);

    let (question_visible, answer_visible) = match state {
        SessionState::AwaitingShow => (true, !answer_on_top),
        SessionState::AwaitingGrade => (!answer_on_top, true),
        SessionState::Empty | SessionState::AwaitingAhead => (true, true),
    };

    let mut question_label = text.text(TextKey::QuestionLabel);
    if let Some(card) = card {
        if !card.has_default_category() {
            question_label.push(' ');
            question_label.push_str(&card.category);
        }
    }

    // Each side is rendered at most once per view.
    let question = match card {
        Some(card) => renderer.rendered_question(card),
        None => String::new(),
    };
    let answer = match (card, state) {
        (Some(card), SessionState::AwaitingGrade) => renderer.rendered_answer(card),
        _ => String::new(),
    };

    let (show_enabled, show_default, show_caption) = match state {
        SessionState::Empty => (false, true, TextKey::ShowAnswer),
        SessionState::AwaitingShow => (true, true, TextKey::ShowAnswer),
        SessionState::AwaitingGrade => (false, true, TextKey::ShowAnswer),
        SessionState::AwaitingAhead => (true, false, TextKey::LearnAhead),
    };
    let grades_enabled = match state {
        SessionState::AwaitingGrade => true,
        SessionState::Empty | SessionState::AwaitingShow | SessionState::AwaitingAhead => false,
    };

    let phase = Phase::of(card.and_then(|card| card.last_grade));
    let default_grade = match phase {
        Phase::Acquisition => None,
        Phase::Retention => Some(Grade::RETENTION_DEFAULT),
    };
    let grade_buttons = Grade::all()
        .map(|grade| GradeButton {
            grade,
            caption: grade.to_string(),
            tooltip: text.text(tooltip(phase, grade)),
            is_default: default_grade == Some(grade),
        })
        .collect();

    ViewState {
        title,
        edit_current_card_enabled,
        delete_current_card_enabled: has_card,
        edit_deck_enabled: inputs.store_has_cards,
        question_visible,
        answer_visible,
        question_label,
        answer_label: text.text(TextKey::AnswerLabel),
        question,
        answer,
        show_button: ShowButton {
            caption: text.text(show_caption),
            enabled: show_enabled,
            is_default: show_default,
        },
        grades_title: text.text(TextKey::GradeYourAnswer),
        grades_enabled,
        default_grade,
        grade_buttons,
    }
}
