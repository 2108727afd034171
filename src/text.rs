//! User-visible strings, looked up by key so the session stays free of
//! locale concerns.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextKey {
    AppName,
    QuestionLabel,
    AnswerLabel,
    ShowAnswer,
    LearnAhead,
    GradeYourAnswer,
    ReturnsIn,
    Today,
    // Grade tooltips while a card is being acquired.
    NotRememberedYet,
    GettingFamiliar,
    MemorisedNow,
    // Grade tooltips while a card is being retained.
    ForgottenCompletely,
    BarelyCorrect,
    CorrectMuchEffort,
    CorrectSomeEffort,
    CorrectEffortless,
}

pub trait TextResolver {
    fn text(&self, key: TextKey) -> String;
}

#[derive(Default, Clone, Copy)]
pub struct EnglishText;

impl TextResolver for EnglishText {
    fn text(&self, key: TextKey) -> String {
        let text = match key {
            TextKey::AppName => "Flashcards",
            TextKey::QuestionLabel => "Question:",
            TextKey::AnswerLabel => "Answer:",
            TextKey::ShowAnswer => "Show answer",
            TextKey::LearnAhead => "Learn ahead of schedule",
            TextKey::GradeYourAnswer => "Grade your answer:",
            TextKey::ReturnsIn => "Returns in",
            TextKey::Today => "Today:",
            TextKey::NotRememberedYet => "You don't remember this card yet.",
            TextKey::GettingFamiliar => {
                "Like '0', but it's getting more familiar. Show it less often."
            }
            TextKey::MemorisedNow => {
                "You've memorised this card now, and will probably remember it for a few days."
            }
            TextKey::ForgottenCompletely => "You have forgotten this card completely.",
            TextKey::BarelyCorrect => "Barely correct answer. The interval was way too long.",
            TextKey::CorrectMuchEffort => {
                "Correct answer, but with much effort. The interval was probably too long."
            }
            TextKey::CorrectSomeEffort => {
                "Correct answer, with some effort. The interval was probably just right."
            }
            TextKey::CorrectEffortless => {
                "Correct answer, but without any difficulties. The interval was probably too short."
            }
        };
        text.to_string()
    }
}
