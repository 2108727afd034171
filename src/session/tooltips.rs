use crate::models::{Grade, Phase};
use crate::text::TextKey;

/// Grade button tooltips, indexed by phase and then grade.
const TOOLTIPS: [[TextKey; 6]; 2] = [
    [
        TextKey::NotRememberedYet,
        TextKey::GettingFamiliar,
        TextKey::MemorisedNow,
        TextKey::MemorisedNow,
        TextKey::MemorisedNow,
        TextKey::MemorisedNow,
    ],
    [
        TextKey::ForgottenCompletely,
        TextKey::ForgottenCompletely,
        TextKey::BarelyCorrect,
        TextKey::CorrectMuchEffort,
        TextKey::CorrectSomeEffort,
        TextKey::CorrectEffortless,
    ],
];

pub fn tooltip(phase: Phase, grade: Grade) -> TextKey {
    TOOLTIPS[phase.index()][grade.value() as usize]
}
