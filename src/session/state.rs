use std::fmt;

/// What the review screen is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// The store holds no cards.
    Empty,
    /// A card's question is shown and its answer is hidden.
    AwaitingShow,
    /// The answer is revealed and the card can be graded.
    AwaitingGrade,
    /// Nothing is due, but the user may study ahead of schedule.
    AwaitingAhead,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Empty => "empty",
            SessionState::AwaitingShow => "awaiting show",
            SessionState::AwaitingGrade => "awaiting grade",
            SessionState::AwaitingAhead => "awaiting learn ahead",
        };
        f.write_str(name)
    }
}
