//! The review loop: pick a card, reveal its answer, grade it, repeat.

use super::view::{ViewInputs, ViewState, derive_view_state};
use super::{CardStore, PresentationSurface, Scheduler, SessionState};
use crate::config::ReviewConfig;
use crate::error::{Result, ReviewError};
use crate::models::{Card, Grade, Interval};
use crate::render::{CardRenderer, PlainTextRenderer};
use crate::stopwatch::{ElapsedTimeTracker, Stopwatch};
use crate::text::{EnglishText, TextResolver};
use std::mem;

/// Session state together with the card it refers to, so the two can only
/// change together.
enum Slot {
    Empty,
    Show(Card),
    Grade(Card),
    Ahead,
}

impl Slot {
    fn state(&self) -> SessionState {
        match self {
            Slot::Empty => SessionState::Empty,
            Slot::Show(_) => SessionState::AwaitingShow,
            Slot::Grade(_) => SessionState::AwaitingGrade,
            Slot::Ahead => SessionState::AwaitingAhead,
        }
    }

    fn card(&self) -> Option<&Card> {
        match self {
            Slot::Show(card) | Slot::Grade(card) => Some(card),
            Slot::Empty | Slot::Ahead => None,
        }
    }
}

/// Drives one study session and keeps the presentation surface in sync with it.
///
/// Every mutating call ends by deriving a fresh [`ViewState`] and handing it to
/// the surface. The controller is not reentrant: each call runs to completion,
/// including cascaded calls, before the next one starts.
pub struct ReviewSessionController<S, Sc, P, W = Stopwatch> {
    store: S,
    scheduler: Sc,
    tracker: W,
    surface: P,
    renderer: Box<dyn CardRenderer>,
    text: Box<dyn TextResolver>,
    config: ReviewConfig,
    slot: Slot,
}

impl<S, Sc, P, W> ReviewSessionController<S, Sc, P, W>
where
    S: CardStore,
    Sc: Scheduler,
    P: PresentationSurface,
    W: ElapsedTimeTracker,
{
    /// Creates a controller in the `Empty` state. Nothing is shown until the
    /// first question is requested.
    pub fn new(store: S, scheduler: Sc, tracker: W, surface: P, config: ReviewConfig) -> Self {
        Self {
            store,
            scheduler,
            tracker,
            surface,
            renderer: Box::new(PlainTextRenderer),
            text: Box::new(EnglishText),
            config,
            slot: Slot::Empty,
        }
    }

    pub fn with_renderer(mut self, renderer: impl CardRenderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn with_text(mut self, text: impl TextResolver + 'static) -> Self {
        self.text = Box::new(text);
        self
    }

    pub fn state(&self) -> SessionState {
        self.slot.state()
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.slot.card()
    }

    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    pub fn text(&self) -> &dyn TextResolver {
        self.text.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn scheduler(&self) -> &Sc {
        &self.scheduler
    }

    pub fn tracker(&self) -> &W {
        &self.tracker
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut P {
        &mut self.surface
    }

    /// Selects the next card and restarts the think-time measurement.
    ///
    /// An empty store leads to `Empty`; a store with nothing due leads to
    /// `AwaitingAhead` unless `learn_ahead` makes the scheduler pick a card
    /// before its time.
    pub fn request_new_question(&mut self, learn_ahead: bool) -> Result<()> {
        let slot = if self.store.card_count()? == 0 {
            Slot::Empty
        } else {
            match self.scheduler.select_next_card(learn_ahead)? {
                Some(card) => Slot::Show(card),
                None => Slot::Ahead,
            }
        };
        self.slot = slot;
        self.tracker.start();
        match self.slot.card() {
            Some(card) => log::debug!("Showing question of card {}", card.id),
            None => log::debug!("No question to show ({})", self.slot.state()),
        }
        self.update_view()
    }

    /// Reveals the answer of the current card, or, when nothing is due,
    /// starts learning ahead of schedule.
    ///
    /// Fails with [`ReviewError::NoCurrentCard`] in the `Empty` state.
    pub fn reveal_answer(&mut self) -> Result<()> {
        match self.slot {
            Slot::Ahead => {
                log::debug!("Learning ahead of schedule");
                return self.request_new_question(true);
            }
            Slot::Empty => {
                return Err(ReviewError::NoCurrentCard {
                    operation: "reveal_answer",
                });
            }
            Slot::Show(_) | Slot::Grade(_) => {}
        }
        self.tracker.stop();
        self.slot = match mem::replace(&mut self.slot, Slot::Empty) {
            Slot::Show(card) | Slot::Grade(card) => Slot::Grade(card),
            other => other,
        };
        self.update_view()
    }

    /// Records `grade` for the current card, then moves on to the next question.
    ///
    /// Grades outside 0..=5 are rejected before anything else happens.
    pub fn grade_answer(&mut self, grade: i32) -> Result<Interval> {
        let grade = Grade::try_from(grade)?;
        let card = self.slot.card().ok_or(ReviewError::NoCurrentCard {
            operation: "grade_answer",
        })?;
        let thinking_time = self.tracker.elapsed();
        let interval = self.scheduler.record_grade(card, grade, thinking_time)?;
        log::debug!(
            "Card {} graded {grade} after {}ms, returns in {interval}",
            card.id,
            thinking_time.as_millis()
        );
        self.request_new_question(false)?;
        Ok(interval)
    }

    /// Swaps in an updated copy of the current card, e.g. after its text was
    /// edited. Cards other than the current one are ignored.
    pub fn replace_current_card(&mut self, card: Card) -> Result<()> {
        match &mut self.slot {
            Slot::Show(current) | Slot::Grade(current) if current.id == card.id => {
                *current = card;
            }
            _ => return Ok(()),
        }
        self.update_view()
    }

    /// Re-emits the view for the unchanged session.
    pub fn refresh(&mut self) -> Result<()> {
        self.update_view()
    }

    fn update_view(&mut self) -> Result<()> {
        let store_name = self.store.store_name();
        let inputs = ViewInputs {
            state: self.slot.state(),
            card: self.slot.card(),
            config: &self.config,
            store_name: &store_name,
            store_has_cards: self.store.card_count()? > 0,
        };
        let view: ViewState =
            derive_view_state(&inputs, self.renderer.as_ref(), self.text.as_ref());
        self.surface.show(&view);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn card(id: i64, last_grade: Option<u8>) -> Card {
        Card {
            id,
            category: "Polish Vocabulary".to_string(),
            question: format!("question {id}"),
            answer: format!("answer {id}"),
            last_grade: last_grade.map(|value| Grade::new(value).unwrap()),
            answer_on_top: false,
        }
    }

    struct FakeStore {
        count: usize,
        fail: bool,
    }

    impl CardStore for FakeStore {
        fn card_count(&self) -> Result<usize> {
            if self.fail {
                return Err(ReviewError::Database(rusqlite::Error::QueryReturnedNoRows));
            }
            Ok(self.count)
        }

        fn store_name(&self) -> String {
            "polish".to_string()
        }
    }

    /// Hands out `due` while it is set and `ahead` when learning ahead.
    #[derive(Default)]
    struct FakeScheduler {
        due: Option<Card>,
        ahead: Option<Card>,
        /// Grading the due card makes it no longer due.
        graded_card_leaves: bool,
        selections: Vec<bool>,
        recorded: Vec<(i64, u8, Duration)>,
    }

    impl Scheduler for FakeScheduler {
        fn select_next_card(&mut self, learn_ahead: bool) -> Result<Option<Card>> {
            self.selections.push(learn_ahead);
            if self.due.is_some() {
                return Ok(self.due.clone());
            }
            Ok(if learn_ahead { self.ahead.clone() } else { None })
        }

        fn record_grade(
            &mut self,
            card: &Card,
            grade: Grade,
            thinking_time: Duration,
        ) -> Result<Interval> {
            self.recorded.push((card.id, grade.value(), thinking_time));
            if self.graded_card_leaves {
                self.due = None;
            }
            Ok(Interval::from_days(grade.value() as i32))
        }
    }

    #[derive(Default)]
    struct FakeTracker {
        starts: usize,
        stops: usize,
    }

    impl ElapsedTimeTracker for FakeTracker {
        fn start(&mut self) {
            self.starts += 1;
        }

        fn stop(&mut self) {
            self.stops += 1;
        }

        fn elapsed(&self) -> Duration {
            Duration::from_secs(3)
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        views: Vec<ViewState>,
    }

    impl PresentationSurface for RecordingSurface {
        fn show(&mut self, view: &ViewState) {
            self.views.push(view.clone());
        }
    }

    type TestController =
        ReviewSessionController<FakeStore, FakeScheduler, RecordingSurface, FakeTracker>;

    fn controller(count: usize, scheduler: FakeScheduler) -> TestController {
        ReviewSessionController::new(
            FakeStore { count, fail: false },
            scheduler,
            FakeTracker::default(),
            RecordingSurface::default(),
            ReviewConfig::default(),
        )
    }

    fn due(card: Card) -> FakeScheduler {
        FakeScheduler {
            due: Some(card),
            ..FakeScheduler::default()
        }
    }

    fn nothing_due(ahead: Card) -> FakeScheduler {
        FakeScheduler {
            ahead: Some(ahead),
            ..FakeScheduler::default()
        }
    }

    fn assert_card_matches_state(controller: &TestController) {
        let has_card = controller.current_card().is_some();
        let expects_card = matches!(
            controller.state(),
            SessionState::AwaitingShow | SessionState::AwaitingGrade
        );
        assert_eq!(has_card, expects_card);
    }

    #[test]
    fn test_initial_state_is_empty() {
        let controller = controller(1, due(card(1, None)));
        assert_eq!(controller.state(), SessionState::Empty);
        assert!(controller.current_card().is_none());
        assert!(controller.surface().views.is_empty());
    }

    #[test]
    fn test_new_question_on_empty_store() {
        let mut controller = controller(0, due(card(1, None)));
        controller.request_new_question(false).unwrap();
        assert_eq!(controller.state(), SessionState::Empty);
        assert!(controller.current_card().is_none());
        assert_eq!(controller.tracker().starts, 1);
        assert!(controller.scheduler().selections.is_empty());

        controller.request_new_question(false).unwrap();
        assert_eq!(controller.tracker().starts, 2);
        assert_eq!(controller.surface().views.len(), 2);
    }

    #[test]
    fn test_new_question_with_due_card() {
        let mut controller = controller(3, due(card(7, None)));
        controller.request_new_question(false).unwrap();
        assert_eq!(controller.state(), SessionState::AwaitingShow);
        assert_eq!(controller.current_card(), Some(&card(7, None)));
        assert_eq!(controller.scheduler().selections, vec![false]);
        assert_eq!(controller.tracker().starts, 1);

        let view = controller.surface().views.last().unwrap();
        assert_eq!(view.question, "question 7");
        assert_eq!(view.answer, "");
        assert!(view.show_button.enabled);
    }

    #[test]
    fn test_new_question_with_nothing_due() {
        let mut controller = controller(3, nothing_due(card(9, None)));
        controller.request_new_question(false).unwrap();
        assert_eq!(controller.state(), SessionState::AwaitingAhead);
        assert!(controller.current_card().is_none());
        assert_eq!(controller.tracker().starts, 1);

        let view = controller.surface().views.last().unwrap();
        assert_eq!(view.show_button.caption, "Learn ahead of schedule");
        assert!(!view.show_button.is_default);
    }

    #[test]
    fn test_reveal_from_ahead_learns_ahead() {
        let mut revealed = controller(3, nothing_due(card(9, Some(4))));
        revealed.request_new_question(false).unwrap();
        let views_before = revealed.surface().views.len();
        revealed.reveal_answer().unwrap();
        assert_eq!(revealed.surface().views.len(), views_before + 1);

        let mut requested = controller(3, nothing_due(card(9, Some(4))));
        requested.request_new_question(false).unwrap();
        requested.request_new_question(true).unwrap();

        assert_eq!(revealed.state(), SessionState::AwaitingShow);
        assert_eq!(revealed.state(), requested.state());
        assert_eq!(revealed.current_card(), requested.current_card());
        assert_eq!(revealed.scheduler().selections, vec![false, true]);
        assert_eq!(revealed.tracker().stops, 0);
        assert_eq!(revealed.tracker().starts, 2);
    }

    #[test]
    fn test_reveal_from_show() {
        let mut controller = controller(1, due(card(1, None)));
        controller.request_new_question(false).unwrap();
        controller.reveal_answer().unwrap();
        assert_eq!(controller.state(), SessionState::AwaitingGrade);
        assert_eq!(controller.current_card(), Some(&card(1, None)));
        assert_eq!(controller.tracker().stops, 1);

        let view = controller.surface().views.last().unwrap();
        assert_eq!(view.answer, "answer 1");
        assert!(view.grades_enabled);
        assert!(!view.show_button.enabled);
    }

    #[test]
    fn test_reveal_on_empty_is_rejected() {
        let mut controller = controller(0, FakeScheduler::default());
        controller.request_new_question(false).unwrap();
        let result = controller.reveal_answer();
        assert!(matches!(result, Err(ReviewError::NoCurrentCard { .. })));
        assert_eq!(controller.state(), SessionState::Empty);
        assert_eq!(controller.tracker().stops, 0);
        assert_eq!(controller.surface().views.len(), 1);
    }

    #[test]
    fn test_grade_forwards_and_advances() {
        let mut controller = controller(1, due(card(1, None)));
        controller.request_new_question(false).unwrap();
        controller.reveal_answer().unwrap();
        let views_before = controller.surface().views.len();

        let interval = controller.grade_answer(3).unwrap();
        assert_eq!(interval, Interval::from_days(3));
        assert_eq!(
            controller.scheduler().recorded,
            vec![(1, 3, Duration::from_secs(3))]
        );
        // The grade and the next question appear as a single update.
        assert_eq!(controller.surface().views.len(), views_before + 1);
        assert_eq!(controller.state(), SessionState::AwaitingShow);
        assert_eq!(controller.tracker().starts, 2);
        assert_eq!(controller.scheduler().selections, vec![false, false]);
    }

    #[test]
    fn test_grade_single_card_that_leaves() {
        let scheduler = FakeScheduler {
            graded_card_leaves: true,
            ..due(card(1, None))
        };
        let mut controller = controller(1, scheduler);
        controller.request_new_question(false).unwrap();
        controller.reveal_answer().unwrap();
        controller.grade_answer(5).unwrap();
        assert_eq!(controller.state(), SessionState::AwaitingAhead);
        assert!(controller.current_card().is_none());
    }

    #[test]
    fn test_invalid_grade_is_rejected() {
        let mut controller = controller(1, due(card(1, None)));
        controller.request_new_question(false).unwrap();
        controller.reveal_answer().unwrap();
        let views_before = controller.surface().views.len();

        for grade in [-1, 6, 42, 256, 261] {
            let result = controller.grade_answer(grade);
            assert!(matches!(result, Err(ReviewError::InvalidGrade(g)) if g == grade));
        }
        assert_eq!(controller.state(), SessionState::AwaitingGrade);
        assert_eq!(controller.current_card(), Some(&card(1, None)));
        assert!(controller.scheduler().recorded.is_empty());
        assert_eq!(controller.surface().views.len(), views_before);
    }

    #[test]
    fn test_grade_without_card_is_rejected() {
        let mut controller = controller(2, nothing_due(card(2, None)));
        controller.request_new_question(false).unwrap();
        let result = controller.grade_answer(4);
        assert!(matches!(result, Err(ReviewError::NoCurrentCard { .. })));
        assert!(controller.scheduler().recorded.is_empty());
    }

    #[test]
    fn test_store_failure_leaves_state() {
        let mut controller = ReviewSessionController::new(
            FakeStore {
                count: 1,
                fail: true,
            },
            due(card(1, None)),
            FakeTracker::default(),
            RecordingSurface::default(),
            ReviewConfig::default(),
        );
        let result = controller.request_new_question(false);
        assert!(matches!(result, Err(ReviewError::Database(_))));
        assert_eq!(controller.state(), SessionState::Empty);
        assert_eq!(controller.tracker().starts, 0);
        assert!(controller.surface().views.is_empty());
    }

    #[test]
    fn test_default_grade_by_phase() {
        let mut acquiring = controller(1, due(card(1, Some(1))));
        acquiring.request_new_question(false).unwrap();
        acquiring.reveal_answer().unwrap();
        let mut retaining = controller(1, due(card(1, Some(3))));
        retaining.request_new_question(false).unwrap();
        retaining.reveal_answer().unwrap();

        let acquiring_default = acquiring.surface().views.last().unwrap().default_grade;
        let retaining_default = retaining.surface().views.last().unwrap().default_grade;
        assert_eq!(acquiring_default, None);
        assert_eq!(retaining_default, Some(Grade::RETENTION_DEFAULT));
    }

    #[test]
    fn test_replace_current_card() {
        let mut controller = controller(1, due(card(1, None)));
        controller.request_new_question(false).unwrap();
        let mut edited = card(1, None);
        edited.question = "edited".to_string();
        controller.replace_current_card(edited.clone()).unwrap();
        assert_eq!(controller.current_card(), Some(&edited));
        assert_eq!(controller.surface().views.last().unwrap().question, "edited");

        // Another card's edit does not touch the session.
        let views_before = controller.surface().views.len();
        controller.replace_current_card(card(2, None)).unwrap();
        assert_eq!(controller.current_card(), Some(&edited));
        assert_eq!(controller.surface().views.len(), views_before);
    }

    struct KeyNames;

    impl TextResolver for KeyNames {
        fn text(&self, key: crate::text::TextKey) -> String {
            format!("{key:?}")
        }
    }

    #[test]
    fn test_injected_text_resolver() {
        let mut controller = controller(1, due(card(1, None))).with_text(KeyNames);
        controller.request_new_question(false).unwrap();
        let view = controller.surface().views.last().unwrap();
        assert_eq!(view.title, "AppName - polish");
        assert_eq!(view.show_button.caption, "ShowAnswer");
        assert_eq!(view.grade_buttons[4].tooltip, "CorrectSomeEffort");
    }

    #[test]
    fn test_card_present_only_while_showing_or_grading() {
        let scheduler = FakeScheduler {
            graded_card_leaves: true,
            ..due(card(1, None))
        };
        let mut controller = controller(1, scheduler);
        assert_card_matches_state(&controller);
        controller.request_new_question(false).unwrap();
        assert_card_matches_state(&controller);
        controller.reveal_answer().unwrap();
        assert_card_matches_state(&controller);
        controller.grade_answer(2).unwrap();
        assert_card_matches_state(&controller);
        controller.reveal_answer().unwrap();
        assert_card_matches_state(&controller);
        controller.refresh().unwrap();
        assert_card_matches_state(&controller);
    }
}
