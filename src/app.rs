//! Review window.
//! Binds the view state emitted by the review session to egui widgets and
//! turns clicks and key presses back into session calls.

use chrono::{DateTime, Local};
use eframe::egui;
use review_session::config::{ReviewConfig, ShowIntervals};
use review_session::session::{PresentationSurface, ReviewSessionController, ViewState};
use review_session::stopwatch::Stopwatch;
use review_session::text::TextKey;
use review_session::{Card, Database, Result, SessionState, Sm2Scheduler};
use std::time::SystemTime;

const GRADE_KEYS: [egui::Key; 6] = [
    egui::Key::Num0,
    egui::Key::Num1,
    egui::Key::Num2,
    egui::Key::Num3,
    egui::Key::Num4,
    egui::Key::Num5,
];

/// Formats SystemTime as YYYY-MM-DD string
fn format_system_time(time: SystemTime) -> String {
    let datetime: DateTime<Local> = time.into();
    datetime.format("%Y-%m-%d").to_string()
}

/// Keeps the most recent view emitted by the session.
#[derive(Default)]
pub struct LatestView {
    view: Option<ViewState>,
}

impl LatestView {
    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }
}

impl PresentationSurface for LatestView {
    fn show(&mut self, view: &ViewState) {
        self.view = Some(view.clone());
    }
}

type Controller = ReviewSessionController<Database, Sm2Scheduler, LatestView, Stopwatch>;

/// Things the user asked for while the frame was drawn; performed afterwards.
enum Action {
    ShowAnswer,
    Grade(u8),
    EditCurrentCard,
    SaveEdit,
    DeleteCurrentCard,
    OpenAddDialog,
    OpenDeck,
    DeleteCard(i64),
    AddCard,
    NextDay,
}

struct CardEditor {
    card_id: i64,
    question: String,
    answer: String,
}

#[derive(Default)]
struct NewCard {
    category: String,
    question: String,
    answer: String,
    answer_on_top: bool,
}

pub struct ReviewApp {
    controller: Controller,
    db: Database,
    applied_title: String,
    today: String,
    status_message: String,
    error_message: Option<String>,
    editor: Option<CardEditor>,
    deck_cards: Option<Vec<Card>>,
    show_add_dialog: bool,
    new_card: NewCard,
}

impl ReviewApp {
    /// Starts a session on `db` and selects the first question.
    pub fn new(db: Database, config: ReviewConfig) -> Result<Self> {
        let scheduler = Sm2Scheduler::new(db.clone());
        let mut controller = ReviewSessionController::new(
            db.clone(),
            scheduler,
            Stopwatch::new(),
            LatestView::default(),
            config,
        );
        controller.request_new_question(false)?;
        let today = format_system_time(db.current_date()?);
        Ok(Self {
            controller,
            db,
            applied_title: String::new(),
            today,
            status_message: String::new(),
            error_message: None,
            editor: None,
            deck_cards: None,
            show_add_dialog: false,
            new_card: NewCard::default(),
        })
    }

    fn perform(&mut self, action: Action) -> Result<()> {
        match action {
            Action::ShowAnswer => self.controller.reveal_answer()?,
            Action::Grade(grade) => {
                let interval = self.controller.grade_answer(grade.into())?;
                if self.controller.config().show_intervals == ShowIntervals::StatusBar {
                    self.status_message = format!(
                        "{} {interval}.",
                        self.controller.text().text(TextKey::ReturnsIn)
                    );
                }
            }
            Action::EditCurrentCard => {
                if let Some(card) = self.controller.current_card() {
                    self.editor = Some(CardEditor {
                        card_id: card.id,
                        question: card.question.clone(),
                        answer: card.answer.clone(),
                    });
                }
            }
            Action::SaveEdit => {
                if let Some(editor) = self.editor.take() {
                    self.db
                        .update_card_text(editor.card_id, &editor.question, &editor.answer)?;
                    if let Some(card) = self.db.card(editor.card_id)? {
                        self.controller.replace_current_card(card)?;
                    }
                }
            }
            Action::DeleteCurrentCard => {
                if let Some(card_id) = self.controller.current_card().map(|card| card.id) {
                    self.db.delete_card(card_id)?;
                    self.controller.request_new_question(false)?;
                }
            }
            Action::OpenAddDialog => {
                self.show_add_dialog = true;
            }
            Action::OpenDeck => {
                self.deck_cards = Some(self.db.all_cards()?);
            }
            Action::DeleteCard(card_id) => {
                self.db.delete_card(card_id)?;
                let was_current = self
                    .controller
                    .current_card()
                    .is_some_and(|card| card.id == card_id);
                if was_current {
                    self.controller.request_new_question(false)?;
                } else {
                    self.request_if_idle()?;
                }
                self.deck_cards = Some(self.db.all_cards()?);
            }
            Action::AddCard => {
                let new_card = &self.new_card;
                if new_card.question.trim().is_empty() || new_card.answer.trim().is_empty() {
                    return Ok(());
                }
                let category = match new_card.category.trim() {
                    "" => review_session::models::DEFAULT_CATEGORY,
                    category => category,
                };
                self.db.add_card(
                    category,
                    &new_card.question,
                    &new_card.answer,
                    new_card.answer_on_top,
                )?;
                self.new_card.question.clear();
                self.new_card.answer.clear();
                self.request_if_idle()?;
            }
            Action::NextDay => {
                self.db.advance_day()?;
                self.today = format_system_time(self.db.current_date()?);
                self.request_if_idle()?;
            }
        }
        Ok(())
    }

    /// Asks for a question when the session is not showing a card, so newly
    /// added or newly due cards are picked up.
    fn request_if_idle(&mut self) -> Result<()> {
        match self.controller.state() {
            SessionState::Empty | SessionState::AwaitingAhead => {
                self.controller.request_new_question(false)
            }
            SessionState::AwaitingShow | SessionState::AwaitingGrade => self.controller.refresh(),
        }
    }

    fn render_menu(&self, ctx: &egui::Context, view: &ViewState, action: &mut Option<Action>) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Edit", |ui| {
                    if ui
                        .add_enabled(
                            view.edit_current_card_enabled,
                            egui::Button::new("Edit current card..."),
                        )
                        .clicked()
                    {
                        *action = Some(Action::EditCurrentCard);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(
                            view.delete_current_card_enabled,
                            egui::Button::new("Delete current card"),
                        )
                        .clicked()
                    {
                        *action = Some(Action::DeleteCurrentCard);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Add cards...").clicked() {
                        *action = Some(Action::OpenAddDialog);
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(view.edit_deck_enabled, egui::Button::new("Edit deck..."))
                        .clicked()
                    {
                        *action = Some(Action::OpenDeck);
                        ui.close_menu();
                    }
                });
                ui.menu_button("Schedule", |ui| {
                    if ui.button("Next day").clicked() {
                        *action = Some(Action::NextDay);
                        ui.close_menu();
                    }
                });
            });
        });
    }

    fn render_review(&self, ctx: &egui::Context, view: &ViewState, action: &mut Option<Action>) {
        egui::CentralPanel::default().show(ctx, |ui| {
            if view.question_visible {
                ui.label(view.question_label.as_str());
                ui.group(|ui| {
                    ui.set_min_height(120.0);
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.heading(view.question.as_str());
                    });
                });
                ui.add_space(10.0);
            }

            if view.answer_visible {
                ui.label(view.answer_label.as_str());
                ui.group(|ui| {
                    ui.set_min_height(120.0);
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.heading(view.answer.as_str());
                    });
                });
                ui.add_space(10.0);
            }

            let show = &view.show_button;
            let mut caption = egui::RichText::new(&show.caption);
            if show.is_default {
                caption = caption.strong();
            }
            if ui
                .add_enabled(show.enabled, egui::Button::new(caption))
                .clicked()
            {
                *action = Some(Action::ShowAnswer);
            }

            ui.add_space(20.0);
            ui.label(view.grades_title.as_str());
            ui.horizontal(|ui| {
                for button in &view.grade_buttons {
                    let mut caption = egui::RichText::new(&button.caption);
                    if button.is_default {
                        caption = caption.strong();
                    }
                    let response = ui
                        .add_enabled(view.grades_enabled, egui::Button::new(caption))
                        .on_hover_text(button.tooltip.as_str())
                        .on_disabled_hover_text(button.tooltip.as_str());
                    if response.clicked() {
                        *action = Some(Action::Grade(button.grade.value()));
                    }
                }
            });
        });
    }

    fn handle_keys(&self, ctx: &egui::Context, view: &ViewState, action: &mut Option<Action>) {
        if ctx.wants_keyboard_input() || self.editor.is_some() || self.show_add_dialog {
            return;
        }
        let show = &view.show_button;
        if show.enabled
            && show.is_default
            && ctx.input(|i| i.key_pressed(egui::Key::Space) || i.key_pressed(egui::Key::Enter))
        {
            *action = Some(Action::ShowAnswer);
            return;
        }
        if view.grades_enabled {
            for (grade, key) in GRADE_KEYS.iter().enumerate() {
                if ctx.input(|i| i.key_pressed(*key)) {
                    *action = Some(Action::Grade(grade as u8));
                    return;
                }
            }
            if let Some(grade) = view.default_grade {
                if ctx.input(|i| i.key_pressed(egui::Key::Enter)) {
                    *action = Some(Action::Grade(grade.value()));
                }
            }
        }
    }

    fn render_dialogs(&mut self, ctx: &egui::Context, action: &mut Option<Action>) {
        if let Some(editor) = &mut self.editor {
            let mut cancel = false;
            egui::Window::new("Edit current card")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label("Question:");
                    ui.text_edit_multiline(&mut editor.question);
                    ui.label("Answer:");
                    ui.text_edit_multiline(&mut editor.answer);
                    ui.horizontal(|ui| {
                        if ui.button("Save").clicked() {
                            *action = Some(Action::SaveEdit);
                        }
                        if ui.button("Cancel").clicked() {
                            cancel = true;
                        }
                    });
                });
            if cancel {
                self.editor = None;
            }
        }

        if self.show_add_dialog {
            let new_card = &mut self.new_card;
            let mut close = false;
            egui::Window::new("Add cards")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Category:");
                        ui.text_edit_singleline(&mut new_card.category);
                    });
                    ui.label("Question:");
                    ui.text_edit_multiline(&mut new_card.question);
                    ui.label("Answer:");
                    ui.text_edit_multiline(&mut new_card.answer);
                    ui.checkbox(&mut new_card.answer_on_top, "Show answer on top of question");
                    ui.horizontal(|ui| {
                        if ui.button("Add card").clicked() {
                            *action = Some(Action::AddCard);
                        }
                        if ui.button("Close").clicked() {
                            close = true;
                        }
                    });
                });
            if close {
                self.show_add_dialog = false;
            }
        }

        if let Some(cards) = &self.deck_cards {
            let mut close = false;
            egui::Window::new(format!("Edit deck ({} cards)", cards.len()))
                .collapsible(false)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical()
                        .max_height(300.0)
                        .show(ui, |ui| {
                            for card in cards {
                                ui.horizontal(|ui| {
                                    if ui.button("Delete").clicked() {
                                        *action = Some(Action::DeleteCard(card.id));
                                    }
                                    ui.label(format!(
                                        "[{}] {} / {}",
                                        card.category, card.question, card.answer
                                    ));
                                });
                            }
                        });
                    ui.separator();
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            if close {
                self.deck_cards = None;
            }
        }

        if let Some(message) = &self.error_message {
            let mut dismissed = false;
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message.as_str());
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            if dismissed {
                self.error_message = None;
            }
        }
    }
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Some(view) = self.controller.surface().view().cloned() else {
            return;
        };

        if view.title != self.applied_title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(view.title.clone()));
            self.applied_title = view.title.clone();
        }

        // We store actions to execute after UI rendering to avoid borrowing conflicts
        let mut action: Option<Action> = None;

        self.render_menu(ctx, &view, &mut action);
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let today_label = self.controller.text().text(TextKey::Today);
                ui.label(format!("{today_label} {}", self.today));
                ui.separator();
                ui.label(self.status_message.as_str());
            });
        });
        self.render_review(ctx, &view, &mut action);
        self.handle_keys(ctx, &view, &mut action);
        self.render_dialogs(ctx, &mut action);

        if let Some(action) = action {
            if let Err(e) = self.perform(action) {
                log::error!("error: {e}");
                self.error_message = Some(e.to_string());
            }
        }
    }
}
