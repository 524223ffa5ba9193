//! Central application state for mindcheck.
//!
//! `AppState` owns every piece of session state: the active view, survey
//! answers and cursor, submission status, the prediction, and the chat
//! session. It is the view controller: transitions happen only through its
//! methods, which the keybinding dispatcher and the main loop call. No
//! rendering lives here and nothing here touches the network. Methods that
//! need a round trip return the request for the caller to hand to a worker.

use mindcheck_core::{catalog, ChatRequest, ChatSession, RiskClass, SurveyError, SurveyResponse, CATALOG};
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tracing::{debug, info, warn};

use crate::worker::{ChatReply, PredictionOutcome, SubmitRequest};

/// The four mutually exclusive screens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum View {
    #[default]
    Home,
    Survey,
    Results,
    Chat,
}

impl View {
    pub fn label(self) -> &'static str {
        match self {
            View::Home => "HOME",
            View::Survey => "SURVEY",
            View::Results => "RESULTS",
            View::Chat => "CHAT",
        }
    }
}

/// Input mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Single-key navigation.
    #[default]
    Normal,
    /// Typing into the chat input line.
    Insert,
    /// Help overlay shown above the current view.
    HelpOverlay,
}

/// The two entry cards on the home view.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HomeCard {
    #[default]
    Survey,
    Chat,
}

impl HomeCard {
    pub fn toggle(self) -> Self {
        match self {
            HomeCard::Survey => HomeCard::Chat,
            HomeCard::Chat => HomeCard::Survey,
        }
    }

    pub fn target(self) -> View {
        match self {
            HomeCard::Survey => View::Survey,
            HomeCard::Chat => View::Chat,
        }
    }
}

/// Where the last survey submission stands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Waiting for `/predict_mood`.
    Pending,
    /// The last attempt failed; the text is shown with a retry hint.
    Failed(String),
}

pub struct AppState {
    view: View,
    pub mode: Mode,
    pub home_card: HomeCard,

    pub survey: SurveyResponse,
    /// Catalog index of the highlighted question.
    pub question_cursor: usize,
    /// Backs the survey question list; kept in sync with `question_cursor`.
    pub survey_list_state: ListState,
    pub submission: SubmissionStatus,
    /// Validation message shown above the survey (e.g. unanswered questions).
    pub survey_notice: Option<String>,
    /// Bumped by `retake()`; stale prediction results are ignored.
    pub generation: u64,

    pub prediction: Option<RiskClass>,

    pub chat: ChatSession,
    pub chat_input: String,
    /// Lines scrolled up from the bottom of the transcript; 0 follows new turns.
    pub chat_scroll: usize,
    /// Transcript viewport height, cached after each render.
    pub chat_viewport_height: u16,

    pub help_scroll: u16,
    /// Advanced on every tick; indexes the spinner frames.
    pub spinner_frame: usize,
    /// Screen areas of the home cards from the last render, for mouse hits.
    pub home_card_rects: [Rect; 2],
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::default(),
            mode: Mode::default(),
            home_card: HomeCard::default(),
            survey: SurveyResponse::new(),
            question_cursor: 0,
            survey_list_state: ListState::default().with_selected(Some(0)),
            submission: SubmissionStatus::default(),
            survey_notice: None,
            generation: 0,
            prediction: None,
            chat: ChatSession::new(),
            chat_input: String::new(),
            chat_scroll: 0,
            chat_viewport_height: 0,
            help_scroll: 0,
            spinner_frame: 0,
            home_card_rects: [Rect::default(); 2],
        }
    }
}

impl AppState {
    pub fn current_view(&self) -> View {
        self.view
    }

    /// Switches to `view`. The chat view opens with the input focused.
    pub fn navigate_to(&mut self, view: View) {
        if self.view != view {
            info!(from = ?self.view, to = ?view, "navigate");
        }
        self.view = view;
        self.mode = if view == View::Chat { Mode::Insert } else { Mode::Normal };
        if view == View::Chat {
            self.chat_scroll = 0;
        }
    }

    /// Clears answers, prediction, and transcript, then opens the survey.
    ///
    /// In-flight submissions and chat replies from before the call are
    /// ignored when they arrive. The caller is responsible for asking the chat
    /// service to drop its own history.
    pub fn retake(&mut self) {
        info!("retake survey");
        self.survey.clear();
        self.prediction = None;
        self.submission = SubmissionStatus::Idle;
        self.survey_notice = None;
        self.generation = self.generation.wrapping_add(1);
        self.chat.reset();
        self.chat_input.clear();
        self.chat_scroll = 0;
        self.set_question_cursor(0);
        self.navigate_to(View::Survey);
    }

    /// `true` while a submission or chat reply is outstanding.
    pub fn is_busy(&self) -> bool {
        self.submission == SubmissionStatus::Pending || self.chat.awaiting_replies() > 0
    }

    pub fn tick(&mut self) {
        if self.is_busy() {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }

    // -----------------------------------------------------------------------
    // Survey
    // -----------------------------------------------------------------------

    pub fn set_question_cursor(&mut self, index: usize) {
        self.question_cursor = index.min(CATALOG.len() - 1);
        self.survey_list_state.select(Some(self.question_cursor));
    }

    pub fn next_question(&mut self) {
        self.set_question_cursor(self.question_cursor + 1);
    }

    pub fn prev_question(&mut self) {
        self.set_question_cursor(self.question_cursor.saturating_sub(1));
    }

    /// Selects option `option` of the highlighted question.
    pub fn choose_option(&mut self, option: usize) {
        if self.survey.select_option(self.question_cursor, option) {
            self.survey_notice = None;
        }
    }

    /// Moves the highlighted question's answer one option to the right.
    /// With no answer yet, picks the first option.
    pub fn next_option(&mut self) {
        let count = CATALOG[self.question_cursor].options.len();
        let next = match self.survey.selected(self.question_cursor) {
            Some(o) => (o + 1).min(count - 1),
            None => 0,
        };
        self.choose_option(next);
    }

    /// Moves the highlighted question's answer one option to the left.
    pub fn prev_option(&mut self) {
        let prev = self.survey.selected(self.question_cursor).map_or(0, |o| o.saturating_sub(1));
        self.choose_option(prev);
    }

    /// Starts a submission if the form is complete and none is pending.
    ///
    /// An incomplete form is refused: a notice names how many questions are
    /// left and the cursor jumps to the first of them.
    pub fn begin_submission(&mut self) -> Option<SubmitRequest> {
        if self.submission == SubmissionStatus::Pending {
            return None;
        }
        match self.survey.submission() {
            Ok(submission) => {
                self.submission = SubmissionStatus::Pending;
                self.survey_notice = None;
                Some(SubmitRequest { generation: self.generation, submission })
            }
            Err(SurveyError::Incomplete { missing }) => {
                let numbers: Vec<String> = missing
                    .iter()
                    .filter_map(|key| catalog::position(key))
                    .map(|i| (i + 1).to_string())
                    .collect();
                self.survey_notice = Some(format!(
                    "Please answer every question before submitting ({} left: {}).",
                    missing.len(),
                    numbers.join(", ")
                ));
                if let Some(first) = self.survey.first_missing() {
                    self.set_question_cursor(first);
                }
                None
            }
            Err(e) => {
                self.survey_notice = Some(e.to_string());
                None
            }
        }
    }

    /// Applies a finished `/predict_mood` round trip.
    ///
    /// Success moves Survey to Results. Failure keeps the survey open with a
    /// visible error. Outcomes for an older generation, or arriving after the
    /// user left the survey, are dropped.
    pub fn apply_prediction(&mut self, outcome: PredictionOutcome) {
        if outcome.generation != self.generation || self.submission != SubmissionStatus::Pending {
            debug!(generation = outcome.generation, "dropping stale prediction");
            return;
        }
        if self.view != View::Survey {
            debug!(view = ?self.view, "user left the survey, dropping prediction");
            self.submission = SubmissionStatus::Idle;
            return;
        }
        match outcome.result {
            Ok(class) => {
                info!(class = class as u8, "prediction received");
                self.submission = SubmissionStatus::Idle;
                self.prediction = Some(class);
                self.navigate_to(View::Results);
            }
            Err(e) => {
                warn!(error = %e, "survey submission failed");
                self.submission = SubmissionStatus::Failed(e.to_string());
            }
        }
    }

    // -----------------------------------------------------------------------
    // Chat
    // -----------------------------------------------------------------------

    /// Sends the input line. Blank input is left untouched and sends nothing.
    pub fn send_chat(&mut self) -> Option<ChatRequest> {
        let request = self.chat.send(&self.chat_input)?;
        self.chat_input.clear();
        self.chat_scroll = 0;
        Some(request)
    }

    pub fn apply_chat_reply(&mut self, reply: ChatReply) {
        if self.chat.receive(reply.generation, reply.result) {
            self.chat_scroll = 0;
        }
    }

    pub fn scroll_chat_up(&mut self, lines: usize) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines);
    }

    pub fn scroll_chat_down(&mut self, lines: usize) {
        self.chat_scroll = self.chat_scroll.saturating_sub(lines);
    }

    pub fn chat_page(&self) -> usize {
        usize::from(self.chat_viewport_height).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindcheck_core::{ServiceError, Turn};

    fn answer_everything(state: &mut AppState) {
        for i in 0..CATALOG.len() {
            state.set_question_cursor(i);
            state.choose_option(0);
        }
    }

    fn submitted_state() -> (AppState, SubmitRequest) {
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        answer_everything(&mut state);
        let request = state.begin_submission().expect("complete form submits");
        (state, request)
    }

    #[test]
    fn starts_at_home() {
        let state = AppState::default();
        assert_eq!(state.current_view(), View::Home);
        assert_eq!(state.mode, Mode::Normal);
    }

    #[test]
    fn any_view_is_reachable() {
        let mut state = AppState::default();
        for view in [View::Results, View::Chat, View::Home, View::Survey, View::Chat] {
            state.navigate_to(view);
            assert_eq!(state.current_view(), view);
        }
        assert_eq!(state.mode, Mode::Insert, "chat opens with the input focused");
    }

    #[test]
    fn incomplete_survey_cannot_be_submitted() {
        let mut state = AppState::default();
        state.navigate_to(View::Survey);
        answer_everything(&mut state);
        state.survey = SurveyResponse::new();
        state.set_question_cursor(0);
        state.choose_option(1);
        state.set_question_cursor(8);

        assert!(state.begin_submission().is_none());
        assert_eq!(state.submission, SubmissionStatus::Idle);
        assert_eq!(state.question_cursor, 1, "cursor jumps to first unanswered question");
        let notice = state.survey_notice.as_deref().unwrap();
        assert!(notice.contains("12 left: 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13"), "{notice}");
    }

    #[test]
    fn submission_carries_every_catalog_key() {
        let (state, request) = submitted_state();
        assert_eq!(request.submission.len(), CATALOG.len());
        assert_eq!(request.generation, state.generation);
        assert_eq!(state.submission, SubmissionStatus::Pending);
    }

    #[test]
    fn pending_submission_blocks_resubmit() {
        let (mut state, _) = submitted_state();
        assert!(state.begin_submission().is_none());
    }

    #[test]
    fn high_risk_prediction_opens_results() {
        let (mut state, request) = submitted_state();
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Ok(RiskClass::High),
        });
        assert_eq!(state.current_view(), View::Results);
        assert_eq!(state.prediction, Some(RiskClass::High));
        assert_eq!(state.submission, SubmissionStatus::Idle);
    }

    #[test]
    fn failed_prediction_stays_on_survey_with_error() {
        let (mut state, request) = submitted_state();
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Err(ServiceError::Status { status: 500, message: "model offline".into() }),
        });
        assert_eq!(state.current_view(), View::Survey);
        match &state.submission {
            SubmissionStatus::Failed(msg) => assert!(msg.contains("model offline")),
            other => panic!("expected Failed, got {other:?}"),
        }
        // Retry is allowed after a failure.
        assert!(state.begin_submission().is_some());
    }

    #[test]
    fn prediction_after_leaving_survey_is_dropped() {
        let (mut state, request) = submitted_state();
        state.navigate_to(View::Home);
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Ok(RiskClass::Low),
        });
        assert_eq!(state.current_view(), View::Home);
        assert_eq!(state.prediction, None);
        assert_eq!(state.submission, SubmissionStatus::Idle);
    }

    #[test]
    fn prediction_from_before_retake_is_dropped() {
        let (mut state, request) = submitted_state();
        state.retake();
        answer_everything(&mut state);
        let _ = state.begin_submission().unwrap();
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Ok(RiskClass::Low),
        });
        assert_eq!(state.current_view(), View::Survey);
        assert_eq!(state.submission, SubmissionStatus::Pending);
    }

    #[test]
    fn option_cycling_clamps_at_edges() {
        let mut state = AppState::default();
        state.set_question_cursor(0); // Gender: Female, Male
        state.prev_option();
        assert_eq!(state.survey.selected(0), Some(0));
        state.next_option();
        state.next_option();
        assert_eq!(state.survey.selected(0), Some(1));
    }

    #[test]
    fn question_cursor_is_clamped() {
        let mut state = AppState::default();
        state.prev_question();
        assert_eq!(state.question_cursor, 0);
        state.set_question_cursor(99);
        assert_eq!(state.question_cursor, CATALOG.len() - 1);
        assert_eq!(state.survey_list_state.selected(), Some(CATALOG.len() - 1));
    }

    #[test]
    fn blank_chat_input_sends_nothing() {
        let mut state = AppState::default();
        state.chat_input = "   ".into();
        assert!(state.send_chat().is_none());
        assert!(state.chat.is_empty());
        assert_eq!(state.chat_input, "   ");
    }

    #[test]
    fn chat_round_trip_appends_two_turns() {
        let mut state = AppState::default();
        state.navigate_to(View::Chat);
        state.chat_input = "hello".into();
        let request = state.send_chat().unwrap();
        assert!(state.chat_input.is_empty());
        assert!(state.is_busy());
        state.apply_chat_reply(ChatReply {
            generation: request.generation,
            result: Err(ServiceError::Decode("eof".into())),
        });
        assert_eq!(
            state.chat.turns(),
            &[Turn::user("hello"), Turn::assistant("Error: Could not get a response.")]
        );
        assert!(!state.is_busy());
    }

    #[test]
    fn retake_clears_everything() {
        let (mut state, request) = submitted_state();
        state.apply_prediction(PredictionOutcome {
            generation: request.generation,
            result: Ok(RiskClass::Moderate),
        });
        state.navigate_to(View::Chat);
        state.chat_input = "hi".into();
        let _ = state.send_chat();

        state.retake();
        assert_eq!(state.current_view(), View::Survey);
        assert_eq!(state.survey.answered_count(), 0);
        assert_eq!(state.prediction, None);
        assert!(state.chat.is_empty());
        assert_eq!(state.question_cursor, 0);
        assert_eq!(state.mode, Mode::Normal);
    }
}
