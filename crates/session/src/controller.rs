//! Session turn controller.
//!
//! Runs one conversational turn at a time:
//! ```text
//! User turn → Oracle → Track progress → Select dimension → Reply → Completion check
//! ```
//! An oracle failure never breaks the session. The turn still completes
//! with a neutral reply and progress is left exactly as it was.

use std::sync::Arc;
use std::time::Duration;

use memini_core::{
    ChatTurn, Dimension, EmotionSignal, ImagePayload, OracleResponse, SessionProgress,
    SessionSummary, Topic,
};
use memini_oracle::{Oracle, OracleRequest};
use memini_progress::{select_active, BasicProgressTracker, ProgressSnapshot, ProgressTracker};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::completion::CompletionPolicy;
use crate::config::SessionConfig;
use crate::context::{SessionContext, SessionState};

/// Text sent to the oracle for a photo with no caption.
const PHOTO_PLACEHOLDER: &str = "(User sent a photo)";

/// Opening text stored for a photo-only session start.
const PHOTO_OPENING: &str = "I'd like to talk about this photo.";

/// Errors from misuse of the controller. Oracle failures are never errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// The session is in its terminal state
    #[error("Session has ended and accepts no more turns")]
    SessionEnded,

    /// Nothing to send
    #[error("Turn has neither text nor image")]
    EmptyInput,
}

/// What the user submits for one turn.
#[derive(Debug, Clone, Default)]
pub struct TurnInput {
    /// Typed text, may be empty when a photo is attached
    pub text: String,
    /// Attached photo
    pub image: Option<ImagePayload>,
}

impl TurnInput {
    /// A text-only turn.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            image: None,
        }
    }

    /// Attach a photo.
    pub fn with_image(mut self, image: ImagePayload) -> Self {
        self.image = Some(image);
        self
    }

    fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.image.is_none()
    }

    fn into_turn(self) -> ChatTurn {
        let turn = ChatTurn::user(self.text);
        match self.image {
            Some(image) => turn.with_image(image),
            None => turn,
        }
    }
}

/// Result of one submitted turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Reply appended to the transcript
    pub reply: String,

    /// Full transcript after the turn
    pub transcript: Vec<ChatTurn>,

    /// Progress after the turn
    pub progress: SessionProgress,

    /// Dimension to focus on next
    pub active_dimension: Dimension,

    /// Whether this turn ended the session
    pub is_session_complete: bool,

    /// How long the caller should show the final reply before leaving
    pub end_after: Option<Duration>,

    /// Whether the oracle failed and the fallback was used
    pub oracle_failed: bool,

    /// Emotion reading for this turn
    pub emotion: EmotionSignal,
}

/// Drives a single session from first turn to summary.
pub struct SessionController {
    context: SessionContext,
    oracle: Arc<dyn Oracle>,
    tracker: Box<dyn ProgressTracker>,
    completion: Box<dyn CompletionPolicy>,
    config: SessionConfig,
}

impl SessionController {
    /// Create a controller for a new, empty session.
    pub fn new(topic: Topic, oracle: Arc<dyn Oracle>) -> Self {
        let config = SessionConfig::default();
        Self {
            context: SessionContext::new(topic),
            oracle,
            tracker: Box::new(BasicProgressTracker::with_policy(config.coverage_policy)),
            completion: config.completion.build(),
            config,
        }
    }

    /// Start a session from a free-form opening message or photo.
    ///
    /// The oracle picks the topic; if it cannot, the session falls back to
    /// general reminiscence. The opening becomes the first user turn.
    pub async fn from_opening(
        oracle: Arc<dyn Oracle>,
        opening: TurnInput,
    ) -> Result<Self, SessionError> {
        if opening.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let topic = match oracle.detect_topic(&opening.text, opening.image.as_ref()).await {
            Ok(topic) => topic,
            Err(e) => {
                warn!("Topic detection failed, using general reminiscence: {}", e);
                Topic::Other
            }
        };
        info!("Opening session on topic: {}", topic);

        let mut opening = opening;
        if opening.text.trim().is_empty() {
            opening.text = PHOTO_OPENING.to_string();
        }

        let mut controller = Self::new(topic, oracle);
        controller.context.push_turn(opening.into_turn());
        Ok(controller)
    }

    /// Set the configuration. Rebuilds the tracker and completion policy.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.tracker = Box::new(BasicProgressTracker::with_policy(config.coverage_policy));
        self.completion = config.completion.build();
        self.config = config;
        self
    }

    /// Replace the progress tracker.
    pub fn with_tracker(mut self, tracker: Box<dyn ProgressTracker>) -> Self {
        self.tracker = tracker;
        self
    }

    /// Replace the completion policy.
    pub fn with_completion_policy(mut self, completion: Box<dyn CompletionPolicy>) -> Self {
        self.completion = completion;
        self
    }

    /// Add the companion's greeting if nothing has been said yet.
    pub fn greet(&mut self) {
        if self.context.transcript().is_empty() {
            let greeting = format!(
                "Hello. I'm ready to listen. To start our journey into \"{}\", is there a specific person or moment coming to mind?",
                self.context.topic
            );
            self.context.push_turn(ChatTurn::assistant(greeting));
        }
    }

    /// Run one turn.
    pub async fn submit_turn(&mut self, input: TurnInput) -> Result<TurnOutcome, SessionError> {
        if !self.context.is_active() {
            return Err(SessionError::SessionEnded);
        }
        if input.is_empty() {
            return Err(SessionError::EmptyInput);
        }

        let history_len = self.context.transcript().len();
        self.context.push_turn(input.into_turn());

        let (response, oracle_failed) = {
            let history = &self.context.transcript()[..history_len];
            let user_turn = &self.context.transcript()[history_len];
            let user_text = if user_turn.text.trim().is_empty() {
                PHOTO_PLACEHOLDER
            } else {
                user_turn.text.as_str()
            };

            let request = OracleRequest {
                history,
                topic: self.context.topic,
                user_text,
                image: user_turn.image.as_ref(),
            };

            match self.oracle.submit_turn(request).await {
                Ok(response) => (response, false),
                Err(e) => {
                    warn!("Oracle call failed, continuing with fallback reply: {}", e);
                    let mut fallback = OracleResponse::fallback();
                    fallback.reply = self.config.fallback_reply.clone();
                    (fallback, true)
                }
            }
        };

        if !oracle_failed {
            let progress = self
                .tracker
                .apply_judgment(self.context.progress(), &response.judgment);
            self.context.set_progress(progress);
        }

        let active_dimension = select_active(self.context.progress());
        debug!("Active dimension: {}", active_dimension);

        self.context.push_turn(ChatTurn::assistant(response.reply.clone()));

        let is_session_complete = !oracle_failed
            && self
                .completion
                .should_end(&response.judgment, self.context.progress());

        let end_after = if is_session_complete {
            self.context.end();
            info!(
                "Session {} complete after {} turns",
                self.context.id,
                self.context.transcript().len()
            );
            Some(self.config.end_delay())
        } else {
            None
        };

        Ok(TurnOutcome {
            reply: response.reply,
            transcript: self.context.transcript().to_vec(),
            progress: self.context.progress().clone(),
            active_dimension,
            is_session_complete,
            end_after,
            oracle_failed,
            emotion: response.judgment.emotion,
        })
    }

    /// End the session at the user's request. Returns `false` if it had already ended.
    pub fn finish(&mut self) -> bool {
        let ended = self.context.end();
        if ended {
            info!("Session {} finished by user", self.context.id);
        }
        ended
    }

    /// Ask the oracle for the closing summary, falling back to a warm default.
    pub async fn summarize(&self) -> SessionSummary {
        match self.oracle.summarize_session(self.context.transcript()).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Session summary failed, using default: {}", e);
                SessionSummary::fallback()
            }
        }
    }

    /// Read-only progress view for rendering.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::capture(self.context.progress())
    }

    /// Current dimension to focus on.
    pub fn active_dimension(&self) -> Dimension {
        select_active(self.context.progress())
    }

    /// Lifecycle state.
    pub fn state(&self) -> SessionState {
        self.context.state()
    }

    /// The session context.
    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    /// The transcript so far.
    pub fn transcript(&self) -> &[ChatTurn] {
        self.context.transcript()
    }

    /// The configuration in use.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::Corroborated;
    use crate::config::CompletionRule;
    use memini_core::{ordered_dimensions, OracleJudgment, Role, TOTAL_MILESTONES};
    use memini_oracle::{ScriptedOracle, ScriptedReply};
    use memini_progress::CoveragePolicy;
    use serde_json::json;

    fn controller(replies: Vec<ScriptedReply>) -> (SessionController, Arc<ScriptedOracle>) {
        let oracle = Arc::new(ScriptedOracle::new(replies));
        let controller = SessionController::new(Topic::Childhood, oracle.clone());
        (controller, oracle)
    }

    fn reply(text: &str, judgment: OracleJudgment) -> ScriptedReply {
        ScriptedReply::Response(OracleResponse::new(text, judgment))
    }

    #[tokio::test]
    async fn test_first_turn_covers_who() {
        let (mut session, _) = controller(vec![reply(
            "What happened that day?",
            OracleJudgment::empty()
                .with_dimensions([Dimension::Who])
                .with_milestones(["Identity"]),
        )]);

        let outcome = session.submit_turn(TurnInput::text("My grandmother")).await.unwrap();

        assert_eq!(outcome.active_dimension, Dimension::What);
        assert!((session.snapshot().ratio - 1.0 / TOTAL_MILESTONES as f32).abs() < 1e-6);
        assert!(!outcome.is_session_complete);
        assert_eq!(outcome.end_after, None);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_turns_are_appended_in_order() {
        let (mut session, oracle) = controller(vec![reply("Who else?", OracleJudgment::empty())]);
        session.greet();

        let outcome = session.submit_turn(TurnInput::text("The beach")).await.unwrap();

        let roles: Vec<_> = outcome.transcript.iter().map(|t| t.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(outcome.transcript[1].text, "The beach");
        assert_eq!(outcome.transcript[2].text, "Who else?");

        // The oracle sees history without the new turn
        let requests = oracle.requests().await;
        assert_eq!(requests[0].history_len, 1);
        assert_eq!(requests[0].user_text, "The beach");
        assert_eq!(requests[0].topic, Topic::Childhood);
    }

    #[tokio::test]
    async fn test_oracle_failure_falls_back() {
        let (mut session, _) = controller(vec![
            reply(
                "Tell me more.",
                OracleJudgment::empty()
                    .with_dimensions([Dimension::Who, Dimension::What])
                    .with_milestones(["Identity", "Event"]),
            ),
            ScriptedReply::Fail("connection reset".to_string()),
        ]);

        let first = session.submit_turn(TurnInput::text("My brother")).await.unwrap();
        let before = first.progress.clone();

        let outcome = session.submit_turn(TurnInput::text("We went fishing")).await.unwrap();

        assert_eq!(outcome.reply, "I'm listening, please go on.");
        assert!(outcome.oracle_failed);
        assert!(!outcome.is_session_complete);
        assert_eq!(outcome.progress, before);
        assert_eq!(outcome.transcript.len(), 4);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_unparseable_and_exhausted_oracle_fall_back() {
        let (mut session, _) = controller(vec![ScriptedReply::Text("<html>502</html>".to_string())]);

        let parse_failure = session.submit_turn(TurnInput::text("Hello")).await.unwrap();
        assert!(parse_failure.oracle_failed);

        let exhausted = session.submit_turn(TurnInput::text("Still there?")).await.unwrap();
        assert!(exhausted.oracle_failed);
        assert_eq!(exhausted.reply, "I'm listening, please go on.");
        assert!(exhausted.progress.covered_milestones().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_fields_default() {
        let (mut session, _) = controller(vec![ScriptedReply::Json(json!({
            "coveredDimensions": "who",
            "coveredMilestones": ["Identity"],
            "isSessionComplete": "maybe"
        }))]);

        let outcome = session.submit_turn(TurnInput::text("My aunt")).await.unwrap();

        assert!(!outcome.oracle_failed);
        assert_eq!(outcome.reply, "I'm listening, please go on.");
        assert!(outcome.progress.covered_dimensions().is_empty());
        assert!(outcome.progress.is_milestone_covered("Identity"));
        assert!(!outcome.is_session_complete);
    }

    #[tokio::test]
    async fn test_completion_ends_session_after_final_reply() {
        let five = ordered_dimensions()[..5].to_vec();
        let (mut session, _) = controller(vec![reply(
            "Thank you for this beautiful memory.",
            OracleJudgment::empty().with_dimensions(five).completed(true),
        )]);

        let outcome = session.submit_turn(TurnInput::text("That's all, bye")).await.unwrap();

        assert!(outcome.is_session_complete);
        assert_eq!(outcome.end_after, Some(Duration::from_millis(2500)));
        assert_eq!(
            outcome.transcript.last().map(|t| t.text.as_str()),
            Some("Thank you for this beautiful memory.")
        );
        assert_eq!(session.state(), SessionState::Ended);

        let err = session.submit_turn(TurnInput::text("wait")).await.unwrap_err();
        assert_eq!(err, SessionError::SessionEnded);
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_corroborated_policy_blocks_early_end() {
        let oracle = Arc::new(ScriptedOracle::new(vec![reply(
            "Goodbye?",
            OracleJudgment::empty().with_dimensions([Dimension::Who]).completed(true),
        )]));
        let mut session = SessionController::new(Topic::Work, oracle)
            .with_completion_policy(Box::new(Corroborated::default()));

        let outcome = session.submit_turn(TurnInput::text("My first job")).await.unwrap();
        assert!(!outcome.is_session_complete);
        assert_eq!(session.state(), SessionState::Active);
    }

    #[tokio::test]
    async fn test_config_selects_merge_and_corroboration() {
        let oracle = Arc::new(ScriptedOracle::new(vec![
            reply("a", OracleJudgment::empty().with_dimensions([Dimension::Who])),
            reply("b", OracleJudgment::empty().with_dimensions([Dimension::What]).completed(true)),
        ]));
        let config = SessionConfig {
            coverage_policy: CoveragePolicy::Merge,
            completion: CompletionRule::Corroborated { min_dimensions: 2 },
            ..SessionConfig::default()
        };
        let mut session = SessionController::new(Topic::Travel, oracle).with_config(config);

        session.submit_turn(TurnInput::text("Paris")).await.unwrap();
        let outcome = session.submit_turn(TurnInput::text("The tower")).await.unwrap();

        assert_eq!(outcome.progress.covered_dimensions().len(), 2);
        assert!(outcome.is_session_complete);
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let (mut session, oracle) = controller(vec![]);
        let err = session.submit_turn(TurnInput::text("   ")).await.unwrap_err();
        assert_eq!(err, SessionError::EmptyInput);
        assert!(session.transcript().is_empty());
        assert!(oracle.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_photo_only_turn_uses_placeholder() {
        let (mut session, oracle) = controller(vec![reply("Who is in the photo?", OracleJudgment::empty())]);

        session
            .submit_turn(TurnInput::default().with_image(ImagePayload::new("data:image/png;base64,AAAA")))
            .await
            .unwrap();

        let requests = oracle.requests().await;
        assert_eq!(requests[0].user_text, "(User sent a photo)");
        assert!(requests[0].has_image);
        assert_eq!(
            session.transcript()[0].image.as_ref().map(|i| i.as_base64()),
            Some("AAAA")
        );
    }

    #[tokio::test]
    async fn test_from_opening_detects_topic() {
        let oracle = Arc::new(ScriptedOracle::new(vec![]).with_topic(Topic::Hobbies));
        let session = SessionController::from_opening(oracle, TurnInput::text("I used to paint"))
            .await
            .unwrap();

        assert_eq!(session.context().topic, Topic::Hobbies);
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_from_opening_falls_back_to_general_topic() {
        let oracle = Arc::new(ScriptedOracle::new(vec![]));
        let session = SessionController::from_opening(
            oracle,
            TurnInput::default().with_image(ImagePayload::new("AAAA")),
        )
        .await
        .unwrap();

        assert_eq!(session.context().topic, Topic::Other);
        assert_eq!(session.transcript()[0].text, "I'd like to talk about this photo.");
    }

    #[tokio::test]
    async fn test_greet_only_on_empty_transcript() {
        let (mut session, _) = controller(vec![]);
        session.greet();
        session.greet();
        assert_eq!(session.transcript().len(), 1);
        assert!(session.transcript()[0].text.contains("Childhood & Growing Up"));
    }

    #[tokio::test]
    async fn test_finish_and_summary() {
        let oracle = Arc::new(
            ScriptedOracle::new(vec![]).with_summary(json!({ "label": 7, "feedback": "Such fun." })),
        );
        let mut session = SessionController::new(Topic::Light, oracle);

        assert!(session.finish());
        assert!(!session.finish());
        assert_eq!(session.state(), SessionState::Ended);

        let summary = session.summarize().await;
        assert_eq!(summary.persona, 'g');
        assert_eq!(summary.feedback, "Such fun.");
    }

    #[tokio::test]
    async fn test_summary_fallback() {
        let (session, _) = controller(vec![]);
        let summary = session.summarize().await;
        assert_eq!(summary, SessionSummary::fallback());
    }
}
