// SPDX-License-Identifier: MPL-2.0
//! Generation lifecycle state machine.
//!
//! ```text
//! Idle ──start──▶ Running ──outcome──▶ Succeeded | Failed
//!  ▲                 │                       │
//!  └──── cancel ─────┘◀──── reset / start ───┘
//! ```
//!
//! The phase carries its own data, so "succeeded without an artifact" or
//! "failed with an artifact" cannot be represented.
//!
//! The controller never awaits. [`GenerationController::start`] hands back a
//! [`PendingGeneration`] whose [`run`](PendingGeneration::run) future the
//! caller drives; its [`GenerationOutcome`] comes back through
//! [`GenerationController::complete`], which drops outcomes for requests that
//! are no longer current.

use super::artifact::ResultArtifact;
use crate::application::port::Synthesizer;
use crate::domain::generation::{
    AspectRatio, GenerationPhase, GenerationRequest, GenerationTimeout, RequestId,
};
use crate::domain::image::{ImagePayload, SlotRole};
use crate::error::{GenerationError, SessionError};
use chrono::Local;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

// =============================================================================
// Outcome & pending handle
// =============================================================================

/// Result of driving one request to completion.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub request_id: RequestId,
    pub result: Result<ImagePayload, GenerationError>,
}

/// A started request, ready to be driven on the async runtime.
pub struct PendingGeneration {
    request: GenerationRequest,
    synthesizer: Arc<dyn Synthesizer>,
    timeout: GenerationTimeout,
    cancel: CancellationToken,
}

impl PendingGeneration {
    #[must_use]
    pub fn request_id(&self) -> RequestId {
        self.request.id()
    }

    #[must_use]
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    /// Calls the synthesizer under the timeout, stopping early on cancel.
    pub async fn run(self) -> GenerationOutcome {
        let request_id = self.request.id();
        let limit = self.timeout.as_duration();
        let work = self.synthesizer.synthesize(self.request);

        let result = tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(GenerationError::Cancelled),
            answer = tokio::time::timeout(limit, work) => match answer {
                Ok(Ok(image)) => Ok(image),
                Ok(Err(err)) => Err(GenerationError::Collaborator(err)),
                Err(_) => Err(GenerationError::Timeout(limit)),
            },
        };

        GenerationOutcome { request_id, result }
    }
}

impl fmt::Debug for PendingGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingGeneration")
            .field("request", &self.request.id())
            .field("backend", &self.synthesizer.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Controller
// =============================================================================

struct InFlight {
    request: GenerationRequest,
    cancel: CancellationToken,
    started_at: Instant,
}

enum State {
    Idle,
    Running(InFlight),
    Succeeded(ResultArtifact),
    Failed(GenerationError),
}

/// Owns the current request and its phase.
pub struct GenerationController {
    state: State,
    last_request_id: RequestId,
    synthesizer: Arc<dyn Synthesizer>,
    timeout: GenerationTimeout,
}

impl GenerationController {
    #[must_use]
    pub fn new(synthesizer: Arc<dyn Synthesizer>, timeout: GenerationTimeout) -> Self {
        Self {
            state: State::Idle,
            last_request_id: RequestId::new(0),
            synthesizer,
            timeout,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        match self.state {
            State::Idle => GenerationPhase::Idle,
            State::Running(_) => GenerationPhase::Running,
            State::Succeeded(_) => GenerationPhase::Succeeded,
            State::Failed(_) => GenerationPhase::Failed,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    #[must_use]
    pub fn artifact(&self) -> Option<&ResultArtifact> {
        match &self.state {
            State::Succeeded(artifact) => Some(artifact),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&GenerationError> {
        match &self.state {
            State::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Snapshot of the in-flight request, if any.
    #[must_use]
    pub fn current_request(&self) -> Option<&GenerationRequest> {
        match &self.state {
            State::Running(in_flight) => Some(&in_flight.request),
            _ => None,
        }
    }

    /// Time since the in-flight request started.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        match &self.state {
            State::Running(in_flight) => Some(in_flight.started_at.elapsed()),
            _ => None,
        }
    }

    #[must_use]
    pub fn timeout(&self) -> GenerationTimeout {
        self.timeout
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.synthesizer.name()
    }

    /// Starts a request from the given inputs.
    ///
    /// A finished previous result is discarded first. Nothing changes when
    /// this returns an error.
    ///
    /// # Errors
    ///
    /// - [`SessionError::AlreadyRunning`] while a request is in flight
    /// - [`SessionError::PreconditionNotMet`] naming each empty input
    pub fn start(
        &mut self,
        style: Option<&ImagePayload>,
        content: Option<&ImagePayload>,
        ratio: AspectRatio,
    ) -> Result<PendingGeneration, SessionError> {
        if self.is_running() {
            tracing::debug!("generation trigger ignored while running");
            return Err(SessionError::AlreadyRunning);
        }

        let (style, content) = match (style, content) {
            (Some(style), Some(content)) => (style.clone(), content.clone()),
            (style, content) => {
                let missing: Vec<SlotRole> =
                    [(SlotRole::Style, style), (SlotRole::Content, content)]
                        .into_iter()
                        .filter(|(_, payload)| payload.is_none())
                        .map(|(role, _)| role)
                        .collect();
                tracing::debug!(?missing, "generation preconditions not met");
                return Err(SessionError::PreconditionNotMet { missing });
            }
        };

        if self.phase().is_terminal() {
            tracing::debug!(phase = %self.phase(), "discarding previous result");
        }

        let id = self.last_request_id.next();
        self.last_request_id = id;

        let request = GenerationRequest::new(id, style, content, ratio);
        let cancel = CancellationToken::new();
        self.state = State::Running(InFlight {
            request: request.clone(),
            cancel: cancel.clone(),
            started_at: Instant::now(),
        });

        tracing::info!(
            request = %id,
            %ratio,
            backend = self.synthesizer.name(),
            timeout_secs = self.timeout.secs(),
            "generation started"
        );

        Ok(PendingGeneration {
            request,
            synthesizer: Arc::clone(&self.synthesizer),
            timeout: self.timeout,
            cancel,
        })
    }

    /// Applies an outcome. Returns `false` if it belongs to a request that
    /// is no longer current.
    pub fn complete(&mut self, outcome: GenerationOutcome) -> bool {
        let is_current = matches!(
            &self.state,
            State::Running(in_flight) if in_flight.request.id() == outcome.request_id
        );
        if !is_current {
            tracing::debug!(request = %outcome.request_id, "discarding stale generation outcome");
            return false;
        }

        let State::Running(in_flight) = std::mem::replace(&mut self.state, State::Idle) else {
            return false;
        };
        let elapsed_ms =
            u64::try_from(in_flight.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);

        self.state = match outcome.result {
            Ok(image) => {
                tracing::info!(
                    request = %outcome.request_id,
                    elapsed_ms,
                    width = image.width(),
                    height = image.height(),
                    "generation succeeded"
                );
                State::Succeeded(ResultArtifact::new(
                    image,
                    in_flight.request.ratio(),
                    outcome.request_id,
                    Local::now(),
                ))
            }
            Err(GenerationError::Cancelled) => {
                tracing::info!(request = %outcome.request_id, "generation cancelled");
                State::Idle
            }
            Err(err) => {
                tracing::info!(
                    request = %outcome.request_id,
                    elapsed_ms,
                    error = %err,
                    "generation failed"
                );
                State::Failed(err)
            }
        };
        true
    }

    /// Abandons the in-flight request. Returns `false` if nothing was running.
    pub fn cancel(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }

        if let State::Running(in_flight) = std::mem::replace(&mut self.state, State::Idle) {
            in_flight.cancel.cancel();
            tracing::info!(request = %in_flight.request.id(), "generation cancelled");
        }
        true
    }

    /// Returns to idle after a finished request.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyRunning`] while a request is in flight.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        match self.state {
            State::Running(_) => Err(SessionError::AlreadyRunning),
            State::Idle => Ok(()),
            State::Succeeded(_) | State::Failed(_) => {
                tracing::info!(from = %self.phase(), "generation reset");
                self.state = State::Idle;
                Ok(())
            }
        }
    }

    /// Cancels anything in flight and forgets any result.
    pub fn teardown(&mut self) {
        self.cancel();
        self.state = State::Idle;
    }
}

impl fmt::Debug for GenerationController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationController")
            .field("phase", &self.phase())
            .field("last_request_id", &self.last_request_id)
            .field("backend", &self.synthesizer.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::{SynthesisError, SynthesisFuture};
    use crate::domain::image::Fingerprint;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::oneshot;

    fn payload(tag: u8) -> ImagePayload {
        ImagePayload::new(vec![tag], "image/png", 2, 2, Fingerprint::from_bytes([tag; 32]))
    }

    /// Answers with a fixed result after an optional delay and records requests.
    struct ScriptedSynthesizer {
        delay: Duration,
        answer: Result<ImagePayload, SynthesisError>,
        seen: Mutex<Vec<GenerationRequest>>,
    }

    impl ScriptedSynthesizer {
        fn new(delay: Duration, answer: Result<ImagePayload, SynthesisError>) -> Arc<Self> {
            Arc::new(Self {
                delay,
                answer,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl Synthesizer for ScriptedSynthesizer {
        fn synthesize(&self, request: GenerationRequest) -> SynthesisFuture {
            self.seen.lock().unwrap().push(request);
            let delay = self.delay;
            let answer = self.answer.clone();
            Box::pin(async move {
                tokio::time::sleep(delay).await;
                answer
            })
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    /// Never answers.
    struct SilentSynthesizer;

    impl Synthesizer for SilentSynthesizer {
        fn synthesize(&self, _request: GenerationRequest) -> SynthesisFuture {
            Box::pin(std::future::pending())
        }

        fn name(&self) -> &'static str {
            "silent"
        }
    }

    fn controller_with(synth: Arc<dyn Synthesizer>) -> GenerationController {
        GenerationController::new(synth, GenerationTimeout::default())
    }

    fn outcome(id: RequestId, result: Result<ImagePayload, GenerationError>) -> GenerationOutcome {
        GenerationOutcome {
            request_id: id,
            result,
        }
    }

    #[test]
    fn starts_idle() {
        let controller = controller_with(Arc::new(SilentSynthesizer));
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert!(controller.artifact().is_none());
        assert!(controller.error().is_none());
    }

    #[test]
    fn start_with_missing_inputs_names_them() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let style = payload(1);

        let err = controller
            .start(None, None, AspectRatio::Square)
            .expect_err("both inputs missing");
        assert_eq!(
            err,
            SessionError::PreconditionNotMet {
                missing: vec![SlotRole::Style, SlotRole::Content]
            }
        );

        let err = controller
            .start(Some(&style), None, AspectRatio::Square)
            .expect_err("content missing");
        assert_eq!(
            err,
            SessionError::PreconditionNotMet {
                missing: vec![SlotRole::Content]
            }
        );
        assert_eq!(controller.phase(), GenerationPhase::Idle);
    }

    #[test]
    fn second_start_while_running_is_rejected() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let (a, b) = (payload(1), payload(2));

        let first = controller
            .start(Some(&a), Some(&b), AspectRatio::Square)
            .expect("first start succeeds");
        assert_eq!(controller.phase(), GenerationPhase::Running);

        let err = controller
            .start(Some(&a), Some(&b), AspectRatio::Square)
            .expect_err("second start rejected");
        assert_eq!(err, SessionError::AlreadyRunning);
        assert_eq!(
            controller.current_request().map(GenerationRequest::id),
            Some(first.request_id())
        );
    }

    #[test]
    fn success_outcome_yields_artifact() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Widescreen16x9)
            .expect("start succeeds");
        let output = payload(9);

        assert!(controller.complete(outcome(pending.request_id(), Ok(output.clone()))));

        assert_eq!(controller.phase(), GenerationPhase::Succeeded);
        let artifact = controller.artifact().expect("artifact present");
        assert!(artifact.image().same_allocation(&output));
        assert_eq!(artifact.ratio(), AspectRatio::Widescreen16x9);
        assert!(controller.error().is_none());
    }

    #[test]
    fn failure_outcome_retains_detail_without_artifact() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .expect("start succeeds");
        let err = GenerationError::Collaborator(SynthesisError::Rejected("nsfw".into()));

        assert!(controller.complete(outcome(pending.request_id(), Err(err.clone()))));

        assert_eq!(controller.phase(), GenerationPhase::Failed);
        assert_eq!(controller.error(), Some(&err));
        assert!(controller.artifact().is_none());
    }

    #[test]
    fn reset_rules() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        assert_eq!(controller.reset(), Ok(()));

        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .expect("start succeeds");
        assert_eq!(controller.reset(), Err(SessionError::AlreadyRunning));

        controller.complete(outcome(pending.request_id(), Ok(payload(3))));
        assert_eq!(controller.reset(), Ok(()));
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert!(controller.artifact().is_none());
    }

    #[test]
    fn start_after_failure_discards_error() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let (a, b) = (payload(1), payload(2));
        let first = controller.start(Some(&a), Some(&b), AspectRatio::Square).unwrap();
        controller.complete(outcome(
            first.request_id(),
            Err(GenerationError::Timeout(Duration::from_secs(30))),
        ));

        let second = controller.start(Some(&a), Some(&b), AspectRatio::Square).unwrap();
        assert!(second.request_id() > first.request_id());
        assert_eq!(controller.phase(), GenerationPhase::Running);
        assert!(controller.error().is_none());
    }

    #[test]
    fn cancel_returns_to_idle_and_ignores_late_outcome() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .expect("start succeeds");

        assert!(controller.cancel());
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert!(pending.cancel.is_cancelled());
        assert!(!controller.cancel());

        assert!(!controller.complete(outcome(pending.request_id(), Ok(payload(3)))));
        assert_eq!(controller.phase(), GenerationPhase::Idle);
    }

    #[test]
    fn outcome_for_older_request_is_ignored() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let (a, b) = (payload(1), payload(2));
        let old = controller.start(Some(&a), Some(&b), AspectRatio::Square).unwrap();
        controller.cancel();
        let current = controller.start(Some(&a), Some(&b), AspectRatio::Square).unwrap();

        assert!(!controller.complete(outcome(old.request_id(), Ok(payload(3)))));
        assert_eq!(controller.phase(), GenerationPhase::Running);

        assert!(controller.complete(outcome(current.request_id(), Ok(payload(4)))));
        assert_eq!(controller.phase(), GenerationPhase::Succeeded);
    }

    #[test]
    fn cancelled_outcome_is_never_stored_as_failure() {
        let mut controller = controller_with(Arc::new(SilentSynthesizer));
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .unwrap();

        assert!(controller.complete(outcome(
            pending.request_id(),
            Err(GenerationError::Cancelled)
        )));
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert!(controller.error().is_none());
    }

    #[tokio::test]
    async fn run_delivers_collaborator_answer() {
        let synth = ScriptedSynthesizer::new(Duration::ZERO, Ok(payload(7)));
        let mut controller = controller_with(synth.clone());
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Portrait3x4)
            .unwrap();

        let result = pending.run().await;
        assert!(controller.complete(result));
        assert_eq!(controller.phase(), GenerationPhase::Succeeded);

        let seen = synth.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].ratio(), AspectRatio::Portrait3x4);
    }

    #[tokio::test]
    async fn run_maps_collaborator_error() {
        let synth = ScriptedSynthesizer::new(
            Duration::ZERO,
            Err(SynthesisError::Status {
                code: 500,
                message: "boom".into(),
            }),
        );
        let mut controller = controller_with(synth);
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .unwrap();

        controller.complete(pending.run().await);
        assert!(matches!(
            controller.error(),
            Some(GenerationError::Collaborator(SynthesisError::Status { code: 500, .. }))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_collaborator_times_out() {
        let mut controller =
            GenerationController::new(Arc::new(SilentSynthesizer), GenerationTimeout::new(5));
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .unwrap();

        let result = pending.run().await;
        assert!(matches!(
            result.result,
            Err(GenerationError::Timeout(d)) if d == Duration::from_secs(5)
        ));

        controller.complete(result);
        assert_eq!(controller.phase(), GenerationPhase::Failed);
        assert!(controller.error().is_some_and(GenerationError::is_retryable));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_running_task() {
        let synth = ScriptedSynthesizer::new(Duration::from_secs(20), Ok(payload(7)));
        let mut controller = controller_with(synth);
        let pending = controller
            .start(Some(&payload(1)), Some(&payload(2)), AspectRatio::Square)
            .unwrap();

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = tx.send(pending.run().await);
        });
        tokio::task::yield_now().await;

        assert!(controller.cancel());
        let result = rx.await.expect("task reports back");
        assert!(matches!(result.result, Err(GenerationError::Cancelled)));

        assert!(!controller.complete(result));
        assert_eq!(controller.phase(), GenerationPhase::Idle);
    }
}
