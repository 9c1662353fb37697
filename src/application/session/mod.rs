// SPDX-License-Identifier: MPL-2.0
//! The style-transfer session.
//!
//! A [`Session`] owns the two input slots, the ratio selection, the
//! generation controller and the theme preference. It is the single writer
//! of all of them; the UI update loop holds it and feeds it messages.
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::init(synthesizer, GenerationTimeout::default(), preferences);
//! session.set_image(SlotRole::Style, &style_bytes)?;
//! session.set_image(SlotRole::Content, &content_bytes)?;
//! let pending = session.start_generation()?;
//! let outcome = pending.run().await;
//! session.complete_generation(outcome);
//! ```

pub mod artifact;
pub mod controller;
pub mod preferences;
pub mod ratio_selector;
pub mod slot;

pub use artifact::ResultArtifact;
pub use controller::{GenerationController, GenerationOutcome, PendingGeneration};
pub use preferences::{PreferenceStore, ThemePreference, THEME_KEY};
pub use ratio_selector::RatioSelector;
pub use slot::ImageSlot;

use crate::application::port::Synthesizer;
use crate::domain::generation::{AspectRatio, GenerationPhase, GenerationTimeout};
use crate::domain::image::{ImagePayload, SlotRole};
use crate::error::{GenerationError, Result, SessionError};
use std::sync::Arc;

/// One user's working session.
#[derive(Debug)]
pub struct Session {
    style: ImageSlot,
    content: ImageSlot,
    ratio: RatioSelector,
    controller: GenerationController,
    preferences: PreferenceStore,
    theme: ThemePreference,
}

impl Session {
    /// Creates a session and reads the theme preference once.
    #[must_use]
    pub fn init(
        synthesizer: Arc<dyn Synthesizer>,
        timeout: GenerationTimeout,
        preferences: PreferenceStore,
    ) -> Self {
        let theme = preferences.load();
        tracing::info!(%theme, backend = synthesizer.name(), "session initialized");
        Self {
            style: ImageSlot::new(SlotRole::Style),
            content: ImageSlot::new(SlotRole::Content),
            ratio: RatioSelector::new(),
            controller: GenerationController::new(synthesizer, timeout),
            preferences,
            theme,
        }
    }

    // ===== Inputs =====

    #[must_use]
    pub fn slot(&self, role: SlotRole) -> &ImageSlot {
        match role {
            SlotRole::Style => &self.style,
            SlotRole::Content => &self.content,
        }
    }

    fn slot_mut(&mut self, role: SlotRole) -> &mut ImageSlot {
        match role {
            SlotRole::Style => &mut self.style,
            SlotRole::Content => &mut self.content,
        }
    }

    /// Decodes `bytes` into the slot for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::DecodeFailure`]; the slot is left unchanged.
    pub fn set_image(
        &mut self,
        role: SlotRole,
        bytes: &[u8],
    ) -> std::result::Result<ImagePayload, SessionError> {
        match self.slot_mut(role).set(bytes) {
            Ok(payload) => {
                tracing::info!(
                    slot = %role,
                    width = payload.width(),
                    height = payload.height(),
                    mime = payload.mime_type(),
                    fingerprint = %payload.fingerprint().short_hex(12),
                    "image loaded"
                );
                Ok(payload)
            }
            Err(err) => {
                tracing::warn!(slot = %role, error = %err, "image rejected");
                Err(err)
            }
        }
    }

    pub fn clear_image(&mut self, role: SlotRole) {
        self.slot_mut(role).clear();
        tracing::debug!(slot = %role, "image cleared");
    }

    /// Selects the output ratio by label.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidRatio`] for an unknown label.
    pub fn select_ratio(&mut self, label: &str) -> std::result::Result<AspectRatio, SessionError> {
        self.ratio.select(label)
    }

    pub fn select(&mut self, ratio: AspectRatio) {
        self.ratio.select_ratio(ratio);
    }

    #[must_use]
    pub fn ratio(&self) -> AspectRatio {
        self.ratio.current()
    }

    // ===== Generation =====

    /// Whether a generate trigger would currently be accepted.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        !self.style.is_empty() && !self.content.is_empty() && !self.controller.is_running()
    }

    /// Snapshots the inputs and starts a request.
    ///
    /// # Errors
    ///
    /// See [`GenerationController::start`].
    pub fn start_generation(&mut self) -> std::result::Result<PendingGeneration, SessionError> {
        self.controller
            .start(self.style.get(), self.content.get(), self.ratio.current())
    }

    /// Applies a finished request. Returns `false` for stale outcomes.
    pub fn complete_generation(&mut self, outcome: GenerationOutcome) -> bool {
        self.controller.complete(outcome)
    }

    pub fn cancel_generation(&mut self) -> bool {
        self.controller.cancel()
    }

    /// "New style": drops the finished result and returns to idle.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::AlreadyRunning`] while a request is in flight.
    pub fn new_style(&mut self) -> std::result::Result<(), SessionError> {
        self.controller.reset()
    }

    #[must_use]
    pub fn phase(&self) -> GenerationPhase {
        self.controller.phase()
    }

    #[must_use]
    pub fn artifact(&self) -> Option<&ResultArtifact> {
        self.controller.artifact()
    }

    #[must_use]
    pub fn error(&self) -> Option<&GenerationError> {
        self.controller.error()
    }

    #[must_use]
    pub fn controller(&self) -> &GenerationController {
        &self.controller
    }

    // ===== Theme =====

    #[must_use]
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Applies `theme` and persists it.
    ///
    /// The new theme takes effect even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns the persistence error, if any.
    pub fn set_theme(&mut self, theme: ThemePreference) -> Result<()> {
        self.theme = theme;
        self.preferences.save(theme).inspect_err(|err| {
            tracing::warn!(%theme, error = %err, "theme preference not persisted");
        })
    }

    /// Flips between light and dark and persists the result.
    ///
    /// # Errors
    ///
    /// Returns the persistence error, if any.
    pub fn toggle_theme(&mut self) -> Result<ThemePreference> {
        let theme = self.theme.toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    // ===== Lifecycle =====

    /// Cancels any in-flight request and releases both images.
    pub fn teardown(&mut self) {
        self.controller.teardown();
        self.style.clear();
        self.content.clear();
        tracing::info!("session torn down");
    }
}
