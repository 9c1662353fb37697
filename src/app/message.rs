// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::application::session::GenerationOutcome;
use crate::domain::image::{Fingerprint, SlotRole};
use crate::ui::notifications;
use crate::ui::studio::{self, PreviewTarget};
use iced::widget::image::Handle;
use std::path::PathBuf;
use std::time::Instant;

/// A file chosen for a slot, read off the UI thread.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub path: PathBuf,
    /// File contents, or the I/O error text.
    pub bytes: Result<Vec<u8>, String>,
}

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Studio(studio::Message),
    Notification(notifications::NotificationMessage),
    /// Result of the open dialog (or a drop) for a slot; `None` if cancelled.
    ImagePicked {
        role: SlotRole,
        file: Option<PickedFile>,
    },
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    GenerationFinished(GenerationOutcome),
    /// A preview finished decoding off the update thread; `None` on failure.
    PreviewDecoded {
        target: PreviewTarget,
        fingerprint: Fingerprint,
        handle: Option<Handle>,
    },
    /// Result of the download save dialog.
    SaveDialogResult(Option<PathBuf>),
    /// The result was written (or failed to be written) to `path`.
    DownloadFinished {
        path: PathBuf,
        result: Result<(), String>,
    },
    /// Periodic tick for toast expiry and the busy spinner.
    Tick(Instant),
    /// Window close was requested (user clicked X or pressed Alt+F4).
    WindowCloseRequested(iced::window::Id),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Synthesis service URL; selects the HTTP backend over the settings file.
    pub endpoint: Option<String>,
    /// Generation timeout in seconds, overriding the settings file.
    pub timeout_secs: Option<u64>,
}
