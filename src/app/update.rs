// SPDX-License-Identifier: MPL-2.0
//! Message handlers for `App::update`.
//!
//! Session calls happen here, on the update loop. Blocking work (reading a
//! picked file, encoding a download) and the synthesis call itself are
//! handed to `Task::perform` and come back as messages.

use super::{App, Message, PickedFile};
use crate::application::session::GenerationOutcome;
use crate::domain::image::SlotRole;
use crate::error::SessionError;
use crate::media::extensions::{IMAGE_EXTENSIONS, IMAGE_SAVE_FILTERS};
use crate::media::ExportFormat;
use crate::ui::notifications::Notification;
use crate::ui::studio::{self, DecodeJob};
use crate::ui::text;
use iced::{window, Task};
use std::path::{Path, PathBuf};

pub(super) fn handle(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Studio(studio_message) => handle_studio_message(app, studio_message),
        Message::Notification(notification_message) => {
            app.notifications.handle_message(&notification_message);
            Task::none()
        }
        Message::ImagePicked { role, file } => {
            if let Some(file) = file {
                handle_image_picked(app, role, file);
            }
            Task::none()
        }
        Message::FileDropped(path) => {
            let role = drop_target(app);
            Task::perform(read_file(path), move |file| Message::ImagePicked {
                role,
                file: Some(file),
            })
        }
        Message::GenerationFinished(outcome) => {
            handle_generation_finished(app, outcome);
            Task::none()
        }
        Message::PreviewDecoded {
            target,
            fingerprint,
            handle,
        } => {
            if !app.previews.apply(target, fingerprint, handle) {
                tracing::debug!(?target, "stale preview dropped");
            }
            Task::none()
        }
        Message::SaveDialogResult(path) => match path {
            Some(path) => start_download(app, path),
            None => Task::none(),
        },
        Message::DownloadFinished { path, result } => {
            handle_download_finished(app, &path, result);
            Task::none()
        }
        Message::Tick(_) => {
            app.notifications.tick();
            Task::none()
        }
        Message::WindowCloseRequested(id) => handle_close(app, id),
    }
}

fn handle_studio_message(app: &mut App, message: studio::Message) -> Task<Message> {
    match message {
        studio::Message::ToggleTheme => {
            if app.session.toggle_theme().is_err() {
                app.notifications
                    .push(Notification::warning("notification-theme-save-error"));
            }
            Task::none()
        }
        studio::Message::PickImage(role) => open_image_dialog(app, role),
        studio::Message::ClearImage(role) => {
            app.session.clear_image(role);
            Task::none()
        }
        studio::Message::SelectRatio(ratio) => {
            app.session.select(ratio);
            Task::none()
        }
        studio::Message::Generate => match app.session.start_generation() {
            Ok(pending) => Task::perform(pending.run(), Message::GenerationFinished),
            Err(SessionError::AlreadyRunning) => Task::none(),
            Err(err) => {
                app.notifications.push(session_error_notification(&err));
                Task::none()
            }
        },
        studio::Message::Cancel => {
            app.session.cancel_generation();
            Task::none()
        }
        studio::Message::Download => open_save_dialog(app),
        studio::Message::NewStyle => {
            if let Err(err) = app.session.new_style() {
                tracing::debug!(error = %err, "new style ignored");
            }
            Task::none()
        }
    }
}

// =============================================================================
// Inputs
// =============================================================================

fn open_image_dialog(app: &App, role: SlotRole) -> Task<Message> {
    let last_directory = app.dialogs.last_open_directory.clone();

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .add_filter(text::tr("dialog-image-filter"), IMAGE_EXTENSIONS);

            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }

            match dialog.pick_file().await {
                Some(handle) => Some(read_file(handle.path().to_path_buf()).await),
                None => None,
            }
        },
        move |file| Message::ImagePicked { role, file },
    )
}

async fn read_file(path: PathBuf) -> PickedFile {
    let bytes = tokio::fs::read(&path).await.map_err(|err| err.to_string());
    PickedFile { path, bytes }
}

/// A dropped file fills the style slot first, then the content slot, then
/// replaces the content image.
fn drop_target(app: &App) -> SlotRole {
    SlotRole::ALL
        .into_iter()
        .find(|role| app.session.slot(*role).is_empty())
        .unwrap_or(SlotRole::Content)
}

fn handle_image_picked(app: &mut App, role: SlotRole, file: PickedFile) {
    let PickedFile { path, bytes } = file;
    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(detail) => {
            app.notifications.push(
                Notification::error("notification-image-read-error")
                    .with_arg("file", display_name(&path))
                    .with_arg("detail", detail),
            );
            return;
        }
    };

    app.dialogs.remember_open(&path);
    match app.session.set_image(role, &bytes) {
        Ok(_) => app.notifications.clear_key("error-slot-decode-failure"),
        Err(err) => app.notifications.push(
            session_error_notification(&err).with_arg("slot", role.label()),
        ),
    }
}

fn session_error_notification(err: &SessionError) -> Notification {
    let detail = match err {
        SessionError::DecodeFailure(detail)
        | SessionError::InvalidRatio(detail)
        | SessionError::UnsupportedFormat(detail) => detail.clone(),
        SessionError::PreconditionNotMet { .. } | SessionError::AlreadyRunning => err.to_string(),
    };
    let notification = match err {
        SessionError::PreconditionNotMet { .. } => Notification::warning(err.i18n_key()),
        _ => Notification::error(err.i18n_key()),
    };
    notification.with_arg("detail", detail)
}

// =============================================================================
// Generation
// =============================================================================

fn handle_generation_finished(app: &mut App, outcome: GenerationOutcome) {
    let request_id = outcome.request_id;
    if !app.session.complete_generation(outcome) {
        tracing::debug!(request = %request_id, "outcome dropped by the session");
    }
}

// =============================================================================
// Previews
// =============================================================================

pub(super) fn decode_preview(job: DecodeJob) -> Task<Message> {
    let DecodeJob { target, payload } = job;
    let fingerprint = payload.fingerprint();

    Task::perform(
        async move {
            tokio::task::spawn_blocking(move || studio::decode_preview(&payload))
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "preview decode task failed");
                    None
                })
        },
        move |handle| Message::PreviewDecoded {
            target,
            fingerprint,
            handle,
        },
    )
}

// =============================================================================
// Download
// =============================================================================

fn open_save_dialog(app: &App) -> Task<Message> {
    let Some(artifact) = app.session.artifact() else {
        return Task::none();
    };
    let format = app.export_format;
    let file_name = artifact.default_file_name(format);
    let last_directory = app.dialogs.last_save_directory.clone();

    Task::perform(
        async move {
            let mut dialog = rfd::AsyncFileDialog::new().set_file_name(&file_name);
            for (name, extensions) in save_filters(format) {
                dialog = dialog.add_filter(name, extensions);
            }
            if let Some(dir) = last_directory {
                if dir.exists() {
                    dialog = dialog.set_directory(&dir);
                }
            }
            dialog.save_file().await.map(|handle| handle.path().to_path_buf())
        },
        Message::SaveDialogResult,
    )
}

/// Save filters with the configured format first.
fn save_filters(format: ExportFormat) -> Vec<(&'static str, &'static [&'static str])> {
    let (preferred, others): (Vec<_>, Vec<_>) = IMAGE_SAVE_FILTERS
        .iter()
        .copied()
        .partition(|(_, extensions)| extensions.contains(&format.extension()));
    preferred.into_iter().chain(others).collect()
}

fn start_download(app: &mut App, path: PathBuf) -> Task<Message> {
    let Some(artifact) = app.session.artifact().cloned() else {
        tracing::debug!("download requested without a result");
        return Task::none();
    };
    let format = ExportFormat::from_path(&path).unwrap_or(app.export_format);
    app.dialogs.remember_save(&path);

    Task::perform(
        async move {
            let target = path.clone();
            let written = tokio::task::spawn_blocking(move || {
                artifact
                    .download(format.extension(), &target)
                    .map_err(|err| err.to_string())
            })
            .await
            .unwrap_or_else(|err| Err(err.to_string()));
            (path, written)
        },
        |(path, result)| Message::DownloadFinished { path, result },
    )
}

fn handle_download_finished(app: &mut App, path: &Path, result: Result<(), String>) {
    match result {
        Ok(()) => {
            app.notifications.push(
                Notification::success("notification-download-success")
                    .with_arg("file", display_name(path)),
            );
            if let Some(key) = app.dialogs.save() {
                tracing::warn!(key = %key, "dialog folders not saved");
            }
        }
        Err(detail) => {
            app.notifications.push(
                Notification::error("notification-download-error").with_arg("detail", detail),
            );
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

fn handle_close(app: &mut App, id: window::Id) -> Task<Message> {
    app.session.teardown();
    if let Some(key) = app.dialogs.save() {
        tracing::warn!(key = %key, "dialog folders not saved");
    }
    window::close(id)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_filters_put_configured_format_first() {
        let filters = save_filters(ExportFormat::WebP);
        assert_eq!(filters.len(), IMAGE_SAVE_FILTERS.len());
        assert!(filters[0].1.contains(&"webp"));

        let filters = save_filters(ExportFormat::Jpeg);
        assert!(filters[0].1.contains(&"jpg"));
    }

    #[test]
    fn decode_failures_are_errors_with_raw_detail() {
        let notification =
            session_error_notification(&SessionError::DecodeFailure("bad header".into()));
        assert_eq!(notification.message_key(), "error-slot-decode-failure");
        assert!(notification
            .message_args()
            .iter()
            .any(|(k, v)| k == "detail" && v == "bad header"));
    }

    #[test]
    fn missing_inputs_are_warnings() {
        let notification = session_error_notification(&SessionError::PreconditionNotMet {
            missing: vec![SlotRole::Content],
        });
        assert_eq!(
            notification.severity(),
            crate::ui::notifications::Severity::Warning
        );
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("/tmp/out/result.png")), "result.png");
    }
}
