// SPDX-License-Identifier: MPL-2.0
//! Application root state and the Iced event loop.
//!
//! The `App` owns the one [`Session`] and everything the window needs around
//! it: decoded previews, toasts and remembered dialog folders. Startup wiring
//! (which synthesis backend, which preference file) lives here so it is easy
//! to audit.

pub mod config;
mod message;
pub mod paths;
pub mod persisted_state;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message, PickedFile};

use crate::application::port::{KeyValueStore, Synthesizer};
use crate::application::session::{PreferenceStore, Session};
use crate::domain::generation::GenerationTimeout;
use crate::infrastructure::{
    CborFileStore, HttpSynthesizer, MemoryStore, PreviewSynthesizer, SystemAppearance,
};
use crate::media::ExportFormat;
use crate::ui::notifications;
use crate::ui::studio::Previews;
use config::{SynthesisBackend, SynthesisConfig};
use iced::{window, Element, Subscription, Task, Theme};
use persisted_state::DialogState;
use std::fmt;
use std::sync::Arc;

/// Root Iced application state.
pub struct App {
    session: Session,
    previews: Previews,
    notifications: notifications::Manager,
    dialogs: DialogState,
    export_format: ExportFormat,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("phase", &self.session.phase())
            .field("export_format", &self.export_format)
            .finish_non_exhaustive()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(config::WINDOW_DEFAULT_WIDTH, config::WINDOW_DEFAULT_HEIGHT),
        min_size: Some(iced::Size::new(
            config::MIN_WINDOW_WIDTH,
            config::MIN_WINDOW_HEIGHT,
        )),
        icon: crate::icon::load_window_icon(),
        exit_on_close_request: false,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot closure; the flags are consumed on first call.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Picks the synthesis backend.
///
/// An endpoint from the CLI wins; otherwise the settings file decides. A
/// missing or invalid endpoint falls back to the offline preview with a
/// warning key.
fn build_synthesizer(
    settings: &SynthesisConfig,
    flags: &Flags,
) -> (Arc<dyn Synthesizer>, Option<String>) {
    let endpoint = flags.endpoint.clone().or(match settings.backend {
        SynthesisBackend::Http => settings.endpoint.clone(),
        SynthesisBackend::Preview => None,
    });

    let mut warning = None;
    match endpoint {
        Some(endpoint) => match HttpSynthesizer::new(endpoint) {
            Ok(http) => return (Arc::new(http), None),
            Err(err) => {
                tracing::warn!(error = %err, "synthesis endpoint rejected, using offline preview");
                warning = Some("notification-endpoint-error".to_string());
            }
        },
        None if settings.backend == SynthesisBackend::Http => {
            tracing::warn!("http backend selected without an endpoint, using offline preview");
            warning = Some("notification-endpoint-missing".to_string());
        }
        None => {}
    }

    (
        Arc::new(PreviewSynthesizer::new(settings.preview_delay())),
        warning,
    )
}

/// Preference storage in the data directory, or in memory when no data
/// directory can be resolved.
fn build_preferences() -> PreferenceStore {
    let store: Box<dyn KeyValueStore> = match paths::preferences_file_path(None) {
        Some(path) => Box::new(CborFileStore::new(path)),
        None => {
            tracing::warn!("no data directory, theme preference will not persist");
            Box::new(MemoryStore::new())
        }
    };
    PreferenceStore::new(store, Box::new(SystemAppearance))
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();
        let (synthesizer, backend_warning) = build_synthesizer(&config.synthesis, &flags);
        let timeout = flags
            .timeout_secs
            .map_or_else(|| config.synthesis.timeout(), GenerationTimeout::new);

        let session = Session::init(synthesizer, timeout, build_preferences());
        let (dialogs, state_warning) = DialogState::load();

        let mut notifications = notifications::Manager::new();
        for key in [config_warning, backend_warning, state_warning]
            .into_iter()
            .flatten()
        {
            notifications.push(notifications::Notification::warning(key));
        }

        let app = App {
            session,
            previews: Previews::default(),
            notifications,
            dialogs,
            export_format: config.export.format(),
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        crate::ui::text::tr("window-title")
    }

    fn theme(&self) -> Theme {
        if self.session.theme().is_dark() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                self.session.controller().is_running(),
                self.notifications.has_notifications(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = update::handle(self, message);
        let decodes = self
            .previews
            .sync(&self.session)
            .into_iter()
            .map(update::decode_preview);
        Task::batch(std::iter::once(task).chain(decodes))
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
