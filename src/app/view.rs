// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application: the session screen with the toast
//! overlay on top.

use super::{App, Message};
use crate::ui::notifications::Toast;
use crate::ui::studio::{self, ViewContext};
use iced::widget::Stack;
use iced::{Element, Length};

pub fn view(app: &App) -> Element<'_, Message> {
    let screen = studio::view(ViewContext {
        session: &app.session,
        previews: &app.previews,
        export_format: app.export_format,
    })
    .map(Message::Studio);

    let toasts = Toast::view_overlay(&app.notifications).map(Message::Notification);

    Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(screen)
        .push(toasts)
        .into()
}
