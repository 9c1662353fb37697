// SPDX-License-Identifier: MPL-2.0
//! The session screen.
//!
//! One scrollable column: header with the theme toggle, the two input slots,
//! the ratio bar, the generate row and the result panel. Everything shown is
//! derived from the [`Session`]; the screen keeps no state of its own apart
//! from decoded [`Previews`].

mod previews;
mod ratio_bar;
mod result;
mod slots;

pub use previews::{decode as decode_preview, DecodeJob, PreviewTarget, Previews};

use crate::application::session::Session;
use crate::domain::generation::AspectRatio;
use crate::domain::image::SlotRole;
use crate::media::ExportFormat;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::text;
use iced::widget::{button, scrollable, Column, Container, Row, Space, Text};
use iced::{alignment, Element, Length};

/// Messages emitted by the session screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ToggleTheme,
    PickImage(SlotRole),
    ClearImage(SlotRole),
    SelectRatio(AspectRatio),
    /// Also used by the retry button of a failed result.
    Generate,
    Cancel,
    Download,
    NewStyle,
}

/// Data needed to render the screen.
pub struct ViewContext<'a> {
    pub session: &'a Session,
    pub previews: &'a Previews,
    pub export_format: ExportFormat,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let session = ctx.session;

    let inputs = Row::new()
        .spacing(spacing::LG)
        .push(slots::view(
            session.slot(SlotRole::Style),
            ctx.previews.slot(SlotRole::Style),
        ))
        .push(slots::view(
            session.slot(SlotRole::Content),
            ctx.previews.slot(SlotRole::Content),
        ));

    let content = Column::new()
        .spacing(spacing::LG)
        .padding(spacing::XL)
        .max_width(1000.0)
        .push(header(session))
        .push(inputs)
        .push(ratio_bar::view(session.ratio()))
        .push(generate_row(session))
        .push(result::view(session, ctx.previews.result(), ctx.export_format));

    scrollable(
        Container::new(content)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn header(session: &Session) -> Element<'_, Message> {
    let titles = Column::new()
        .spacing(spacing::XXS)
        .push(Text::new(text::tr("app-heading")).size(typography::TITLE_LG))
        .push(Text::new(text::tr("app-subtitle")).size(typography::BODY));

    let toggle_key = if session.theme().is_dark() {
        "theme-switch-to-light"
    } else {
        "theme-switch-to-dark"
    };
    let toggle = button(Text::new(text::tr(toggle_key)).size(typography::BODY))
        .padding([spacing::XS, spacing::MD])
        .style(styles::button::secondary)
        .on_press(Message::ToggleTheme);

    Row::new()
        .align_y(alignment::Vertical::Center)
        .push(titles)
        .push(Space::new().width(Length::Fill))
        .push(toggle)
        .into()
}

fn generate_row(session: &Session) -> Element<'_, Message> {
    let running = session.controller().is_running();
    let label = if running {
        text::tr("generate-running")
    } else {
        text::tr("generate")
    };

    let generate = button(
        Text::new(label)
            .size(typography::TITLE_SM)
            .align_x(alignment::Horizontal::Center),
    )
    .width(Length::Fill)
    .padding([spacing::SM, spacing::LG])
    .style(styles::button::primary)
    .on_press_maybe(session.can_generate().then_some(Message::Generate));

    let mut row = Row::new().spacing(spacing::SM).push(generate);
    if running {
        row = row.push(
            button(Text::new(text::tr("cancel")))
                .padding([spacing::SM, spacing::LG])
                .style(styles::button::secondary)
                .on_press(Message::Cancel),
        );
    }
    row.into()
}
