// SPDX-License-Identifier: MPL-2.0
//! Result panel and post-generation actions.

use super::Message;
use crate::application::session::Session;
use crate::domain::generation::GenerationPhase;
use crate::error::GenerationError;
use crate::media::ExportFormat;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::text;
use crate::ui::widgets::AnimatedSpinner;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};

pub fn view<'a>(
    session: &'a Session,
    result: Option<&'a Handle>,
    export_format: ExportFormat,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match session.phase() {
        GenerationPhase::Idle => centered(
            Text::new(text::tr("result-placeholder"))
                .size(typography::BODY)
                .color(palette::GRAY_400)
                .into(),
        ),
        GenerationPhase::Running => running(session),
        GenerationPhase::Succeeded => succeeded(session, result, export_format),
        GenerationPhase::Failed => match session.error() {
            Some(err) => failed(err),
            None => centered(Text::new(text::tr("result-failed-title")).into()),
        },
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(text::tr("result-title")).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::RESULT_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn running(session: &Session) -> Element<'_, Message> {
    let elapsed = session.controller().elapsed().unwrap_or_default();
    let ratio = session
        .controller()
        .current_request()
        .map_or(session.ratio(), |request| request.ratio());

    centered(
        Column::new()
            .spacing(spacing::MD)
            .align_x(alignment::Horizontal::Center)
            .push(AnimatedSpinner::new(palette::PRIMARY_500, elapsed).into_element())
            .push(
                Text::new(text::tr_with_args("result-running", &[("ratio", ratio.label())]))
                    .size(typography::BODY),
            )
            .into(),
    )
}

fn succeeded<'a>(
    session: &'a Session,
    result: Option<&'a Handle>,
    export_format: ExportFormat,
) -> Element<'a, Message> {
    let Some(artifact) = session.artifact() else {
        return centered(Text::new(text::tr("result-placeholder")).into());
    };

    let badge = Container::new(
        Container::new(Text::new(text::tr("result-badge")).size(typography::CAPTION))
            .padding([spacing::XXS, spacing::SM])
            .style(styles::container::badge),
    )
    .padding(spacing::SM);

    let picture: Element<'a, Message> = match result {
        Some(handle) => Image::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::RESULT_HEIGHT))
            .into(),
        None => centered(Text::new(text::tr("preview-pending")).into()),
    };

    let (width, height) = artifact.image().dimensions();
    let caption = Text::new(format!(
        "{width} × {height} · {} · {}",
        artifact.ratio().label(),
        artifact.generated_at().format("%H:%M:%S")
    ))
    .size(typography::CAPTION);

    let actions = Row::new()
        .spacing(spacing::SM)
        .push(
            button(Text::new(text::tr_with_args(
                "download",
                &[("format", export_format.name())],
            )))
            .padding([spacing::XS, spacing::LG])
            .style(styles::button::primary)
            .on_press(Message::Download),
        )
        .push(new_style_button());

    Column::new()
        .spacing(spacing::SM)
        .push(Stack::new().push(picture).push(badge))
        .push(caption)
        .push(actions)
        .into()
}

fn failed(err: &GenerationError) -> Element<'_, Message> {
    let detail = text::tr_with_args(err.i18n_key(), &[("detail", err.to_string())]);

    let mut actions = Row::new().spacing(spacing::SM);
    if err.is_retryable() {
        actions = actions.push(
            button(Text::new(text::tr("retry")))
                .padding([spacing::XS, spacing::LG])
                .style(styles::button::primary)
                .on_press(Message::Generate),
        );
    }
    actions = actions.push(new_style_button());

    let card = Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(text::tr("result-failed-title")).size(typography::TITLE_SM))
            .push(Text::new(detail).size(typography::BODY))
            .push(actions),
    )
    .width(Length::Fill)
    .padding(spacing::MD)
    .style(styles::container::failure);

    centered(card.into())
}

fn new_style_button<'a>() -> iced::widget::Button<'a, Message> {
    button(Text::new(text::tr("new-style")))
        .padding([spacing::XS, spacing::LG])
        .style(styles::button::secondary)
        .on_press(Message::NewStyle)
}
