// SPDX-License-Identifier: MPL-2.0
//! Input slot cards.

use super::Message;
use crate::application::session::ImageSlot;
use crate::domain::image::SlotRole;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::text;
use iced::widget::image::{Handle, Image};
use iced::widget::{button, Column, Container, Row, Space, Stack, Text};
use iced::{alignment, ContentFit, Element, Length};

fn title_key(role: SlotRole) -> &'static str {
    match role {
        SlotRole::Style => "slot-style-title",
        SlotRole::Content => "slot-content-title",
    }
}

/// Renders one slot: an upload area when empty, the preview with a clear
/// button when populated.
pub fn view<'a>(slot: &'a ImageSlot, preview: Option<&'a Handle>) -> Element<'a, Message> {
    let role = slot.role();

    let body: Element<'a, Message> = match slot.get() {
        Some(payload) => {
            let image: Element<'a, Message> = match preview {
                Some(handle) => Image::new(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fixed(sizing::SLOT_PREVIEW_HEIGHT))
                    .into(),
                None => Container::new(
                    Text::new(text::tr("preview-pending")).size(typography::CAPTION),
                )
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .height(Length::Fixed(sizing::SLOT_PREVIEW_HEIGHT))
                .into(),
            };

            let clear = Container::new(
                button(Text::new(text::tr("slot-clear")).size(typography::BODY))
                    .padding([spacing::XXS, spacing::XS])
                    .style(styles::button::overlay)
                    .on_press(Message::ClearImage(role)),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .padding(spacing::XS);

            let (width, height) = payload.dimensions();
            let caption = Row::new()
                .align_y(alignment::Vertical::Center)
                .push(Text::new(format!("{width} × {height}")).size(typography::CAPTION))
                .push(Space::new().width(Length::Fill))
                .push(
                    button(Text::new(text::tr("slot-upload")).size(typography::CAPTION))
                        .style(styles::button::secondary)
                        .on_press(Message::PickImage(role)),
                );

            Column::new()
                .spacing(spacing::XS)
                .push(Stack::new().push(image).push(clear))
                .push(caption)
                .into()
        }
        None => empty(role),
    };

    Container::new(
        Column::new()
            .spacing(spacing::SM)
            .push(Text::new(text::tr(title_key(role))).size(typography::TITLE_SM))
            .push(body),
    )
    .width(Length::FillPortion(1))
    .padding(spacing::MD)
    .style(styles::container::panel)
    .into()
}

fn empty<'a>(role: SlotRole) -> Element<'a, Message> {
    let content = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(
            button(Text::new(text::tr("slot-upload")))
                .padding([spacing::XS, spacing::LG])
                .style(styles::button::primary)
                .on_press(Message::PickImage(role)),
        )
        .push(Text::new(text::tr("slot-upload-hint")).size(typography::CAPTION));

    Container::new(content)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::SLOT_PREVIEW_HEIGHT))
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .style(styles::container::empty_slot)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_role_has_its_own_title() {
        assert_ne!(title_key(SlotRole::Style), title_key(SlotRole::Content));
        assert_ne!(text::tr(title_key(SlotRole::Style)), title_key(SlotRole::Style));
    }
}
