// SPDX-License-Identifier: MPL-2.0
use super::Message;
use crate::domain::generation::AspectRatio;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use crate::ui::text;
use iced::widget::{button, Column, Row, Text};
use iced::{Element, Length};

/// The five ratios in order; the current one is highlighted.
pub fn view<'a>(current: AspectRatio) -> Element<'a, Message> {
    let chips = AspectRatio::ALL.into_iter().fold(
        Row::new().spacing(spacing::XS),
        |row, ratio| {
            row.push(
                button(Text::new(ratio.label()).size(typography::BODY))
                    .padding([spacing::XS, spacing::MD])
                    .style(styles::button::ratio_chip(ratio == current))
                    .on_press(Message::SelectRatio(ratio)),
            )
        },
    );

    Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .push(Text::new(text::tr("ratio-title")).size(typography::TITLE_SM))
        .push(chips)
        .into()
}
