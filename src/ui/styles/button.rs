// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius, shadow,
};
use iced::widget::button;
use iced::{Background, Border, Color, Theme};

fn brand_border(color: Color, rad: f32) -> Border {
    Border {
        color,
        width: 1.0,
        radius: rad.into(),
    }
}

/// Main call to action (Generate, Download).
///
/// Disabled buttons are flattened to gray so the enabled state stays obvious
/// in both themes.
pub fn primary(theme: &Theme, status: button::Status) -> button::Style {
    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(palette::PRIMARY_500)),
            text_color: WHITE,
            border: brand_border(palette::PRIMARY_600, radius::SM),
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(palette::PRIMARY_400)),
            text_color: WHITE,
            border: brand_border(palette::PRIMARY_500, radius::SM),
            shadow: shadow::MD,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(if is_light(theme) {
                palette::GRAY_200
            } else {
                palette::GRAY_700
            })),
            text_color: palette::GRAY_400,
            border: brand_border(palette::GRAY_400, radius::SM),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Secondary actions (New Style, Cancel, Choose image).
pub fn secondary(theme: &Theme, status: button::Status) -> button::Style {
    let (bg_color, text_color) = if is_light(theme) {
        (palette::GRAY_100, palette::GRAY_900)
    } else {
        (palette::GRAY_700, WHITE)
    };

    match status {
        button::Status::Active | button::Status::Pressed => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color,
            border: brand_border(palette::GRAY_400, radius::SM),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: Some(Background::Color(if is_light(theme) {
                palette::GRAY_200
            } else {
                Color::from_rgb(0.35, 0.35, 0.35)
            })),
            text_color,
            border: brand_border(palette::PRIMARY_500, radius::SM),
            shadow: shadow::SM,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: Some(Background::Color(bg_color)),
            text_color: palette::GRAY_400,
            border: brand_border(palette::GRAY_400, radius::SM),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}

/// Ratio bar chip; the current ratio is filled with the brand color.
pub fn ratio_chip(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |theme: &Theme, status: button::Status| {
        let base = if selected {
            primary(theme, status)
        } else {
            secondary(theme, status)
        };
        button::Style {
            border: Border {
                radius: radius::FULL.into(),
                ..base.border
            },
            ..base
        }
    }
}

/// Round translucent button laid over an image (slot clear ×).
pub fn overlay(_theme: &Theme, status: button::Status) -> button::Style {
    let alpha = match status {
        button::Status::Hovered | button::Status::Pressed => opacity::OVERLAY_STRONG,
        _ => opacity::OVERLAY_MEDIUM,
    };

    button::Style {
        background: Some(Background::Color(Color { a: alpha, ..BLACK })),
        text_color: WHITE,
        border: Border {
            radius: radius::FULL.into(),
            ..Default::default()
        },
        shadow: shadow::SM,
        snap: true,
    }
}

fn is_light(theme: &Theme) -> bool {
    let bg = theme.palette().background;
    (bg.r + bg.g + bg.b) / 3.0 >= 0.5
}
