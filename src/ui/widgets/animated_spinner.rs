// SPDX-License-Identifier: MPL-2.0
//! Busy indicator shown while a generation is running.

use crate::ui::design_tokens::sizing;
use iced::widget::canvas::{self, path::Arc, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Radians, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// One full turn per this many milliseconds.
const PERIOD_MS: u128 = 1200;

/// A half-circle arc rotating around a faint track.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedSpinner {
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    /// Spinner whose angle is derived from the time spent running.
    #[must_use]
    pub fn new(color: Color, elapsed: Duration) -> Self {
        Self {
            rotation: rotation_for(elapsed),
            color,
            size: sizing::SPINNER,
        }
    }

    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }
}

/// Rotation angle in radians, wrapping every `PERIOD_MS`.
fn rotation_for(elapsed: Duration) -> f32 {
    let phase = elapsed.as_millis() % PERIOD_MS;
    #[allow(clippy::cast_precision_loss)]
    let fraction = phase as f32 / PERIOD_MS as f32;
    fraction * TAU
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let center = frame.center();
        let radius = frame.width().min(frame.height()) / 2.0 - 4.0;

        frame.stroke(
            &Path::circle(center, radius),
            Stroke::default().with_width(3.0).with_color(Color {
                a: 0.25,
                ..self.color
            }),
        );

        let start_angle = self.rotation - PI / 2.0;
        let arc = Path::new(|builder| {
            builder.arc(Arc {
                center,
                radius,
                start_angle: Radians(start_angle),
                end_angle: Radians(start_angle + PI),
            });
        });
        frame.stroke(
            &arc,
            Stroke::default()
                .with_width(3.0)
                .with_color(self.color)
                .with_line_cap(canvas::LineCap::Round),
        );

        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_each_period() {
        assert_eq!(rotation_for(Duration::ZERO), 0.0);
        assert_eq!(rotation_for(Duration::from_millis(1200)), 0.0);
        let quarter = rotation_for(Duration::from_millis(300));
        assert!((quarter - TAU / 4.0).abs() < 1e-4);
    }

    #[test]
    fn spinner_builds_a_canvas_element() {
        let spinner = AnimatedSpinner::new(Color::WHITE, Duration::from_millis(600));
        assert!((spinner.rotation - PI).abs() < 1e-4);
        let _element: iced::Element<'static, ()> = spinner.into_element();
    }
}
