// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": views borrow the session and emit
//! messages; the application update loop applies them.
//!
//! - [`studio`] - The session screen (slots, ratio bar, generate, result)
//! - [`notifications`] - Toast notifications
//! - [`widgets`] - Custom Iced widgets (spinner)
//! - [`styles`] - Button and container styles
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`text`] - User-facing strings

pub mod design_tokens;
pub mod notifications;
pub mod studio;
pub mod styles;
pub mod text;
pub mod widgets;
