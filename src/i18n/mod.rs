// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! Messages live in Fluent files under `assets/i18n/`, embedded at build
//! time. Widgets and notifications refer to text by message key.

pub mod fluent;
