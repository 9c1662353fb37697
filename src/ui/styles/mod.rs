// SPDX-License-Identifier: MPL-2.0
//! Centralized styles for the session window.

pub mod button;
pub mod container;
