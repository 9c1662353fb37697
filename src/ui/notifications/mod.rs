// SPDX-License-Identifier: MPL-2.0
//! Toast notifications.
//!
//! Decode failures, download outcomes and persistence warnings are reported
//! as toasts in the bottom-right corner. Success and info toasts disappear
//! after 3s, warnings after 5s; errors stay until dismissed. At most three are
//! visible, the rest wait in a queue.
//!
//! ```ignore
//! let mut manager = Manager::new();
//! manager.push(Notification::success("notification-download-success").with_arg("file", name));
//! let overlay = Toast::view_overlay(&manager).map(Message::Notification);
//! ```

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, NotificationId, Severity};
pub use toast::Toast;
