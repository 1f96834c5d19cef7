//! The seam between the app and the embedding host.
//!
//! Everything the Telegram WebApp object provides (dialogs, payments,
//! identity, the startup parameter) sits behind this trait so the app logic
//! runs the same against the real bridge, a console shim, or a mock.

use async_trait::async_trait;

/// Terminal status reported by the host's native invoice UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Cancelled,
    Failed,
    Pending,
}

#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Signals the host that the app has rendered. Best effort.
    fn ready(&self) {}

    /// Asks the host to expand the app to full height. Best effort.
    fn expand(&self) {}

    /// Applies the given header color. Best effort.
    fn set_header_color(&self, _color: &str) {}

    /// The host theme's background color, if it exposes one.
    fn theme_bg_color(&self) -> Option<String> {
        None
    }

    /// The authenticated user's id, if the host supplies one.
    fn user_id(&self) -> Option<i64>;

    /// The opaque startup (deep-link) parameter, if any.
    fn start_param(&self) -> Option<String>;

    /// Shows a blocking alert dialog.
    fn show_alert(&self, message: &str);

    /// Shows a confirm dialog and resolves to the user's choice.
    async fn show_confirm(&self, message: &str) -> bool;

    /// Opens the host's native invoice UI and resolves once it closes.
    async fn open_invoice(&self, url: &str) -> InvoiceStatus;

    /// Opens a `t.me` link through the host.
    fn open_telegram_link(&self, url: &str);

    /// Toggles the host's busy/progress indicator.
    fn show_progress(&self);
    fn hide_progress(&self);
}
