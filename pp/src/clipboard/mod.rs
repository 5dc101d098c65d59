//! Copy-to-clipboard
//!
//! [`CopyAction`] is what the UI calls. It talks to a [`Clipboard`], which in
//! the binary is a [`CommandClipboard`] shelling out to the platform tool.

mod action;
mod command;
mod error;

pub use action::CopyAction;
pub use command::CommandClipboard;
pub use error::ClipboardError;

use async_trait::async_trait;

/// Something that can receive copied text
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Replace the clipboard contents with `text`
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
