//! Copy action with a transient "copied" indicator

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, error, info};

use super::Clipboard;

#[derive(Debug, Default)]
struct Indicator {
    copied: bool,
    /// Bumped on every successful copy so stale timers leave newer state alone
    epoch: u64,
}

/// Copies text and flips an indicator on for a short time afterwards
#[derive(Clone)]
pub struct CopyAction {
    clipboard: Arc<dyn Clipboard>,
    feedback: Duration,
    indicator: Arc<Mutex<Indicator>>,
}

impl CopyAction {
    pub fn new(clipboard: Arc<dyn Clipboard>, feedback: Duration) -> Self {
        Self {
            clipboard,
            feedback,
            indicator: Arc::new(Mutex::new(Indicator::default())),
        }
    }

    /// Write text to the clipboard
    ///
    /// Returns whether the write succeeded. Failures are logged only; callers
    /// are not expected to surface them.
    pub async fn copy(&self, text: &str) -> bool {
        debug!(clipboard = self.clipboard.name(), text_len = text.len(), "CopyAction::copy: called");
        if let Err(e) = self.clipboard.write_text(text).await {
            error!(clipboard = self.clipboard.name(), error = %e, "Failed to copy text");
            return false;
        }

        let epoch = match self.indicator.lock() {
            Ok(mut state) => {
                state.epoch += 1;
                state.copied = true;
                state.epoch
            }
            Err(_) => {
                error!("Copy indicator lock poisoned");
                return true;
            }
        };

        let indicator = Arc::clone(&self.indicator);
        let feedback = self.feedback;
        tokio::spawn(async move {
            tokio::time::sleep(feedback).await;
            if let Ok(mut state) = indicator.lock()
                && state.epoch == epoch
            {
                state.copied = false;
            }
        });

        info!(text_len = text.len(), "Copied prompt to clipboard");
        true
    }

    /// Whether the indicator is currently on
    pub fn is_copied(&self) -> bool {
        self.indicator.lock().map(|state| state.copied).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::ClipboardError;
    use async_trait::async_trait;

    #[derive(Default)]
    struct MemoryClipboard {
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for MemoryClipboard {
        fn name(&self) -> &str {
            "memory"
        }

        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct BrokenClipboard;

    #[async_trait]
    impl Clipboard for BrokenClipboard {
        fn name(&self) -> &str {
            "broken"
        }

        async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::NoBackend {
                tried: "nothing".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_copy_sets_then_clears_indicator() {
        let memory = Arc::new(MemoryClipboard::default());
        let action = CopyAction::new(memory.clone(), Duration::from_millis(50));

        assert!(!action.is_copied());
        assert!(action.copy("prompt text").await);
        assert!(action.is_copied());
        assert_eq!(*memory.writes.lock().unwrap(), vec!["prompt text".to_string()]);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!action.is_copied());
    }

    #[tokio::test]
    async fn test_newer_copy_outlives_older_timer() {
        let action = CopyAction::new(Arc::new(MemoryClipboard::default()), Duration::from_millis(150));

        assert!(action.copy("first").await);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(action.copy("second").await);

        // First timer fires here; second copy is still within its window
        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(action.is_copied());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!action.is_copied());
    }

    #[tokio::test]
    async fn test_failure_is_silent() {
        let action = CopyAction::new(Arc::new(BrokenClipboard), Duration::from_millis(50));
        assert!(!action.copy("prompt").await);
        assert!(!action.is_copied());
    }
}
