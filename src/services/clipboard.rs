//! Clipboard sinks for the exported text tree.
//!
//! The system sink wraps `arboard` and is kept alive for the whole session:
//! on X11 the owner has to stay around to answer paste requests.

use crate::core::errors::{Error, Result};

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Keeps the last copied text in memory. Used when no system clipboard is
/// available and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

#[cfg(feature = "clipboard")]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    /// Connection is opened lazily on first copy.
    pub fn new() -> Self {
        Self { inner: None }
    }
}

#[cfg(feature = "clipboard")]
impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
            self.inner = Some(cb);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(Error::Clipboard("clipboard not initialized".into()));
        };
        if let Err(e) = clipboard.set_text(text) {
            tracing::debug!("arboard copy failed: {}, dropping connection", e);
            self.inner = None;
            return Err(Error::Clipboard(e.to_string()));
        }
        tracing::debug!("copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

/// The best sink this build offers.
pub fn default_sink() -> Box<dyn ClipboardSink> {
    #[cfg(feature = "clipboard")]
    {
        Box::new(SystemClipboard::new())
    }
    #[cfg(not(feature = "clipboard"))]
    {
        Box::new(UnavailableClipboard)
    }
}

/// Sink for builds without clipboard support; every copy fails.
#[cfg(not(feature = "clipboard"))]
pub struct UnavailableClipboard;

#[cfg(not(feature = "clipboard"))]
impl ClipboardSink for UnavailableClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(Error::Clipboard(
            "built without the `clipboard` feature".into(),
        ))
    }
}
