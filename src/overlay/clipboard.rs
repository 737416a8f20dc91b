//! Clipboard access for the copy action
//!
//! Two paths, mirroring what a browser offers: the asynchronous clipboard
//! API ([`Clipboard::write_text`]) and the legacy copy command, which copies
//! whatever text is currently selected ([`Clipboard::copy_selection`]).

use thiserror::Error;

/// Why a clipboard write failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard API unavailable in this context")]
    Unavailable,

    #[error("clipboard permission denied")]
    PermissionDenied,

    #[error("copy command failed: {0}")]
    CommandFailed(String),
}

/// System clipboard
pub trait Clipboard {
    /// Write through the clipboard API
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    /// Copy the current selection through the legacy copy command
    fn copy_selection(&mut self, selection: &str) -> Result<(), ClipboardError>;
}

/// In-memory clipboard that records what was copied and how
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    api_writes: usize,
    legacy_copies: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last copied text
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn api_writes(&self) -> usize {
        self.api_writes
    }

    pub fn legacy_copies(&self) -> usize {
        self.legacy_copies
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.api_writes += 1;
        Ok(())
    }

    fn copy_selection(&mut self, selection: &str) -> Result<(), ClipboardError> {
        self.contents = Some(selection.to_string());
        self.legacy_copies += 1;
        Ok(())
    }
}

/// Clipboard whose API is unavailable (insecure context, old engine)
///
/// Only the legacy copy command works, unless built with [`NoClipboardApi::broken`].
#[derive(Debug, Clone, Default)]
pub struct NoClipboardApi {
    inner: MemoryClipboard,
    legacy_disabled: bool,
}

impl NoClipboardApi {
    /// Clipboard API missing, legacy copy command working
    pub fn new() -> Self {
        Self::default()
    }

    /// Neither path works
    pub fn broken() -> Self {
        Self {
            inner: MemoryClipboard::default(),
            legacy_disabled: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.inner.contents()
    }

    pub fn legacy_copies(&self) -> usize {
        self.inner.legacy_copies()
    }
}

impl Clipboard for NoClipboardApi {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    fn copy_selection(&mut self, selection: &str) -> Result<(), ClipboardError> {
        if self.legacy_disabled {
            return Err(ClipboardError::CommandFailed("copy not supported".into()));
        }
        self.inner.copy_selection(selection)
    }
}
