//! Hover inspector for annotated pages
//!
//! While the modifier key is held, moving the pointer highlights the element
//! underneath and shows a tooltip with its attribution. Modifier + secondary
//! click copies the same information to the clipboard.
//!
//! The inspector is driven by [`InputEvent`]s and owns the page's [`Dom`];
//! persistence and clipboard access are injected through the [`Storage`] and
//! [`Clipboard`] traits.
//!
//! [`Dom`]: crate::dom::Dom

mod clipboard;
mod copy;
mod event;
mod inspector;
mod page;
mod state;
mod storage;
mod tooltip;

pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, NoClipboardApi};
pub use copy::{copy_text, scrub_class};
pub use event::{EventSource, InputEvent, Key};
pub use inspector::{CopyMethod, CopyReport, EventOutcome, Inspector, Status};
pub use page::Page;
pub use state::InspectorState;
pub use storage::{JsonFileStorage, MemoryStorage, Storage};
pub use tooltip::{place_tooltip, TooltipView, Viewport};

/// Class added to the element under inspection
pub const HIGHLIGHT_CLASS: &str = "srcspot-highlight";

/// Class of the floating tooltip element
pub const TOOLTIP_CLASS: &str = "srcspot-tooltip";

/// Class of the transient copy acknowledgment
pub const ACK_CLASS: &str = "srcspot-copied";

/// Text shown in the copy acknowledgment
pub const ACK_TEXT: &str = "✓ Copied";
