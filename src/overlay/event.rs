use serde::{Deserialize, Serialize};

/// Keyboard key relevant to the inspector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    Control,
    Shift,
    Alt,
    Meta,
    #[serde(other)]
    Other,
}

/// Input delivered to the inspector
///
/// Coordinates are viewport pixels. `Tick` advances the inspector's clock,
/// which only drives acknowledgment expiry. `Toggle` sets (or, without a
/// value, flips) the persisted enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    KeyDown { key: Key },
    KeyUp { key: Key },
    PointerMove { x: i32, y: i32 },
    ContextMenu { x: i32, y: i32 },
    Blur,
    Tick { now_ms: u64 },
    Toggle {
        #[serde(default)]
        value: Option<bool>,
    },
}

/// Source of input events, drained one at a time
pub trait EventSource {
    fn next_event(&mut self) -> Option<InputEvent>;
}

impl<I> EventSource for I
where
    I: Iterator<Item = InputEvent>,
{
    fn next_event(&mut self) -> Option<InputEvent> {
        self.next()
    }
}
