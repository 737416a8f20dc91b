use crate::dom::NodeId;
use serde::Serialize;

/// Inspector input state
///
/// `Idle` until the modifier goes down, `Armed` while it is held, and
/// `Inspecting` once the pointer has moved over an element while armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InspectorState {
    #[default]
    Idle,
    Armed,
    Inspecting {
        #[serde(skip)]
        element: NodeId,
    },
}

impl InspectorState {
    /// Modifier currently held
    pub fn is_armed(&self) -> bool {
        !matches!(self, InspectorState::Idle)
    }

    /// Element under inspection, if any
    pub fn element(&self) -> Option<NodeId> {
        match self {
            InspectorState::Inspecting { element } => Some(*element),
            _ => None,
        }
    }
}
