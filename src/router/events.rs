use crate::stack::{PresentationStyle, StackId};
use serde::Serialize;

/// Lifecycle notifications broadcast by the router
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouterEvent {
    StackCreated {
        stack: StackId,
        parent: Option<StackId>,
        style: PresentationStyle,
    },
    ScreenPushed {
        stack: StackId,
        screen_type: String,
    },
    RootReplaced {
        stack: StackId,
        screen_type: String,
    },
    Popped {
        stack: StackId,
        depth: usize,
        removed: usize,
    },
    Presented {
        stack: StackId,
        parent: StackId,
        style: PresentationStyle,
    },
    Dismissed {
        stack: StackId,
    },
    ActiveChanged {
        from: StackId,
        to: StackId,
    },
    /// A command could not be carried out and changed nothing.
    ///
    /// Some commands follow up with a fallback (`pop_to_screen` pops a single
    /// step); the fallback reports its own events after this one.
    CommandFailed {
        operation: &'static str,
        reason: String,
    },
}

impl RouterEvent {
    pub fn is_failure(&self) -> bool {
        matches!(self, RouterEvent::CommandFailed { .. })
    }
}
