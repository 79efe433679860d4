use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier of a navigation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackId(Uuid);

impl StackId {
    /// Allocate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// First eight characters, for log lines and CLI output
    pub fn short(&self) -> String {
        self.0.to_string()[..8].to_string()
    }
}

impl Default for StackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for StackId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// How a stack is shown relative to the stack that presented it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PresentationStyle {
    /// The main stack, or a stack that is not presented over anything
    #[default]
    Normal,
    /// Page sheet that can be swiped away
    Modal,
    /// Covers the whole screen; only dismissed programmatically
    FullScreenCover,
    /// Sheet anchored to the bottom edge with a fixed height in points
    BottomSheet { height: f64 },
    /// Host-defined presentation identified by name
    Custom { name: String },
}

impl PresentationStyle {
    pub fn is_presented(&self) -> bool {
        !matches!(self, PresentationStyle::Normal)
    }

    pub fn label(&self) -> &str {
        match self {
            PresentationStyle::Normal => "normal",
            PresentationStyle::Modal => "modal",
            PresentationStyle::FullScreenCover => "full-screen-cover",
            PresentationStyle::BottomSheet { .. } => "bottom-sheet",
            PresentationStyle::Custom { name } => name,
        }
    }
}

impl fmt::Display for PresentationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A mounted screen inside a stack's history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenHandle {
    /// Unique identifier for this screen instance
    pub id: Uuid,
    /// Route path the screen was built from
    pub screen_type: String,
    /// When the screen was mounted
    pub mounted_at: DateTime<Utc>,
}

impl ScreenHandle {
    pub fn new(screen_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            screen_type: screen_type.into(),
            mounted_at: Utc::now(),
        }
    }
}

/// One independent back-stack of screens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Unique identifier for this stack
    pub id: StackId,
    /// Screen history, root first and topmost last
    pub entries: Vec<ScreenHandle>,
    /// How this stack is presented
    pub style: PresentationStyle,
    /// Stack that presented this one (None only for the main stack)
    pub parent_id: Option<StackId>,
    /// Stack currently presented on top of this one
    pub presented_child: Option<StackId>,
    /// Creation counter, used to keep presentation order deterministic
    pub sequence: u64,
    /// When this stack was created
    pub created_at: DateTime<Utc>,
    /// When this stack was last updated
    pub updated_at: DateTime<Utc>,
}

impl NavigationStack {
    /// Create a new empty stack
    pub fn new(
        id: StackId,
        style: PresentationStyle,
        parent_id: Option<StackId>,
        sequence: u64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            entries: Vec::new(),
            style,
            parent_id,
            presented_child: None,
            sequence,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_main(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Push a screen on top of the history
    pub fn push(&mut self, screen: ScreenHandle) -> Uuid {
        let id = screen.id;
        self.entries.push(screen);
        self.updated_at = Utc::now();
        id
    }

    /// Replace the whole history with a single root screen
    pub fn replace_root(&mut self, screen: ScreenHandle) -> Vec<ScreenHandle> {
        let removed = std::mem::replace(&mut self.entries, vec![screen]);
        self.updated_at = Utc::now();
        removed
    }

    /// Keep the first `depth` entries and return the popped ones, topmost last
    pub fn truncate(&mut self, depth: usize) -> Vec<ScreenHandle> {
        if depth >= self.entries.len() {
            return Vec::new();
        }
        let removed = self.entries.split_off(depth);
        self.updated_at = Utc::now();
        removed
    }

    /// Index of the first entry (from the root) with the given screen type
    pub fn position_of(&self, screen_type: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.screen_type == screen_type)
    }

    /// Index of the entry with the given screen id
    pub fn position_of_screen(&self, screen_id: &Uuid) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == screen_id)
    }

    pub fn root(&self) -> Option<&ScreenHandle> {
        self.entries.first()
    }

    pub fn top(&self) -> Option<&ScreenHandle> {
        self.entries.last()
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Screen types of the history, root first
    pub fn back_stack(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.screen_type.clone())
            .collect()
    }
}
