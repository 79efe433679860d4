//! The public navigation state machine
//!
//! - `Router`: directs navigation, presentation and dismissal at the right stack
//! - `PresentationHost`: the rendering layer the router drives
//! - `RouterEvent`: lifecycle notifications for observers

pub mod events;
pub mod host;
pub mod router;

pub use events::RouterEvent;
pub use host::{HeadlessHost, HostCommand, Presentation, PresentationHost};
pub use router::Router;
