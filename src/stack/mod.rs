//! Navigation stack state
//!
//! This module implements the bookkeeping behind multi-stack navigation:
//! - Stack data structures and screen history
//! - Presentation order used for cascading teardown
//! - The registry that owns every stack
//! - Active-stack resolution over the presentation chain

pub mod order;
pub mod registry;
pub mod resolver;
pub mod stack;

pub use order::StackOrder;
pub use registry::StackRegistry;
pub use resolver::ActiveStackResolver;
pub use stack::{NavigationStack, PresentationStyle, ScreenHandle, StackId};
