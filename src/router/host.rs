use crate::errors::{NavError, Result};
use crate::stack::{PresentationStyle, ScreenHandle, StackId};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// A request to show a new stack over an existing one
#[derive(Debug)]
pub struct Presentation<C> {
    /// Newly created stack being presented
    pub stack: StackId,
    /// Stack it is presented over
    pub parent: StackId,
    pub style: PresentationStyle,
    /// Root screen of the new stack
    pub root: ScreenHandle,
    /// Resolved content of the root screen
    pub content: C,
    pub animated: bool,
}

/// The rendering layer: mounts and unmounts content on behalf of the router.
///
/// Calls complete once the corresponding transition has finished. When the user
/// dismisses a presented stack on their own (e.g. with a swipe), the host reports
/// it through [`Router::handle_external_dismissal`](crate::router::Router::handle_external_dismissal).
#[async_trait]
pub trait PresentationHost<C: Send + 'static>: Send + Sync {
    /// Mount `content` as a new screen on top of `stack`
    async fn push(&self, stack: StackId, screen: &ScreenHandle, content: C, animated: bool);

    /// Replace the whole history of `stack` with a single root screen
    async fn set_root(&self, stack: StackId, screen: &ScreenHandle, content: C);

    /// Unmount every screen of `stack` above the first `depth`
    async fn pop_to(&self, stack: StackId, depth: usize, animated: bool);

    /// Show a new stack; an error means nothing was presented
    async fn present(&self, presentation: Presentation<C>) -> Result<()>;

    /// Tear down a presented stack
    async fn dismiss(&self, stack: StackId, animated: bool);
}

/// A command received by [`HeadlessHost`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HostCommand {
    Push {
        stack: StackId,
        screen_type: String,
        content: String,
        animated: bool,
    },
    SetRoot {
        stack: StackId,
        screen_type: String,
        content: String,
    },
    PopTo {
        stack: StackId,
        depth: usize,
        animated: bool,
    },
    Present {
        stack: StackId,
        parent: StackId,
        style: PresentationStyle,
        screen_type: String,
        content: String,
    },
    Dismiss {
        stack: StackId,
        animated: bool,
    },
}

/// In-memory host that records every command instead of rendering
#[derive(Debug, Default)]
pub struct HeadlessHost {
    log: Mutex<Vec<HostCommand>>,
    refuse_presentations: AtomicBool,
    dismiss_delay: Option<Duration>,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate a dismissal animation of the given length
    pub fn with_dismiss_delay(mut self, delay: Duration) -> Self {
        self.dismiss_delay = Some(delay);
        self
    }

    /// Make subsequent `present` calls fail
    pub fn set_refuse_presentations(&self, refuse: bool) {
        self.refuse_presentations.store(refuse, Ordering::SeqCst);
    }

    /// Commands received so far
    pub fn commands(&self) -> Vec<HostCommand> {
        self.lock().clone()
    }

    /// Stacks dismissed so far, in completion order
    pub fn dismissed(&self) -> Vec<StackId> {
        self.lock()
            .iter()
            .filter_map(|command| match command {
                HostCommand::Dismiss { stack, .. } => Some(*stack),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, command: HostCommand) {
        tracing::debug!("host <- {:?}", command);
        self.lock().push(command);
    }

    fn lock(&self) -> MutexGuard<'_, Vec<HostCommand>> {
        self.log
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl<C: Debug + Send + 'static> PresentationHost<C> for HeadlessHost {
    async fn push(&self, stack: StackId, screen: &ScreenHandle, content: C, animated: bool) {
        self.record(HostCommand::Push {
            stack,
            screen_type: screen.screen_type.clone(),
            content: format!("{content:?}"),
            animated,
        });
    }

    async fn set_root(&self, stack: StackId, screen: &ScreenHandle, content: C) {
        self.record(HostCommand::SetRoot {
            stack,
            screen_type: screen.screen_type.clone(),
            content: format!("{content:?}"),
        });
    }

    async fn pop_to(&self, stack: StackId, depth: usize, animated: bool) {
        self.record(HostCommand::PopTo {
            stack,
            depth,
            animated,
        });
    }

    async fn present(&self, presentation: Presentation<C>) -> Result<()> {
        if self.refuse_presentations.load(Ordering::SeqCst) {
            return Err(NavError::presentation(format!(
                "Host refused to present {} stack {}",
                presentation.style,
                presentation.stack.short()
            )));
        }

        self.record(HostCommand::Present {
            stack: presentation.stack,
            parent: presentation.parent,
            style: presentation.style,
            screen_type: presentation.root.screen_type,
            content: format!("{:?}", presentation.content),
        });
        Ok(())
    }

    async fn dismiss(&self, stack: StackId, animated: bool) {
        if let Some(delay) = self.dismiss_delay.filter(|_| animated) {
            tokio::time::sleep(delay).await;
        }
        self.record(HostCommand::Dismiss { stack, animated });
    }
}
