//! Replaying navigation scripts.
//!
//! A script is a JSON array of steps. Presented stacks can be given an alias
//! with `"as"` and referred to later with `"stack"`; `"main"` always names the
//! main stack.
//!
//! ```json
//! [
//!   { "op": "set_root", "path": "/home" },
//!   { "op": "present", "path": "/compose", "style": "modal", "as": "compose" },
//!   { "op": "navigate", "path": "/compose/attach" },
//!   { "op": "dismiss", "stack": "compose" },
//!   { "op": "pop_all_to_root" }
//! ]
//! ```

use crate::errors::{NavError, Result};
use crate::router::{PresentationHost, Router};
use crate::routing::{Route, RouteResolver};
use crate::stack::{PresentationStyle, StackId};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const MAIN_ALIAS: &str = "main";

/// How a `present` step shows its stack
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStyle {
    Modal,
    FullScreenCover,
    BottomSheet,
    Custom(String),
}

/// A single scripted command
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    SetRoot {
        path: String,
    },
    Navigate {
        path: String,
        #[serde(default)]
        stack: Option<String>,
        #[serde(default)]
        clear_history: bool,
        #[serde(default)]
        parameters: Option<serde_json::Value>,
    },
    Pop {
        #[serde(default)]
        stack: Option<String>,
        #[serde(default = "default_steps")]
        steps: usize,
    },
    PopToRoot {
        #[serde(default)]
        stack: Option<String>,
    },
    PopToScreen {
        screen: String,
    },
    Present {
        path: String,
        style: ScriptStyle,
        #[serde(default)]
        height: Option<f64>,
        #[serde(default, rename = "as")]
        alias: Option<String>,
    },
    Dismiss {
        #[serde(default)]
        stack: Option<String>,
    },
    DismissFullScreenCover {
        #[serde(default)]
        stack: Option<String>,
    },
    /// Simulates the user swiping a presentation away
    ExternalDismiss {
        stack: String,
    },
    PopAllToRoot,
}

fn default_steps() -> usize {
    1
}

/// Parse a script from JSON text
pub fn parse_script(content: &str) -> Result<Vec<ScriptStep>> {
    let steps: Vec<ScriptStep> = serde_json::from_str(content)
        .map_err(|e| NavError::config(format!("Failed to parse navigation script: {e}")))?;
    Ok(steps)
}

/// Read and parse a script file
pub fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)?;
    parse_script(&content)
}

/// Drives a router through script steps, keeping track of stack aliases
pub struct ScriptRunner {
    aliases: HashMap<String, StackId>,
}

impl ScriptRunner {
    pub fn new(main: StackId) -> Self {
        Self {
            aliases: HashMap::from([(MAIN_ALIAS.to_string(), main)]),
        }
    }

    /// Alias of a stack id, if the script named it
    pub fn alias_of(&self, stack_id: &StackId) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, id)| *id == stack_id)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn stack(&self, alias: &str) -> Option<StackId> {
        self.aliases.get(alias).copied()
    }

    /// Run every step in order; unknown aliases abort the script
    pub async fn run<R, H>(&mut self, router: &mut Router<R, H>, steps: &[ScriptStep]) -> Result<()>
    where
        R: RouteResolver,
        H: PresentationHost<R::Content>,
    {
        for (index, step) in steps.iter().enumerate() {
            tracing::debug!("step {}: {:?}", index + 1, step);
            self.apply(router, step).await?;
        }
        Ok(())
    }

    async fn apply<R, H>(&mut self, router: &mut Router<R, H>, step: &ScriptStep) -> Result<()>
    where
        R: RouteResolver,
        H: PresentationHost<R::Content>,
    {
        match step {
            ScriptStep::SetRoot { path } => router.set_root(Route::new(path.as_str())).await,
            ScriptStep::Navigate {
                path,
                stack,
                clear_history,
                parameters,
            } => {
                let mut route = Route::new(path.as_str());
                route.parameters = parameters.clone();
                let stack = self.lookup(stack.as_deref())?;
                router.navigate_in(route, stack, *clear_history).await;
            }
            ScriptStep::Pop { stack, steps } => {
                let stack = self.lookup(stack.as_deref())?;
                router.pop(stack, *steps).await;
            }
            ScriptStep::PopToRoot { stack } => {
                let stack = self.lookup(stack.as_deref())?;
                router.pop_to_root(stack).await;
            }
            ScriptStep::PopToScreen { screen } => router.pop_to_screen(screen).await,
            ScriptStep::Present {
                path,
                style,
                height,
                alias,
            } => {
                let route = Route::new(path.as_str());
                let presented = match style {
                    ScriptStyle::Modal => router.present_modal(route).await,
                    ScriptStyle::FullScreenCover => router.present_full_screen_cover(route).await,
                    ScriptStyle::BottomSheet => router.present_bottom_sheet(route, *height).await,
                    ScriptStyle::Custom(name) => {
                        router
                            .present(route, PresentationStyle::Custom { name: name.clone() })
                            .await
                    }
                };
                if let (Some(stack_id), Some(alias)) = (presented, alias) {
                    self.aliases.insert(alias.clone(), stack_id);
                }
            }
            ScriptStep::Dismiss { stack } => {
                let stack = self.lookup(stack.as_deref())?;
                router.dismiss(stack).await;
            }
            ScriptStep::DismissFullScreenCover { stack } => {
                let stack = self.lookup(stack.as_deref())?;
                router.dismiss_full_screen_cover(stack).await;
            }
            ScriptStep::ExternalDismiss { stack } => {
                let stack_id = self
                    .lookup(Some(stack))?
                    .ok_or_else(|| NavError::not_found(format!("Unknown stack alias '{stack}'")))?;
                router.handle_external_dismissal(stack_id).await;
            }
            ScriptStep::PopAllToRoot => router.pop_all_to_root().await,
        }
        Ok(())
    }

    fn lookup(&self, alias: Option<&str>) -> Result<Option<StackId>> {
        match alias {
            None => Ok(None),
            Some(alias) => self
                .stack(alias)
                .map(Some)
                .ok_or_else(|| NavError::not_found(format!("Unknown stack alias '{alias}'"))),
        }
    }
}
