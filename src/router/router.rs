use super::events::RouterEvent;
use super::host::{Presentation, PresentationHost};
use crate::config::Settings;
use crate::errors::{NavError, Result};
use crate::routing::{EnvironmentObjects, Route, RouteResolver};
use crate::stack::{NavigationStack, PresentationStyle, ScreenHandle, StackId, StackRegistry};
use futures::future::join_all;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Multi-stack navigation state machine.
///
/// Commands never return errors: a command that cannot be carried out is
/// logged, broadcast as [`RouterEvent::CommandFailed`] and leaves the state
/// untouched. The `present*` commands report failure by returning `None`.
pub struct Router<R, H>
where
    R: RouteResolver,
    H: PresentationHost<R::Content>,
{
    registry: StackRegistry,
    resolver: R,
    host: H,
    environment: EnvironmentObjects,
    settings: Settings,
    events: broadcast::Sender<RouterEvent>,
}

impl<R, H> Router<R, H>
where
    R: RouteResolver,
    H: PresentationHost<R::Content>,
{
    pub fn new(resolver: R, host: H) -> Self {
        Self::with_settings(resolver, host, Settings::default())
    }

    pub fn with_settings(resolver: R, host: H, settings: Settings) -> Self {
        let (events, _) = broadcast::channel(settings.events.channel_capacity.max(1));
        Self {
            registry: StackRegistry::new(),
            resolver,
            host,
            environment: EnvironmentObjects::new(),
            settings,
            events,
        }
    }


    pub fn set_resolver(&mut self, resolver: R) {
        self.resolver = resolver;
    }

    /// Replace the shared environment objects wholesale
    pub fn set_environment_objects(&mut self, objects: EnvironmentObjects) {
        debug!("Environment objects set: {:?}", objects);
        self.environment = objects;
    }

    /// Show `route` as the root of the main stack, discarding its history
    pub async fn set_root(&mut self, route: Route) {
        let main = self.registry.main_stack_id();
        let result = self.try_navigate(route, Some(main), true).await;
        self.report("set_root", result);
    }


    pub fn main_stack_id(&self) -> StackId {
        self.registry.main_stack_id()
    }

    pub fn active_stack_id(&self) -> StackId {
        self.registry.active_stack_id()
    }

    pub fn stack(&self, stack_id: &StackId) -> Option<&NavigationStack> {
        self.registry.get(stack_id)
    }

    pub fn registry(&self) -> &StackRegistry {
        &self.registry
    }

    /// Stack ids in presentation order, main first
    pub fn stack_order(&self) -> Vec<StackId> {
        self.registry.order().values()
    }

    /// Screen types of a stack's history, root first (active stack when None)
    pub fn back_stack(&self, stack: Option<StackId>) -> Option<Vec<String>> {
        self.registry
            .get(&self.target(stack))
            .map(NavigationStack::back_stack)
    }

    pub fn environment(&self) -> &EnvironmentObjects {
        &self.environment
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RouterEvent> {
        self.events.subscribe()
    }


    /// Create an empty stack over the active one without presenting or activating it
    pub fn create_stack(&mut self) -> StackId {
        let stack_id = self.registry.create_stack();
        self.emit(RouterEvent::StackCreated {
            stack: stack_id,
            parent: Some(self.registry.active_stack_id()),
            style: PresentationStyle::Normal,
        });
        stack_id
    }

    pub fn set_active_stack(&mut self, stack_id: StackId) {
        let previous = self.registry.active_stack_id();
        let result = self.registry.set_active(stack_id);
        if result.is_ok() {
            self.note_active_change(previous);
        }
        self.report("set_active_stack", result);
    }


    /// Push `route` onto the active stack
    pub async fn navigate(&mut self, route: Route) {
        self.navigate_in(route, None, false).await;
    }

    /// Push `route` onto `stack`, or make it the new root when `clear_history` is set
    pub async fn navigate_in(&mut self, route: Route, stack: Option<StackId>, clear_history: bool) {
        let result = self.try_navigate(route, stack, clear_history).await;
        self.report("navigate", result);
    }

    /// Go back `steps` screens
    pub async fn pop(&mut self, stack: Option<StackId>, steps: usize) {
        let result = self.try_pop(stack, steps).await;
        self.report("pop", result);
    }

    /// Go back to the root screen of a stack
    pub async fn pop_to_root(&mut self, stack: Option<StackId>) {
        let result = self.try_pop_to_root(stack).await;
        self.report("pop_to_root", result);
    }

    /// Go back to the first screen (from the root) of the active stack tagged `screen_type`.
    ///
    /// When no such screen exists the active stack goes back a single step instead.
    pub async fn pop_to_screen(&mut self, screen_type: &str) {
        let target = self.registry.active_stack_id();
        let position = self
            .registry
            .get(&target)
            .and_then(|stack| stack.position_of(screen_type));

        match position {
            Some(index) => {
                let result = self.truncate_to(target, index + 1).await;
                self.report("pop_to_screen", result);
            }
            None => {
                self.report::<()>(
                    "pop_to_screen",
                    Err(NavError::not_found(format!(
                        "Screen {screen_type} not found in the navigation stack"
                    ))),
                );
                warn!("Falling back to a single-step pop");
                self.pop(Some(target), 1).await;
            }
        }
    }

    /// Same as [`pop_to_screen`](Self::pop_to_screen) using the route's path
    pub async fn pop_to_route(&mut self, route: &Route) {
        self.pop_to_screen(&route.path).await;
    }

    /// Go back to a specific mounted screen; fails if it is not in the stack
    pub async fn pop_to_entry(&mut self, stack: Option<StackId>, screen_id: Uuid) {
        let result = self.try_pop_to_entry(stack, screen_id).await;
        self.report("pop_to_entry", result);
    }


    /// Present `route` in a new stack over the active one
    pub async fn present(&mut self, route: Route, style: PresentationStyle) -> Option<StackId> {
        match self.try_present(route, style).await {
            Ok(stack_id) => Some(stack_id),
            Err(e) => {
                self.report::<()>("present", Err(e));
                None
            }
        }
    }

    pub async fn present_modal(&mut self, route: Route) -> Option<StackId> {
        self.present(route, PresentationStyle::Modal).await
    }

    pub async fn present_full_screen_cover(&mut self, route: Route) -> Option<StackId> {
        self.present(route, PresentationStyle::FullScreenCover).await
    }

    /// Present a bottom sheet; `height` defaults to the configured sheet height
    pub async fn present_bottom_sheet(
        &mut self,
        route: Route,
        height: Option<f64>,
    ) -> Option<StackId> {
        let height = height.unwrap_or(self.settings.presentation.default_sheet_height);
        if !height.is_finite() || height <= 0.0 {
            self.report::<()>(
                "present_bottom_sheet",
                Err(NavError::illegal(format!(
                    "Bottom sheet height must be positive, got {height}"
                ))),
            );
            return None;
        }
        self.present(route, PresentationStyle::BottomSheet { height })
            .await
    }

    /// Go back one screen, or close the stack's presentation when only its root is left
    pub async fn dismiss(&mut self, stack: Option<StackId>) {
        let result = self.try_dismiss(stack).await;
        self.report("dismiss", result);
    }

    /// Dismiss a presented stack and everything presented after it
    pub async fn dismiss_stack(&mut self, stack_id: StackId) {
        let result = self.try_dismiss_stack(stack_id).await;
        self.report("dismiss_stack", result);
    }

    /// Dismiss a stack only if it is a full-screen cover
    pub async fn dismiss_full_screen_cover(&mut self, stack: Option<StackId>) {
        let result = self.try_dismiss_full_screen_cover(stack).await;
        self.report("dismiss_full_screen_cover", result);
    }

    /// The host reports that a presented stack went away on its own (e.g. swipe down)
    pub async fn handle_external_dismissal(&mut self, stack_id: StackId) {
        if !self.registry.contains(&stack_id) {
            debug!(
                "Dismissal of stack {} already handled",
                stack_id.short()
            );
            return;
        }
        info!("Stack {} dismissed by the host", stack_id.short());
        let result = self.teardown(stack_id).await;
        self.report("handle_external_dismissal", result);
    }

    /// Dismiss every presented stack, then return the main stack to its root
    pub async fn pop_all_to_root(&mut self) {
        let main = self.registry.main_stack_id();
        let presented: Vec<StackId> = self
            .registry
            .order()
            .iter()
            .filter(|id| *id != main)
            .collect();

        if !presented.is_empty() {
            // Only the stack directly above main animates; the rest go with it
            let animated = self.settings.presentation.animated;
            let host = &self.host;
            join_all(
                presented
                    .iter()
                    .enumerate()
                    .map(|(index, id)| host.dismiss(*id, animated && index == 0)),
            )
            .await;
            info!("Dismissed {} presented stack(s)", presented.len());

            let previous = self.registry.active_stack_id();
            for stack_id in &presented {
                if !self.registry.contains(stack_id) {
                    continue;
                }
                match self.registry.remove(*stack_id) {
                    Ok(removed) => {
                        for stack in removed {
                            self.emit(RouterEvent::Dismissed { stack: stack.id });
                        }
                    }
                    Err(e) => self.report::<()>("pop_all_to_root", Err(e)),
                }
            }
            self.note_active_change(previous);
        }

        self.pop_to_root(Some(main)).await;
        self.set_active_stack(main);
    }


    fn target(&self, stack: Option<StackId>) -> StackId {
        stack.unwrap_or_else(|| self.registry.active_stack_id())
    }

    fn resolve(&mut self, route: &Route) -> Result<R::Content> {
        self.environment.merge(route.environment_objects());
        self.resolver
            .resolve(route, &self.environment)
            .ok_or_else(|| NavError::resolution(format!("No view found for route {}", route.path)))
    }

    async fn try_navigate(
        &mut self,
        route: Route,
        stack: Option<StackId>,
        clear_history: bool,
    ) -> Result<()> {
        let target = self.target(stack);
        self.registry.require(&target)?;

        let content = self.resolve(&route)?;
        let screen = ScreenHandle::new(route.path.clone());

        let stack = self.registry.require_mut(&target)?;
        if clear_history || stack.is_empty() {
            let replaced = stack.replace_root(screen.clone());
            debug!(
                "Stack {} root set to {} ({} screen(s) discarded)",
                target.short(),
                route.path,
                replaced.len()
            );
            self.host.set_root(target, &screen, content).await;
            self.emit(RouterEvent::RootReplaced {
                stack: target,
                screen_type: screen.screen_type,
            });
        } else {
            stack.push(screen.clone());
            debug!("Pushed {} onto stack {}", route.path, target.short());
            self.host
                .push(target, &screen, content, self.settings.navigation.animated)
                .await;
            self.emit(RouterEvent::ScreenPushed {
                stack: target,
                screen_type: screen.screen_type,
            });
        }
        Ok(())
    }

    async fn try_pop(&mut self, stack: Option<StackId>, steps: usize) -> Result<()> {
        let target = self.target(stack);
        let depth = self.registry.require(&target)?.depth();

        if steps >= depth {
            return Err(NavError::illegal(format!(
                "Unable to navigate back {steps} steps. Not enough screens in the stack."
            )));
        }

        self.truncate_to(target, depth - steps).await
    }

    async fn try_pop_to_root(&mut self, stack: Option<StackId>) -> Result<()> {
        let target = self.target(stack);
        let depth = self.registry.require(&target)?.depth();
        if depth <= 1 {
            return Ok(());
        }
        self.truncate_to(target, 1).await
    }

    async fn try_pop_to_entry(&mut self, stack: Option<StackId>, screen_id: Uuid) -> Result<()> {
        let target = self.target(stack);
        let index = self
            .registry
            .require(&target)?
            .position_of_screen(&screen_id)
            .ok_or_else(|| {
                NavError::not_found(format!(
                    "Screen {screen_id} not found in stack {}",
                    target.short()
                ))
            })?;
        self.truncate_to(target, index + 1).await
    }

    /// Keep the first `depth` screens of `target`
    async fn truncate_to(&mut self, target: StackId, depth: usize) -> Result<()> {
        let removed = self.registry.require_mut(&target)?.truncate(depth);
        if removed.is_empty() {
            return Ok(());
        }

        debug!(
            "Popped {} screen(s) from stack {}",
            removed.len(),
            target.short()
        );
        self.host
            .pop_to(target, depth, self.settings.navigation.animated)
            .await;
        self.emit(RouterEvent::Popped {
            stack: target,
            depth,
            removed: removed.len(),
        });
        Ok(())
    }

    async fn try_present(&mut self, route: Route, style: PresentationStyle) -> Result<StackId> {
        let parent = self.registry.active_stack_id();
        let content = self.resolve(&route)?;

        let stack_id = self.registry.create_stack_with_style(style.clone());
        let root = ScreenHandle::new(route.path.clone());
        self.registry.require_mut(&stack_id)?.push(root.clone());

        let presentation = Presentation {
            stack: stack_id,
            parent,
            style: style.clone(),
            root,
            content,
            animated: self.settings.presentation.animated,
        };
        if let Err(e) = self.host.present(presentation).await {
            if let Err(rollback) = self.registry.remove(stack_id) {
                error!(
                    "Failed to roll back stack {}: {}",
                    stack_id.short(),
                    rollback
                );
            }
            return Err(e);
        }

        self.emit(RouterEvent::StackCreated {
            stack: stack_id,
            parent: Some(parent),
            style: style.clone(),
        });
        self.registry.mark_presented(stack_id)?;
        self.registry.set_active(stack_id)?;
        info!(
            "Presented {} as {} stack {} over {}",
            route.path,
            style,
            stack_id.short(),
            parent.short()
        );
        self.emit(RouterEvent::Presented {
            stack: stack_id,
            parent,
            style,
        });
        self.note_active_change(parent);
        Ok(stack_id)
    }

    async fn try_dismiss(&mut self, stack: Option<StackId>) -> Result<()> {
        let target = self.target(stack);
        let depth = self.registry.require(&target)?.depth();

        if depth >= 2 {
            return self.try_pop(Some(target), 1).await;
        }
        self.try_dismiss_stack(target).await
    }

    async fn try_dismiss_stack(&mut self, stack_id: StackId) -> Result<()> {
        if stack_id == self.registry.main_stack_id() {
            return Err(NavError::illegal("Cannot dismiss the main stack"));
        }
        self.registry.require(&stack_id)?;

        self.host
            .dismiss(stack_id, self.settings.presentation.animated)
            .await;
        info!("Dismissed stack {}", stack_id.short());
        self.teardown(stack_id).await
    }

    async fn try_dismiss_full_screen_cover(&mut self, stack: Option<StackId>) -> Result<()> {
        let target = self.target(stack);
        let style = &self.registry.require(&target)?.style;
        if *style != PresentationStyle::FullScreenCover {
            return Err(NavError::illegal(format!(
                "Stack {} is a {} presentation, not a full-screen cover",
                target.short(),
                style
            )));
        }
        self.try_dismiss_stack(target).await
    }

    /// Remove a stack the host has already dismissed, plus everything presented after it
    async fn teardown(&mut self, stack_id: StackId) -> Result<()> {
        let previous = self.registry.active_stack_id();
        let removed = self.registry.remove(stack_id)?;

        for stack in removed.iter().filter(|stack| stack.id != stack_id) {
            debug!("Cascading dismissal to stack {}", stack.id.short());
            self.host.dismiss(stack.id, false).await;
        }
        for stack in &removed {
            self.emit(RouterEvent::Dismissed { stack: stack.id });
        }

        self.note_active_change(previous);
        Ok(())
    }

    fn note_active_change(&self, previous: StackId) {
        let current = self.registry.active_stack_id();
        if current != previous {
            self.emit(RouterEvent::ActiveChanged {
                from: previous,
                to: current,
            });
        }
    }

    fn emit(&self, event: RouterEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    fn report<T>(&self, operation: &'static str, result: Result<T>) {
        if let Err(e) = result {
            error!("{} failed: {}", operation, e);
            self.emit(RouterEvent::CommandFailed {
                operation,
                reason: e.to_string(),
            });
        }
    }
}
