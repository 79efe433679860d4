use super::order::StackOrder;
use super::resolver::ActiveStackResolver;
use super::stack::{NavigationStack, PresentationStyle, StackId};
use crate::errors::{NavError, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Owns every navigation stack and the order they were presented in
#[derive(Debug)]
pub struct StackRegistry {
    /// The root stack; never removed
    main_stack_id: StackId,
    /// Cached topmost stack
    active_stack_id: StackId,
    /// In-memory stack data
    stacks: HashMap<StackId, NavigationStack>,
    /// Chronological presentation order, main first
    order: StackOrder,
    /// Creation counter handed to new stacks
    next_sequence: u64,
}

impl StackRegistry {
    /// Create a registry holding only the main stack
    pub fn new() -> Self {
        let main_stack_id = StackId::new();
        let main = NavigationStack::new(main_stack_id, PresentationStyle::Normal, None, 0);

        let mut order = StackOrder::new();
        order.append(main_stack_id);

        Self {
            main_stack_id,
            active_stack_id: main_stack_id,
            stacks: HashMap::from([(main_stack_id, main)]),
            order,
            next_sequence: 1,
        }
    }

    pub fn main_stack_id(&self) -> StackId {
        self.main_stack_id
    }

    pub fn active_stack_id(&self) -> StackId {
        self.active_stack_id
    }

    /// Create an empty stack presented from the active stack, without activating it
    pub fn create_stack(&mut self) -> StackId {
        self.create_stack_with_style(PresentationStyle::Normal)
    }

    /// Create an empty stack with the given style, parented to the active stack
    pub fn create_stack_with_style(&mut self, style: PresentationStyle) -> StackId {
        let stack_id = StackId::new();
        let parent_id = self.active_stack_id;
        let stack = NavigationStack::new(stack_id, style, Some(parent_id), self.next_sequence);
        self.next_sequence += 1;

        debug!(
            "Created {} stack {} over {}",
            stack.style,
            stack_id.short(),
            parent_id.short()
        );
        self.stacks.insert(stack_id, stack);
        self.sync();

        stack_id
    }

    pub fn get(&self, stack_id: &StackId) -> Option<&NavigationStack> {
        self.stacks.get(stack_id)
    }

    pub fn get_mut(&mut self, stack_id: &StackId) -> Option<&mut NavigationStack> {
        self.stacks.get_mut(stack_id)
    }

    /// Look up a stack, treating a missing one as an error
    pub fn require(&self, stack_id: &StackId) -> Result<&NavigationStack> {
        self.stacks
            .get(stack_id)
            .ok_or_else(|| NavError::stack_not_found(stack_id))
    }

    pub fn require_mut(&mut self, stack_id: &StackId) -> Result<&mut NavigationStack> {
        self.stacks
            .get_mut(stack_id)
            .ok_or_else(|| NavError::stack_not_found(stack_id))
    }

    pub fn contains(&self, stack_id: &StackId) -> bool {
        self.stacks.contains_key(stack_id)
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Registered stack ids, in no particular order
    pub fn stack_ids(&self) -> Vec<StackId> {
        self.stacks.keys().copied().collect()
    }

    pub fn order(&self) -> &StackOrder {
        &self.order
    }

    /// Set the active stack and make sure it is part of the presentation order
    pub fn set_active(&mut self, stack_id: StackId) -> Result<()> {
        if !self.stacks.contains_key(&stack_id) {
            return Err(NavError::stack_not_found(stack_id));
        }

        self.active_stack_id = stack_id;
        self.order.append(stack_id);
        debug!("Active stack is now {}", stack_id.short());
        Ok(())
    }

    /// Record `child` as the stack currently presented over its parent
    pub fn mark_presented(&mut self, child: StackId) -> Result<()> {
        let parent_id = self
            .require(&child)?
            .parent_id
            .ok_or_else(|| NavError::illegal("The main stack cannot be presented"))?;

        self.require_mut(&parent_id)?.presented_child = Some(child);
        Ok(())
    }

    /// Remove a stack together with everything presented after it.
    ///
    /// Returns the removed stacks in presentation order.
    pub fn remove(&mut self, stack_id: StackId) -> Result<Vec<NavigationStack>> {
        if stack_id == self.main_stack_id {
            return Err(NavError::illegal("Cannot remove the main stack"));
        }
        if !self.stacks.contains_key(&stack_id) {
            return Err(NavError::stack_not_found(stack_id));
        }

        let mut cascade = self.order.remove_from(stack_id);
        if cascade.is_empty() {
            cascade.push(stack_id);
        }

        let mut removed: Vec<NavigationStack> = cascade
            .into_iter()
            .filter(|id| *id != self.main_stack_id)
            .filter_map(|id| self.stacks.remove(&id))
            .collect();
        removed.extend(self.sync());
        self.recompute_active();

        debug!(
            "Removed {} stack(s) starting at {}",
            removed.len(),
            stack_id.short()
        );
        Ok(removed)
    }

    /// Reconcile the presentation order and relationships with the registered stacks.
    ///
    /// Returns any stacks dropped because their parent is gone.
    pub fn sync(&mut self) -> Vec<NavigationStack> {
        let orphans = self.sweep_orphans();

        let live: HashSet<StackId> = self.stacks.keys().copied().collect();
        for stack in self.stacks.values_mut() {
            if stack.presented_child.is_some_and(|child| !live.contains(&child)) {
                stack.presented_child = None;
            }
        }

        loop {
            let stale = self.order.iter().find(|id| !live.contains(id));
            match stale {
                Some(stale) => {
                    self.order.remove_from(stale);
                }
                None => break,
            }
        }

        let mut missing: Vec<&NavigationStack> = self
            .stacks
            .values()
            .filter(|stack| !self.order.contains(stack.id))
            .collect();
        missing.sort_by_key(|stack| stack.sequence);
        let missing: Vec<StackId> = missing.into_iter().map(|stack| stack.id).collect();
        for id in missing {
            self.order.append(id);
        }

        if !self.stacks.contains_key(&self.active_stack_id) {
            self.recompute_active();
        }

        orphans
    }

    /// Recompute the active stack by walking the presentation chain
    pub fn recompute_active(&mut self) -> StackId {
        let resolved = ActiveStackResolver::resolve(self.main_stack_id, &self.stacks);
        if resolved != self.active_stack_id {
            debug!(
                "Active stack changed {} -> {}",
                self.active_stack_id.short(),
                resolved.short()
            );
        }
        self.active_stack_id = resolved;
        resolved
    }

    fn sweep_orphans(&mut self) -> Vec<NavigationStack> {
        let mut orphans = Vec::new();
        loop {
            let orphan_ids: Vec<StackId> = self
                .stacks
                .values()
                .filter(|stack| {
                    stack
                        .parent_id
                        .is_some_and(|parent| !self.stacks.contains_key(&parent))
                })
                .map(|stack| stack.id)
                .collect();
            if orphan_ids.is_empty() {
                break;
            }
            for id in orphan_ids {
                if let Some(stack) = self.stacks.remove(&id) {
                    tracing::warn!("Dropping stack {} whose parent is gone", id.short());
                    orphans.push(stack);
                }
            }
        }
        orphans.sort_by_key(|stack| stack.sequence);
        orphans
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
