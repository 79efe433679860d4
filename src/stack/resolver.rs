use super::stack::{NavigationStack, StackId};
use std::collections::{HashMap, HashSet};

/// Finds the topmost stack in the presentation chain.
///
/// The walk starts at the main stack and follows each stack's presented child
/// until it reaches a stack with nothing live presented on top of it.
pub struct ActiveStackResolver;

impl ActiveStackResolver {
    pub fn resolve(main_id: StackId, stacks: &HashMap<StackId, NavigationStack>) -> StackId {
        let Some(mut current) = stacks.get(&main_id) else {
            tracing::warn!("Main stack missing from registry, falling back to main id");
            return main_id;
        };

        let mut visited = HashSet::from([main_id]);
        while let Some(child) = current
            .presented_child
            .and_then(|child_id| stacks.get(&child_id))
        {
            if !visited.insert(child.id) {
                tracing::warn!(
                    "Presentation chain loops back to stack {}, falling back to main",
                    child.id.short()
                );
                return main_id;
            }
            current = child;
        }

        current.id
    }
}
