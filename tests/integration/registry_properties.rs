use navstack::stack::{PresentationStyle, StackId, StackOrder, StackRegistry};
use navstack::NavError;

fn assert_consistent(registry: &StackRegistry) {
    let mut ordered = registry.order().values();
    let mut keys = registry.stack_ids();
    ordered.sort();
    keys.sort();
    assert_eq!(ordered, keys);
    assert!(registry.contains(&registry.active_stack_id()));
}

#[test]
fn test_remove_from_truncates_every_later_value() {
    let ids: Vec<StackId> = (0..6).map(|_| StackId::new()).collect();
    let mut order = StackOrder::new();
    for id in &ids {
        order.append(*id);
    }

    for cut in (1..ids.len()).rev() {
        let removed = order.remove_from(ids[cut]);
        assert_eq!(removed, ids[cut..].to_vec());
        assert_eq!(order.values(), ids[..cut].to_vec());
        for id in &ids[..cut] {
            order.append(*id);
        }
        for id in &ids[cut..] {
            order.append(*id);
        }
    }
}

#[test]
fn test_remove_from_absent_value_keeps_order() {
    let mut order = StackOrder::new();
    let first = StackId::new();
    order.append(first);

    assert!(order.remove_from(StackId::new()).is_empty());
    assert_eq!(order.values(), vec![first]);
}

#[test]
fn test_strict_append_rejects_duplicates() {
    let mut order = StackOrder::new();
    let id = StackId::new();
    order.try_append(id).unwrap();

    let result = order.try_append(id);
    assert!(matches!(result, Err(NavError::InvariantViolation(_))));
    assert_eq!(order.len(), 1);
}

#[test]
fn test_main_stack_survives_removal_attempts() {
    let mut registry = StackRegistry::new();
    let main = registry.main_stack_id();
    let child = registry.create_stack_with_style(PresentationStyle::Modal);
    registry.set_active(child).unwrap();

    assert!(matches!(
        registry.remove(main),
        Err(NavError::IllegalOperation(_))
    ));
    assert_eq!(registry.len(), 2);
    assert_consistent(&registry);
}

#[test]
fn test_nested_presentations_cascade() {
    let mut registry = StackRegistry::new();
    let mut chain = Vec::new();
    for _ in 0..4 {
        let stack = registry.create_stack_with_style(PresentationStyle::Modal);
        registry.mark_presented(stack).unwrap();
        registry.set_active(stack).unwrap();
        chain.push(stack);
    }
    assert_eq!(registry.active_stack_id(), chain[3]);

    let removed = registry.remove(chain[1]).unwrap();
    let removed_ids: Vec<StackId> = removed.iter().map(|stack| stack.id).collect();

    assert_eq!(removed_ids, chain[1..].to_vec());
    assert_eq!(registry.active_stack_id(), chain[0]);
    assert_eq!(
        registry.get(&chain[0]).unwrap().presented_child,
        None,
        "dangling presented child should be cleared"
    );
    assert_consistent(&registry);
}

#[test]
fn test_random_walk_keeps_registry_consistent() {
    let mut registry = StackRegistry::new();
    let mut created = vec![registry.main_stack_id()];

    for round in 0..40usize {
        match round % 5 {
            0 | 1 => {
                let stack = registry.create_stack();
                registry.mark_presented(stack).unwrap();
                registry.set_active(stack).unwrap();
                created.push(stack);
            }
            2 => {
                let _ = registry.set_active(StackId::new());
            }
            3 => {
                let victim = created[round % created.len()];
                let _ = registry.remove(victim);
            }
            _ => {
                registry.sync();
            }
        }
        assert_consistent(&registry);
    }
}
