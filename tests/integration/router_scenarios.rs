use super::test_helpers::*;
use navstack::router::{HostCommand, RouterEvent};
use navstack::routing::{EnvironmentObjects, Route};
use navstack::stack::PresentationStyle;
use std::time::Duration;
use tokio::sync::broadcast::Receiver;

fn drain(events: &mut Receiver<RouterEvent>) -> Vec<RouterEvent> {
    let mut received = Vec::new();
    while let Ok(event) = events.try_recv() {
        received.push(event);
    }
    received
}

fn failures(events: &[RouterEvent]) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|event| match event {
            RouterEvent::CommandFailed { operation, .. } => Some(*operation),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_pop_beyond_depth_is_reported_and_ignored() {
    let mut router = router_with_history(&["/a", "/b"]).await;
    let main = router.main_stack_id();
    let mut events = router.subscribe();

    router.pop(None, 3).await;
    router.pop(None, 5).await;

    assert_eq!(back_stack(&router, main), vec!["/home", "/a", "/b"]);
    assert_eq!(failures(&drain(&mut events)), vec!["pop", "pop"]);
}

#[tokio::test]
async fn test_pop_to_screen_known_and_unknown_converge() {
    let mut found = router_with_history(&["/a", "/b"]).await;
    found.pop_to_screen("/a").await;

    let mut missing = router_with_history(&["/a", "/b"]).await;
    let mut events = missing.subscribe();
    missing.pop_to_screen("/z").await;

    let main = found.main_stack_id();
    assert_eq!(back_stack(&found, main), vec!["/home", "/a"]);
    let main = missing.main_stack_id();
    assert_eq!(back_stack(&missing, main), vec!["/home", "/a"]);
    assert_eq!(failures(&drain(&mut events)), vec!["pop_to_screen"]);
}

#[tokio::test]
async fn test_unresolvable_route_leaves_stack_untouched() {
    let mut router = router_with_history(&["/a"]).await;
    let main = router.main_stack_id();
    let commands_before = router.host().commands().len();

    router.navigate("/missing".into()).await;
    let presented = router.present_modal("/missing".into()).await;

    assert!(presented.is_none());
    assert_eq!(back_stack(&router, main), vec!["/home", "/a"]);
    assert_eq!(router.host().commands().len(), commands_before);
    assert_order_matches_registry(&router);
}

#[tokio::test]
async fn test_create_stack_yields_distinct_ids() {
    let mut router = create_router();

    let first = router.create_stack();
    let second = router.create_stack();

    assert_ne!(first, second);
    assert_eq!(router.stack_order().len(), 3);
    assert_order_matches_registry(&router);
}

#[tokio::test]
async fn test_set_active_unknown_stack_is_ignored() {
    let mut router = create_router();
    let modal = router.present_modal("/modal".into()).await.unwrap();
    let mut events = router.subscribe();

    router.set_active_stack(navstack::StackId::new());

    assert_eq!(router.active_stack_id(), modal);
    assert_eq!(failures(&drain(&mut events)), vec!["set_active_stack"]);
}

#[tokio::test]
async fn test_modal_then_pop_all_to_root() {
    let mut router = router_with_history(&["/a", "/b"]).await;
    let main = router.main_stack_id();
    let modal = router.present_modal("/modal".into()).await.unwrap();
    router.navigate("/modal/detail".into()).await;
    assert_eq!(router.active_stack_id(), modal);

    router.pop_all_to_root().await;

    assert_eq!(router.stack_order(), vec![main]);
    assert_eq!(router.active_stack_id(), main);
    assert_eq!(back_stack(&router, main), vec!["/home"]);
    assert_order_matches_registry(&router);
}

#[tokio::test]
async fn test_pop_all_to_root_waits_for_every_dismissal() {
    let mut router = create_slow_router(Duration::from_millis(20));
    router.set_root("/home".into()).await;
    router.navigate("/a".into()).await;
    let sheet = router
        .present_bottom_sheet("/sheet".into(), Some(240.0))
        .await
        .unwrap();
    let cover = router
        .present_full_screen_cover("/cover".into())
        .await
        .unwrap();

    router.pop_all_to_root().await;

    let dismissed = router.host().dismissed();
    assert_eq!(dismissed.len(), 2);
    assert!(dismissed.contains(&sheet));
    assert!(dismissed.contains(&cover));

    let commands = router.host().commands();
    let last_dismiss = commands
        .iter()
        .rposition(|command| matches!(command, HostCommand::Dismiss { .. }))
        .unwrap();
    let main_pop = commands
        .iter()
        .rposition(|command| matches!(command, HostCommand::PopTo { depth: 1, .. }))
        .unwrap();
    assert!(last_dismiss < main_pop, "main stack popped before dismissals finished");
}

#[tokio::test]
async fn test_dismiss_pops_before_closing_presentation() {
    let mut router = router_with_history(&[]).await;
    let main = router.main_stack_id();
    let modal = router.present_modal("/modal".into()).await.unwrap();
    router.navigate("/modal/detail".into()).await;

    router.dismiss(None).await;
    assert_eq!(back_stack(&router, modal), vec!["/modal"]);
    assert_eq!(router.active_stack_id(), modal);

    router.dismiss(None).await;
    assert!(router.stack(&modal).is_none());
    assert_eq!(router.active_stack_id(), main);
}

#[tokio::test]
async fn test_dismiss_stack_cascades_to_later_presentations() {
    let mut router = router_with_history(&[]).await;
    let main = router.main_stack_id();
    let first = router.present_modal("/first".into()).await.unwrap();
    let second = router.present_modal("/second".into()).await.unwrap();
    let third = router.present_modal("/third".into()).await.unwrap();

    router.dismiss_stack(second).await;

    assert_eq!(router.stack_order(), vec![main, first]);
    assert!(router.stack(&third).is_none());
    assert_eq!(router.active_stack_id(), first);
    assert_order_matches_registry(&router);
}

#[tokio::test]
async fn test_dismiss_main_stack_is_rejected() {
    let mut router = router_with_history(&["/a"]).await;
    let main = router.main_stack_id();
    let mut events = router.subscribe();

    router.dismiss_stack(main).await;

    assert!(router.stack(&main).is_some());
    assert_eq!(failures(&drain(&mut events)), vec!["dismiss_stack"]);
}

#[tokio::test]
async fn test_dismiss_full_screen_cover_ignores_other_styles() {
    let mut router = router_with_history(&[]).await;
    let modal = router.present_modal("/modal".into()).await.unwrap();

    router.dismiss_full_screen_cover(Some(modal)).await;
    assert!(router.stack(&modal).is_some());

    let cover = router
        .present_full_screen_cover("/cover".into())
        .await
        .unwrap();
    router.dismiss_full_screen_cover(Some(cover)).await;
    assert!(router.stack(&cover).is_none());
    assert_eq!(router.active_stack_id(), modal);
}

#[tokio::test]
async fn test_external_dismissal_is_idempotent() {
    let mut router = router_with_history(&[]).await;
    let main = router.main_stack_id();
    let sheet = router
        .present_bottom_sheet("/sheet".into(), None)
        .await
        .unwrap();
    assert_eq!(
        router.stack(&sheet).unwrap().style,
        PresentationStyle::BottomSheet { height: 300.0 }
    );
    let mut events = router.subscribe();

    router.handle_external_dismissal(sheet).await;
    router.handle_external_dismissal(sheet).await;

    assert_eq!(router.active_stack_id(), main);
    assert!(failures(&drain(&mut events)).is_empty());
    assert_order_matches_registry(&router);
}

#[tokio::test]
async fn test_invalid_sheet_height_presents_nothing() {
    let mut router = router_with_history(&[]).await;

    assert!(router
        .present_bottom_sheet("/sheet".into(), Some(0.0))
        .await
        .is_none());
    assert!(router
        .present_bottom_sheet("/sheet".into(), Some(f64::NAN))
        .await
        .is_none());
    assert_eq!(router.stack_order().len(), 1);
}

#[tokio::test]
async fn test_refused_presentation_rolls_back() {
    let mut router = router_with_history(&[]).await;
    router.host().set_refuse_presentations(true);

    let mut events = router.subscribe();

    let presented = router.present_modal("/modal".into()).await;

    assert!(presented.is_none());
    assert_eq!(router.stack_order(), vec![router.main_stack_id()]);
    assert_eq!(router.active_stack_id(), router.main_stack_id());
    assert_order_matches_registry(&router);

    let received = drain(&mut events);
    assert!(
        !received
            .iter()
            .any(|event| matches!(event, RouterEvent::StackCreated { .. })),
        "refused stack was announced: {received:?}"
    );
    assert_eq!(failures(&received), vec!["present"]);
}

#[tokio::test]
async fn test_pop_all_to_root_animates_only_the_lowest_presentation() {
    let mut router = router_with_history(&[]).await;
    let first = router.present_modal("/first".into()).await.unwrap();
    let second = router.present_modal("/second".into()).await.unwrap();
    let third = router.present_bottom_sheet("/third".into(), None).await.unwrap();

    router.pop_all_to_root().await;

    let dismissals: Vec<_> = router
        .host()
        .commands()
        .into_iter()
        .filter_map(|command| match command {
            HostCommand::Dismiss { stack, animated } => Some((stack, animated)),
            _ => None,
        })
        .collect();
    assert_eq!(dismissals.len(), 3);
    assert!(dismissals.contains(&(first, true)));
    assert!(dismissals.contains(&(second, false)));
    assert!(dismissals.contains(&(third, false)));
}

#[tokio::test]
async fn test_navigate_with_clear_history_replaces_root() {
    let mut router = router_with_history(&["/a", "/b"]).await;
    let main = router.main_stack_id();

    router
        .navigate_in("/fresh".into(), Some(main), true)
        .await;

    assert_eq!(back_stack(&router, main), vec!["/fresh"]);
}

#[tokio::test]
async fn test_pop_to_entry_requires_mounted_screen() {
    let mut router = router_with_history(&["/a", "/b", "/c"]).await;
    let main = router.main_stack_id();
    let target = router.stack(&main).unwrap().entries[1].id;

    router.pop_to_entry(None, uuid::Uuid::nil()).await;
    assert_eq!(back_stack(&router, main).len(), 4);

    router.pop_to_entry(None, target).await;
    assert_eq!(back_stack(&router, main), vec!["/home", "/a"]);
}

#[derive(Debug, PartialEq)]
struct Session(&'static str);

#[tokio::test]
async fn test_environment_object_registered_twice_keeps_latest() {
    let mut router = create_router();
    router.set_root(Route::new("/home").with_environment_object(Session("first"))).await;
    router
        .navigate(Route::new("/a").with_environment_object(Session("second")))
        .await;

    assert_eq!(router.environment().len(), 1);
    assert_eq!(
        router.environment().get::<Session>().as_deref(),
        Some(&Session("second"))
    );

    router.set_environment_objects(EnvironmentObjects::new().with(Session("reset")));
    assert_eq!(router.environment().len(), 1);
}
