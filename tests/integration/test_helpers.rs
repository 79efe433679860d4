use navstack::router::{HeadlessHost, Router};
use navstack::routing::StandardRouteResolver;
use navstack::stack::StackId;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub type TestRouter = Router<StandardRouteResolver<String>, HeadlessHost>;

/// Resolver that renders every path except `/missing`
pub fn permissive_resolver() -> StandardRouteResolver<String> {
    let mut resolver = StandardRouteResolver::new();
    resolver.register_fallback(|route, _| {
        (route.path != "/missing").then(|| format!("view:{}", route.path))
    });
    resolver
}

pub fn create_router() -> TestRouter {
    Router::new(permissive_resolver(), HeadlessHost::new())
}

/// Router whose host takes `delay` to finish each animated dismissal
pub fn create_slow_router(delay: Duration) -> TestRouter {
    Router::new(
        permissive_resolver(),
        HeadlessHost::new().with_dismiss_delay(delay),
    )
}

/// Router with `/home` as the main root and `paths` pushed on top
pub async fn router_with_history(paths: &[&str]) -> TestRouter {
    let mut router = create_router();
    router.set_root("/home".into()).await;
    for path in paths {
        router.navigate((*path).into()).await;
    }
    router
}

pub fn back_stack(router: &TestRouter, stack: StackId) -> Vec<String> {
    router.back_stack(Some(stack)).unwrap_or_default()
}

/// Order ids and registry keys must describe the same set
pub fn assert_order_matches_registry(router: &TestRouter) {
    let mut ordered = router.stack_order();
    let mut keys = router.registry().stack_ids();
    ordered.sort_by_key(|id| *id.as_uuid());
    keys.sort_by_key(|id| *id.as_uuid());
    assert_eq!(ordered, keys, "stack order and registry diverged");
}

pub fn get_binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_navstack"))
}

/// Run the CLI with an isolated settings file
pub fn run_cli(args: &[&str], config_path: &Path) -> std::process::Output {
    Command::new(get_binary_path())
        .args(args)
        .arg("--config")
        .arg(config_path)
        .arg("--no-color")
        .output()
        .expect("navstack binary should run")
}
