use crate::cli::output::Output;
use crate::config::load_settings;
use crate::errors::Result;
use crate::router::{HeadlessHost, HostCommand, Router, RouterEvent};
use crate::routing::StandardRouteResolver;
use crate::script::{load_script, ScriptRunner};
use crate::stack::StackId;
use serde::Serialize;
use std::path::Path;
use tokio::sync::broadcast::{self, error::TryRecvError};

/// Final state of a replayed script
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub active: StackId,
    pub stacks: Vec<StackSummary>,
    pub failures: Vec<String>,
    pub events: Vec<RouterEvent>,
    pub host: Vec<HostCommand>,
}

#[derive(Debug, Serialize)]
pub struct StackSummary {
    pub id: StackId,
    pub alias: Option<String>,
    pub style: String,
    pub back_stack: Vec<String>,
}

/// Replay a navigation script
pub async fn run(
    script_path: &Path,
    config_path: Option<&Path>,
    json: bool,
    show_host: bool,
) -> Result<()> {
    let settings = load_settings(config_path)?;
    let steps = load_script(script_path)?;

    let mut resolver = StandardRouteResolver::new();
    resolver.register_fallback(|route, _| Some(format!("<{}>", route.path)));

    let mut router = Router::with_settings(resolver, HeadlessHost::new(), settings);
    let mut events = router.subscribe();
    let mut runner = ScriptRunner::new(router.main_stack_id());

    runner.run(&mut router, &steps).await?;

    let report = build_report(&router, &runner, &mut events);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report, steps.len(), show_host);
    Ok(())
}

/// Collect the router's final state and everything it broadcast
pub fn build_report(
    router: &Router<StandardRouteResolver<String>, HeadlessHost>,
    runner: &ScriptRunner,
    events: &mut broadcast::Receiver<RouterEvent>,
) -> RunReport {
    let stacks = router
        .stack_order()
        .into_iter()
        .filter_map(|id| router.stack(&id))
        .map(|stack| StackSummary {
            id: stack.id,
            alias: runner.alias_of(&stack.id).map(str::to_string),
            style: stack.style.to_string(),
            back_stack: stack.back_stack(),
        })
        .collect();

    let mut received = Vec::new();
    loop {
        match events.try_recv() {
            Ok(event) => received.push(event),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("Event log overflowed, {} event(s) skipped", skipped);
            }
            Err(_) => break,
        }
    }

    let failures = received
        .iter()
        .filter_map(|event| match event {
            RouterEvent::CommandFailed { operation, reason } => {
                Some(format!("{operation}: {reason}"))
            }
            _ => None,
        })
        .collect();

    RunReport {
        active: router.active_stack_id(),
        stacks,
        failures,
        events: received,
        host: router.host().commands(),
    }
}

fn print_report(report: &RunReport, step_count: usize, show_host: bool) {
    Output::success(format!("Replayed {step_count} step(s)"));

    Output::section("Stacks");
    for stack in &report.stacks {
        let label = stack
            .alias
            .clone()
            .unwrap_or_else(|| stack.id.short());
        Output::stack_info(
            &label,
            &stack.style,
            &stack.back_stack,
            stack.id == report.active,
        );
    }

    if !report.failures.is_empty() {
        Output::section("Ignored commands");
        for failure in &report.failures {
            Output::warning(failure);
        }
    }

    if show_host {
        Output::section("Host commands");
        for (index, command) in report.host.iter().enumerate() {
            Output::numbered_item(index + 1, format!("{command:?}"));
        }
    }
}
