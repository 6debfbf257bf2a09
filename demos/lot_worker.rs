//! Lot Worker
//!
//! This example drives a lot through a process tool with a traced machine.
//!
//! Key concepts:
//! - A controller implementing `StateWorker` registers its states once
//! - Handlers read the controller to decide the next state
//! - Listeners observe entry, exit and specific transitions
//! - Per-machine tracing instead of a global print switch
//!
//! Run with: RUST_LOG=info cargo run --example lot_worker

use stateworker::{MachineConfig, RunResult, StateError, StateMachine, StateWorker, Worker};
use tracing_subscriber::EnvFilter;

struct Tool {
    recipe_ok: bool,
}

impl StateWorker for Tool {
    type Args = String;

    fn initial(&self, machine: &mut StateMachine<Self, String>) {
        machine
            .register("IDLE")
            .add_event("validateLot", |_: &Tool, _: &String| None::<&str>)
            .add_event("moveIn", |tool: &Tool, _: &String| {
                tool.recipe_ok.then_some("PRE_PROCESS")
            });
        machine
            .register("PRE_PROCESS")
            .add_transition("trackIn", "PROCESSING")
            .add_transition("down", "RUN_HOLD");
        machine
            .register("PROCESSING")
            .add_transition("trackOut", "POST_PROCESS")
            .add_transition("down", "RUN_HOLD");
        machine
            .register("POST_PROCESS")
            .add_transition("moveOut", "NEXT");
        machine.register("NEXT").add_transition("ready", "IDLE");
        machine.register("RUN_HOLD").add_transition("recover", "IDLE");

        machine
            .add_state_in_listener("PROCESSING", |ctx| {
                println!("  lot {} started processing", ctx.value)
            })
            .add_state_changed_listener("PROCESSING", "POST_PROCESS", |ctx| {
                println!("  lot {} finished processing", ctx.value)
            })
            .add_state_in_listener("RUN_HOLD", |ctx| {
                println!("  tool held while handling lot {}", ctx.value)
            });
    }
}

fn main() -> Result<(), StateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Lot Worker Example ===\n");

    let mut tool = Worker::with_config(
        "ETCH-01",
        Tool { recipe_ok: true },
        MachineConfig::default().with_trace(true),
    );
    if tool.machine().validate().is_failure() {
        println!("configuration has unregistered state names");
    }

    tool.change_state("IDLE")?;
    let lot = "LOT-0042".to_string();
    for event in ["validateLot", "trackIn", "moveIn", "trackIn", "trackOut", "moveOut", "ready"] {
        let result = tool.run(event, &lot)?;
        println!("{:<12} -> {:<17} now {}", event, result, tool.curr_state());
        if result == RunResult::EventNotSupport {
            println!("  ({} ignored in {})", event, tool.curr_state());
        }
    }

    println!("\nPath: {}", tool.machine().history().path().join(" -> "));
    println!("\nSnapshot:\n{}", tool.machine().snapshot().to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
