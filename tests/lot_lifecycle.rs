//! End-to-end scenarios for a lot moving through a process tool.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use stateworker::{RunResult, StateError, StateMachine, StateWorker, Worker, NULL_STATE};

const IDLE: &str = "IDLE";
const PRE_PROCESS: &str = "PRE_PROCESS";
const PROCESSING: &str = "PROCESSING";
const POST_PROCESS: &str = "POST_PROCESS";
const NEXT: &str = "NEXT";
const RUN_HOLD: &str = "RUN_HOLD";

fn foup() -> StateMachine<(), ()> {
    let mut machine = StateMachine::new("FOUP");
    machine
        .register(IDLE)
        .add_event("validateLot", |_, _| None::<&str>)
        .add_event("moveIn", |_, _| Some(PRE_PROCESS));
    machine
        .register(PRE_PROCESS)
        .add_event("trackIn", |_, _| Some(PROCESSING))
        .add_event("down", |_, _| Some(RUN_HOLD))
        .add_event("trackOut", |_, _| Some(PROCESSING));
    machine
        .register(PROCESSING)
        .add_event("trackIn", |_, _| Some(PROCESSING))
        .add_event("down", |_, _| Some(RUN_HOLD))
        .add_event("trackOut", |_, _| Some(POST_PROCESS));
    machine
        .register(POST_PROCESS)
        .add_event("down", |_, _| Some(RUN_HOLD))
        .add_event("moveOut", |_, _| Some(NEXT));
    machine.register(NEXT).add_event("ready", |_, _| Some(IDLE));
    machine
}

#[test]
fn lot_walks_the_full_cycle() {
    let mut machine = foup();
    assert!(machine.state(RUN_HOLD).is_none());

    machine.change_state(IDLE).unwrap();
    assert_eq!(machine.prev_state().name(), NULL_STATE);
    assert_eq!(machine.curr_state().name(), IDLE);

    assert_eq!(machine.run(&(), "validateLot", &()).unwrap(), RunResult::StateKeep);
    assert_eq!(machine.prev_state().name(), NULL_STATE);
    assert_eq!(machine.curr_state().name(), IDLE);

    assert_eq!(machine.run(&(), "trackIn", &()).unwrap(), RunResult::EventNotSupport);
    assert_eq!(machine.curr_state().name(), IDLE);

    let steps = [
        ("moveIn", IDLE, PRE_PROCESS),
        ("trackIn", PRE_PROCESS, PROCESSING),
        ("trackOut", PROCESSING, POST_PROCESS),
        ("moveOut", POST_PROCESS, NEXT),
        ("ready", NEXT, IDLE),
    ];
    for (event, from, to) in steps {
        assert_eq!(machine.run(&(), event, &()).unwrap(), RunResult::StateChanged);
        assert_eq!(machine.prev_state().name(), from);
        assert_eq!(machine.curr_state().name(), to);
    }

    assert_eq!(machine.history().len(), 6);
}

#[test]
fn event_and_change_listeners_fire_at_the_right_step() {
    let step = Arc::new(AtomicUsize::new(0));
    let hits = Arc::new(Mutex::new(Vec::new()));
    let mut machine = foup();

    let (s, h) = (Arc::clone(&step), Arc::clone(&hits));
    machine.add_change_listener(IDLE, PRE_PROCESS, move |_| {
        h.lock().unwrap().push(("change", s.load(Ordering::SeqCst)));
    });
    let (s, h) = (Arc::clone(&step), Arc::clone(&hits));
    machine.add_event_listener("trackIn", move |_| {
        h.lock().unwrap().push(("trackIn", s.load(Ordering::SeqCst)));
    });
    let (s, h) = (Arc::clone(&step), Arc::clone(&hits));
    machine.add_event_listener("moveOut", move |_| {
        h.lock().unwrap().push(("moveOut", s.load(Ordering::SeqCst)));
    });

    machine.change_state(IDLE).unwrap();
    for (i, event) in ["validateLot", "moveIn", "trackIn", "trackOut", "moveOut", "ready"]
        .into_iter()
        .enumerate()
    {
        step.store(i + 1, Ordering::SeqCst);
        machine.run(&(), event, &()).unwrap();
    }

    assert_eq!(machine.curr_state().name(), IDLE);
    assert_eq!(
        *hits.lock().unwrap(),
        vec![("change", 2), ("trackIn", 3), ("moveOut", 5)]
    );
}

#[test]
fn change_listener_fires_only_on_its_pair() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut machine = foup();
    let counter = Arc::clone(&fired);
    machine.add_state_changed_listener(PROCESSING, POST_PROCESS, move |ctx| {
        assert_eq!(ctx.event_name, "trackOut");
        counter.fetch_add(1, Ordering::SeqCst);
    });

    machine.change_state(IDLE).unwrap();
    for event in ["moveIn", "trackIn", "trackIn", "trackOut", "moveOut", "ready"] {
        machine.run(&(), event, &()).unwrap();
    }

    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn self_transition_is_a_keep() {
    let fired = Arc::new(AtomicUsize::new(0));
    let mut machine = foup();
    let counter = Arc::clone(&fired);
    machine.add_event_listener("trackIn", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    machine.add_state_out_listener(PROCESSING, |_| panic!("PROCESSING was not left"));

    machine.change_state(PROCESSING).unwrap();
    assert_eq!(machine.run(&(), "trackIn", &()).unwrap(), RunResult::StateKeep);
    assert_eq!(machine.curr_state().name(), PROCESSING);
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn unknown_state_error_message() {
    let mut machine: StateMachine<(), ()> = StateMachine::new("FOUP");
    match machine.change_state("unknown") {
        Err(StateError::UnknownState { name, machine }) => {
            assert_eq!(name, "unknown");
            assert_eq!(machine, "FOUP");
        }
        other => panic!("Expected UnknownState, got {:?}", other),
    }
}

#[test]
fn hold_without_registered_state_is_rejected() {
    let mut machine = foup();
    machine.change_state(PROCESSING).unwrap();

    let err = machine.run(&(), "down", &()).unwrap_err();

    assert_eq!(err.name(), Some(RUN_HOLD));
    assert_eq!(machine.curr_state().name(), PROCESSING);
}

#[test]
fn panicking_state_in_listener_leaves_pointers_in_place() {
    let mut machine = foup();
    machine.add_state_in_listener(PRE_PROCESS, |_| panic!("listener failed"));
    machine.change_state(IDLE).unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| machine.run(&(), "moveIn", &())));

    assert!(outcome.is_err());
    assert_eq!(machine.curr_state().name(), IDLE);
}

#[test]
fn panicking_event_listener_keeps_committed_transition() {
    let mut machine = foup();
    machine.add_event_listener("moveIn", |_| panic!("listener failed"));
    machine.change_state(IDLE).unwrap();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| machine.run(&(), "moveIn", &())));

    assert!(outcome.is_err());
    assert_eq!(machine.prev_state().name(), IDLE);
    assert_eq!(machine.curr_state().name(), PRE_PROCESS);
}

struct Tool {
    seq: Arc<AtomicUsize>,
}

impl StateWorker for Tool {
    type Args = Option<String>;

    fn initial(&self, machine: &mut StateMachine<Self, Self::Args>) {
        machine
            .register(IDLE)
            .add_event("validateLot", |_: &Tool, _: &Option<String>| None::<&str>)
            .add_transition("moveIn", PRE_PROCESS);
        machine
            .register(PRE_PROCESS)
            .add_transition("trackIn", PROCESSING)
            .add_transition("down", RUN_HOLD)
            .add_transition("trackOut", PROCESSING);
        machine
            .register(PROCESSING)
            .add_transition("trackIn", PROCESSING)
            .add_transition("down", RUN_HOLD)
            .add_transition("trackOut", POST_PROCESS);
        machine
            .register(POST_PROCESS)
            .add_transition("down", RUN_HOLD)
            .add_transition("moveOut", NEXT);
        machine.register(NEXT).add_transition("ready", IDLE);
        machine.register(RUN_HOLD);

        let seq = Arc::clone(&self.seq);
        machine.add_event_listener("moveIn", move |_| assert_eq!(seq.load(Ordering::SeqCst), 4));
        let seq = Arc::clone(&self.seq);
        machine.add_state_in_listener(PRE_PROCESS, move |_| {
            assert_eq!(seq.load(Ordering::SeqCst), 4)
        });
        let seq = Arc::clone(&self.seq);
        machine.add_state_out_listener(PRE_PROCESS, move |_| {
            assert_eq!(seq.load(Ordering::SeqCst), 5)
        });
        let seq = Arc::clone(&self.seq);
        machine.add_state_changed_listener(PROCESSING, POST_PROCESS, move |_| {
            assert_eq!(seq.load(Ordering::SeqCst), 6)
        });
    }
}

#[test]
fn worker_drives_the_tool() {
    let seq = Arc::new(AtomicUsize::new(0));
    let mut tool = Worker::new("TEST", Tool { seq: Arc::clone(&seq) });
    assert!(tool.machine().validate().is_success());

    tool.change_state(IDLE).unwrap();
    assert_eq!(tool.curr_state(), IDLE);

    let expected = [
        ("???", RunResult::EventNotSupport, IDLE),
        ("validateLot", RunResult::StateKeep, IDLE),
        ("trackIn", RunResult::EventNotSupport, IDLE),
        ("moveIn", RunResult::StateChanged, PRE_PROCESS),
        ("trackIn", RunResult::StateChanged, PROCESSING),
        ("trackOut", RunResult::StateChanged, POST_PROCESS),
        ("moveOut", RunResult::StateChanged, NEXT),
        ("ready", RunResult::StateChanged, IDLE),
    ];
    for (event, result, state) in expected {
        seq.fetch_add(1, Ordering::SeqCst);
        assert_eq!(tool.run(event, &None).unwrap(), result, "event {}", event);
        assert_eq!(tool.curr_state(), state);
    }
}
