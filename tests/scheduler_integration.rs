//! Tick scheduler integration tests: ordering and mutation during a frame.

use std::cell::RefCell;
use std::rc::Rc;

use replicaengine::error::SchedulerError;
use replicaengine::systems::scheduler::{
    ListenerId, SharedListener, TickContext, TickListener, TickScheduler,
};

type Log = Rc<RefCell<Vec<(u64, &'static str)>>>;

/// Appends `(frame, name)` to a shared log on every tick.
struct Recorder {
    name: &'static str,
    log: Log,
}

impl TickListener for Recorder {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push((ctx.time().frame_count, self.name));
    }
}

fn recorder(name: &'static str, log: &Log) -> Rc<RefCell<Recorder>> {
    Rc::new(RefCell::new(Recorder {
        name,
        log: log.clone(),
    }))
}

/// Records itself, then adds or removes another listener on its first tick.
struct Mutator {
    log: Log,
    action: Option<Action>,
}

enum Action {
    Add(SharedListener),
    Remove(ListenerId),
}

impl TickListener for Mutator {
    fn tick(&mut self, ctx: &mut TickContext<'_>) {
        self.log.borrow_mut().push((ctx.time().frame_count, "M"));
        match self.action.take() {
            Some(Action::Add(listener)) => {
                ctx.add(listener).unwrap();
            }
            Some(Action::Remove(id)) => ctx.remove(id).unwrap(),
            None => {}
        }
    }
}

#[test]
fn frame_ticks_in_registration_order() {
    let log: Log = Rc::default();
    let mut scheduler = TickScheduler::new();
    for name in ["A", "B", "C"] {
        scheduler.add(recorder(name, &log)).unwrap();
    }

    scheduler.run(2);
    assert_eq!(
        *log.borrow(),
        vec![(0, "A"), (0, "B"), (0, "C"), (1, "A"), (1, "B"), (1, "C")]
    );
    assert_eq!(scheduler.frame_count(), 2);
}

#[test]
fn listener_added_mid_frame_starts_next_frame() {
    let log: Log = Rc::default();
    let mut scheduler = TickScheduler::new();
    let late = recorder("D", &log);
    scheduler
        .add(Rc::new(RefCell::new(Mutator {
            log: log.clone(),
            action: Some(Action::Add(late.clone())),
        })))
        .unwrap();
    scheduler.add(recorder("B", &log)).unwrap();

    scheduler.tick();
    assert_eq!(*log.borrow(), vec![(0, "M"), (0, "B")]);

    scheduler.tick();
    assert_eq!(
        *log.borrow(),
        vec![(0, "M"), (0, "B"), (1, "M"), (1, "B"), (1, "D")]
    );
    assert_eq!(scheduler.len(), 3);

    // already registered now
    let late: SharedListener = late;
    assert!(matches!(
        scheduler.add(late),
        Err(SchedulerError::AlreadyRegistered(_))
    ));
}

#[test]
fn listener_removed_mid_frame_finishes_frame_then_stops() {
    let log: Log = Rc::default();
    let mut scheduler = TickScheduler::new();
    let mutator = Rc::new(RefCell::new(Mutator {
        log: log.clone(),
        action: None,
    }));
    scheduler.add(mutator.clone()).unwrap();
    let victim = scheduler.add(recorder("V", &log)).unwrap();
    scheduler.add(recorder("C", &log)).unwrap();
    mutator.borrow_mut().action = Some(Action::Remove(victim));

    scheduler.tick();
    assert_eq!(*log.borrow(), vec![(0, "M"), (0, "V"), (0, "C")]);
    assert!(!scheduler.contains(victim));

    scheduler.tick();
    assert_eq!(
        *log.borrow(),
        vec![(0, "M"), (0, "V"), (0, "C"), (1, "M"), (1, "C")]
    );
}

#[test]
fn removal_outside_frame_is_immediate() {
    let log: Log = Rc::default();
    let mut scheduler = TickScheduler::new();
    let a = scheduler.add(recorder("A", &log)).unwrap();
    scheduler.add(recorder("B", &log)).unwrap();
    scheduler.remove(a).unwrap();

    scheduler.tick();
    assert_eq!(*log.borrow(), vec![(0, "B")]);
    assert!(matches!(
        scheduler.remove(a),
        Err(SchedulerError::NotRegistered(id)) if id == a
    ));
}
