use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use ecs::{
    Component, ComponentStore, EcsError, Entity, Processor, Requirements, Stage, TickContext,
    World,
};

#[derive(Debug, Default)]
struct Position(f32);
impl Component for Position {}

#[derive(Debug, Default)]
struct Velocity(f32);
impl Component for Velocity {}

/// Records every lifecycle callback it receives.
#[derive(Default)]
struct Journal {
    events: Vec<String>,
}

/// Integrates velocity into position once per fixed tick.
struct Movement {
    journal: Rc<RefCell<Journal>>,
    initialized: bool,
}

impl Movement {
    fn new(journal: Rc<RefCell<Journal>>) -> Self {
        Self {
            journal,
            initialized: false,
        }
    }
}

impl Processor for Movement {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn requirements(&self, requirements: &mut Requirements) {
        requirements.require::<Position>().require::<Velocity>();
    }

    fn stage(&self) -> Stage {
        Stage::Fixed
    }

    fn initialize(&mut self) {
        self.initialized = true;
        self.journal.borrow_mut().events.push("init".into());
    }

    fn update(&mut self, matched: &BTreeSet<Entity>, ctx: &mut TickContext<'_>, dt: f32) {
        for &entity in matched {
            let speed = ctx.get::<Velocity>(entity).map_or(0.0, |v| v.0);
            if let Some(position) = ctx.get_mut::<Position>(entity) {
                position.0 += speed * dt;
            }
        }
    }

    fn on_entity_added(&mut self, entity: Entity, _components: &ComponentStore) {
        self.journal.borrow_mut().events.push(format!("add {entity}"));
    }

    fn on_entity_removed(&mut self, entity: Entity, components: &ComponentStore) {
        let still_readable = components.has::<Position>(entity);
        self.journal
            .borrow_mut()
            .events
            .push(format!("remove {entity} readable={still_readable}"));
    }
}

/// Counts variable-stage ticks; matches every entity.
#[derive(Default)]
struct FrameCounter {
    frames: u32,
    last_seen: usize,
}

impl Processor for FrameCounter {
    fn requirements(&self, _requirements: &mut Requirements) {}

    fn update(&mut self, matched: &BTreeSet<Entity>, _ctx: &mut TickContext<'_>, _dt: f32) {
        self.frames += 1;
        self.last_seen = matched.len();
    }
}

/// Destroys every matched entity from inside its update.
struct Reaper;

impl Processor for Reaper {
    fn requirements(&self, requirements: &mut Requirements) {
        requirements.require::<Velocity>();
    }

    fn update(&mut self, matched: &BTreeSet<Entity>, ctx: &mut TickContext<'_>, _dt: f32) {
        for &entity in matched {
            ctx.destroy_entity(entity);
        }
    }
}

fn matched(world: &World) -> Vec<Entity> {
    world.matched::<Movement>().expect("registered").collect()
}

#[test]
fn membership_follows_attach_and_detach() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut world = World::new();
    world.register_processor(Movement::new(journal.clone())).unwrap();

    let e = world.create_entity();
    world.attach(e, Position(0.0)).unwrap();
    assert!(matched(&world).is_empty());

    world.attach(e, Velocity(2.0)).unwrap();
    assert_eq!(matched(&world), vec![e]);

    world.detach::<Velocity>(e);
    assert!(matched(&world).is_empty());

    // Detach runs finalization before the processor hears about it.
    assert_eq!(
        journal.borrow().events,
        vec![
            "init".to_string(),
            format!("add {e}"),
            format!("remove {e} readable=true"),
        ]
    );
}

#[test]
fn registration_scans_existing_entities() {
    let mut world = World::new();
    let both = world.create_entity();
    world.attach(both, Position(0.0)).unwrap();
    world.attach(both, Velocity(1.0)).unwrap();
    let only_position = world.create_entity();
    world.attach(only_position, Position(0.0)).unwrap();

    let journal = Rc::new(RefCell::new(Journal::default()));
    world.register_processor(Movement::new(journal)).unwrap();

    assert_eq!(matched(&world), vec![both]);
    assert!(world.processor::<Movement>().unwrap().initialized);
}

#[test]
fn registering_same_processor_type_twice_fails() {
    let mut world = World::new();
    world.register_processor(FrameCounter::default()).unwrap();

    let err = world.register_processor(FrameCounter::default()).unwrap_err();
    assert!(matches!(err, EcsError::DuplicateProcessor { .. }));
    assert_eq!(err.error_code(), "DUPLICATE_PROCESSOR");
    assert_eq!(world.processor_count(), 1);
}

#[test]
fn stages_are_driven_separately() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut world = World::new();
    world.register_processor(Movement::new(journal)).unwrap();
    world.register_processor(FrameCounter::default()).unwrap();

    let e = world.create_entity();
    world.attach(e, Position(1.0)).unwrap();
    world.attach(e, Velocity(10.0)).unwrap();

    world.update_all(0.5);
    assert_eq!(world.get::<Position>(e).unwrap().0, 1.0);
    assert_eq!(world.processor::<FrameCounter>().unwrap().frames, 1);

    world.fixed_update_all(0.5);
    assert_eq!(world.get::<Position>(e).unwrap().0, 6.0);
    assert_eq!(world.processor::<FrameCounter>().unwrap().frames, 1);
}

#[test]
fn inactive_processors_are_skipped() {
    let mut world = World::new();
    world.register_processor(FrameCounter::default()).unwrap();

    assert!(world.set_processor_active::<FrameCounter>(false));
    world.update_all(0.016);
    assert_eq!(world.processor::<FrameCounter>().unwrap().frames, 0);
    assert!(!world.is_processor_active::<FrameCounter>());

    world.set_processor_active::<FrameCounter>(true);
    world.update_all(0.016);
    assert_eq!(world.processor::<FrameCounter>().unwrap().frames, 1);
}

#[test]
fn empty_requirement_matches_every_entity() {
    let mut world = World::new();
    world.create_entity();
    world.register_processor(FrameCounter::default()).unwrap();
    world.create_entity();

    world.update_all(0.016);
    assert_eq!(world.processor::<FrameCounter>().unwrap().last_seen, 2);
}

#[test]
fn destruction_requested_mid_tick_is_deferred() {
    let journal = Rc::new(RefCell::new(Journal::default()));
    let mut world = World::new();
    world.register_processor(Reaper).unwrap();
    world.register_processor(Movement::new(journal.clone())).unwrap();

    let doomed = world.create_entity();
    world.attach(doomed, Position(0.0)).unwrap();
    world.attach(doomed, Velocity(1.0)).unwrap();

    world.update_all(0.1);
    assert!(world.is_alive(doomed));
    assert!(world.is_pending_destruction(doomed));
    assert_eq!(matched(&world), vec![doomed]);

    // A new entity must not receive the pending id.
    let bystander = world.create_entity();
    assert_ne!(bystander, doomed);

    assert_eq!(world.process_deferred_destructions(), 1);
    assert!(matched(&world).is_empty());
    assert!(
        journal
            .borrow()
            .events
            .contains(&format!("remove {doomed} readable=true"))
    );

    assert_eq!(world.create_entity(), doomed);
}

#[test]
fn lifecycle_hooks_fire_on_attach_replace_and_destroy() {
    #[derive(Default)]
    struct Hooks(Rc<RefCell<Vec<&'static str>>>);

    impl Component for Hooks {
        fn on_attach(&mut self, _entity: Entity) {
            self.0.borrow_mut().push("attach");
        }

        fn on_detach(&mut self, _entity: Entity) {
            self.0.borrow_mut().push("detach");
        }
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let mut world = World::new();
    let e = world.create_entity();

    world.attach(e, Hooks(log.clone())).unwrap();
    world.attach(e, Hooks(log.clone())).unwrap();
    world.destroy_entity(e);
    assert_eq!(*log.borrow(), vec!["attach", "detach", "attach"]);

    world.process_deferred_destructions();
    assert_eq!(*log.borrow(), vec!["attach", "detach", "attach", "detach"]);
}
