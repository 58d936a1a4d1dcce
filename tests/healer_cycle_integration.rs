//! Healing cycle integration tests: the shared state machine on its own and
//! healers driven through the game facade.

use glam::Vec2;

use replicaengine::entities::healer::{self, HealPhase, HealerConfig, HealerStatic};
use replicaengine::game::Game;
use replicaengine::resources::gameconfig::{EntitySettings, GameSettings};

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn config(interval_ticks: f32, duration_seconds: f32) -> HealerConfig {
    HealerConfig {
        heal_interval: interval_ticks,
        heal_duration: duration_seconds,
        heal_amount: 0.25,
        heal_radius: 2.0,
    }
}

#[derive(Debug, Clone, Copy)]
struct Observed {
    phase: HealPhase,
    angle: f32,
    scale: f32,
    drop_effect: bool,
}

/// Observations for ticks `1..=ticks`; index 0 is tick 1.
fn observe(data: &mut HealerStatic, ticks: usize) -> Vec<Observed> {
    (0..ticks)
        .map(|_| {
            data.update();
            Observed {
                phase: data.phase(),
                angle: data.angle(),
                scale: data.scale(),
                drop_effect: data.drop_effect(),
            }
        })
        .collect()
}

fn at(observed: &[Observed], tick: usize) -> Observed {
    observed[tick - 1]
}

#[test]
fn five_tick_interval_two_second_duration() {
    let config = config(5.0, 2.0);
    let scale_curve = config.scale_curve();
    let rotate_curve = config.rotate_curve();
    let mut data = HealerStatic::new(config);
    let observed = observe(&mut data, 69);

    for tick in 1..=4 {
        let o = at(&observed, tick);
        assert_eq!(o.phase, HealPhase::Idle, "tick {tick}");
        assert!(!o.drop_effect);
    }

    let entered = at(&observed, 5);
    assert_eq!(entered.phase, HealPhase::Healing);
    assert_eq!(entered.angle, 0.0);
    assert_eq!(entered.scale, 1.0);

    let mut expected_angle = 0.0;
    for tick in 6..=65 {
        let step = (tick - 5) as f32;
        expected_angle += rotate_curve.value(step);
        let o = at(&observed, tick);
        assert_eq!(o.phase, HealPhase::Healing, "tick {tick}");
        assert!(!o.drop_effect, "tick {tick}");
        assert!(approx_eq(o.scale, scale_curve.value(step)), "tick {tick}");
        assert!(approx_eq(o.angle, expected_angle), "tick {tick}");
    }

    let completed = at(&observed, 66);
    assert_eq!(completed.phase, HealPhase::Idle);
    assert_eq!(completed.angle, 0.0);
    assert_eq!(completed.scale, 1.0);
    assert!(completed.drop_effect);

    assert_eq!(observed.iter().filter(|o| o.drop_effect).count(), 1);
    assert!(!at(&observed, 67).drop_effect);
}

#[test]
fn angle_accumulates_while_scale_is_replaced() {
    let config = config(1.0, 2.0);
    let scale_curve = config.scale_curve();
    let rotate_curve = config.rotate_curve();
    let mut data = HealerStatic::new(config);
    // enter on tick 1, then sample deep into the spin
    let observed = observe(&mut data, 40);

    let later = at(&observed, 40);
    let earlier = at(&observed, 39);
    assert!(approx_eq(later.angle - earlier.angle, rotate_curve.value(39.0)));
    assert!(approx_eq(later.scale, scale_curve.value(39.0)));
    assert!(later.angle > rotate_curve.value(39.0));
}

#[test]
fn zero_duration_completes_on_entering_tick() {
    for duration in [0.0, -1.0] {
        let mut data = HealerStatic::new(config(5.0, duration));
        let observed = observe(&mut data, 9);

        let entered = at(&observed, 5);
        assert_eq!(entered.phase, HealPhase::Idle);
        assert!(entered.drop_effect);
        assert_eq!(entered.angle, 0.0);
        assert_eq!(entered.scale, 1.0);
        assert!(entered.angle.is_finite() && entered.scale.is_finite());
        assert_eq!(observed.iter().filter(|o| o.drop_effect).count(), 1);
    }
}

#[test]
fn second_cycle_starts_on_next_idle_fire() {
    let mut data = HealerStatic::new(config(5.0, 2.0));
    let observed = observe(&mut data, 100);
    // fires at 10..65 land while healing; 70 is the first fire back in idle
    assert_eq!(at(&observed, 69).phase, HealPhase::Idle);
    assert_eq!(at(&observed, 70).phase, HealPhase::Healing);
    assert_eq!(at(&observed, 70).angle, 0.0);
}

fn settings() -> GameSettings {
    let mut settings = GameSettings::default();
    settings.insert(
        EntitySettings::new(healer::ENTITY_NAME)
            .with("speed", "3")
            .with("healInterval", "0.5")
            .with("healDuration", "0.5")
            .with("healAmount", "0.25")
            .with("healRadius", "2"),
    );
    settings.insert(EntitySettings::new("flyer").with("speed", "0"));
    settings
}

#[test]
fn healers_stand_still_while_healing() {
    let (mut game, _effects) = Game::new(settings());
    let id = game.spawn_healer(Vec2::ZERO, Vec2::X).unwrap();
    let position = |game: &Game| game.entity(id).unwrap().borrow().position();

    game.run(14);
    let before = position(&game);
    assert!(approx_eq(before.x, 14.0 * 3.0 / 30.0));

    // healing from tick 15 through 30
    game.run(16);
    assert_eq!(position(&game), before);

    // back to idle on the completing tick
    game.tick();
    assert!(position(&game).x > before.x);
}

#[test]
fn every_instance_emits_one_effect_per_cycle() {
    let (mut game, effects) = Game::new(settings());
    let a = game.spawn_healer(Vec2::new(1.0, 1.0), Vec2::ZERO).unwrap();
    let b = game.spawn_healer(Vec2::new(4.0, 1.0), Vec2::ZERO).unwrap();

    game.run(30);
    assert!(effects.try_recv().is_err());

    game.tick();
    let received: Vec<_> = effects.try_iter().collect();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].source, a);
    assert_eq!(received[1].source, b);
    assert_eq!(received[0].origin, Vec2::new(1.0, 1.0));
    assert_eq!(received[1].amount, 0.25);
    assert_eq!(received[1].radius, 2.0);
    assert!(received[0].already_healed.is_empty());

    game.run(10);
    assert!(effects.try_recv().is_err());
}

#[test]
fn effect_carries_snapshot_of_targets_healed_during_cycle() {
    let (mut game, effects) = Game::new(settings());
    game.spawn_healer(Vec2::ZERO, Vec2::ZERO).unwrap();
    let target = game.spawn_flyer(Vec2::ONE, Vec2::ZERO).unwrap();
    let data = game.healer_static().unwrap();

    game.run(31);
    let first = effects.try_recv().unwrap();
    assert!(first.already_healed.is_empty());

    // the collaborator heals the flyer once; a second report is a duplicate
    assert!(data.borrow_mut().record_healed(target));
    assert!(!data.borrow_mut().record_healed(target));
    assert!(first.already_healed.is_empty());

    // next cycle: fire at 45, complete at 61
    game.run(30);
    let second = effects.try_recv().unwrap();
    assert_eq!(second.already_healed.as_slice(), &[target]);
    assert!(!data.borrow().was_healed(target));
    assert!(data.borrow_mut().record_healed(target));
    assert_eq!(second.already_healed.as_slice(), &[target]);
}
