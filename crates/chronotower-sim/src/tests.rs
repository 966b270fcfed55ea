//! Integration tests driving the engine through commands and snapshots.

use chronotower_core::commands::PlayerCommand;
use chronotower_core::components::Weapon;
use chronotower_core::constants::{REVERSE_METER_MAX, START_LIVES};
use chronotower_core::enums::{GameOutcome, HostileClass, OrderState, RemovalReason, SpeedMode, Team};
use chronotower_core::events::SimEvent;
use chronotower_core::path::Path;
use chronotower_core::state::Snapshot;
use chronotower_core::types::Position;
use chronotower_core::waves::{SpawnLane, Wave, WaveSet};

use crate::{SimConfig, SimulationEngine};

/// A path starting inside default tower range and running far out.
fn long_path() -> Path {
    Path::new(vec![
        Position::new(500.0, 0.0, 0.0),
        Position::new(20000.0, 0.0, 0.0),
    ])
}

fn single_wave(
    class: HostileClass,
    count: u32,
    interval: f64,
    jitter: f64,
    before: f64,
) -> WaveSet {
    WaveSet {
        waves: vec![Wave {
            name: "assault".into(),
            time_before_wave: before,
            lanes: vec![SpawnLane {
                class: Some(class),
                path_index: 0,
                spawn_count: count,
                first_spawn_delay: 0.0,
                spawn_interval: interval,
                spawn_jitter: jitter,
            }],
        }],
        loop_waves: false,
    }
}

fn engine_with(waves: WaveSet) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        seed: 42,
        waves,
        paths: vec![long_path()],
        start_lives: START_LIVES,
    })
}

fn scripted_engine() -> SimulationEngine {
    engine_with(WaveSet::default())
}

/// A long-range, one-hit-kill armament for scripted scenarios.
fn sniper() -> Weapon {
    Weapon {
        fire_rate: 2.0,
        attack_range: 20000.0,
        projectile_damage: 1000.0,
        ..Weapon::default()
    }
}

fn run_ticks(engine: &mut SimulationEngine, n: usize) -> Vec<Snapshot> {
    (0..n).map(|_| engine.tick()).collect()
}

fn all_events(snapshots: &[Snapshot]) -> Vec<SimEvent> {
    snapshots.iter().flat_map(|s| s.events.clone()).collect()
}

fn ready_to_fire_ticks(snapshots: &[Snapshot]) -> Vec<usize> {
    snapshots
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            s.events
                .iter()
                .any(|e| matches!(e, SimEvent::ReadyToFire { .. }))
        })
        .map(|(i, _)| i + 1)
        .collect()
}

// --- Clock -------------------------------------------------------------

#[test]
fn paused_clock_freezes_gameplay_but_elapsed_time_still_ticks() {
    let mut engine = engine_with(single_wave(HostileClass::Soldier, 3, 1.0, 0.0, 5.0));
    engine.queue_command(PlayerCommand::SetSpeed { scale: 0.0 });
    let snapshots = run_ticks(&mut engine, 30);
    let last = snapshots.last().unwrap();

    assert_eq!(last.clock.scale, 0.0);
    assert!((last.time.elapsed_secs - 1.0).abs() < 1e-9);
    assert_eq!(last.wave.time_until_next, Some(5.0));
    assert!(!all_events(&snapshots)
        .iter()
        .any(|e| matches!(e, SimEvent::HostileSpawned { .. })));
}

#[test]
fn manual_rewind_round_trip_restores_custom_scale() {
    let mut engine = scripted_engine();
    engine.queue_command(PlayerCommand::SetSpeed { scale: 2.0 });
    engine.tick();

    engine.queue_command(PlayerCommand::StartRewind);
    let snap = engine.tick();
    assert!(snap.clock.rewinding);
    assert_eq!(snap.clock.scale, -3.0);

    run_ticks(&mut engine, 15);
    engine.queue_command(PlayerCommand::StopRewind);
    let snap = engine.tick();
    assert!(!snap.clock.rewinding);
    assert_eq!(snap.clock.scale, 2.0);
    // Rewinding charged the score and drained the meter.
    assert!(snap.mission.score < 0);
    assert!(snap.clock.reverse_meter < REVERSE_METER_MAX);
}

#[test]
fn rewind_auto_stops_when_meter_empties() {
    let mut engine = scripted_engine();
    engine.queue_command(PlayerCommand::StartRewind);
    let snapshots = run_ticks(&mut engine, 130);
    let last = snapshots.last().unwrap();

    assert!(!last.clock.rewinding);
    assert_eq!(last.clock.scale, 1.0);
    assert_eq!(last.clock.reverse_meter, 0.0);

    // An empty meter refuses a new rewind.
    engine.queue_command(PlayerCommand::StartRewind);
    let snap = engine.tick();
    assert!(!snap.clock.rewinding);
    assert_eq!(snap.clock.scale, 1.0);
}

// --- Waves -------------------------------------------------------------

#[test]
fn wave_countdown_and_lane_cadence() {
    let mut engine = engine_with(single_wave(HostileClass::Soldier, 3, 1.0, 0.0, 1.0));
    let snapshots = run_ticks(&mut engine, 150);
    let events = all_events(&snapshots);

    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SimEvent::NextWaveScheduled { .. }))
            .count(),
        1
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SimEvent::WaveStarted { .. }))
            .count(),
        1
    );

    let spawn_ticks: Vec<usize> = snapshots
        .iter()
        .enumerate()
        .filter(|(_, s)| {
            s.events
                .iter()
                .any(|e| matches!(e, SimEvent::HostileSpawned { .. }))
        })
        .map(|(i, _)| i + 1)
        .collect();
    assert_eq!(spawn_ticks.len(), 3);
    // One-second countdown, then one spawn per second at 30 Hz.
    assert!((30..=32).contains(&spawn_ticks[0]), "first spawn at {}", spawn_ticks[0]);
    for pair in spawn_ticks.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((30..=32).contains(&gap), "spawn gap was {gap} ticks");
    }

    let last = snapshots.last().unwrap();
    assert!(!last.wave.wave_running);
    assert!(!last.wave.has_more_waves);
    assert_eq!(last.mission.hostiles_alive, 3);
}

#[test]
fn request_next_wave_skips_the_countdown() {
    let mut engine = engine_with(single_wave(HostileClass::Soldier, 1, 1.0, 0.0, 30.0));
    engine.queue_command(PlayerCommand::RequestNextWave);
    let snap = engine.tick();

    assert!(snap.wave.wave_running);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WaveStarted { index: 0, .. })));
}

#[test]
fn fast_clock_compresses_the_wave_countdown() {
    let mut engine = engine_with(single_wave(HostileClass::Soldier, 1, 1.0, 0.0, 5.0));
    engine.queue_command(PlayerCommand::SetSpeedMode {
        mode: SpeedMode::VeryFast,
    });
    let snapshots = run_ticks(&mut engine, 35);

    let started_at = snapshots
        .iter()
        .position(|s| {
            s.events
                .iter()
                .any(|e| matches!(e, SimEvent::WaveStarted { .. }))
        })
        .expect("wave should start");
    // Five seconds of countdown at scale 5 is one raw second.
    assert!((28..=31).contains(&(started_at + 1)), "started at tick {}", started_at + 1);
}

// --- Combat ------------------------------------------------------------

#[test]
fn tower_fires_one_cycle_after_engagement_then_on_cadence() {
    let mut engine = scripted_engine();
    engine.add_attack_tower_with(Position::new(0.0, 0.0, 0.0), sniper());
    engine.spawn_hostile(HostileClass::Juggernaut, 0);

    let snapshots = run_ticks(&mut engine, 50);
    let fire_ticks = ready_to_fire_ticks(&snapshots);
    assert!(!fire_ticks.is_empty());
    // Fire rate 2.0 at 30 Hz: one cycle is 15 ticks.
    assert!((15..=16).contains(&fire_ticks[0]), "first shot at {}", fire_ticks[0]);
    for pair in fire_ticks.windows(2) {
        let gap = pair[1] - pair[0];
        assert!((15..=16).contains(&gap), "fire gap was {gap} ticks");
    }
}

#[test]
fn projectile_kill_awards_bounty_and_refills_meter() {
    let mut engine = scripted_engine();
    engine.add_attack_tower_with(Position::new(0.0, 0.0, 0.0), sniper());
    engine.spawn_hostile(HostileClass::Soldier, 0);

    let snapshots = run_ticks(&mut engine, 60);
    let events = all_events(&snapshots);
    assert!(events.contains(&SimEvent::HostileRemoved {
        hostile_id: 0,
        reason: RemovalReason::Killed,
    }));

    let last = snapshots.last().unwrap();
    assert_eq!(last.mission.score, 100);
    assert_eq!(last.mission.hostiles_alive, 0);
    assert_eq!(last.clock.reverse_meter, REVERSE_METER_MAX);
    assert!(last.projectiles.is_empty());
}

#[test]
fn kills_at_paused_clock_award_nothing() {
    let mut engine = scripted_engine();
    engine.spawn_hostile(HostileClass::Soldier, 0);
    engine.queue_command(PlayerCommand::SetSpeed { scale: 0.0 });
    engine.queue_command(PlayerCommand::DamageHostile {
        hostile_id: 0,
        amount: 1000.0,
    });
    let snap = engine.tick();

    assert_eq!(snap.mission.score, 0);
    assert_eq!(snap.mission.hostiles_alive, 0);
    assert!(snap.events.contains(&SimEvent::HostileRemoved {
        hostile_id: 0,
        reason: RemovalReason::Killed,
    }));
}

#[test]
fn kill_bounty_is_multiplied_by_clock_scale() {
    let mut engine = scripted_engine();
    engine.spawn_hostile(HostileClass::Soldier, 0);
    engine.queue_command(PlayerCommand::SetSpeedMode {
        mode: SpeedMode::Fast,
    });
    engine.queue_command(PlayerCommand::DamageHostile {
        hostile_id: 0,
        amount: 1000.0,
    });
    let snap = engine.tick();
    assert_eq!(snap.mission.score, 300);
}

// --- Orders ------------------------------------------------------------

#[test]
fn hold_fire_blocks_shots_but_cooldown_keeps_decaying() {
    let mut engine = scripted_engine();
    let tower = engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    engine.spawn_hostile(HostileClass::Juggernaut, 0);
    engine.queue_command(PlayerCommand::OrderHoldFire { tower_id: tower });

    let held = run_ticks(&mut engine, 60);
    assert!(ready_to_fire_ticks(&held).is_empty());
    assert_eq!(
        held.last().unwrap().towers[0].order_state,
        Some(OrderState::HoldFire)
    );

    engine.queue_command(PlayerCommand::OrderAttack { tower_id: tower });
    let released = run_ticks(&mut engine, 3);
    assert!(
        !ready_to_fire_ticks(&released).is_empty(),
        "fully decayed cooldown should fire immediately on release"
    );
}

#[test]
fn disabled_tower_keeps_tracking_targets() {
    let mut engine = scripted_engine();
    let tower = engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    engine.spawn_hostile(HostileClass::Juggernaut, 0);
    engine.queue_command(PlayerCommand::OrderDisable { tower_id: tower });

    let snapshots = run_ticks(&mut engine, 30);
    let last = snapshots.last().unwrap();
    assert!(ready_to_fire_ticks(&snapshots).is_empty());
    // The target queue survives the order state.
    assert_eq!(last.towers[0].current_target, Some(0));
}

#[test]
fn bonus_order_suspends_normal_engagement() {
    let mut engine = scripted_engine();
    let tower = engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    engine.spawn_hostile(HostileClass::Juggernaut, 0);
    engine.queue_command(PlayerCommand::OrderAttackBonus {
        tower_id: tower,
        target_id: 0,
    });

    let snapshots = run_ticks(&mut engine, 60);
    assert!(ready_to_fire_ticks(&snapshots).is_empty());
    assert_eq!(
        snapshots.last().unwrap().towers[0].order_state,
        Some(OrderState::AttackBonus)
    );
}

// --- Capture -----------------------------------------------------------

#[test]
fn capture_beam_drains_structure_and_flips_ownership() {
    let mut engine = scripted_engine();
    let tower = engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    let structure = engine.add_capture_structure(Position::new(500.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::SetSpeedMode {
        mode: SpeedMode::VeryFast,
    });
    engine.queue_command(PlayerCommand::OrderCapture {
        tower_id: tower,
        structure_id: structure,
    });

    let snapshots = run_ticks(&mut engine, 80);
    let events = all_events(&snapshots);
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::CaptureBeamStarted { structure_id, .. } if *structure_id == structure
    )));
    assert!(events.iter().any(|e| matches!(e, SimEvent::CaptureProgress { .. })));
    assert!(events.contains(&SimEvent::StructureCaptured {
        structure_id: structure,
        new_owner: Team::Defender,
    }));

    let last = snapshots.last().unwrap();
    let view = last.towers.iter().find(|t| t.id == structure).unwrap();
    assert_eq!(view.team, Team::Defender);
    // Integrity resets after the flip.
    assert_eq!(view.capture_hp, view.capture_hp_max);
    let tower_view = last.towers.iter().find(|t| t.id == tower).unwrap();
    assert_eq!(tower_view.order_state, Some(OrderState::AttackEnemies));
    assert!(!tower_view.beam_active);

    // The structure is no longer neutral; a re-capture order falls back.
    engine.queue_command(PlayerCommand::OrderCapture {
        tower_id: tower,
        structure_id: structure,
    });
    let snap = engine.tick();
    let tower_view = snap.towers.iter().find(|t| t.id == tower).unwrap();
    assert_eq!(tower_view.order_state, Some(OrderState::AttackEnemies));
}

#[test]
fn capture_order_against_missing_target_falls_back_to_attack() {
    let mut engine = scripted_engine();
    let tower = engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::OrderCapture {
        tower_id: tower,
        structure_id: 999,
    });
    let snap = engine.tick();
    assert_eq!(snap.towers[0].order_state, Some(OrderState::AttackEnemies));
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::CaptureBeamStarted { .. })));
}

#[test]
fn scripted_structure_damage_flips_ownership() {
    let mut engine = scripted_engine();
    let structure = engine.add_capture_structure(Position::new(500.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::DamageStructure {
        structure_id: structure,
        amount: 60.0,
        as_team: Team::Hostile,
    });
    let snap = engine.tick();
    let view = snap.towers.iter().find(|t| t.id == structure).unwrap();
    assert_eq!(view.team, Team::Neutral);
    assert_eq!(view.capture_hp, Some(40.0));

    engine.queue_command(PlayerCommand::DamageStructure {
        structure_id: structure,
        amount: 40.0,
        as_team: Team::Hostile,
    });
    let snap = engine.tick();
    assert!(snap.events.contains(&SimEvent::StructureCaptured {
        structure_id: structure,
        new_owner: Team::Hostile,
    }));
    let view = snap.towers.iter().find(|t| t.id == structure).unwrap();
    assert_eq!(view.team, Team::Hostile);
}

// --- Mission end -------------------------------------------------------

#[test]
fn leak_on_last_life_is_a_terminal_defeat() {
    let short_path = Path::new(vec![
        Position::new(0.0, 0.0, 0.0),
        Position::new(100.0, 0.0, 0.0),
    ]);
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 42,
        waves: single_wave(HostileClass::Soldier, 1, 1.0, 0.0, 0.0),
        paths: vec![short_path],
        start_lives: 1,
    });

    let snapshots = run_ticks(&mut engine, 40);
    let events = all_events(&snapshots);
    assert!(events.contains(&SimEvent::HostileRemoved {
        hostile_id: 0,
        reason: RemovalReason::Leaked,
    }));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, SimEvent::GameOver { outcome: GameOutcome::Defeat, .. }))
            .count(),
        1
    );

    let last = snapshots.last().unwrap();
    assert_eq!(last.mission.outcome, Some(GameOutcome::Defeat));
    assert_eq!(last.mission.lives, 0);
    assert_eq!(last.clock.scale, 0.0);

    // Terminal state: the clock is pinned and time stands still.
    let elapsed = last.time.elapsed_secs;
    engine.queue_command(PlayerCommand::SetSpeedMode {
        mode: SpeedMode::Fast,
    });
    let snap = engine.tick();
    assert_eq!(snap.clock.scale, 0.0);
    assert_eq!(snap.time.elapsed_secs, elapsed);
}

#[test]
fn clearing_the_final_wave_is_a_victory() {
    let mut engine = engine_with(single_wave(HostileClass::Soldier, 1, 1.0, 0.0, 0.0));
    engine.add_attack_tower_with(Position::new(0.0, 0.0, 0.0), sniper());

    let snapshots = run_ticks(&mut engine, 100);
    let events = all_events(&snapshots);
    let game_over: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SimEvent::GameOver {
                outcome,
                final_score,
                ..
            } => Some((*outcome, *final_score)),
            _ => None,
        })
        .collect();
    assert_eq!(game_over, vec![(GameOutcome::Victory, 100)]);
    assert_eq!(
        snapshots.last().unwrap().mission.outcome,
        Some(GameOutcome::Victory)
    );
}

// --- Determinism -------------------------------------------------------

fn scripted_run(seed: u64) -> Vec<String> {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        waves: WaveSet {
            waves: vec![
                Wave {
                    name: "first".into(),
                    time_before_wave: 0.5,
                    lanes: vec![SpawnLane {
                        class: Some(HostileClass::Runner),
                        path_index: 0,
                        spawn_count: 4,
                        first_spawn_delay: 0.0,
                        spawn_interval: 0.8,
                        spawn_jitter: 0.5,
                    }],
                },
                Wave {
                    name: "second".into(),
                    time_before_wave: 2.0,
                    lanes: vec![SpawnLane {
                        class: Some(HostileClass::Soldier),
                        path_index: 0,
                        spawn_count: 3,
                        first_spawn_delay: 0.5,
                        spawn_interval: 1.0,
                        spawn_jitter: 0.3,
                    }],
                },
            ],
            loop_waves: false,
        },
        paths: vec![long_path()],
        start_lives: START_LIVES,
    });
    engine.add_attack_tower(Position::new(0.0, 0.0, 0.0));
    engine.queue_command(PlayerCommand::SetSpeedMode {
        mode: SpeedMode::Fast,
    });

    let mut serialized = Vec::new();
    for tick in 0..200 {
        if tick == 50 {
            engine.queue_command(PlayerCommand::StartRewind);
        }
        if tick == 70 {
            engine.queue_command(PlayerCommand::StopRewind);
        }
        let snap = engine.tick();
        serialized.push(serde_json::to_string(&snap).expect("snapshot serializes"));
    }
    serialized
}

#[test]
fn same_seed_and_commands_produce_identical_snapshots() {
    assert_eq!(scripted_run(1234), scripted_run(1234));
}
