//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player
//! commands at tick boundaries, runs all systems under the warped game
//! clock, and produces `Snapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use chronotower_core::commands::PlayerCommand;
use chronotower_core::components::{CapturePoint, Hostile, Platform, Weapon};
use chronotower_core::constants::START_LIVES;
use chronotower_core::enums::{GameOutcome, HostileClass, OrderState, RemovalReason, Team};
use chronotower_core::events::SimEvent;
use chronotower_core::path::Path;
use chronotower_core::state::Snapshot;
use chronotower_core::types::{Position, SimTime, Velocity};
use chronotower_core::waves::WaveSet;

use crate::clock::GameClock;
use crate::combat::Projectile;
use crate::mission::MissionLedger;
use crate::systems;
use crate::systems::fire_control::FireRequest;
use crate::systems::wave_scheduler::WaveScheduler;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Spawn schedule for the mission.
    pub waves: WaveSet,
    /// Arena paths referenced by spawn lanes.
    pub paths: Vec<Path>,
    pub start_lives: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            waves: WaveSet::default(),
            paths: vec![Path::new(vec![
                Position::new(-2000.0, 0.0, 0.0),
                Position::new(2000.0, 0.0, 0.0),
            ])],
            start_lives: START_LIVES,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    clock: GameClock,
    ledger: MissionLedger,
    scheduler: WaveScheduler,
    paths: Vec<Path>,
    rng: ChaCha8Rng,
    next_platform_id: u32,
    next_hostile_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let scheduler = WaveScheduler::new(config.waves);
        let mut events = Vec::new();
        if let Some(seconds) = scheduler.time_until_next() {
            events.push(SimEvent::NextWaveScheduled { seconds });
        }
        Self {
            world: World::new(),
            time: SimTime::default(),
            clock: GameClock::default(),
            ledger: MissionLedger::new(config.start_lives),
            scheduler,
            paths: config.paths,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_platform_id: 0,
            next_hostile_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events,
        }
    }

    /// Place a defender attack tower with default armament.
    pub fn add_attack_tower(&mut self, position: Position) -> u32 {
        self.add_attack_tower_with(position, Weapon::default())
    }

    /// Place a defender attack tower with a custom armament.
    pub fn add_attack_tower_with(&mut self, position: Position, weapon: Weapon) -> u32 {
        let id = self.next_platform_id;
        self.next_platform_id += 1;
        world_setup::spawn_attack_tower(&mut self.world, id, position, weapon);
        id
    }

    /// Place a neutral capturable structure.
    pub fn add_capture_structure(&mut self, position: Position) -> u32 {
        let id = self.next_platform_id;
        self.next_platform_id += 1;
        world_setup::spawn_capture_structure(&mut self.world, id, position);
        id
    }

    /// Inject a hostile outside the wave schedule (scenario scripting).
    pub fn spawn_hostile(&mut self, class: HostileClass, path_index: usize) -> Option<u32> {
        self.spawn_scheduled_hostile(class, path_index)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> Snapshot {
        self.process_commands();

        if !self.ledger.is_over() {
            self.run_systems();
            self.time.advance();
        }
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            &self.clock,
            &self.ledger,
            &self.scheduler,
            &self.paths,
            events,
        )
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Direct world access for tests and tooling.
    pub fn world(&self) -> &World {
        &self.world
    }

    fn run_systems(&mut self) {
        let raw_dt = self.time.dt();
        let scale = self.clock.scale();

        systems::orders::run(&mut self.world, &mut self.events);
        systems::targeting::run(&mut self.world);

        let fired = systems::fire_control::run(&mut self.world, scale, raw_dt, &mut self.events);
        for request in fired {
            self.spawn_projectile(request);
        }

        systems::capture::run(&mut self.world, scale, raw_dt, &mut self.events);

        let was_running = self.scheduler.is_running();
        let spawns = self
            .scheduler
            .run(&mut self.rng, scale, raw_dt, &mut self.events);
        for spawn in spawns {
            self.spawn_scheduled_hostile(spawn.class, spawn.path_index);
        }
        if was_running && !self.scheduler.is_running() {
            // A final wave can end without a removal (miswired lanes).
            self.check_victory();
        }

        let leaked = systems::movement::run(&mut self.world, scale, raw_dt, &self.paths);
        for hostile in leaked {
            self.remove_hostile(hostile, RemovalReason::Leaked);
        }

        let (hits, spent) = systems::projectile::run(&mut self.world, scale, raw_dt);
        self.despawn_buffer.extend(spent);
        for hit in hits {
            self.apply_hostile_damage(hit.target, hit.damage);
        }

        // Rewind bookkeeping runs on raw time.
        self.ledger.charge_rewind(scale, raw_dt);
        if self.clock.is_rewinding() && self.ledger.drain_meter(raw_dt) {
            self.clock.stop_rewind();
        }
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            // All commands are inert once the mission has ended.
            if self.ledger.is_over() {
                continue;
            }
            match command {
                PlayerCommand::SetSpeedMode { mode } => self.clock.set_mode(mode),
                PlayerCommand::SetSpeed { scale } => self.clock.set_scale(scale),
                PlayerCommand::StartRewind => {
                    if !self.clock.is_rewinding() && self.ledger.can_rewind() {
                        self.clock.start_rewind();
                    }
                }
                PlayerCommand::StopRewind => self.clock.stop_rewind(),
                PlayerCommand::OrderCapture {
                    tower_id,
                    structure_id,
                } => {
                    if let Some(tower) = self.find_tower(tower_id) {
                        let structure = self.find_structure(structure_id);
                        systems::orders::apply_order(
                            &mut self.world,
                            tower,
                            OrderState::CaptureTower,
                            structure,
                            &mut self.events,
                        );
                    }
                }
                PlayerCommand::OrderAttackBonus {
                    tower_id,
                    target_id,
                } => {
                    if let Some(tower) = self.find_tower(tower_id) {
                        let target = self.find_hostile(target_id);
                        systems::orders::apply_order(
                            &mut self.world,
                            tower,
                            OrderState::AttackBonus,
                            target,
                            &mut self.events,
                        );
                    }
                }
                PlayerCommand::OrderAttack { tower_id } => {
                    self.apply_plain_order(tower_id, OrderState::AttackEnemies)
                }
                PlayerCommand::OrderHoldFire { tower_id } => {
                    self.apply_plain_order(tower_id, OrderState::HoldFire)
                }
                PlayerCommand::OrderDisable { tower_id } => {
                    self.apply_plain_order(tower_id, OrderState::Disabled)
                }
                PlayerCommand::RequestNextWave => {
                    self.scheduler.request_next_wave_now(&mut self.events)
                }
                PlayerCommand::DamageHostile { hostile_id, amount } => {
                    if let Some(hostile) = self.find_hostile(hostile_id) {
                        self.apply_hostile_damage(hostile, amount);
                    }
                }
                PlayerCommand::DamageStructure {
                    structure_id,
                    amount,
                    as_team,
                } => {
                    if let Some(structure) = self.find_structure(structure_id) {
                        self.apply_structure_damage(structure, amount, as_team);
                    }
                }
            }
        }
    }

    fn apply_plain_order(&mut self, tower_id: u32, state: OrderState) {
        if let Some(tower) = self.find_tower(tower_id) {
            systems::orders::apply_order(&mut self.world, tower, state, None, &mut self.events);
        }
    }

    fn find_tower(&self, id: u32) -> Option<Entity> {
        self.world
            .query::<(&Platform, &crate::combat::TowerCombat)>()
            .iter()
            .find(|(_, (platform, _))| platform.id == id)
            .map(|(e, _)| e)
    }

    fn find_structure(&self, id: u32) -> Option<Entity> {
        self.world
            .query::<(&Platform, &CapturePoint)>()
            .iter()
            .find(|(_, (platform, _))| platform.id == id)
            .map(|(e, _)| e)
    }

    fn find_hostile(&self, id: u32) -> Option<Entity> {
        self.world
            .query::<&Hostile>()
            .iter()
            .find(|(_, hostile)| hostile.id == id)
            .map(|(e, _)| e)
    }

    fn spawn_scheduled_hostile(&mut self, class: HostileClass, path_index: usize) -> Option<u32> {
        let path = self.paths.get(path_index)?;
        let id = self.next_hostile_id;
        self.next_hostile_id += 1;
        world_setup::spawn_hostile(&mut self.world, id, class, path, path_index);
        self.ledger.note_hostile_spawned();
        self.events.push(SimEvent::HostileSpawned {
            hostile_id: id,
            class,
        });
        Some(id)
    }

    fn spawn_projectile(&mut self, request: FireRequest) {
        let Ok(target_pos) = self.world.get::<&Position>(request.target).map(|p| *p) else {
            return;
        };
        let direction = (target_pos.as_vec() - request.origin.as_vec()).normalize_or_zero();
        let velocity = Velocity::from_vec(direction * request.weapon.projectile_speed);
        self.world.spawn((
            Projectile {
                target: Some(request.target),
                damage: request.weapon.projectile_damage,
                speed: request.weapon.projectile_speed,
                homing_accel: request.weapon.homing_accel,
                homing: true,
                age_secs: 0.0,
            },
            request.origin,
            velocity,
        ));
    }

    /// Apply damage to a hostile; a kill is scored at most once.
    fn apply_hostile_damage(&mut self, target: Entity, amount: f64) {
        if amount <= 0.0 || self.despawn_buffer.contains(&target) {
            return;
        }
        let killed = {
            let Ok(hostile) = self.world.query_one_mut::<&mut Hostile>(target) else {
                return;
            };
            if !hostile.is_alive() {
                return;
            }
            hostile.health = (hostile.health - amount).max(0.0);
            if hostile.is_alive() {
                None
            } else {
                Some(hostile.bounty)
            }
        };
        if let Some(bounty) = killed {
            self.ledger.award_kill(bounty, self.clock.scale());
            self.remove_hostile(target, RemovalReason::Killed);
        }
    }

    /// Scripted capture damage on behalf of a team.
    fn apply_structure_damage(&mut self, structure: Entity, amount: f64, as_team: Team) {
        if amount <= 0.0 || as_team == Team::Neutral {
            return;
        }
        let neutral = self
            .world
            .get::<&Platform>(structure)
            .map(|p| p.team == Team::Neutral)
            .unwrap_or(false);
        if !neutral {
            return;
        }
        let structure_id = match self.world.get::<&Platform>(structure) {
            Ok(p) => p.id,
            Err(_) => return,
        };
        let captured = {
            let Ok(point) = self.world.query_one_mut::<&mut CapturePoint>(structure) else {
                return;
            };
            point.hp = (point.hp - amount).max(0.0);
            let captured = point.hp <= 0.0;
            if captured {
                point.hp = point.hp_max;
            }
            let hp_report = if captured { 0.0 } else { point.hp };
            self.events.push(SimEvent::CaptureProgress {
                structure_id,
                hp: hp_report,
                hp_max: point.hp_max,
            });
            captured
        };
        if captured {
            if let Ok(platform) = self.world.query_one_mut::<&mut Platform>(structure) {
                platform.team = as_team;
            }
            self.events.push(SimEvent::StructureCaptured {
                structure_id,
                new_owner: as_team,
            });
        }
    }

    /// Remove a hostile from play and settle the mission consequences.
    /// Idempotent within a tick; a hostile leaks or dies, never both.
    fn remove_hostile(&mut self, hostile: Entity, reason: RemovalReason) {
        if self.despawn_buffer.contains(&hostile) {
            return;
        }
        let Ok(id) = self.world.get::<&Hostile>(hostile).map(|h| h.id) else {
            return;
        };
        self.despawn_buffer.push(hostile);
        self.ledger.note_hostile_removed();
        self.events.push(SimEvent::HostileRemoved {
            hostile_id: id,
            reason,
        });

        if reason == RemovalReason::Leaked && self.ledger.lose_life() {
            self.finish(GameOutcome::Defeat);
        }
        self.check_victory();
    }

    fn check_victory(&mut self) {
        // A mission with no waves at all (scripted scenarios) never
        // resolves to victory on its own.
        if self.scheduler.total_waves() == 0 {
            return;
        }
        if !self.ledger.is_over()
            && !self.scheduler.is_running()
            && !self.scheduler.has_more_waves()
            && self.ledger.hostiles_alive() == 0
        {
            self.finish(GameOutcome::Victory);
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        if self.ledger.is_over() {
            return;
        }
        self.ledger.finish(outcome);
        self.clock.freeze();
        self.events.push(SimEvent::GameOver {
            outcome,
            final_score: self.ledger.score_rounded(),
            elapsed_secs: self.time.elapsed_secs,
        });
    }
}
