//! Builds the per-tick observable snapshot.
//!
//! Read-only over the world; all views are sorted by external id so
//! snapshots are stable regardless of archetype iteration order.

use std::collections::HashMap;

use hecs::{Entity, World};

use chronotower_core::components::{CapturePoint, Hostile, PathFollower, Platform, Turret};
use chronotower_core::constants::REVERSE_METER_MAX;
use chronotower_core::events::SimEvent;
use chronotower_core::path::Path;
use chronotower_core::state::{
    ClockView, HostileView, MissionView, ProjectileView, Snapshot, TowerView, WaveView,
};
use chronotower_core::types::{Position, SimTime};

use crate::clock::GameClock;
use crate::combat::{Projectile, TowerCombat};
use crate::mission::MissionLedger;
use crate::systems::wave_scheduler::WaveScheduler;

#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    clock: &GameClock,
    ledger: &MissionLedger,
    scheduler: &WaveScheduler,
    paths: &[Path],
    events: Vec<SimEvent>,
) -> Snapshot {
    // External ids of live hostiles, for target references.
    let hostile_ids: HashMap<Entity, u32> = world
        .query::<&Hostile>()
        .iter()
        .map(|(e, h)| (e, h.id))
        .collect();

    let mut towers: Vec<TowerView> = world
        .query::<(&Platform, &Position)>()
        .iter()
        .map(|(entity, (platform, pos))| {
            let combat = world.get::<&TowerCombat>(entity).ok();
            let turret = world.get::<&Turret>(entity).ok();
            let capture = world.get::<&CapturePoint>(entity).ok();
            TowerView {
                id: platform.id,
                position: *pos,
                team: platform.team,
                order_state: combat.as_ref().map(|c| c.order),
                current_target: combat
                    .as_ref()
                    .and_then(|c| c.targets.current())
                    .and_then(|t| hostile_ids.get(&t).copied()),
                queued_targets: combat
                    .as_ref()
                    .map(|c| c.targets.queued_len() as u32)
                    .unwrap_or(0),
                yaw: turret.as_ref().map(|t| t.yaw),
                aimed: combat.as_ref().map(|c| c.aimed).unwrap_or(false),
                cooldown_remaining: combat.as_ref().map(|c| c.fire.cooldown_remaining()),
                capture_hp: capture.as_ref().map(|c| c.hp),
                capture_hp_max: capture.as_ref().map(|c| c.hp_max),
                beam_active: combat.as_ref().map(|c| c.beam_active).unwrap_or(false),
            }
        })
        .collect();
    towers.sort_by_key(|t| t.id);

    let mut hostiles: Vec<HostileView> = world
        .query::<(&Hostile, &PathFollower, &Position)>()
        .iter()
        .map(|(_, (hostile, follower, pos))| HostileView {
            id: hostile.id,
            class: hostile.class,
            position: *pos,
            health: hostile.health,
            health_max: hostile.health_max,
            path_fraction: paths
                .get(follower.path_index)
                .map(|p| p.fraction(follower.distance))
                .unwrap_or(0.0),
        })
        .collect();
    hostiles.sort_by_key(|h| h.id);

    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position)>()
        .iter()
        .map(|(_, (proj, pos))| ProjectileView {
            position: *pos,
            target_id: proj.target.and_then(|t| hostile_ids.get(&t).copied()),
        })
        .collect();
    projectiles.sort_by(|a, b| {
        a.target_id
            .cmp(&b.target_id)
            .then(a.position.x.total_cmp(&b.position.x))
    });

    Snapshot {
        time: *time,
        clock: ClockView {
            scale: clock.scale(),
            mode: clock.mode(),
            rewinding: clock.is_rewinding(),
            reverse_meter: ledger.reverse_meter(),
            reverse_meter_max: REVERSE_METER_MAX,
        },
        mission: MissionView {
            score: ledger.score_rounded(),
            lives: ledger.lives(),
            outcome: ledger.outcome(),
            hostiles_alive: ledger.hostiles_alive(),
        },
        wave: WaveView {
            current_index: scheduler.current_index(),
            total_waves: scheduler.total_waves(),
            wave_running: scheduler.is_running(),
            time_until_next: scheduler.time_until_next(),
            has_more_waves: scheduler.has_more_waves(),
        },
        towers,
        hostiles,
        projectiles,
        events,
    }
}
