//! Per-tower combat state — target queue, fire control, and orders.
//!
//! These hold `hecs::Entity` references, so they live here rather than
//! in the core crate. `TowerCombat` is attached to attack tower
//! entities; `Projectile` to rounds in flight.

use std::collections::VecDeque;

use chronotower_core::enums::OrderState;

/// FIFO engagement queue with a distinguished current target.
#[derive(Debug, Clone, Default)]
pub struct TargetQueue {
    current: Option<hecs::Entity>,
    queue: VecDeque<hecs::Entity>,
}

impl TargetQueue {
    pub fn current(&self) -> Option<hecs::Entity> {
        self.current
    }

    /// Number of targets waiting behind the current one.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Enqueue a target. Duplicates (including the current target) are
    /// ignored; if nothing is engaged the new target is promoted
    /// immediately.
    pub fn add(&mut self, target: hecs::Entity) {
        if self.current == Some(target) || self.queue.contains(&target) {
            return;
        }
        self.queue.push_back(target);
        if self.current.is_none() {
            self.current = self.queue.pop_front();
        }
    }

    /// Drop a target from the queue and from the current slot. The next
    /// target is not promoted until the next [`advance`](Self::advance).
    pub fn remove(&mut self, target: hecs::Entity) {
        self.queue.retain(|e| *e != target);
        if self.current == Some(target) {
            self.current = None;
        }
    }

    /// Purge entries that no longer satisfy `alive` and promote the
    /// front of the queue if nothing is engaged. Idempotent when the
    /// world has not changed.
    pub fn advance(&mut self, mut alive: impl FnMut(hecs::Entity) -> bool) {
        if let Some(c) = self.current {
            if !alive(c) {
                self.current = None;
            }
        }
        self.queue.retain(|e| alive(*e));
        if self.current.is_none() {
            self.current = self.queue.pop_front();
        }
    }
}

/// Weapon cycling state.
#[derive(Debug, Clone)]
pub struct FireControl {
    cooldown: f64,
}

impl FireControl {
    /// A fresh weapon starts with a full cooldown, so the first shot
    /// lands one full cycle after engagement begins.
    pub fn new(fire_rate: f64) -> Self {
        Self {
            cooldown: Self::cycle_secs(fire_rate),
        }
    }

    fn cycle_secs(fire_rate: f64) -> f64 {
        if fire_rate > 0.0 {
            1.0 / fire_rate
        } else {
            0.0
        }
    }

    pub fn cooldown_remaining(&self) -> f64 {
        self.cooldown
    }

    /// Advance the cooldown by one effective delta and report whether
    /// the weapon fires. The cooldown decays even while `may_fire` is
    /// false, so a gated weapon fires immediately once released. A
    /// non-positive fire rate means no cooldown at all: one shot per
    /// eligible tick.
    pub fn tick(&mut self, dt_eff: f64, fire_rate: f64, may_fire: bool) -> bool {
        self.cooldown = (self.cooldown - dt_eff).max(0.0);
        if !may_fire || self.cooldown > 0.0 {
            return false;
        }
        self.cooldown = Self::cycle_secs(fire_rate);
        true
    }
}

/// Combat state component of an attack tower.
#[derive(Debug, Clone)]
pub struct TowerCombat {
    pub order: OrderState,
    pub targets: TargetQueue,
    pub fire: FireControl,
    /// Bonus objective designated by an `OrderAttackBonus` command.
    pub forced_target: Option<hecs::Entity>,
    /// Structure designated by an `OrderCapture` command.
    pub capture_target: Option<hecs::Entity>,
    pub beam_active: bool,
    /// Turret was within aim tolerance of the engaged target last tick.
    pub aimed: bool,
}

impl TowerCombat {
    pub fn new(fire_rate: f64) -> Self {
        Self {
            order: OrderState::default(),
            targets: TargetQueue::default(),
            fire: FireControl::new(fire_rate),
            forced_target: None,
            capture_target: None,
            beam_active: false,
            aimed: false,
        }
    }

    /// Clear order-specific assignments when leaving a state. The
    /// target queue survives order changes.
    pub fn clear_assignments(&mut self) {
        self.forced_target = None;
        self.capture_target = None;
        self.beam_active = false;
    }
}

/// A round in flight. Attached alongside `Position` and `Velocity`.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Homing target; cleared if the target dies mid-flight.
    pub target: Option<hecs::Entity>,
    pub damage: f64,
    /// Cruise speed in units per second of effective time.
    pub speed: f64,
    pub homing_accel: f64,
    pub homing: bool,
    /// Effective seconds in flight. Rewinding runs this backwards.
    pub age_secs: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hecs::World;

    fn entities(n: usize) -> Vec<hecs::Entity> {
        let mut world = World::new();
        (0..n).map(|i| world.spawn((i as u32,))).collect()
    }

    #[test]
    fn queue_is_fifo_with_immediate_first_promotion() {
        let e = entities(3);
        let mut q = TargetQueue::default();
        q.add(e[0]);
        assert_eq!(q.current(), Some(e[0]));
        q.add(e[1]);
        q.add(e[2]);
        assert_eq!(q.current(), Some(e[0]));
        assert_eq!(q.queued_len(), 2);

        q.remove(e[0]);
        assert_eq!(q.current(), None);
        q.advance(|_| true);
        assert_eq!(q.current(), Some(e[1]));
    }

    #[test]
    fn queue_ignores_duplicates() {
        let e = entities(2);
        let mut q = TargetQueue::default();
        q.add(e[0]);
        q.add(e[1]);
        q.add(e[0]);
        q.add(e[1]);
        assert_eq!(q.queued_len(), 1);
    }

    #[test]
    fn advance_purges_dead_and_is_idempotent() {
        let e = entities(4);
        let mut q = TargetQueue::default();
        for t in &e {
            q.add(*t);
        }
        // e0 engaged, e1..e3 queued; e0 and e2 die.
        let alive = |t: hecs::Entity| t != e[0] && t != e[2];
        q.advance(alive);
        assert_eq!(q.current(), Some(e[1]));
        assert_eq!(q.queued_len(), 1);
        q.advance(alive);
        assert_eq!(q.current(), Some(e[1]));
        assert_eq!(q.queued_len(), 1);
    }

    #[test]
    fn removing_current_target_does_not_auto_promote() {
        let e = entities(2);
        let mut q = TargetQueue::default();
        q.add(e[0]);
        q.add(e[1]);
        q.remove(e[0]);
        assert_eq!(q.current(), None);
        assert_eq!(q.queued_len(), 1);
    }

    #[test]
    fn fire_control_first_shot_after_one_full_cycle() {
        let mut fc = FireControl::new(2.0);
        let dt = 0.1;
        let mut fired_at = Vec::new();
        for step in 1..=16 {
            if fc.tick(dt, 2.0, true) {
                fired_at.push(step);
            }
        }
        assert_eq!(fired_at, vec![5, 10, 15]);
    }

    #[test]
    fn fire_control_decays_while_gated() {
        let mut fc = FireControl::new(1.0);
        for _ in 0..20 {
            assert!(!fc.tick(0.1, 1.0, false));
        }
        // Cooldown fully decayed while gated: first open tick fires.
        assert!(fc.tick(0.1, 1.0, true));
    }

    #[test]
    fn nonpositive_rate_means_a_shot_every_eligible_tick() {
        let mut fc = FireControl::new(0.0);
        for _ in 0..5 {
            assert!(fc.tick(0.1, 0.0, true));
        }
        assert!(!fc.tick(0.1, 0.0, false));
    }
}
