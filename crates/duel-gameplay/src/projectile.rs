//! Projectile motion, spawn delay and post-hit linger.
//!
//! Projectiles travel horizontally. After they are spawned they no longer
//! depend on the combatant that fired them; the `owner` field is kept only
//! to skip self-collision and to attribute hits.
//!
//! # Example
//!
//! ```
//! use duel_common::{CombatantId, Vec2};
//! use duel_gameplay::projectile::{Projectile, ProjectilePool};
//!
//! let mut pool = ProjectilePool::new();
//! let shot = Projectile::new(CombatantId::ONE, Vec2::new(300.0, 490.0), 1.0, 520.0)
//!     .with_damage(16.0)
//!     .with_radius(8.0);
//! let id = pool.spawn(shot);
//!
//! pool.update(1.0 / 60.0, 1280.0);
//! assert!(pool.get(id).is_some());
//! ```

use duel_common::{CombatantId, ProjectileId, Vec2};
use serde::{Deserialize, Serialize};

/// Lifecycle stage of a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectileState {
    /// Flying (or waiting out its spawn delay).
    #[default]
    Active,
    /// Landed a hit and is holding position.
    Lingering,
    /// Finished; removed at the next sweep.
    Spent,
}

/// A spawned attack instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    /// Unique identifier (assigned by [`ProjectilePool::spawn`]).
    pub id: ProjectileId,
    /// Combatant that fired this projectile.
    pub owner: CombatantId,
    /// Center position.
    pub position: Vec2,
    /// Horizontal travel direction (+1 or -1).
    pub direction: f32,
    /// Speed in units per second.
    pub speed: f32,
    /// Damage on a landed hit.
    pub damage: f32,
    /// Bounding-circle radius.
    pub radius: f32,
    /// Part of an ultimate.
    pub is_ultimate: bool,
    /// Decoy: never deals damage and is always blocked on contact.
    pub ghost: bool,
    /// Seconds to hold position after a landed hit (0 = despawn on hit).
    pub linger_duration: f32,
    /// Seconds after spawn before the projectile moves or collides.
    pub spawn_delay: f32,
    /// Seconds since spawn.
    pub elapsed: f32,
    /// Seconds of linger left.
    pub linger_remaining: f32,
    /// Current lifecycle stage.
    pub state: ProjectileState,
}

impl Projectile {
    /// Create a projectile travelling in `direction` at `speed`.
    #[must_use]
    pub fn new(owner: CombatantId, position: Vec2, direction: f32, speed: f32) -> Self {
        Self {
            id: ProjectileId::NULL,
            owner,
            position,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            speed: speed.max(0.0),
            damage: 0.0,
            radius: 8.0,
            is_ultimate: false,
            ghost: false,
            linger_duration: 0.0,
            spawn_delay: 0.0,
            elapsed: 0.0,
            linger_remaining: 0.0,
            state: ProjectileState::Active,
        }
    }

    /// Set damage.
    #[must_use]
    pub fn with_damage(mut self, damage: f32) -> Self {
        self.damage = damage.max(0.0);
        self
    }

    /// Set radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Mark as part of an ultimate.
    #[must_use]
    pub const fn as_ultimate(mut self) -> Self {
        self.is_ultimate = true;
        self
    }

    /// Mark as a decoy.
    #[must_use]
    pub fn as_ghost(mut self) -> Self {
        self.ghost = true;
        self.damage = 0.0;
        self
    }

    /// Set the post-hit linger time.
    #[must_use]
    pub fn with_linger(mut self, seconds: f32) -> Self {
        self.linger_duration = seconds.max(0.0);
        self
    }

    /// Set the spawn delay.
    #[must_use]
    pub fn with_delay(mut self, seconds: f32) -> Self {
        self.spawn_delay = seconds.max(0.0);
        self
    }

    /// Set ID.
    #[must_use]
    pub const fn with_id(mut self, id: ProjectileId) -> Self {
        self.id = id;
        self
    }

    /// Whether the spawn delay has elapsed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.elapsed >= self.spawn_delay
    }

    /// Whether the projectile is holding position after a hit.
    #[must_use]
    pub fn is_lingering(&self) -> bool {
        self.state == ProjectileState::Lingering
    }

    /// Whether the projectile should be removed.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.state == ProjectileState::Spent
    }

    /// Whether the projectile may be tested against combatants this tick.
    #[must_use]
    pub fn can_collide(&self) -> bool {
        self.state == ProjectileState::Active && self.is_armed()
    }

    /// Advance motion by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if !self.is_armed() {
            return;
        }

        match self.state {
            ProjectileState::Active => {
                self.position.x += self.direction * self.speed * dt;
            },
            ProjectileState::Lingering => {
                self.linger_remaining -= dt;
                if self.linger_remaining <= 0.0 {
                    self.linger_remaining = 0.0;
                    self.state = ProjectileState::Spent;
                }
            },
            ProjectileState::Spent => {},
        }
    }

    /// Freeze in place after a landed hit. Damage is zeroed so the
    /// lingering body cannot deal it again.
    pub fn begin_linger(&mut self) {
        self.damage = 0.0;
        self.linger_remaining = self.linger_duration;
        self.state = ProjectileState::Lingering;
    }

    /// Mark for removal.
    pub fn despawn(&mut self) {
        self.state = ProjectileState::Spent;
    }

    /// Whether the projectile has fully left an arena `width` wide.
    #[must_use]
    pub fn is_out_of_bounds(&self, width: f32) -> bool {
        self.position.x < -self.radius || self.position.x > width + self.radius
    }
}

/// Owns every live projectile, in spawn order.
#[derive(Debug, Default)]
pub struct ProjectilePool {
    projectiles: Vec<Projectile>,
    next_id: u64,
}

impl ProjectilePool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projectiles: Vec::new(),
            next_id: 1,
        }
    }

    /// Spawn a projectile, assigning it a fresh ID.
    pub fn spawn(&mut self, projectile: Projectile) -> ProjectileId {
        let id = ProjectileId::from_raw(self.next_id.max(1));
        self.next_id = id.raw() + 1;
        self.projectiles.push(projectile.with_id(id));
        id
    }

    /// Get a projectile by ID.
    #[must_use]
    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Iterate live projectiles in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Iterate live projectiles mutably in spawn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Projectile> {
        self.projectiles.iter_mut()
    }

    /// Live projectiles as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Advance every projectile and cull the ones outside the arena.
    /// Returns how many were removed.
    pub fn update(&mut self, dt: f32, arena_width: f32) -> usize {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
            if projectile.is_out_of_bounds(arena_width) {
                projectile.despawn();
            }
        }
        self.sweep()
    }

    /// Remove spent projectiles. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.is_spent());
        before - self.projectiles.len()
    }

    /// Number of live projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    /// Whether there are no live projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Remove every projectile.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn shot() -> Projectile {
        Projectile::new(CombatantId::ONE, Vec2::new(100.0, 50.0), 1.0, 100.0).with_damage(10.0)
    }

    #[test]
    fn test_straight_motion() {
        let mut p = shot();
        p.update(0.5);
        assert!((p.position.x - 150.0).abs() < 1e-4);
        assert_eq!(p.position.y, 50.0);
    }

    #[test]
    fn test_leftward_motion() {
        let mut p = Projectile::new(CombatantId::TWO, Vec2::new(100.0, 0.0), -1.0, 100.0);
        p.update(0.25);
        assert!((p.position.x - 75.0).abs() < 1e-4);
    }

    #[test]
    fn test_linger_holds_then_despawns() {
        let mut p = shot().with_linger(0.15);
        p.begin_linger();
        assert_eq!(p.damage, 0.0);
        assert!(p.is_lingering());
        assert!(!p.can_collide());

        p.update(0.1);
        assert_eq!(p.position.x, 100.0);
        assert!(!p.is_spent());

        p.update(0.1);
        assert!(p.is_spent());
        assert_eq!(p.position.x, 100.0);
    }

    #[test]
    fn test_ghost_has_no_damage() {
        let p = shot().as_ghost();
        assert!(p.ghost);
        assert_eq!(p.damage, 0.0);
    }

    #[test]
    fn test_pool_assigns_ids() {
        let mut pool = ProjectilePool::new();
        let a = pool.spawn(shot());
        let b = pool.spawn(shot());
        assert_ne!(a, b);
        assert!(a.is_valid() && b.is_valid());
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_pool_culls_out_of_bounds() {
        let mut pool = ProjectilePool::new();
        pool.spawn(Projectile::new(CombatantId::ONE, Vec2::new(1275.0, 0.0), 1.0, 600.0).with_radius(8.0));
        pool.spawn(Projectile::new(CombatantId::TWO, Vec2::new(5.0, 0.0), -1.0, 600.0).with_radius(8.0));
        pool.spawn(shot());

        let removed = pool.update(0.1, 1280.0);
        assert_eq!(removed, 2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_clear() {
        let mut pool = ProjectilePool::default();
        pool.spawn(shot());
        pool.clear();
        assert!(pool.is_empty());
    }

    proptest! {
        #[test]
        fn prop_spawn_delay_gates_motion(
            delay in 0.05f32..2.0,
            steps in prop::collection::vec(0.001f32..0.05, 1..40),
        ) {
            let mut p = shot().with_delay(delay);
            let start = p.position;
            for dt in steps {
                if p.elapsed + dt >= delay {
                    break;
                }
                p.update(dt);
                prop_assert_eq!(p.position, start);
                prop_assert!(!p.can_collide());
            }
        }

        #[test]
        fn prop_armed_projectile_moves(delay in 0.0f32..1.0, dt in 0.01f32..0.1) {
            let mut p = shot().with_delay(delay);
            p.elapsed = delay;
            prop_assert!(p.can_collide());
            p.update(dt);
            prop_assert!(p.position.x > 100.0);
        }
    }
}
