//! Camera-relative rain particles
//!
//! A fixed pool of particle slots. Each slot stores an offset from the camera
//! rather than a world position, so the rain volume follows the viewer. Slots
//! are never added or removed: a slot whose life runs out, or which falls
//! below the floor, is respawned in place.
//!
//! Only every second slot is advanced and drawn (`SLOT_STRIDE`). Odd slots are
//! spawned at startup and then left untouched.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Serialize, Deserialize};

/// Default pool size
pub const DEFAULT_CAPACITY: usize = 3000;
/// Height above the camera at which a slot respawns
pub const SPAWN_HEIGHT: f32 = 10.0;
/// Offset below which a slot is forced to respawn
pub const FLOOR_HEIGHT: f32 = -10.0;
/// Vertical length of a rain streak
pub const STREAK_LENGTH: f32 = 0.1;

const SLOT_STRIDE: usize = 2;
/// Horizontal offsets are whole numbers in [-SPREAD, SPREAD]
const SPREAD: u32 = 10;
const RAIN_COLOR: [f32; 3] = [0.5, 0.5, 1.0];
const MIN_FADE: f32 = 0.003;

/// Deterministic xorshift32 generator
///
/// Seeded from config so runs are reproducible and tests can pin outcomes.
#[derive(Clone, Copy, Debug)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Create a generator. A zero seed would stick at zero, so it is replaced.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform integer in [0, bound)
    pub fn below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }
}

/// Tunables for the rain pool
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSettings {
    /// Number of particle slots
    pub capacity: usize,
    /// Divides the per-frame vertical step (larger = slower rain)
    pub slowdown: f32,
    /// Velocity every slot starts with on respawn
    pub base_velocity: f32,
    /// Per-frame velocity change (negative = downward)
    pub gravity: f32,
    /// RNG seed
    pub seed: u32,
}

impl Default for RainSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            slowdown: 0.4,
            base_velocity: 0.0,
            gravity: -0.8,
            seed: 0x1234_5678,
        }
    }
}

/// One rain slot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub alive: bool,
    /// Starts at 1.0 and decays by `fade` each advanced frame
    pub life: f32,
    pub fade: f32,
    pub color: [f32; 3],
    /// Offset from the camera position
    pub offset: Vec3,
    pub velocity: f32,
    pub gravity: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            alive: false,
            life: 0.0,
            fade: 0.0,
            color: RAIN_COLOR,
            offset: Vec3::ZERO,
            velocity: 0.0,
            gravity: 0.0,
        }
    }
}

/// Line-list vertex emitted for each drawn particle
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RainVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Fixed-capacity rain pool
pub struct ParticleSystem {
    slots: Vec<Particle>,
    settings: RainSettings,
    rng: XorShift32,
    /// Reused output buffer, two vertices per drawn slot
    vertices: Vec<RainVertex>,
}

impl ParticleSystem {
    /// Allocate the pool. Slots start dead until [`initialize_all`](Self::initialize_all).
    pub fn new(settings: RainSettings) -> Self {
        Self {
            slots: vec![Particle::default(); settings.capacity],
            settings,
            rng: XorShift32::new(settings.seed),
            vertices: Vec::with_capacity(Self::max_vertices_for(settings.capacity)),
        }
    }

    /// Upper bound on vertices emitted per frame for a given capacity
    pub fn max_vertices_for(capacity: usize) -> usize {
        capacity.div_ceil(SLOT_STRIDE) * 2
    }

    /// Upper bound on vertices emitted per frame
    pub fn max_vertices(&self) -> usize {
        Self::max_vertices_for(self.slots.len())
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn settings(&self) -> &RainSettings {
        &self.settings
    }

    pub fn particle(&self, index: usize) -> Option<&Particle> {
        self.slots.get(index)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.slots
    }

    /// Reset one slot to a fresh particle above the camera
    ///
    /// Out-of-range indices are ignored.
    pub fn spawn_one(&mut self, index: usize) {
        let Some(slot) = self.slots.get_mut(index) else {
            return;
        };

        let fade = self.rng.below(100) as f32 / 1000.0 + MIN_FADE;
        let x = self.rng.below(SPREAD * 2 + 1) as f32 - SPREAD as f32;
        let z = self.rng.below(SPREAD * 2 + 1) as f32 - SPREAD as f32;

        *slot = Particle {
            alive: true,
            life: 1.0,
            fade,
            color: RAIN_COLOR,
            offset: Vec3::new(x, SPAWN_HEIGHT, z),
            velocity: self.settings.base_velocity,
            gravity: self.settings.gravity,
        };
    }

    /// Spawn every slot in the pool
    pub fn initialize_all(&mut self) {
        for index in 0..self.slots.len() {
            self.spawn_one(index);
        }
        log::debug!("Spawned {} rain particles", self.slots.len());
    }

    /// Advance the drawn slots by one frame and emit their line segments
    ///
    /// Each live even slot contributes two vertices: its world position
    /// (camera + offset) and a point `STREAK_LENGTH` above it. The geometry
    /// reflects the state *before* this frame's step.
    pub fn update_and_emit(&mut self, camera_position: Vec3) -> &[RainVertex] {
        self.vertices.clear();
        let step_divisor = self.settings.slowdown * 1000.0;

        for index in (0..self.slots.len()).step_by(SLOT_STRIDE) {
            let particle = &mut self.slots[index];
            if !particle.alive {
                continue;
            }

            let base = camera_position + particle.offset;
            self.vertices.push(RainVertex {
                position: base.to_array(),
                color: particle.color,
            });
            self.vertices.push(RainVertex {
                position: (base + Vec3::new(0.0, STREAK_LENGTH, 0.0)).to_array(),
                color: particle.color,
            });

            particle.offset.y += particle.velocity / step_divisor;
            particle.velocity += particle.gravity;
            particle.life -= particle.fade;

            if particle.offset.y <= FLOOR_HEIGHT {
                particle.life = -1.0;
            }
            if particle.life < 0.0 {
                self.spawn_one(index);
            }
        }

        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_system(capacity: usize) -> ParticleSystem {
        ParticleSystem::new(RainSettings {
            capacity,
            ..RainSettings::default()
        })
    }

    #[test]
    fn test_xorshift_zero_seed_not_stuck() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_xorshift_deterministic() {
        let mut a = XorShift32::new(42);
        let mut b = XorShift32::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn test_new_pool_is_dead() {
        let mut system = small_system(8);
        assert_eq!(system.capacity(), 8);
        assert!(system.particles().iter().all(|p| !p.alive));
        assert!(system.update_and_emit(Vec3::ZERO).is_empty());
    }

    #[test]
    fn test_spawn_one_ranges() {
        let mut system = small_system(256);
        system.initialize_all();
        for p in system.particles() {
            assert!(p.alive);
            assert_eq!(p.life, 1.0);
            assert!(p.fade >= 0.003 && p.fade <= 0.103, "fade {}", p.fade);
            assert!(p.offset.x >= -10.0 && p.offset.x <= 10.0);
            assert!(p.offset.z >= -10.0 && p.offset.z <= 10.0);
            assert_eq!(p.offset.y, SPAWN_HEIGHT);
            assert_eq!(p.color, [0.5, 0.5, 1.0]);
            assert_eq!(p.velocity, 0.0);
            assert_eq!(p.gravity, -0.8);
        }
    }

    #[test]
    fn test_spawn_out_of_range_ignored() {
        let mut system = small_system(4);
        system.spawn_one(10);
        assert!(system.particles().iter().all(|p| !p.alive));
    }

    #[test]
    fn test_emit_count_full_pool() {
        let mut system = small_system(DEFAULT_CAPACITY);
        system.initialize_all();
        let vertices = system.update_and_emit(Vec3::ZERO);
        assert_eq!(vertices.len(), (DEFAULT_CAPACITY / 2) * 2);
        assert!(vertices.len() <= system.capacity() * 2);
    }

    #[test]
    fn test_vertex_pairs_are_vertical_streaks() {
        let mut system = small_system(64);
        system.initialize_all();
        let camera = Vec3::new(3.0, 1.5, -7.0);
        let vertices = system.update_and_emit(camera).to_vec();
        for pair in vertices.chunks(2) {
            let (a, b) = (pair[0].position, pair[1].position);
            assert_eq!(a[0], b[0]);
            assert_eq!(a[2], b[2]);
            assert!((b[1] - a[1] - STREAK_LENGTH).abs() < 1e-5);
        }
    }

    #[test]
    fn test_first_frame_is_camera_relative() {
        let mut system = small_system(2);
        system.initialize_all();
        let offset = system.particle(0).map(|p| p.offset).unwrap_or_default();
        let camera = Vec3::new(1.0, 2.0, 3.0);
        let vertices = system.update_and_emit(camera).to_vec();
        assert_eq!(vertices[0].position, (camera + offset).to_array());
    }

    #[test]
    fn test_odd_slots_never_advance() {
        let mut system = small_system(10);
        system.initialize_all();
        let before: Vec<Particle> = system.particles().to_vec();
        for _ in 0..50 {
            system.update_and_emit(Vec3::ZERO);
        }
        for index in (1..10).step_by(2) {
            assert_eq!(system.particles()[index], before[index]);
        }
    }

    #[test]
    fn test_life_strictly_decreases_until_respawn() {
        let mut system = small_system(2);
        system.initialize_all();
        let mut previous = system.particles()[0].life;
        for _ in 0..1000 {
            system.update_and_emit(Vec3::ZERO);
            let particle = system.particles()[0];
            assert!(particle.life >= 0.0, "negative life carried over");
            if particle.life == 1.0 && particle.offset.y == SPAWN_HEIGHT {
                previous = particle.life;
                continue;
            }
            assert!(particle.life < previous);
            previous = particle.life;
        }
    }

    #[test]
    fn test_velocity_accumulates_gravity() {
        let mut system = small_system(2);
        system.initialize_all();
        system.update_and_emit(Vec3::ZERO);
        let particle = system.particles()[0];
        // First step moves by the base velocity (zero), then gravity kicks in
        assert_eq!(particle.offset.y, SPAWN_HEIGHT);
        assert_eq!(particle.velocity, -0.8);
    }

    #[test]
    fn test_below_floor_respawns_same_update() {
        let mut system = small_system(2);
        system.initialize_all();
        system.slots[0].offset.y = FLOOR_HEIGHT - 1.0;
        system.slots[0].life = 0.9;
        system.update_and_emit(Vec3::ZERO);
        let particle = system.particles()[0];
        assert_eq!(particle.life, 1.0);
        assert_eq!(particle.offset.y, SPAWN_HEIGHT);
    }

    #[test]
    fn test_exhausted_life_respawns() {
        let mut system = small_system(2);
        system.initialize_all();
        system.slots[0].life = 0.001;
        system.slots[0].fade = 0.05;
        system.update_and_emit(Vec3::ZERO);
        assert_eq!(system.particles()[0].life, 1.0);
    }

    #[test]
    fn test_max_vertices_odd_capacity() {
        assert_eq!(ParticleSystem::max_vertices_for(5), 6);
        assert_eq!(ParticleSystem::max_vertices_for(3000), 3000);
    }
}
