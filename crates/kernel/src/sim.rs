use crate::cube::Cube;
use crate::rng::SimRng;
use cubefall_common::{Rgb, SimConfig};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Index of the cube that directional input moves.
pub const DESIGNATED_CUBE: usize = 0;

/// An event record produced by mutations of the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Simulation advanced to the given tick.
    Stepped { tick: u64 },
    /// A falling cube hit the floor and was clamped to rest.
    Landed { index: usize, tick: u64 },
    /// A cube was displaced by input.
    Nudged { index: usize, delta: Vec3 },
}

/// The authoritative simulation state.
///
/// Owns the fixed cube collection. Hosts hold it by value and lend it to
/// input, update and render code; there is no global instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    config: SimConfig,
    cubes: Vec<Cube>,
    tick: u64,
    seed: u64,
    #[serde(skip)]
    events: Vec<SimEvent>,
}

impl Simulation {
    /// Scatter `config.cube_count` cubes using a generator seeded with `seed`.
    ///
    /// Each position axis is uniform over `[spawn_min, spawn_max)` and each
    /// color channel uniform over `[0, 1)`. Cubes start at rest.
    pub fn new(config: SimConfig, seed: u64) -> Self {
        let mut rng = SimRng::new(seed);
        let cubes = (0..config.cube_count)
            .map(|_| {
                let position = Vec3::new(
                    rng.range(config.spawn_min, config.spawn_max),
                    rng.range(config.spawn_min, config.spawn_max),
                    rng.range(config.spawn_min, config.spawn_max),
                );
                let color = Rgb::new(rng.next_unit(), rng.next_unit(), rng.next_unit());
                Cube::new(position, config.cube_size, color)
            })
            .collect::<Vec<_>>();
        tracing::debug!(seed, count = cubes.len(), "spawned cubes");
        Self {
            config,
            cubes,
            tick: 0,
            seed,
            events: Vec::new(),
        }
    }

    /// Build a simulation from explicit cubes.
    pub fn from_cubes(config: SimConfig, cubes: Vec<Cube>) -> Self {
        Self {
            config,
            cubes,
            tick: 0,
            seed: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    pub fn cube(&self, index: usize) -> Option<&Cube> {
        self.cubes.get(index)
    }

    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    /// Number of completed steps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seed the cubes were spawned from (0 for `from_cubes`).
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance one frame: explicit Euler with a unit timestep, then floor clamp.
    pub fn step(&mut self) {
        self.tick += 1;
        let gravity = self.config.gravity;
        let floor_y = self.config.floor_y;
        for (index, cube) in self.cubes.iter_mut().enumerate() {
            let rest_y = floor_y + cube.half_size();
            let was_resting = cube.position.y == rest_y && cube.velocity_y == 0.0;

            cube.velocity_y += gravity;
            cube.position.y += cube.velocity_y;

            if cube.position.y < rest_y {
                cube.position.y = rest_y;
                cube.velocity_y = 0.0;
                if !was_resting {
                    self.events.push(SimEvent::Landed {
                        index,
                        tick: self.tick,
                    });
                }
            }
        }
        self.events.push(SimEvent::Stepped { tick: self.tick });
    }

    /// Displace cube `index` by `delta`. No bounds are enforced.
    ///
    /// Returns false if there is no such cube.
    pub fn nudge(&mut self, index: usize, delta: Vec3) -> bool {
        let Some(cube) = self.cubes.get_mut(index) else {
            return false;
        };
        cube.position += delta;
        self.events.push(SimEvent::Nudged { index, delta });
        true
    }

    /// FNV-1a hash over tick and every cube's dynamic state.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325;
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        mix(&mut h, &self.tick.to_le_bytes());
        for cube in &self.cubes {
            mix(&mut h, &cube.position.x.to_le_bytes());
            mix(&mut h, &cube.position.y.to_le_bytes());
            mix(&mut h, &cube.position.z.to_le_bytes());
            mix(&mut h, &cube.velocity_y.to_le_bytes());
            mix(&mut h, &cube.size.to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_at(x: f32, y: f32, z: f32) -> Cube {
        Cube::new(Vec3::new(x, y, z), 0.2, Rgb::WHITE)
    }

    #[test]
    fn new_spawns_configured_count_at_rest() {
        let config = SimConfig {
            cube_count: 16,
            ..SimConfig::default()
        };
        let sim = Simulation::new(config.clone(), 1234);
        assert_eq!(sim.cube_count(), 16);
        for cube in sim.cubes() {
            assert_eq!(cube.velocity_y, 0.0);
            assert_eq!(cube.size, config.cube_size);
            for axis in cube.position.to_array() {
                assert!(axis >= config.spawn_min && axis < config.spawn_max);
            }
            for channel in cube.color.to_array() {
                assert!((0.0..1.0).contains(&channel));
            }
        }
    }

    #[test]
    fn same_seed_spawns_identical_cubes() {
        let a = Simulation::new(SimConfig::default(), 42);
        let b = Simulation::new(SimConfig::default(), 42);
        assert_eq!(a.cubes(), b.cubes());
        assert_eq!(a.state_hash(), b.state_hash());
    }

    #[test]
    fn different_seeds_spawn_different_cubes() {
        let a = Simulation::new(SimConfig::default(), 1);
        let b = Simulation::new(SimConfig::default(), 2);
        assert_ne!(a.cubes(), b.cubes());
    }

    #[test]
    fn step_applies_gravity_then_position() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, 0.5, 0.0)]);
        sim.step();
        let c = sim.cube(0).unwrap();
        assert_eq!(c.velocity_y, -0.001);
        assert!((c.position.y - 0.499).abs() < 1e-6);
        sim.step();
        let c = sim.cube(0).unwrap();
        assert!((c.velocity_y - (-0.002)).abs() < 1e-7);
        assert!((c.position.y - 0.497).abs() < 1e-6);
        assert_eq!(sim.tick(), 2);
    }

    #[test]
    fn step_leaves_x_and_z_alone() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.3, 0.5, -0.7)]);
        for _ in 0..500 {
            sim.step();
        }
        let c = sim.cube(0).unwrap();
        assert_eq!(c.position.x, 0.3);
        assert_eq!(c.position.z, -0.7);
    }

    #[test]
    fn bottom_never_below_floor() {
        let config = SimConfig {
            cube_count: 32,
            ..SimConfig::default()
        };
        let floor = config.floor_y;
        let mut sim = Simulation::new(config, 5);
        for _ in 0..400 {
            sim.step();
            for cube in sim.cubes() {
                assert!(cube.bottom() >= floor - 1e-6);
            }
        }
    }

    #[test]
    fn clamp_zeroes_velocity() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, -0.8995, 0.0)]);
        sim.step();
        let c = sim.cube(0).unwrap();
        assert_eq!(c.position.y, sim.config().rest_y());
        assert_eq!(c.velocity_y, 0.0);
    }

    #[test]
    fn cube_below_floor_snaps_up() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, -3.0, 0.0)]);
        sim.step();
        let c = sim.cube(0).unwrap();
        assert_eq!(c.position.y, sim.config().rest_y());
        assert_eq!(c.velocity_y, 0.0);
    }

    #[test]
    fn rest_state_is_stable() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, 0.0, 0.0)]);
        while sim.cube(0).unwrap().position.y > sim.config().rest_y() {
            sim.step();
        }
        let rest = *sim.cube(0).unwrap();
        for _ in 0..100 {
            sim.step();
            assert_eq!(sim.cube(0).unwrap().position.y, rest.position.y);
            assert_eq!(sim.cube(0).unwrap().velocity_y, 0.0);
        }
    }

    #[test]
    fn landing_is_recorded_once() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, -0.85, 0.0)]);
        for _ in 0..50 {
            sim.step();
        }
        let landings = sim
            .events()
            .iter()
            .filter(|e| matches!(e, SimEvent::Landed { index: 0, .. }))
            .count();
        assert_eq!(landings, 1);
    }

    #[test]
    fn nudge_moves_only_target() {
        let mut sim = Simulation::from_cubes(
            SimConfig::default(),
            vec![cube_at(0.0, 0.0, 0.0), cube_at(0.5, 0.5, 0.5)],
        );
        let other = *sim.cube(1).unwrap();
        assert!(sim.nudge(0, Vec3::new(0.01, 0.0, 0.0)));
        assert_eq!(sim.cube(0).unwrap().position, Vec3::new(0.01, 0.0, 0.0));
        assert_eq!(*sim.cube(1).unwrap(), other);
        assert_eq!(
            sim.events().last(),
            Some(&SimEvent::Nudged {
                index: 0,
                delta: Vec3::new(0.01, 0.0, 0.0)
            })
        );
    }

    #[test]
    fn nudge_has_no_bounds() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), vec![cube_at(0.0, 0.0, 0.0)]);
        assert!(sim.nudge(0, Vec3::new(-50.0, -50.0, 0.0)));
        assert_eq!(sim.cube(0).unwrap().position.y, -50.0);
    }

    #[test]
    fn nudge_missing_cube_is_rejected() {
        let mut sim = Simulation::from_cubes(SimConfig::default(), Vec::new());
        assert!(!sim.nudge(DESIGNATED_CUBE, Vec3::X));
        assert!(sim.events().is_empty());
    }

    #[test]
    fn drain_events_clears_log() {
        let mut sim = Simulation::new(SimConfig::default(), 3);
        sim.step();
        let events = sim.drain_events();
        assert!(events.contains(&SimEvent::Stepped { tick: 1 }));
        assert!(sim.events().is_empty());
    }

    #[test]
    fn stepping_is_deterministic() {
        let mut a = Simulation::new(SimConfig::default(), 77);
        let mut b = a.clone();
        for _ in 0..250 {
            a.step();
            b.step();
        }
        assert_eq!(a.state_hash(), b.state_hash());
    }
}
