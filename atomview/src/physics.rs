//! Scene model for the atom visualization.
//!
//! Everything that decides where a particle sits lives here: the random
//! spatial samplers that seed the nucleus, the per-electron orbit
//! functions, the fixed shell table, and the scene container that updates
//! electron positions in one explicit loop per animation step.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::time::Duration;

/// Electron angular speed range, radians per millisecond. Sampled once per
/// electron so every orbit has a visibly distinct period.
pub const ORBIT_SPEED_MIN: f32 = 0.0001;
pub const ORBIT_SPEED_MAX: f32 = 0.001;

/// Fixed z attenuation for planar orbits, percent.
pub const PLANAR_Z_CUT: f32 = 70.0;

/// Upper bound (exclusive) for the tilted-orbit z attenuation draw, percent.
pub const TILTED_Z_CUT_MAX: f32 = 50.0;

/// Default nucleus sampling radius.
pub const DEFAULT_KERNEL_RADIUS: f32 = 40.0;

/// Reduce a value by a percentage: `v - v * (p / 100)`.
pub fn minus_percent(value: f32, percent: f32) -> f32 {
    value - value * (percent / 100.0)
}

/// The kinds of renderable particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    Proton,
    Neutron,
    Electron,
}

impl ParticleKind {
    pub fn color(&self) -> [f32; 4] {
        match self {
            ParticleKind::Proton => [0.0, 0.588, 1.0, 1.0], // #0096FF
            ParticleKind::Neutron => [1.0, 0.0, 0.0, 1.0],
            ParticleKind::Electron => [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            ParticleKind::Proton | ParticleKind::Neutron => 10.0,
            ParticleKind::Electron => 4.0,
        }
    }
}

/// A renderable point mass. Nucleon positions are fixed after sampling;
/// electron positions are overwritten every animation step.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub kind: ParticleKind,
    pub position: Vec3,
}

/// One electron shell: orbit radius and how many electrons it hosts.
#[derive(Debug, Clone, Copy)]
pub struct ShellSpec {
    pub radius: f32,
    pub electrons: usize,
}

/// The seven fixed shells. Occupancies follow periodic-table shell filling
/// loosely (sum 92); they are illustrative, not validated physics.
pub const SHELLS: [ShellSpec; 7] = [
    ShellSpec { radius: 60.0, electrons: 2 },
    ShellSpec { radius: 90.0, electrons: 8 },
    ShellSpec { radius: 120.0, electrons: 18 },
    ShellSpec { radius: 150.0, electrons: 32 },
    ShellSpec { radius: 180.0, electrons: 21 },
    ShellSpec { radius: 210.0, electrons: 9 },
    ShellSpec { radius: 240.0, electrons: 2 },
];

/// Strategy for drawing a random point for a nucleon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Radial distance, azimuth and polar angle each drawn uniformly, then
    /// combined with a cosine on every axis. Intentionally NOT a standard
    /// spherical transform and not volumetrically uniform; kept exactly as
    /// the scene has always looked.
    PolarBall,
    /// Uniform over the sphere surface of the given radius.
    Surface,
}

impl Sampling {
    pub fn sample(self, radius: f32, rng: &mut impl Rng) -> Vec3 {
        match self {
            Sampling::PolarBall => {
                let r = rng.gen::<f32>() * radius;
                let azimuthal = rng.gen::<f32>() * TAU;
                let polar = rng.gen::<f32>() * PI - PI / 2.0;
                Vec3::new(
                    r * azimuthal.cos() * polar.cos(),
                    r * azimuthal.sin() * polar.cos(),
                    r * polar.sin(),
                )
            }
            Sampling::Surface => {
                let theta = rng.gen::<f32>() * TAU;
                let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                Vec3::new(
                    radius * phi.sin() * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                    radius * phi.cos(),
                )
            }
        }
    }
}

/// Which orbit formula a preset uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitKind {
    Planar,
    Tilted,
}

/// Per-electron orbit constants, drawn once at creation. `position_at` is
/// pure: the same `t` always yields the same point.
#[derive(Debug, Clone, Copy)]
pub enum Orbit {
    /// Circle in the xy plane; z follows `x + y` cut down by a fixed 70%.
    Planar { radius: f32, speed: f32 },
    /// Phase-shifted circle with a direction sign and a per-electron z
    /// attenuation in [0, 50) percent.
    Tilted {
        radius: f32,
        speed: f32,
        phase: f32,
        dir: f32,
        z_cut: f32,
    },
}

impl Orbit {
    /// Draw fresh orbit constants for an electron on a shell.
    pub fn spawn(kind: OrbitKind, radius: f32, rng: &mut impl Rng) -> Self {
        let speed = rng.gen_range(ORBIT_SPEED_MIN..ORBIT_SPEED_MAX);
        match kind {
            OrbitKind::Planar => Orbit::Planar { radius, speed },
            OrbitKind::Tilted => Orbit::Tilted {
                radius,
                speed,
                phase: rng.gen::<f32>() * TAU,
                dir: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
                z_cut: rng.gen::<f32>() * TILTED_Z_CUT_MAX,
            },
        }
    }

    /// Instantaneous position at `t_ms` milliseconds since scene start.
    pub fn position_at(&self, t_ms: f32) -> Vec3 {
        match *self {
            Orbit::Planar { radius, speed } => {
                let angle = t_ms * speed;
                let x = radius * angle.cos();
                let y = radius * angle.sin();
                Vec3::new(x, y, minus_percent(x + y, PLANAR_Z_CUT))
            }
            Orbit::Tilted {
                radius,
                speed,
                phase,
                dir,
                z_cut,
            } => {
                let angle = t_ms * speed;
                Vec3::new(
                    dir * radius * (angle + phase).cos(),
                    dir * radius * (angle + phase).sin(),
                    minus_percent(radius * (angle - phase).cos(), z_cut),
                )
            }
        }
    }
}

/// Mutable scene configuration exposed to the parameter panel. Only the
/// nucleus sampler reads it.
#[derive(Debug, Clone, Copy)]
pub struct KernelConfig {
    pub kernel_radius: f32,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            kernel_radius: DEFAULT_KERNEL_RADIUS,
        }
    }
}

/// Static configuration of one scene variant.
#[derive(Debug, Clone, Copy)]
pub struct ScenePreset {
    pub name: &'static str,
    pub protons: usize,
    pub neutrons: usize,
    pub sampling: Sampling,
    pub orbit: OrbitKind,
    pub redraw_interval: Duration,
    pub kernel_editable: bool,
}

/// 73-nucleon atom, polar-ball nucleus, planar orbits, 15 ms redraws. The
/// 92-electron shell table is an independent constant; nothing ties it to
/// the proton count.
pub const TANTALUM: ScenePreset = ScenePreset {
    name: "tantalum",
    protons: 73,
    neutrons: 73,
    sampling: Sampling::PolarBall,
    orbit: OrbitKind::Planar,
    redraw_interval: Duration::from_millis(15),
    kernel_editable: true,
};

/// 92-nucleon atom, surface-sampled nucleus, tilted orbits, redraws as
/// fast as the 1 ms timer fires (saturates at actual redraw cost).
pub const URANIUM: ScenePreset = ScenePreset {
    name: "uranium",
    protons: 92,
    neutrons: 92,
    sampling: Sampling::Surface,
    orbit: OrbitKind::Tilted,
    redraw_interval: Duration::from_millis(1),
    kernel_editable: false,
};

/// Place nucleons at sampled points inside the kernel radius. Neutrons
/// first, then protons.
pub fn build_nucleus(
    protons: usize,
    neutrons: usize,
    kernel_radius: f32,
    sampling: Sampling,
    rng: &mut impl Rng,
) -> Vec<Particle> {
    let mut particles = Vec::with_capacity(protons + neutrons);
    for _ in 0..neutrons {
        particles.push(Particle {
            kind: ParticleKind::Neutron,
            position: sampling.sample(kernel_radius, rng),
        });
    }
    for _ in 0..protons {
        particles.push(Particle {
            kind: ParticleKind::Proton,
            position: sampling.sample(kernel_radius, rng),
        });
    }
    particles
}

/// Populate the seven shells, one freshly drawn orbit per electron.
pub fn build_shells(kind: OrbitKind, rng: &mut impl Rng) -> Vec<(Particle, Orbit)> {
    let mut electrons = Vec::new();
    for shell in &SHELLS {
        for _ in 0..shell.electrons {
            let orbit = Orbit::spawn(kind, shell.radius, rng);
            electrons.push((
                Particle {
                    kind: ParticleKind::Electron,
                    position: orbit.position_at(0.0),
                },
                orbit,
            ));
        }
    }
    electrons
}

/// All particles of the scene, in one indexable collection. Electrons keep
/// a parallel record of their orbit constants; `advance` updates them in a
/// single explicit loop.
pub struct AtomScene {
    pub particles: Vec<Particle>,
    orbits: Vec<(usize, Orbit)>,
    sampling: Sampling,
    nucleons: usize,
}

impl AtomScene {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            orbits: Vec::new(),
            sampling: Sampling::PolarBall,
            nucleons: 0,
        }
    }

    /// Rebuild the scene for a preset: nucleus first, then the shells.
    pub fn load(&mut self, preset: &ScenePreset, kernel_radius: f32, rng: &mut impl Rng) {
        self.particles.clear();
        self.orbits.clear();
        self.sampling = preset.sampling;

        self.particles.extend(build_nucleus(
            preset.protons,
            preset.neutrons,
            kernel_radius,
            preset.sampling,
            rng,
        ));
        self.nucleons = self.particles.len();

        for (particle, orbit) in build_shells(preset.orbit, rng) {
            let index = self.particles.len();
            self.particles.push(particle);
            self.orbits.push((index, orbit));
        }

        log::info!(
            "scene loaded: preset {}, {} nucleons, {} electrons",
            preset.name,
            self.nucleons,
            self.orbits.len()
        );
    }

    /// Recompute every electron position for the given elapsed time.
    pub fn advance(&mut self, t_ms: f32) {
        for (index, orbit) in &self.orbits {
            self.particles[*index].position = orbit.position_at(t_ms);
        }
    }

    /// Redraw nucleon positions from the sampler, keeping the particle set
    /// and every electron record intact. Backs the live kernel-radius edit.
    pub fn resample_nucleus(&mut self, kernel_radius: f32, rng: &mut impl Rng) {
        let sampling = self.sampling;
        for particle in &mut self.particles[..self.nucleons] {
            particle.position = sampling.sample(kernel_radius, rng);
        }
    }

    pub fn nucleon_count(&self) -> usize {
        self.nucleons
    }

    pub fn electron_count(&self) -> usize {
        self.orbits.len()
    }
}

impl Default for AtomScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minus_percent_seventy() {
        assert!((minus_percent(100.0, 70.0) - 30.0).abs() < 1e-6);
        assert_eq!(minus_percent(0.0, 70.0), 0.0);
    }

    #[test]
    fn surface_samples_sit_on_the_sphere() {
        let mut rng = rand::thread_rng();
        let radius = 40.0;
        for _ in 0..1000 {
            let p = Sampling::Surface.sample(radius, &mut rng);
            assert!((p.length() - radius).abs() < 1e-3, "|p| = {}", p.length());
        }
    }

    #[test]
    fn polar_ball_samples_stay_bounded() {
        let mut rng = rand::thread_rng();
        let radius = 40.0;
        for _ in 0..1000 {
            let p = Sampling::PolarBall.sample(radius, &mut rng);
            assert!(p.x.abs() <= radius);
            assert!(p.y.abs() <= radius);
            assert!(p.z.abs() <= radius);
        }
    }

    #[test]
    fn samplers_accept_zero_radius() {
        let mut rng = rand::thread_rng();
        assert_eq!(Sampling::PolarBall.sample(0.0, &mut rng), Vec3::ZERO);
        assert!(Sampling::Surface.sample(0.0, &mut rng).length() < 1e-6);
    }

    #[test]
    fn planar_orbit_at_time_zero() {
        let orbit = Orbit::Planar {
            radius: 100.0,
            speed: 1.0,
        };
        let p = orbit.position_at(0.0);
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!((p.z - 30.0).abs() < 1e-4);
    }

    #[test]
    fn tilted_orbit_at_time_zero() {
        let orbit = Orbit::Tilted {
            radius: 100.0,
            speed: 1.0,
            phase: 0.0,
            dir: 1.0,
            z_cut: 0.0,
        };
        let p = orbit.position_at(0.0);
        assert!((p.x - 100.0).abs() < 1e-4);
        assert!(p.y.abs() < 1e-4);
        assert!((p.z - 100.0).abs() < 1e-4);
    }

    #[test]
    fn planar_trajectory_is_continuous_on_a_circle() {
        let orbit = Orbit::Planar {
            radius: 100.0,
            speed: ORBIT_SPEED_MAX,
        };
        let mut prev = orbit.position_at(0.0);
        for step in 1..=1000 {
            let p = orbit.position_at(step as f32);
            assert!((p - prev).length() < 1.0, "jump at step {}", step);
            let ring = (p.x * p.x + p.y * p.y).sqrt();
            assert!((ring - 100.0).abs() < 1e-2);
            prev = p;
        }
    }

    #[test]
    fn shells_hold_ninety_two_electrons() {
        let mut rng = rand::thread_rng();
        let electrons = build_shells(OrbitKind::Planar, &mut rng);
        assert_eq!(electrons.len(), 92);
        assert_eq!(SHELLS.iter().map(|s| s.electrons).sum::<usize>(), 92);
        for (particle, orbit) in &electrons {
            assert_eq!(particle.kind, ParticleKind::Electron);
            assert_eq!(particle.position, orbit.position_at(0.0));
        }
    }

    #[test]
    fn empty_nucleus_is_empty() {
        let mut rng = rand::thread_rng();
        let nucleus = build_nucleus(0, 0, DEFAULT_KERNEL_RADIUS, Sampling::PolarBall, &mut rng);
        assert!(nucleus.is_empty());
    }

    #[test]
    fn nucleus_counts_and_kinds() {
        let mut rng = rand::thread_rng();
        let nucleus = build_nucleus(3, 5, 40.0, Sampling::Surface, &mut rng);
        assert_eq!(nucleus.len(), 8);
        let protons = nucleus
            .iter()
            .filter(|p| p.kind == ParticleKind::Proton)
            .count();
        assert_eq!(protons, 3);
    }

    #[test]
    fn presets_keep_independent_counts() {
        assert_eq!(TANTALUM.protons, 73);
        assert_eq!(TANTALUM.neutrons, 73);
        assert_eq!(URANIUM.protons, 92);
        assert_eq!(URANIUM.neutrons, 92);
        assert!(TANTALUM.kernel_editable);
        assert!(!URANIUM.kernel_editable);
    }

    #[test]
    fn scene_load_and_advance() {
        let mut rng = rand::thread_rng();
        let mut scene = AtomScene::new();
        scene.load(&TANTALUM, DEFAULT_KERNEL_RADIUS, &mut rng);
        assert_eq!(scene.nucleon_count(), 146);
        assert_eq!(scene.electron_count(), 92);
        assert_eq!(scene.particles.len(), 238);

        let before: Vec<Vec3> = scene.particles.iter().map(|p| p.position).collect();
        scene.advance(5000.0);
        // Nucleons stay put, electrons move.
        for i in 0..scene.nucleon_count() {
            assert_eq!(scene.particles[i].position, before[i]);
        }
        let moved = (scene.nucleon_count()..scene.particles.len())
            .filter(|&i| scene.particles[i].position != before[i])
            .count();
        assert!(moved > 0);
    }

    #[test]
    fn resample_moves_only_the_nucleus() {
        let mut rng = rand::thread_rng();
        let mut scene = AtomScene::new();
        scene.load(&TANTALUM, DEFAULT_KERNEL_RADIUS, &mut rng);
        scene.advance(123.0);

        let before: Vec<Vec3> = scene.particles.iter().map(|p| p.position).collect();
        scene.resample_nucleus(200.0, &mut rng);
        for i in scene.nucleon_count()..scene.particles.len() {
            assert_eq!(scene.particles[i].position, before[i]);
        }
        assert_eq!(scene.particles.len(), before.len());
    }
}
