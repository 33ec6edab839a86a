//! The particle field: a fixed population pulled toward stage-dependent
//! attractors and drawn over a trail-producing fade.

use glam::DVec2;

use super::glyph::PointCloud;
use super::particle::Particle;
use crate::api::config::FieldConfig;
use crate::api::stage::{AttractorMode, Stage};
use crate::core::rng::RandomSource;
use crate::renderer::color::Rgba;
use crate::renderer::frame::Surface;

/// Fixed-size particle population for one surface size.
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            width: 0.0,
            height: 0.0,
        }
    }

    /// Replace the population with `config.particle_count` fresh particles.
    ///
    /// Targets come from `cloud` (wrapping when the population is larger) or,
    /// if the cloud is empty, from uniform positions on the surface. A
    /// zero-size surface leaves the field empty.
    pub fn populate<R: RandomSource>(
        &mut self,
        width: u32,
        height: u32,
        cloud: &PointCloud,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        self.particles.clear();
        self.width = width as f64;
        self.height = height as f64;
        if width == 0 || height == 0 {
            return;
        }

        let (w, h) = (self.width, self.height);
        self.particles.reserve(config.particle_count);
        for i in 0..config.particle_count {
            let target = match cloud.wrapping(i) {
                Some(p) => p.as_dvec2(),
                None => DVec2::new(rng.range(0.0, w), rng.range(0.0, h)),
            };
            let position = DVec2::new(rng.range(0.0, w), rng.range(0.0, h));
            let origin = DVec2::new(rng.range(0.0, w), rng.range(0.0, h));
            let size = rng.range(config.size_min, config.size_max);
            let alpha = rng.range(config.alpha_min as f64, config.alpha_max as f64) as f32;

            self.particles.push(
                Particle::new(position, origin, target, size, Rgba::WHITE.with_alpha(alpha))
                    .with_physics(config.stiffness, config.friction),
            );
        }
    }

    /// Drop every particle (surface torn down).
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Where `particle` is pulled this frame under `stage`.
    ///
    /// Collapse draws a fresh jitter from `rng` on every call, so the center
    /// attractor never stabilizes.
    pub fn attractor<R: RandomSource>(
        &self,
        particle: &Particle,
        stage: Stage,
        config: &FieldConfig,
        rng: &mut R,
    ) -> DVec2 {
        pick_attractor(
            stage.attractor_mode(),
            particle,
            self.center(),
            config.collapse_jitter / 2.0,
            rng,
        )
    }

    /// Advance every particle by one frame.
    pub fn step<R: RandomSource>(
        &mut self,
        stage: Stage,
        elapsed_ms: f64,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        let center = self.center();
        let half = config.collapse_jitter / 2.0;
        let mode = stage.attractor_mode();

        for p in &mut self.particles {
            let attractor = pick_attractor(mode, p, center, half, rng);
            if mode == AttractorMode::Collapse {
                // Light to shadow
                p.color = Rgba::BLACK.with_alpha(rng.range(0.0, config.collapse_alpha_max as f64) as f32);
            }
            p.integrate(attractor);
            if config.turbulence_amplitude > 0.0 {
                p.drift(elapsed_ms, config.turbulence_rate, config.turbulence_amplitude);
            }
        }
    }

    /// Trail composite color for `stage`.
    pub fn trail_color(stage: Stage, config: &FieldConfig) -> Rgba {
        if stage.fades_to_light() {
            Rgba::rgb8(255, 255, 255, config.trail_alpha)
        } else {
            Rgba::rgb8(5, 5, 5, config.trail_alpha)
        }
    }

    /// Fade the surface and draw every particle. An empty field draws nothing.
    pub fn render<S: Surface + ?Sized>(&self, stage: Stage, config: &FieldConfig, surface: &mut S) {
        if self.width == 0.0 || self.height == 0.0 {
            return;
        }
        surface.fade(Self::trail_color(stage, config));
        for p in &self.particles {
            surface.fill_circle(p.position, p.size, p.color);
        }
    }
}

fn pick_attractor<R: RandomSource>(
    mode: AttractorMode,
    particle: &Particle,
    center: DVec2,
    half_jitter: f64,
    rng: &mut R,
) -> DVec2 {
    match mode {
        AttractorMode::Glyph => particle.target,
        AttractorMode::Idle => particle.origin,
        AttractorMode::Collapse => {
            center + DVec2::new(rng.jitter(half_jitter), rng.jitter(half_jitter))
        }
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, ScriptedRandom};
    use crate::renderer::frame::FrameBuffer;
    use crate::systems::glyph::{rasterize_point_cloud, StrokeFont};
    use glam::UVec2;
    use proptest::prelude::*;

    fn cloud_of(points: &[(u32, u32)]) -> PointCloud {
        PointCloud::new(points.iter().map(|&(x, y)| UVec2::new(x, y)).collect())
    }

    fn still_config() -> FieldConfig {
        FieldConfig {
            turbulence_amplitude: 0.0,
            ..FieldConfig::default()
        }
    }

    #[test]
    fn populate_with_cloud_wraps_targets() {
        let mut field = ParticleField::new();
        let cloud = cloud_of(&[(8, 8), (16, 8), (24, 16)]);
        let config = FieldConfig { particle_count: 7, ..FieldConfig::default() };
        field.populate(100, 100, &cloud, &config, &mut Rng::new(1));

        let targets: Vec<DVec2> = field.particles().iter().map(|p| p.target).collect();
        assert_eq!(targets[0], DVec2::new(8.0, 8.0));
        assert_eq!(targets[3], DVec2::new(8.0, 8.0));
        assert_eq!(targets[5], DVec2::new(24.0, 16.0));
    }

    #[test]
    fn populate_with_empty_cloud_scatters_targets() {
        let mut field = ParticleField::new();
        field.populate(320, 200, &PointCloud::default(), &FieldConfig::default(), &mut Rng::new(5));
        assert_eq!(field.len(), 897);
        for p in field.particles() {
            assert!((0.0..320.0).contains(&p.target.x));
            assert!((0.0..200.0).contains(&p.target.y));
        }
    }

    #[test]
    fn populate_assigns_visual_ranges() {
        let mut field = ParticleField::new();
        let cloud = cloud_of(&[(1, 1)]);
        field.populate(640, 480, &cloud, &FieldConfig::default(), &mut Rng::new(99));
        for p in field.particles() {
            assert!((0.5..2.5).contains(&p.size));
            assert!((0.1..=0.5).contains(&p.color.a));
            assert_eq!((p.color.r, p.color.g, p.color.b), (1.0, 1.0, 1.0));
            assert_eq!(p.velocity, DVec2::ZERO);
            assert_eq!((p.stiffness, p.friction), (0.03, 0.95));
            assert!((0.0..640.0).contains(&p.position.x) && (0.0..480.0).contains(&p.position.y));
            assert!((0.0..640.0).contains(&p.origin.x) && (0.0..480.0).contains(&p.origin.y));
        }
    }

    #[test]
    fn populate_replaces_previous_population() {
        let mut field = ParticleField::new();
        let config = FieldConfig { particle_count: 10, ..FieldConfig::default() };
        let mut rng = Rng::new(3);
        field.populate(100, 100, &PointCloud::default(), &config, &mut rng);
        field.populate(50, 50, &PointCloud::default(), &config, &mut rng);
        assert_eq!(field.len(), 10);
        assert_eq!(field.size(), (50.0, 50.0));
    }

    #[test]
    fn zero_size_surface_is_noop() {
        let mut field = ParticleField::new();
        field.populate(0, 600, &cloud_of(&[(0, 0)]), &FieldConfig::default(), &mut Rng::new(1));
        assert!(field.is_empty());

        let mut frame = FrameBuffer::new();
        field.render(Stage::Veil, &FieldConfig::default(), &mut frame);
        assert!(frame.is_empty());
    }

    #[test]
    fn idempotent_targets_across_rebuilds() {
        let font = StrokeFont::builtin().unwrap();
        let config = FieldConfig::default();
        let cloud_a = rasterize_point_cloud(&font, 'Z', 800, 600, &config);
        let cloud_b = rasterize_point_cloud(&font, 'Z', 800, 600, &config);

        let mut first = ParticleField::new();
        let mut second = ParticleField::new();
        first.populate(800, 600, &cloud_a, &config, &mut Rng::new(1));
        second.populate(800, 600, &cloud_b, &config, &mut Rng::new(2));

        let targets = |f: &ParticleField| f.particles().iter().map(|p| p.target).collect::<Vec<_>>();
        assert_eq!(targets(&first), targets(&second));
        assert_ne!(first.particles()[0].position, second.particles()[0].position);
    }

    #[test]
    fn veil_attractor_is_target() {
        let mut field = ParticleField::new();
        field.populate(400, 300, &cloud_of(&[(40, 40), (80, 120)]), &FieldConfig::default(), &mut Rng::new(8));
        let mut rng = Rng::new(1);
        for p in field.particles() {
            assert_eq!(field.attractor(p, Stage::Veil, &FieldConfig::default(), &mut rng), p.target);
        }
    }

    #[test]
    fn idle_attractor_is_origin_for_main_and_dedication() {
        let mut field = ParticleField::new();
        field.populate(400, 300, &PointCloud::default(), &FieldConfig::default(), &mut Rng::new(8));
        let mut rng = Rng::new(1);
        let p = &field.particles()[0];
        assert_eq!(field.attractor(p, Stage::Main, &FieldConfig::default(), &mut rng), p.origin);
        assert_eq!(field.attractor(p, Stage::Dedication, &FieldConfig::default(), &mut rng), p.origin);
    }

    #[test]
    fn closure_attractor_stays_in_center_box() {
        let mut field = ParticleField::new();
        let config = FieldConfig::default();
        field.populate(800, 600, &PointCloud::default(), &config, &mut Rng::new(8));
        let mut rng = Rng::new(77);
        for p in field.particles() {
            let a = field.attractor(p, Stage::Closure, &config, &mut rng);
            assert!((a.x - 400.0).abs() <= 25.0, "x {}", a.x);
            assert!((a.y - 300.0).abs() <= 25.0, "y {}", a.y);
        }
    }

    #[test]
    fn closure_attractor_changes_every_call() {
        let mut field = ParticleField::new();
        let config = FieldConfig::default();
        field.populate(800, 600, &PointCloud::default(), &config, &mut Rng::new(8));
        let mut rng = Rng::new(77);
        let p = &field.particles()[0];
        let a = field.attractor(p, Stage::Closure, &config, &mut rng);
        let b = field.attractor(p, Stage::Closure, &config, &mut rng);
        assert_ne!(a, b);
    }

    #[test]
    fn closure_step_uses_scripted_jitter_and_darkens() {
        let config = FieldConfig { particle_count: 1, ..still_config() };
        let mut field = ParticleField::new();
        field.populate(200, 100, &PointCloud::default(), &config, &mut Rng::new(4));
        let start = field.particles()[0].position;

        // jitter x = 0, jitter y = 0, alpha draw 0.5 → 0.1
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.5]);
        field.step(Stage::Closure, 0.0, &config, &mut rng);

        let p = &field.particles()[0];
        let expected_v = (DVec2::new(100.0, 50.0) - start) * 0.03 * 0.95;
        assert!((p.velocity - expected_v).length() < 1e-9);
        assert_eq!((p.color.r, p.color.g, p.color.b), (0.0, 0.0, 0.0));
        assert!((p.color.a - 0.1).abs() < 1e-6);
    }

    #[test]
    fn veil_keeps_color_and_pulls_to_target() {
        let config = FieldConfig { particle_count: 5, ..still_config() };
        let mut field = ParticleField::new();
        field.populate(200, 200, &cloud_of(&[(100, 100)]), &config, &mut Rng::new(4));
        let colors: Vec<Rgba> = field.particles().iter().map(|p| p.color).collect();
        let before: Vec<f64> = field.particles().iter().map(|p| p.position.distance(p.target)).collect();

        field.step(Stage::Veil, 16.0, &config, &mut Rng::new(1));

        for (i, p) in field.particles().iter().enumerate() {
            assert_eq!(p.color, colors[i]);
            assert!(p.position.distance(p.target) < before[i]);
        }
    }

    #[test]
    fn turbulence_keeps_particles_moving() {
        let config = FieldConfig { particle_count: 1, ..FieldConfig::default() };
        let mut field = ParticleField::new();
        field.populate(100, 100, &cloud_of(&[(50, 50)]), &config, &mut Rng::new(2));
        let mut rng = Rng::new(1);
        for frame in 0..3000 {
            field.step(Stage::Veil, frame as f64 * 16.0, &config, &mut rng);
        }
        let before = field.particles()[0].position;
        field.step(Stage::Veil, 3000.0 * 16.0, &config, &mut rng);
        assert_ne!(field.particles()[0].position, before);
    }

    #[test]
    fn trail_color_inverts_in_closure() {
        let config = FieldConfig::default();
        assert_eq!(ParticleField::trail_color(Stage::Main, &config), Rgba::rgb8(5, 5, 5, 0.2));
        assert_eq!(ParticleField::trail_color(Stage::Veil, &config), Rgba::rgb8(5, 5, 5, 0.2));
        assert_eq!(ParticleField::trail_color(Stage::Closure, &config), Rgba::rgb8(255, 255, 255, 0.2));
    }

    #[test]
    fn render_fades_then_draws_every_particle() {
        let config = FieldConfig { particle_count: 12, ..FieldConfig::default() };
        let mut field = ParticleField::new();
        field.populate(300, 300, &PointCloud::default(), &config, &mut Rng::new(6));

        let mut frame = FrameBuffer::new();
        field.render(Stage::Closure, &config, &mut frame);

        assert_eq!(frame.backdrop(), Some(Rgba::rgb8(255, 255, 255, 0.2)));
        assert_eq!(frame.circle_count(), 12);
        let first = &frame.circles()[0];
        let p = &field.particles()[0];
        assert_eq!((first.x, first.y), (p.position.x as f32, p.position.y as f32));
        assert_eq!(first.radius, p.size as f32);
    }

    #[test]
    fn end_to_end_z_targets_come_from_cloud() {
        let font = StrokeFont::builtin().unwrap();
        let config = FieldConfig::default();
        let cloud = rasterize_point_cloud(&font, 'Z', 800, 600, &config);
        assert!(!cloud.is_empty() && cloud.len() <= 7500);

        let mut field = ParticleField::new();
        field.populate(800, 600, &cloud, &config, &mut Rng::new(2024));
        assert_eq!(field.len(), 897);
        for p in field.particles() {
            let point = UVec2::new(p.target.x as u32, p.target.y as u32);
            assert_eq!(point.as_dvec2(), p.target);
            assert!(cloud.contains(point));
        }
    }

    proptest! {
        #[test]
        fn population_size_is_fixed(
            cloud_len in 0usize..2000,
            width in 1u32..1200,
            height in 1u32..1200,
            seed in any::<u64>(),
        ) {
            let cloud = PointCloud::new(
                (0..cloud_len as u32).map(|i| UVec2::new(i % width, (i / width) % height)).collect(),
            );
            let mut field = ParticleField::new();
            field.populate(width, height, &cloud, &FieldConfig::default(), &mut Rng::new(seed));
            prop_assert_eq!(field.len(), 897);
        }
    }
}
