//! 고정 크기 유동 입자 풀. 입자는 생성 후 사라지지 않고 오른쪽 끝에서 왼쪽으로 재활용된다.

use rand::Rng;
use std::f32::consts::TAU;

use crate::render::PipeGeometry;

pub const PARTICLE_COUNT: usize = 200;
pub const PARTICLE_SIZE: f32 = 3.5;
/// 유속 1 m/s 당 프레임(16 ms)마다 이동하는 픽셀 수 기본값.
pub const DEFAULT_PIXELS_PER_M_S: f32 = 50.0;
const FRAME_MS: f32 = 16.0;
const PHASE_RATE_PER_MS: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// 개별 속도 배율 [1.0, 1.5)
    pub speed: f32,
    /// 수직 진동 위상 [rad]
    pub phase: f32,
}

#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    /// 배관 안에 입자를 가로로 고르게 배치한다.
    pub fn new<R: Rng + ?Sized>(geom: &PipeGeometry, rng: &mut R) -> Self {
        let left = geom.left_bound();
        let span = geom.right_bound() - left;
        let max_offset = geom.max_offset();
        let particles = (0..PARTICLE_COUNT)
            .map(|i| Particle {
                x: left + (i as f32 / PARTICLE_COUNT as f32) * span,
                y: geom.centre_y + rng.gen_range(-1.0f32..=1.0) * max_offset,
                size: PARTICLE_SIZE,
                speed: 1.0 + rng.gen::<f32>() * 0.5,
                phase: rng.gen::<f32>() * TAU,
            })
            .collect();
        Self { particles }
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

    /// 경과 시간만큼 입자를 전진시키고 수직 위치를 배관 띠 안으로 묶는다.
    ///
    /// `pixels_per_m_s`는 유속을 화면 속도로 바꾸는 배율이다.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed_ms: f32,
        velocity_m_s: f64,
        pixels_per_m_s: f32,
        geom: &PipeGeometry,
        rng: &mut R,
    ) {
        let base_speed = velocity_m_s.abs() as f32 * pixels_per_m_s;
        let step = elapsed_ms / FRAME_MS;
        let (low, high) = geom.band();
        let max_offset = geom.max_offset();

        for p in &mut self.particles {
            p.x += base_speed * p.speed * step;
            p.phase += elapsed_ms * PHASE_RATE_PER_MS;
            p.y = (p.y + p.phase.sin()).clamp(low, high);

            if p.x > geom.right_bound() {
                p.x = geom.left_bound();
                p.y = geom.centre_y + rng.gen_range(-1.0f32..=1.0) * max_offset;
                p.phase = rng.gen::<f32>() * TAU;
            }
        }
    }

    /// 수직 위치를 현재 배관 띠 안으로 되돌린다. 내경이나 화면 높이가 바뀐 뒤 쓴다.
    pub fn confine(&mut self, geom: &PipeGeometry) {
        let (low, high) = geom.band();
        for p in &mut self.particles {
            p.y = p.y.clamp(low, high);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Viewport;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn geometry() -> PipeGeometry {
        PipeGeometry::new(Viewport::from_container(800.0, 400.0), 0.05)
    }

    #[test]
    fn pool_starts_full_and_inside_band() {
        let geom = geometry();
        let pool = ParticlePool::new(&geom, &mut StdRng::seed_from_u64(1));
        let (lo, hi) = geom.band();
        assert_eq!(pool.len(), PARTICLE_COUNT);
        for p in pool.particles() {
            assert!(p.y >= lo && p.y <= hi);
            assert!(p.x >= geom.left_bound() && p.x < geom.right_bound());
            assert!(p.speed >= 1.0 && p.speed < 1.5);
        }
    }

    #[test]
    fn zero_elapsed_keeps_x() {
        let geom = geometry();
        let mut rng = StdRng::seed_from_u64(2);
        let mut pool = ParticlePool::new(&geom, &mut rng);
        let before: Vec<f32> = pool.particles().iter().map(|p| p.x).collect();
        pool.advance(0.0, 1.0, DEFAULT_PIXELS_PER_M_S, &geom, &mut rng);
        let after: Vec<f32> = pool.particles().iter().map(|p| p.x).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn confine_pulls_particles_into_smaller_band() {
        let wide = PipeGeometry::new(Viewport::from_container(800.0, 400.0), 0.1);
        let narrow = geometry();
        let mut pool = ParticlePool::new(&wide, &mut StdRng::seed_from_u64(4));
        pool.confine(&narrow);
        let (lo, hi) = narrow.band();
        assert!(pool.particles().iter().all(|p| p.y >= lo && p.y <= hi));
    }

    #[test]
    fn negative_velocity_moves_forward() {
        let geom = geometry();
        let mut rng = StdRng::seed_from_u64(3);
        let mut pool = ParticlePool::new(&geom, &mut rng);
        let x0 = pool.particles()[0].x;
        pool.advance(16.0, -0.1, DEFAULT_PIXELS_PER_M_S, &geom, &mut rng);
        assert!(pool.particles()[0].x > x0);
    }
}
