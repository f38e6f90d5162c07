//! 배관 유동 시뮬레이터. 입력 소스와 차트를 주입받아 소유하고,
//! 호스트가 매 프레임 `frame`을 호출하면 계산과 그리기를 한 번에 수행한다.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::history::{ChartSeries, ChartSink, HeadLossHistory};
use super::params::{ingest, InputSource, SimulationParameters};
use super::particles::{ParticlePool, DEFAULT_PIXELS_PER_M_S};
use super::physics::{compute, SimulationResult};
use crate::render::{draw_particles, draw_pipe, Canvas, Palette, PipeGeometry, Theme, Viewport};

/// 첫 프레임에서 쓰는 경과 시간 [ms]
const FIRST_FRAME_MS: f64 = 16.0;

/// 애니메이션 루프 상태.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
}

/// 시뮬레이터 생성 옵션.
#[derive(Debug, Clone, Copy)]
pub struct SimulatorOptions {
    pub viewport: Viewport,
    pub theme: Theme,
    /// 유속 → 화면 속도 배율 [px per (m/s) per 16 ms]
    pub pixels_per_m_s: f32,
    /// 입자 난수 시드. None이면 엔트로피에서 만든다.
    pub seed: Option<u64>,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            viewport: Viewport::from_container(800.0, 400.0),
            theme: Theme::default(),
            pixels_per_m_s: DEFAULT_PIXELS_PER_M_S,
            seed: None,
        }
    }
}

pub struct PipeFlowSimulator<S: InputSource, K: ChartSink = ChartSeries> {
    source: S,
    chart: K,
    state: LoopState,
    dirty: bool,
    has_user_input: bool,
    params: SimulationParameters,
    result: SimulationResult,
    history: HeadLossHistory,
    particles: ParticlePool,
    viewport: Viewport,
    theme: Theme,
    palette: Palette,
    pixels_per_m_s: f32,
    last_frame_ms: Option<f64>,
    recomputations: u64,
    rng: StdRng,
}

impl<S: InputSource, K: ChartSink> PipeFlowSimulator<S, K> {
    /// 입자를 배치하고 초기값(보통 0 유량)을 한 번 계산한 뒤 루프를 Running으로 둔다.
    pub fn new(source: S, chart: K, options: SimulatorOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let params = ingest(&source);
        let geom = PipeGeometry::new(options.viewport, params.diameter_m);
        let particles = ParticlePool::new(&geom, &mut rng);

        let mut sim = Self {
            source,
            chart,
            state: LoopState::Idle,
            dirty: true,
            has_user_input: false,
            params,
            result: SimulationResult::default(),
            history: HeadLossHistory::new(),
            particles,
            viewport: options.viewport,
            theme: options.theme,
            palette: options.theme.palette(),
            pixels_per_m_s: options.pixels_per_m_s,
            last_frame_ms: None,
            recomputations: 0,
            rng,
        };
        info!("starting pipe flow simulation");
        sim.state = LoopState::Running;
        sim.recompute_if_dirty();
        sim
    }

    /// 입력 변경 알림. 계산은 다음 프레임에서 한 번만 한다.
    pub fn mark_dirty(&mut self) {
        self.has_user_input = true;
        self.dirty = true;
    }

    /// 루프를 멈춘다. 이후 `frame`은 아무것도 하지 않는다.
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            info!("stopping pipe flow simulation");
        }
        self.state = LoopState::Idle;
    }

    /// 한 프레임을 진행한다. `timestamp_ms`는 단조 증가하는 호스트 시각이다.
    ///
    /// 캔버스가 없으면 그리기만 건너뛰고 계산과 입자 이동은 계속한다.
    /// 루프가 Idle이면 false를 반환한다.
    pub fn frame(&mut self, timestamp_ms: f64, canvas: Option<&mut dyn Canvas>) -> bool {
        if self.state == LoopState::Idle {
            return false;
        }

        self.recompute_if_dirty();

        let elapsed_ms = match self.last_frame_ms {
            Some(last) => (timestamp_ms - last).max(0.0),
            None => FIRST_FRAME_MS,
        };
        self.last_frame_ms = Some(timestamp_ms);

        let geom = self.geometry();
        if self.has_user_input && self.result.velocity_m_s != 0.0 {
            self.particles.advance(
                elapsed_ms as f32,
                self.result.velocity_m_s,
                self.pixels_per_m_s,
                &geom,
                &mut self.rng,
            );
        }
        // 유량 0에서 내경만 줄어도 띠 밖에 남지 않도록
        self.particles.confine(&geom);

        match canvas {
            Some(canvas) => self.redraw(canvas),
            None => warn!("pipe canvas not available, skipping draw"),
        }
        true
    }

    /// 컨테이너 크기가 바뀌었을 때 즉시 다시 그린다(프레임 예약을 거치지 않음).
    pub fn resize(&mut self, width: f32, height: f32, canvas: &mut dyn Canvas) {
        self.viewport = Viewport::from_container(width, height);
        let geom = self.geometry();
        self.particles.confine(&geom);
        self.redraw(canvas);
    }

    /// 프레임 시각 기준을 지운다. 다음 프레임은 첫 프레임처럼 16 ms로 진행한다.
    ///
    /// 호스트가 한동안 `frame`을 부르지 않았다가 다시 시작할 때 쓴다.
    pub fn reset_clock(&mut self) {
        self.last_frame_ms = None;
    }

    /// 외부 테마 신호. 팔레트를 바꾸고 즉시 다시 그린다.
    pub fn set_theme(&mut self, theme: Theme, canvas: &mut dyn Canvas) {
        if theme != self.theme {
            info!("theme changed to {theme}");
        }
        self.theme = theme;
        self.palette = theme.palette();
        self.redraw(canvas);
    }

    pub fn redraw(&self, canvas: &mut dyn Canvas) {
        let geom = self.geometry();
        draw_pipe(canvas, &geom, &self.palette);
        let colour = self.params.fluid.properties().particle_colour;
        draw_particles(canvas, self.particles.particles(), colour, &self.palette);
    }

    fn recompute_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;
        self.recomputations += 1;

        let params = ingest(&self.source);
        // 표시용 내경은 계산 결과와 상관없이 갱신한다.
        self.params = params;
        let result = compute(&params);
        if !result.is_finite() {
            warn!(
                "non-finite result for {:?} (v={}, hf={}), keeping previous values",
                params, result.velocity_m_s, result.head_loss_m
            );
            return;
        }
        debug!(
            "v={:.4} m/s, Re={:.1}, f={:.5}, hf={:.5} m",
            result.velocity_m_s, result.reynolds, result.friction_factor, result.head_loss_m
        );
        self.result = result;

        if self.history.record(result.velocity_m_s, result.head_loss_m) {
            let (labels, values) = self.history.chart_series();
            self.chart.update(labels, values);
        }
    }

    pub fn geometry(&self) -> PipeGeometry {
        PipeGeometry::new(self.viewport, self.params.diameter_m)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn has_user_input(&self) -> bool {
        self.has_user_input
    }

    pub fn parameters(&self) -> &SimulationParameters {
        &self.params
    }

    /// 마지막으로 받아들인 유효한 결과.
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    pub fn history(&self) -> &HeadLossHistory {
        &self.history
    }

    pub fn particles(&self) -> &ParticlePool {
        &self.particles
    }

    pub fn chart(&self) -> &K {
        &self.chart
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// 지금까지 수행한 재계산 횟수.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 입력 소스 수정용. 수정 후에는 `mark_dirty`를 호출해야 반영된다.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
