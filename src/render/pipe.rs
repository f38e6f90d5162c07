//! 배관 단면과 유동 입자를 그린다. 색은 모두 주입된 팔레트에서 가져온다.

use super::canvas::{Canvas, Rgba};
use super::palette::Palette;
use crate::flow::particles::Particle;

const PIPE_MARGIN: f32 = 50.0;
const PARTICLE_MARGIN: f32 = 70.0;
const WALL_THICKNESS: f32 = 4.0;
const BASE_PIPE_HEIGHT: f32 = 60.0;
const REFERENCE_DIAMETER_M: f64 = 0.05;
const MAX_HEIGHT_RATIO: f32 = 0.6;
const PARTICLE_BAND_RATIO: f32 = 0.35;
const TAP_OFFSET: f32 = 150.0;
const TAP_HEIGHT: f32 = 30.0;
const MIN_VIEWPORT_HEIGHT: f32 = 200.0;

/// 그리기 영역 크기 [px].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// 담고 있는 영역 크기로부터 만든다. 높이는 최소 200px.
    pub fn from_container(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(MIN_VIEWPORT_HEIGHT),
        }
    }
}

/// 현재 내경과 화면 크기에서 유도한 배관 배치.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeGeometry {
    pub viewport: Viewport,
    pub centre_y: f32,
    pub pipe_height: f32,
}

impl PipeGeometry {
    pub fn new(viewport: Viewport, diameter_m: f64) -> Self {
        let scaled = BASE_PIPE_HEIGHT * (diameter_m / REFERENCE_DIAMETER_M) as f32;
        Self {
            viewport,
            centre_y: viewport.height / 2.0,
            pipe_height: scaled.min(viewport.height * MAX_HEIGHT_RATIO),
        }
    }

    /// 입자가 중심선에서 벗어날 수 있는 최대 거리.
    pub fn max_offset(&self) -> f32 {
        self.pipe_height * PARTICLE_BAND_RATIO
    }

    pub fn band(&self) -> (f32, f32) {
        let off = self.max_offset();
        (self.centre_y - off, self.centre_y + off)
    }

    pub fn left_bound(&self) -> f32 {
        PARTICLE_MARGIN
    }

    pub fn right_bound(&self) -> f32 {
        self.viewport.width - PARTICLE_MARGIN
    }

    fn pipe_top(&self) -> f32 {
        self.centre_y - self.pipe_height / 2.0
    }

    fn pipe_length(&self) -> f32 {
        self.viewport.width - 2.0 * PIPE_MARGIN
    }
}

/// 배경을 지우고 배관 몸체, 벽, 끝단, 압력탭을 그린다.
pub fn draw_pipe(canvas: &mut dyn Canvas, geom: &PipeGeometry, palette: &Palette) {
    canvas.clear(palette.background);

    let top = geom.pipe_top();
    let length = geom.pipe_length();
    canvas.fill_rect(PIPE_MARGIN, top, length, geom.pipe_height, palette.pipe);
    canvas.fill_rect(PIPE_MARGIN, top, length, geom.pipe_height, palette.water);

    // 벽: 바깥쪽은 밝게, 가운데 줄은 어둡게
    let bottom = top + geom.pipe_height;
    for wall_y in [top - WALL_THICKNESS, bottom] {
        canvas.fill_rect(PIPE_MARGIN, wall_y, length, WALL_THICKNESS, palette.pipe_wall);
        canvas.fill_rect(
            PIPE_MARGIN,
            wall_y + WALL_THICKNESS / 4.0,
            length,
            WALL_THICKNESS / 2.0,
            palette.pipe_wall_dark,
        );
    }

    let end_height = geom.pipe_height + 2.0 * WALL_THICKNESS;
    for end_x in [PIPE_MARGIN - WALL_THICKNESS, geom.viewport.width - PIPE_MARGIN] {
        canvas.fill_rect(end_x, top - WALL_THICKNESS, WALL_THICKNESS, end_height, palette.pipe_wall);
    }

    draw_pressure_tap(canvas, TAP_OFFSET, top, palette);
    draw_pressure_tap(canvas, geom.viewport.width - TAP_OFFSET, top, palette);
}

fn draw_pressure_tap(canvas: &mut dyn Canvas, x: f32, pipe_top: f32, palette: &Palette) {
    let knob_y = pipe_top - TAP_HEIGHT;
    canvas.stroke_line((x, pipe_top), (x, knob_y), 2.0, palette.pipe_wall);
    canvas.fill_circle(x, knob_y, 6.0, palette.pipe_wall);
    canvas.fill_circle(x, pipe_top, 4.0, palette.accent);
}

/// 입자마다 본체 원과 작은 하이라이트를 그린다.
pub fn draw_particles(canvas: &mut dyn Canvas, particles: &[Particle], colour: Rgba, palette: &Palette) {
    for p in particles {
        canvas.fill_circle(p.x, p.y, p.size, colour);
        let r = p.size / 3.0;
        canvas.fill_circle(p.x - r, p.y - r, r, palette.highlight);
    }
}
