//! 그리기 대상 추상화, 테마 팔레트, 배관/입자 렌더러.

pub mod canvas;
pub mod palette;
pub mod pipe;

pub use canvas::{Canvas, DrawCommand, RecordingCanvas, Rgba};
pub use palette::{Palette, Theme};
pub use pipe::{draw_particles, draw_pipe, PipeGeometry, Viewport};
