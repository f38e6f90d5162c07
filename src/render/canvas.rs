/// 8비트 RGBA 색상.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

/// 시뮬레이터가 그리는 대상. 좌표는 픽셀, 원점은 좌상단.
pub trait Canvas {
    fn clear(&mut self, colour: Rgba);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Rgba);
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, colour: Rgba);
    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, colour: Rgba);
}

/// 그리기 명령 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        colour: Rgba,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        colour: Rgba,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        colour: Rgba,
    },
}

/// 명령을 기록만 하는 캔버스. 헤드리스 실행과 테스트에서 쓴다.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막 clear 이후의 명령만 남긴 한 프레임 분량.
    pub fn last_frame(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        &self.commands[start..]
    }

    pub fn circles(&self) -> impl Iterator<Item = (f32, f32, f32, Rgba)> + '_ {
        self.last_frame().iter().filter_map(|c| match *c {
            DrawCommand::Circle {
                cx,
                cy,
                radius,
                colour,
            } => Some((cx, cy, radius, colour)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self, colour: Rgba) {
        self.commands.push(DrawCommand::Clear(colour));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, colour: Rgba) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            colour,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, colour: Rgba) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            colour,
        });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, colour: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            colour,
        });
    }
}
