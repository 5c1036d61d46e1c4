use crate::error::GraphResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless screen usage.
///
/// It still validates frame content so tests catch invalid geometry before
/// a real backend sees it.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_dashed_line_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> GraphResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines.len();
        self.last_dashed_line_count = frame
            .lines
            .iter()
            .filter(|line| line.style != crate::render::LineStrokeStyle::Solid)
            .count();
        self.last_text_count = frame.texts.len();
        Ok(())
    }
}
