use crate::render::{Color, Path, Surface, Text};

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Fill {
        path: Path,
        color: Color,
    },
    Stroke {
        path: Path,
        color: Color,
        line_width: f64,
    },
    Text(Text),
}

/// [`Surface`] that records every operation in order. Other surfaces can replay it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Content of every text operation, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text(text) => Some(text.content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Draw the recorded operations onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for op in &self.ops {
            match op {
                DrawOp::Clear {
                    x,
                    y,
                    width,
                    height,
                } => target.clear_rect(*x, *y, *width, *height),
                DrawOp::Fill { path, color } => target.fill_path(path, *color),
                DrawOp::Stroke {
                    path,
                    color,
                    line_width,
                } => target.stroke_path(path, *color, *line_width),
                DrawOp::Text(text) => target.fill_text(text),
            }
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            color,
            line_width,
        });
    }

    fn fill_text(&mut self, text: &Text) {
        self.ops.push(DrawOp::Text(text.clone()));
    }
}
