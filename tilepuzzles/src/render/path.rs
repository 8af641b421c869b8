//! Vector paths and the canvas-like [`Surface`] they are drawn on.
use std::f64::consts::PI;

/// Colors used by the puzzles.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Color {
    Black,
    White,
    Grey,
    Orange,
    Blue,
    Red,
}

impl Color {
    /// CSS color name.
    pub fn css(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Grey => "grey",
            Color::Orange => "orange",
            Color::Blue => "blue",
            Color::Red => "red",
        }
    }
}

/// A single path command. Angles are in radians, measured clockwise from the positive
/// `x` axis as on a screen.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Segment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Quadratic curve through control point `(cx, cy)` to `(x, y)`.
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    /// Clockwise arc around `(cx, cy)`.
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Close,
}

/// An ordered list of [`Segment`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(Segment::MoveTo(x, y));
        self
    }

    pub fn line_to(mut self, x: f64, y: f64) -> Self {
        self.segments.push(Segment::LineTo(x, y));
        self
    }

    pub fn quad_to(mut self, cx: f64, cy: f64, x: f64, y: f64) -> Self {
        self.segments.push(Segment::QuadTo { cx, cy, x, y });
        self
    }

    pub fn arc(mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> Self {
        self.segments.push(Segment::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(Segment::Close);
        self
    }

    /// A closed polygon through `points`.
    pub fn polygon<I: IntoIterator<Item = (f64, f64)>>(points: I) -> Self {
        let mut path = Path::new();
        for (i, (x, y)) in points.into_iter().enumerate() {
            path = if i == 0 {
                path.move_to(x, y)
            } else {
                path.line_to(x, y)
            };
        }
        path.close()
    }

    /// A full circle.
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Path::new().arc(cx, cy, radius, 0.0, 2.0 * PI)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Text placement: the baseline starts at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub content: String,
    pub color: Color,
}

/// Font family for all text.
pub const FONT_FAMILY: &str = "Courier New";

/// A 2D drawing target in the style of a browser canvas.
pub trait Surface {
    /// Width and height in surface units.
    fn size(&self) -> (f64, f64);

    /// Erase a rectangle to the background.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_path(&mut self, path: &Path, color: Color);

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64);

    fn fill_text(&mut self, text: &Text);
}
