//! [`Surface`] that renders a frame to a standalone SVG document.
use std::{
    f64::consts::PI,
    fmt::Write,
};

use crate::render::{Color, Path, Segment, Surface, Text, FONT_FAMILY};

fn fmt_f64(value: f64) -> String {
    format!("{:.3}", value)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Path data for `path` in SVG syntax.
pub(crate) fn path_data(path: &Path) -> String {
    let mut d = String::new();
    let mut has_point = false;
    for segment in path.segments() {
        match *segment {
            Segment::MoveTo(x, y) => {
                let _ = write!(d, " M {} {}", fmt_f64(x), fmt_f64(y));
                has_point = true;
            }
            Segment::LineTo(x, y) => {
                let _ = write!(d, " L {} {}", fmt_f64(x), fmt_f64(y));
                has_point = true;
            }
            Segment::QuadTo { cx, cy, x, y } => {
                let _ = write!(
                    d,
                    " Q {} {} {} {}",
                    fmt_f64(cx),
                    fmt_f64(cy),
                    fmt_f64(x),
                    fmt_f64(y)
                );
                has_point = true;
            }
            Segment::Arc {
                cx,
                cy,
                radius,
                start,
                end,
            } => {
                let at = |angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());
                let (sx, sy) = at(start);
                let verb = if has_point { "L" } else { "M" };
                let _ = write!(d, " {} {} {}", verb, fmt_f64(sx), fmt_f64(sy));
                let sweep = (end - start).min(2.0 * PI);
                // A single SVG arc cannot close on itself, so a full turn is two halves.
                let mut steps = vec![start + sweep];
                if sweep >= 2.0 * PI - 1e-9 {
                    steps = vec![start + PI, start + 2.0 * PI];
                }
                let mut from = start;
                for to in steps {
                    let (ex, ey) = at(to);
                    let large = if to - from > PI { 1 } else { 0 };
                    let _ = write!(
                        d,
                        " A {r} {r} 0 {} 1 {} {}",
                        large,
                        fmt_f64(ex),
                        fmt_f64(ey),
                        r = fmt_f64(radius)
                    );
                    from = to;
                }
                has_point = true;
            }
            Segment::Close => d.push_str(" Z"),
        }
    }
    d.trim_start().to_owned()
}

/// Collects drawing operations as SVG elements. Call [`SvgSurface::finish`] for the
/// document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// The complete SVG document.
    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n{}</svg>\n",
            self.body,
            w = fmt_f64(self.width),
            h = fmt_f64(self.height),
        )
    }
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let _ = writeln!(
            self.body,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"white\"/>",
            fmt_f64(x),
            fmt_f64(y),
            fmt_f64(width),
            fmt_f64(height)
        );
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"{}\"/>",
            path_data(path),
            color.css()
        );
    }

    fn stroke_path(&mut self, path: &Path, color: Color, line_width: f64) {
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            path_data(path),
            color.css(),
            fmt_f64(line_width)
        );
    }

    fn fill_text(&mut self, text: &Text) {
        let _ = writeln!(
            self.body,
            "<text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>",
            fmt_f64(text.x),
            fmt_f64(text.y),
            FONT_FAMILY,
            fmt_f64(text.size),
            text.color.css(),
            escape(&text.content)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polygon_path_data() {
        let path = Path::polygon(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.5)]);
        assert_eq!(
            path_data(&path),
            "M 0.000 0.000 L 10.000 0.000 L 10.000 5.500 Z"
        );
    }

    #[test]
    fn full_circle_is_two_arcs() {
        let d = path_data(&Path::circle(10.0, 10.0, 5.0));
        assert!(d.starts_with("M 15.000 10.000"));
        assert_eq!(d.matches(" A ").count(), 2);
    }

    #[test]
    fn document_escapes_text() {
        let mut svg = SvgSurface::new(100.0, 50.0);
        svg.fill_text(&Text {
            x: 1.0,
            y: 2.0,
            size: 3.0,
            content: "a<b & c".to_owned(),
            color: Color::Black,
        });
        svg.fill_path(&Path::circle(5.0, 5.0, 1.0), Color::Red);
        let doc = svg.finish();
        assert!(doc.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100.000\""));
        assert!(doc.contains(">a&lt;b &amp; c</text>"));
        assert!(doc.contains("fill=\"red\""));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
