//! Tile outlines, face symbols and the restart control as paths.
use std::f64::consts::PI;

use crate::render::Path;

/// Point at `radius` from the center, `angle` radians clockwise from straight up.
fn polar(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

/// Square with rounded corners, inset by `margin` on every side.
pub fn rounded_square(x: f64, y: f64, side: f64, radius: f64, margin: f64) -> Path {
    let (left, top) = (x + margin, y + margin);
    let (right, bottom) = (x + side - margin, y + side - margin);
    Path::new()
        .move_to(left + radius, top)
        .line_to(right - radius, top)
        .quad_to(right, top, right, top + radius)
        .line_to(right, bottom - radius)
        .quad_to(right, bottom, right - radius, bottom)
        .line_to(left + radius, bottom)
        .quad_to(left, bottom, left, bottom - radius)
        .line_to(left, top + radius)
        .quad_to(left, top, left + radius, top)
        .close()
}

/// Five-pointed star, point up, with inner radius half the outer radius.
pub fn star(cx: f64, cy: f64, radius: f64) -> Path {
    Path::polygon((0..10).map(|i| {
        let r = if i % 2 == 0 { radius } else { radius / 2.0 };
        polar(cx, cy, r, i as f64 * PI / 5.0)
    }))
}

/// Equilateral triangle, point up.
pub fn triangle(cx: f64, cy: f64, radius: f64) -> Path {
    Path::polygon((0..3).map(|i| polar(cx, cy, radius, i as f64 * 2.0 * PI / 3.0)))
}

/// Axis-aligned square with half-side `radius`.
pub fn square(cx: f64, cy: f64, radius: f64) -> Path {
    Path::polygon(vec![
        (cx - radius, cy - radius),
        (cx + radius, cy - radius),
        (cx + radius, cy + radius),
        (cx - radius, cy + radius),
    ])
}

/// Arrowhead of the restart control. The control is drawn rotated by 7π/4; the head sits
/// where the arc starts, at angle 0 of the rotated frame.
pub fn restart_arrow(cx: f64, cy: f64, radius: f64, arrow: f64) -> Path {
    let rotation = PI * 7.0 / 4.0;
    let (sin, cos) = rotation.sin_cos();
    let place = |px: f64, py: f64| (cx + px * cos - py * sin, cy + px * sin + py * cos);
    Path::polygon(vec![
        place(radius - arrow, -arrow),
        place(radius + arrow, -arrow),
        place(radius, arrow),
    ])
}

/// Open arc of the restart control, from 5π/12 to 2π in the rotated frame.
pub fn restart_arc(cx: f64, cy: f64, radius: f64) -> Path {
    let rotation = PI * 7.0 / 4.0;
    Path::new().arc(cx, cy, radius, rotation + PI * 5.0 / 12.0, rotation + 2.0 * PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Segment;

    fn points(path: &Path) -> Vec<(f64, f64)> {
        path.segments()
            .iter()
            .filter_map(|seg| match *seg {
                Segment::MoveTo(x, y) | Segment::LineTo(x, y) => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn star_alternates_radii() {
        let pts = points(&star(0.0, 0.0, 10.0));
        assert_eq!(pts.len(), 10);
        assert!((pts[0].0).abs() < 1e-9 && (pts[0].1 + 10.0).abs() < 1e-9);
        for (i, (x, y)) in pts.iter().enumerate() {
            let r = (x * x + y * y).sqrt();
            let expected = if i % 2 == 0 { 10.0 } else { 5.0 };
            assert!((r - expected).abs() < 1e-9, "point {} at radius {}", i, r);
        }
    }

    #[test]
    fn triangle_is_point_up() {
        let pts = points(&triangle(50.0, 50.0, 20.0));
        assert_eq!(pts.len(), 3);
        assert!((pts[0].1 - 30.0).abs() < 1e-9);
        assert!(pts[1].1 > 50.0 && pts[2].1 > 50.0);
    }

    #[test]
    fn rounded_square_stays_inside_margin() {
        let path = rounded_square(100.0, 100.0, 50.0, 2.5, 1.0);
        for (x, y) in points(&path) {
            assert!(x >= 101.0 && x <= 149.0);
            assert!(y >= 101.0 && y <= 149.0);
        }
        assert_eq!(path.segments().last(), Some(&Segment::Close));
    }
}
