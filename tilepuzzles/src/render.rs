//! Draws a puzzle onto a [`Surface`].
//!
//! All sizes derive from the layout's tile size so the picture scales with the surface.
//! A full frame is the grid, the score strips above and below it, and the restart control.
use std::time::Instant;

use crate::{
    game::{memory::Hue, memory::Shape, Puzzle, Symbol, TileFace},
    layout::Layout,
    score::{BestScores, Score, ScoreText},
};

pub use self::{
    display_list::{DisplayList, DrawOp},
    path::{Color, Path, Segment, Surface, Text, FONT_FAMILY},
    svg::SvgSurface,
};

mod display_list;
mod path;
pub mod shapes;
mod svg;

/// Everything needed to draw one frame besides the puzzle itself.
#[derive(Debug, Copy, Clone)]
pub struct Frame<'a> {
    pub layout: &'a Layout,
    pub best: &'a BestScores,
    /// Tile with keyboard focus, if the cursor should be shown.
    pub cursor: Option<usize>,
    pub now: Instant,
}

impl Hue {
    pub fn color(self) -> Color {
        match self {
            Hue::Orange => Color::Orange,
            Hue::Blue => Color::Blue,
            Hue::Red => Color::Red,
        }
    }
}

/// Draw the whole puzzle: every tile, the score strips and the restart control.
pub fn render_frame<S: Surface + ?Sized, P: Puzzle + ?Sized>(
    surface: &mut S,
    puzzle: &P,
    frame: &Frame,
) {
    let (width, height) = surface.size();
    surface.clear_rect(0.0, 0.0, width, height);
    for index in 0..puzzle.tile_count() {
        render_tile(surface, frame.layout, index, puzzle.tile_face(index));
    }
    if let Some(cursor) = frame.cursor {
        render_cursor(surface, frame.layout, cursor);
    }
    render_meta(surface, frame.layout, puzzle.score(frame.now), frame.best);
}

/// Draw one tile slot: the rounded outline, and the face when it is showing.
pub fn render_tile<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, index: usize, face: TileFace) {
    let dim = layout.tile_dim;
    let (x, y) = layout.tile_origin(index);
    let (cx, cy) = (x + dim / 2.0, y + dim / 2.0);

    if let TileFace::Blank = face {
        surface.clear_rect(x, y, dim, dim);
        return;
    }

    let outline = shapes::rounded_square(x, y, dim, dim / 20.0, dim / 50.0);
    surface.stroke_path(&outline, Color::Black, 2.0);
    let fill = match face {
        TileFace::Symbol { solved: true, .. } => Color::Grey,
        _ => Color::White,
    };
    surface.fill_path(&outline, fill);

    match face {
        TileFace::Symbol { symbol, .. } => render_symbol(surface, symbol, cx, cy, dim / 4.0),
        TileFace::Number(number) => {
            let size = dim / 3.0;
            let content = number.to_string();
            // Courier glyphs are about 0.6 em wide.
            let text_width = content.len() as f64 * size * 0.6;
            surface.fill_text(&Text {
                x: cx - text_width / 2.0,
                y: cy + size / 3.0,
                size,
                content,
                color: Color::Black,
            });
        }
        TileFace::Hidden | TileFace::Blank => {}
    }
}

/// Draw a memory symbol centered on `(cx, cy)`.
pub fn render_symbol<S: Surface + ?Sized>(surface: &mut S, symbol: Symbol, cx: f64, cy: f64, radius: f64) {
    let path = match symbol.shape() {
        Shape::Star => shapes::star(cx, cy, radius),
        Shape::Triangle => shapes::triangle(cx, cy, radius),
        Shape::Circle => Path::circle(cx, cy, radius),
        Shape::Square => shapes::square(cx, cy, radius),
    };
    surface.fill_path(&path, symbol.hue().color());
}

/// Outline the tile with keyboard focus.
pub fn render_cursor<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, index: usize) {
    if index >= layout.grid.total_size() {
        return;
    }
    let dim = layout.tile_dim;
    let (x, y) = layout.tile_origin(index);
    let outline = shapes::rounded_square(x, y, dim, dim / 20.0, dim / 10.0);
    surface.stroke_path(&outline, Color::Blue, (dim / 30.0).max(1.0));
}

/// Redraw the header and footer strips: current score on top, best scores below, and
/// the restart control.
pub fn render_meta<S: Surface + ?Sized>(surface: &mut S, layout: &Layout, current: Score, best: &BestScores) {
    let margin = layout.tile_dim / 10.0;
    let size = layout.tile_dim / 6.0;
    let (width, height) = (layout.width, layout.height);

    surface.clear_rect(0.0, 0.0, width, layout.offset_y);
    surface.clear_rect(0.0, height - layout.offset_y, width, layout.offset_y);

    surface.fill_text(&Text {
        x: margin,
        y: size + margin,
        size,
        content: current_line(current),
        color: Color::Black,
    });
    surface.fill_text(&Text {
        x: margin,
        y: height - margin,
        size,
        content: best_line(best),
        color: Color::Black,
    });
    render_restart(surface, layout);
}

/// Circular-arrow restart control in the top-right corner.
pub fn render_restart<S: Surface + ?Sized>(surface: &mut S, layout: &Layout) {
    let button = &layout.restart;
    let arrow = shapes::restart_arrow(button.x, button.y, button.radius, layout.tile_dim / 25.0);
    surface.fill_path(&arrow, Color::Black);
    let arc = shapes::restart_arc(button.x, button.y, button.radius);
    surface.stroke_path(&arc, Color::Black, layout.tile_dim / 30.0);
}

/// `[current: moves|time]`
pub fn current_line(current: Score) -> String {
    format!("[current: {}]", ScoreText(Some(current)))
}

/// `[best(m): moves|time] [best(t): moves|time]`, with `-` for missing records.
pub fn best_line(best: &BestScores) -> String {
    format!(
        "[best(m): {}] [best(t): {}]",
        ScoreText(best.by_moves),
        ScoreText(best.by_time)
    )
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::{
        game::{memory, sliding},
        layout::{Layout, MEMORY_ARRANGEMENTS},
    };

    fn memory_game() -> memory::Game {
        let deal: Vec<u8> = (0..memory::TILE_COUNT).map(|i| (i / 2) as u8).collect();
        memory::Game::from_symbols(&deal).unwrap()
    }

    #[test]
    fn status_lines() {
        assert_eq!(current_line(Score::new(3, 9)), "[current: 3|9]");
        let best = BestScores {
            by_moves: Some(Score::new(14, 50)),
            by_time: None,
        };
        assert_eq!(best_line(&best), "[best(m): 14|50] [best(t): -]");
    }

    #[test]
    fn covered_tiles_draw_no_symbols() {
        let layout = Layout::compute(&MEMORY_ARRANGEMENTS, 700.0, 500.0);
        let mut list = DisplayList::new(700.0, 500.0);
        let game = memory_game();
        let frame = Frame {
            layout: &layout,
            best: &BestScores::default(),
            cursor: None,
            now: Instant::now(),
        };
        render_frame(&mut list, &game, &frame);

        let colored = list
            .ops()
            .iter()
            .filter(|op| match op {
                DrawOp::Fill { color, .. } => {
                    matches!(color, Color::Orange | Color::Blue | Color::Red)
                }
                _ => false,
            })
            .count();
        assert_eq!(colored, 0);
        assert_eq!(list.texts(), vec!["[current: 0|0]", "[best(m): -] [best(t): -]"]);
    }

    #[test]
    fn solved_pair_is_grey_with_symbol() {
        let layout = Layout::compute(&MEMORY_ARRANGEMENTS, 700.0, 500.0);
        let mut game = memory_game();
        let now = Instant::now();
        game.flip(4, now).unwrap();
        game.flip(5, now).unwrap();

        let mut list = DisplayList::new(700.0, 500.0);
        render_tile(&mut list, &layout, 4, Puzzle::tile_face(&game, 4));
        let fills: Vec<Color> = list
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        // Symbol 2 is an orange circle.
        assert_eq!(fills, vec![Color::Grey, Color::Orange]);
    }

    #[test]
    fn memory_cursor_is_outlined() {
        let layout = Layout::compute(&MEMORY_ARRANGEMENTS, 700.0, 500.0);
        let mut list = DisplayList::new(700.0, 500.0);
        let frame = Frame {
            layout: &layout,
            best: &BestScores::default(),
            cursor: Some(7),
            now: Instant::now(),
        };
        render_frame(&mut list, &memory_game(), &frame);
        let outlines = list
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Stroke { color: Color::Blue, .. }))
            .count();
        assert_eq!(outlines, 1);
    }

    #[test]
    fn sliding_tiles_show_numbers_and_blank() {
        let game = sliding::Game::from_tiles(2, 2, &[1, 2, 0, 3]).unwrap();
        let layout = Layout::compute(&Puzzle::arrangements(&game), 300.0, 300.0);
        let mut list = DisplayList::new(300.0, 300.0);
        let frame = Frame {
            layout: &layout,
            best: &BestScores::default(),
            cursor: None,
            now: Instant::now(),
        };
        render_frame(&mut list, &game, &frame);
        let texts = list.texts();
        assert!(texts.contains(&"1") && texts.contains(&"2") && texts.contains(&"3"));
        assert!(!list.ops().iter().any(|op| matches!(
            op,
            DrawOp::Stroke {
                color: Color::Blue,
                ..
            }
        )));
    }
}
