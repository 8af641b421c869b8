//! Input handling and the play loop around a single puzzle.
//!
//! A [`Session`] owns the puzzle, its layout on the surface, the keyboard cursor and the
//! best-score records. Front-ends feed it [`InputEvent`]s and redraw when it asks.
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    board::Direction,
    game::{MoveError, Progress, Puzzle, Variant},
    layout::Layout,
    render::{render_frame, Frame, Surface},
    score::{BestScores, Improved, Score},
    storage::{self, KeyValueStore},
};

/// Keys the session understands.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Key {
    Arrow(Direction),
    /// Enter or space: act on the cursor tile.
    Activate,
    Restart,
}

/// Raw input from the front-end. Coordinates are in surface units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    /// Release of the pointer at its last known position.
    PointerUp,
    /// A touch that ended at the given point.
    Touch { x: f64, y: f64 },
    Key(Key),
    Resize { width: f64, height: f64 },
}

/// What an event did.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// Only the keyboard cursor moved.
    CursorMoved,
    /// The layout changed.
    Resized,
    /// A new game was dealt.
    Restarted,
    /// The puzzle accepted the input.
    Progressed(Progress),
    /// The puzzle was solved; carries the final score and which records improved.
    Finished { score: Score, improved: Improved },
}

impl Response {
    /// Whether the frame needs to be redrawn.
    pub fn needs_redraw(self) -> bool {
        self != Response::Ignored
    }
}

/// A running puzzle with its layout, input state and score records.
pub struct Session<P, S> {
    puzzle: P,
    new_game: Box<dyn FnMut() -> P>,
    store: S,
    variant: Variant,
    layout: Layout,
    best: BestScores,
    pointer: Option<(f64, f64)>,
    cursor: usize,
    show_cursor: bool,
}

impl<P: Puzzle, S: KeyValueStore> Session<P, S> {
    /// Start a session on a `width` x `height` surface. `new_game` deals the first game
    /// and every restart. Best scores are read from `store`; a read failure starts with
    /// empty records.
    pub fn new<F>(mut new_game: F, store: S, width: f64, height: f64) -> Self
    where
        F: FnMut() -> P + 'static,
    {
        let puzzle = new_game();
        let variant = puzzle.variant();
        let best = storage::load_best(&store, variant).unwrap_or_else(|err| {
            warn!(%err, "could not load best scores");
            BestScores::default()
        });
        let layout = Layout::compute(&puzzle.arrangements(), width, height);
        Self {
            puzzle,
            new_game: Box::new(new_game),
            store,
            variant,
            layout,
            best,
            pointer: None,
            cursor: 0,
            show_cursor: false,
        }
    }

    pub fn puzzle(&self) -> &P {
        &self.puzzle
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn best(&self) -> &BestScores {
        &self.best
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tile with keyboard focus, once the keyboard has been used.
    pub fn cursor(&self) -> Option<usize> {
        if self.show_cursor {
            Some(self.cursor)
        } else {
            None
        }
    }

    pub fn score(&self, now: Instant) -> Score {
        self.puzzle.score(now)
    }

    /// Apply one input event.
    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Response {
        match event {
            InputEvent::PointerMove { x, y } => {
                self.pointer = Some((x, y));
                Response::Ignored
            }
            InputEvent::PointerUp => match self.pointer {
                Some((x, y)) => self.point(x, y, now),
                None => Response::Ignored,
            },
            InputEvent::Touch { x, y } => {
                self.pointer = Some((x, y));
                self.point(x, y, now)
            }
            InputEvent::Key(key) => self.key(key, now),
            InputEvent::Resize { width, height } => {
                self.layout = Layout::compute(&self.puzzle.arrangements(), width, height);
                debug!(width, height, grid = ?self.layout.grid, "resized");
                Response::Resized
            }
        }
    }

    /// Deal a new game. Best scores carry over.
    pub fn restart(&mut self) -> Response {
        self.puzzle = (self.new_game)();
        self.cursor = 0;
        info!(variant = self.variant.name(), "new game");
        Response::Restarted
    }

    /// Act on the tile at `index` as if it had been clicked.
    pub fn select(&mut self, index: usize, now: Instant) -> Response {
        let result = self.puzzle.click(index, now);
        self.apply(result)
    }

    /// Draw the current frame.
    pub fn render<T: Surface + ?Sized>(&self, surface: &mut T, now: Instant) {
        let frame = Frame {
            layout: &self.layout,
            best: &self.best,
            cursor: self.cursor(),
            now,
        };
        render_frame(surface, &self.puzzle, &frame);
    }

    fn point(&mut self, x: f64, y: f64, now: Instant) -> Response {
        if self.layout.hits_restart(x, y) {
            return self.restart();
        }
        match self.layout.tile_at(x, y) {
            Some(index) => {
                self.show_cursor = false;
                self.select(index, now)
            }
            None => Response::Ignored,
        }
    }

    fn key(&mut self, key: Key, now: Instant) -> Response {
        match key {
            Key::Restart => self.restart(),
            Key::Activate if self.puzzle.has_cursor() => {
                self.show_cursor = true;
                self.select(self.cursor, now)
            }
            Key::Activate => Response::Ignored,
            Key::Arrow(dir) if self.puzzle.has_cursor() => self.move_cursor(dir),
            Key::Arrow(dir) => {
                let result = self.puzzle.push(dir, now);
                self.apply(result)
            }
        }
    }

    fn move_cursor(&mut self, dir: Direction) -> Response {
        let grid = self.layout.grid;
        let was_shown = self.show_cursor;
        self.show_cursor = true;
        let here = grid.un_linearize(self.cursor.min(grid.total_size() - 1));
        match grid.step(here, dir) {
            Some(next) => {
                self.cursor = grid.linearize(&next);
                Response::CursorMoved
            }
            None if !was_shown => Response::CursorMoved,
            None => Response::Ignored,
        }
    }

    fn apply(&mut self, result: Result<Progress, MoveError>) -> Response {
        match result {
            Ok(Progress::Solved(score)) => self.finish(score),
            Ok(progress) => Response::Progressed(progress),
            Err(err) => {
                debug!(%err, "input rejected");
                Response::Ignored
            }
        }
    }

    fn finish(&mut self, score: Score) -> Response {
        let improved = self.best.record(score);
        if improved.any() {
            info!(
                variant = self.variant.name(),
                moves = score.moves,
                time = score.time,
                by_moves = improved.moves,
                by_time = improved.time,
                "new best score"
            );
        }
        if let Err(err) = storage::save_best(&mut self.store, self.variant, &self.best) {
            warn!(%err, "could not save best scores");
        }
        Response::Finished { score, improved }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        game::{memory, sliding},
        storage::MemoryStore,
    };

    fn adjacent_pairs() -> memory::Game {
        let deal: Vec<u8> = (0..memory::TILE_COUNT).map(|i| (i / 2) as u8).collect();
        memory::Game::from_symbols(&deal).unwrap()
    }

    fn memory_session() -> Session<memory::Game, MemoryStore> {
        // 700x500 lays the tiles out 6x4 at 100 units each, starting at (50, 50).
        Session::new(adjacent_pairs, MemoryStore::new(), 700.0, 500.0)
    }

    fn center(index: usize) -> (f64, f64) {
        (50.0 + (index % 6) as f64 * 100.0 + 50.0, 50.0 + (index / 6) as f64 * 100.0 + 50.0)
    }

    #[test]
    fn pointer_up_acts_at_last_position() {
        let now = Instant::now();
        let mut session = memory_session();
        assert_eq!(session.handle(InputEvent::PointerUp, now), Response::Ignored);

        let (x, y) = center(3);
        session.handle(InputEvent::PointerMove { x, y }, now);
        assert_eq!(
            session.handle(InputEvent::PointerUp, now),
            Response::Progressed(Progress::Picked)
        );
        assert!(session.puzzle().face_up(3));

        // Same tile again is rejected.
        assert_eq!(session.handle(InputEvent::PointerUp, now), Response::Ignored);
    }

    #[test]
    fn touch_on_restart_deals_new_game() {
        let now = Instant::now();
        let mut session = memory_session();
        session.select(0, now);
        assert_eq!(
            session.handle(InputEvent::Touch { x: 675.0, y: 25.0 }, now),
            Response::Restarted
        );
        assert!(!session.puzzle().face_up(0));
    }

    #[test]
    fn finishing_records_and_persists() {
        let t0 = Instant::now();
        let mut session = memory_session();
        let mut last = Response::Ignored;
        for pair in 0..memory::PAIR_COUNT {
            let now = t0 + Duration::from_secs(pair as u64 * 2);
            session.select(pair * 2, now);
            last = session.select(pair * 2 + 1, now);
        }
        let score = Score::new(12, 22);
        assert_eq!(
            last,
            Response::Finished {
                score,
                improved: Improved {
                    moves: true,
                    time: true
                }
            }
        );
        assert_eq!(session.best().by_moves, Some(score));
        assert_eq!(
            session.store().get("bestMoves").unwrap().as_deref(),
            Some("12|22")
        );

        // Bests survive a restart; the new game starts from zero.
        session.handle(InputEvent::Key(Key::Restart), t0);
        assert_eq!(session.best().by_time, Some(score));
        assert_eq!(session.score(t0), Score::new(0, 0));
    }

    #[test]
    fn memory_arrows_move_cursor() {
        let now = Instant::now();
        let mut session = memory_session();
        assert_eq!(session.cursor(), None);
        assert_eq!(
            session.handle(InputEvent::Key(Key::Arrow(Direction::Up)), now),
            Response::CursorMoved
        );
        assert_eq!(session.cursor(), Some(0));
        session.handle(InputEvent::Key(Key::Arrow(Direction::Right)), now);
        session.handle(InputEvent::Key(Key::Arrow(Direction::Down)), now);
        assert_eq!(session.cursor(), Some(7));
        assert_eq!(
            session.handle(InputEvent::Key(Key::Activate), now),
            Response::Progressed(Progress::Picked)
        );
        assert!(session.puzzle().face_up(7));
    }

    #[test]
    fn sliding_arrows_push_tiles() {
        let now = Instant::now();
        let game = || {
            sliding::Game::from_tiles(4, 4, &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 0, 15])
                .unwrap()
        };
        let mut session = Session::new(game, MemoryStore::new(), 500.0, 500.0);
        assert_eq!(
            session.handle(InputEvent::Key(Key::Arrow(Direction::Up)), now),
            Response::Ignored
        );
        let response = session.handle(InputEvent::Key(Key::Arrow(Direction::Left)), now);
        assert!(matches!(response, Response::Finished { .. }));
        assert_eq!(session.cursor(), None);
        assert_eq!(
            session.best().by_moves,
            Some(Score::new(1, 0))
        );
        assert_eq!(
            session.store().get("slidingBestMoves").unwrap().as_deref(),
            Some("1|0")
        );
    }

    #[test]
    fn sliding_has_no_cursor() {
        let now = Instant::now();
        // Blank in the centre, so every arrow moves a tile.
        let game = || sliding::Game::from_tiles(3, 3, &[1, 2, 3, 4, 0, 5, 7, 8, 6]).unwrap();
        let mut session = Session::new(game, MemoryStore::new(), 400.0, 400.0);
        for &dir in Direction::ALL {
            assert_eq!(
                session.handle(InputEvent::Key(Key::Arrow(dir)), now),
                Response::Progressed(Progress::Moved)
            );
            session.handle(InputEvent::Key(Key::Arrow(dir.opposite())), now);
        }
        let before = session.puzzle().clone();
        assert_eq!(
            session.handle(InputEvent::Key(Key::Activate), now),
            Response::Ignored
        );
        assert_eq!(session.cursor(), None);
        assert_eq!(session.puzzle().blank(), before.blank());
        assert_eq!(session.puzzle().moves(), before.moves());
    }

    #[test]
    fn resize_relayouts() {
        let now = Instant::now();
        let mut session = memory_session();
        let response = session.handle(
            InputEvent::Resize {
                width: 600.0,
                height: 800.0,
            },
            now,
        );
        assert_eq!(response, Response::Resized);
        assert_eq!(session.layout().grid.width(), 4);
        assert_eq!(session.layout().grid.height(), 6);
    }
}
