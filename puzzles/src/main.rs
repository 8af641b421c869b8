use std::{
    fmt, fs,
    io::{self, BufRead, Write},
    path::Path,
    time::Instant,
};

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use tracing::info;

use tilepuzzles::{
    board::Coordinate,
    game::{
        memory::{self, Hue, Shape},
        sliding, Symbol,
    },
    render::{best_line, current_line, SvgSurface},
    storage::FileStore,
    InputEvent, Key, Puzzle, Response, Session, TileFace, Variant,
};

use crate::{
    command::{parse, Command},
    config::Config,
};

mod command;
mod config;

fn main() -> Result<()> {
    let matches = config::app().get_matches();
    let config = Config::from_matches(&matches)?;
    init_tracing(config.verbose);

    let store = FileStore::open(&config.data_dir).with_context(|| {
        format!(
            "could not open the score store in {}",
            config.data_dir.display()
        )
    })?;
    info!(path = %store.path().display(), "opened score store");
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info!(variant = config.variant.name(), seed = ?config.seed, "starting");

    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let (width, height) = config.surface;
    match config.variant {
        Variant::Memory => {
            let session = Session::new(
                move || memory::Game::shuffled(&mut rng),
                store,
                width,
                height,
            );
            play(session, &mut input)
        }
        Variant::Sliding => {
            let (cols, rows) = config.size;
            let session = Session::new(
                move || match sliding::Game::shuffled(cols, rows, &mut rng) {
                    Ok(game) => game,
                    Err(_) => unreachable!("board size is checked when reading arguments"),
                },
                store,
                width,
                height,
            );
            play(session, &mut input)
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

/// Run the command loop until `quit` or end of input.
fn play<P: Puzzle>(
    mut session: Session<P, FileStore>,
    input: &mut InputReader<impl BufRead>,
) -> Result<()> {
    let title = match session.puzzle().variant() {
        Variant::Memory => "Memory: find all 12 pairs.",
        Variant::Sliding => "Sliding puzzle: put the tiles in order.",
    };
    println!("{} Type help or ? for commands.", title);
    show_session(&session, Instant::now());

    while let Some(cmd) = input.read_input("> ", |line| match parse(line) {
        Ok(cmd) => Some(cmd),
        Err(err) => {
            println!("{}", err);
            None
        }
    })? {
        let now = Instant::now();
        let response = match cmd {
            Command::Quit => break,
            Command::Help => {
                show_help();
                continue;
            }
            Command::Scores => {
                println!("{}", best_line(session.best()));
                continue;
            }
            Command::Svg(path) => {
                match export_svg(&session, &path, now) {
                    Ok(()) => println!("Wrote {}", path.display()),
                    Err(err) => println!("{:#}", err),
                }
                continue;
            }
            Command::Pick(index) if index < session.puzzle().tile_count() => {
                session.select(index, now)
            }
            Command::Pick(index) => {
                println!("There is no tile {}.", index);
                continue;
            }
            Command::PickAt(x, y) => {
                let target = session.layout().grid.try_linearize(&Coordinate::new(x, y));
                match target {
                    Some(index) => session.select(index, now),
                    None => {
                        println!("There is no tile at {},{}.", x, y);
                        continue;
                    }
                }
            }
            Command::Click(x, y) => {
                session.handle(InputEvent::PointerMove { x, y }, now);
                session.handle(InputEvent::PointerUp, now)
            }
            Command::Tap(x, y) => session.handle(InputEvent::Touch { x, y }, now),
            Command::Arrow(dir) => session.handle(InputEvent::Key(Key::Arrow(dir)), now),
            Command::Enter => session.handle(InputEvent::Key(Key::Activate), now),
            Command::Restart => session.handle(InputEvent::Key(Key::Restart), now),
            Command::Resize(width, height) => {
                session.handle(InputEvent::Resize { width, height }, now)
            }
        };
        report(response, &session);
        if response.needs_redraw() {
            show_session(&session, now);
        }
    }
    Ok(())
}

fn report<P: Puzzle>(response: Response, session: &Session<P, FileStore>) {
    match response {
        Response::Ignored => println!("Nothing happened."),
        Response::Restarted => println!("New game."),
        Response::Resized => {
            let layout = session.layout();
            println!(
                "Surface is {}x{}, showing {} columns and {} rows.",
                layout.width,
                layout.height,
                layout.grid.width(),
                layout.grid.height()
            );
        }
        Response::Finished { score, improved } => {
            println!(
                "Solved in {} moves and {} seconds!",
                score.moves, score.time
            );
            if improved.moves {
                println!("New best for fewest moves!");
            }
            if improved.time {
                println!("New best for fastest time!");
            }
            println!("Type restart to play again.");
        }
        Response::CursorMoved | Response::Progressed(_) => {}
    }
}

fn show_help() {
    println!(
        "Available Commands:
    <n>, pick <n>           act on tile number n, counted row by row from 0.
    pick <x>,<y>            act on the tile in column x and row y.
    click <px>,<py>         press and release the pointer at a surface position.
    tap <px>,<py>           touch the surface at a position.
    up, down, left, right   (also u, d, l, r) slide a tile into the gap, or move
                            the tile cursor in the memory game.
    enter                   flip the tile under the cursor (memory game only).
    restart                 deal a new game. Best scores are kept.
    resize <w>x<h>          change the size of the drawing surface.
    scores                  show the best scores.
    svg <path>              save the current frame as an SVG image.
    quit                    leave the game."
    );
}

/// Draw the current frame to an SVG file at `path`.
fn export_svg<P: Puzzle>(session: &Session<P, FileStore>, path: &Path, now: Instant) -> Result<()> {
    let layout = session.layout();
    let mut svg = SvgSurface::new(layout.width, layout.height);
    session.render(&mut svg, now);
    fs::write(path, svg.finish()).with_context(|| format!("could not write {}", path.display()))
}

/// Print the board followed by the score line.
fn show_session<P: Puzzle>(session: &Session<P, FileStore>, now: Instant) {
    /// Text for one tile slot.
    enum Cell {
        Hidden,
        FaceUp(SymbolAbbreviation),
        Solved(SymbolAbbreviation),
        Number(u32),
        Blank,
    }
    impl fmt::Display for Cell {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            match self {
                Cell::Hidden => f.pad("~~"),
                Cell::FaceUp(symbol) => fmt::Display::fmt(symbol, f),
                Cell::Solved(symbol) => f.pad(&format!("[{}]", symbol)),
                Cell::Number(n) => f.pad(&n.to_string()),
                Cell::Blank => f.pad(""),
            }
        }
    }

    let puzzle = session.puzzle();
    let grid = session.layout().grid;
    show_board(
        grid.width(),
        grid.iter_coordinates().map(move |row| {
            row.map(move |coord| match puzzle.tile_face(grid.linearize(&coord)) {
                TileFace::Hidden => Cell::Hidden,
                TileFace::Symbol { symbol, solved: false } => {
                    Cell::FaceUp(SymbolAbbreviation(symbol))
                }
                TileFace::Symbol { symbol, solved: true } => {
                    Cell::Solved(SymbolAbbreviation(symbol))
                }
                TileFace::Number(n) => Cell::Number(n),
                TileFace::Blank => Cell::Blank,
            })
        }),
    );
    if let Some(index) = session.cursor() {
        let at = grid.un_linearize(index);
        println!("Cursor on tile {} ({},{})", index, at.x, at.y);
    }
    println!("{} {}", current_line(session.score(now)), best_line(session.best()));
}

/// Show the board by printing the grid. Takes an iterator over the rows of iterators over
/// the items
fn show_board(width: usize, rows: impl Iterator<Item = impl Iterator<Item = impl fmt::Display>>) {
    print!("   ");
    for i in 0..width {
        print!("{:^6}", i);
    }
    println!();
    for (i, row) in rows.enumerate() {
        print!("{:>2} ", i);
        for cell in row {
            print!("{:^6}", cell);
        }
        println!();
    }
}

/// Display helper that prints a memory symbol as a shape mark and a color letter, e.g.
/// `*R` for a red star.
struct SymbolAbbreviation(Symbol);

impl SymbolAbbreviation {
    fn shape(&self) -> char {
        match self.0.shape() {
            Shape::Star => '*',
            Shape::Triangle => '^',
            Shape::Circle => '@',
            Shape::Square => '#',
        }
    }

    fn hue(&self) -> char {
        match self.0.hue() {
            Hue::Orange => 'O',
            Hue::Blue => 'B',
            Hue::Red => 'R',
        }
    }
}

impl fmt::Display for SymbolAbbreviation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&format!("{}{}", self.shape(), self.hue()))
    }
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`. Returns
    /// `None` at end of input.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<Option<T>>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            if !self.read_input_inner(prompt)? {
                return Ok(None);
            }
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(Some(val));
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line. Returns false
    /// at end of input.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<bool> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(true)
    }
}
