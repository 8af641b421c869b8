//! Command line arguments.
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;

use tilepuzzles::{game::sliding, Variant};

/// Settings for one run of the program.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub variant: Variant,
    /// Sliding board size in tiles.
    pub size: (usize, usize),
    /// Virtual drawing surface used for pointer input and SVG export.
    pub surface: (f64, f64),
    pub seed: Option<u64>,
    pub data_dir: PathBuf,
    pub verbose: bool,
}

/// `WxH` text of the classic sliding board.
static DEFAULT_SIZE: Lazy<String> =
    Lazy::new(|| format!("{}x{}", sliding::CLASSIC.0, sliding::CLASSIC.1));

pub fn app() -> App<'static, 'static> {
    App::new("Puzzles")
        .version("0.1")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Memory tile matching and the sliding 15-puzzle, played from the terminal.")
        .arg(
            Arg::with_name("game")
                .short("g")
                .long("game")
                .value_name("GAME")
                .help("which puzzle to play")
                .takes_value(true)
                .possible_values(&["memory", "sliding", "15"])
                .case_insensitive(true)
                .default_value("memory"),
        )
        .arg(
            Arg::with_name("size")
                .long("size")
                .value_name("WxH")
                .help("board size for the sliding puzzle")
                .takes_value(true)
                .default_value(&DEFAULT_SIZE),
        )
        .arg(
            Arg::with_name("surface")
                .long("surface")
                .value_name("WxH")
                .help("size of the virtual drawing surface used by click, tap and svg")
                .takes_value(true)
                .default_value("800x600"),
        )
        .arg(
            Arg::with_name("seed")
                .long("seed")
                .value_name("SEED")
                .help("seed the shuffles for a repeatable game")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("data_dir")
                .long("data-dir")
                .value_name("DIR")
                .help("directory holding the best scores")
                .takes_value(true)
                .env("PUZZLES_DATA_DIR")
                .default_value(".puzzles"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("log every move to stderr"),
        )
}

/// Parse `WxH`, e.g. `4x4` or `800x600`.
fn dimensions<T: std::str::FromStr>(text: &str) -> Option<(T, T)> {
    let (w, h) = text.trim().split_once(|c: char| c == 'x' || c == 'X')?;
    Some((w.trim().parse().ok()?, h.trim().parse().ok()?))
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let variant = match matches.value_of("game").map(str::to_ascii_lowercase).as_deref() {
            Some("sliding") | Some("15") => Variant::Sliding,
            _ => Variant::Memory,
        };

        let size: (usize, usize) = match matches.value_of("size") {
            Some(text) => dimensions(text)
                .ok_or_else(|| anyhow!("invalid board size {:?}, expected WxH", text))?,
            None => sliding::CLASSIC,
        };
        if variant == Variant::Sliding {
            sliding::Game::check_size(size.0, size.1)
                .with_context(|| format!("cannot play on a {}x{} board", size.0, size.1))?;
        }

        let surface_text = matches.value_of("surface").unwrap_or("800x600");
        let surface: (f64, f64) = dimensions(surface_text)
            .ok_or_else(|| anyhow!("invalid surface size {:?}, expected WxH", surface_text))?;
        if !(surface.0 > 0.0 && surface.1 > 0.0) {
            bail!("surface size must be positive, got {}", surface_text);
        }

        let seed = matches
            .value_of("seed")
            .map(|s| s.parse().with_context(|| format!("invalid seed {:?}", s)))
            .transpose()?;

        Ok(Self {
            variant,
            size,
            surface,
            seed,
            data_dir: PathBuf::from(matches.value_of("data_dir").unwrap_or(".puzzles")),
            verbose: matches.is_present("verbose"),
        })
    }
}
