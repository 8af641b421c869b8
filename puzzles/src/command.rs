//! Parsing of the interactive commands.
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use tilepuzzles::board::Direction;

/// A single line of player input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Select a tile by index.
    Pick(usize),
    /// Select a tile by column and row.
    PickAt(usize, usize),
    /// Pointer release at a surface position.
    Click(f64, f64),
    /// Touch at a surface position.
    Tap(f64, f64),
    Arrow(Direction),
    Enter,
    Restart,
    Resize(f64, f64),
    Scores,
    Svg(PathBuf),
    Help,
    Quit,
}

/// Reason an input line was not understood.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CommandError {
    #[error("unknown command {0:?}, type help or ? for commands")]
    Unknown(String),
    #[error("invalid number {0:?}")]
    BadNumber(String),
    #[error("surface size must be positive, got {0}x{1}")]
    BadSize(f64, f64),
}

/// `pick 3`, `pick 2,1`, or a bare `3`.
static PICK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)(?:(?:pick|flip|slide|select)\s+)?
        (?P<a>[0-9]+)(?:\s*,\s*(?P<b>[0-9]+))?$",
    )
    .unwrap()
});
/// `click 120,340` or `tap 120 340`.
static POINT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)(?P<verb>click|tap|touch)\s+
        (?P<x>[0-9]+(?:\.[0-9]+)?)(?:\s*,\s*|\s+)(?P<y>[0-9]+(?:\.[0-9]+)?)$",
    )
    .unwrap()
});
/// `resize 800x600`.
static RESIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?xi)resize\s+
        (?P<w>[0-9]+(?:\.[0-9]+)?)\s*[x,\s]\s*(?P<h>[0-9]+(?:\.[0-9]+)?)$",
    )
    .unwrap()
});
/// `svg frame.svg`; the path keeps its case.
static SVG: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?i)(?:svg|export)\s+(?P<path>.+)$").unwrap());

fn number<T: std::str::FromStr>(text: &str) -> Result<T, CommandError> {
    text.parse()
        .map_err(|_| CommandError::BadNumber(text.to_owned()))
}

/// Parse one trimmed input line.
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let lower = line.to_ascii_lowercase();
    let simple = match lower.as_str() {
        "?" | "help" | "h" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        "restart" | "new" => Some(Command::Restart),
        "scores" | "best" | "score" => Some(Command::Scores),
        "enter" | "space" | "" => Some(Command::Enter),
        "up" | "u" | "north" => Some(Command::Arrow(Direction::Up)),
        "down" | "d" | "south" => Some(Command::Arrow(Direction::Down)),
        "left" | "l" | "west" => Some(Command::Arrow(Direction::Left)),
        "right" | "r" | "east" => Some(Command::Arrow(Direction::Right)),
        _ => None,
    };
    if let Some(cmd) = simple {
        return Ok(cmd);
    }

    if let Some(captures) = PICK.captures(line) {
        let a = number(&captures["a"])?;
        return Ok(match captures.name("b") {
            Some(b) => Command::PickAt(a, number(b.as_str())?),
            None => Command::Pick(a),
        });
    }
    if let Some(captures) = POINT.captures(line) {
        let x = number(&captures["x"])?;
        let y = number(&captures["y"])?;
        return Ok(match captures["verb"].to_ascii_lowercase().as_str() {
            "click" => Command::Click(x, y),
            _ => Command::Tap(x, y),
        });
    }
    if let Some(captures) = RESIZE.captures(line) {
        let w: f64 = number(&captures["w"])?;
        let h: f64 = number(&captures["h"])?;
        if w <= 0.0 || h <= 0.0 {
            return Err(CommandError::BadSize(w, h));
        }
        return Ok(Command::Resize(w, h));
    }
    if let Some(captures) = SVG.captures(line) {
        return Ok(Command::Svg(PathBuf::from(captures["path"].trim())));
    }
    Err(CommandError::Unknown(line.to_owned()))
}
