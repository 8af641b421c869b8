//! Move and time scores, the stopwatch that feeds them, and best-score tracking.
use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

use thiserror::Error;

/// Result of a game: how many moves it took and how many whole seconds passed between
/// the first move and the last.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Score {
    pub moves: u32,
    pub time: u64,
}

impl Score {
    pub fn new(moves: u32, time: u64) -> Self {
        Self { moves, time }
    }
}

impl fmt::Display for Score {
    /// Formats as `moves|time`, which is also the stored form.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}|{}", self.moves, self.time)
    }
}

/// Error parsing a stored `moves|time` value.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid score {0:?}, expected moves|time")]
pub struct ParseScoreError(String);

impl FromStr for Score {
    type Err = ParseScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseScoreError(s.to_owned());
        let (moves, time) = s.trim().split_once('|').ok_or_else(err)?;
        Ok(Score {
            moves: moves.trim().parse().map_err(|_| err())?,
            time: time.trim().parse().map_err(|_| err())?,
        })
    }
}

/// Display helper for a score that may not exist. Absent scores show as `-`.
#[derive(Debug, Copy, Clone)]
pub struct ScoreText(pub Option<Score>);

impl fmt::Display for ScoreText {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(score) => f.pad(&score.to_string()),
            None => f.pad("-"),
        }
    }
}

/// Counts whole seconds of play. Starts on the first completed move and freezes when the
/// puzzle is solved.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stopwatch {
    /// No move has been made yet.
    Idle,
    /// Running since the given instant.
    Running(Instant),
    /// Stopped with a fixed elapsed time.
    Stopped(Duration),
}

impl Stopwatch {
    /// Start counting from `now`. Does nothing if already started or stopped.
    pub fn start(&mut self, now: Instant) {
        if let Stopwatch::Idle = self {
            *self = Stopwatch::Running(now);
        }
    }

    /// Freeze the elapsed time at `now`. Does nothing unless running.
    pub fn stop(&mut self, now: Instant) {
        if let Stopwatch::Running(since) = *self {
            *self = Stopwatch::Stopped(now.saturating_duration_since(since));
        }
    }

    /// Whether the stopwatch is currently counting.
    pub fn running(&self) -> bool {
        matches!(self, Stopwatch::Running(_))
    }

    /// Elapsed whole seconds as of `now`.
    pub fn seconds(&self, now: Instant) -> u64 {
        match *self {
            Stopwatch::Idle => 0,
            Stopwatch::Running(since) => now.saturating_duration_since(since).as_secs(),
            Stopwatch::Stopped(elapsed) => elapsed.as_secs(),
        }
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Stopwatch::Idle
    }
}

/// Which best-score records a finished game improved.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Improved {
    pub moves: bool,
    pub time: bool,
}

impl Improved {
    /// True if either record changed.
    pub fn any(self) -> bool {
        self.moves || self.time
    }
}

/// Best results for one puzzle variant. Each record keeps the full score of the game
/// that set it.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct BestScores {
    /// Game with the fewest moves.
    pub by_moves: Option<Score>,
    /// Game with the shortest time.
    pub by_time: Option<Score>,
}

impl BestScores {
    /// Fold a finished game into the records. Ties keep the existing record.
    pub fn record(&mut self, score: Score) -> Improved {
        let mut improved = Improved::default();
        if self.by_moves.map_or(true, |best| score.moves < best.moves) {
            self.by_moves = Some(score);
            improved.moves = true;
        }
        if self.by_time.map_or(true, |best| score.time < best.time) {
            self.by_time = Some(score);
            improved.time = true;
        }
        improved
    }
}
