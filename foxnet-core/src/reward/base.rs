use crate::Frame;
use serde::{Deserialize, Serialize};

/// Result of reading the score digits on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReading {
    /// The digits were recognized.
    Digits(u32),

    /// A digit cell shows a glyph that is known to be ambiguous.
    Uncertain,

    /// The score area does not show digits, e.g. on menus and loading screens.
    NotADigit,
}

/// Reads the score on a full-resolution frame.
pub trait ScoreReader {
    /// Reads the score.
    fn read_score(&mut self, full: &Frame) -> ScoreReading;
}

/// Reads the health on a full-resolution frame.
pub trait HealthReader {
    /// Returns the health, a non-negative value where `0` means dead or no health bar.
    fn read_health(&mut self, full: &Frame) -> f32;
}

impl<T: ScoreReader + ?Sized> ScoreReader for Box<T> {
    fn read_score(&mut self, full: &Frame) -> ScoreReading {
        (**self).read_score(full)
    }
}

impl<T: HealthReader + ?Sized> HealthReader for Box<T> {
    fn read_health(&mut self, full: &Frame) -> f32 {
        (**self).read_health(full)
    }
}
