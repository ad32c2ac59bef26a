use super::{check_shape, load_frame};
use crate::error::EmulatorEnvError;
use anyhow::Result;
use foxnet_core::{
    reward::{ScoreReader, ScoreReading},
    Frame,
};
use log::{info, warn};
use ndarray::s;
use std::{fs, path::Path};

const TOP: usize = 65;
const LEFT: usize = 47;
const CELL_HEIGHT: usize = 31;
const CELL_WIDTH: usize = 26;
const N_CELLS: usize = 3;

/// Blue in the BGR frames from the emulator.
const FRAME_CHANNEL: usize = 0;

/// Blue in the RGB template images.
const TEMPLATE_CHANNEL: usize = 2;

/// What a digit cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// A digit.
    Digit(u8),

    /// A glyph that cannot be told apart from a digit reliably.
    Uncertain,
}

impl Glyph {
    /// Parses the stem of a template file: a leading digit, or `u` for the
    /// uncertain glyph.
    pub fn from_stem(stem: &str) -> Option<Self> {
        match stem.chars().next()? {
            'u' => Some(Self::Uncertain),
            c => c.to_digit(10).map(|d| Self::Digit(d as u8)),
        }
    }
}

/// Pearson correlation coefficient, `NaN` if either input is constant.
fn pearson(x: &[f32], y: &[f32]) -> f32 {
    let n = x.len() as f32;
    let mx = x.iter().sum::<f32>() / n;
    let my = y.iter().sum::<f32>() / n;
    let (mut sxy, mut sxx, mut syy) = (0f32, 0f32, 0f32);
    for (&a, &b) in x.iter().zip(y.iter()) {
        let (da, db) = (a - mx, b - my);
        sxy += da * db;
        sxx += da * da;
        syy += db * db;
    }
    sxy / (sxx * syy).sqrt()
}

/// Reads the three score digits by template matching.
///
/// The cells of the hundreds, tens and ones digits are compared with every
/// template on the blue channel. A cell is classified as the template
/// with the largest Pearson correlation, if the correlation is at least `0.9`.
///
/// The hundreds digit is unreliable on screen, so the score is taken modulo 100.
pub struct DigitTemplateReader {
    templates: Vec<(Glyph, Vec<f32>)>,
    min_correlation: f32,
}

impl DigitTemplateReader {
    /// Height and width of a digit cell.
    pub const CELL_SHAPE: [usize; 2] = [CELL_HEIGHT, CELL_WIDTH];

    /// Constructs the reader from labeled RGB template images of the cell size.
    pub fn new(templates: Vec<(Glyph, Frame)>) -> Result<Self> {
        let templates = templates
            .into_iter()
            .enumerate()
            .map(|(i, (glyph, frame))| {
                check_shape(&format!("template {}", i), &frame, Self::CELL_SHAPE)?;
                let values = frame
                    .slice(s![.., .., TEMPLATE_CHANNEL])
                    .iter()
                    .map(|&v| v as f32)
                    .collect::<Vec<_>>();
                Ok((glyph, values))
            })
            .collect::<Result<Vec<_>>>()?;

        if templates.is_empty() {
            Err(EmulatorEnvError::NoTemplates("the given list".to_string()))?;
        }

        Ok(Self {
            templates,
            min_correlation: 0.9,
        })
    }

    /// Loads the templates in a directory.
    ///
    /// The glyph of a template is given by its file name, see [`Glyph::from_stem`].
    /// Files with other names are skipped.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        paths.sort();

        let mut templates = vec![];
        for path in paths.into_iter().filter(|p| p.is_file()) {
            let glyph = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(Glyph::from_stem);
            match glyph {
                Some(glyph) => templates.push((glyph, load_frame(&path)?)),
                None => warn!("Skipped {:?}, not a digit template", path),
            }
        }

        if templates.is_empty() {
            Err(EmulatorEnvError::NoTemplates(format!("{:?}", dir)))?;
        }
        info!("Loaded {} digit templates from {:?}", templates.len(), dir);
        Self::new(templates)
    }

    /// Classifies a cell given as channel values in row-major order.
    pub fn classify(&self, cell: &[f32]) -> Option<Glyph> {
        let (glyph, r) = self
            .templates
            .iter()
            .map(|(glyph, t)| (*glyph, pearson(cell, t)))
            .filter(|(_, r)| !r.is_nan())
            .fold(None, |best: Option<(Glyph, f32)>, (glyph, r)| match best {
                Some((_, r_best)) if r_best >= r => best,
                _ => Some((glyph, r)),
            })?;

        if r >= self.min_correlation {
            Some(glyph)
        } else {
            None
        }
    }

    fn cell(&self, full: &Frame, k: usize) -> Vec<f32> {
        let left = LEFT + k * CELL_WIDTH;
        full.slice(s![TOP..TOP + CELL_HEIGHT, left..left + CELL_WIDTH, FRAME_CHANNEL])
            .iter()
            .map(|&v| v as f32)
            .collect()
    }

    /// Reads the glyphs of the hundreds, tens and ones digits of a BGR frame.
    pub fn read_glyphs(&self, full: &Frame) -> Option<Vec<Option<Glyph>>> {
        let (h, w, d) = full.dim();
        if h < TOP + CELL_HEIGHT || w < LEFT + N_CELLS * CELL_WIDTH || d <= FRAME_CHANNEL {
            return None;
        }
        Some(
            (0..N_CELLS)
                .map(|k| self.classify(&self.cell(full, k)))
                .collect(),
        )
    }
}

impl ScoreReader for DigitTemplateReader {
    fn read_score(&mut self, full: &Frame) -> ScoreReading {
        let glyphs = match self.read_glyphs(full) {
            Some(glyphs) => glyphs,
            None => return ScoreReading::NotADigit,
        };

        if glyphs.contains(&Some(Glyph::Uncertain)) {
            return ScoreReading::Uncertain;
        }

        let mut value = 0;
        for glyph in glyphs {
            match glyph {
                Some(Glyph::Digit(d)) => value = 10 * value + d as u32,
                _ => return ScoreReading::NotADigit,
            }
        }
        ScoreReading::Digits(value % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn template(glyph: Glyph) -> Frame {
        let mut t = Array3::zeros((CELL_HEIGHT, CELL_WIDTH, 3));
        match glyph {
            Glyph::Digit(d) => {
                let c = 2 * d as usize;
                t.slice_mut(s![.., c..c + 2, ..]).fill(255);
            }
            Glyph::Uncertain => t.slice_mut(s![10..14, .., ..]).fill(255),
        }
        t
    }

    fn reader() -> DigitTemplateReader {
        let mut glyphs = (0..10).map(Glyph::Digit).collect::<Vec<_>>();
        glyphs.push(Glyph::Uncertain);
        DigitTemplateReader::new(glyphs.into_iter().map(|g| (g, template(g))).collect()).unwrap()
    }

    fn screen(cells: [Option<Glyph>; 3]) -> Frame {
        let mut full = Array3::zeros((120, 160, 3));
        for (k, glyph) in cells.iter().enumerate() {
            if let Some(glyph) = glyph {
                let left = LEFT + k * CELL_WIDTH;
                full.slice_mut(s![TOP..TOP + CELL_HEIGHT, left..left + CELL_WIDTH, ..])
                    .assign(&template(*glyph));
            }
        }
        full
    }

    #[test]
    fn test_glyph_from_stem() {
        assert_eq!(Glyph::from_stem("7_b"), Some(Glyph::Digit(7)));
        assert_eq!(Glyph::from_stem("u1"), Some(Glyph::Uncertain));
        assert_eq!(Glyph::from_stem("readme"), None);
        assert_eq!(Glyph::from_stem(""), None);
    }

    #[test]
    fn test_read_score() {
        use Glyph::*;
        let mut reader = reader();
        let score = reader.read_score(&screen([Some(Digit(0)), Some(Digit(4)), Some(Digit(2))]));
        assert_eq!(score, ScoreReading::Digits(42));

        let score = reader.read_score(&screen([Some(Digit(1)), Some(Digit(2)), Some(Digit(3))]));
        assert_eq!(score, ScoreReading::Digits(23));

        let score = reader.read_score(&screen([Some(Digit(0)), Some(Uncertain), Some(Digit(3))]));
        assert_eq!(score, ScoreReading::Uncertain);

        // A blank cell matches nothing
        let score = reader.read_score(&screen([Some(Digit(0)), None, Some(Digit(3))]));
        assert_eq!(score, ScoreReading::NotADigit);

        let score = reader.read_score(&Array3::zeros((10, 10, 3)));
        assert_eq!(score, ScoreReading::NotADigit);
    }

    #[test]
    fn test_pearson() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-6);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-6);
        assert!(pearson(&[1.0, 1.0], &[1.0, 2.0]).is_nan());
    }
}
