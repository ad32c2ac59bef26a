use super::{check_shape, load_frame};
use anyhow::Result;
use foxnet_core::{reward::HealthReader, Frame};
use ndarray::{s, Axis, Zip};
use std::path::Path;

const TOP: usize = 42;
const BOTTOM: usize = 53;
const LEFT: usize = 56;
const RIGHT: usize = 149;

/// Pixels closer than this to the full health bar count as health.
const DISTANCE_THRESHOLD: f32 = 25.0;

/// Health ratios up to this value are background noise on screens without a health bar.
const MIN_RATIO: f32 = 0.05;

/// Reads the health bar by comparing it with the bar at full health.
///
/// The health is the fraction of pixels of the bar whose color is within an
/// Euclidean RGB distance of 25 from the full bar, rounded to three decimals.
///
/// The reference is an RGB image while frames from the emulator are BGR, so
/// the channels of the frame are reversed before comparing.
pub struct HealthBarReader {
    reference: Frame,
}

impl HealthBarReader {
    /// Height and width of the health bar.
    pub const SHAPE: [usize; 2] = [BOTTOM - TOP, RIGHT - LEFT];

    /// Constructs the reader with an RGB image of the bar at full health.
    pub fn new(reference: Frame) -> Result<Self> {
        check_shape("health bar reference", &reference, Self::SHAPE)?;
        Ok(Self { reference })
    }

    /// Loads the image of the bar at full health.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(load_frame(path)?)
    }

    /// Returns the health ratio in `[0, 1]` of a BGR frame.
    pub fn health_ratio(&self, full: &Frame) -> f32 {
        let (h, w, _) = full.dim();
        if h < BOTTOM || w < RIGHT {
            return 0.0;
        }

        let bar = full.slice(s![TOP..BOTTOM, LEFT..RIGHT, ..]);
        let n_close = Zip::from(bar.lanes(Axis(2)))
            .and(self.reference.lanes(Axis(2)))
            .fold(0usize, |n, p, q| {
                let d = p
                    .iter()
                    .rev()
                    .zip(q.iter())
                    .map(|(&a, &b)| (a as f32 - b as f32).powi(2))
                    .sum::<f32>()
                    .sqrt();
                n + (d <= DISTANCE_THRESHOLD) as usize
            });

        let n_pixels = Self::SHAPE[0] * Self::SHAPE[1];
        let ratio = (1000.0 * n_close as f32 / n_pixels as f32).round() / 1000.0;
        if ratio <= MIN_RATIO {
            0.0
        } else {
            ratio
        }
    }
}

impl HealthReader for HealthBarReader {
    fn read_health(&mut self, full: &Frame) -> f32 {
        self.health_ratio(full)
    }
}
