//! Score and health readers for the game screen.
//!
//! Both readers work on the frame as received from the emulator and compare
//! fixed screen regions with reference images.
mod digits;
mod health;
pub use digits::{DigitTemplateReader, Glyph};
pub use health::HealthBarReader;
use crate::error::EmulatorEnvError;
use anyhow::{Context, Result};
use foxnet_core::Frame;
use ndarray::Array3;
use std::path::Path;

/// Loads an image file as an RGB frame.
pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame> {
    let path = path.as_ref();
    let img = image::open(path)
        .with_context(|| format!("Failed to open {:?}", path))?
        .to_rgb8();
    let (w, h) = img.dimensions();
    Ok(Array3::from_shape_vec(
        (h as usize, w as usize, 3),
        img.into_raw(),
    )?)
}

/// Checks the height and width of an image.
fn check_shape(name: &str, frame: &Frame, expected: [usize; 2]) -> Result<()> {
    let given = [frame.shape()[0], frame.shape()[1]];
    if given != expected {
        Err(EmulatorEnvError::ImageShape {
            name: name.to_string(),
            expected,
            given,
        })?;
    }
    Ok(())
}
