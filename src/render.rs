// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;

use image::RgbImage;
use log::{debug, trace};
use num::complex::{c64, Complex64};
use rayon::prelude::*;

use crate::colorschemes::colorize;
use crate::config::{ConfigError, RenderConfig};
use crate::julia::julia_orbit_escape;

/// Half-width of the view on the real axis at zoom 1.
pub const VIEW_HALF_WIDTH: f64 = 2.0;

// {{{ Error

#[derive(Clone, Debug, PartialEq)]
pub enum RenderError {
    /// The configuration did not pass validation.
    Config(ConfigError),
    /// The output grid could not be allocated.
    Resource { width: u32, height: u32 },
}

impl fmt::Display for RenderError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Config(err) => write!(fmt, "invalid configuration: {}", err),
            RenderError::Resource { width, height } => write!(
                fmt,
                "cannot allocate a {}x{} image (too large for available memory)",
                width, height
            ),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Config(err) => Some(err),
            RenderError::Resource { .. } => None,
        }
    }
}

impl From<ConfigError> for RenderError {
    fn from(err: ConfigError) -> Self {
        RenderError::Config(err)
    }
}

// }}}

// {{{ pixel_to_point

/// Translate pixel coordinates to physical point coordinates.
///
/// The column is mapped to $[-1, 1)$ and the row to $(-H/W, H/W]$, both
/// relative to the center of the grid, so the pixel aspect ratio stays 1.
/// The result is then scaled by `VIEW_HALF_WIDTH / zoom` and shifted by the
/// offset of *config*.
///
/// Row 0 is the top of the image, so it maps to the largest imaginary part.
pub fn pixel_to_point(config: &RenderConfig, pixel: (usize, usize)) -> Complex64 {
    let (width, height) = (config.width as f64, config.height as f64);
    let scale = VIEW_HALF_WIDTH / config.zoom;

    let x = (2.0 * (pixel.0 as f64) - width) / width;
    // pixel.1 increases as we go down, but the imaginary part increases as we go up
    let y = (height - 2.0 * (pixel.1 as f64)) / width;

    config.offset + c64(x, y) * scale
}

// }}}

// {{{ render

/// Render a single row of the grid into *band*, which holds 3 bytes per pixel.
///
/// Every pixel only depends on its own coordinates and *config*, so rows can
/// be rendered in any order or concurrently.
fn render_row(band: &mut [u8], config: &RenderConfig, row: usize) {
    debug_assert!(band.len() == 3 * config.width as usize);

    for (column, pixel) in band.chunks_exact_mut(3).enumerate() {
        let point = pixel_to_point(config, (column, row));
        let result = julia_orbit_escape(point, config.c, config.maxit, config.escape_radius);
        let color = colorize(result, config);

        pixel.copy_from_slice(&color.0);
    }
}

fn allocate_pixels(width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let resource = RenderError::Resource { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| resource.clone())?;

    let mut pixels: Vec<u8> = Vec::new();
    pixels.try_reserve_exact(len).map_err(|_| resource)?;
    pixels.resize(len, 0);

    Ok(pixels)
}

/// Render the Julia set described by *config* into an RGB image.
///
/// The grid is split into horizontal bands of one row each that are rendered
/// in parallel. The result does not depend on the order in which the bands
/// are processed.
pub fn render(config: &RenderConfig) -> Result<RgbImage, RenderError> {
    let config = config.validate()?;
    let (width, height) = (config.width, config.height);

    debug!(
        "Rendering {}x{} grid for c = {} (maxit {} radius {})",
        width, height, config.c, config.maxit, config.escape_radius
    );
    let mut pixels = allocate_pixels(width, height)?;

    pixels
        .par_chunks_mut(3 * width as usize)
        .enumerate()
        .for_each(|(row, band)| {
            trace!("Rendering row {}", row);
            render_row(band, &config, row);
        });

    RgbImage::from_raw(width, height, pixels).ok_or(RenderError::Resource { width, height })
}

// }}}

// {{{ tests


// }}}
