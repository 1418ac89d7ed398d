// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::fmt;

use num::complex::{c64, Complex64};

use crate::colorschemes::{ColoringMode, Palette};

pub const DEFAULT_MAXIT: usize = 100;
pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;
pub const DEFAULT_ZOOM: f64 = 1.0;

// {{{ Error

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The string could not be read as a complex number `x+yJ`.
    InvalidComplex(String),
    /// A field that must be a finite number was infinite or NaN.
    NonFiniteValue(&'static str),
    /// Width or height of the output grid is zero.
    ZeroDimension,
    /// Maximum number of iterations is zero.
    ZeroIterations,
    /// The escape radius is not strictly positive.
    NonPositiveRadius,
    /// The squared escape radius overflows.
    RadiusTooLarge,
    /// The zoom factor is not strictly positive.
    NonPositiveZoom,
    /// The blur standard deviation is not zero or a positive normal number.
    InvalidBlur,
    /// Neither a constant nor an exhibit was given.
    MissingConstant,
    /// No exhibit with the given name exists.
    UnknownExhibit(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidComplex(s) => write!(
                fmt,
                "invalid complex number '{}' (expected the form x+yJ, e.g. 0.25-.5J)",
                s
            ),
            ConfigError::NonFiniteValue(name) => write!(fmt, "{} must be a finite number", name),
            ConfigError::ZeroDimension => fmt.write_str("image width and height must be positive"),
            ConfigError::ZeroIterations => fmt.write_str("maximum iterations must be positive"),
            ConfigError::NonPositiveRadius => fmt.write_str("escape radius must be positive"),
            ConfigError::RadiusTooLarge => {
                fmt.write_str("escape radius is too large (its square overflows)")
            }
            ConfigError::NonPositiveZoom => fmt.write_str("zoom factor must be positive"),
            ConfigError::InvalidBlur => {
                fmt.write_str("blur sigma must be 0 or a positive finite number")
            }
            ConfigError::MissingConstant => {
                fmt.write_str("no constant given (pass C or --exhibit NAME)")
            }
            ConfigError::UnknownExhibit(name) => write!(fmt, "unknown exhibit '{}'", name),
        }
    }
}

impl std::error::Error for ConfigError {}

// }}}

// {{{ complex literals

fn parse_real(s: &str, literal: &str) -> Result<f64, ConfigError> {
    match s {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => s
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidComplex(literal.to_string())),
    }
}

/// Parse a complex number literal of the form `x+yJ`.
///
/// Accepted forms are `x+yJ`, `x-yJ`, `yJ` and `x`, where the imaginary unit
/// can also be written as a lowercase `j` and the whole literal may be wrapped
/// in parentheses. Surrounding whitespace is ignored, so `' -1+1J'` works.
pub fn parse_complex(literal: &str) -> Result<Complex64, ConfigError> {
    let invalid = || ConfigError::InvalidComplex(literal.to_string());

    let mut s = literal.trim();
    if let Some(inner) = s.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        s = inner.trim();
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let z = match s.strip_suffix(&['j', 'J'][..]) {
        Some(body) => {
            // split at the last sign that is not the leading one or an exponent
            let bytes = body.as_bytes();
            let split = (1..bytes.len())
                .rev()
                .find(|&i| {
                    (bytes[i] == b'+' || bytes[i] == b'-')
                        && !matches!(bytes[i - 1], b'e' | b'E')
                });

            match split {
                Some(i) => {
                    let re = &body[..i];
                    if re.is_empty() || re == "+" || re == "-" {
                        return Err(invalid());
                    }
                    c64(parse_real(re, literal)?, parse_real(&body[i..], literal)?)
                }
                None => c64(0.0, parse_real(body, literal)?),
            }
        }
        None => c64(s.parse::<f64>().map_err(|_| invalid())?, 0.0),
    };

    if z.re.is_finite() && z.im.is_finite() {
        Ok(z)
    } else {
        Err(invalid())
    }
}

// }}}

// {{{ RenderConfig

/// Immutable description of a single render.
///
/// Built with [`RenderConfig::new`] and the `with_*` methods, then checked
/// once with [`RenderConfig::validate`]. Nothing mutates it during rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Constant in the iteration $z^2 + c$.
    pub c: Complex64,
    /// Width of the output grid in pixels.
    pub width: u32,
    /// Height of the output grid in pixels.
    pub height: u32,
    /// Maximum number of iterations before the point is considered bounded.
    pub maxit: usize,
    /// Escape radius (not squared).
    pub escape_radius: f64,
    /// Point of the plane at the centre of the grid.
    pub offset: Complex64,
    /// Magnification of the view around *offset*.
    pub zoom: f64,
    pub coloring: ColoringMode,
    pub invert: bool,
    pub palette: Palette,
}

impl RenderConfig {
    pub fn new(c: Complex64, width: u32, height: u32) -> Self {
        Self {
            c,
            width,
            height,
            maxit: DEFAULT_MAXIT,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            offset: c64(0.0, 0.0),
            zoom: DEFAULT_ZOOM,
            coloring: ColoringMode::Discrete,
            invert: false,
            palette: Palette::Grayscale,
        }
    }

    pub fn with_maxit(mut self, maxit: usize) -> Self {
        self.maxit = maxit;
        self
    }

    pub fn with_escape_radius(mut self, escape_radius: f64) -> Self {
        self.escape_radius = escape_radius;
        self
    }

    pub fn with_offset(mut self, offset: Complex64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn with_coloring(mut self, coloring: ColoringMode) -> Self {
        self.coloring = coloring;
        self
    }

    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Check all invariants and return the configuration unchanged on success.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(self.c.re.is_finite() && self.c.im.is_finite()) {
            return Err(ConfigError::NonFiniteValue("c"));
        }
        if !(self.offset.re.is_finite() && self.offset.im.is_finite()) {
            return Err(ConfigError::NonFiniteValue("offset"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension);
        }
        if self.maxit == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if !self.escape_radius.is_finite() {
            return Err(ConfigError::NonFiniteValue("escape radius"));
        }
        if self.escape_radius <= 0.0 {
            return Err(ConfigError::NonPositiveRadius);
        }
        if !(self.escape_radius * self.escape_radius).is_finite() {
            return Err(ConfigError::RadiusTooLarge);
        }
        if !self.zoom.is_finite() {
            return Err(ConfigError::NonFiniteValue("zoom"));
        }
        if self.zoom <= 0.0 {
            return Err(ConfigError::NonPositiveZoom);
        }
        if let Palette::Hue { offset } = self.palette {
            if !offset.is_finite() {
                return Err(ConfigError::NonFiniteValue("hue offset"));
            }
        }

        Ok(self)
    }
}

// }}}

// {{{ tests


// }}}
