// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use std::f64::consts::LN_2;

use colors_transform::{Color, Hsl};
use image::Rgb;

use crate::config::RenderConfig;
use crate::julia::EscapeResult;

/// Color given to points that did not escape.
pub const INTERIOR_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

// {{{ palettes

#[derive(Clone, Copy, Debug)]
struct GradientStop {
    position: f64,
    color: [u8; 3],
}

const FIRE_STOPS: [GradientStop; 4] = [
    GradientStop {
        position: 0.0,
        color: [0, 0, 0],
    },
    GradientStop {
        position: 0.33,
        color: [255, 0, 0],
    },
    GradientStop {
        position: 0.66,
        color: [255, 255, 0],
    },
    GradientStop {
        position: 1.0,
        color: [255, 255, 255],
    },
];

fn get_gradient_color(stops: &[GradientStop], t: f64) -> Rgb<u8> {
    let upper = stops
        .iter()
        .position(|stop| t <= stop.position)
        .unwrap_or(stops.len() - 1)
        .max(1);
    let (a, b) = (&stops[upper - 1], &stops[upper]);

    let s = ((t - a.position) / (b.position - a.position)).clamp(0.0, 1.0);
    let lerp = |i: usize| {
        let (ca, cb) = (a.color[i] as f64, b.color[i] as f64);
        (ca + s * (cb - ca)).round() as u8
    };

    Rgb([lerp(0), lerp(1), lerp(2)])
}

fn get_hsl_color(hue: f64, saturation: f64, lightness: f64) -> Rgb<u8> {
    // NOTE: in HSL, we have that H in [0, 360], S in [0, 100] and L in [0, 100]
    let (r, g, b) = Hsl::from(hue as f32, saturation as f32, lightness as f32)
        .to_rgb()
        .as_tuple();
    Rgb([r.round() as u8, g.round() as u8, b.round() as u8])
}

/// Closed set of palettes mapping a normalized intensity to a color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Palette {
    /// Gray levels from black (0) to white (1).
    Grayscale,
    /// Full saturation hue wheel starting at *offset* (in [0, 1] turns).
    Hue { offset: f64 },
    /// Hue wheel from red back to red at half lightness.
    Rainbow,
    /// Black, red, yellow and white gradient.
    Fire,
}

impl Palette {
    /// Determine the color for a normalized intensity *t*.
    ///
    /// This function takes a value *t* in [0, 1]; values outside are clamped.
    pub fn color(&self, t: f64) -> Rgb<u8> {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Palette::Grayscale => {
                let v = (255.0 * t).round() as u8;
                Rgb([v, v, v])
            }
            Palette::Hue { offset } => {
                // HSV with V = 0.5 and S = 1 is HSL with L = 0.25 and S = 1
                let hue = (t + offset).rem_euclid(1.0);
                get_hsl_color(hue * 360.0, 100.0, 25.0)
            }
            Palette::Rainbow => get_hsl_color((t * 360.0).round(), 100.0, 50.0),
            Palette::Fire => get_gradient_color(&FIRE_STOPS, t),
        }
    }
}

// }}}

// {{{ colorize

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColoringMode {
    /// Color by the integer escape iteration.
    Discrete,
    /// Color by a fractional escape iteration (continuous coloring).
    Smooth,
}

/// Fractional escape iteration for a point that escaped at *iteration* with
/// final squared modulus *modulus_squared*.
///
/// Uses the renormalization mentioned in
/// [here](https://linas.org/art-gallery/escape/escape.html)
///
/// $$
///     \nu = k + 1 - \log_2 \frac{\log |z|}{\log R}.
/// $$
///
/// Returns `None` when the logarithms are not defined, i.e. for $R \le 1$ or
/// $|z| \le 1$.
pub fn smooth_iteration(iteration: usize, modulus_squared: f64, escape_radius: f64) -> Option<f64> {
    if !(escape_radius > 1.0 && modulus_squared > 1.0 && modulus_squared.is_finite()) {
        return None;
    }

    let log_modulus = 0.5 * modulus_squared.ln();
    let nu = (iteration as f64) + 1.0 - (log_modulus / escape_radius.ln()).ln() / LN_2;

    nu.is_finite().then_some(nu)
}

/// Normalized intensity in [0, 1] of an escaped point before inversion.
fn get_intensity(iteration: usize, modulus_squared: f64, config: &RenderConfig) -> f64 {
    let maxit = config.maxit as f64;
    let discrete = (iteration as f64) / maxit;

    match config.coloring {
        ColoringMode::Discrete => discrete,
        ColoringMode::Smooth => {
            match smooth_iteration(iteration, modulus_squared, config.escape_radius) {
                Some(nu) => nu.clamp(0.0, maxit) / maxit,
                None => discrete,
            }
        }
    }
}

/// Determine the color of a single pixel from its escape result.
///
/// Bounded points always get [`INTERIOR_COLOR`]. Escaped points are mapped
/// to an intensity in [0, 1], optionally inverted, and passed through the
/// palette of *config*.
pub fn colorize(result: EscapeResult, config: &RenderConfig) -> Rgb<u8> {
    match result {
        EscapeResult::Bounded => INTERIOR_COLOR,
        EscapeResult::Escaped {
            iteration,
            modulus_squared,
        } => {
            let t = get_intensity(iteration, modulus_squared, config);
            let t = if config.invert { 1.0 - t } else { t };
            config.palette.color(t)
        }
    }
}

// }}}

// {{{ tests

#[cfg(test)]
mod tests {
    use super::*;

    use num::complex::c64;

    const PALETTES: [Palette; 4] = [
        Palette::Grayscale,
        Palette::Hue { offset: 0.67 },
        Palette::Rainbow,
        Palette::Fire,
    ];

    fn config(maxit: usize) -> RenderConfig {
        RenderConfig::new(c64(0.0, 1.0), 16, 16).with_maxit(maxit)
    }

    fn escaped(iteration: usize, modulus_squared: f64) -> EscapeResult {
        EscapeResult::Escaped {
            iteration,
            modulus_squared,
        }
    }

    #[test]
    fn test_bounded_is_interior() {
        for palette in PALETTES {
            for coloring in [ColoringMode::Discrete, ColoringMode::Smooth] {
                for invert in [false, true] {
                    let config = config(100)
                        .with_palette(palette)
                        .with_coloring(coloring)
                        .with_invert(invert);
                    assert_eq!(colorize(EscapeResult::Bounded, &config), INTERIOR_COLOR);
                }
            }
        }
    }

    #[test]
    fn test_discrete_monotonic() {
        let maxit = 100;
        let plain = config(maxit);
        let inverted = plain.with_invert(true);

        let mut prev_plain = 0u8;
        let mut prev_inverted = 255u8;
        for k in 0..maxit {
            let Rgb([v, _, _]) = colorize(escaped(k, 5.0), &plain);
            let Rgb([w, _, _]) = colorize(escaped(k, 5.0), &inverted);

            assert!(v >= prev_plain);
            assert!(w <= prev_inverted);

            prev_plain = v;
            prev_inverted = w;
        }
    }

    #[test]
    fn test_discrete_intensity() {
        let config = config(100);
        assert_eq!(colorize(escaped(0, 100.0), &config), Rgb([0, 0, 0]));
        assert_eq!(colorize(escaped(50, 100.0), &config), Rgb([128, 128, 128]));
        assert_eq!(
            colorize(escaped(0, 100.0), &config.with_invert(true)),
            Rgb([255, 255, 255])
        );
    }

    #[test]
    fn test_smooth_within_one_step() {
        // escaping orbits satisfy R^2 < |z|^2 <= R^4 when the previous
        // iterate was inside the circle, so nu lies in [k, k + 1)
        let maxit = 64;
        let discrete = config(maxit);
        let smooth = discrete.with_coloring(ColoringMode::Smooth);
        let radius = discrete.escape_radius;

        for k in 0..maxit - 1 {
            for i in 1..=20 {
                let modulus_squared = radius.powi(2) * (1.0 + (radius.powi(2) - 1.0) * (i as f64) / 20.0);

                let nu = match smooth_iteration(k, modulus_squared, radius) {
                    Some(nu) => nu,
                    None => unreachable!(),
                };
                assert!(nu >= (k as f64) - 1.0e-12);
                assert!(nu <= (k as f64) + 1.0);

                let Rgb([d, _, _]) = colorize(escaped(k, modulus_squared), &discrete);
                let Rgb([s, _, _]) = colorize(escaped(k, modulus_squared), &smooth);
                let step = (255.0 / (maxit as f64)).ceil() as i32;
                assert!((s as i32 - d as i32).abs() <= step);
            }
        }
    }

    #[test]
    fn test_smooth_boundaries() {
        let radius: f64 = 2.0;

        // |z| = R^2 gives exactly k
        match smooth_iteration(3, radius.powi(4), radius) {
            Some(nu) => assert!((nu - 3.0).abs() < 1.0e-12),
            None => unreachable!(),
        }

        // |z| -> R gives k + 1
        match smooth_iteration(3, radius.powi(2) * (1.0 + 1.0e-12), radius) {
            Some(nu) => assert!((nu - 4.0).abs() < 1.0e-6),
            None => unreachable!(),
        }
    }

    #[test]
    fn test_smooth_degenerate_falls_back() {
        let discrete = config(10);
        let smooth = discrete.with_coloring(ColoringMode::Smooth);

        for modulus_squared in [0.0, -1.0, 0.5, f64::NAN, f64::INFINITY] {
            assert_eq!(smooth_iteration(4, modulus_squared, 2.0), None);
            assert_eq!(
                colorize(escaped(4, modulus_squared), &smooth),
                colorize(escaped(4, modulus_squared), &discrete)
            );
        }

        // logarithm of the radius is not positive
        let unit = smooth.with_escape_radius(1.0);
        assert_eq!(smooth_iteration(4, 10.0, 1.0), None);
        assert_eq!(
            colorize(escaped(4, 10.0), &unit),
            colorize(escaped(4, 10.0), &discrete.with_escape_radius(1.0))
        );
    }

    #[test]
    fn test_smooth_clamped() {
        let config = config(10).with_coloring(ColoringMode::Smooth);

        // far outside the radius the fractional count goes negative
        assert_eq!(colorize(escaped(0, 1.0e300), &config), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_palette_endpoints() {
        assert_eq!(Palette::Grayscale.color(0.0), Rgb([0, 0, 0]));
        assert_eq!(Palette::Grayscale.color(1.0), Rgb([255, 255, 255]));
        assert_eq!(Palette::Grayscale.color(-3.0), Rgb([0, 0, 0]));
        assert_eq!(Palette::Grayscale.color(3.0), Rgb([255, 255, 255]));

        assert_eq!(Palette::Fire.color(0.0), Rgb([0, 0, 0]));
        assert_eq!(Palette::Fire.color(0.33), Rgb([255, 0, 0]));
        assert_eq!(Palette::Fire.color(0.66), Rgb([255, 255, 0]));
        assert_eq!(Palette::Fire.color(1.0), Rgb([255, 255, 255]));

        let Rgb([r, g, b]) = Palette::Rainbow.color(0.0);
        assert!(r > 250 && g == 0 && b == 0);
    }

    #[test]
    fn test_hue_offset_wraps() {
        // hue 0 at quarter lightness is a dark red
        let red = Palette::Hue { offset: 0.0 }.color(0.0);
        let Rgb([r, g, b]) = red;
        assert!((120..=135).contains(&r) && g == 0 && b == 0);
        assert_eq!(Palette::Hue { offset: 0.5 }.color(0.5), red);
        assert_eq!(Palette::Hue { offset: 1.0 }.color(0.0), red);
    }
}

// }}}
