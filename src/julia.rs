// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::Complex64;

// {{{ structs

/// Outcome of iterating a single starting point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EscapeResult {
    /// The orbit stayed inside the escape radius for all iterations.
    Bounded,
    /// The orbit left the escape radius.
    Escaped {
        /// Iteration at which the point escaped, always in `[0, maxit)`.
        iteration: usize,
        /// Squared modulus of the first iterate outside the escape radius.
        modulus_squared: f64,
    },
}

// }}}

// {{{ helpers

/// Smallest radius outside of which every orbit of $z^2 + c$ diverges
///
/// $$
///     R = \frac{1 + \sqrt{1 + 4 |c|}}{2}.
/// $$
pub fn escape_radius(c: Complex64) -> f64 {
    (1.0 + (1.0 + 4.0 * c.norm()).sqrt()) / 2.0
}

// }}}

// {{{ escape

/// Compute the escape time for the quadratic Julia map
///
/// $$
///     f(z) = z^2 + c,
/// $$
///
/// starting at *z0* and using at most *maxit* iterations. A point is said to
/// escape at iteration $k$ when $|f^{k + 1}(z_0)| > R$. Starting points that
/// are already outside the radius escape at iteration 0.
///
/// The comparison is done on squared moduli, so no square root is taken in
/// the loop.
pub fn julia_orbit_escape(
    z0: Complex64,
    c: Complex64,
    maxit: usize,
    escape_radius: f64,
) -> EscapeResult {
    let escape_radius_squared = escape_radius * escape_radius;

    let modulus_squared = z0.norm_sqr();
    if maxit > 0 && modulus_squared > escape_radius_squared {
        return EscapeResult::Escaped {
            iteration: 0,
            modulus_squared,
        };
    }

    let mut z = z0;
    for i in 0..maxit {
        z = z * z + c;

        let modulus_squared = z.norm_sqr();
        if modulus_squared > escape_radius_squared {
            return EscapeResult::Escaped {
                iteration: i,
                modulus_squared,
            };
        }
    }

    EscapeResult::Bounded
}

// }}}

// {{{ tests


// }}}
