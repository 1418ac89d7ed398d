// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

use num::complex::Complex64;

use crate::config::ConfigError;

macro_rules! c64 {
    ($re: literal, $im: literal) => {
        Complex64 { re: $re, im: $im }
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Exhibit {
    pub name: &'static str,
    /// Constant in the iteration.
    pub c: Complex64,
    /// Center and zoom of the view.
    pub offset: Complex64,
    pub zoom: f64,
}

pub const EXHIBIT_DENDRITE: Exhibit = Exhibit {
    name: "dendrite",
    c: c64!(0.0, 1.0),
    offset: c64!(0.0, 0.0),
    zoom: 1.2,
};

pub const EXHIBIT_RABBIT: Exhibit = Exhibit {
    name: "rabbit",
    c: c64!(-0.123, 0.745),
    offset: c64!(0.0, 0.0),
    zoom: 1.3,
};

pub const EXHIBIT_SAN_MARCO: Exhibit = Exhibit {
    name: "san-marco",
    c: c64!(-0.75, 0.0),
    offset: c64!(0.0, 0.0),
    zoom: 1.2,
};

pub const EXHIBIT_SIEGEL_DISK: Exhibit = Exhibit {
    name: "siegel-disk",
    c: c64!(-0.390541, -0.586788),
    offset: c64!(0.0, 0.0),
    zoom: 1.4,
};

pub const EXHIBIT_DRAGON: Exhibit = Exhibit {
    name: "dragon",
    c: c64!(-0.8, 0.156),
    offset: c64!(0.0, 0.0),
    zoom: 1.3,
};

pub const EXHIBITS: [Exhibit; 5] = [
    EXHIBIT_DENDRITE,
    EXHIBIT_RABBIT,
    EXHIBIT_SAN_MARCO,
    EXHIBIT_SIEGEL_DISK,
    EXHIBIT_DRAGON,
];

/// Look up an exhibit by (case-insensitive) name.
pub fn find_exhibit(name: &str) -> Result<Exhibit, ConfigError> {
    EXHIBITS
        .iter()
        .find(|exhibit| exhibit.name.eq_ignore_ascii_case(name.trim()))
        .copied()
        .ok_or_else(|| ConfigError::UnknownExhibit(name.to_string()))
}
