// SPDX-FileCopyrightText: 2024 Alexandru Fikl <alexfikl@gmail.com>
// SPDX-License-Identifier: MIT

#![warn(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]

mod colorschemes;
mod config;
mod gallery;
mod julia;
mod render;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use image::{imageops, RgbImage};
use log::{info, warn};
use num::complex::Complex64;

use colorschemes::{ColoringMode, Palette};
use config::{parse_complex, ConfigError, RenderConfig, DEFAULT_ESCAPE_RADIUS, DEFAULT_MAXIT};
use gallery::find_exhibit;
use julia::escape_radius;
use render::render;

const EPILOG: &str = "\
C must be given as a complex literal of the form x+yJ, e.g. 0+1J, 0.25-.5J, 1.
A negative real part can be given directly (-1+1J), after a '--' separator or
quoted with a leading space (' -1+1J').

The output image format is detected automatically from the file extension.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PaletteArg {
    Grayscale,
    Hue,
    Rainbow,
    Fire,
}

#[derive(Debug, Parser)]
#[command(
    name = "juliabrot",
    about = "Plot a filled Julia set.",
    version,
    after_help = EPILOG
)]
struct Cli {
    /// Complex constant c in z^2 + c
    #[arg(
        value_name = "C",
        value_parser = parse_complex,
        allow_hyphen_values = true,
        required_unless_present = "exhibit"
    )]
    c: Option<Complex64>,

    /// Maximum number of iterations of f(z) for any z
    #[arg(short = 'i', long = "iters", default_value_t = DEFAULT_MAXIT)]
    maxit: usize,

    /// Generate a RESOLUTION x RESOLUTION image
    #[arg(short = 'r', long, default_value_t = 1000)]
    resolution: u32,

    /// Image width (overrides the resolution)
    #[arg(long)]
    width: Option<u32>,

    /// Image height (overrides the resolution)
    #[arg(long)]
    height: Option<u32>,

    /// Output filename
    #[arg(short = 'o', long = "out", default_value = "julia.png")]
    out: PathBuf,

    /// Escape radius
    #[arg(long = "radius", conflicts_with = "auto_radius", allow_hyphen_values = true)]
    escape_radius: Option<f64>,

    /// Use the smallest escape radius that is valid for C
    #[arg(long)]
    auto_radius: bool,

    /// Point at the center of the image
    #[arg(long, value_parser = parse_complex, allow_hyphen_values = true)]
    offset: Option<Complex64>,

    /// Magnification around the offset
    #[arg(short = 'z', long, allow_hyphen_values = true)]
    zoom: Option<f64>,

    /// Use continuous coloring instead of integer escape counts
    #[arg(long)]
    smooth: bool,

    /// Invert the palette intensity of escaped points
    #[arg(long)]
    invert: bool,

    #[arg(long, value_enum, default_value_t = PaletteArg::Grayscale)]
    palette: PaletteArg,

    /// Hue offset [0-1] for the hue palette
    #[arg(long, default_value_t = 0.67, allow_hyphen_values = true)]
    hue_offset: f64,

    /// Standard deviation of a Gaussian blur applied to the final image
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    blur: f32,

    /// Render a named exhibit (dendrite, rabbit, san-marco, siegel-disk, dragon)
    #[arg(long)]
    exhibit: Option<String>,
}

fn build_config(cli: &Cli) -> Result<RenderConfig, ConfigError> {
    let exhibit = cli.exhibit.as_deref().map(find_exhibit).transpose()?;

    let c = cli
        .c
        .or(exhibit.map(|exhibit| exhibit.c))
        .ok_or(ConfigError::MissingConstant)?;
    let offset = cli
        .offset
        .or(exhibit.map(|exhibit| exhibit.offset))
        .unwrap_or_default();
    let zoom = cli
        .zoom
        .or(exhibit.map(|exhibit| exhibit.zoom))
        .unwrap_or(config::DEFAULT_ZOOM);

    let radius = if cli.auto_radius {
        escape_radius(c)
    } else {
        cli.escape_radius.unwrap_or(DEFAULT_ESCAPE_RADIUS)
    };

    let palette = match cli.palette {
        PaletteArg::Grayscale => Palette::Grayscale,
        PaletteArg::Hue => Palette::Hue {
            offset: cli.hue_offset,
        },
        PaletteArg::Rainbow => Palette::Rainbow,
        PaletteArg::Fire => Palette::Fire,
    };

    let coloring = if cli.smooth {
        ColoringMode::Smooth
    } else {
        ColoringMode::Discrete
    };

    // imageops::blur only accepts normal positive values
    if !(cli.blur == 0.0 || (cli.blur.is_normal() && cli.blur > 0.0)) {
        return Err(ConfigError::InvalidBlur);
    }

    RenderConfig::new(
        c,
        cli.width.unwrap_or(cli.resolution),
        cli.height.unwrap_or(cli.resolution),
    )
    .with_maxit(cli.maxit)
    .with_escape_radius(radius)
    .with_offset(offset)
    .with_zoom(zoom)
    .with_coloring(coloring)
    .with_invert(cli.invert)
    .with_palette(palette)
    .validate()
}

/// Write *image* to *path*, with the format given by the file extension.
fn write_image(image: &RgbImage, path: &Path) -> anyhow::Result<()> {
    image
        .save(path)
        .with_context(|| format!("failed to write image '{}'", path.display()))?;
    info!("Saved '{}'", path.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    if config.coloring == ColoringMode::Smooth && config.escape_radius <= 1.0 {
        warn!(
            "Escape radius {} is not larger than 1: smooth coloring falls back to discrete",
            config.escape_radius
        );
    }

    info!(
        "Plotting Julia set for c = {} at {}x{} (maxit {})",
        config.c, config.width, config.height, config.maxit
    );
    let now = Instant::now();
    let mut image = render(&config)?;
    let elapsed = now.elapsed().as_millis() as f32 / 1000.0;
    info!("Elapsed {}s!", elapsed);

    if cli.blur > 0.0 {
        image = imageops::blur(&image, cli.blur);
    }

    write_image(&image, &cli.out)
}

// {{{ tests


// }}}
