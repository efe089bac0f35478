//! Exporters: PNG images and ANSI-escaped text.
//!
//! Both scale the grid by an integer zoom factor, every grid pixel becoming a
//! `zoom x zoom` square (PNG) or `zoom` character cells (text).

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::RgbImage;
use tracing::debug;

use crate::config::ExportFormat;
use crate::error::{Result, VizError};
use crate::io::input::STDIO_PATH;
use crate::util::format::format_bytes;
use crate::viz::grid::PixelGrid;

fn check_exportable(grid: &PixelGrid, zoom: u32) -> Result<()> {
    if grid.width() == 0 || grid.height() == 0 {
        return Err(VizError::EmptyImage {
            width: grid.width(),
            height: grid.height(),
        });
    }
    if zoom == 0 {
        return Err(VizError::ZeroZoom);
    }
    Ok(())
}

/// Scaled image dimensions, if they fit the `u32` sizes PNG allows.
fn zoomed_size(grid: &PixelGrid, zoom: u32) -> Result<(u32, u32)> {
    let overflow = || VizError::DimensionOverflow {
        width: grid.width(),
        height: grid.height(),
    };
    let scale = |side: usize| {
        u32::try_from(side)
            .ok()
            .and_then(|side| side.checked_mul(zoom))
            .ok_or_else(overflow)
    };
    Ok((scale(grid.width())?, scale(grid.height())?))
}

/// Render the grid into an RGB8 image, scaled by `zoom`.
pub fn to_image(grid: &PixelGrid, zoom: u32) -> Result<RgbImage> {
    check_exportable(grid, zoom)?;
    let (width, height) = zoomed_size(grid, zoom)?;
    let zoom = zoom as usize;
    let pixels = grid.pixels();

    Ok(RgbImage::from_fn(width, height, |x, y| {
        let index = (y as usize / zoom) * grid.width() + x as usize / zoom;
        image::Rgb(pixels[index].to_array())
    }))
}

/// Encode the grid as PNG into `writer`.
pub fn write_png<W: Write>(grid: &PixelGrid, zoom: u32, writer: W) -> Result<()> {
    let image = to_image(grid, zoom)?;
    image.write_with_encoder(PngEncoder::new(writer))?;
    Ok(())
}

/// Write the grid as text: each pixel is `zoom` spaces on a 24-bit ANSI
/// background color, each row ends with a newline.
pub fn write_escaped_text<W: Write>(grid: &PixelGrid, zoom: u32, writer: W) -> Result<()> {
    check_exportable(grid, zoom)?;
    let cell = " ".repeat(zoom as usize);
    let mut out = BufWriter::new(writer);

    for row in grid.rows() {
        for pixel in row {
            write!(
                out,
                "\x1b[48;2;{};{};{}m{cell}\x1b[0m",
                pixel.r, pixel.g, pixel.b
            )?;
        }
        writeln!(out)?;
    }

    out.flush()?;
    Ok(())
}

/// Export the grid to `path` in the given format; `-` writes to standard
/// output.
pub fn export(grid: &PixelGrid, format: ExportFormat, zoom: u32, path: &Path) -> Result<()> {
    let to_stdout = path.as_os_str() == STDIO_PATH;

    match (format, to_stdout) {
        (ExportFormat::Png, true) => {
            let mut encoded = Vec::new();
            write_png(grid, zoom, &mut encoded)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&encoded)?;
            stdout.flush()?;
            debug!(size = %format_bytes(encoded.len() as u64), "Wrote PNG to stdout");
        }
        (ExportFormat::Png, false) => {
            // Validate before creating the file so failures leave nothing behind
            check_exportable(grid, zoom)?;
            let file = File::create(path).map_err(|e| VizError::file(path, e))?;
            let mut writer = BufWriter::new(file);
            write_png(grid, zoom, &mut writer)?;
            writer.flush().map_err(|e| VizError::file(path, e))?;
            debug!(path = %path.display(), "Wrote PNG");
        }
        (ExportFormat::Ascii, true) => {
            write_escaped_text(grid, zoom, io::stdout().lock())?;
        }
        (ExportFormat::Ascii, false) => {
            check_exportable(grid, zoom)?;
            let file = File::create(path).map_err(|e| VizError::file(path, e))?;
            write_escaped_text(grid, zoom, file).map_err(|e| match e {
                VizError::Io(source) => VizError::file(path, source),
                other => other,
            })?;
            debug!(path = %path.display(), "Wrote escaped text");
        }
    }

    Ok(())
}
