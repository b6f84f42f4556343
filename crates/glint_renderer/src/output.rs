//! Image sinks for finished renders.
//!
//! A sink receives the image size and the quantized pixels as ordered
//! triples, top row first and left column first.

use crate::renderer::ImageBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Expected {expected} pixels for the image size, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for a finished 8-bit image.
pub trait ImageSink {
    fn write_image(&mut self, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()>;
}

fn check_size(width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Plain-text PPM (`P3`) writer, one `r g b` triple per line.
pub struct PpmWriter<W: Write> {
    writer: W,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ImageSink for PpmWriter<W> {
    fn write_image(&mut self, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
        check_size(width, height, pixels)?;

        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "255")?;
        for [r, g, b] in pixels {
            writeln!(self.writer, "{} {} {}", r, g, b)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects the image in memory as an `image::RgbImage`.
#[derive(Default)]
pub struct MemorySink {
    pub image: Option<image::RgbImage>,
}

impl ImageSink for MemorySink {
    fn write_image(&mut self, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
        check_size(width, height, pixels)?;
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let rgb = image::RgbImage::from_raw(width, height, raw).ok_or(
            OutputError::SizeMismatch {
                expected: width as usize * height as usize,
                actual: pixels.len(),
            },
        )?;
        self.image = Some(rgb);
        Ok(())
    }
}

/// Quantize `image` and hand it to `sink`.
pub fn write_to_sink(image: &ImageBuffer, sink: &mut dyn ImageSink) -> OutputResult<()> {
    sink.write_image(image.width, image.height, &image.to_rgb8())
}

/// Write `image` to `path`, choosing the encoder from the file extension.
///
/// `.ppm` is written as plain-text P3; other extensions known to the `image`
/// crate (png, jpg, bmp, tga, ...) go through its encoders.
pub fn write_image_file<P: AsRef<Path>>(path: P, image: &ImageBuffer) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| OutputError::UnsupportedFormat(path.display().to_string()))?;

    if extension == "ppm" {
        let file = File::create(path)?;
        write_to_sink(image, &mut PpmWriter::new(BufWriter::new(file)))?;
    } else {
        let format = image::ImageFormat::from_extension(&extension)
            .ok_or_else(|| OutputError::UnsupportedFormat(extension.clone()))?;
        let mut sink = MemorySink::default();
        write_to_sink(image, &mut sink)?;
        let rgb = sink.image.ok_or(OutputError::SizeMismatch {
            expected: image.width as usize * image.height as usize,
            actual: 0,
        })?;
        rgb.save_with_format(path, format)?;
    }

    log::info!("wrote {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
