use std::io::Cursor;

use image::{ImageFormat, Rgb, Rgba, RgbaImage, imageops};
use tracing::debug;

use super::fill::{FillReport, FillRequest, flood_fill};
use super::history::History;
use crate::error::{Error, Result};

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Drawing surface: owns the raster and its undo history.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    history: History,
}

impl Canvas {
    /// A blank white canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, BACKGROUND))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            history: History::new(),
        }
    }

    /// Decode a PNG (or any format the codec recognises) into a canvas.
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_image(image::load_from_memory(bytes)?.to_rgba8()))
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Bucket fill tool. A no-op or failed fill leaves the history untouched.
    pub fn bucket_fill(&mut self, request: &FillRequest) -> Result<FillReport> {
        let before = self.image.clone();
        let report = flood_fill(&mut self.image, request)?;
        if !report.is_noop() {
            self.history.record(&before);
        }
        Ok(report)
    }

    /// Eyedropper: color under the given pixel, alpha dropped.
    pub fn pick_color(&self, x: u32, y: u32) -> Result<Rgb<u8>> {
        let (width, height) = self.dimensions();
        if x >= width || y >= height {
            return Err(Error::SeedOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        let [r, g, b, _] = self.image.get_pixel(x, y).0;
        Ok(Rgb([r, g, b]))
    }

    /// Paint the whole canvas white.
    pub fn clear(&mut self) {
        self.history.record(&self.image);
        for px in self.image.pixels_mut() {
            *px = BACKGROUND;
        }
    }

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.image)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.image)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Encode as PNG composited over a white background, as submitted for scoring.
    pub fn export_png(&self) -> Result<Vec<u8>> {
        let (width, height) = self.dimensions();
        let mut out = RgbaImage::from_pixel(width, height, BACKGROUND);
        imageops::overlay(&mut out, &self.image, 0, 0);

        let bytes = encode_png(&out)?;
        debug!("Exported {}x{} canvas ({} bytes)", width, height, bytes.len());
        Ok(bytes)
    }

    /// Encode the raster as is, keeping transparent pixels.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        encode_png(&self.image)
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
