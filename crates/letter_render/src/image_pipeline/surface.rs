use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};

use super::placement::Placement;

/// Fixed-size scratch buffer the source image is drawn onto before sampling.
#[derive(Clone, Debug)]
pub struct TargetSurface {
    buffer: RgbaImage,
}

impl TargetSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { buffer: RgbaImage::new(width, height) }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        for pixel in self.buffer.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    /// Clear the surface and draw `image` scaled into `placement`. Parts of
    /// the placement outside the surface are clipped.
    pub fn draw(&mut self, image: &DynamicImage, placement: Placement) {
        self.clear();

        let width = (placement.width.round() as u32).max(1);
        let height = (placement.height.round() as u32).max(1);
        let scaled = imageops::resize(&image.to_rgba8(), width, height, FilterType::CatmullRom);

        imageops::replace(
            &mut self.buffer,
            &scaled,
            placement.x.round() as i64,
            placement.y.round() as i64,
        );
    }

    /// Pixel at `(x, y)`, clamped to the last valid pixel on each axis.
    pub fn pixel_clamped(&self, x: u32, y: u32) -> Rgba<u8> {
        if self.width() == 0 || self.height() == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let x = x.min(self.width().saturating_sub(1));
        let y = y.min(self.height().saturating_sub(1));
        *self.buffer.get_pixel(x, y)
    }
}
