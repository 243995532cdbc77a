use image::Rgba;

use super::adjust;
use super::surface::TargetSurface;
use crate::letters::cycler::LetterCycler;
use crate::letters::grid::{Grid, GridCell, COLUMNS, ROWS};
use crate::LetterError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Letters take the sampled pixel's color.
    #[default]
    Color,
    /// Every letter is white.
    Monochrome,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlphaMode {
    /// The pixel's alpha channel, unscaled (0-255).
    #[default]
    Raw,
    /// The pixel's alpha channel scaled to [0.0, 1.0].
    Normalized,
    /// Average color brightness in [0.0, 1.0], ignoring the alpha channel.
    Darkness,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SampleOptions {
    pub color_mode: ColorMode,
    pub alpha_mode: AlphaMode,
    /// Complement the alpha in the normalized model. Not valid with
    /// [`AlphaMode::Raw`].
    pub invert: bool,
}

impl SampleOptions {
    /// White letters whose opacity follows image brightness.
    pub fn monochrome() -> Self {
        Self { color_mode: ColorMode::Monochrome, alpha_mode: AlphaMode::Darkness, invert: false }
    }

    pub fn validate(&self) -> Result<(), LetterError> {
        if self.invert && self.alpha_mode == AlphaMode::Raw {
            return Err(LetterError::ConflictingOptions(
                "inverted alpha requires a normalized alpha mode",
            ));
        }
        Ok(())
    }
}

/// Walks the fixed letter grid over a drawn surface.
#[derive(Clone, Debug)]
pub struct GridSampler {
    options: SampleOptions,
    columns: u16,
    rows: u16,
}

impl GridSampler {
    pub fn new(options: SampleOptions) -> Result<Self, LetterError> {
        options.validate()?;
        Ok(Self { options, columns: COLUMNS, rows: ROWS })
    }

    /// Sample one pixel per cell in row-major order, taking one letter from
    /// `cycler` per cell.
    pub fn sample(&self, surface: &TargetSurface, cycler: &mut LetterCycler) -> Grid {
        let step_x = surface.width() as f32 / self.columns as f32;
        let step_y = surface.height() as f32 / self.rows as f32;
        let mut cells = Vec::with_capacity(usize::from(self.columns) * usize::from(self.rows));

        for row in 0..self.rows {
            for column in 0..self.columns {
                let x = (column as f32 * step_x) as u32;
                let y = (row as f32 * step_y) as u32;
                let pixel = surface.pixel_clamped(x, y);
                cells.push(self.cell(pixel, cycler.next()));
            }
        }

        Grid::new(self.columns, self.rows, cells)
    }

    fn cell(&self, pixel: Rgba<u8>, letter: Option<char>) -> GridCell {
        let [red, green, blue] = match self.options.color_mode {
            ColorMode::Color => [pixel.0[0], pixel.0[1], pixel.0[2]],
            ColorMode::Monochrome => [255; 3],
        };

        let mut alpha = match self.options.alpha_mode {
            AlphaMode::Raw => pixel.0[3] as f32,
            AlphaMode::Normalized => adjust::normalized_alpha(pixel),
            AlphaMode::Darkness => adjust::darkness(pixel),
        };
        if self.options.invert {
            alpha = adjust::invert(alpha);
        }

        GridCell { letter, red, green, blue, alpha }
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, RgbaImage};

    use super::*;
    use crate::image_pipeline::placement::Placement;

    fn filled_surface(width: u32, height: u32, pixel: [u8; 4]) -> TargetSurface {
        let mut surface = TargetSurface::new(width, height);
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(pixel)));
        surface.draw(&image, Placement::cover(width, height, width, height).unwrap());
        surface
    }

    #[test]
    fn grid_has_fixed_length_for_any_surface() {
        let sampler = GridSampler::new(SampleOptions::default()).unwrap();
        for (width, height) in [(800, 600), (13, 7), (1, 1), (1000, 20)] {
            let surface = filled_surface(width, height, [1, 2, 3, 255]);
            let grid = sampler.sample(&surface, &mut LetterCycler::new());
            assert_eq!(grid.len(), 7700);
            assert_eq!((grid.columns, grid.rows), (100, 77));
        }
    }

    #[test]
    fn raw_alpha_is_not_normalized() {
        let sampler = GridSampler::new(SampleOptions::default()).unwrap();
        let surface = TargetSurface::new(200, 154);
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        assert!(grid.cells.iter().all(|cell| cell.alpha == 0.0));

        let surface = filled_surface(200, 154, [10, 20, 30, 128]);
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        let cell = &grid.cells[0];
        assert_eq!((cell.red, cell.green, cell.blue), (10, 20, 30));
        assert_eq!(cell.alpha, 128.0);
    }

    #[test]
    fn normalized_alpha_is_separate_option() {
        let options = SampleOptions { alpha_mode: AlphaMode::Normalized, ..Default::default() };
        let sampler = GridSampler::new(options).unwrap();
        let surface = filled_surface(100, 77, [0, 0, 0, 255]);
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        assert!(grid.cells.iter().all(|cell| cell.alpha == 1.0));
    }

    #[test]
    fn monochrome_uses_darkness_and_white() {
        let sampler = GridSampler::new(SampleOptions::monochrome()).unwrap();
        let surface = filled_surface(100, 77, [255, 255, 255, 0]);
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        let cell = &grid.cells[42];
        assert_eq!((cell.red, cell.green, cell.blue), (255, 255, 255));
        assert_eq!(cell.alpha, 1.0);
    }

    #[test]
    fn invert_complements_normalized_alpha() {
        let options = SampleOptions { invert: true, ..SampleOptions::monochrome() };
        let sampler = GridSampler::new(options).unwrap();
        let surface = filled_surface(100, 77, [255, 255, 255, 255]);
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        assert!(grid.cells.iter().all(|cell| cell.alpha == 0.0));
    }

    #[test]
    fn invert_with_raw_alpha_is_rejected() {
        let options = SampleOptions { invert: true, ..Default::default() };
        assert!(matches!(GridSampler::new(options), Err(LetterError::ConflictingOptions(_))));
    }

    #[test]
    fn takes_one_letter_per_cell_in_row_major_order() {
        let sampler = GridSampler::new(SampleOptions::default()).unwrap();
        let surface = filled_surface(100, 77, [0, 0, 0, 255]);
        let mut cycler = LetterCycler::with_text("abcdefg").unwrap();
        let grid = sampler.sample(&surface, &mut cycler);

        let mut expected = LetterCycler::with_text("abcdefg").unwrap();
        for cell in &grid.cells {
            assert_eq!(cell.letter, expected.next());
        }
        assert_eq!(cycler.cursor(), expected.cursor());
    }

    #[test]
    fn samples_cell_origin_points() {
        let mut surface = TargetSurface::new(1000, 770);
        let mut image = RgbaImage::from_pixel(1000, 770, Rgba([0, 0, 0, 255]));
        // Cell (1, 1) samples pixel (10, 10).
        for x in 8..=12 {
            for y in 8..=12 {
                image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
        let placement = Placement::cover(1000, 770, 1000, 770).unwrap();
        surface.draw(&DynamicImage::ImageRgba8(image), placement);

        let sampler = GridSampler::new(SampleOptions::default()).unwrap();
        let grid = sampler.sample(&surface, &mut LetterCycler::new());
        assert_eq!(grid.cell(1, 1).map(|cell| cell.red), Some(255));
        assert_eq!(grid.cell(0, 0).map(|cell| cell.red), Some(0));
        assert_eq!(grid.cell(2, 1).map(|cell| cell.red), Some(0));
    }
}
