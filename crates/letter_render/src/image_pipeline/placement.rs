/// Where a source image lands on the target surface, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Scale the source to fill one surface axis exactly and center it on the
    /// other. Portrait sources fill the height, everything else the width.
    pub fn cover(
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
    ) -> Option<Placement> {
        if source_width == 0 || source_height == 0 || target_width == 0 || target_height == 0 {
            return None;
        }

        let (source_width, source_height) = (source_width as f32, source_height as f32);
        let (target_width, target_height) = (target_width as f32, target_height as f32);

        if source_height > source_width {
            let height = target_height;
            let width = source_width * (height / source_height);
            Some(Placement { x: (target_width - width) / 2.0, y: 0.0, width, height })
        } else {
            let width = target_width;
            let height = source_height * (width / source_width);
            Some(Placement { x: 0.0, y: (target_height - height) / 2.0, width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn portrait_fills_height_and_centers_horizontally() {
        let placement = Placement::cover(100, 200, 800, 600).unwrap();
        assert_eq!(placement.height, 600.0);
        assert_eq!(placement.width, 300.0);
        assert_eq!(placement.x, (800.0 - 300.0) / 2.0);
        assert_eq!(placement.y, 0.0);
    }

    #[test]
    fn landscape_fills_width_and_centers_vertically() {
        let placement = Placement::cover(200, 100, 800, 600).unwrap();
        assert_eq!(placement, Placement { x: 0.0, y: 100.0, width: 800.0, height: 400.0 });
    }

    #[test]
    fn square_follows_landscape_branch() {
        let placement = Placement::cover(50, 50, 800, 600).unwrap();
        assert_eq!(placement.width, 800.0);
        assert_eq!(placement.height, 800.0);
        assert_eq!(placement.x, 0.0);
        // Taller than the surface, so the centering offset goes negative.
        assert_eq!(placement.y, -100.0);
    }

    #[test]
    fn zero_dimensions_have_no_placement() {
        assert!(Placement::cover(0, 10, 800, 600).is_none());
        assert!(Placement::cover(10, 0, 800, 600).is_none());
        assert!(Placement::cover(10, 10, 0, 600).is_none());
        assert!(Placement::cover(10, 10, 800, 0).is_none());
    }
}
