use image::Rgba;

pub fn clamp_unit(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Position of `value` between `a` and `b`, clamped to [0.0, 1.0].
pub fn invlerp(a: f32, b: f32, value: f32) -> f32 {
    clamp_unit((value - a) / (b - a))
}

/// Average brightness of the color channels in [0.0, 1.0]. The alpha channel
/// does not contribute.
pub fn darkness(pixel: Rgba<u8>) -> f32 {
    let [r, g, b, _] = pixel.0;
    let r = invlerp(0.0, 255.0, r as f32);
    let g = invlerp(0.0, 255.0, g as f32);
    let b = invlerp(0.0, 255.0, b as f32);
    (r + g + b) / 3.0
}

pub fn normalized_alpha(pixel: Rgba<u8>) -> f32 {
    invlerp(0.0, 255.0, pixel.0[3] as f32)
}

pub fn invert(alpha: f32) -> f32 {
    1.0 - alpha
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invlerp_clamps_outside_range() {
        assert_eq!(invlerp(0.0, 255.0, 0.0), 0.0);
        assert_eq!(invlerp(0.0, 255.0, 255.0), 1.0);
        assert_eq!(invlerp(0.0, 100.0, 255.0), 1.0);
        assert_eq!(invlerp(10.0, 20.0, 0.0), 0.0);
    }

    #[test]
    fn darkness_averages_channels() {
        assert_eq!(darkness(Rgba([255, 255, 255, 0])), 1.0);
        assert_eq!(darkness(Rgba([0, 0, 0, 255])), 0.0);
        let red = darkness(Rgba([255, 0, 0, 255]));
        assert!((red - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn normalized_alpha_spans_unit_range() {
        assert_eq!(normalized_alpha(Rgba([0, 0, 0, 255])), 1.0);
        assert_eq!(normalized_alpha(Rgba([0, 0, 0, 0])), 0.0);
        assert!((normalized_alpha(Rgba([0, 0, 0, 51])) - 0.2).abs() < 1e-6);
    }
}
