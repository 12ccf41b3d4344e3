//! Hex colour helpers.
//!
//! Colours are written the way designers hand them over (`0x87CEEB`) and are
//! treated as sRGB. The render surface is an sRGB format, so everything that
//! reaches a shader or the clear colour is converted to linear first.

fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` as sRGB, returned as linear RGB in `0.0..=1.0`.
pub fn linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_channel_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

/// `0xRRGGBB` as an opaque clear colour.
pub fn clear_colour(hex: u32) -> wgpu::Color {
    let [r, g, b] = linear_rgb(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_and_white_are_fixed_points() {
        assert_eq!(linear_rgb(0x000000), [0.0, 0.0, 0.0]);
        for channel in linear_rgb(0xffffff) {
            assert!((channel - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn mid_grey_is_darker_in_linear_space() {
        let [r, g, b] = linear_rgb(0x808080);
        assert!((r - 0.2158).abs() < 1e-3);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn channels_are_read_in_rgb_order() {
        let [r, g, b] = linear_rgb(0xff0000);
        assert!((r - 1.0).abs() < 1e-6);
        assert_eq!((g, b), (0.0, 0.0));
        let sky = clear_colour(0x87ceeb);
        assert!(sky.b > sky.g && sky.g > sky.r);
        assert_eq!(sky.a, 1.0);
    }
}
