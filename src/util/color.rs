//! Color type and the palettes used by the generators.

use crate::analysis::{ByteClass, MAX_ENTROPY};
use crate::config::EntropyColor;

/// 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value on every channel.
    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }

    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Fill for pixels past the end of the input.
pub const PADDING: Rgb = Rgb::BLACK;

/// Unset pixels in line and matrix modes.
pub const BACKGROUND: Rgb = Rgb::BLACK;

/// Set pixels in line and matrix modes.
pub const FOREGROUND: Rgb = Rgb::WHITE;

/// Printable ASCII and whitespace (blue).
pub const PRINTABLE: Rgb = Rgb::new(0x37, 0x7e, 0xb8);

/// Any other non-padding byte (red).
pub const OTHER: Rgb = Rgb::new(0xe4, 0x1a, 0x1c);

/// Color of a byte in the printability mode.
#[inline]
pub fn byte_class_color(byte: u8) -> Rgb {
    match ByteClass::of(byte) {
        ByteClass::Padding => Rgb::gray(byte),
        ByteClass::Printable => PRINTABLE,
        ByteClass::Other => OTHER,
    }
}

/// Map entropy (0-8) to an intensity (0-255).
#[inline]
pub fn entropy_intensity(entropy: f64) -> u8 {
    (entropy * 255.0 / MAX_ENTROPY).round().clamp(0.0, 255.0) as u8
}

/// Color for an entropy intensity in the given scheme.
///
/// The heatmap keeps blue linear but makes red cubic: entropy is a base-2
/// logarithm, so bright values are exponentially more significant than dark
/// ones.
#[inline]
pub fn intensity_color(intensity: u8, scheme: EntropyColor) -> Rgb {
    match scheme {
        EntropyColor::Grayscale => Rgb::gray(intensity),
        EntropyColor::Heatmap => {
            let t = f64::from(intensity) / 255.0;
            Rgb::new((t.powi(3) * 255.0) as u8, 0, intensity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_class_colors() {
        assert_eq!(byte_class_color(0x00), Rgb::BLACK);
        assert_eq!(byte_class_color(0xff), Rgb::WHITE);
        assert_eq!(byte_class_color(b'A'), PRINTABLE);
        assert_eq!(byte_class_color(b'\n'), PRINTABLE);
        assert_eq!(byte_class_color(0x90), OTHER);
    }

    #[test]
    fn test_entropy_intensity_bounds() {
        assert_eq!(entropy_intensity(0.0), 0);
        assert_eq!(entropy_intensity(8.0), 255);
        assert_eq!(entropy_intensity(4.0), 128);
        assert_eq!(entropy_intensity(1.0), 32);
        // Out of range inputs are clamped rather than wrapped
        assert_eq!(entropy_intensity(9.0), 255);
    }

    #[test]
    fn test_heatmap() {
        assert_eq!(intensity_color(0, EntropyColor::Heatmap), Rgb::BLACK);
        assert_eq!(
            intensity_color(255, EntropyColor::Heatmap),
            Rgb::new(255, 0, 255)
        );
        let mid = intensity_color(128, EntropyColor::Heatmap);
        assert_eq!(mid.b, 128);
        assert!(mid.r < 40);
        assert_eq!(intensity_color(77, EntropyColor::Grayscale), Rgb::gray(77));
    }
}
