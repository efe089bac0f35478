//! Byte-level printability classification.
//!
//! Uses a 256-byte lookup table built at compile time.

/// Printability class of a single byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteClass {
    /// `0x00` or `0xFF`, the usual padding values.
    Padding,
    /// Printable ASCII or whitespace.
    Printable,
    /// Anything else: control characters and high bytes.
    Other,
}

const CLASS_PADDING: u8 = 0;
const CLASS_PRINTABLE: u8 = 1;
const CLASS_OTHER: u8 = 2;

/// Precomputed byte classification lookup table.
const fn generate_byte_class_lut() -> [u8; 256] {
    let mut lut = [CLASS_OTHER; 256];
    let mut i = 0usize;
    while i < 256 {
        // Graphic characters, space, and \t \n \v \f \r
        if (i >= 0x20 && i <= 0x7e) || (i >= 0x09 && i <= 0x0d) {
            lut[i] = CLASS_PRINTABLE;
        }
        i += 1;
    }
    lut[0x00] = CLASS_PADDING;
    lut[0xff] = CLASS_PADDING;
    lut
}

/// Static byte classification lookup table (computed at compile time).
static BYTE_CLASS_LUT: [u8; 256] = generate_byte_class_lut();

impl ByteClass {
    #[inline]
    pub fn of(byte: u8) -> Self {
        match BYTE_CLASS_LUT[byte as usize] {
            CLASS_PADDING => Self::Padding,
            CLASS_PRINTABLE => Self::Printable,
            _ => Self::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_bytes() {
        assert_eq!(ByteClass::of(0x00), ByteClass::Padding);
        assert_eq!(ByteClass::of(0xff), ByteClass::Padding);
    }

    #[test]
    fn test_printable_and_whitespace() {
        for byte in b"Hello, World! ~{}\t\n\r\x0b\x0c " {
            assert_eq!(ByteClass::of(*byte), ByteClass::Printable, "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_other_bytes() {
        for byte in [0x01u8, 0x08, 0x0e, 0x1f, 0x7f, 0x80, 0xfe] {
            assert_eq!(ByteClass::of(byte), ByteClass::Other, "byte {byte:#04x}");
        }
    }

    #[test]
    fn test_lut_matches_std_classification() {
        for byte in 1u8..0xff {
            let printable = byte.is_ascii_graphic() || byte == b' ' || (0x09..=0x0d).contains(&byte);
            assert_eq!(ByteClass::of(byte) == ByteClass::Printable, printable);
        }
    }
}
