//! Pixel formats
//!
//! The runtime stores pixels in one of a fixed set of formats. Each format
//! is described by its channel bit widths and how pixels pack into storage
//! units.

use core::fmt;

use serde::{Serialize, Serializer};

/// Supported pixel formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelFormat {
    /// 1-bit alpha mask, 8 pixels per byte
    A1,
    /// 1-bit monochrome, 8 pixels per byte
    W1,
    /// 4-bit grayscale, 2 pixels per byte
    W4,
    /// 8-bit grayscale
    W8,
    /// 8-bit grayscale, raw value 1 is transparent
    W8Key,
    Rgb332,
    Rgb565,
    /// RGB565, big-endian storage
    Rgb565Be,
    Rgb888,
    Rgba4444,
    Rgba8888,
}

/// How a display renders its pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayType {
    Binary,
    Grayscale,
    Color,
}

/// Canonical names of all formats, as accepted in configuration
pub const PIXEL_TYPES: &[(&str, PixelFormat)] = &[
    ("A1", PixelFormat::A1),
    ("W1", PixelFormat::W1),
    ("W4", PixelFormat::W4),
    ("W8", PixelFormat::W8),
    ("W8_KEY", PixelFormat::W8Key),
    ("RGB332", PixelFormat::Rgb332),
    ("RGB565", PixelFormat::Rgb565),
    ("RGB565_BE", PixelFormat::Rgb565Be),
    ("RGB888", PixelFormat::Rgb888),
    ("RGBA4444", PixelFormat::Rgba4444),
    ("RGBA8888", PixelFormat::Rgba8888),
];

/// Channel layout of a format
///
/// Bit widths per channel, bytes per storage unit, pixels per storage
/// unit, and whether the format stores on/off keys instead of colors.
/// Mirrors the runtime's `PixelDetails` template arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDetails {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
    pub w: u8,
    pub bytes: u8,
    pub pixels: u8,
    pub color_key: bool,
}

const fn details(r: u8, g: u8, b: u8, a: u8, w: u8, bytes: u8, pixels: u8, color_key: bool) -> PixelDetails {
    PixelDetails {
        r,
        g,
        b,
        a,
        w,
        bytes,
        pixels,
        color_key,
    }
}

impl PixelFormat {
    /// Canonical configuration name
    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::A1 => "A1",
            PixelFormat::W1 => "W1",
            PixelFormat::W4 => "W4",
            PixelFormat::W8 => "W8",
            PixelFormat::W8Key => "W8_KEY",
            PixelFormat::Rgb332 => "RGB332",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Rgb565Be => "RGB565_BE",
            PixelFormat::Rgb888 => "RGB888",
            PixelFormat::Rgba4444 => "RGBA4444",
            PixelFormat::Rgba8888 => "RGBA8888",
        }
    }

    /// Runtime pixel type used as template argument
    pub fn cpp_type(self) -> String {
        format!("display::Pixel{}", self.name())
    }

    pub fn details(self) -> PixelDetails {
        match self {
            PixelFormat::A1 => details(0, 0, 0, 1, 0, 1, 8, true),
            PixelFormat::W1 => details(0, 0, 0, 0, 1, 1, 8, true),
            PixelFormat::W4 => details(0, 0, 0, 0, 4, 1, 2, false),
            PixelFormat::W8 => details(0, 0, 0, 0, 8, 1, 1, false),
            PixelFormat::W8Key => details(0, 0, 0, 0, 8, 1, 1, false),
            PixelFormat::Rgb332 => details(3, 3, 2, 0, 0, 1, 1, false),
            PixelFormat::Rgb565 | PixelFormat::Rgb565Be => details(5, 6, 5, 0, 0, 2, 1, false),
            PixelFormat::Rgb888 => details(8, 8, 8, 0, 0, 3, 1, false),
            PixelFormat::Rgba4444 => details(4, 4, 4, 4, 0, 2, 1, false),
            PixelFormat::Rgba8888 => details(8, 8, 8, 8, 0, 4, 1, false),
        }
    }

    /// Bits of storage per pixel
    pub fn bits_per_pixel(self) -> u8 {
        let d = self.details();
        d.bytes * 8 / d.pixels
    }

    /// Returns true if several pixels share one storage unit
    pub fn is_packed(self) -> bool {
        self.details().pixels > 1
    }

    pub fn display_type(self) -> DisplayType {
        let d = self.details();
        if d.r > 0 || d.g > 0 || d.b > 0 {
            DisplayType::Color
        } else if d.w > 1 {
            DisplayType::Grayscale
        } else {
            DisplayType::Binary
        }
    }
}

impl fmt::Display for DisplayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DisplayType::Binary => "binary",
            DisplayType::Grayscale => "grayscale",
            DisplayType::Color => "color",
        })
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for PixelFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_table() {
        for (name, format) in PIXEL_TYPES {
            assert_eq!(format.name(), *name);
            assert_eq!(name.to_uppercase(), *name);
        }
        assert_eq!(PIXEL_TYPES.len(), 11);
    }

    #[test]
    fn test_cpp_type() {
        assert_eq!(PixelFormat::Rgb565.cpp_type(), "display::PixelRGB565");
        assert_eq!(PixelFormat::W8Key.cpp_type(), "display::PixelW8_KEY");
    }

    #[test]
    fn test_display_type() {
        assert_eq!(PixelFormat::Rgb565.display_type(), DisplayType::Color);
        assert_eq!(PixelFormat::Rgba8888.display_type(), DisplayType::Color);
        assert_eq!(PixelFormat::W8.display_type(), DisplayType::Grayscale);
        assert_eq!(PixelFormat::W4.display_type(), DisplayType::Grayscale);
        assert_eq!(PixelFormat::W1.display_type(), DisplayType::Binary);
        assert_eq!(PixelFormat::A1.display_type(), DisplayType::Binary);
    }

    #[test]
    fn test_bits_per_pixel() {
        assert_eq!(PixelFormat::W1.bits_per_pixel(), 1);
        assert_eq!(PixelFormat::W4.bits_per_pixel(), 4);
        assert_eq!(PixelFormat::Rgb565.bits_per_pixel(), 16);
        assert_eq!(PixelFormat::Rgb888.bits_per_pixel(), 24);
        assert!(PixelFormat::W4.is_packed());
        assert!(!PixelFormat::Rgb332.is_packed());
    }

    #[test]
    fn test_color_key_formats() {
        let keyed: Vec<_> = PIXEL_TYPES
            .iter()
            .filter(|(_, f)| f.details().color_key)
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(keyed, ["A1", "W1"]);
        assert_eq!(PixelFormat::W8Key.details(), PixelFormat::W8.details());
    }
}
