use core::fmt;

/// In-memory pixel layout.
///
/// Channels are listed in memory order, so [`Bgra32`](Self::Bgra32) as
/// `[u8; 4]` is `[blue, green, red, alpha]`. This matches the native
/// little-endian 32bpp layout of Windows and most other desktop surfaces.
///
/// Equality is structural: any two `Bgr24` values are equal, and a 3-byte
/// layout never equals a 4-byte one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 24bpp, 8 bits each of B/G/R.
    Bgr24,
    /// 32bpp, 8 bits each of B/G/R/A. Straight (not premultiplied) alpha.
    Bgra32,
}

impl PixelFormat {
    /// Every known layout.
    pub const ALL: [PixelFormat; 2] = [PixelFormat::Bgr24, PixelFormat::Bgra32];

    /// Size of one pixel in bytes.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Bgr24 => 3,
            PixelFormat::Bgra32 => 4,
        }
    }

    /// Whether the last byte of each pixel is an alpha channel.
    #[inline]
    pub const fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Bgra32)
    }

    pub const fn name(self) -> &'static str {
        match self {
            PixelFormat::Bgr24 => "Bgr24",
            PixelFormat::Bgra32 => "Bgra32",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of(f: PixelFormat) -> u64 {
        let mut h = DefaultHasher::new();
        f.hash(&mut h);
        h.finish()
    }

    #[test]
    fn bytes_per_pixel() {
        assert_eq!(PixelFormat::Bgr24.bytes_per_pixel(), 3);
        assert_eq!(PixelFormat::Bgra32.bytes_per_pixel(), 4);
    }

    #[test]
    fn equality_is_structural() {
        let a = PixelFormat::Bgr24;
        let b = PixelFormat::ALL[0];
        assert_eq!(a, b);
        assert_eq!(hash_of(a), hash_of(b));
        assert_ne!(PixelFormat::Bgr24, PixelFormat::Bgra32);
    }

    #[test]
    fn alpha_and_names() {
        assert!(PixelFormat::Bgra32.has_alpha());
        assert!(!PixelFormat::Bgr24.has_alpha());
        assert_eq!(PixelFormat::Bgra32.to_string(), "Bgra32");
    }
}
