//! Which conversions exist, keyed on (source, target) format pairs.
//!
//! A [`Registry`] maps each ordered pair of [`PixelFormat`]s to at most one
//! [`Transformation`]. Lookups are exact: there is no fallback and no
//! chaining through an intermediate format.
//!
//! The process-wide registry returned by [`global`] is built once, with the
//! built-ins already present, the first time anything touches it. After that
//! any number of threads may [`resolve`] concurrently; [`register`] takes
//! the write lock.
//!
//! ```rust
//! use rawbitmap::{PixelFormat, Transformation, registry};
//!
//! fn keep_bgr(src: &[u8], dst: &mut [u8]) {
//!     dst.copy_from_slice(&src[..3]);
//!     dst.reverse();
//! }
//!
//! let reg = registry::Registry::with_builtins();
//! reg.register(
//!     PixelFormat::Bgr24,
//!     PixelFormat::Bgr24,
//!     Transformation::per_pixel(keep_bgr),
//! );
//! assert!(reg.contains(PixelFormat::Bgr24, PixelFormat::Bgr24));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::transform::{
    composite_bgra32_to_bgr24, composite_bgra32_to_bgr24_row, identity_bgr24, identity_bgr24_row,
};
use crate::{BitmapError, PixelFormat};

/// Converts one pixel: `src` is exactly one source pixel, `dst` exactly one
/// target pixel.
pub type PixelFn = fn(src: &[u8], dst: &mut [u8]);

/// Converts one row: `src` holds `width` source pixels, `dst` holds `width`
/// target pixels, both without padding.
pub type RowFn = fn(src: &[u8], dst: &mut [u8]);

// ===========================================================================
// Transformation
// ===========================================================================

/// A per-pixel conversion rule, optionally paired with a row kernel.
///
/// The row kernel must produce exactly what the pixel routine produces when
/// applied left to right across the row. The conversion driver uses it when
/// present.
#[derive(Clone, Copy)]
pub struct Transformation {
    pixel: PixelFn,
    row: Option<RowFn>,
}

impl Transformation {
    pub const fn per_pixel(pixel: PixelFn) -> Self {
        Self { pixel, row: None }
    }

    /// Attach a row kernel equivalent to the pixel routine.
    pub const fn with_row(self, row: RowFn) -> Self {
        Self {
            pixel: self.pixel,
            row: Some(row),
        }
    }

    pub fn pixel(&self) -> PixelFn {
        self.pixel
    }

    pub fn row(&self) -> Option<RowFn> {
        self.row
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("has_row_kernel", &self.row.is_some())
            .finish_non_exhaustive()
    }
}

const BUILTINS: [(PixelFormat, PixelFormat, Transformation); 2] = [
    (
        PixelFormat::Bgr24,
        PixelFormat::Bgr24,
        Transformation::per_pixel(identity_bgr24).with_row(identity_bgr24_row),
    ),
    (
        PixelFormat::Bgra32,
        PixelFormat::Bgr24,
        Transformation::per_pixel(composite_bgra32_to_bgr24)
            .with_row(composite_bgra32_to_bgr24_row),
    ),
];

// ===========================================================================
// Registry
// ===========================================================================

type Pair = (PixelFormat, PixelFormat);

/// Mapping from (source, target) format pairs to transformations.
#[derive(Default)]
pub struct Registry {
    entries: RwLock<HashMap<Pair, Transformation>>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in conversions.
    pub fn with_builtins() -> Self {
        let entries = BUILTINS
            .iter()
            .map(|&(source, target, t)| ((source, target), t))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Add or replace the transformation for `source → target`.
    ///
    /// Returns the transformation that was replaced, if any. The last
    /// registration for a pair wins.
    pub fn register(
        &self,
        source: PixelFormat,
        target: PixelFormat,
        transformation: Transformation,
    ) -> Option<Transformation> {
        // Entries are Copy, so a poisoned map is still consistent.
        let previous = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((source, target), transformation);
        if previous.is_some() {
            log::debug!("replaced transformation {source} -> {target}");
        }
        previous
    }

    /// Look up the transformation for exactly `source → target`.
    ///
    /// # Errors
    ///
    /// [`BitmapError::UnsupportedConversion`] if nothing is registered for
    /// the pair.
    pub fn resolve(
        &self,
        source: PixelFormat,
        target: PixelFormat,
    ) -> Result<Transformation, BitmapError> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(source, target))
            .copied()
            .ok_or(BitmapError::UnsupportedConversion { source, target })
    }

    pub fn contains(&self, source: PixelFormat, target: PixelFormat) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(source, target))
    }

    /// Registered (source, target) pairs, in no particular order.
    pub fn pairs(&self) -> Vec<(PixelFormat, PixelFormat)> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("pairs", &self.pairs())
            .finish()
    }
}

// ===========================================================================
// Process-wide registry
// ===========================================================================

static GLOBAL: OnceLock<Registry> = OnceLock::new();

/// The process-wide registry, built with the built-ins on first access.
pub fn global() -> &'static Registry {
    GLOBAL.get_or_init(|| {
        log::trace!("initializing global transformation registry");
        Registry::with_builtins()
    })
}

/// Add or replace a transformation in the process-wide registry.
pub fn register(
    source: PixelFormat,
    target: PixelFormat,
    transformation: Transformation,
) -> Option<Transformation> {
    global().register(source, target, transformation)
}

/// Look up a transformation in the process-wide registry.
pub fn resolve(source: PixelFormat, target: PixelFormat) -> Result<Transformation, BitmapError> {
    global().resolve(source, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zero_fill(_src: &[u8], dst: &mut [u8]) {
        dst.fill(0);
    }

    fn one_fill(_src: &[u8], dst: &mut [u8]) {
        dst.fill(1);
    }

    fn run(t: Transformation) -> [u8; 3] {
        let mut dst = [7u8; 3];
        (t.pixel())(&[5, 5, 5, 5], &mut dst);
        dst
    }

    #[test]
    fn builtins_present() {
        let reg = Registry::with_builtins();
        assert!(reg.contains(PixelFormat::Bgr24, PixelFormat::Bgr24));
        assert!(reg.contains(PixelFormat::Bgra32, PixelFormat::Bgr24));
        assert_eq!(reg.pairs().len(), 2);
    }

    #[test]
    fn resolve_is_exact() {
        let reg = Registry::with_builtins();
        assert_eq!(
            reg.resolve(PixelFormat::Bgr24, PixelFormat::Bgra32).unwrap_err(),
            BitmapError::UnsupportedConversion {
                source: PixelFormat::Bgr24,
                target: PixelFormat::Bgra32,
            }
        );
        assert!(
            reg.resolve(PixelFormat::Bgra32, PixelFormat::Bgra32)
                .is_err()
        );
    }

    #[test]
    fn empty_registry_resolves_nothing() {
        let reg = Registry::new();
        for s in PixelFormat::ALL {
            for t in PixelFormat::ALL {
                assert!(reg.resolve(s, t).is_err());
            }
        }
    }

    #[test]
    fn last_registration_wins() {
        let reg = Registry::new();
        let pair = (PixelFormat::Bgra32, PixelFormat::Bgr24);
        assert!(
            reg.register(pair.0, pair.1, Transformation::per_pixel(zero_fill))
                .is_none()
        );
        let replaced = reg.register(pair.0, pair.1, Transformation::per_pixel(one_fill));
        assert_eq!(replaced.map(run), Some([0, 0, 0]));
        assert_eq!(run(reg.resolve(pair.0, pair.1).unwrap()), [1, 1, 1]);
    }

    #[test]
    fn builtin_row_kernels_attached() {
        let reg = Registry::with_builtins();
        let t = reg.resolve(PixelFormat::Bgra32, PixelFormat::Bgr24).unwrap();
        assert!(t.row().is_some());
        assert_eq!(run(t), [0, 0, 0]);
    }

    #[test]
    fn global_initializes_once_across_threads() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    let reg = global();
                    reg.resolve(PixelFormat::Bgra32, PixelFormat::Bgr24).is_ok()
                        && reg.resolve(PixelFormat::Bgr24, PixelFormat::Bgr24).is_ok()
                        && std::ptr::eq(reg, global())
                })
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
