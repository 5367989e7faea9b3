// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 26.6 fixed-point units used for glyph metrics and pen positions.

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub};

/// Number of fractional bits.
const SHIFT: u32 = 6;

/// Subpixel units per pixel.
const ONE: i32 = 1 << SHIFT;

/// A signed 26.6 fixed-point value: 26 integer bits and 6 fractional bits.
///
/// One pixel is 64 units, which matches the convention used by `FreeType` and
/// most font rasterizers. Arithmetic wraps on overflow.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(pub i32);

impl Fixed {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Converts a whole number of pixels, discarding the top six bits.
    #[inline]
    pub const fn from_int(px: i32) -> Self {
        Self(px << SHIFT)
    }

    /// The raw value in 1/64th pixel units.
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// The smallest whole number of pixels that is not less than `self`.
    #[inline]
    pub const fn ceil(self) -> i32 {
        self.0.wrapping_add(ONE - 1) >> SHIFT
    }

    /// The largest whole number of pixels that is not greater than `self`.
    #[inline]
    pub const fn floor(self) -> i32 {
        self.0 >> SHIFT
    }

    /// Converts to a floating-point number of pixels.
    #[inline]
    pub fn to_f64(self) -> f64 {
        f64::from(self.0) / f64::from(ONE)
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.wrapping_add(rhs.0);
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl fmt::Debug for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Print as `whole:frac`, e.g. `12:32` for 12.5px.
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}:{:02}", abs >> SHIFT, abs & (ONE as u32 - 1))
    }
}

/// A point in 26.6 fixed-point coordinates.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct FixedPoint {
    /// Horizontal coordinate.
    pub x: Fixed,
    /// Vertical coordinate, growing downwards.
    pub y: Fixed,
}

impl FixedPoint {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: Fixed, y: Fixed) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in 26.6 fixed-point coordinates.
///
/// For glyph ink bounds, `min` is the top-left corner relative to the glyph
/// origin (the dot), so `min.y` is negative for glyphs above the baseline.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct FixedRect {
    /// Top-left corner.
    pub min: FixedPoint,
    /// Bottom-right corner (exclusive).
    pub max: FixedPoint,
}

impl FixedRect {
    /// Creates a rectangle from its corners.
    #[inline]
    pub const fn new(min: FixedPoint, max: FixedPoint) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle from whole-pixel edges.
    pub const fn from_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: FixedPoint::new(Fixed::from_int(x0), Fixed::from_int(y0)),
            max: FixedPoint::new(Fixed::from_int(x1), Fixed::from_int(y1)),
        }
    }

    /// Width of the rectangle.
    #[inline]
    pub fn width(&self) -> Fixed {
        self.max.x - self.min.x
    }

    /// Height of the rectangle.
    #[inline]
    pub fn height(&self) -> Fixed {
        self.max.y - self.min.y
    }

    /// Whether the rectangle has no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == Fixed::ZERO || self.height() == Fixed::ZERO
    }
}
