// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The font face abstraction consumed by the glyph cache.

use core::hash::{BuildHasher, Hash};

use foldhash::fast::FixedState;

use crate::error::Error;
use crate::fixed::{Fixed, FixedPoint, FixedRect};

/// Seed for content-derived face keys. Fixed so that keys are reproducible.
const FACE_KEY_SEED: u64 = 0x7465_7874_6174_6c73;

/// Cache identity of a font face.
///
/// Two faces that would rasterize every glyph identically (same font data,
/// same size, same hinting, ...) must report the same key, even if they are
/// distinct values. The cache then shares one family of atlases between them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FaceKey(pub u64);

impl FaceKey {
    /// Derives a key from the structural content of a face description.
    ///
    /// Equal content always yields equal keys within a build of this crate.
    pub fn from_content<T: Hash + ?Sized>(content: &T) -> Self {
        Self(FixedState::with_seed(FACE_KEY_SEED).hash_one(content))
    }
}

/// A font face at a fixed size, as seen by the glyph cache.
///
/// All metrics are in 26.6 fixed-point pixels, relative to the glyph origin
/// (the dot on the baseline), with `y` growing downwards.
pub trait FontFace {
    /// Identity used to share cache entries between equivalent faces.
    ///
    /// Faces with equal keys must report identical metrics and rasterize
    /// identically: a glyph cached through one of them is drawn for all.
    fn face_key(&self) -> FaceKey;

    /// Ink bounds of `ch`. Whitespace and other invisible glyphs return an
    /// empty rectangle.
    fn glyph_bounds(&self, ch: char) -> FixedRect;

    /// Horizontal advance of `ch`.
    fn glyph_advance(&self, ch: char) -> Fixed;

    /// Kerning adjustment between `prev` and `ch`.
    fn kern(&self, prev: char, ch: char) -> Fixed;

    /// Rasterizes `ch` into `mask` with the glyph origin placed at `dot`.
    ///
    /// Coverage outside of the mask must be clipped. The cache places `dot`
    /// so that the top-left of the ink bounds lands on the mask origin.
    fn rasterize(&self, ch: char, dot: FixedPoint, mask: &mut GlyphMask) -> Result<(), Error>;
}

impl<T: FontFace + ?Sized> FontFace for &T {
    fn face_key(&self) -> FaceKey {
        (**self).face_key()
    }

    fn glyph_bounds(&self, ch: char) -> FixedRect {
        (**self).glyph_bounds(ch)
    }

    fn glyph_advance(&self, ch: char) -> Fixed {
        (**self).glyph_advance(ch)
    }

    fn kern(&self, prev: char, ch: char) -> Fixed {
        (**self).kern(prev, ch)
    }

    fn rasterize(&self, ch: char, dot: FixedPoint, mask: &mut GlyphMask) -> Result<(), Error> {
        (**self).rasterize(ch, dot, mask)
    }
}

/// An 8-bit coverage bitmap that a [`FontFace`] rasterizes into.
#[derive(Clone, PartialEq, Eq)]
pub struct GlyphMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GlyphMask {
    /// Creates a fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage values, row-major.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable coverage values, row-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Coverage at `(x, y)`, or `None` outside of the mask.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// Sets the coverage at `(x, y)`. Writes outside of the mask are ignored.
    pub fn set(&mut self, x: u32, y: u32, coverage: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        if let Some(px) = self.data.get_mut((y * self.width + x) as usize) {
            *px = coverage;
        }
    }

    /// Resets all coverage to zero.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Writes the mask as white, premultiplied RGBA8 into `rgba`, resizing it as needed.
    pub(crate) fn write_rgba(&self, rgba: &mut Vec<u8>) {
        rgba.clear();
        rgba.reserve(self.data.len() * 4);
        for &c in &self.data {
            rgba.extend_from_slice(&[c, c, c, c]);
        }
    }
}

impl core::fmt::Debug for GlyphMask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphMask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("covered", &self.data.iter().filter(|&&c| c != 0).count())
            .finish()
    }
}
