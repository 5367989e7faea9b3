// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded LRU cache of tint transforms, keyed by color.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use peniko::color::{AlphaColor, Srgb};

use crate::error::Error;

/// Default number of cached color transforms.
pub(crate) const DEFAULT_COLOR_CACHE_CAPACITY: usize = 256;

/// A color as premultiplied 16-bit channels.
///
/// This is the cache key for [`ColorTransformCache`]; colors that quantize to
/// the same value share one transform.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, Debug)]
pub struct Rgba16 {
    /// Premultiplied red.
    pub r: u16,
    /// Premultiplied green.
    pub g: u16,
    /// Premultiplied blue.
    pub b: u16,
    /// Alpha.
    pub a: u16,
}

impl Rgba16 {
    /// Premultiplies and quantizes a color.
    pub fn from_color(color: AlphaColor<Srgb>) -> Self {
        let [r, g, b, a] = color.premultiply().components;
        Self {
            r: quantize(r),
            g: quantize(g),
            b: quantize(b),
            a: quantize(a),
        }
    }

    /// Whether drawing with this color would have no visible effect.
    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is clamped to [0, 65535] before the cast"
)]
#[inline]
fn quantize(c: f32) -> u16 {
    (c.clamp(0.0, 1.0) * 65535.0).round() as u16
}

/// Per-channel scale that tints a white glyph bitmap.
///
/// Glyph masks are stored in atlases as white premultiplied pixels, so scaling
/// each channel by the un-premultiplied color and alpha by the alpha yields the
/// tinted glyph.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ColorTransform {
    /// Scale for the red, green, blue and alpha channels.
    pub scale: [f32; 4],
}

impl ColorTransform {
    /// Leaves pixels unchanged.
    pub const IDENTITY: Self = Self {
        scale: [1.0, 1.0, 1.0, 1.0],
    };

    /// Computes the transform for a premultiplied color: `(r/a, g/a, b/a, a)`.
    ///
    /// A fully transparent color yields a transform that erases everything.
    pub fn from_premultiplied(color: Rgba16) -> Self {
        if color.is_transparent() {
            return Self { scale: [0.0; 4] };
        }
        let a = f32::from(color.a);
        Self {
            scale: [
                f32::from(color.r) / a,
                f32::from(color.g) / a,
                f32::from(color.b) / a,
                a / f32::from(u16::MAX),
            ],
        }
    }
}

impl Default for ColorTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

struct ColorEntry {
    transform: ColorTransform,
    last_used: u64,
    /// Insertion order, used to break ties between equal timestamps.
    sequence: u64,
}

/// LRU cache mapping colors to [`ColorTransform`]s.
///
/// Kept small so eviction can be a linear scan. Computing a transform is
/// cheap, but it happens once per glyph draw, so it's still worth caching.
pub struct ColorTransformCache {
    entries: HashMap<Rgba16, ColorEntry>,
    capacity: usize,
    sequence: u64,
}

impl ColorTransformCache {
    /// Creates an empty cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            sequence: 0,
        }
    }

    /// Returns the transform for `color`, marking it as used at `now`.
    ///
    /// On a miss with a full cache, the least-recently-used entry is evicted
    /// first.
    pub fn get(&mut self, color: Rgba16, now: u64) -> Result<ColorTransform, Error> {
        if let Some(entry) = self.entries.get_mut(&color) {
            entry.last_used = now;
            return Ok(entry.transform);
        }

        if self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, e)| (e.last_used, e.sequence))
                .map(|(key, _)| *key)
                .ok_or_else(|| Error::invariant("full color cache without eviction candidate"))?;
            log::trace!("color cache: evicting {oldest:?}");
            self.entries.remove(&oldest);
        }

        let transform = ColorTransform::from_premultiplied(color);
        self.sequence += 1;
        self.entries.insert(
            color,
            ColorEntry {
                transform,
                last_used: now,
                sequence: self.sequence,
            },
        );
        Ok(transform)
    }

    /// Whether `color` currently has a cached transform.
    pub fn contains(&self, color: Rgba16) -> bool {
        self.entries.contains_key(&color)
    }

    /// Number of cached transforms.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of cached transforms.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.sequence = 0;
    }
}

impl Default for ColorTransformCache {
    fn default() -> Self {
        Self::new(DEFAULT_COLOR_CACHE_CAPACITY)
    }
}

impl Debug for ColorTransformCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ColorTransformCache")
            .field("entries", &self.entries.len())
            .field("capacity", &self.capacity)
            .field("sequence", &self.sequence)
            .finish()
    }
}
