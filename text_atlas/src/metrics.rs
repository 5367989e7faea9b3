// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph metrics and atlas size classes.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::atlas::{FaceId, GlyphKey};
use crate::face::FontFace;
use crate::fixed::{Fixed, FixedRect};

/// Power-of-two size class of a glyph, in pixels.
///
/// All glyphs of one face in the same group share an atlas whose cells are
/// `group x group` pixels.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AtlasGroup(u32);

impl AtlasGroup {
    /// The group for a glyph whose ink is `width` x `height`.
    ///
    /// This is the smallest power of two that fits the larger dimension, but
    /// never less than `min_group` so that typical text sizes share one atlas.
    pub fn for_size(width: Fixed, height: Fixed, min_group: u32) -> Self {
        let extent = width.ceil().max(height.ceil());
        match u32::try_from(extent) {
            Ok(extent) if extent >= min_group => Self(extent.next_power_of_two()),
            _ => Self(min_group),
        }
    }

    /// Cell edge length in pixels.
    #[inline]
    pub fn size(self) -> u32 {
        self.0
    }
}

/// Size and placement of one glyph.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GlyphMetrics {
    /// Ink bounds relative to the glyph origin.
    pub bounds: FixedRect,
    /// Horizontal advance.
    pub advance: Fixed,
    /// Atlas group, or `None` when the glyph has no ink.
    pub group: Option<AtlasGroup>,
}

impl GlyphMetrics {
    /// Queries `face` for the metrics of `ch`.
    pub fn measure<F: FontFace + ?Sized>(face: &F, ch: char, min_group: u32) -> Self {
        let bounds = face.glyph_bounds(ch);
        let advance = face.glyph_advance(ch);
        let group = if bounds.is_empty() {
            None
        } else {
            Some(AtlasGroup::for_size(
                bounds.width(),
                bounds.height(),
                min_group,
            ))
        };
        Self {
            bounds,
            advance,
            group,
        }
    }

    /// Whether the glyph has no ink (e.g. a space).
    ///
    /// Empty glyphs still advance the pen but never occupy an atlas cell.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.group.is_none()
    }
}

/// Memoized glyph metrics.
///
/// Entries are never evicted: the table is bounded by the glyphs actually
/// drawn, and measuring again would cost a round-trip to the face.
pub struct MetricsCache {
    entries: HashMap<GlyphKey, GlyphMetrics>,
    min_group: u32,
}

impl MetricsCache {
    /// Creates an empty cache that assigns groups of at least `min_group`.
    pub fn new(min_group: u32) -> Self {
        Self {
            entries: HashMap::new(),
            min_group,
        }
    }

    /// Returns the metrics of `ch` in the canonical face `face_id`, measuring
    /// them with `face` on first use.
    pub fn get<F: FontFace + ?Sized>(&mut self, face_id: FaceId, face: &F, ch: char) -> GlyphMetrics {
        match self.entries.entry(GlyphKey::new(face_id, ch)) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => *entry.insert(GlyphMetrics::measure(face, ch, self.min_group)),
        }
    }

    /// Number of memoized glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been measured yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Debug for MetricsCache {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MetricsCache")
            .field("entries", &self.entries.len())
            .field("min_group", &self.min_group)
            .finish()
    }
}
