// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles and keys into the glyph cache tables.

/// Dense handle of a canonical font face within one registry.
///
/// Faces with equal [`FaceKey`](crate::FaceKey)s share one `FaceId`; the first
/// face seen with a given key is the canonical one.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct FaceId(pub(crate) u32);

impl FaceId {
    /// Position of the face in registration order.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of an atlas within one registry.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct AtlasId(pub(crate) u32);

impl AtlasId {
    /// Position of the atlas in creation order.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of one glyph: a canonical face and a character.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct GlyphKey {
    /// Canonical face.
    pub face: FaceId,
    /// Character.
    pub ch: char,
}

impl GlyphKey {
    /// Creates a key.
    #[inline]
    pub fn new(face: FaceId, ch: char) -> Self {
        Self { face, ch }
    }
}
