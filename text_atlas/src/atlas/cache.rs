// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-size glyph atlas with LRU cell eviction.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;

use super::key::FaceId;
use super::region::{CellGrid, CellIndex};
use crate::error::Error;
use crate::face::{FontFace, GlyphMask};
use crate::fixed::FixedPoint;
use crate::metrics::{AtlasGroup, GlyphMetrics};
use crate::surface::{Device, DrawOp, SourceRect, Surface};

/// One fixed-size surface holding rasterized glyphs of a single face and group.
///
/// The atlas moves from empty to partially filled to full; once full, every
/// insertion evicts exactly one glyph first, so the number of cached glyphs
/// never exceeds [`capacity`](Self::capacity).
pub struct GlyphAtlas<S> {
    face: FaceId,
    group: AtlasGroup,
    grid: CellGrid,
    /// Backing surface holding all cells.
    surface: S,
    /// Cell-sized surface that glyphs are uploaded to before being copied into
    /// their cell. Allocated on first insertion, cleared after every use.
    scratch: Option<S>,
    /// Cell-sized coverage buffer handed to the face for rasterization.
    mask: GlyphMask,
    /// RGBA staging buffer for the scratch upload.
    staging: Vec<u8>,
    glyphs: HashMap<char, GlyphSlot>,
    /// Insertion counter, used to break ties between equal timestamps.
    sequence: u64,
    evictions: u64,
}

/// Internal cache entry storing the cell and access time of a glyph.
#[derive(Copy, Clone, Debug)]
struct GlyphSlot {
    cell: CellIndex,
    /// Logical time of the last draw that used this glyph.
    last_used: u64,
    sequence: u64,
}

impl<S: Surface> GlyphAtlas<S> {
    /// Creates an empty atlas on `surface`, split into cells of `group` size.
    pub fn new(face: FaceId, group: AtlasGroup, surface: S) -> Result<Self, Error> {
        let (width, height) = surface.size();
        let cell_size = group.size();
        let grid = CellGrid::new(width, height, cell_size)
            .ok_or_else(|| Error::invariant("atlas surface has too many cells"))?;
        if grid.capacity() == 0 {
            return Err(Error::invariant("atlas surface is smaller than one cell"));
        }
        Ok(Self {
            face,
            group,
            grid,
            surface,
            scratch: None,
            mask: GlyphMask::new(cell_size, cell_size),
            staging: Vec::new(),
            glyphs: HashMap::new(),
            sequence: 0,
            evictions: 0,
        })
    }

    /// Looks up a cached glyph, marking it as used at `now`.
    pub fn lookup(&mut self, ch: char, now: u64) -> Option<CellIndex> {
        let slot = self.glyphs.get_mut(&ch)?;
        slot.last_used = now;
        Some(slot.cell)
    }

    /// Rasterizes `ch` into a cell and caches it, evicting the
    /// least-recently-used glyph if the atlas is full.
    ///
    /// Cells are handed out in order until the atlas is full; after that, the
    /// evicted glyph's cell is reused. If rasterization or a surface operation
    /// fails, the set of cached glyphs is left unchanged.
    pub fn insert<D, F>(
        &mut self,
        device: &mut D,
        face: &F,
        ch: char,
        metrics: &GlyphMetrics,
        now: u64,
    ) -> Result<CellIndex, Error>
    where
        D: Device<Surface = S>,
        F: FontFace + ?Sized,
    {
        if metrics.group != Some(self.group) {
            return Err(Error::invariant("glyph group does not match atlas group").with_glyph(ch));
        }

        let (cell, victim) = if self.is_full() {
            let victim = self.lru_victim().ok_or_else(|| {
                Error::invariant("full atlas without eviction candidate").with_glyph(ch)
            })?;
            (self.glyphs[&victim].cell, Some(victim))
        } else {
            (CellIndex(self.len()), None)
        };

        self.render(device, face, ch, metrics, cell)?;

        if let Some(victim) = victim {
            log::debug!(
                "atlas {:?}/{}: evicting {victim:?} from cell {}",
                self.face,
                self.group.size(),
                cell.0
            );
            self.glyphs.remove(&victim);
            self.evictions += 1;
        }
        self.sequence += 1;
        self.glyphs.insert(
            ch,
            GlyphSlot {
                cell,
                last_used: now,
                sequence: self.sequence,
            },
        );
        Ok(cell)
    }

    /// Pixel rectangle of `cell`, for drawing a glyph of `group` from this atlas.
    pub fn source_rect(&self, cell: CellIndex, group: AtlasGroup) -> Result<SourceRect, Error> {
        if group != self.group {
            return Err(Error::invariant("glyph group does not match atlas group"));
        }
        if cell.0 >= self.grid.capacity() {
            return Err(Error::invariant("cell index outside of atlas"));
        }
        Ok(self.grid.rect(cell))
    }

    /// The glyph with the oldest access time; ties go to the oldest insertion.
    fn lru_victim(&self) -> Option<char> {
        self.glyphs
            .iter()
            .min_by_key(|(_, slot)| (slot.last_used, slot.sequence))
            .map(|(ch, _)| *ch)
    }

    /// Rasterizes `ch` through the scratch surface into `cell`.
    fn render<D, F>(
        &mut self,
        device: &mut D,
        face: &F,
        ch: char,
        metrics: &GlyphMetrics,
        cell: CellIndex,
    ) -> Result<(), Error>
    where
        D: Device<Surface = S>,
        F: FontFace + ?Sized,
    {
        let size = self.group.size();
        if self.scratch.is_none() {
            self.scratch = Some(device.allocate(size, size)?);
        }

        // Align the top-left of the ink with the cell origin.
        let dot = FixedPoint::new(-metrics.bounds.min.x, -metrics.bounds.min.y);
        let rasterized = face.rasterize(ch, dot, &mut self.mask);
        if rasterized.is_ok() {
            self.mask.write_rgba(&mut self.staging);
        }
        self.mask.clear();
        rasterized?;

        let (x, y) = self.grid.origin(cell);
        let Some(scratch) = self.scratch.as_mut() else {
            return Err(Error::invariant("scratch surface missing after allocation"));
        };
        let copied = scratch
            .replace_pixels(&self.staging)
            .and_then(|()| self.surface.draw_surface(scratch, &DrawOp::copy_to(x, y)));
        scratch.clear();
        copied
    }

    /// Whether `ch` is cached.
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// The cell holding `ch`, without touching its access time.
    pub fn cell_of(&self, ch: char) -> Option<CellIndex> {
        self.glyphs.get(&ch).map(|slot| slot.cell)
    }

    /// Number of cached glyphs.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "bounded by the cell capacity, which is a u32"
    )]
    #[inline]
    pub fn len(&self) -> u32 {
        self.glyphs.len() as u32
    }

    /// Whether no glyph is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Whether every cell is taken.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Maximum number of cached glyphs.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.grid.capacity()
    }

    /// The size class served by this atlas.
    #[inline]
    pub fn group(&self) -> AtlasGroup {
        self.group
    }

    /// The canonical face served by this atlas.
    #[inline]
    pub fn face(&self) -> FaceId {
        self.face
    }

    /// The backing surface.
    #[inline]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of glyphs evicted so far.
    #[inline]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }
}

impl<S> Debug for GlyphAtlas<S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("face", &self.face)
            .field("group", &self.group)
            .field("grid", &self.grid)
            .field("glyphs", &self.glyphs.len())
            .field("sequence", &self.sequence)
            .field("evictions", &self.evictions)
            .finish_non_exhaustive()
    }
}
