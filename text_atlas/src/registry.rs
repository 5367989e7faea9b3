// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ownership of every atlas, metric and color cached for one renderer.

use core::fmt::{Debug, Formatter};

use hashbrown::HashMap;

use crate::atlas::{AtlasId, CellIndex, FaceId, GlyphAtlas};
use crate::color_cache::{ColorTransform, ColorTransformCache, Rgba16};
use crate::config::AtlasConfig;
use crate::error::Error;
use crate::face::{FaceKey, FontFace};
use crate::metrics::{AtlasGroup, GlyphMetrics, MetricsCache};
use crate::surface::Device;

/// A glyph ready to be drawn.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ResolvedGlyph {
    /// Metrics of the glyph.
    pub metrics: GlyphMetrics,
    /// Atlas and cell holding the glyph, or `None` for glyphs without ink.
    pub slot: Option<(AtlasId, CellIndex)>,
}

/// Statistics about the glyph cache.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct CacheStats {
    /// Number of canonical faces seen.
    pub faces: usize,
    /// Number of atlases allocated.
    pub atlases: usize,
    /// Number of glyphs currently held in atlases.
    pub glyphs: usize,
    /// Number of atlas lookups that found the glyph since the last `clear_stats()`.
    pub hits: u64,
    /// Number of glyphs rasterized since the last `clear_stats()`.
    pub misses: u64,
    /// Number of glyphs evicted since the last `clear_stats()`.
    pub evictions: u64,
    /// Number of cached color transforms.
    pub color_entries: usize,
    /// Number of draws since the last `clear_stats()`.
    pub draws: u64,
}

/// The glyph cache tables of one renderer.
///
/// Faces are canonicalised by [`FaceKey`], so equal fonts loaded twice share
/// their atlases. A glyph is measured and rasterized by whichever face first
/// misses it; later faces with the same key reuse the result. Atlases are created lazily, one per
/// `(face, group)`, and live as long as the registry.
pub struct GlyphCacheRegistry<D: Device> {
    device: D,
    config: AtlasConfig,
    faces: HashMap<FaceKey, FaceId>,
    metrics: MetricsCache,
    /// Atlas arena, indexed by [`AtlasId`].
    atlases: Vec<GlyphAtlas<D::Surface>>,
    atlas_index: HashMap<(FaceId, AtlasGroup), AtlasId>,
    colors: ColorTransformCache,
    /// Logical time of the current draw.
    clock: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
    draws: u64,
}

impl<D: Device> GlyphCacheRegistry<D> {
    /// Creates an empty registry with the default configuration.
    pub fn new(device: D) -> Self {
        Self::build(device, AtlasConfig::default())
    }

    /// Creates an empty registry, validating `config` first.
    pub fn with_config(device: D, config: AtlasConfig) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self::build(device, config))
    }

    fn build(device: D, config: AtlasConfig) -> Self {
        Self {
            device,
            config,
            faces: HashMap::new(),
            metrics: MetricsCache::new(config.min_group),
            atlases: Vec::new(),
            atlas_index: HashMap::new(),
            colors: ColorTransformCache::new(config.color_cache_capacity),
            clock: 0,
            hits: 0,
            misses: 0,
            evictions: 0,
            draws: 0,
        }
    }

    /// Returns the canonical id of `face`, registering it if its key is new.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "a registry never sees more than u32::MAX faces"
    )]
    pub fn canonical_face<F: FontFace + ?Sized>(&mut self, face: &F) -> FaceId {
        let key = face.face_key();
        let next = FaceId(self.faces.len() as u32);
        *self.faces.entry(key).or_insert_with(|| {
            log::debug!("registered face {key:?} as {next:?}");
            next
        })
    }

    /// Advances the logical clock and returns the new time.
    ///
    /// Called once per draw, so every glyph of one draw shares a timestamp.
    pub fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.draws += 1;
        self.clock
    }

    /// Finds `ch` of `face` in its atlas, rasterizing it on a miss.
    ///
    /// Glyphs without ink are resolved from their metrics alone and never
    /// touch an atlas.
    pub fn resolve<F: FontFace + ?Sized>(
        &mut self,
        face: &F,
        ch: char,
        now: u64,
    ) -> Result<ResolvedGlyph, Error> {
        let face_id = self.canonical_face(face);
        let metrics = self.metrics.get(face_id, face, ch);
        let Some(group) = metrics.group else {
            return Ok(ResolvedGlyph {
                metrics,
                slot: None,
            });
        };

        let (width, height) = self.config.atlas_size;
        if group.size() > width || group.size() > height {
            return Err(Error::glyph_too_large(ch, group.size()));
        }

        let id = self.atlas_or_create(face_id, group)?;
        let atlas = &mut self.atlases[id.index()];
        let cell = match atlas.lookup(ch, now) {
            Some(cell) => {
                self.hits += 1;
                cell
            }
            None => {
                let evicted = atlas.evictions();
                let cell = atlas.insert(&mut self.device, face, ch, &metrics, now)?;
                self.misses += 1;
                self.evictions += atlas.evictions() - evicted;
                cell
            }
        };
        Ok(ResolvedGlyph {
            metrics,
            slot: Some((id, cell)),
        })
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "atlases are bounded by faces times groups"
    )]
    fn atlas_or_create(&mut self, face: FaceId, group: AtlasGroup) -> Result<AtlasId, Error> {
        if let Some(id) = self.atlas_index.get(&(face, group)) {
            return Ok(*id);
        }
        let (width, height) = self.config.atlas_size;
        let surface = self.device.allocate(width, height)?;
        let atlas = GlyphAtlas::new(face, group, surface)?;
        let id = AtlasId(self.atlases.len() as u32);
        log::debug!(
            "created atlas {id:?} for {face:?} with {} cells of {}px",
            atlas.capacity(),
            group.size()
        );
        self.atlases.push(atlas);
        self.atlas_index.insert((face, group), id);
        Ok(id)
    }

    /// Returns the transform tinting glyphs with `color`.
    pub fn color_transform(&mut self, color: Rgba16, now: u64) -> Result<ColorTransform, Error> {
        self.colors.get(color, now)
    }

    /// The atlas with the given id.
    pub fn atlas(&self, id: AtlasId) -> Option<&GlyphAtlas<D::Surface>> {
        self.atlases.get(id.index())
    }

    /// The atlas serving `group` of `face`, if it has been created.
    pub fn atlas_for(&self, face: FaceId, group: AtlasGroup) -> Option<AtlasId> {
        self.atlas_index.get(&(face, group)).copied()
    }

    /// Number of canonical faces.
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of atlases.
    pub fn atlas_count(&self) -> usize {
        self.atlases.len()
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// The device atlases are allocated from.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Get a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            faces: self.faces.len(),
            atlases: self.atlases.len(),
            glyphs: self.atlases.iter().map(|atlas| atlas.len() as usize).sum(),
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            color_entries: self.colors.len(),
            draws: self.draws,
        }
    }

    /// Reset the hit, miss, eviction and draw counters.
    pub fn clear_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
        self.evictions = 0;
        self.draws = 0;
    }
}

impl<D: Device> Debug for GlyphCacheRegistry<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GlyphCacheRegistry")
            .field("config", &self.config)
            .field("faces", &self.faces.len())
            .field("metrics", &self.metrics)
            .field("atlases", &self.atlases)
            .field("colors", &self.colors)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
