// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing text runs through the glyph cache.

use std::sync::{Mutex, MutexGuard};

use peniko::color::{AlphaColor, Srgb};
use smallvec::SmallVec;

use crate::color_cache::{ColorTransform, Rgba16};
use crate::config::AtlasConfig;
use crate::error::Error;
use crate::face::FontFace;
use crate::fixed::Fixed;
use crate::registry::{CacheStats, GlyphCacheRegistry};
use crate::surface::{Device, DrawOp, Surface};

/// Draws text onto surfaces, caching rasterized glyphs in atlases.
///
/// All cache state is behind one lock, so a renderer can be shared between
/// threads; concurrent draws are serialized.
#[derive(Debug)]
pub struct TextRenderer<D: Device> {
    registry: Mutex<GlyphCacheRegistry<D>>,
}

impl<D: Device> TextRenderer<D> {
    /// Creates a renderer with the default [`AtlasConfig`].
    pub fn new(device: D) -> Self {
        Self {
            registry: Mutex::new(GlyphCacheRegistry::new(device)),
        }
    }

    /// Creates a renderer with a custom configuration.
    pub fn with_config(device: D, config: AtlasConfig) -> Result<Self, Error> {
        Ok(Self {
            registry: Mutex::new(GlyphCacheRegistry::with_config(device, config)?),
        })
    }

    /// The configuration of this renderer.
    pub fn config(&self) -> Result<AtlasConfig, Error> {
        Ok(*self.lock()?.config())
    }

    /// Draws `text` onto `dst` with the glyph origin of the first character
    /// at `(x, y)`, `y` being the baseline.
    ///
    /// Returns the pen position after the last glyph, including its advance.
    /// Drawing with a fully transparent color does nothing and returns `x`.
    ///
    /// Text is drawn left to right, one glyph per `char`, with kerning
    /// between neighbours. No shaping is performed.
    pub fn draw<F: FontFace + ?Sized>(
        &self,
        dst: &mut D::Surface,
        text: &str,
        face: &F,
        x: i32,
        y: i32,
        color: AlphaColor<Srgb>,
    ) -> Result<Fixed, Error> {
        let mut pen = Fixed::from_int(x);
        let color = Rgba16::from_color(color);
        if color.is_transparent() {
            return Ok(pen);
        }
        let baseline = Fixed::from_int(y);

        let mut registry = self.lock()?;
        let now = registry.tick();
        let runes: SmallVec<[char; 32]> = text.chars().collect();
        let mut tint: Option<ColorTransform> = None;

        for (i, &ch) in runes.iter().enumerate() {
            if i > 0 {
                pen += face.kern(runes[i - 1], ch);
            }
            let glyph = registry.resolve(face, ch, now)?;
            if let (Some((atlas_id, cell)), Some(group)) = (glyph.slot, glyph.metrics.group) {
                let transform = match tint {
                    Some(transform) => transform,
                    None => *tint.insert(registry.color_transform(color, now)?),
                };
                let atlas = registry.atlas(atlas_id).ok_or_else(|| {
                    Error::invariant("resolved glyph refers to a missing atlas").with_glyph(ch)
                })?;
                let source = atlas.source_rect(cell, group)?;
                let min = glyph.metrics.bounds.min;
                let op = DrawOp::blend_region(
                    source,
                    (pen + min.x).to_f64(),
                    (baseline + min.y).to_f64(),
                    transform,
                );
                dst.draw_surface(atlas.surface(), &op)?;
            }
            pen += glyph.metrics.advance;
        }
        Ok(pen)
    }

    /// Get a snapshot of the cache statistics.
    pub fn stats(&self) -> Result<CacheStats, Error> {
        Ok(self.lock()?.stats())
    }

    /// Reset the hit, miss, eviction and draw counters.
    pub fn clear_stats(&self) -> Result<(), Error> {
        self.lock()?.clear_stats();
        Ok(())
    }

    /// A panic while the lock was held may have left the cache half-updated,
    /// so poisoning is reported rather than recovered from.
    fn lock(&self) -> Result<MutexGuard<'_, GlyphCacheRegistry<D>>, Error> {
        self.registry
            .lock()
            .map_err(|_| Error::invariant("glyph cache lock poisoned"))
    }
}
