// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::color_cache::DEFAULT_COLOR_CACHE_CAPACITY;
use crate::error::Error;

/// Sizing of the glyph cache.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Size of each atlas surface in pixels as `(width, height)`.
    pub atlas_size: (u32, u32),
    /// Smallest atlas cell size. Glyphs below it share this group.
    ///
    /// Must be a power of two.
    pub min_group: u32,
    /// Maximum number of cached color transforms.
    pub color_cache_capacity: usize,
}

impl AtlasConfig {
    /// Checks that the configuration can produce at least one usable atlas cell.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.min_group.is_power_of_two() {
            return Err(Error::invalid_config("min_group must be a power of two"));
        }
        let (width, height) = self.atlas_size;
        if width < self.min_group || height < self.min_group {
            return Err(Error::invalid_config(
                "atlas_size must be at least min_group in both dimensions",
            ));
        }
        // Larger groups have fewer cells, so the smallest one bounds the count.
        if (width / self.min_group)
            .checked_mul(height / self.min_group)
            .is_none()
        {
            return Err(Error::invalid_config(
                "atlas_size has more min_group cells than fit in a u32",
            ));
        }
        if self.color_cache_capacity == 0 {
            return Err(Error::invalid_config(
                "color_cache_capacity must be nonzero",
            ));
        }
        Ok(())
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            atlas_size: (1024, 1024),
            min_group: 32,
            color_cache_capacity: DEFAULT_COLOR_CACHE_CAPACITY,
        }
    }
}
