// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph atlases: fixed-size surfaces split into equal cells.
//!
//! Each [`GlyphAtlas`] serves one canonical face and one [`AtlasGroup`]:
//! - Cells are `group x group` pixels and are filled in order `0, 1, 2, ...`
//! - Once every cell is taken, the least-recently-used glyph gives up its cell
//! - Glyphs are rasterized through a scratch surface and copied into their cell
//!
//! [`AtlasGroup`]: crate::AtlasGroup

pub(crate) mod cache;
pub(crate) mod key;
mod region;

pub use cache::GlyphAtlas;
pub use key::{AtlasId, FaceId, GlyphKey};
pub use region::CellIndex;
pub(crate) use region::CellGrid;
