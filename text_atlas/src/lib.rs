// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text Atlas draws text onto a rendering surface through a glyph rasterization
//! cache, so that glyphs are not re-rasterized every frame and GPU memory stays bounded.
//!
//! Glyphs are grouped into power-of-two size classes ([`AtlasGroup`]). Each
//! `(face, size class)` pair owns one fixed-size [`GlyphAtlas`] that is split
//! into equal cells; when an atlas is full the least-recently-used glyph gives
//! up its cell. Tint transforms for colors are cached the same way in a small
//! [`ColorTransformCache`].
//!
//! Font parsing and rasterization live behind [`FontFace`], and the 2D image
//! abstraction lives behind [`Device`] and [`Surface`]. The entry point is
//! [`TextRenderer::draw`]:
//!
//! ```ignore
//! let renderer = TextRenderer::new(device);
//! let pen_x = renderer.draw(&mut target, "Hello", &face, 10, 24, color)?;
//! ```
//!
//! All cache state lives inside one [`TextRenderer`] and is guarded by a single
//! lock, so the renderer can be shared between threads.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use peniko::{color, kurbo};

pub mod atlas;
mod color_cache;
mod config;
mod draw;
mod error;
mod face;
mod fixed;
mod metrics;
mod registry;
mod surface;


pub use atlas::{AtlasId, CellIndex, FaceId, GlyphAtlas, GlyphKey};
pub use color_cache::{ColorTransform, ColorTransformCache, Rgba16};
pub use config::AtlasConfig;
pub use draw::TextRenderer;
pub use error::{Error, ErrorKind};
pub use face::{FaceKey, FontFace, GlyphMask};
pub use fixed::{Fixed, FixedPoint, FixedRect};
pub use metrics::{AtlasGroup, GlyphMetrics, MetricsCache};
pub use registry::{CacheStats, GlyphCacheRegistry, ResolvedGlyph};
pub use surface::{Device, DrawOp, SourceRect, Surface};
