// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The 2D surface abstraction that atlases live on and text is drawn onto.

use peniko::Compose;
use peniko::kurbo::Affine;

use crate::color_cache::ColorTransform;
use crate::error::Error;

/// Allocates surfaces.
///
/// Usually a thin handle around a GPU device or a software renderer.
pub trait Device {
    /// The surface type produced by this device.
    type Surface: Surface;

    /// Allocates a transparent `width` x `height` surface.
    fn allocate(&mut self, width: u32, height: u32) -> Result<Self::Surface, Error>;
}

/// A 2D image that can be drawn onto and drawn from.
pub trait Surface {
    /// Size in pixels as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Replaces the whole content with premultiplied RGBA8 pixels, row-major.
    ///
    /// `rgba` holds exactly `width * height * 4` bytes.
    fn replace_pixels(&mut self, rgba: &[u8]) -> Result<(), Error>;

    /// Draws `src` onto `self` as described by `op`.
    fn draw_surface(&mut self, src: &Self, op: &DrawOp) -> Result<(), Error>;

    /// Resets every pixel to transparent.
    fn clear(&mut self);
}

/// A pixel rectangle within a surface.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SourceRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Parameters of a single [`Surface::draw_surface`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawOp {
    /// Region of the source to draw; the whole source when `None`.
    ///
    /// The top-left of the region is mapped to the origin before `transform`
    /// is applied.
    pub source: Option<SourceRect>,
    /// Transform from source region space to destination space.
    pub transform: Affine,
    /// Per-channel scale applied to the source pixels.
    pub color: ColorTransform,
    /// How source pixels combine with destination pixels.
    pub compose: Compose,
}

impl DrawOp {
    /// Copies a whole surface to `(x, y)`, replacing the destination pixels.
    pub(crate) fn copy_to(x: u32, y: u32) -> Self {
        Self {
            source: None,
            transform: Affine::translate((f64::from(x), f64::from(y))),
            color: ColorTransform::IDENTITY,
            compose: Compose::Copy,
        }
    }

    /// Blends `source` of the atlas to `(x, y)` with a tint.
    pub(crate) fn blend_region(source: SourceRect, x: f64, y: f64, color: ColorTransform) -> Self {
        Self {
            source: Some(source),
            transform: Affine::translate((x, y)),
            color,
            compose: Compose::SrcOver,
        }
    }
}
