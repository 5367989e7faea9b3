// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error type for glyph cache and drawing operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the context that is relevant to
/// it: the glyph being processed, a requested surface size, or a static
/// description of a broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The non-exhaustive category describing this error.
    kind: ErrorKind,

    /// The glyph being processed when the error occurred, if any.
    glyph: Option<char>,

    /// A surface size or atlas group, depending on the kind.
    size: Option<(u32, u32)>,

    /// Static detail message.
    detail: Option<&'static str>,
}

impl Error {
    /// Creates an error of the given kind without any context.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            glyph: None,
            size: None,
            detail: None,
        }
    }

    /// A font face failed to rasterize `ch`.
    pub fn rasterization(ch: char) -> Self {
        Self::new(ErrorKind::Rasterization).with_glyph(ch)
    }

    /// A device failed to allocate a `width` x `height` surface.
    pub fn surface_allocation(width: u32, height: u32) -> Self {
        Self {
            size: Some((width, height)),
            ..Self::new(ErrorKind::SurfaceAllocation)
        }
    }

    /// A surface operation failed.
    pub fn surface(detail: &'static str) -> Self {
        Self::new(ErrorKind::Surface).with_detail(detail)
    }

    pub(crate) fn invariant(detail: &'static str) -> Self {
        Self::new(ErrorKind::InvariantViolation).with_detail(detail)
    }

    pub(crate) fn glyph_too_large(ch: char, group: u32) -> Self {
        Self {
            size: Some((group, group)),
            ..Self::new(ErrorKind::GlyphTooLarge).with_glyph(ch)
        }
    }

    pub(crate) fn invalid_config(detail: &'static str) -> Self {
        Self::new(ErrorKind::InvalidConfig).with_detail(detail)
    }

    /// Attaches the glyph that was being processed.
    #[must_use]
    pub fn with_glyph(mut self, ch: char) -> Self {
        self.glyph = Some(ch);
        self
    }

    /// Attaches a static detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: &'static str) -> Self {
        self.detail = Some(detail);
        self
    }

    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The glyph being processed when the error occurred, if known.
    pub fn glyph(&self) -> Option<char> {
        self.glyph
    }

    /// The requested surface size, or the cell size for [`ErrorKind::GlyphTooLarge`].
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Whether this error signals a defect in the cache itself.
    ///
    /// The cache state can no longer be trusted after such an error.
    pub fn is_fatal(&self) -> bool {
        matches!(self.kind, ErrorKind::InvariantViolation)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ErrorKind::InvariantViolation => write!(f, "glyph cache invariant violated")?,
            ErrorKind::Rasterization => write!(f, "failed to rasterize glyph")?,
            ErrorKind::SurfaceAllocation => write!(f, "failed to allocate surface")?,
            ErrorKind::Surface => write!(f, "surface operation failed")?,
            ErrorKind::GlyphTooLarge => write!(f, "glyph does not fit in an atlas")?,
            ErrorKind::InvalidConfig => write!(f, "invalid atlas configuration")?,
        }
        if let Some(ch) = self.glyph {
            write!(f, " for {ch:?} (U+{:04X})", u32::from(ch))?;
        }
        if let Some((w, h)) = self.size {
            write!(f, " ({w}x{h})")?;
        }
        if let Some(detail) = self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The cache detected a broken internal invariant, such as a full atlas
    /// without an eviction candidate.
    InvariantViolation,

    /// The font face could not rasterize a glyph.
    Rasterization,

    /// The device could not allocate a surface.
    SurfaceAllocation,

    /// A surface operation (pixel upload or draw) failed.
    Surface,

    /// The glyph needs a cell larger than the configured atlas.
    GlyphTooLarge,

    /// An [`AtlasConfig`](crate::AtlasConfig) failed validation.
    InvalidConfig,
}
