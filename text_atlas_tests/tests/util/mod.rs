// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod device;
mod face;

pub(crate) use device::{Pixmap, SoftwareDevice};
pub(crate) use face::BoxFont;

use text_atlas::color::{AlphaColor, Srgb, palette};
use text_atlas::{AtlasConfig, TextRenderer};

pub(crate) const BLACK: AlphaColor<Srgb> = palette::css::BLACK;

/// A renderer on a fresh software device, and a blank target to draw onto.
pub(crate) fn setup() -> (TextRenderer<SoftwareDevice>, Pixmap) {
    setup_with(AtlasConfig::default())
}

/// Like [`setup`], with a custom configuration.
pub(crate) fn setup_with(config: AtlasConfig) -> (TextRenderer<SoftwareDevice>, Pixmap) {
    let renderer = TextRenderer::with_config(SoftwareDevice::default(), config).unwrap();
    (renderer, target())
}

/// A blank 128x64 target.
pub(crate) fn target() -> Pixmap {
    Pixmap::blank(128, 64)
}

/// Atlases of 64x64 pixels: four 32px cells each.
pub(crate) fn tiny_atlases() -> AtlasConfig {
    AtlasConfig {
        atlas_size: (64, 64),
        ..AtlasConfig::default()
    }
}
