// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A software surface implementation with RGBA8 pixel buffers.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use peniko::Compose;
use text_atlas::{Device, DrawOp, Error, SourceRect, Surface};

/// Counts of the surface operations performed through one device.
#[derive(Debug, Default)]
pub(crate) struct DeviceStats {
    allocations: AtomicUsize,
    copies: AtomicUsize,
    blends: AtomicUsize,
}

impl DeviceStats {
    /// Surfaces allocated through the device, targets excluded.
    pub(crate) fn allocations(&self) -> usize {
        self.allocations.load(Ordering::Relaxed)
    }

    /// `Compose::Copy` draws, i.e. glyph uploads into atlas cells.
    pub(crate) fn copies(&self) -> usize {
        self.copies.load(Ordering::Relaxed)
    }

    /// `Compose::SrcOver` draws, i.e. glyphs drawn onto targets.
    pub(crate) fn blends(&self) -> usize {
        self.blends.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Default)]
pub(crate) struct SoftwareDevice {
    stats: Arc<DeviceStats>,
    allocation_limit: Option<usize>,
}

impl SoftwareDevice {
    /// A device that fails every allocation after the first `limit`.
    pub(crate) fn with_allocation_limit(limit: usize) -> Self {
        Self {
            allocation_limit: Some(limit),
            ..Self::default()
        }
    }

    pub(crate) fn stats(&self) -> Arc<DeviceStats> {
        Arc::clone(&self.stats)
    }
}

impl Device for SoftwareDevice {
    type Surface = Pixmap;

    fn allocate(&mut self, width: u32, height: u32) -> Result<Pixmap, Error> {
        if self
            .allocation_limit
            .is_some_and(|limit| self.stats.allocations() >= limit)
        {
            return Err(Error::surface_allocation(width, height));
        }
        self.stats.allocations.fetch_add(1, Ordering::Relaxed);
        Ok(Pixmap::new(width, height, Arc::clone(&self.stats)))
    }
}

/// Premultiplied RGBA8 pixels, row-major.
#[derive(Debug)]
pub(crate) struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
    stats: Arc<DeviceStats>,
}

impl Pixmap {
    /// A transparent surface to draw text onto, not owned by any device.
    pub(crate) fn blank(width: u32, height: u32) -> Self {
        Self::new(width, height, Arc::default())
    }

    fn new(width: u32, height: u32, stats: Arc<DeviceStats>) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width * height * 4) as usize],
            stats,
        }
    }

    pub(crate) fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * self.width + x) * 4) as usize;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Smallest rectangle `(x0, y0, x1, y1)` containing every visible pixel.
    pub(crate) fn ink_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                if self.pixel(x, y)[3] == 0 {
                    continue;
                }
                bounds = Some(match bounds {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                });
            }
        }
        bounds
    }

    pub(crate) fn is_blank(&self) -> bool {
        self.data.iter().all(|&c| c == 0)
    }
}

impl Surface for Pixmap {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn replace_pixels(&mut self, rgba: &[u8]) -> Result<(), Error> {
        if rgba.len() != self.data.len() {
            return Err(Error::surface("pixel buffer size mismatch"));
        }
        self.data.copy_from_slice(rgba);
        Ok(())
    }

    fn draw_surface(&mut self, src: &Self, op: &DrawOp) -> Result<(), Error> {
        let [a, b, c, d, e, f] = op.transform.as_coeffs();
        if a != 1.0 || b != 0.0 || c != 0.0 || d != 1.0 {
            return Err(Error::surface("only translations are supported"));
        }
        let rect = op.source.unwrap_or(SourceRect {
            x: 0,
            y: 0,
            width: src.width,
            height: src.height,
        });
        if rect.x + rect.width > src.width || rect.y + rect.height > src.height {
            return Err(Error::surface("source rectangle outside of source"));
        }
        // Counted on the source, which is always a device surface.
        match op.compose {
            Compose::Copy => src.stats.copies.fetch_add(1, Ordering::Relaxed),
            Compose::SrcOver => src.stats.blends.fetch_add(1, Ordering::Relaxed),
            _ => return Err(Error::surface("unsupported compose mode")),
        };

        let (dx, dy) = (e.round() as i64, f.round() as i64);
        for sy in 0..rect.height {
            for sx in 0..rect.width {
                let (tx, ty) = (dx + i64::from(sx), dy + i64::from(sy));
                if tx < 0 || ty < 0 || tx >= i64::from(self.width) || ty >= i64::from(self.height) {
                    continue;
                }
                let s = tint(src.pixel(rect.x + sx, rect.y + sy), op.color.scale);
                let i = ((ty as u32 * self.width + tx as u32) * 4) as usize;
                let dst = &mut self.data[i..i + 4];
                if op.compose == Compose::Copy {
                    dst.copy_from_slice(&s);
                } else {
                    let inv = 1.0 - f32::from(s[3]) / 255.0;
                    for (d, s) in dst.iter_mut().zip(s) {
                        *d = (f32::from(s) + f32::from(*d) * inv).round().min(255.0) as u8;
                    }
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}

/// Applies a color scale to a premultiplied pixel.
fn tint(px: [u8; 4], scale: [f32; 4]) -> [u8; 4] {
    if px[3] == 0 {
        return [0; 4];
    }
    let alpha = f32::from(px[3]) / 255.0 * scale[3];
    let mut out = [0; 4];
    for i in 0..3 {
        let straight = f32::from(px[i]) / f32::from(px[3]) * scale[i];
        out[i] = (straight * alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}
