// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A font whose glyphs are solid boxes.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use hashbrown::{HashMap, HashSet};
use text_atlas::{FaceKey, Fixed, FixedPoint, FixedRect, FontFace, GlyphMask};

/// Glyphs are `width` x `height` boxes standing on the baseline, one pixel
/// right of the glyph origin, with an advance of `width + 2`. Whitespace has
/// no ink and advances by `width`.
///
/// The face key is derived from the name and the default glyph size, so two
/// fonts built with the same arguments are the same face.
#[derive(Debug)]
pub(crate) struct BoxFont {
    key: FaceKey,
    size: (i32, i32),
    sizes: HashMap<char, (i32, i32)>,
    kerns: HashMap<(char, char), i32>,
    failing: HashSet<char>,
    measured: AtomicUsize,
    rasterized: Mutex<HashMap<char, usize>>,
}

impl BoxFont {
    pub(crate) fn new(name: &str, width: i32, height: i32) -> Self {
        Self {
            key: FaceKey::from_content(&(name, width, height)),
            size: (width, height),
            sizes: HashMap::new(),
            kerns: HashMap::new(),
            failing: HashSet::new(),
            measured: AtomicUsize::new(0),
            rasterized: Mutex::new(HashMap::new()),
        }
    }

    /// A 10x12 font.
    pub(crate) fn regular() -> Self {
        Self::new("regular", 10, 12)
    }

    pub(crate) fn with_glyph_size(mut self, ch: char, width: i32, height: i32) -> Self {
        self.sizes.insert(ch, (width, height));
        self
    }

    pub(crate) fn with_kern(mut self, prev: char, ch: char, px: i32) -> Self {
        self.kerns.insert((prev, ch), px);
        self
    }

    pub(crate) fn failing(mut self, ch: char) -> Self {
        self.failing.insert(ch);
        self
    }

    /// Number of bounds queries.
    pub(crate) fn measured(&self) -> usize {
        self.measured.load(Ordering::Relaxed)
    }

    /// Number of times `ch` was rasterized.
    pub(crate) fn rasterized(&self, ch: char) -> usize {
        self.rasterized.lock().unwrap().get(&ch).copied().unwrap_or(0)
    }

    /// Number of rasterizations of any glyph.
    pub(crate) fn total_rasterized(&self) -> usize {
        self.rasterized.lock().unwrap().values().sum()
    }

    fn glyph_size(&self, ch: char) -> (i32, i32) {
        if ch.is_whitespace() {
            (0, 0)
        } else {
            self.sizes.get(&ch).copied().unwrap_or(self.size)
        }
    }
}

impl FontFace for BoxFont {
    fn face_key(&self) -> FaceKey {
        self.key
    }

    fn glyph_bounds(&self, ch: char) -> FixedRect {
        self.measured.fetch_add(1, Ordering::Relaxed);
        match self.glyph_size(ch) {
            (0, _) | (_, 0) => FixedRect::default(),
            (w, h) => FixedRect::from_pixels(1, -h, 1 + w, 0),
        }
    }

    fn glyph_advance(&self, ch: char) -> Fixed {
        if ch.is_whitespace() {
            Fixed::from_int(self.size.0)
        } else {
            Fixed::from_int(self.glyph_size(ch).0 + 2)
        }
    }

    fn kern(&self, prev: char, ch: char) -> Fixed {
        Fixed::from_int(self.kerns.get(&(prev, ch)).copied().unwrap_or(0))
    }

    fn rasterize(&self, ch: char, dot: FixedPoint, mask: &mut GlyphMask) -> Result<(), text_atlas::Error> {
        *self.rasterized.lock().unwrap().entry(ch).or_insert(0) += 1;
        if self.failing.contains(&ch) {
            return Err(text_atlas::Error::rasterization(ch));
        }
        let (w, h) = self.glyph_size(ch);
        let x0 = dot.x.floor() + 1;
        let y0 = dot.y.floor() - h;
        for y in y0.max(0)..y0 + h {
            for x in x0.max(0)..x0 + w {
                mask.set(x as u32, y as u32, 255);
            }
        }
        Ok(())
    }
}
