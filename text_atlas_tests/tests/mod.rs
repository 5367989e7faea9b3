// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `text_atlas`.
//!
//! - The `util` module contains a software [`Device`](text_atlas::Device) with
//!   real pixel buffers and a box-glyph [`FontFace`](text_atlas::FontFace)
//!   that counts how often it is asked to measure and rasterize.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, so that the utilities are shared.
//! - For test naming, put the "topic" of the test at the start of the name, e.g.
//!   `eviction_reuses_cell` rather than `reuses_cell_on_eviction`.

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod util;
