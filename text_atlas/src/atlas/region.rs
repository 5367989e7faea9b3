// Copyright 2025 the Text Atlas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell geometry of an atlas surface.

use crate::surface::SourceRect;

/// Position of a cell within an atlas, counted row by row.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CellIndex(pub u32);

/// Division of an atlas surface into square cells.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) struct CellGrid {
    /// Cell edge length in pixels.
    pub(crate) cell_size: u32,
    /// Number of cells in one row.
    pub(crate) per_row: u32,
    /// Number of rows.
    pub(crate) rows: u32,
    capacity: u32,
}

impl CellGrid {
    /// Grid of `cell_size` cells over a `width` x `height` surface.
    ///
    /// Partial cells at the right and bottom edges are unused. Returns `None`
    /// if the number of cells does not fit in a `u32`.
    pub(crate) fn new(width: u32, height: u32, cell_size: u32) -> Option<Self> {
        let per_row = width / cell_size;
        let rows = height / cell_size;
        Some(Self {
            cell_size,
            per_row,
            rows,
            capacity: per_row.checked_mul(rows)?,
        })
    }

    /// Total number of cells.
    #[inline]
    pub(crate) fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Top-left pixel of a cell.
    ///
    /// `cell` must be less than [`capacity`](Self::capacity).
    #[inline]
    pub(crate) fn origin(&self, cell: CellIndex) -> (u32, u32) {
        (
            (cell.0 % self.per_row) * self.cell_size,
            (cell.0 / self.per_row) * self.cell_size,
        )
    }

    /// Pixel rectangle of a cell.
    pub(crate) fn rect(&self, cell: CellIndex) -> SourceRect {
        let (x, y) = self.origin(cell);
        SourceRect {
            x,
            y,
            width: self.cell_size,
            height: self.cell_size,
        }
    }
}
