//! Per-column layout records and point lookups.
//!
//! A [`ColumnIndex`] is the derived view an arrange pass leaves behind: one
//! [`Column`] per configured column, each holding the ordered record of the
//! items placed into it. The bottom edges within a column are non-decreasing
//! because items are appended in visit order at ever-growing offsets, which
//! is what makes the binary-search lookups valid.
//!
//! The index is rebuilt from scratch by every arrange pass. The only code
//! that mutates an existing index is the drag controller, which unwinds and
//! rebalances records during a session; the next pass replaces the whole
//! value again.

use crate::geometry::Point;
use crate::utils;

use super::Options;

/// Per-entry record within a column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct EntryData {
    /// Bottom edge of the entry's rectangle.
    pub bottom: f64,
    /// Height of the entry's rectangle.
    pub height: f64,
    /// Position of the item in the canonical sequence at arrange time.
    pub canonical: usize,
}

/// A single column's ordered record of laid-out items.
#[derive(Debug)]
pub struct Column<Id> {
    /// Item identities, top to bottom.
    items: Vec<Id>,
    /// Parallel per-item records; `bottom` values are non-decreasing.
    data: Vec<EntryData>,
    /// Accumulated height: top strut plus item heights and gaps, including
    /// reserved placeholder space.
    height: f64,
    /// X offset of the column's left edge.
    x: f64,
}

impl<Id> Column<Id> {
    fn new(x: f64, top: f64) -> Self {
        Self {
            items: Vec::new(),
            data: Vec::new(),
            height: top,
            x,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Accumulated column height, the y offset the next item would land at.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// X offset of the column's left edge.
    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn item(&self, row: usize) -> Option<&Id> {
        self.items.get(row)
    }

    /// Bottom edges of the recorded items, top to bottom.
    pub fn bottoms(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|data| data.bottom)
    }

    pub(super) fn entry(&self, row: usize) -> Option<&EntryData> {
        self.data.get(row)
    }

    /// Row of the entry matching the given y offset.
    ///
    /// This is the last entry whose bottom edge does not exceed `y`. A y
    /// above the first bottom edge falls back to row 0 (the pointer is over
    /// the top item or above all items), and a y below every bottom edge
    /// resolves to the last row. Callers must handle the empty-column case
    /// themselves; 0 is returned as the degenerate answer.
    pub fn row_at(&self, y: f64) -> usize {
        utils::last_le_by(&self.data, y, |data| data.bottom).unwrap_or(0)
    }

    /// Appends an entry, extending the column height. Returns the y offset
    /// the entry was placed at.
    pub(super) fn push(&mut self, id: Id, height: f64, canonical: usize, gap_y: f64) -> f64 {
        let y = self.height;
        let bottom = y + height;
        self.items.push(id);
        self.data.push(EntryData {
            bottom,
            height,
            canonical,
        });
        self.height = bottom + gap_y;
        y
    }

    /// Reserves height without recording an entry (the placeholder slot).
    pub(super) fn reserve(&mut self, amount: f64) {
        self.height += amount;
    }

    /// Removes the entry at `row` and restacks everything below it, keeping
    /// bottom edges consistent.
    pub(super) fn remove_at(&mut self, row: usize, gap_y: f64, top: f64) -> Option<(Id, EntryData)> {
        if row >= self.items.len() {
            return None;
        }

        let id = self.items.remove(row);
        let data = self.data.remove(row);

        let mut height = match row.checked_sub(1) {
            Some(prev) => self.data[prev].bottom + gap_y,
            None => top,
        };
        for entry in &mut self.data[row..] {
            entry.bottom = height + entry.height;
            height = entry.bottom + gap_y;
        }
        self.height = self.data.last().map_or(top, |last| last.bottom + gap_y);

        Some((id, data))
    }

    /// Drains every entry whose bottom edge lies below `y`, rewinding the
    /// column height, and returns the drained suffix in top-to-bottom order.
    pub(super) fn split_off_below(&mut self, y: f64, gap_y: f64, top: f64) -> Vec<(Id, EntryData)> {
        let cut = match utils::last_le_by(&self.data, y, |data| data.bottom) {
            Some(row) => row + 1,
            None => 0,
        };

        let ids = self.items.split_off(cut);
        let data = self.data.split_off(cut);
        self.height = self.data.last().map_or(top, |last| last.bottom + gap_y);
        ids.into_iter().zip(data).collect()
    }

    #[cfg(test)]
    pub(super) fn verify_invariants(&self, top: f64) {
        assert_eq!(self.items.len(), self.data.len());
        assert!(self.height >= top, "column height must include the top strut");

        let mut prev = f64::NEG_INFINITY;
        for data in &self.data {
            assert!(
                prev <= data.bottom,
                "column bottom edges must be non-decreasing"
            );
            assert!(
                data.bottom <= self.height,
                "recorded entries must lie within the accumulated height"
            );
            prev = data.bottom;
        }
    }
}

/// Derived index over all columns from the last arrange pass.
#[derive(Debug)]
pub struct ColumnIndex<Id> {
    columns: Vec<Column<Id>>,
    column_width: f64,
}

impl<Id> ColumnIndex<Id> {
    pub(super) fn new(options: &Options, column_width: f64) -> Self {
        let columns = (0..options.columns)
            .map(|idx| {
                let x = options.struts.left + idx as f64 * (column_width + options.gap_x);
                Column::new(x, options.struts.top)
            })
            .collect();

        Self {
            columns,
            column_width,
        }
    }

    pub fn columns(&self) -> &[Column<Id>] {
        &self.columns
    }

    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Total number of recorded entries across all columns.
    pub fn entry_count(&self) -> usize {
        self.columns.iter().map(Column::len).sum()
    }

    /// Accumulated heights of all columns, in column order.
    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.columns.iter().map(Column::height)
    }

    /// Height of the tallest column, the overall content height.
    pub fn overall_height(&self) -> f64 {
        self.heights().fold(0., f64::max)
    }

    /// Index of the shortest column, ties going to the lowest index.
    pub fn shortest_column(&self) -> usize {
        utils::argmin(self.heights())
    }

    /// Column containing the given x offset.
    ///
    /// Negative offsets clamp to column 0, offsets past the last column to
    /// the last one.
    pub fn column_at_x(&self, x: f64) -> usize {
        if self.columns.is_empty() || self.column_width <= 0. {
            return 0;
        }

        let column = (x / self.column_width).floor();
        (column.max(0.) as usize).min(self.columns.len() - 1)
    }

    /// Column and row covering the given point.
    pub fn column_row_at(&self, pos: Point) -> (usize, usize) {
        let column = self.column_at_x(pos.x);
        let row = self
            .columns
            .get(column)
            .map_or(0, |column| column.row_at(pos.y));
        (column, row)
    }

    /// Item covering the given point.
    ///
    /// Returns `None` when the resolved column has no recorded items (or the
    /// index was built with zero columns).
    pub fn item_at(&self, pos: Point) -> Option<&Id> {
        let (column, row) = self.column_row_at(pos);
        self.columns.get(column)?.item(row)
    }

    /// Item at an explicit column/row slot.
    pub fn item_at_slot(&self, column: usize, row: usize) -> Option<&Id> {
        self.columns.get(column)?.item(row)
    }

    /// Canonical position of the item at an explicit column/row slot.
    pub fn canonical_at_slot(&self, column: usize, row: usize) -> Option<usize> {
        Some(self.columns.get(column)?.entry(row)?.canonical)
    }

    pub(super) fn column_mut(&mut self, column: usize) -> &mut Column<Id> {
        &mut self.columns[column]
    }

    /// Drains every entry below `y` across all columns, visiting columns in
    /// order and each column top to bottom.
    pub(super) fn split_off_below(
        &mut self,
        y: f64,
        gap_y: f64,
        top: f64,
    ) -> Vec<(Id, EntryData)> {
        let mut stash = Vec::new();
        for column in &mut self.columns {
            stash.extend(column.split_off_below(y, gap_y, top));
        }
        stash
    }

    #[cfg(test)]
    pub(super) fn verify_invariants(&self, top: f64) {
        for column in &self.columns {
            column.verify_invariants(top);
        }
    }
}
