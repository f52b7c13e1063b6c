//! The measure/arrange engine.

use tracing::debug;

use super::column::ColumnIndex;
use super::drag::DragSession;
use super::registry::Registry;
use super::{ConfigError, DragError, LayoutElement, Options};
use crate::geometry::{Point, Rect, Size};
use crate::utils;

/// Rectangle assigned to an item by an arrange pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRect<Id> {
    pub id: Id,
    pub rect: Rect,
    /// Whether the item was excluded from height accounting.
    pub excluded: bool,
}

/// Result of a full layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPass<Id> {
    /// Overall size needed to fit every column.
    pub size: Size,
    /// Final rectangles in canonical order, one per item.
    pub rects: Vec<ItemRect<Id>>,
}

/// A masonry layout space.
///
/// Owns the canonical item collection and the derived column records, and
/// provides the layout pass, the point lookups and the drag session entry
/// points. The space is purely in-memory: a layout pass is a function of the
/// current item set and options, and everything derived can be rebuilt from
/// them at any time.
#[derive(Debug)]
pub struct MasonrySpace<W: LayoutElement> {
    /// Items in canonical order.
    pub(super) registry: Registry<W>,

    /// Column records from the last arrange pass.
    ///
    /// Replaced wholesale by every pass; mutated in place only by the drag
    /// controller during an active session.
    pub(super) index: ColumnIndex<W::Id>,

    /// Column width from the last measure pass.
    pub(super) column_width: f64,

    /// Active drag session, if any. At most one.
    pub(super) drag: Option<DragSession<W::Id>>,

    /// Layout options.
    pub(super) options: Options,
}

impl<W: LayoutElement> MasonrySpace<W> {
    pub fn new(options: Options) -> Self {
        Self {
            registry: Registry::new(),
            index: ColumnIndex::new(&options.sanitized(), 0.),
            column_width: 0.,
            drag: None,
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replaces the layout options. Takes effect on the next layout pass.
    pub fn update_options(&mut self, options: Options) {
        self.options = options;
    }

    pub fn registry(&self) -> &Registry<W> {
        &self.registry
    }

    /// Column records from the last arrange pass.
    pub fn index(&self) -> &ColumnIndex<W::Id> {
        &self.index
    }

    /// Column width computed by the last successful measure pass.
    pub fn column_width(&self) -> f64 {
        self.column_width
    }

    /// Appends an item to the canonical sequence.
    ///
    /// Returns false if the id is already registered.
    pub fn add_item(&mut self, element: W) -> bool {
        self.registry.push(element)
    }

    /// Inserts an item at the given canonical position (clamped to the end).
    pub fn insert_item(&mut self, index: usize, element: W) -> bool {
        self.registry.insert(index, element)
    }

    /// Removes an item, returning the host element.
    ///
    /// Removing the target of an active drag session cancels the session
    /// first, so a session can never refer to an item that no longer exists.
    pub fn remove_item(&mut self, id: &W::Id) -> Option<W> {
        if self.drag.as_ref().is_some_and(|session| session.target == *id) {
            let _ = self.cancel_drag();
        }

        self.registry.remove(id)
    }

    /// Moves an item to the given canonical position (the drag commit step).
    ///
    /// The index is interpreted against the sequence with the item already
    /// removed, which is exactly the coordinate space of the insertion index
    /// reported by the drag session. Reordering while a session is still
    /// active cancels the session first; commits are expected after
    /// [`end_drag`](Self::end_drag).
    pub fn move_item(&mut self, id: &W::Id, index: usize) -> bool {
        if self.drag.is_some() {
            let _ = self.cancel_drag();
        }

        self.registry.move_to(id, index)
    }

    /// Toggles an item's exclusion from height accounting.
    ///
    /// The target of an active drag session is locked: its exclusion belongs
    /// to the session and is restored on end/cancel.
    pub fn set_excluded(&mut self, id: &W::Id, excluded: bool) -> Result<(), DragError> {
        if self.drag.as_ref().is_some_and(|session| session.target == *id) {
            return Err(DragError::TargetLocked);
        }

        if self.registry.set_excluded(id, excluded) {
            Ok(())
        } else {
            Err(DragError::UnknownItem)
        }
    }

    /// Runs a full measure + arrange pass.
    ///
    /// On success the column records are rebuilt from scratch and the final
    /// rectangles are returned in canonical order. On error no partial
    /// layout is produced and the previous records stay in effect.
    pub fn layout(&mut self, available: Size) -> Result<LayoutPass<W::Id>, ConfigError> {
        let options = self.options.sanitized();
        let column_width = compute_column_width(&options, available.w)?;
        self.column_width = column_width;

        let size = self.measure(&options, column_width, available);
        let pass = self.arrange(&options, column_width, size);

        debug!(
            "layout pass: {} items, {} columns, overall height {}",
            pass.rects.len(),
            options.columns,
            pass.size.h,
        );

        Ok(pass)
    }

    /// Measure pass: caches item sizes and computes the overall size.
    ///
    /// Walks items in canonical order, accumulating each non-excluded item's
    /// height into the current column and then moving to the shortest
    /// column. With no items the overall height is just the top strut.
    fn measure(&mut self, options: &Options, column_width: f64, available: Size) -> Size {
        let mut heights = vec![options.struts.top; options.columns];
        let mut current = 0;

        for tile in self.registry.tiles_mut() {
            tile.measure(column_width);

            if tile.is_excluded() {
                continue;
            }

            heights[current] += tile.height() + options.gap_y;
            current = utils::argmin(heights.iter().copied());
        }

        let height = heights.iter().copied().fold(0., f64::max);
        Size {
            w: available.w,
            h: height,
        }
    }

    /// Arrange pass: assigns final rectangles and rebuilds the column index.
    ///
    /// Recomputes the same greedy choices as the measure pass. Excluded items
    /// get a rectangle at the current column offset but contribute no height
    /// and no index entry. During a drag session the placeholder slot
    /// reserves the session's placeholder height in the current column and
    /// then advances by the same shortest-column rule as everything else.
    fn arrange(&mut self, options: &Options, column_width: f64, size: Size) -> LayoutPass<W::Id> {
        // The session's insertion index is relative to the sequence without
        // the target; map it onto the full walk below.
        let placeholder = self.drag.as_ref().map(|session| {
            let target_pos = self.registry.position(&session.target).unwrap();
            let slot = if session.insertion_index < target_pos {
                session.insertion_index
            } else {
                session.insertion_index + 1
            };
            (slot, session.placeholder)
        });

        let mut index = ColumnIndex::new(options, column_width);
        let mut rects = Vec::with_capacity(self.registry.len());
        let mut current = 0;

        for (position, tile) in self.registry.tiles().enumerate() {
            if let Some((slot, reserved)) = placeholder {
                if slot == position {
                    index.column_mut(current).reserve(reserved.h + options.gap_y);
                    current = index.shortest_column();
                }
            }

            let column = &index.columns()[current];
            let rect = Rect::new((column.x(), column.height()), (column_width, tile.height()));
            rects.push(ItemRect {
                id: tile.id().clone(),
                rect,
                excluded: tile.is_excluded(),
            });

            if !tile.is_excluded() {
                index
                    .column_mut(current)
                    .push(tile.id().clone(), tile.height(), position, options.gap_y);
                current = index.shortest_column();
            }
        }

        // A fresh index has no placeholder entry; an active session resolves
        // its slot again on the next pointer update.
        if let Some(session) = &mut self.drag {
            session.insertion = None;
            session.placeholder_in_index = false;
        }

        self.index = index;
        LayoutPass { size, rects }
    }

    /// Item covering the given point, per the column records of the last
    /// arrange pass.
    ///
    /// Returns `None` only when the resolved column has no recorded items.
    pub fn item_at(&self, pos: Point) -> Option<&W::Id> {
        self.index.item_at(pos)
    }

    /// Column and row covering the given point.
    pub fn column_row_at(&self, pos: Point) -> (usize, usize) {
        self.index.column_row_at(pos)
    }

    #[cfg(test)]
    pub(super) fn verify_invariants(&self) {
        let options = self.options.sanitized();
        self.index.verify_invariants(options.struts.top);

        if let Some(session) = &self.drag {
            let tile = self
                .registry
                .get(&session.target)
                .expect("drag target must be registered");
            assert!(tile.is_excluded(), "drag target must be excluded");

            if session.placeholder_in_index {
                let (column, row) = session
                    .insertion
                    .expect("placeholder slot must be recorded");
                assert_eq!(
                    self.index.item_at_slot(column, row),
                    Some(&session.target),
                    "the placeholder slot must resolve to the drag target",
                );
            }
        }
    }
}

fn compute_column_width(options: &Options, available_width: f64) -> Result<f64, ConfigError> {
    if options.columns == 0 {
        return Err(ConfigError::NoColumns);
    }

    let content = available_width
        - options.struts.left
        - options.struts.right
        - (options.columns - 1) as f64 * options.gap_x;
    let width = content / options.columns as f64;

    // Also rejects NaN widths from a non-finite available width.
    if !(width > 0.) {
        return Err(ConfigError::NoRoomForColumns {
            available: available_width,
            columns: options.columns,
        });
    }

    Ok(width)
}
