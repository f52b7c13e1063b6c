//! Drag-to-reorder session handling.
//!
//! A session moves through idle -> dragging -> idle; both completion and
//! cancellation return to idle. While dragging, every pointer update unwinds
//! the layout back to the pointer's row across all columns, reserves a
//! placeholder slot for the dragged item at the pointer's column, and
//! greedily reflows the unwound items back into the shortest columns. The
//! result is a fully balanced arrangement after every single update, never a
//! partially shifted one.
//!
//! The session never touches canonical order. It reports an insertion index;
//! committing it (via [`MasonrySpace::move_item`]) is the host's move after
//! the drop.

use tracing::debug;

use super::masonry::MasonrySpace;
use super::{DragError, LayoutElement};
use crate::geometry::{Point, Rect, Size};

/// Transient state of an active drag session.
#[derive(Debug)]
pub(super) struct DragSession<Id> {
    /// The item being dragged.
    pub target: Id,

    /// Size reserved for the drop slot, snapshotted at session start.
    pub placeholder: Size,

    /// Last reported pointer position.
    pub pointer: Point,

    /// Column and row of the placeholder entry after the last update.
    ///
    /// Cleared by a full arrange pass, which rebuilds the index without a
    /// placeholder entry.
    pub insertion: Option<(usize, usize)>,

    /// Canonical index the host should commit the target to, expressed
    /// against the sequence with the target removed.
    pub insertion_index: usize,

    /// Whether the placeholder currently occupies an index entry.
    pub placeholder_in_index: bool,
}

impl<W: LayoutElement> MasonrySpace<W> {
    /// Begins a drag session for the given item.
    ///
    /// The item is excluded from height accounting (the host keeps rendering
    /// it as a ghost at its last rectangle) and its measured size becomes the
    /// session's placeholder size. Rejected, before any state changes, if a
    /// session is already active or the item is unknown.
    pub fn begin_drag(&mut self, id: &W::Id, pointer: Point) -> Result<(), DragError> {
        if self.drag.is_some() {
            return Err(DragError::SessionActive);
        }

        let Some(position) = self.registry.position(id) else {
            return Err(DragError::UnknownItem);
        };

        let tile = self.registry.get_mut(id).unwrap();
        tile.set_excluded(true);
        let placeholder = tile.size();

        // Committing an untouched session restores the original order:
        // removing the target and reinserting it at its own position is a
        // no-op.
        self.drag = Some(DragSession {
            target: id.clone(),
            placeholder,
            pointer,
            insertion: None,
            insertion_index: position,
            placeholder_in_index: false,
        });

        debug!("drag session started for {id:?}");
        Ok(())
    }

    /// Updates the active drag session with a new pointer position.
    ///
    /// Unwinds every column back to the pointer's row, reserves the
    /// placeholder slot at the pointer's column, and reflows the unwound
    /// items into the shortest columns. Returns the insertion index the host
    /// would commit to if the item were dropped here.
    pub fn update_drag(&mut self, pointer: Point) -> Result<usize, DragError> {
        let Some(session) = self.drag.as_mut() else {
            return Err(DragError::NoSession);
        };

        session.pointer = pointer;

        // Degenerate: no columns to place into (layout never ran with a
        // valid configuration). Keep the last known answer.
        if self.index.columns().is_empty() {
            return Ok(session.insertion_index);
        }

        let options = self.options.sanitized();
        let target_position = self.registry.position(&session.target).unwrap();

        // Drop the previous update's placeholder entry, restacking its
        // column, so the unwind below starts from placeholder-free records.
        if session.placeholder_in_index {
            if let Some((column, row)) = session.insertion.take() {
                self.index
                    .column_mut(column)
                    .remove_at(row, options.gap_y, options.struts.top);
            }
            session.placeholder_in_index = false;
        }

        let column_idx = self.index.column_at_x(pointer.x);

        // Unwind the layout back to the pointer's row: every entry whose
        // bottom edge lies below the pointer comes out, columns first, top
        // to bottom within each column.
        let stash = self
            .index
            .split_off_below(pointer.y, options.gap_y, options.struts.top);

        // The earliest displaced canonical position is where the target
        // would land; nothing displaced means it lands at the very end.
        // Canonical positions were recorded by the last arrange pass and may
        // exceed the current item count if items were removed since, hence
        // the clamp.
        let insertion_index = match stash.iter().map(|(_, data)| data.canonical).min() {
            Some(canonical) if target_position < canonical => canonical - 1,
            Some(canonical) => canonical,
            None => self.registry.len() - 1,
        }
        .min(self.registry.len() - 1);

        // Reserve the drop slot at the pointer's column. The entry carries
        // the target's identity so lookups during the drag resolve to the
        // dragged item.
        let row = self.index.columns()[column_idx].len();
        self.index.column_mut(column_idx).push(
            session.target.clone(),
            session.placeholder.h,
            target_position,
            options.gap_y,
        );

        // Reflow the unwound items, shortest column first.
        for (id, data) in stash {
            let column = self.index.shortest_column();
            self.index
                .column_mut(column)
                .push(id, data.height, data.canonical, options.gap_y);
        }

        session.insertion = Some((column_idx, row));
        session.insertion_index = insertion_index;
        session.placeholder_in_index = true;
        Ok(insertion_index)
    }

    /// Ends the active drag session, returning the final insertion index.
    ///
    /// Only tears the session down; committing the new order is the host's
    /// job via [`MasonrySpace::move_item`] with the returned index, followed
    /// by a fresh layout pass.
    pub fn end_drag(&mut self) -> Result<usize, DragError> {
        let Some(session) = self.drag.take() else {
            return Err(DragError::NoSession);
        };

        if let Some(tile) = self.registry.get_mut(&session.target) {
            tile.set_excluded(false);
        }

        debug!("drag session ended for {:?}", session.target);
        Ok(session.insertion_index)
    }

    /// Cancels the active drag session.
    ///
    /// Identical teardown to [`end_drag`](Self::end_drag), but the caller
    /// discards the insertion index; since canonical order was never touched,
    /// the next layout pass restores the pre-drag arrangement.
    pub fn cancel_drag(&mut self) -> Result<(), DragError> {
        let Some(session) = self.drag.take() else {
            return Err(DragError::NoSession);
        };

        if let Some(tile) = self.registry.get_mut(&session.target) {
            tile.set_excluded(false);
        }

        debug!("drag session cancelled for {:?}", session.target);
        Ok(())
    }

    /// Whether a drag session is active.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The item targeted by the active drag session.
    pub fn dragged_item(&self) -> Option<&W::Id> {
        self.drag.as_ref().map(|session| &session.target)
    }

    /// Last pointer position reported to the active drag session.
    pub fn drag_pointer(&self) -> Option<Point> {
        self.drag.as_ref().map(|session| session.pointer)
    }

    /// Rectangle of the placeholder slot, for the host to highlight the drop
    /// target.
    ///
    /// `None` outside a session, and between a full arrange pass and the
    /// next pointer update (the rebuilt index has no placeholder entry yet).
    pub fn drag_placeholder_rect(&self) -> Option<Rect> {
        let session = self.drag.as_ref()?;
        let (column_idx, row) = session.insertion?;
        let column = self.index.columns().get(column_idx)?;
        let entry = column.entry(row)?;

        Some(Rect::new(
            (column.x(), entry.bottom - entry.height),
            (self.index.column_width(), entry.height),
        ))
    }
}
