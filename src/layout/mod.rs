//! Masonry layout logic.
//!
//! The engine arranges variable-height items into a fixed number of columns,
//! balancing column heights with a greedy rule: each item lands in whichever
//! column is currently the shortest, ties going to the lowest column index.
//! On top of the static layout it supports live drag-to-reorder: the dragged
//! item leaves the height accounting, a placeholder slot tracks the pointer,
//! and everything below the pointer's row reflows around it on every update.
//!
//! The code follows a few principles:
//!
//! 1. Canonical order lives in exactly one place, the [`Registry`]. Column
//!    records, height accumulators and the point-lookup index are derived
//!    views, rebuilt from scratch on every arrange pass. Nothing patches a
//!    previous pass's state in place, so the item set may change arbitrarily
//!    between passes without leaving stale records behind.
//! 2. Measure and arrange recompute the same greedy choices independently.
//!    Given the same items, sizes and options, two passes produce identical
//!    results, which is what makes the arrange pass free to re-derive the
//!    column assignment instead of carrying it over.
//! 3. A drag session only ever mutates derived state. Canonical order is
//!    committed by the host after the drop, via [`MasonrySpace::move_item`]
//!    with the insertion index the session reported. Cancelling a session is
//!    therefore trivially safe: the next pass restores the pre-drag
//!    arrangement.
//!
//! All entry points are synchronous and take `&mut self`; there is no
//! background work and no reentrancy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod column;
pub mod registry;
pub mod tile;

mod drag;
mod masonry;


pub use self::column::{Column, ColumnIndex};
pub use self::masonry::{ItemRect, LayoutPass, MasonrySpace};
pub use self::registry::Registry;
pub use self::tile::Tile;

/// Trait through which the layout engine measures host content.
///
/// The engine depends only on this capability set; it never renders, never
/// commits rectangles to the host and never owns host visuals. Applying the
/// computed rectangles and painting a ghost of the dragged item are host
/// concerns performed with the engine's outputs.
pub trait LayoutElement {
    /// Type that can be used as a unique ID of this element.
    type Id: PartialEq + fmt::Debug + Clone;

    /// Unique ID of this element.
    fn id(&self) -> &Self::Id;

    /// Natural content height when laid out at the given width.
    ///
    /// Called once per measure pass with the computed column width. Malformed
    /// values (negative, NaN, infinite) are clamped to 0 rather than treated
    /// as errors.
    fn natural_height(&self, width: f64) -> f64;
}

/// Margins between the panel edges and the outermost content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Struts {
    pub left: f64,
    pub right: f64,
    pub top: f64,
}

/// Layout options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Number of columns items are distributed into.
    pub columns: usize,
    /// Horizontal gap between adjacent columns.
    pub gap_x: f64,
    /// Vertical gap below each item within a column.
    pub gap_y: f64,
    /// Margins between the panel edges and the content.
    pub struts: Struts,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            columns: 2,
            gap_x: 0.,
            gap_y: 0.,
            struts: Struts::default(),
        }
    }
}

impl Options {
    /// Copy of the options with gaps and struts clamped to sane values.
    ///
    /// Negative and non-finite margins degrade to 0, mirroring how malformed
    /// item sizes are handled. The column count is left alone; a zero column
    /// count is a hard configuration error surfaced by the layout pass.
    pub(crate) fn sanitized(&self) -> Options {
        use crate::utils::clamp_dimension;
        Options {
            columns: self.columns,
            gap_x: clamp_dimension(self.gap_x),
            gap_y: clamp_dimension(self.gap_y),
            struts: Struts {
                left: clamp_dimension(self.struts.left),
                right: clamp_dimension(self.struts.right),
                top: clamp_dimension(self.struts.top),
            },
        }
    }
}

/// Configuration errors fatal to a layout pass.
///
/// No partial layout is produced; the previous pass's records stay in effect.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("layout needs at least one column")]
    NoColumns,
    #[error("available width {available} cannot fit {columns} columns")]
    NoRoomForColumns { available: f64, columns: usize },
}

/// Precondition violations from the drag session entry points.
///
/// These are rejected before any state is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("a drag session is already active")]
    SessionActive,
    #[error("no drag session is active")]
    NoSession,
    #[error("item is not in the registry")]
    UnknownItem,
    #[error("item is the target of the active drag session")]
    TargetLocked,
}
