//! A balancing masonry layout engine with drag-to-reorder reflow.
//!
//! Items of varying height flow into a fixed number of columns; each item
//! lands in whichever column is currently the shortest, keeping the columns
//! balanced. During a drag, the engine unwinds everything below the pointer,
//! reserves a placeholder slot for the dragged item, and reflows the rest
//! around it on every pointer update, reporting the canonical index the host
//! should commit the item to on drop.
//!
//! The engine is deliberately blind to everything visual: the host measures
//! content (via [`layout::LayoutElement`]), applies the computed rectangles,
//! renders the drag ghost, and delivers pointer positions. All entry points
//! are synchronous and complete before the next event is accepted.
//!
//! ```
//! use drystack::geometry::{Point, Size};
//! use drystack::layout::{LayoutElement, MasonrySpace, Options};
//!
//! struct Card {
//!     id: u32,
//!     height: f64,
//! }
//!
//! impl LayoutElement for Card {
//!     type Id = u32;
//!
//!     fn id(&self) -> &u32 {
//!         &self.id
//!     }
//!
//!     fn natural_height(&self, _width: f64) -> f64 {
//!         self.height
//!     }
//! }
//!
//! let mut space = MasonrySpace::new(Options {
//!     columns: 2,
//!     ..Options::default()
//! });
//! space.add_item(Card { id: 1, height: 100. });
//! space.add_item(Card { id: 2, height: 80. });
//! space.add_item(Card { id: 3, height: 120. });
//!
//! let pass = space.layout(Size::from((200., 600.))).unwrap();
//! assert_eq!(pass.rects.len(), 3);
//! // The third card went to the second column, which was shorter.
//! assert_eq!(space.item_at(Point::from((150., 100.))), Some(&2));
//! ```

pub mod geometry;
pub mod layout;
pub mod utils;

pub use geometry::{Point, Rect, Size};
pub use layout::{
    Column, ColumnIndex, ConfigError, DragError, ItemRect, LayoutElement, LayoutPass,
    MasonrySpace, Options, Registry, Struts, Tile,
};
