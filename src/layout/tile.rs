//! Item wrapper with layout bookkeeping.

use tracing::warn;

use super::LayoutElement;
use crate::geometry::Size;
use crate::utils::clamp_dimension;

/// A content item together with the engine's per-item bookkeeping.
#[derive(Debug)]
pub struct Tile<W: LayoutElement> {
    /// The host element itself.
    element: W,

    /// Whether the item is hidden from height accounting.
    ///
    /// An excluded item still gets a rectangle on every arrange pass, but
    /// contributes no height, so it does not push other items down. The drag
    /// controller excludes the dragged item for the duration of a session;
    /// hosts may also toggle it for programmatic hiding.
    excluded: bool,

    /// Cached size from the last measure pass.
    ///
    /// The width is the computed column width; the height is the element's
    /// clamped natural height at that width.
    size: Size,
}

impl<W: LayoutElement> Tile<W> {
    pub fn new(element: W) -> Self {
        Self {
            element,
            excluded: false,
            size: Size::default(),
        }
    }

    pub fn element(&self) -> &W {
        &self.element
    }

    pub fn into_element(self) -> W {
        self.element
    }

    pub fn id(&self) -> &W::Id {
        self.element.id()
    }

    pub fn is_excluded(&self) -> bool {
        self.excluded
    }

    pub(super) fn set_excluded(&mut self, excluded: bool) {
        self.excluded = excluded;
    }

    /// Size cached by the last measure pass.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn height(&self) -> f64 {
        self.size.h
    }

    /// Measures the element at the given width and caches the result.
    pub(super) fn measure(&mut self, width: f64) {
        let height = self.element.natural_height(width);
        let clamped = clamp_dimension(height);
        if clamped != height {
            warn!(
                "element {:?} reported malformed height {height}; clamping to {clamped}",
                self.element.id(),
            );
        }
        self.size = Size { w: width, h: clamped };
    }
}
