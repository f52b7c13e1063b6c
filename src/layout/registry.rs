//! Canonical item collection.
//!
//! The registry owns the one piece of persistent layout state: the ordered
//! sequence of items. Everything else (column records, height accumulators,
//! the point-lookup index) is derived from it and rebuilt per pass.
//!
//! Item sets change through explicit diff application: the host computes its
//! own add/remove diff and calls the discrete entry points here. There is no
//! collection observation and no callback-driven mutation, so the item set
//! can never change in the middle of a layout pass.

use super::tile::Tile;
use super::LayoutElement;

/// Ordered collection of items in canonical order.
#[derive(Debug)]
pub struct Registry<W: LayoutElement> {
    tiles: Vec<Tile<W>>,
}

impl<W: LayoutElement> Registry<W> {
    pub fn new() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Canonical position of an item.
    pub fn position(&self, id: &W::Id) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id() == id)
    }

    pub fn contains(&self, id: &W::Id) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &W::Id) -> Option<&Tile<W>> {
        self.tiles.iter().find(|tile| tile.id() == id)
    }

    pub(super) fn get_mut(&mut self, id: &W::Id) -> Option<&mut Tile<W>> {
        self.tiles.iter_mut().find(|tile| tile.id() == id)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile<W>> + '_ {
        self.tiles.iter()
    }

    pub(super) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile<W>> + '_ {
        self.tiles.iter_mut()
    }

    /// Appends an item. Returns false if the id is already registered.
    pub fn push(&mut self, element: W) -> bool {
        self.insert(self.tiles.len(), element)
    }

    /// Inserts an item at the given canonical position (clamped to the end).
    ///
    /// Returns false if the id is already registered.
    pub fn insert(&mut self, index: usize, element: W) -> bool {
        if self.contains(element.id()) {
            return false;
        }

        let index = index.min(self.tiles.len());
        self.tiles.insert(index, Tile::new(element));
        true
    }

    /// Removes an item, returning the host element.
    pub fn remove(&mut self, id: &W::Id) -> Option<W> {
        let index = self.position(id)?;
        Some(self.tiles.remove(index).into_element())
    }

    /// Moves an item to the given canonical position.
    ///
    /// The index is interpreted against the sequence with the item already
    /// removed (clamped to the end), which makes it the exact commit step for
    /// the insertion index a drag session reports. Returns false if the item
    /// is unknown.
    pub fn move_to(&mut self, id: &W::Id, index: usize) -> bool {
        let Some(position) = self.position(id) else {
            return false;
        };

        let tile = self.tiles.remove(position);
        let index = index.min(self.tiles.len());
        self.tiles.insert(index, tile);
        true
    }

    pub(super) fn set_excluded(&mut self, id: &W::Id, excluded: bool) -> bool {
        match self.get_mut(id) {
            Some(tile) => {
                tile.set_excluded(excluded);
                true
            }
            None => false,
        }
    }
}

impl<W: LayoutElement> Default for Registry<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Item(usize);

    impl LayoutElement for Item {
        type Id = usize;

        fn id(&self) -> &usize {
            &self.0
        }

        fn natural_height(&self, _width: f64) -> f64 {
            10.
        }
    }

    fn ids<W: LayoutElement<Id = usize>>(registry: &Registry<W>) -> Vec<usize> {
        registry.tiles().map(|tile| *tile.id()).collect()
    }

    #[test]
    fn push_rejects_duplicates() {
        let mut registry = Registry::new();
        assert!(registry.push(Item(1)));
        assert!(!registry.push(Item(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn insert_clamps_to_the_end() {
        let mut registry = Registry::new();
        registry.push(Item(1));
        assert!(registry.insert(100, Item(2)));
        assert_eq!(ids(&registry), vec![1, 2]);
    }

    #[test]
    fn move_to_uses_post_removal_coordinates() {
        let mut registry = Registry::new();
        for id in 0..4 {
            registry.push(Item(id));
        }

        // Moving an item to its own position is a no-op.
        assert!(registry.move_to(&2, 2));
        assert_eq!(ids(&registry), vec![0, 1, 2, 3]);

        assert!(registry.move_to(&3, 0));
        assert_eq!(ids(&registry), vec![3, 0, 1, 2]);

        assert!(registry.move_to(&3, 100));
        assert_eq!(ids(&registry), vec![0, 1, 2, 3]);

        assert!(!registry.move_to(&42, 0));
    }

    #[test]
    fn remove_returns_the_element() {
        let mut registry = Registry::new();
        registry.push(Item(7));
        assert_eq!(registry.remove(&7), Some(Item(7)));
        assert_eq!(registry.remove(&7), None);
        assert!(registry.is_empty());
    }
}
