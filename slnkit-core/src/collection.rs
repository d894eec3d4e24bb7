//! Ordered container of [`SolutionItem`]s.
//!
//! Insertion keeps the collection sorted by kind-class, then name. Equal keys
//! keep insertion order. Duplicate names are not rejected here; the
//! [`Solution`](crate::Solution) enforces that for projects.

use std::cmp::Ordering;

use crate::item::{Project, SolutionItem};
use crate::types::ItemId;

#[derive(Debug, Default)]
pub struct SortedItemCollection {
    items: Vec<SolutionItem>,
}

impl SortedItemCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Inserts `item` at its sorted position and returns that index.
    pub fn insert(&mut self, item: SolutionItem) -> usize {
        let index = self
            .items
            .partition_point(|existing| existing.compare(&item) != Ordering::Greater);
        self.items.insert(index, item);
        index
    }

    /// Removes the item with identity `id`.
    pub fn remove(&mut self, id: ItemId) -> Option<SolutionItem> {
        let index = self.position(id)?;
        Some(self.items.remove(index))
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&SolutionItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolutionItem> {
        self.items.iter()
    }

    /// Project-kind entries only, in collection order.
    pub fn projects(&self) -> impl Iterator<Item = &dyn Project> + '_ {
        self.items.iter().filter_map(SolutionItem::as_project)
    }

    pub fn projects_mut(&mut self) -> impl Iterator<Item = &mut dyn Project> + '_ {
        self.items.iter_mut().filter_map(SolutionItem::as_project_mut)
    }

    /// Empties the collection, yielding items in sorted order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SolutionItem> {
        self.items.drain(..)
    }
}

impl<'a> IntoIterator for &'a SortedItemCollection {
    type Item = &'a SolutionItem;
    type IntoIter = std::slice::Iter<'a, SolutionItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Depth-first walk: a folder's children are visited before the folder, any
/// other item inline.
pub(crate) fn visit(items: &SortedItemCollection, visitor: &mut dyn FnMut(&SolutionItem)) {
    for child in items {
        if let SolutionItem::Folder(folder) = child {
            visit(folder.items(), visitor);
        }
        visitor(child);
    }
}
