//! Keyed ordered collection: a set of items deduplicated by a derived key.
//!
//! # Semantics
//! - `add` is an upsert: an item whose key is already present replaces the
//!   stored item (last write wins). It never fails and never duplicates.
//! - `discard` of an absent key is a no-op.
//! - Iteration follows the strategy's sort key, ascending or descending.
//!   Ties on the sort key are broken by the generation key, ascending, in
//!   both directions, so order never depends on insertion history.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// How a collection derives identity and order from its items.
///
/// Two plain function pointers plus a direction flag; collections differ by
/// the strategy they are built with, not by type hierarchy.
pub struct KeyStrategy<T, K, S> {
    derive_key: fn(&T) -> K,
    sort_key: fn(&T) -> S,
    descending: bool,
}

impl<T, K, S> KeyStrategy<T, K, S> {
    pub fn new(derive_key: fn(&T) -> K, sort_key: fn(&T) -> S) -> Self {
        Self {
            derive_key,
            sort_key,
            descending: false,
        }
    }

    /// Newest-first / Z-to-A iteration.
    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn ascending(mut self) -> Self {
        self.descending = false;
        self
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    pub fn key(&self, item: &T) -> K {
        (self.derive_key)(item)
    }

    pub fn sort_key(&self, item: &T) -> S {
        (self.sort_key)(item)
    }
}

impl<T, K: Clone> KeyStrategy<T, K, K> {
    /// Sorts by the generation key itself.
    pub fn by_key(derive_key: fn(&T) -> K) -> Self {
        Self::new(derive_key, derive_key)
    }
}

impl<T: Clone> KeyStrategy<T, T, T> {
    /// The item is its own key.
    pub fn identity() -> Self {
        Self::new(T::clone, T::clone)
    }
}

impl<T, K, S> Clone for KeyStrategy<T, K, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, K, S> Copy for KeyStrategy<T, K, S> {}

impl<T, K, S> fmt::Debug for KeyStrategy<T, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStrategy")
            .field("descending", &self.descending)
            .finish_non_exhaustive()
    }
}

/// A set-like container keyed by `strategy.key(item)`.
///
/// `K` defaults to the item itself and `S` to the key, so `Section<i32>` is a
/// plain ordered set.
#[derive(Clone)]
pub struct Section<T, K = T, S = K> {
    items: BTreeMap<K, T>,
    strategy: KeyStrategy<T, K, S>,
}

impl<T, K: Ord, S: Ord> Section<T, K, S> {
    pub fn new(strategy: KeyStrategy<T, K, S>) -> Self {
        Self {
            items: BTreeMap::new(),
            strategy,
        }
    }

    pub fn with_items(strategy: KeyStrategy<T, K, S>, items: impl IntoIterator<Item = T>) -> Self {
        let mut section = Self::new(strategy);
        section.extend(items);
        section
    }

    /// Inserts `item`, replacing any item with the same key.
    /// Returns the replaced item, if any.
    pub fn add(&mut self, item: T) -> Option<T> {
        let key = self.strategy.key(&item);
        self.items.insert(key, item)
    }

    /// Removes the item sharing `item`'s key. Absent keys are a no-op.
    pub fn discard(&mut self, item: &T) -> Option<T> {
        let key = self.strategy.key(item);
        self.items.remove(&key)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains_key(&self.strategy.key(item))
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.items.get(key)
    }

    pub fn key_of(&self, item: &T) -> K {
        self.strategy.key(item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn strategy(&self) -> &KeyStrategy<T, K, S> {
        &self.strategy
    }

    /// Items in sort order.
    ///
    /// Nothing is computed until the first item is pulled; the order is then
    /// derived once for that iterator from the current contents. Every call
    /// starts a fresh pass.
    pub fn iter(&self) -> Iter<'_, T, K, S> {
        Iter {
            section: self,
            ordered: None,
        }
    }

    fn sorted(&self) -> Vec<&T> {
        let descending = self.strategy.is_descending();
        let mut ordered: Vec<(S, &K, &T)> = self
            .items
            .iter()
            .map(|(key, item)| (self.strategy.sort_key(item), key, item))
            .collect();

        ordered.sort_by(|a, b| {
            let primary = a.0.cmp(&b.0);
            let primary = if descending { primary.reverse() } else { primary };
            match primary {
                Ordering::Equal => a.1.cmp(b.1),
                other => other,
            }
        });

        ordered.into_iter().map(|(_, _, item)| item).collect()
    }
}

impl<T: Ord + Clone> Section<T> {
    /// A plain ordered set: the item is its own key.
    pub fn identity() -> Self {
        Self::new(KeyStrategy::identity())
    }
}

impl<T, K: Ord, S: Ord> Extend<T> for Section<T, K, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<'a, T, K: Ord, S: Ord> IntoIterator for &'a Section<T, K, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, K, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: fmt::Debug, K: Ord, S: Ord> fmt::Debug for Section<T, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Ordered iterator over a [`Section`]. The order is materialised on the
/// first call to `next` or `next_back`.
pub struct Iter<'a, T, K = T, S = K> {
    section: &'a Section<T, K, S>,
    ordered: Option<std::vec::IntoIter<&'a T>>,
}

impl<'a, T, K: Ord, S: Ord> Iter<'a, T, K, S> {
    /// True until the first item has been pulled.
    pub fn is_pending(&self) -> bool {
        self.ordered.is_none()
    }

    fn ordered(&mut self) -> &mut std::vec::IntoIter<&'a T> {
        let section = self.section;
        self.ordered
            .get_or_insert_with(|| section.sorted().into_iter())
    }
}

impl<'a, T, K: Ord, S: Ord> Iterator for Iter<'a, T, K, S> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.ordered().next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.ordered {
            Some(ordered) => ordered.size_hint(),
            None => (self.section.len(), Some(self.section.len())),
        }
    }
}

impl<T, K: Ord, S: Ord> DoubleEndedIterator for Iter<'_, T, K, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.ordered().next_back()
    }
}

impl<T, K: Ord, S: Ord> ExactSizeIterator for Iter<'_, T, K, S> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tagged {
        tag: &'static str,
        rank: u32,
        note: &'static str,
    }

    fn by_tag() -> KeyStrategy<Tagged, &'static str, u32> {
        KeyStrategy::new(|t| t.tag, |t| t.rank)
    }

    fn tagged(tag: &'static str, rank: u32, note: &'static str) -> Tagged {
        Tagged { tag, rank, note }
    }

    #[test]
    fn test_instantiation_with_elements() {
        let section: Section<&str> = Section::identity();
        assert_eq!(section.len(), 0);
        assert!(section.is_empty());

        let section = Section::with_items(KeyStrategy::identity(), ["elem1", "elem2"]);
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_items_are_iterable_and_restartable() {
        let mut section = Section::identity();
        section.add(3);
        section.add(1);
        section.add(2);

        let first: Vec<_> = section.iter().copied().collect();
        let second: Vec<_> = section.iter().copied().collect();
        assert_eq!(first, vec![1, 2, 3]);
        assert_eq!(first, second);
        assert_eq!(section.iter().len(), 3);
    }

    #[test]
    fn test_element_addition_and_removal() {
        let elems = [(1,), (2,), (4,)];
        let mut section = Section::identity();
        for elem in elems {
            section.add(elem);
        }
        assert_eq!(section.len(), elems.len());

        assert!(section.contains(&(2,)));
        assert_eq!(section.discard(&(2,)), Some((2,)));
        assert!(!section.contains(&(2,)));
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_discard_of_absent_key_is_noop() {
        let mut section = Section::with_items(KeyStrategy::identity(), [1, 2, 3]);
        assert_eq!(section.discard(&42), None);
        assert_eq!(section.len(), 3);
    }

    #[test]
    fn test_duplicate_key_replaces_old_item() {
        let mut section = Section::new(by_tag());
        section.add(tagged("a", 1, "first"));
        let replaced = section.add(tagged("a", 5, "second"));

        assert_eq!(section.len(), 1);
        assert_eq!(replaced.map(|t| t.note), Some("first"));
        assert_eq!(section.get("a").map(|t| t.note), Some("second"));
        assert_eq!(section.iter().next().map(|t| t.rank), Some(5));
    }

    #[test]
    fn test_identity_key_is_the_item() {
        let section: Section<(i32, i32, &str)> = Section::identity();
        let item = (1, 2, "boys");
        assert_eq!(section.key_of(&item), item);
    }

    #[test]
    fn test_iteration_follows_sort_key_not_insertion() {
        let mut section = Section::new(by_tag());
        section.add(tagged("x", 3, ""));
        section.add(tagged("y", 1, ""));
        section.add(tagged("z", 2, ""));

        let tags: Vec<_> = section.iter().map(|t| t.tag).collect();
        assert_eq!(tags, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_descending_order() {
        let mut section = Section::new(by_tag().descending());
        section.add(tagged("2019", 2019, ""));
        section.add(tagged("2021", 2021, ""));
        section.add(tagged("2020", 2020, ""));

        let ranks: Vec<_> = section.iter().map(|t| t.rank).collect();
        assert_eq!(ranks, vec![2021, 2020, 2019]);
        assert!(section.strategy().is_descending());
    }

    #[test]
    fn test_ties_break_on_key_in_both_directions() {
        let items = [tagged("c", 1, ""), tagged("a", 1, ""), tagged("b", 1, "")];

        let asc = Section::with_items(by_tag(), items.clone());
        let desc = Section::with_items(by_tag().descending(), items);

        let asc_tags: Vec<_> = asc.iter().map(|t| t.tag).collect();
        let desc_tags: Vec<_> = desc.iter().map(|t| t.tag).collect();
        assert_eq!(asc_tags, vec!["a", "b", "c"]);
        assert_eq!(desc_tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_iteration_is_deferred_until_first_pull() {
        let section = Section::with_items(KeyStrategy::identity(), [3, 1, 2]);

        let mut iter = section.iter();
        assert!(iter.is_pending());
        assert_eq!(iter.len(), 3);

        assert_eq!(iter.next(), Some(&1));
        assert!(!iter.is_pending());
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut section = Section::with_items(KeyStrategy::identity(), [1, 2, 3]);
        section.clear();
        assert!(section.is_empty());
        assert_eq!(section.iter().count(), 0);
    }
}
