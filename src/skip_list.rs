use std::cmp::Ordering;

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::trace;

use crate::{
    arena::{Link, Node, NodeArena},
    comparator::{Comparator, DatumComparator, DefaultComparator},
    datum::Datum,
    error::{Error, Result},
    key::Key,
};

/// Hard cap on sampled tower heights.
pub const MAX_HEIGHT: usize = 32;

/// A skip list over the dynamic [`Datum`] domain.
pub type DatumList<V = Datum> = SkipList<Datum, V, DatumComparator>;

/// Position whose outgoing links a traversal follows: the head sentinel or
/// a node slot.
#[derive(Debug, Clone, Copy)]
enum Pos {
    Head,
    Node(usize),
}

/// An ordered key-value map backed by a probabilistic skip list.
///
/// Single-threaded by design: no internal locking, and a live
/// [`SkipListIter`] borrows the list, so structural mutation under an
/// outstanding cursor is rejected at compile time.
pub struct SkipList<K, V, C = DefaultComparator<K>> {
    arena: NodeArena<K, V>,
    head: [Link; MAX_HEIGHT],
    height: usize,
    len: usize,
    cmp: C,
    rng: SmallRng,
}

impl<K, V> SkipList<K, V>
where
    K: Key + Ord,
{
    /// Creates an empty list ordered by the key type's intrinsic order.
    pub fn new() -> Self {
        Self::with_comparator(DefaultComparator::default())
    }
}

impl<K, V, C> Default for SkipList<K, V, C>
where
    K: Key,
    C: Comparator<Item = K> + Default,
{
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    K: Key,
    C: Comparator<Item = K>,
{
    /// Creates an empty list ordered by the given comparator.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_parts(cmp, SmallRng::from_os_rng())
    }

    /// Like [`with_comparator`](Self::with_comparator), with deterministic
    /// leveling.
    pub fn with_seed(cmp: C, seed: u64) -> Self {
        Self::with_parts(cmp, SmallRng::seed_from_u64(seed))
    }

    fn with_parts(cmp: C, rng: SmallRng) -> Self {
        Self {
            arena: NodeArena::new(),
            head: [None; MAX_HEIGHT],
            height: 1,
            len: 0,
            cmp,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a key-value pair, overwriting the value in place if the key
    /// is already present.
    ///
    /// Fails with [`Error::NilKey`] on the domain's absent sentinel and
    /// with [`Error::Incomparable`] if the comparator cannot order the key
    /// against a resident one; nothing is mutated on either error.
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        if key.is_nil() {
            return Err(Error::NilKey);
        }

        let update = self.find_preds(&key)?;

        if let Some(next) = self.next_of(update[0], 0) {
            if self.cmp.compare(&self.arena[next].key, &key)? == Ordering::Equal {
                self.arena[next].value = value;
                return Ok(());
            }
        }

        let height = self.random_height();
        if height > self.height {
            // update[] already holds head entries for the fresh levels
            self.height = height;
            trace!(height, "raised list height");
        }

        let mut node = Node::new(key, value, height);
        for level in 0..node.height() {
            node.set_next(level, self.next_of(update[level], level));
        }
        let idx = self.arena.alloc(node);
        for level in 0..height {
            self.set_next(update[level], level, Some(idx));
        }

        self.len += 1;
        Ok(())
    }

    /// Looks up the value stored under `key`.
    pub fn search(&self, key: &K) -> Result<&V> {
        if key.is_nil() {
            return Err(Error::NilKey);
        }

        let mut cur = Pos::Head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(cur, level) {
                match self.cmp.compare(&self.arena[next].key, key)? {
                    Ordering::Less => cur = Pos::Node(next),
                    _ => break,
                }
            }
        }

        if let Some(idx) = self.next_of(cur, 0) {
            if self.cmp.compare(&self.arena[idx].key, key)? == Ordering::Equal {
                return Ok(&self.arena[idx].value);
            }
        }
        Err(Error::NotFound)
    }

    /// Removes the node stored under `key`, unlinking it from every level
    /// it participates in before releasing it.
    pub fn delete(&mut self, key: &K) -> Result<()> {
        if key.is_nil() {
            return Err(Error::NilKey);
        }

        let update = self.find_preds(key)?;

        let target = match self.next_of(update[0], 0) {
            Some(idx) => {
                if self.cmp.compare(&self.arena[idx].key, key)? != Ordering::Equal {
                    return Err(Error::NotFound);
                }
                idx
            }
            None => return Err(Error::NotFound),
        };

        // the node's height bounds how many levels reference it; stop at
        // the first predecessor that skips past it
        for level in 0..self.height {
            if self.next_of(update[level], level) != Some(target) {
                break;
            }
            let beyond = self.arena[target].next(level);
            self.set_next(update[level], level, beyond);
        }

        while self.height > 1 && self.head[self.height - 1].is_none() {
            self.height -= 1;
            trace!(height = self.height, "trimmed empty level");
        }

        self.arena.release(target);
        self.len -= 1;
        Ok(())
    }

    /// Resets to the empty state, dropping every node.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = [None; MAX_HEIGHT];
        self.height = 1;
        self.len = 0;
    }

    /// Returns a cursor positioned before the first element.
    pub fn iter(&self) -> SkipListIter<'_, K, V, C> {
        SkipListIter {
            list: self,
            node: None,
            at_head: true,
        }
    }

    /// Top-down descent recording the last position visited before
    /// dropping a level; `update[i]` is the predecessor whose level-i link
    /// must be rewired to splice or unlink at `key`.
    fn find_preds(&self, key: &K) -> Result<[Pos; MAX_HEIGHT]> {
        let mut update = [Pos::Head; MAX_HEIGHT];
        let mut cur = Pos::Head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(cur, level) {
                match self.cmp.compare(&self.arena[next].key, key)? {
                    Ordering::Less => cur = Pos::Node(next),
                    _ => break,
                }
            }
            update[level] = cur;
        }
        Ok(update)
    }

    /// Samples a tower height: start at 1, keep flipping a fair coin until
    /// it fails or the cap is reached.
    fn random_height(&mut self) -> usize {
        const P: f64 = 0.5;

        let mut height = 1;
        while height < MAX_HEIGHT && self.rng.random_bool(P) {
            height += 1;
        }
        height
    }

    fn next_of(&self, pos: Pos, level: usize) -> Link {
        match pos {
            Pos::Head => self.head[level],
            Pos::Node(idx) => self.arena[idx].next(level),
        }
    }

    fn set_next(&mut self, pos: Pos, level: usize, link: Link) {
        match pos {
            Pos::Head => self.head[level] = link,
            Pos::Node(idx) => self.arena[idx].set_next(level, link),
        }
    }

    /// Rightmost node, reached by descending through the tower.
    fn find_last(&self) -> Link {
        let mut cur = Pos::Head;
        for level in (0..self.height).rev() {
            while let Some(next) = self.next_of(cur, level) {
                cur = Pos::Node(next);
            }
        }
        match cur {
            Pos::Head => None,
            Pos::Node(idx) => Some(idx),
        }
    }
}

impl<K, V, C> SkipList<K, V, C>
where
    K: Clone,
{
    /// All keys in comparator order, or reversed. The bottom chain is kept
    /// sorted by the ordering invariant, so extraction needs no re-sort.
    pub fn sort_by_key(&self, reverse: bool) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len);
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            keys.push(self.arena[idx].key.clone());
            cur = self.arena[idx].next(0);
        }
        if reverse {
            keys.reverse();
        }
        keys
    }
}

/// Type-filtered aggregates over the dynamic key domain. Keys of other
/// variants are skipped, never an error, so they behave on a mixed list
/// (buildable only through a cross-type comparator).
impl<V, C> SkipList<Datum, V, C>
where
    C: Comparator<Item = Datum>,
{
    /// Smallest integer key, if any.
    pub fn min_int(&self) -> Option<i64> {
        let mut best = None;
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            if let Datum::Int(v) = self.arena[idx].key {
                best = Some(best.map_or(v, |b: i64| b.min(v)));
            }
            cur = self.arena[idx].next(0);
        }
        best
    }

    /// Largest integer key, if any. Descends to the rightmost node first
    /// and only falls back to a scan when the tail is not an integer.
    pub fn max_int(&self) -> Option<i64> {
        if let Some(idx) = self.find_last() {
            if let Datum::Int(v) = self.arena[idx].key {
                return Some(v);
            }
        }

        let mut best = None;
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            if let Datum::Int(v) = self.arena[idx].key {
                best = Some(best.map_or(v, |b: i64| b.max(v)));
            }
            cur = self.arena[idx].next(0);
        }
        best
    }

    /// Lexicographically smallest string key, if any. The empty string is
    /// a real key and a real answer.
    pub fn min_string(&self) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            if let Datum::Str(s) = &self.arena[idx].key {
                if best.is_none_or(|b| s.as_str() < b) {
                    best = Some(s);
                }
            }
            cur = self.arena[idx].next(0);
        }
        best
    }

    /// Lexicographically largest string key, if any.
    pub fn max_string(&self) -> Option<&str> {
        let mut best: Option<&str> = None;
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            if let Datum::Str(s) = &self.arena[idx].key {
                if best.is_none_or(|b| s.as_str() > b) {
                    best = Some(s);
                }
            }
            cur = self.arena[idx].next(0);
        }
        best
    }
}

impl<K, C> SkipList<K, Datum, C> {
    /// All values sorted under the lenient datum order: ints numerically,
    /// strings lexicographically, anything else equal to everything. The
    /// sort is stable, so unordered values keep their extraction order.
    pub fn sort_by_value(&self, reverse: bool) -> Vec<Datum> {
        let mut values = Vec::with_capacity(self.len);
        let mut cur = self.head[0];
        while let Some(idx) = cur {
            values.push(self.arena[idx].value.clone());
            cur = self.arena[idx].next(0);
        }
        if reverse {
            values.sort_by(|a, b| b.lenient_cmp(a));
        } else {
            values.sort_by(|a, b| a.lenient_cmp(b));
        }
        values
    }
}

/// Forward-only, single-pass cursor over the bottom chain.
///
/// Starts before the first element; `key`/`value` report `None` until the
/// first successful [`next`](Self::next). A fresh cursor is needed to
/// iterate again.
pub struct SkipListIter<'a, K, V, C> {
    list: &'a SkipList<K, V, C>,
    node: Link,
    at_head: bool,
}

impl<'a, K, V, C> SkipListIter<'a, K, V, C> {
    /// Advances to the next node, reporting whether one existed. An
    /// exhausted cursor stays parked on the last node.
    pub fn next(&mut self) -> bool {
        let step = if self.at_head {
            self.list.head[0]
        } else {
            self.node.and_then(|idx| self.list.arena[idx].next(0))
        };
        match step {
            Some(idx) => {
                self.node = Some(idx);
                self.at_head = false;
                true
            }
            None => false,
        }
    }

    pub fn key(&self) -> Option<&'a K> {
        if self.at_head {
            return None;
        }
        self.node.map(|idx| &self.list.arena[idx].key)
    }

    pub fn value(&self) -> Option<&'a V> {
        if self.at_head {
            return None;
        }
        self.node.map(|idx| &self.list.arena[idx].value)
    }
}
