use std::{cmp, marker::PhantomData};

use super::Comparator;
use crate::error::Result;

/// Adapter turning a plain comparison closure into a [`Comparator`].
///
/// The closure defines an infallible total order, so mismatch errors cannot
/// arise through this path.
#[derive(Debug)]
pub struct FnComparator<K, F> {
    f: F,
    _marker: PhantomData<K>,
}

impl<K, F> FnComparator<K, F>
where
    F: Fn(&K, &K) -> cmp::Ordering + Clone,
{
    pub fn new(f: F) -> Self {
        Self {
            f,
            _marker: PhantomData,
        }
    }
}

impl<K, F> Comparator for FnComparator<K, F>
where
    F: Fn(&K, &K) -> cmp::Ordering + Clone,
{
    type Item = K;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Result<cmp::Ordering> {
        Ok((self.f)(a, b))
    }
}

impl<K, F> Clone for FnComparator<K, F>
where
    F: Clone,
{
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _marker: PhantomData,
        }
    }
}
