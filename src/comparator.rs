use std::cmp;

use crate::error::Result;

mod datum_comparator;
mod default_comparator;
mod fn_comparator;

pub mod prelude {
    #![allow(unused)]

    pub use super::{
        Comparator, datum_comparator::DatumComparator, default_comparator::DefaultComparator,
        fn_comparator::FnComparator,
    };
}

pub use datum_comparator::DatumComparator;
pub use default_comparator::DefaultComparator;
pub use fn_comparator::FnComparator;

/// Total order over a key domain.
///
/// `compare` is fallible: a comparator given a pair it cannot order must
/// return [`Error::Incomparable`](crate::error::Error::Incomparable) rather
/// than pretend the keys are equal, since a silent "equal" corrupts the
/// per-level ordering invariant.
pub trait Comparator: Clone {
    type Item;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Result<cmp::Ordering>;
}
