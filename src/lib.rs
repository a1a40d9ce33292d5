//! An in-memory ordered key-value map backed by a probabilistic skip list.
//!
//! Keys come from a totally ordered domain: either a statically typed one
//! (any `Ord` type, resolved to [`DefaultComparator`](comparator::DefaultComparator)
//! at compile time) or the dynamic [`Datum`](datum::Datum) domain checked by
//! [`DatumComparator`](comparator::DatumComparator) at run time.
//!
//! ```
//! use skiplist::prelude::*;
//!
//! let mut list: SkipList<i64, &str> = SkipList::new();
//! list.insert(3, "three")?;
//! list.insert(1, "one")?;
//! list.insert(2, "two")?;
//!
//! assert_eq!(list.search(&2)?, &"two");
//!
//! list.delete(&2)?;
//! assert_eq!(list.search(&2), Err(Error::NotFound));
//! # Ok::<(), Error>(())
//! ```

mod arena;
mod skip_list;

pub mod comparator;
pub mod datum;
pub mod error;
pub mod key;

pub mod prelude {
    #![allow(unused)]

    pub use crate::comparator::prelude::*;
    pub use crate::datum::Datum;
    pub use crate::error::{Error, Result};
    pub use crate::key::Key;
    pub use crate::skip_list::{DatumList, MAX_HEIGHT, SkipList, SkipListIter};
}

pub use skip_list::{DatumList, MAX_HEIGHT, SkipList, SkipListIter};
