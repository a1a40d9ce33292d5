use std::cmp;

use super::Comparator;
use crate::{
    datum::Datum,
    error::{Error, Result},
};

/// Comparator for the dynamic [`Datum`] domain.
///
/// Ints order numerically and strings lexicographically. Any other pairing
/// is refused, so a list built through this comparator stays homogeneous.
#[derive(Debug, Default, Clone, Copy)]
pub struct DatumComparator;

impl Comparator for DatumComparator {
    type Item = Datum;

    fn compare(&self, a: &Self::Item, b: &Self::Item) -> Result<cmp::Ordering> {
        match (a, b) {
            (Datum::Int(x), Datum::Int(y)) => Ok(x.cmp(y)),
            (Datum::Str(x), Datum::Str(y)) => Ok(x.cmp(y)),
            _ => Err(Error::Incomparable {
                lhs: a.type_name(),
                rhs: b.type_name(),
            }),
        }
    }
}
