//! Determinism utilities: the canonical ranking order for opportunities.
//!
//! Ranking is **descending by `max_employees`**. Ties keep catalog order,
//! which falls out of using a stable sort over a catalog-ordered input.

use core::cmp::Ordering;

use crate::entities::Opportunity;

/// Larger potential first. Equal potential compares `Equal` so a stable sort
/// preserves input order.
#[inline]
pub fn cmp_potential_desc(a: &Opportunity, b: &Opportunity) -> Ordering {
    b.max_employees.cmp(&a.max_employees)
}

/// Sort **in place** into ranking order (stable).
#[inline]
pub fn sort_by_potential_desc<T: AsRef<Opportunity>>(xs: &mut [T]) {
    xs.sort_by(|a, b| cmp_potential_desc(a.as_ref(), b.as_ref()));
}

impl AsRef<Opportunity> for Opportunity {
    #[inline]
    fn as_ref(&self) -> &Opportunity {
        self
    }
}

/// True iff `xs` is non-increasing in `max_employees`.
pub fn is_ranked<T: AsRef<Opportunity>>(xs: &[T]) -> bool {
    xs.windows(2)
        .all(|w| w[0].as_ref().max_employees >= w[1].as_ref().max_employees)
}

/* ---------------------------------- Tests --------------------------------- */
