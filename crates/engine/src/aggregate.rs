//! Totals and group-by sums over record collections.

use std::collections::BTreeMap;

use crate::{EngineError, Money, ResultEngine};

/// A record carrying a monetary amount.
pub trait Amounted {
    fn amount(&self) -> Money;
}

/// Sum of `amount` over `records`. Empty input sums to zero.
pub fn total_amount<'a, T>(records: impl IntoIterator<Item = &'a T>) -> ResultEngine<Money>
where
    T: Amounted + 'a,
{
    records.into_iter().try_fold(Money::ZERO, |acc, record| {
        acc.checked_add(record.amount())
            .ok_or(EngineError::Overflow)
    })
}

/// Sum of `amount` per derived key. Empty input yields an empty map.
pub fn group_sum<'a, T, K, F>(
    records: impl IntoIterator<Item = &'a T>,
    mut key_fn: F,
) -> ResultEngine<BTreeMap<K, Money>>
where
    T: Amounted + 'a,
    K: Ord,
    F: FnMut(&'a T) -> K,
{
    let mut groups: BTreeMap<K, Money> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key_fn(record)).or_insert(Money::ZERO);
        *entry = entry
            .checked_add(record.amount())
            .ok_or(EngineError::Overflow)?;
    }
    Ok(groups)
}
