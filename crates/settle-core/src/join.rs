//! Foreign-key join of primary records against secondary records.
//!
//! The join is pure and synchronous. It degrades instead of failing:
//! - primary failure: nothing to aggregate against, the result is empty
//! - secondary failure: treated as an empty collection, every count is zero
//!
//! Duplicate primary ids are collapsed to their first occurrence.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::category::CategorySet;
use crate::outcome::Outcome;
use crate::records::{AggregateRecord, PrimaryRecord, SecondaryRecord};

/// Join using foreign-key equality on `PrimaryRecord::id`.
///
/// Secondary records are indexed by foreign key first, so this runs in
/// `O(P + S·C)` for `C` categories.
#[must_use]
pub fn aggregate(
    primary: &Outcome<PrimaryRecord>,
    secondary: &Outcome<SecondaryRecord>,
    categories: &CategorySet,
) -> Vec<AggregateRecord> {
    let Outcome::Success { payload: owners } = primary else {
        return Vec::new();
    };

    let mut by_key: HashMap<i64, Vec<&SecondaryRecord>> = HashMap::new();
    for record in secondary.payload_or_empty() {
        by_key.entry(record.foreign_key).or_default().push(record);
    }

    unique_owners(owners)
        .map(|owner| {
            let owned = by_key.get(&owner.id).map_or(&[][..], Vec::as_slice);
            tally(owner, owned.iter().copied(), categories)
        })
        .collect()
}

/// Join using an arbitrary equality relation between owner and record.
///
/// Runs in `O(P·S)`. With `|p, s| s.foreign_key == p.id` it produces the same
/// output as [`aggregate`].
#[must_use]
pub fn aggregate_by<F>(
    primary: &Outcome<PrimaryRecord>,
    secondary: &Outcome<SecondaryRecord>,
    categories: &CategorySet,
    belongs_to: F,
) -> Vec<AggregateRecord>
where
    F: Fn(&PrimaryRecord, &SecondaryRecord) -> bool,
{
    let Outcome::Success { payload: owners } = primary else {
        return Vec::new();
    };
    let records = secondary.payload_or_empty();

    unique_owners(owners)
        .map(|owner| {
            let owned = records.iter().filter(|record| belongs_to(owner, *record));
            tally(owner, owned, categories)
        })
        .collect()
}

fn unique_owners(owners: &[PrimaryRecord]) -> impl Iterator<Item = &PrimaryRecord> {
    let mut seen = HashSet::with_capacity(owners.len());
    owners.iter().filter(move |owner| seen.insert(owner.id))
}

fn tally<'a>(
    owner: &PrimaryRecord,
    owned: impl Iterator<Item = &'a SecondaryRecord> + Clone,
    categories: &CategorySet,
) -> AggregateRecord {
    let counts_by_category: BTreeMap<String, u64> = categories
        .iter()
        .map(|category| {
            let count = owned
                .clone()
                .filter(|record| category.predicate.matches(record))
                .count();
            (category.name.clone(), count as u64)
        })
        .collect();

    AggregateRecord {
        owner_name: owner.name.clone(),
        counts_by_category,
    }
}
