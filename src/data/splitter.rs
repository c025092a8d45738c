// ============================================================
// Layer 4 — Stratified Train/Test Splitter
// ============================================================
// Splits labelled items into a training set and a held-out test
// set while keeping every label's share the same in both.
//
// Sizes:
//   n_test  = ceil(test_fraction * n)
//   n_train = n - n_test
//   e.g. 30 items, 0.2 → 24 train / 6 test
//
// Per-label test counts:
//   Each label gets floor(n_test * count / n) test items, then the
//   leftover slots go to the labels with the largest fractional
//   remainder (ties → larger label, then alphabetical order).
//   So the per-label counts always add up to exactly n_test.
//
// Determinism:
//   A StdRng seeded from `seed` shuffles each label's items and then
//   both partitions. Same input + same seed → same split.
//
// Rejected inputs (InvalidInput):
//   - fewer than 2 distinct labels
//   - any label with fewer than 2 items
//   - either partition smaller than the number of labels

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{ClassifierError, Result};

/// Split `items` into `(train, test)` stratified on `label_of`.
pub fn stratified_split<T, F>(
    items:         Vec<T>,
    label_of:      F,
    test_fraction: f64,
    seed:          u64,
) -> Result<(Vec<T>, Vec<T>)>
where
    F: Fn(&T) -> &str,
{
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ClassifierError::InvalidInput(format!(
            "test_fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    // ── Group item indices by label (BTreeMap → stable label order) ─────────
    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, item) in items.iter().enumerate() {
        groups.entry(label_of(item).to_string()).or_default().push(i);
    }

    if groups.len() < 2 {
        return Err(ClassifierError::InvalidInput(format!(
            "need at least 2 distinct labels to stratify, found {}",
            groups.len()
        )));
    }
    if let Some((label, idx)) = groups.iter().find(|(_, idx)| idx.len() < 2) {
        return Err(ClassifierError::InvalidInput(format!(
            "label '{label}' has only {} example(s); every label needs at least 2",
            idx.len()
        )));
    }

    let total   = items.len();
    let n_test  = ((total as f64) * test_fraction).ceil() as usize;
    let n_train = total - n_test;
    let n_class = groups.len();
    if n_test < n_class || n_train < n_class {
        return Err(ClassifierError::InvalidInput(format!(
            "split of {total} items into {n_train} train / {n_test} test \
             cannot hold all {n_class} labels in both partitions"
        )));
    }

    let allocation = allocate_test_counts(&groups, total, n_test);

    // ── Shuffle inside each label, take the test share off the front ─────────
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_idx = Vec::with_capacity(n_train);
    let mut test_idx  = Vec::with_capacity(n_test);

    for (label, mut idx) in groups {
        idx.shuffle(&mut rng);
        let take = allocation[&label];
        test_idx.extend_from_slice(&idx[..take]);
        train_idx.extend_from_slice(&idx[take..]);
    }

    // Interleave labels so neither partition is ordered by class
    train_idx.shuffle(&mut rng);
    test_idx.shuffle(&mut rng);

    // ── Move items into their partitions ─────────────────────────────────────
    let mut slots: Vec<Option<T>> = items.into_iter().map(Some).collect();
    let mut take_all = |idx: &[usize]| -> Vec<T> {
        idx.iter().filter_map(|&i| slots[i].take()).collect()
    };
    let train = take_all(train_idx.as_slice());
    let test  = take_all(test_idx.as_slice());

    tracing::debug!(
        "Stratified split: {} train, {} test across {} labels",
        train.len(),
        test.len(),
        n_class
    );

    Ok((train, test))
}

/// Per-label test counts by largest remainder, summing to `n_test`.
fn allocate_test_counts(
    groups: &BTreeMap<String, Vec<usize>>,
    total:  usize,
    n_test: usize,
) -> BTreeMap<String, usize> {
    let mut alloc: BTreeMap<String, usize> = BTreeMap::new();
    let mut remainders: Vec<(f64, usize, &str)> = Vec::with_capacity(groups.len());

    for (label, idx) in groups {
        let ideal = (n_test * idx.len()) as f64 / total as f64;
        let base  = ideal.floor() as usize;
        alloc.insert(label.clone(), base);
        remainders.push((ideal - base as f64, idx.len(), label.as_str()));
    }

    let assigned: usize = alloc.values().sum();
    remainders.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| b.1.cmp(&a.1))
            .then_with(|| a.2.cmp(b.2))
    });
    for (_, _, label) in remainders.into_iter().take(n_test.saturating_sub(assigned)) {
        if let Some(count) = alloc.get_mut(label) {
            *count += 1;
        }
    }

    // Every label keeps at least one training example
    for (label, count) in alloc.iter_mut() {
        *count = (*count).min(groups[label].len() - 1);
    }
    alloc
}
