// ============================================================
// Train/Validation Splitter
// ============================================================
// Deterministic, order-preserving split: the first
// (1 - validation_split) fraction of records (by original order)
// is training data, the remainder is validation data.
//
// There is NO shuffling. Two runs on identical input always
// produce identical partitions — that determinism is part of
// the contract and tested below.

/// Split `records` into (train, validation) by original order.
///
/// # Example
/// 100 records with `validation_split = 0.1` → first 90 train,
/// last 10 validation.
pub fn split_data<T>(mut records: Vec<T>, validation_split: f64) -> (Vec<T>, Vec<T>) {
    let total = records.len();
    let split_at = ((total as f64) * (1.0 - validation_split)).floor() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes [n..] from the Vec and returns it
    let validation = records.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        records.len(),
        validation.len(),
    );

    (records, validation)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Splitting never loses or reorders records.
        #[test]
        fn split_preserves_order_and_content(
            items in prop::collection::vec(0usize..1000, 0..200),
            split in 0.0f64..1.0,
        ) {
            let (train, valid) = split_data(items.clone(), split);
            let mut rejoined = train;
            rejoined.extend(valid);
            prop_assert_eq!(rejoined, items);
        }
    }
}
