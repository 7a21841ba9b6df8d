use super::{Outcome, OutcomeStatus};

/// Per-item line of a [`BatchSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetail<K> {
    pub key: K,
    pub success: bool,
    pub status: OutcomeStatus,
    pub error: Option<String>,
}

/// Aggregated result of a batch.
///
/// `successful + failed == total == details.len()` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary<K> {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub details: Vec<ItemDetail<K>>,
}

/// Pair each outcome with the key of the item that produced it.
///
/// # Panics
///
/// Panics if `outcomes` and `keys` differ in length. The dispatcher always
/// returns one outcome per item, so a mismatch is a bug at the call site.
pub fn summarize<K, R>(outcomes: Vec<Outcome<R>>, keys: Vec<K>) -> BatchSummary<K> {
    assert_eq!(
        outcomes.len(),
        keys.len(),
        "summarize: {} outcomes for {} keys",
        outcomes.len(),
        keys.len()
    );

    let details: Vec<ItemDetail<K>> = keys
        .into_iter()
        .zip(outcomes)
        .map(|(key, outcome)| ItemDetail {
            key,
            success: outcome.is_fulfilled(),
            status: outcome.status(),
            error: outcome.error().map(str::to_string),
        })
        .collect();

    let successful = details.iter().filter(|d| d.success).count();

    BatchSummary {
        total: details.len(),
        successful,
        failed: details.len() - successful,
        details,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_order() {
        let outcomes = vec![
            Outcome::Fulfilled(()),
            Outcome::Rejected("403 Forbidden".to_string()),
            Outcome::Fulfilled(()),
        ];
        let keys = vec!["a", "b", "c"];

        let summary = summarize(outcomes, keys);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.successful + summary.failed, summary.details.len());
        assert_eq!(
            summary.details.iter().map(|d| d.key).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );

        let failed = &summary.details[1];
        assert!(!failed.success);
        assert_eq!(failed.status, OutcomeStatus::Rejected);
        assert_eq!(failed.error.as_deref(), Some("403 Forbidden"));

        let ok = &summary.details[0];
        assert_eq!(ok.status, OutcomeStatus::Fulfilled);
        assert_eq!(ok.error, None);
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(Vec::<Outcome<()>>::new(), Vec::<String>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.failed, 0);
        assert!(summary.details.is_empty());
    }

    #[test]
    #[should_panic(expected = "2 outcomes for 1 keys")]
    fn test_mismatched_lengths_fail_fast() {
        let outcomes = vec![Outcome::Fulfilled(1), Outcome::Fulfilled(2)];
        summarize(outcomes, vec!["only-one"]);
    }
}
