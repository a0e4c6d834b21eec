//! Frequent sequential pattern mining over DNA corpora: a trie of
//! substrings and their supports, grown to a maximum length by one of two
//! interchangeable algorithms (a multi-pass Apriori join, a single-pass
//! position queue join), plus a hybrid controller that starts with Apriori
//! and switches to the position queue once it fits a memory budget.

pub mod alphabet;
pub mod config;
pub mod corpus;
pub mod engine;
pub mod errs;
pub mod logging;
pub mod pass_counter;
pub mod provider;
pub mod queue;
pub mod significance;
pub mod threshold;
pub mod trie;

pub use config::MinerConfig;
pub use engine::hybrid::Method;
pub use errs::{MinerError, MinerResult};
pub use pass_counter::{CountingPassCounter, NullPassCounter, PassCounter};
pub use provider::SequenceProvider;
pub use threshold::Threshold;

/// Mine all contiguous patterns of length `l_min..=l_max` whose support
/// meets `threshold`, from the sequences `provider` yields.
///
/// `counter`, if given, is incremented once per full pass over the corpus
/// (Apriori rescans every extension; Position rescans exactly once at
/// initialization/switch time; Hybrid is whichever mixture the controller
/// settles into).
pub fn frequent_patterns(
    provider: &dyn SequenceProvider,
    l_min: usize,
    l_max: usize,
    threshold: Threshold,
    method: Method,
    counter: Option<&mut dyn PassCounter>,
    config: &MinerConfig,
) -> MinerResult<Vec<(String, u64)>> {
    let mut null_counter = pass_counter::NullPassCounter;
    let counter = counter.unwrap_or(&mut null_counter);

    let trie = engine::hybrid::run(
        provider, l_min, l_max, &threshold, method, counter, config,
    )?;

    Ok(threshold::filter_patterns(&trie, &threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::VecProvider;

    #[test]
    fn end_to_end_apriori_and_hybrid_agree() {
        let provider = VecProvider::new(vec![
            "ACGATTCGATCG".to_string(),
            "ACGATTCGATCG".to_string(),
        ]);
        let threshold = Threshold::Scalar(4);

        let mut apriori_counter = pass_counter::CountingPassCounter::default();
        let mut apriori_result = frequent_patterns(
            &provider,
            2,
            3,
            threshold.clone(),
            Method::Apriori,
            Some(&mut apriori_counter),
            &MinerConfig::default(),
        )
        .unwrap();
        apriori_result.sort();

        let mut hybrid_counter = pass_counter::CountingPassCounter::default();
        let mut hybrid_result = frequent_patterns(
            &provider,
            2,
            3,
            threshold,
            Method::Hybrid,
            Some(&mut hybrid_counter),
            &MinerConfig::default(),
        )
        .unwrap();
        hybrid_result.sort();

        assert_eq!(apriori_result, hybrid_result);
        assert_eq!(apriori_counter.count(), 2);
        assert_eq!(hybrid_counter.count(), 2);
    }
}
