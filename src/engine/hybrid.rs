//! Hybrid Controller: drives the length ladder from `l_min` to `l_max`,
//! starting in Apriori mode and switching to Position mode at the first
//! length whose queue would fit the memory budget. Never switches back.

use log::info;

use crate::config::MinerConfig;
use crate::engine::{apriori, position};
use crate::errs::{MinerError, MinerResult};
use crate::pass_counter::PassCounter;
use crate::provider::SequenceProvider;
use crate::queue::Queue;
use crate::threshold::{count_frequent_occurrences, Threshold};
use crate::trie::Trie;

/// Which algorithm(s) the controller is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    Apriori,
    Position,
    #[default]
    Hybrid,
}

/// Run the length ladder `l_min..=l_max` under `method`, returning the
/// finished trie. Matches the original mining scripts' `frequent_patterns`
/// state machine: S0 (init) -> S_loop (extend once per length) -> S_end.
pub fn run(
    provider: &dyn SequenceProvider,
    l_min: usize,
    l_max: usize,
    threshold: &Threshold,
    method: Method,
    counter: &mut dyn PassCounter,
    config: &MinerConfig,
) -> MinerResult<Trie> {
    let mut current_m = l_min;
    let mut trie = apriori::initialize(provider, current_m, counter);
    let max_queue_size = config.max_queue_size();

    let thrd_at = |m: usize| -> u64 { threshold.at(m).unwrap_or(u64::MAX) };

    let mut use_apriori = true;
    let mut queue: Queue = Queue::new();

    match method {
        Method::Position => {
            let occurrences =
                count_frequent_occurrences(&trie, current_m, thrd_at(current_m));
            if occurrences > max_queue_size {
                return Err(MinerError::ExceedAllocatedMemory {
                    required: occurrences,
                    allowed: max_queue_size,
                });
            }
            position::assign_pattern_index(&mut trie, current_m, thrd_at(current_m));
            queue = position::build_queue(provider, &trie, current_m, counter);
        }
        Method::Hybrid => {
            use_apriori = true;
        }
        Method::Apriori => {}
    }

    info!(
        "hybrid: initialized at length {current_m}, {} instances found",
        count_frequent_occurrences(&trie, current_m, thrd_at(current_m))
    );

    while current_m < l_max {
        if matches!(method, Method::Hybrid)
            && use_apriori
            && count_frequent_occurrences(&trie, current_m, thrd_at(current_m))
                <= max_queue_size
        {
            use_apriori = false;
            position::assign_pattern_index(&mut trie, current_m, thrd_at(current_m));
            queue = position::build_queue(provider, &trie, current_m, counter);
        }

        current_m += 1;

        match method {
            Method::Apriori => {
                apriori::extend(provider, &mut trie, current_m, thrd_at(current_m - 1), counter);
            }
            Method::Position => {
                position::extend(&mut trie, &mut queue, current_m, thrd_at(current_m - 1));
            }
            Method::Hybrid => {
                if use_apriori {
                    apriori::extend(
                        provider,
                        &mut trie,
                        current_m,
                        thrd_at(current_m - 1),
                        counter,
                    );
                } else {
                    position::extend(&mut trie, &mut queue, current_m, thrd_at(current_m - 1));
                }
            }
        }

        info!(
            "hybrid: length {current_m} done, {} instances found",
            count_frequent_occurrences(&trie, current_m, thrd_at(current_m))
        );
    }

    Ok(trie)
}
