// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::validate_min_support;
use crate::error::{ConfigError, Error, Result};
use crate::index::Index;
use crate::item::Item;
use crate::item_counter::ItemCounter;
use crate::itemset::Itemset;
use fnv::FnvHashMap;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Shared flag used to abort a mining run between levels.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> CancelToken {
        CancelToken::default()
    }
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Every itemset whose support reached the minimum, grouped by size.
///
/// Each level is sorted in canonical order and never changes once added.
/// Every subset of an itemset in the table is also in the table.
#[derive(Clone, Debug)]
pub struct FrequentItemsets {
    num_transactions: usize,
    levels: Vec<Vec<(Itemset, u32)>>,
    lookup: FnvHashMap<Itemset, u32>,
}

impl FrequentItemsets {
    pub(crate) fn new(num_transactions: usize) -> FrequentItemsets {
        FrequentItemsets {
            num_transactions,
            levels: vec![],
            lookup: FnvHashMap::default(),
        }
    }

    pub(crate) fn push_level(&mut self, mut level: Vec<(Itemset, u32)>) {
        level.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        for (itemset, count) in &level {
            self.lookup.insert(itemset.clone(), *count);
        }
        self.levels.push(level);
    }

    pub fn num_transactions(&self) -> usize {
        self.num_transactions
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Size of the largest frequent itemset, 0 if there are none.
    pub fn max_len(&self) -> usize {
        self.levels.len()
    }

    /// The frequent itemsets of size k with their support counts.
    pub fn level(&self, k: usize) -> &[(Itemset, u32)] {
        match k.checked_sub(1).and_then(|i| self.levels.get(i)) {
            Some(level) => level.as_slice(),
            None => &[],
        }
    }

    pub fn count_of(&self, itemset: &Itemset) -> Option<u32> {
        self.lookup.get(itemset).cloned()
    }

    pub fn support_of(&self, itemset: &Itemset) -> Option<f64> {
        self.count_of(itemset).map(|count| self.fraction(count))
    }

    pub fn contains(&self, itemset: &Itemset) -> bool {
        self.lookup.contains_key(itemset)
    }

    /// All itemsets with their support fractions, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, f64)> + '_ {
        self.levels
            .iter()
            .flatten()
            .map(move |(itemset, count)| (itemset, self.fraction(*count)))
    }

    fn fraction(&self, count: u32) -> f64 {
        (count as f64) / (self.num_transactions as f64)
    }
}

enum Phase {
    Generating,
    Counting(Vec<Itemset>),
    Pruning(Vec<(Itemset, u32)>),
    Done,
}

/// Level-wise frequent itemset miner.
pub struct Apriori<'a> {
    index: &'a Index,
    min_support: f64,
    max_len: Option<usize>,
    cancel: Option<CancelToken>,
}

impl<'a> Apriori<'a> {
    pub fn new(index: &'a Index, min_support: f64) -> Apriori<'a> {
        Apriori {
            index,
            min_support,
            max_len: None,
            cancel: None,
        }
    }

    pub fn max_len(mut self, max_len: Option<usize>) -> Apriori<'a> {
        self.max_len = max_len;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Apriori<'a> {
        self.cancel = Some(token);
        self
    }

    pub fn run(&self) -> Result<FrequentItemsets> {
        validate_min_support(self.min_support)?;
        if self.max_len == Some(0) {
            return Err(ConfigError::MaxLen.into());
        }

        let timer = Instant::now();
        let mut table = FrequentItemsets::new(self.index.num_transactions());
        let mut level = 1;
        let mut phase = Phase::Generating;
        loop {
            phase = match phase {
                Phase::Generating => {
                    if self.is_cancelled() {
                        return Err(Error::Cancelled { level });
                    }
                    let candidates = self.generate(level, &table);
                    debug!(level, candidates = candidates.len(), "generated candidates");
                    if candidates.is_empty() {
                        Phase::Done
                    } else {
                        Phase::Counting(candidates)
                    }
                }
                Phase::Counting(candidates) => Phase::Pruning(self.count(level, candidates)),
                Phase::Pruning(counted) => {
                    let frequent: Vec<(Itemset, u32)> = counted
                        .into_iter()
                        .filter(|(_, count)| self.is_frequent(*count))
                        .collect();
                    debug!(level, frequent = frequent.len(), "kept frequent itemsets");
                    if frequent.is_empty() {
                        Phase::Done
                    } else {
                        table.push_level(frequent);
                        if self.is_last_level(level) {
                            Phase::Done
                        } else {
                            level += 1;
                            Phase::Generating
                        }
                    }
                }
                Phase::Done => break,
            };
        }

        info!(
            itemsets = table.len(),
            max_len = table.max_len(),
            elapsed_ms = timer.elapsed().as_millis() as u64,
            "apriori finished"
        );
        Ok(table)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().map_or(false, |c| c.is_cancelled())
    }

    fn is_last_level(&self, level: usize) -> bool {
        level >= self.index.num_items() || self.max_len.map_or(false, |max| level >= max)
    }

    fn is_frequent(&self, count: u32) -> bool {
        let n = self.index.num_transactions();
        n > 0 && (count as f64) / (n as f64) >= self.min_support
    }

    // Candidates of size k. Size 1 candidates are every vocabulary item;
    // larger candidates extend a frequent (k-1)-itemset by a frequent item
    // greater than its largest member, and survive only if every one of
    // their (k-1)-subsets is frequent.
    fn generate(&self, k: usize, table: &FrequentItemsets) -> Vec<Itemset> {
        if k == 1 {
            return (0..self.index.num_items())
                .map(|i| Itemset::from_items(Some(Item::with_id(i as u32))))
                .collect();
        }

        let singles: Vec<Item> = table
            .level(1)
            .iter()
            .filter_map(|(itemset, _)| itemset.last())
            .collect();

        let mut candidates = vec![];
        for (prefix, _) in table.level(k - 1) {
            let last = match prefix.last() {
                Some(last) => last,
                None => continue,
            };
            for &item in singles.iter().filter(|&&item| item > last) {
                let candidate = prefix.with_item(item);
                let all_subsets_frequent = prefix
                    .iter()
                    .all(|member| table.contains(&candidate.without_item(member)));
                if all_subsets_frequent {
                    candidates.push(candidate);
                }
            }
        }
        candidates
    }

    fn count(&self, k: usize, candidates: Vec<Itemset>) -> Vec<(Itemset, u32)> {
        if k == 1 {
            let mut counter = ItemCounter::new(self.index.num_items());
            for row in self.index.rows() {
                counter.add_transaction(row);
            }
            return candidates
                .into_iter()
                .map(|candidate| {
                    let count = candidate.last().map_or(0, |item| counter.get(&item));
                    (candidate, count)
                })
                .collect();
        }

        let index = self.index;
        candidates
            .into_par_iter()
            .map(|candidate| {
                let count = index.count(&candidate);
                (candidate, count)
            })
            .collect()
    }
}

/// Mines every itemset with support fraction at least min_support.
pub fn mine(index: &Index, min_support: f64) -> Result<FrequentItemsets> {
    Apriori::new(index, min_support).run()
}
