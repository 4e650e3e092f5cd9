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

use crate::apriori::FrequentItemsets;
use crate::config::Metric;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::itemset::Itemset;
use crate::rule::Rule;
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use std::time::Instant;
use tracing::info;

/// Largest itemset that can be split into rules; splits are enumerated as
/// bit masks over a u64.
pub const MAX_PARTITION_LEN: usize = 63;

/// Every way of splitting the itemset into a non-empty antecedent and a
/// non-empty consequent; 2^k - 2 pairs for an itemset of size k.
///
/// Panics if the itemset has more than `MAX_PARTITION_LEN` items.
pub fn partitions(itemset: &Itemset) -> Vec<(Itemset, Itemset)> {
    let items: Vec<Item> = itemset.items();
    let k = items.len();
    if k < 2 {
        return vec![];
    }
    assert!(k <= MAX_PARTITION_LEN, "itemset too large to partition");

    let full: u64 = (1 << k) - 1;
    (1..full)
        .map(|mask| {
            let antecedent = Itemset::from_items(
                items
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| mask & (1 << i) != 0)
                    .map(|(_, &item)| item),
            );
            let consequent = itemset.difference(&antecedent);
            (antecedent, consequent)
        })
        .collect()
}

/// Splits every frequent itemset of two or more items into rules, keeping
/// those whose metric is at least min_threshold.
///
/// Confidence is not anti-monotone across antecedents of one itemset, so
/// every split is evaluated. Rules are ordered by descending lift, then by
/// the canonical order of their itemset, then of their antecedent.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    metric: Metric,
    min_threshold: f64,
) -> Result<Vec<Rule>> {
    metric.validate_threshold(min_threshold)?;
    if itemsets.max_len() > MAX_PARTITION_LEN {
        return Err(Error::ItemsetTooLarge {
            len: itemsets.max_len(),
            max: MAX_PARTITION_LEN,
        });
    }

    let timer = Instant::now();
    let sources: Vec<&Itemset> = (2..=itemsets.max_len())
        .flat_map(move |k| itemsets.level(k).iter().map(|(itemset, _)| itemset))
        .collect();

    let mut rules: Vec<Rule> = sources
        .par_iter()
        .flat_map_iter(move |itemset| {
            partitions(itemset)
                .into_iter()
                .filter_map(move |(antecedent, consequent)| {
                    Rule::make(antecedent, consequent, itemsets)
                })
                .filter(move |rule| rule.metric(metric) >= min_threshold)
        })
        .collect();

    rules.sort_by(|a, b| {
        OrderedFloat(b.lift)
            .cmp(&OrderedFloat(a.lift))
            .then_with(|| a.itemset().cmp(&b.itemset()))
            .then_with(|| a.antecedent.cmp(&b.antecedent))
    });

    info!(
        rules = rules.len(),
        itemsets = sources.len(),
        %metric,
        min_threshold,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "generated rules"
    );
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::{generate_rules, partitions, MAX_PARTITION_LEN};
    use crate::apriori::{mine, FrequentItemsets};
    use crate::config::Metric;
    use crate::encoder::{encode, Encoded};
    use crate::error::{ConfigError, Error};
    use crate::item::Item;
    use crate::itemset::Itemset;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // HARM's census2.csv test dataset.
    fn census() -> Encoded {
        let transactions = vec![
            vec!["a", "b", "c"],
            vec!["d", "b", "c"],
            vec!["a", "b", "e"],
            vec!["f", "g", "c"],
            vec!["d", "g", "e"],
            vec!["f", "b", "c"],
            vec!["f", "b", "c"],
            vec!["a", "b", "e"],
            vec!["a", "b", "c"],
            vec!["a", "b", "e"],
            vec!["a", "b", "e"],
        ];
        encode(&transactions).unwrap()
    }

    #[test]
    fn test_partitions() {
        for k in 0..8u32 {
            let itemset = Itemset::from_items((0..k).map(|i| Item::with_id(i * 3)));
            let splits = partitions(&itemset);
            let expected = if k < 2 { 0 } else { (1usize << k) - 2 };
            assert_eq!(splits.len(), expected);
            for (antecedent, consequent) in &splits {
                assert!(!antecedent.is_empty());
                assert!(!consequent.is_empty());
                assert!(antecedent.is_disjoint(consequent));
                assert_eq!(antecedent.union(consequent), itemset);
            }
        }
    }

    #[test]
    fn test_census_rules() {
        let encoded = census();
        let table = mine(&encoded.index, 0.05).unwrap();
        let rules = generate_rules(&table, Metric::Confidence, 0.05).unwrap();

        // Every split of every frequent itemset qualifies at this threshold.
        let expected: usize = (2..=table.max_len())
            .map(|k| table.level(k).len() * ((1 << k) - 2))
            .sum();
        assert_eq!(rules.len(), expected);

        let find = |description: &str| {
            rules
                .iter()
                .find(|r| r.to_string(&encoded.itemizer) == description)
                .unwrap_or_else(|| panic!("missing rule {}", description))
        };

        let rule = find("c g => f");
        assert!(close(rule.confidence, 1.0));
        assert!(close(rule.lift, 11.0 / 3.0));
        assert!(close(rule.support, 1.0 / 11.0));

        let rule = find("d => e g");
        assert!(close(rule.confidence, 0.5));
        assert!(close(rule.lift, 5.5));

        let rule = find("a => b");
        assert!(close(rule.confidence, 1.0));
        assert!(close(rule.lift, 11.0 / 9.0));
        assert!(close(rule.support, 6.0 / 11.0));

        let rule = find("b => a e");
        assert!(close(rule.confidence, 4.0 / 9.0));
        assert!(close(rule.lift, (4.0 / 9.0) / (4.0 / 11.0)));

        // Highest lift first.
        assert_eq!(rules[0].to_string(&encoded.itemizer), "d => e g");
        for pair in rules.windows(2) {
            assert!(pair[0].lift >= pair[1].lift);
        }
    }

    #[test]
    fn test_filter_by_metric() {
        let encoded = census();
        let table = mine(&encoded.index, 0.05).unwrap();

        let by_lift = generate_rules(&table, Metric::Lift, 3.0).unwrap();
        assert!(!by_lift.is_empty());
        assert!(by_lift.iter().all(|r| r.lift >= 3.0));

        let by_support = generate_rules(&table, Metric::Support, 0.5).unwrap();
        let names: Vec<String> = by_support
            .iter()
            .map(|r| r.to_string(&encoded.itemizer))
            .collect();
        assert_eq!(names, vec!["a => b", "b => a"]);

        let by_conviction = generate_rules(&table, Metric::Conviction, 1e9).unwrap();
        assert!(by_conviction.iter().all(|r| r.confidence == 1.0));
        assert!(!by_conviction.is_empty());
    }

    #[test]
    fn test_empty_table_yields_no_rules() {
        let encoded = census();
        let table = mine(&encoded.index, 1.0).unwrap();
        assert!(generate_rules(&table, Metric::Confidence, 0.0)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_oversized_itemset_is_rejected() {
        let mut table = FrequentItemsets::new(1);
        for k in 1..=(MAX_PARTITION_LEN + 1) {
            let itemset = Itemset::from_items((0..k as u32).map(Item::with_id));
            table.push_level(vec![(itemset, 1)]);
        }
        match generate_rules(&table, Metric::Confidence, 0.5) {
            Err(Error::ItemsetTooLarge { len, max }) => {
                assert_eq!(len, MAX_PARTITION_LEN + 1);
                assert_eq!(max, MAX_PARTITION_LEN);
            }
            other => panic!("expected oversized itemset error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_threshold() {
        let encoded = census();
        let table = mine(&encoded.index, 0.5).unwrap();
        match generate_rules(&table, Metric::Confidence, 1.5) {
            Err(Error::Config(ConfigError::Threshold { metric, value })) => {
                assert_eq!(metric, Metric::Confidence);
                assert_eq!(value, 1.5);
            }
            other => panic!("expected threshold error, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic() {
        let encoded = census();
        let table = mine(&encoded.index, 0.05).unwrap();
        let first = generate_rules(&table, Metric::Confidence, 0.3).unwrap();
        let second = generate_rules(&table, Metric::Confidence, 0.3).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.lift, b.lift);
            assert_eq!(a.confidence, b.confidence);
        }
    }
}
