use basket::{analyze, encode, generate_rules, mine, Metric, MiningConfig};
use proptest::prelude::*;

fn transactions() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(prop::collection::btree_set(0u8..8, 1..6), 1..24).prop_map(|rows| {
        rows.into_iter()
            .map(|row| row.into_iter().map(|i| format!("item{}", i)).collect())
            .collect()
    })
}

proptest! {
    #[test]
    fn frequent_itemsets_are_downward_closed(
        transactions in transactions(),
        min_support in 0.05f64..=1.0,
    ) {
        let encoded = encode(&transactions).unwrap();
        let table = mine(&encoded.index, min_support).unwrap();
        for (itemset, support) in table.iter() {
            prop_assert!(support >= min_support);
            prop_assert_eq!(support, encoded.index.support(itemset));
            for item in itemset.iter() {
                let subset = itemset.without_item(item);
                if subset.is_empty() {
                    continue;
                }
                let subset_support = table.support_of(&subset);
                prop_assert!(subset_support.is_some(), "subset of frequent itemset missing");
                prop_assert!(subset_support.unwrap() >= support);
            }
        }
    }

    #[test]
    fn every_split_is_enumerated(transactions in transactions(), min_support in 0.1f64..=1.0) {
        let encoded = encode(&transactions).unwrap();
        let table = mine(&encoded.index, min_support).unwrap();
        let rules = generate_rules(&table, Metric::Confidence, 0.0).unwrap();
        let expected: usize = (2..=table.max_len())
            .map(|k| table.level(k).len() * ((1usize << k) - 2))
            .sum();
        prop_assert_eq!(rules.len(), expected);
    }

    #[test]
    fn rule_metrics_are_bounded(
        transactions in transactions(),
        min_support in 0.05f64..=1.0,
        min_confidence in 0.0f64..=1.0,
    ) {
        let config = MiningConfig::new(min_support, Metric::Confidence, min_confidence);
        let analysis = analyze(&transactions, &config).unwrap();
        for rule in &analysis.rules {
            prop_assert!(rule.antecedent.is_disjoint(&rule.consequent));
            prop_assert!(analysis.frequent.contains(&rule.itemset()));
            prop_assert!(rule.confidence >= min_confidence);
            prop_assert!(rule.confidence >= 0.0 && rule.confidence <= 1.0);
            prop_assert!(rule.lift >= 0.0);
            prop_assert!(rule.support <= rule.antecedent_support);
            prop_assert!(rule.support <= rule.consequent_support);
            prop_assert!(rule.antecedent_support <= 1.0);
        }
    }

    #[test]
    fn runs_are_deterministic(transactions in transactions(), min_support in 0.1f64..=1.0) {
        let config = MiningConfig::new(min_support, Metric::Lift, 0.0);
        let first = analyze(&transactions, &config).unwrap();
        let second = analyze(&transactions, &config).unwrap();

        let first_itemsets: Vec<_> = first.frequent.iter().collect();
        let second_itemsets: Vec<_> = second.frequent.iter().collect();
        prop_assert_eq!(first_itemsets, second_itemsets);
        prop_assert_eq!(first.rules.len(), second.rules.len());
        for (a, b) in first.rules.iter().zip(second.rules.iter()) {
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.support, b.support);
            prop_assert_eq!(a.confidence, b.confidence);
            prop_assert_eq!(a.lift, b.lift);
        }
    }

    #[test]
    fn encoding_is_idempotent(transactions in transactions()) {
        let first = encode(&transactions).unwrap();
        let second = encode(&transactions).unwrap();
        prop_assert_eq!(first.itemizer.labels(), second.itemizer.labels());
        prop_assert_eq!(first.index.to_matrix(), second.index.to_matrix());
        for (tid, transaction) in transactions.iter().enumerate() {
            for label in transaction {
                let item = first.itemizer.id_of(label).unwrap();
                prop_assert!(first.index.contains(tid, item));
            }
            prop_assert_eq!(first.index.row(tid).len(), transaction.len());
        }
    }
}
