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

//! Frequent itemset mining with Apriori, and association rules generated
//! from the frequent itemsets.
//!
//! ```
//! use basket::{analyze, Metric, MiningConfig};
//!
//! let transactions = vec![
//!     vec!["milk", "bread"],
//!     vec!["milk", "bread", "butter"],
//!     vec!["bread"],
//! ];
//! let config = MiningConfig::new(0.5, Metric::Confidence, 0.6);
//! let analysis = analyze(&transactions, &config).unwrap();
//! for rule in &analysis.rules {
//!     println!("{}", rule.to_string(&analysis.itemizer));
//! }
//! ```

pub mod apriori;
pub mod config;
pub mod encoder;
pub mod error;
pub mod generate_rules;
pub mod index;
pub mod item;
pub mod item_counter;
pub mod itemizer;
pub mod itemset;
pub mod rule;
pub mod transaction_reader;

pub use crate::apriori::{mine, Apriori, CancelToken, FrequentItemsets};
pub use crate::config::{Metric, MiningConfig};
pub use crate::encoder::{encode, Encoded};
pub use crate::error::{ConfigError, Error, InputError, Result};
pub use crate::generate_rules::generate_rules;
pub use crate::itemizer::Itemizer;
pub use crate::itemset::Itemset;
pub use crate::rule::Rule;

use std::time::Instant;
use tracing::info;

/// The outcome of one mining run.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub itemizer: Itemizer,
    pub frequent: FrequentItemsets,
    pub rules: Vec<Rule>,
}

/// Encodes the transactions, mines the frequent itemsets and generates the
/// rules passing the configured metric threshold.
///
/// The configuration is validated before any work is done. No frequent
/// itemsets or no rules is a successful, empty result.
pub fn analyze<T, S>(transactions: &[T], config: &MiningConfig) -> Result<Analysis>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    analyze_with_cancel(transactions, config, CancelToken::new())
}

pub fn analyze_with_cancel<T, S>(
    transactions: &[T],
    config: &MiningConfig,
    cancel: CancelToken,
) -> Result<Analysis>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    config.validate()?;

    let start = Instant::now();
    let Encoded { itemizer, index } = encode(transactions)?;
    info!(
        transactions = index.num_transactions(),
        items = itemizer.len(),
        "encoded transactions"
    );

    let frequent = Apriori::new(&index, config.min_support)
        .max_len(config.max_len)
        .cancel_token(cancel)
        .run()?;
    let rules = generate_rules(&frequent, config.metric, config.min_threshold)?;

    info!(
        itemsets = frequent.len(),
        rules = rules.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "analysis finished"
    );
    Ok(Analysis {
        itemizer,
        frequent,
        rules,
    })
}
