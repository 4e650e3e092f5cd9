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
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;
use std::hash::{Hash, Hasher};

/// An association rule antecedent => consequent together with its metrics.
#[derive(Clone, Debug)]
pub struct Rule {
    pub antecedent: Itemset,
    pub consequent: Itemset,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub leverage: f64,
    pub conviction: f64,
}

impl PartialEq for Rule {
    fn eq(&self, other: &Rule) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

// Can't derive Eq as f64 doesn't satisfy Eq.
impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl Rule {
    // Creates a new Rule from (antecedent,consequent), provided both sides
    // and their union are in the frequent itemset table.
    pub fn make(
        antecedent: Itemset,
        consequent: Itemset,
        itemsets: &FrequentItemsets,
    ) -> Option<Rule> {
        if antecedent.is_empty() || consequent.is_empty() || !antecedent.is_disjoint(&consequent)
        {
            return None;
        }

        let ac_sup = itemsets.support_of(&antecedent.union(&consequent))?;
        let a_sup = itemsets.support_of(&antecedent)?;
        let c_sup = itemsets.support_of(&consequent)?;

        let confidence = ac_sup / a_sup;
        let lift = ac_sup / (a_sup * c_sup);
        let leverage = ac_sup - a_sup * c_sup;
        let conviction = if confidence >= 1.0 {
            f64::INFINITY
        } else {
            (1.0 - c_sup) / (1.0 - confidence)
        };

        Some(Rule {
            antecedent,
            consequent,
            antecedent_support: a_sup,
            consequent_support: c_sup,
            support: ac_sup,
            confidence,
            lift,
            leverage,
            conviction,
        })
    }

    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
            Metric::Leverage => self.leverage,
            Metric::Conviction => self.conviction,
        }
    }

    /// The frequent itemset this rule was split from.
    pub fn itemset(&self) -> Itemset {
        self.antecedent.union(&self.consequent)
    }

    pub fn to_string(&self, itemizer: &Itemizer) -> String {
        [
            itemizer.itemset_to_string(&self.antecedent),
            " => ".to_owned(),
            itemizer.itemset_to_string(&self.consequent),
        ]
        .join("")
    }
}
