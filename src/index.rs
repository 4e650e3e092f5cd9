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

use crate::item::Item;
use crate::itemset::Itemset;

/// The encoded transaction matrix: one bit-set row per transaction, one
/// column per vocabulary item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Index {
    rows: Vec<Itemset>,
    num_items: usize,
}

impl Index {
    pub fn new(num_items: usize) -> Index {
        Index {
            rows: Vec::new(),
            num_items,
        }
    }
    pub fn insert(&mut self, transaction: Itemset) {
        debug_assert!(transaction.last().map_or(true, |i| i.as_index() < self.num_items));
        self.rows.push(transaction);
    }
    pub fn num_transactions(&self) -> usize {
        self.rows.len()
    }
    pub fn num_items(&self) -> usize {
        self.num_items
    }
    pub fn rows(&self) -> &[Itemset] {
        &self.rows
    }
    pub fn row(&self, tid: usize) -> &Itemset {
        &self.rows[tid]
    }
    pub fn contains(&self, tid: usize, item: Item) -> bool {
        self.rows[tid].contains(item)
    }

    // Number of transactions containing every item in the itemset.
    pub fn count(&self, itemset: &Itemset) -> u32 {
        self.rows
            .iter()
            .filter(|row| itemset.is_subset_of(row))
            .count() as u32
    }

    pub fn support(&self, itemset: &Itemset) -> f64 {
        if itemset.is_empty() || self.rows.is_empty() {
            return 0.0;
        }
        (self.count(itemset) as f64) / (self.num_transactions() as f64)
    }

    /// The one-hot boolean matrix, one row per transaction.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.rows
            .iter()
            .map(|row| {
                (0..self.num_items)
                    .map(|i| row.contains(Item::with_id(i as u32)))
                    .collect()
            })
            .collect()
    }
}
