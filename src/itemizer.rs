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
use fnv::FnvHashMap;
use itertools::Itertools;

/// The vocabulary of a mining run: every distinct item label, sorted
/// lexicographically, with ids assigned in that order.
#[derive(Clone, Debug, Default)]
pub struct Itemizer {
    item_str_to_id: FnvHashMap<String, Item>,
    item_id_to_str: Vec<String>,
}

impl Itemizer {
    pub fn from_labels<I, S>(labels: I) -> Itemizer
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let item_id_to_str: Vec<String> = labels
            .into_iter()
            .map(|s| String::from(s.as_ref()))
            .sorted()
            .dedup()
            .collect();
        let item_str_to_id = item_id_to_str
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), Item::with_id(index as u32)))
            .collect();
        Itemizer {
            item_str_to_id,
            item_id_to_str,
        }
    }
    pub fn id_of(&self, item: &str) -> Option<Item> {
        self.item_str_to_id.get(item).cloned()
    }
    pub fn str_of(&self, id: Item) -> &str {
        &self.item_id_to_str[id.as_index()]
    }
    pub fn len(&self) -> usize {
        self.item_id_to_str.len()
    }
    pub fn is_empty(&self) -> bool {
        self.item_id_to_str.is_empty()
    }
    pub fn labels(&self) -> &[String] {
        &self.item_id_to_str
    }

    // Labels not in the vocabulary map to None.
    pub fn to_itemset(&self, labels: &[&str]) -> Option<Itemset> {
        let items = labels
            .iter()
            .map(|label| self.id_of(label))
            .collect::<Option<Vec<Item>>>()?;
        Some(Itemset::from_items(items))
    }

    pub fn itemset_to_string(&self, itemset: &Itemset) -> String {
        Item::item_vec_to_string(&itemset.items(), self)
    }
}
