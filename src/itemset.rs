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
use std::cmp;

const WORD_BITS: usize = 64;

/// A set of items stored as a bit vector over vocabulary ids.
///
/// Trailing zero words are always trimmed, so two itemsets holding the same
/// items are equal and hash the same however they were built.
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct Itemset {
    words: Vec<u64>,
}

impl Ord for Itemset {
    // Canonical order: by size, then by item ids ascending.
    fn cmp(&self, other: &Itemset) -> cmp::Ordering {
        if other.len() != self.len() {
            return self.len().cmp(&other.len());
        }
        self.iter().cmp(other.iter())
    }
}

impl PartialOrd for Itemset {
    fn partial_cmp(&self, other: &Itemset) -> Option<cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Itemset {
    pub fn new() -> Itemset {
        Itemset { words: vec![] }
    }

    pub fn from_items<I>(items: I) -> Itemset
    where
        I: IntoIterator<Item = Item>,
    {
        let mut itemset = Itemset::new();
        for item in items {
            itemset.insert(item);
        }
        itemset
    }

    pub fn insert(&mut self, item: Item) {
        let (word, bit) = position_of(item);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= bit;
    }

    pub fn with_item(&self, item: Item) -> Itemset {
        let mut itemset = self.clone();
        itemset.insert(item);
        itemset
    }

    pub fn without_item(&self, item: Item) -> Itemset {
        let mut itemset = self.clone();
        let (word, bit) = position_of(item);
        if word < itemset.words.len() {
            itemset.words[word] &= !bit;
            itemset.trim();
        }
        itemset
    }

    pub fn contains(&self, item: Item) -> bool {
        let (word, bit) = position_of(item);
        word < self.words.len() && self.words[word] & bit != 0
    }

    pub fn is_subset_of(&self, other: &Itemset) -> bool {
        if self.words.len() > other.words.len() {
            return false;
        }
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(&a, &b)| a & b == a)
    }

    pub fn is_disjoint(&self, other: &Itemset) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(&a, &b)| a & b == 0)
    }

    pub fn union(&self, other: &Itemset) -> Itemset {
        let (longer, shorter) = if self.words.len() >= other.words.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut words = longer.words.clone();
        for (w, &s) in words.iter_mut().zip(shorter.words.iter()) {
            *w |= s;
        }
        Itemset { words }
    }

    // Removes the items of other from self.
    pub fn difference(&self, other: &Itemset) -> Itemset {
        let mut words = self.words.clone();
        for (w, &o) in words.iter_mut().zip(other.words.iter()) {
            *w &= !o;
        }
        let mut itemset = Itemset { words };
        itemset.trim();
        itemset
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Item> + '_ {
        self.words.iter().enumerate().flat_map(|(index, &word)| {
            let mut remaining = word;
            std::iter::from_fn(move || {
                if remaining == 0 {
                    return None;
                }
                let bit = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                Some(Item::with_id((index * WORD_BITS + bit) as u32))
            })
        })
    }

    pub fn items(&self) -> Vec<Item> {
        self.iter().collect()
    }

    /// The largest item in the set.
    pub fn last(&self) -> Option<Item> {
        let index = self.words.len().checked_sub(1)?;
        let word = self.words[index];
        let bit = WORD_BITS - 1 - word.leading_zeros() as usize;
        Some(Item::with_id((index * WORD_BITS + bit) as u32))
    }

    fn trim(&mut self) {
        while let Some(&0) = self.words.last() {
            self.words.pop();
        }
    }
}

fn position_of(item: Item) -> (usize, u64) {
    let index = item.as_index();
    (index / WORD_BITS, 1u64 << (index % WORD_BITS))
}

#[cfg(test)]
mod tests {
    use super::Itemset;
    use crate::item::Item;

    fn to_itemset(ids: &[u32]) -> Itemset {
        Itemset::from_items(ids.iter().map(|&i| Item::with_id(i)))
    }

    fn ids(itemset: &Itemset) -> Vec<u32> {
        itemset.iter().map(|i| i.id()).collect()
    }

    #[test]
    fn test_construction_order_is_irrelevant() {
        assert_eq!(to_itemset(&[3, 1, 70]), to_itemset(&[70, 3, 1, 1]));
        assert_eq!(ids(&to_itemset(&[70, 3, 1])), vec![1, 3, 70]);
        assert_eq!(to_itemset(&[70, 3, 1]).len(), 3);
    }

    #[test]
    fn test_without_item_trims() {
        let a = to_itemset(&[1, 100]).without_item(Item::with_id(100));
        assert_eq!(a, to_itemset(&[1]));
        let empty = to_itemset(&[100]).without_item(Item::with_id(100));
        assert!(empty.is_empty());
        assert_eq!(empty, Itemset::new());
    }

    #[test]
    fn test_subset() {
        let cases = [
            (vec![], vec![1, 2], true),
            (vec![1], vec![1, 2], true),
            (vec![1, 2], vec![1, 2], true),
            (vec![1, 3], vec![1, 2], false),
            (vec![65], vec![1, 2], false),
            (vec![1, 65], vec![1, 2, 65, 130], true),
        ];
        for (a, b, expected) in cases.iter() {
            assert_eq!(to_itemset(a).is_subset_of(&to_itemset(b)), *expected);
        }
    }

    #[test]
    fn test_union_and_difference() {
        let test_cases = [
            (vec![1, 2, 3], vec![4, 5, 6], vec![1, 2, 3, 4, 5, 6]),
            (vec![1, 2, 3], vec![3, 4, 5, 6], vec![1, 2, 3, 4, 5, 6]),
            (vec![], vec![1], vec![1]),
            (vec![1], vec![], vec![1]),
            (vec![2], vec![64, 129], vec![2, 64, 129]),
        ];
        for (a, b, u) in test_cases.iter() {
            let (a, b) = (to_itemset(a), to_itemset(b));
            assert_eq!(ids(&a.union(&b)), *u);
            assert_eq!(a.union(&b).difference(&b), a.difference(&b));
            assert!(a.union(&b).difference(&a).is_disjoint(&a));
        }
        assert_eq!(to_itemset(&[1, 129]).difference(&to_itemset(&[129])), to_itemset(&[1]));
    }

    #[test]
    fn test_last() {
        assert_eq!(Itemset::new().last(), None);
        assert_eq!(to_itemset(&[0]).last(), Some(Item::with_id(0)));
        assert_eq!(to_itemset(&[3, 63, 5]).last(), Some(Item::with_id(63)));
        assert_eq!(to_itemset(&[3, 64]).last(), Some(Item::with_id(64)));
    }

    #[test]
    fn test_canonical_order() {
        let mut v = vec![
            to_itemset(&[1, 2]),
            to_itemset(&[3]),
            to_itemset(&[0, 5]),
            to_itemset(&[0, 2, 3]),
            to_itemset(&[1]),
        ];
        v.sort();
        let sorted: Vec<Vec<u32>> = v.iter().map(ids).collect();
        assert_eq!(
            sorted,
            vec![vec![1], vec![3], vec![0, 5], vec![1, 2], vec![0, 2, 3]]
        );
    }
}
