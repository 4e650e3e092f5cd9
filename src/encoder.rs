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

use crate::error::InputError;
use crate::index::Index;
use crate::itemizer::Itemizer;
use crate::itemset::Itemset;

/// Transactions encoded against their vocabulary.
#[derive(Clone, Debug)]
pub struct Encoded {
    pub itemizer: Itemizer,
    pub index: Index,
}

/// Builds the vocabulary of all labels in the transactions and encodes
/// each transaction as a row of the boolean membership matrix.
///
/// Duplicate labels within a transaction collapse to one occurrence.
pub fn encode<T, S>(transactions: &[T]) -> Result<Encoded, InputError>
where
    T: AsRef<[S]>,
    S: AsRef<str>,
{
    if transactions.is_empty() {
        return Err(InputError::NoTransactions);
    }

    let itemizer = Itemizer::from_labels(
        transactions
            .iter()
            .flat_map(|transaction| transaction.as_ref().iter()),
    );
    if itemizer.is_empty() {
        return Err(InputError::EmptyVocabulary);
    }

    let mut index = Index::new(itemizer.len());
    for (tid, transaction) in transactions.iter().enumerate() {
        let mut row = Itemset::new();
        for label in transaction.as_ref() {
            if let Some(item) = itemizer.id_of(label.as_ref()) {
                row.insert(item);
            }
        }
        if row.is_empty() {
            return Err(InputError::EmptyTransaction { index: tid });
        }
        index.insert(row);
    }

    Ok(Encoded { itemizer, index })
}
