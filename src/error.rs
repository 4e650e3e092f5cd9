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

use crate::config::Metric;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("itemset of {len} items is too large to split into rules, at most {max} allowed")]
    ItemsetTooLarge { len: usize, max: usize },

    #[error("mining cancelled before level {level}")]
    Cancelled { level: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Problems with the transactions handed to the encoder.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("transaction list is empty")]
    NoTransactions,

    #[error("no items in any transaction")]
    EmptyVocabulary,

    #[error("transaction {index} has no items")]
    EmptyTransaction { index: usize },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("minimum support must be in range (0,1], got {0}")]
    MinSupport(f64),

    #[error("minimum {metric} threshold out of range, got {value}")]
    Threshold { metric: Metric, value: f64 },

    #[error("unrecognized metric {0:?}")]
    UnknownMetric(String),

    #[error("maximum itemset length must be at least 1")]
    MaxLen,
}
