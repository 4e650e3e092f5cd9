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

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// The rule metric used to filter generated rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
    Leverage,
    Conviction,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Support,
        Metric::Confidence,
        Metric::Lift,
        Metric::Leverage,
        Metric::Conviction,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Metric::Support => "support",
            Metric::Confidence => "confidence",
            Metric::Lift => "lift",
            Metric::Leverage => "leverage",
            Metric::Conviction => "conviction",
        }
    }

    // Inclusive bounds a threshold for this metric may take.
    pub fn threshold_range(&self) -> (f64, f64) {
        match self {
            Metric::Support | Metric::Confidence => (0.0, 1.0),
            Metric::Lift | Metric::Conviction => (0.0, f64::INFINITY),
            Metric::Leverage => (-1.0, 1.0),
        }
    }

    pub fn validate_threshold(&self, value: f64) -> Result<(), ConfigError> {
        let (lo, hi) = self.threshold_range();
        if value.is_nan() || value < lo || value > hi {
            return Err(ConfigError::Threshold {
                metric: *self,
                value,
            });
        }
        Ok(())
    }
}

impl Default for Metric {
    fn default() -> Metric {
        Metric::Confidence
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Metric, ConfigError> {
        let name = s.trim().to_ascii_lowercase();
        Metric::ALL
            .iter()
            .find(|m| m.name() == name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownMetric(s.to_owned()))
    }
}

pub fn validate_min_support(min_support: f64) -> Result<(), ConfigError> {
    // Written so that NaN fails too.
    if !(min_support > 0.0 && min_support <= 1.0) {
        return Err(ConfigError::MinSupport(min_support));
    }
    Ok(())
}

/// Parameters of one mining run.
#[derive(Clone, Debug, PartialEq)]
pub struct MiningConfig {
    pub min_support: f64,
    pub metric: Metric,
    pub min_threshold: f64,
    /// Largest itemset size to mine. None mines until no level is frequent.
    pub max_len: Option<usize>,
}

impl Default for MiningConfig {
    fn default() -> MiningConfig {
        MiningConfig {
            min_support: 0.5,
            metric: Metric::Confidence,
            min_threshold: 0.8,
            max_len: None,
        }
    }
}

impl MiningConfig {
    pub fn new(min_support: f64, metric: Metric, min_threshold: f64) -> MiningConfig {
        MiningConfig {
            min_support,
            metric,
            min_threshold,
            max_len: None,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> MiningConfig {
        self.max_len = Some(max_len);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_min_support(self.min_support)?;
        self.metric.validate_threshold(self.min_threshold)?;
        if self.max_len == Some(0) {
            return Err(ConfigError::MaxLen);
        }
        Ok(())
    }
}
