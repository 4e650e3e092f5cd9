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

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreOption, StoreTrue};
use basket::{ConfigError, Metric, MiningConfig};

pub struct Arguments {
    pub input_file_path: String,
    pub output_rules_path: Option<String>,
    pub min_support: f64,
    pub metric: String,
    pub min_threshold: Option<f64>,
    pub max_len: Option<usize>,
    pub verbose: bool,
}

impl Arguments {
    pub fn mining_config(&self) -> Result<MiningConfig, ConfigError> {
        let defaults = MiningConfig::default();
        let config = MiningConfig {
            min_support: self.min_support,
            metric: self.metric.parse::<Metric>()?,
            min_threshold: self.min_threshold.unwrap_or(defaults.min_threshold),
            max_len: self.max_len,
        };
        config.validate()?;
        Ok(config)
    }
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_rules_path: None,
        min_support: 0.0,
        metric: Metric::default().to_string(),
        min_threshold: None,
        max_len: None,
        verbose: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Apriori frequent itemset and association rule miner.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset in CSV format, one transaction per line.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_rules_path)
            .add_option(
                &["--output"],
                StoreOption,
                "File path in which to store output rules, instead of stdout. \
                 Format: antecedents, consequents, support, confidence, lift, \
                 leverage, conviction.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support threshold, in range (0,1].",
            )
            .metavar("threshold")
            .required();

        parser
            .refer(&mut args.metric)
            .add_option(
                &["--metric"],
                Store,
                "Rule metric to filter by: support, confidence, lift, \
                 leverage or conviction. Defaults to confidence.",
            )
            .metavar("name");

        parser
            .refer(&mut args.min_threshold)
            .add_option(
                &["--min-threshold"],
                StoreOption,
                "Minimum value of the rule metric. Defaults to 0.8.",
            )
            .metavar("threshold");

        parser
            .refer(&mut args.max_len)
            .add_option(
                &["--max-len"],
                StoreOption,
                "Maximum size of the itemsets mined.",
            )
            .metavar("k");

        parser
            .refer(&mut args.verbose)
            .add_option(&["-v", "--verbose"], StoreTrue, "Log each mining level.");

        if env::args().count() == 1 {
            // Nothing useful to do if stderr is closed.
            let _ = parser.print_help("Usage:", &mut io::stderr());
            process::exit(1);
        }

        if let Err(err) = parser.parse_args() {
            process::exit(err);
        }
    }

    args
}
