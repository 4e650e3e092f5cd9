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

mod command_line_args;

use basket::transaction_reader::read_transactions;
use basket::{analyze, Itemizer, Itemset, Rule};
use command_line_args::parse_args_or_exit;
use command_line_args::Arguments;
use itertools::Itertools;

use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::process;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// Labels never contain ',' as the reader splits cells on it, so ';' can't
// be confused with a character inside a label.
const LABEL_SEPARATOR: &str = ";";

fn join_labels(itemset: &Itemset, itemizer: &Itemizer) -> String {
    itemset
        .iter()
        .map(|item| itemizer.str_of(item))
        .join(LABEL_SEPARATOR)
}

fn write_rules<W: Write>(output: W, rules: &[Rule], itemizer: &Itemizer) -> io::Result<()> {
    let mut output = BufWriter::new(output);
    writeln!(
        output,
        "antecedents,consequents,support,confidence,lift,leverage,conviction"
    )?;
    for rule in rules {
        writeln!(
            output,
            "{},{},{},{},{},{},{}",
            join_labels(&rule.antecedent, itemizer),
            join_labels(&rule.consequent, itemizer),
            rule.support,
            rule.confidence,
            rule.lift,
            rule.leverage,
            rule.conviction
        )?;
    }
    output.flush()
}

fn mine_apriori(args: &Arguments) -> basket::Result<()> {
    let config = args.mining_config()?;
    let start = Instant::now();

    info!(path = %args.input_file_path, "reading transactions");
    let transactions = read_transactions(&args.input_file_path)?;
    info!(
        transactions = transactions.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "read transactions"
    );

    let analysis = analyze(&transactions, &config)?;
    if analysis.frequent.is_empty() {
        warn!(min_support = config.min_support, "no frequent itemsets");
    } else if analysis.rules.is_empty() {
        warn!(
            metric = %config.metric,
            min_threshold = config.min_threshold,
            "no association rules pass the threshold"
        );
    }

    match args.output_rules_path {
        Some(ref path) => write_rules(File::create(path)?, &analysis.rules, &analysis.itemizer)?,
        None => write_rules(io::stdout(), &analysis.rules, &analysis.itemizer)?,
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "total runtime"
    );
    Ok(())
}

fn main() {
    let arguments = parse_args_or_exit();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if arguments.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = mine_apriori(&arguments) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
