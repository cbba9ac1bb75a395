use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use itree::io_utils::{io_cli_error, itree_cli_error, simple_cli_error, CliError};
use itree::{
    compare, concat, decode_with, gin, is_ancestor, is_descendant, subitree, subpath, Config,
    Itree, PathIndex, Predicate, RangeError, MAX_SEGMENTS,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Inspect and query fixed-size hierarchical integer paths.
#[derive(Parser)]
#[command(name = "itree")]
struct Cli {
    /// Maximum number of levels accepted when parsing (1..=16)
    #[arg(long, global = true, default_value_t = MAX_SEGMENTS)]
    max_levels: usize,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the binary record of each path
    Parse {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Decode an 18-byte record given as hex
    Show { hex: String },
    /// List the index keys of a path
    Keys { path: String },
    /// List the index keys probed for a query
    Query {
        path: String,
        #[arg(long, value_enum)]
        predicate: PredicateArg,
    },
    /// Append B below A
    Concat { a: String, b: String },
    /// Slice LEN segments from OFFSET (negative values count from the end)
    Subpath {
        path: String,
        #[arg(allow_negative_numbers = true)]
        offset: i32,
        #[arg(allow_negative_numbers = true)]
        len: Option<i32>,
    },
    /// Slice segments [START, END)
    Subitree {
        path: String,
        #[arg(allow_negative_numbers = true)]
        start: i32,
        #[arg(allow_negative_numbers = true)]
        end: i32,
    },
    /// Compare two paths and report containment
    Relate { a: String, b: String },
    /// Sort paths read one per line
    Sort {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Index paths read one per line and print those matching QUERY
    Search {
        query: String,
        #[arg(long, value_enum)]
        predicate: PredicateArg,
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Tabulate level, size and record bytes of paths read one per line
    Dump {
        /// Input file (stdin when omitted)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write CSV instead of tab separated text
        #[arg(long)]
        csv: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PredicateArg {
    DescendantOf,
    AncestorOf,
}

impl From<PredicateArg> for Predicate {
    fn from(arg: PredicateArg) -> Self {
        match arg {
            PredicateArg::DescendantOf => Predicate::DescendantOf,
            PredicateArg::AncestorOf => Predicate::AncestorOf,
        }
    }
}

#[derive(Serialize)]
struct RecordRow {
    path: Itree,
    levels: u32,
    bytes: usize,
    hex: String,
    control: String,
}

impl RecordRow {
    fn new(path: Itree) -> Self {
        Self {
            path,
            levels: path.level(),
            bytes: path.byte_len(),
            hex: hex::encode(path.as_bytes()),
            control: path.control().to_string(),
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse(text: &str, config: &Config) -> Result<Itree, CliError> {
    decode_with(text, config).map_err(|e| itree_cli_error(&format!("parsing '{text}'"), e))
}

fn read_lines(input: Option<&Path>) -> Result<Vec<String>, CliError> {
    let text = match input {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| io_cli_error("reading input file", path, e))?
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| simple_cli_error(&format!("reading stdin: {e}")))?;
            buf
        }
    };
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();
    info!(lines = lines.len(), source = ?input, "read input");
    Ok(lines)
}

fn read_paths(input: Option<&Path>, config: &Config) -> Result<Vec<Itree>, CliError> {
    read_lines(input)?
        .iter()
        .map(|line| parse(line, config))
        .collect()
}

fn print_json(value: &serde_json::Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn ordering_name(ord: std::cmp::Ordering) -> &'static str {
    match ord {
        std::cmp::Ordering::Less => "less",
        std::cmp::Ordering::Equal => "equal",
        std::cmp::Ordering::Greater => "greater",
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config =
        Config::with_max_levels(cli.max_levels).map_err(|e| itree_cli_error("--max-levels", e))?;
    debug!(max_levels = config.max_levels, json = cli.json, "starting");

    match cli.command {
        Command::Parse { paths } => {
            let rows = paths
                .iter()
                .map(|p| parse(p, &config).map(RecordRow::new))
                .collect::<Result<Vec<_>, _>>()?;
            if cli.json {
                print_json(&serde_json::to_value(&rows)?)?;
            } else {
                for row in rows {
                    println!(
                        "{}\t{}\tcontrol={}\tlevels={}",
                        row.path, row.hex, row.control, row.levels
                    );
                }
            }
        }

        Command::Show { hex } => {
            let bytes = hex::decode(hex.trim())
                .map_err(|e| simple_cli_error(&format!("invalid hex record: {e}")))?;
            let tree = Itree::from_bytes(&bytes)
                .map_err(|e| itree_cli_error("reading record", e))?;
            if cli.json {
                print_json(&serde_json::json!({
                    "path": tree,
                    "segments": tree.segments(),
                    "levels": tree.level(),
                }))?;
            } else {
                println!("{tree}");
            }
        }

        Command::Keys { path } => {
            let tree = parse(&path, &config)?;
            let keys = gin::extract_keys(&tree);
            if cli.json {
                print_json(&serde_json::json!({ "path": tree, "keys": keys }))?;
            } else {
                for key in keys {
                    println!("{key}");
                }
            }
        }

        Command::Query { path, predicate } => {
            let query = parse(&path, &config)?;
            let predicate = Predicate::from(predicate);
            let (keys, mode) = gin::extract_query_keys(&query, predicate);
            let mode = match mode {
                gin::SearchMode::Default => "default",
                gin::SearchMode::All => "all",
            };
            if cli.json {
                print_json(&serde_json::json!({
                    "query": query,
                    "strategy": predicate.strategy(),
                    "operator": predicate.operator(),
                    "mode": mode,
                    "keys": keys,
                }))?;
            } else {
                println!("mode={mode}");
                for key in keys {
                    println!("{key}");
                }
            }
        }

        Command::Concat { a, b } => {
            let (a, b) = (parse(&a, &config)?, parse(&b, &config)?);
            let joined = concat(&a, &b).map_err(|e| itree_cli_error("concat", e))?;
            println!("{joined}");
        }

        Command::Subpath { path, offset, len } => {
            let tree = parse(&path, &config)?;
            let len = match len {
                Some(len) => len,
                None => {
                    let rest = if offset < 0 {
                        -i64::from(offset)
                    } else {
                        (i64::from(tree.level()) - i64::from(offset)).max(0)
                    };
                    i32::try_from(rest).map_err(|_| {
                        itree_cli_error("subpath", RangeError::NegativeAfterNormalization)
                    })?
                }
            };
            let sliced = subpath(&tree, offset, len).map_err(|e| itree_cli_error("subpath", e))?;
            println!("{sliced}");
        }

        Command::Subitree { path, start, end } => {
            let tree = parse(&path, &config)?;
            let sliced =
                subitree(&tree, start, end).map_err(|e| itree_cli_error("subitree", e))?;
            println!("{sliced}");
        }

        Command::Relate { a, b } => {
            let (a, b) = (parse(&a, &config)?, parse(&b, &config)?);
            let order = ordering_name(compare(&a, &b));
            let descendant = is_descendant(&a, &b);
            let ancestor = is_ancestor(&a, &b);
            if cli.json {
                print_json(&serde_json::json!({
                    "a": a,
                    "b": b,
                    "order": order,
                    "descendant": descendant,
                    "ancestor": ancestor,
                }))?;
            } else {
                println!("order={order}");
                println!("descendant={descendant}");
                println!("ancestor={ancestor}");
            }
        }

        Command::Sort { input } => {
            let mut paths = read_paths(input.as_deref(), &config)?;
            paths.sort();
            if cli.json {
                print_json(&serde_json::to_value(&paths)?)?;
            } else {
                for p in paths {
                    println!("{p}");
                }
            }
        }

        Command::Search {
            query,
            predicate,
            input,
        } => {
            let query = parse(&query, &config)?;
            let predicate = Predicate::from(predicate);
            let paths = read_paths(input.as_deref(), &config)?;
            let index: PathIndex = paths
                .iter()
                .enumerate()
                .map(|(i, p)| (i as u64, *p))
                .collect();
            info!(rows = index.len(), keys = index.key_count(), "built index");
            let hits: Vec<Itree> = index
                .search(&query, predicate)
                .into_iter()
                .filter_map(|id| index.get(id).copied())
                .collect();
            info!(%query, operator = predicate.operator(), hits = hits.len(), "search done");
            if cli.json {
                print_json(&serde_json::to_value(&hits)?)?;
            } else {
                for hit in hits {
                    println!("{hit}");
                }
            }
        }

        Command::Dump { input, csv } => {
            let rows: Vec<RecordRow> = read_paths(input.as_deref(), &config)?
                .into_iter()
                .map(RecordRow::new)
                .collect();
            if csv {
                let mut wtr = csv::Writer::from_writer(io::stdout());
                for row in &rows {
                    wtr.serialize(row)?;
                }
                wtr.flush()?;
            } else if cli.json {
                print_json(&serde_json::to_value(&rows)?)?;
            } else {
                for row in rows {
                    println!("{}\t{}\t{}\t{}", row.path, row.levels, row.bytes, row.hex);
                }
            }
        }
    }

    Ok(())
}
