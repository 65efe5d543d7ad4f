use std::ffi::OsString;
use std::fs::File;
use std::io::{stdin, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "shon",
    about = "Print SHON command-line arguments as JSON",
    long_about = "Print SHON command-line arguments as JSON.\n\n\
        Options are only read before the first token. Every argument from\n\
        the first token on, '--' included, is passed through as SHON, e.g.\n  \
        shon -t\n  shon -- 10\n  shon --object --name foo --size 3",
    override_usage = "shon [OPTIONS] [TOKENS]...",
    version
)]
struct Args {
    /// Treat the tokens as the entries of one object without brackets
    #[arg(short, long)]
    object: bool,

    /// Keep numbers exactly as written instead of converting them
    #[arg(short, long)]
    preserve_numbers: bool,

    /// Print JSON on a single line
    #[arg(short, long)]
    compact: bool,

    /// Read shell-quoted tokens from a file ('-' for stdin)
    #[arg(long, value_name = "PATH")]
    from: Option<PathBuf>,
}

const LONG_OPTIONS: &[&str] = &["--object", "--preserve-numbers", "--compact", "--help", "--version"];
const SHORT_OPTIONS: &str = "opchV";

fn is_option(arg: &str) -> bool {
    if LONG_OPTIONS.contains(&arg) || arg.starts_with("--from=") {
        return true;
    }
    match arg.strip_prefix('-') {
        Some(cluster) if !cluster.is_empty() => cluster.chars().all(|c| SHORT_OPTIONS.contains(c)),
        _ => false,
    }
}

/// Splits process arguments into the leading run of options and the tokens
/// after it. Tokens are never seen by clap.
fn split_args(mut args: Vec<String>) -> (Vec<String>, Vec<String>) {
    let mut end = 0;
    while end < args.len() {
        match args[end].as_str() {
            "--from" => end += 2,
            arg if is_option(arg) => end += 1,
            _ => break,
        }
    }
    let tokens = args.split_off(end.min(args.len()));
    (args, tokens)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_tokens(path: &Path) -> Result<Vec<String>> {
    let mut buf = String::new();
    if path.as_os_str() == "-" {
        stdin().read_to_string(&mut buf)?;
    } else {
        let mut f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        f.read_to_string(&mut buf)?;
    }
    match shlex::split(&buf) {
        Some(tokens) => Ok(tokens),
        None => bail!("{}: unbalanced quotes", path.display()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let mut argv = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let bin = argv.next().map_or_else(|| OsString::from("shon"), OsString::from);
    let (options, tokens) = split_args(argv.collect());
    let args = Args::parse_from(std::iter::once(bin).chain(options.into_iter().map(OsString::from)));

    let tokens = match &args.from {
        Some(_) if !tokens.is_empty() => bail!("--from cannot be combined with tokens"),
        Some(path) => read_tokens(path)?,
        None => tokens,
    };
    debug!(count = tokens.len(), object = args.object, "parsing tokens");

    let options = shon::Options::default().with_preserve_numeric_literal(args.preserve_numbers);
    let value = if args.object {
        shon::object_to_value(&tokens, &options)?
    } else {
        shon::to_value(&tokens, &options)?
    };

    if args.compact {
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
