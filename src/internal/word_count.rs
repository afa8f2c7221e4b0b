//! Counts whitespace-separated tokens and prints each distinct token with its count.
//!
//! ```text
//! $ echo 'foo bar the bar bar bar the' | word_count
//! foo 1
//! bar 4
//! the 2
//! 3
//! ```
//!
//! Tokens are printed in table order, not input order.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    num::NonZeroUsize,
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use strtable::{Table, tally_into};

/// Command line configuration
#[derive(Debug, Clone, Parser)]
#[clap(about, version)]
struct Config {
    /// File to read; standard input when omitted
    input: Option<PathBuf>,

    /// Longer tokens are split into chunks of at most this many bytes
    #[clap(long, default_value = "100")]
    max_token_len: NonZeroUsize,

    /// Log filter, in `env_logger` syntax
    #[clap(long, default_value = "warn")]
    log_level: String,
}

/// Splits a line into whitespace-separated tokens of at most `max_len` bytes
fn tokens(line: &[u8], max_len: NonZeroUsize) -> impl Iterator<Item = &[u8]> {
    line.split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty())
        .flat_map(move |token| token.chunks(max_len.get()))
}

/// Counts every token read from `reader`
fn count(mut reader: impl BufRead, max_len: NonZeroUsize) -> Result<Table<u64>> {
    let mut counts = Table::try_new().context("out of memory")?;
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).context("failed to read input")? == 0 {
            break;
        }
        tally_into(&mut counts, tokens(&line, max_len)).context("out of memory")?;
    }
    Ok(counts)
}

/// Writes one `<token> <count>` line per entry, then the number of distinct tokens
fn report(counts: &Table<u64>, out: &mut impl Write) -> io::Result<()> {
    for (token, count) in counts {
        out.write_all(token)?;
        writeln!(out, " {count}")?;
    }
    writeln!(out, "{}", counts.len())?;
    out.flush()
}

fn main() -> Result<()> {
    let config = Config::parse();
    env_logger::Builder::new().parse_filters(&config.log_level).init();
    debug!("{config:?}");

    let counts = match &config.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            count(BufReader::new(file), config.max_token_len)?
        }
        None => count(io::stdin().lock(), config.max_token_len)?,
    };
    info!("counted {} distinct tokens in {} slots", counts.len(), counts.capacity());

    let stdout = io::stdout();
    report(&counts, &mut BufWriter::new(stdout.lock())).context("failed to write output")?;
    Ok(())
}
