use anyhow::{Context, Result};
use mongo_persistor::Dispatcher;
use serde_json::json;
use std::io::{BufRead, Write};

/// Reads queries from `input` until `/bye` or end of input, printing matches
/// to `out` and failures to `err`.
pub fn run(
    dispatcher: &Dispatcher,
    collection: &str,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "> ").context("Failed to write prompt")?;
        out.flush().context("Failed to flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read stdin")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }

        let reply = dispatcher.request(json!({
            "action": "find",
            "collection": collection,
            "matcher": { "query": line },
        }))?;
        match reply["results"].as_array() {
            Some(results) => {
                for (i, document) in results.iter().enumerate() {
                    writeln!(out, "[{i}] {document}").context("Failed to write result")?;
                }
            }
            None => writeln!(
                err,
                "Failed to search ({}): {}",
                reply["kind"].as_str().unwrap_or("unknown"),
                reply["message"].as_str().unwrap_or_default()
            )
            .context("Failed to write error")?,
        }
    }
    Ok(())
}
