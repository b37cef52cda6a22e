use std::fs::File;
use std::io::{BufWriter, Read, Write, stdin, stdout};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use jsonwriter::JsonWriter;

#[derive(Parser, Debug)]
#[command(
    name = "jsonwriter-cli",
    about = "Re-encode a JSON document compactly through the streaming writer",
    version
)]
struct Args {
    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            let mut f = File::open(path)?;
            f.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }
    let value: serde_json::Value = serde_json::from_str(&buf)?;

    let mut out = BufWriter::new(stdout().lock());
    let mut w = JsonWriter::new(&mut out);
    emit(&mut w, &value)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Walks the parsed document in order, replaying it onto the writer.
fn emit<W: Write>(w: &mut JsonWriter<W>, value: &serde_json::Value) -> jsonwriter::Result<()> {
    use serde_json::Value;

    match value {
        Value::Null => w.null(),
        Value::Bool(b) => w.bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                w.int(i)
            } else if let Some(u) = n.as_u64() {
                w.uint(u)
            } else {
                w.float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => w.string(s),
        Value::Array(items) => {
            w.begin_array()?;
            for item in items {
                emit(w, item)?;
            }
            w.end_array()
        }
        Value::Object(members) => {
            w.begin_object()?;
            for (key, member) in members {
                w.key(key)?;
                emit(w, member)?;
            }
            w.end_object()
        }
    }
}
