use anyhow::{Context, Result};
use clap::Parser;
use jsonschema::JSONSchema;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// Validate stored institution documents against the Institution v1 schema.
#[derive(Parser, Debug)]
#[command(name = "validate-institution", version, about = "Validate stored institution JSON against schema")]
struct Cli {
    /// A JSON document, a JSON array of documents, or an NDJSON store file
    path: PathBuf,

    /// Optional path to a schema file (defaults to schemas/institution.v1.json)
    #[arg(long)]
    schema: Option<PathBuf>,
}

fn load_json(path: &PathBuf) -> Result<Value> {
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("Failed to parse JSON in {}", path.display()))
}

/// Documents in the file, whichever of the three layouts it uses.
fn load_documents(path: &PathBuf) -> Result<Vec<Value>> {
    let data = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    match serde_json::from_str::<Value>(&data) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(single) => Ok(vec![single]),
        Err(_) => data
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse line {} of {}", n + 1, path.display()))
            })
            .collect(),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let schema_path = args
        .schema
        .unwrap_or_else(|| PathBuf::from("schemas/institution.v1.json"));

    let schema_json = load_json(&schema_path)?;
    let documents = load_documents(&args.path)?;

    // jsonschema 0.17 compiles against a 'static schema; it lives for the whole run
    let schema_static: &'static Value = Box::leak(Box::new(schema_json));

    let compiled = JSONSchema::options()
        .compile(schema_static)
        .context("Failed to compile JSON Schema")?;

    let mut invalid = 0;
    for (index, document) in documents.iter().enumerate() {
        if let Err(errors) = compiled.validate(document) {
            invalid += 1;
            let name = document.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
            eprintln!("invalid: #{index} {name}");
            for error in errors {
                eprintln!("- {} at {}", error, error.instance_path);
            }
        }
    }

    if invalid > 0 {
        eprintln!("{invalid} of {} documents invalid", documents.len());
        std::process::exit(1)
    }
    println!("valid ({} documents)", documents.len());
    Ok(())
}
