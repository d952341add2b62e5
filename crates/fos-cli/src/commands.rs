use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use colored::Colorize;
use fos_dict::{DictionaryFile, SharedDictionary};
use fos_registry::InMemoryRegistry;
use fos_state::{FunctionObjectState, StateConfig, TypeTag, Value};
use serde::Serialize;
use serde_json::json;

use crate::cli::*;

/// Name the inspector binds its own store under.
const INSPECTOR: &str = "fos";

/// A state file opened for inspection.
struct Session {
    file: DictionaryFile,
    state: FunctionObjectState,
}

impl Session {
    fn open(path: &Path, config: &StateConfig) -> anyhow::Result<Self> {
        let file = DictionaryFile::new(path).with_pretty(config.pretty);
        let dict = file
            .load()
            .with_context(|| format!("reading {}", path.display()))?;
        let registry = Arc::new(InMemoryRegistry::with_state_dict(
            INSPECTOR,
            SharedDictionary::new(dict),
        ));
        let state = FunctionObjectState::with_config(registry, INSPECTOR, config.clone())?;
        Ok(Self { file, state })
    }

    fn save(&self) -> anyhow::Result<()> {
        self.file
            .save_from(self.state.state_dict())
            .with_context(|| format!("writing {}", self.file.path().display()))
    }

    fn result_type(&self, object: Option<&str>, entry: &str) -> Option<TypeTag> {
        match object {
            Some(o) => self.state.object_result_type(o, entry),
            None => self.state.result_type(entry),
        }
    }
}

/// One line of `fos results`.
#[derive(Debug, PartialEq, Serialize)]
struct ResultRow {
    name: String,
    #[serde(rename = "type")]
    tag: Option<TypeTag>,
    value: Option<Value>,
}

/// One line of `fos objects`.
#[derive(Debug, PartialEq, Serialize)]
struct ObjectRow {
    name: String,
    results: usize,
}

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => StateConfig::load(path)?,
        None => StateConfig::default(),
    };
    let format = cli.format;
    let output = match cli.command {
        Command::Results(args) => cmd_results(args, &config, &format)?,
        Command::Type(args) => cmd_type(args, &config, &format)?,
        Command::Get(args) => cmd_get(args, &config, &format)?,
        Command::Set(args) => cmd_set(args, &config)?,
        Command::Objects(args) => cmd_objects(args, &config, &format)?,
    };
    println!("{output}");
    Ok(())
}

fn cmd_results(args: ResultsArgs, config: &StateConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let session = Session::open(&args.file, config)?;
    let rows = result_rows(&session, args.object.as_deref())?;
    render_results(&rows, format)
}

fn result_rows(session: &Session, object: Option<&str>) -> anyhow::Result<Vec<ResultRow>> {
    let entries = match object {
        Some(o) => session.state.object_result_entries(o),
        None => session.state.result_entries(),
    };
    let mut rows = Vec::with_capacity(entries.len());
    for name in entries {
        let value: Option<Value> = match object {
            Some(o) => session.state.find_object_result(o, &name)?,
            None => session.state.find_result(&name)?,
        };
        let tag = session.result_type(object, &name);
        rows.push(ResultRow { name, tag, value });
    }
    Ok(rows)
}

fn render_results(rows: &[ResultRow], format: &OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Text => {
            if rows.is_empty() {
                return Ok("No results.".to_string());
            }
            let lines: Vec<String> = rows
                .iter()
                .map(|row| {
                    let tag = row.tag.map(|t| t.to_string()).unwrap_or_default();
                    let value = row.value.as_ref().map(|v| v.to_string()).unwrap_or_default();
                    format!("  {:<24} {:<8} {}", row.name.bold(), tag.cyan(), value)
                })
                .collect();
            Ok(lines.join("\n"))
        }
    }
}

fn cmd_type(args: TypeArgs, config: &StateConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let session = Session::open(&args.file, config)?;
    let Some(tag) = session.result_type(args.object.as_deref(), &args.entry) else {
        bail!("result '{}' not found", args.entry);
    };
    Ok(match format {
        OutputFormat::Json => json!({ "name": args.entry, "type": tag }).to_string(),
        OutputFormat::Text => tag.to_string().cyan().to_string(),
    })
}

fn cmd_get(args: GetArgs, config: &StateConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let session = Session::open(&args.file, config)?;
    let state = &session.state;
    let value: Option<Value> = match (args.result, args.object.as_deref()) {
        (true, Some(o)) => state.find_object_result(o, &args.entry)?,
        (true, None) => state.find_result(&args.entry)?,
        (false, Some(o)) => state.find_object_property(o, &args.entry)?,
        (false, None) => state.find_property(&args.entry)?,
    };
    let Some(value) = value else {
        bail!("entry '{}' not found", args.entry);
    };
    Ok(match format {
        OutputFormat::Json => serde_json::to_string(&value)?,
        OutputFormat::Text => value.to_string(),
    })
}

fn cmd_set(args: SetArgs, config: &StateConfig) -> anyhow::Result<String> {
    let value: Value = serde_json::from_str(&args.value)
        .with_context(|| format!("parsing value {}", args.value))?;
    let session = Session::open(&args.file, config)?;
    let state = &session.state;
    let tag = value.type_tag();
    match (args.result, args.object.as_deref()) {
        (true, Some(o)) => state.set_object_result(o, &args.entry, value)?,
        (true, None) => state.set_result(&args.entry, value)?,
        (false, Some(o)) => state.set_object_property(o, &args.entry, value)?,
        (false, None) => state.set_property(&args.entry, value)?,
    }
    session.save()?;
    Ok(format!(
        "{} Set {} ({})",
        "✓".green().bold(),
        args.entry.bold(),
        tag.to_string().cyan()
    ))
}

fn cmd_objects(args: ObjectsArgs, config: &StateConfig, format: &OutputFormat) -> anyhow::Result<String> {
    let session = Session::open(&args.file, config)?;
    let rows: Vec<ObjectRow> = session
        .state
        .result_objects()
        .into_iter()
        .map(|name| ObjectRow {
            results: session.state.object_result_entries(&name).len(),
            name,
        })
        .collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&rows)?),
        OutputFormat::Text => {
            if rows.is_empty() {
                return Ok("No objects with results.".to_string());
            }
            let lines: Vec<String> = rows
                .iter()
                .map(|row| format!("  {} ({} results)", row.name.yellow(), row.results))
                .collect();
            Ok(lines.join("\n"))
        }
    }
}
