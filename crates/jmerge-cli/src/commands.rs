use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use jmerge_core::{json_merge, ChangeLog, MergeReport, Value};

use crate::cli::*;
use crate::config::{ChangeFormat, CliConfig};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &config),
        Command::Changes(args) => cmd_changes(args, &config),
    }
}

fn cmd_merge(args: MergeArgs, config: &CliConfig) -> anyhow::Result<()> {
    let pretty = args.pretty || config.output.pretty;
    let format = args.changes.unwrap_or(config.output.changes);

    let report = merge_inputs(&args.dst, &args.src)?;
    if let Some(text) = render_changes(&report.changes, format)? {
        eprintln!("{text}");
    }

    let Some(merged) = report.value else {
        tracing::warn!("policy removed the document root; nothing written");
        eprintln!("{} merged document is empty", "!".yellow().bold());
        return Ok(());
    };
    let encoded = merged.to_json_string(pretty)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, format!("{encoded}\n"))
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!("{} Wrote {}", "✓".green().bold(), path.display().to_string().bold());
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

fn cmd_changes(args: ChangesArgs, config: &CliConfig) -> anyhow::Result<()> {
    let format = args.format.unwrap_or(config.output.changes);
    let report = merge_inputs(&args.dst, &args.src)?;
    if let Some(text) = render_changes(&report.changes, format)? {
        println!("{text}");
    }
    Ok(())
}

/// Read, decode and merge the two documents.
fn merge_inputs(dst: &str, src: &str) -> anyhow::Result<MergeReport> {
    if dst == "-" && src == "-" {
        bail!("only one of DST and SRC can be read from stdin");
    }
    let dst = read_document(dst)?;
    let src = read_document(src)?;
    Ok(json_merge(dst, &src))
}

fn read_document(source: &str) -> anyhow::Result<Value> {
    let text = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        buf
    } else {
        std::fs::read_to_string(Path::new(source)).with_context(|| format!("reading {source}"))?
    };
    Value::from_json_str(&text).with_context(|| format!("decoding {source}"))
}

fn render_changes(changes: &ChangeLog, format: ChangeFormat) -> anyhow::Result<Option<String>> {
    let rendered = match format {
        ChangeFormat::None => return Ok(None),
        ChangeFormat::Json => serde_json::to_string_pretty(changes)?,
        ChangeFormat::Text if changes.is_empty() => "No changes.".to_string(),
        ChangeFormat::Text => changes
            .iter()
            .map(|r| {
                format!(
                    "  {} [{}] {}",
                    r.path.yellow().bold(),
                    r.reason.to_string().cyan(),
                    r.description
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(Some(rendered))
}
