use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bomrank_core::{BomCollection, RankedPart};
use clap::{Args, ValueEnum};

#[derive(ValueEnum, Debug, Clone, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct TopArgs {
    /// BOM file to read
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Output format
    #[arg(short, long, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn execute(args: TopArgs) -> Result<()> {
    let bom = BomCollection::from_path(&args.file)
        .with_context(|| format!("Failed to read BOM from {}", args.file.display()))?;
    let parts = bom.top_n()?;
    log::debug!(
        "Ranked {} of {} unique parts from {}",
        parts.len(),
        bom.len(),
        args.file.display()
    );

    let mut writer = io::stdout().lock();
    match args.format {
        OutputFormat::Json => write_json(&parts, &mut writer)?,
        OutputFormat::Table => bomrank_core::write_table(&parts, &mut writer)?,
    }
    Ok(())
}

fn write_json<W: Write>(parts: &[RankedPart], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, parts)?;
    writeln!(writer)?;
    Ok(())
}
