// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use charbrarysplitter::logger::init_logger;
use charbrarysplitter::{Config, Splitter};

/// Flatten the Charbrary with quom and split it into a header and a source
/// file. Without arguments, runs from the `single-include` directory with
/// the built-in paths.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// TOML file overriding the built-in paths and markers.
    #[clap(long)]
    pub config: Option<PathBuf>,
    /// Library entry file handed to quom.
    #[clap(long)]
    pub source: Option<PathBuf>,
    /// Scratch file for the flattened library.
    #[clap(long)]
    pub intermediate: Option<PathBuf>,
    /// Output header file.
    #[clap(long)]
    pub header: Option<PathBuf>,
    /// Output source file.
    #[clap(long)]
    pub implementation: Option<PathBuf>,
    /// Text marking the first implementation line.
    #[clap(long)]
    pub sentinel: Option<String>,
    /// Python interpreter that runs quom.
    #[clap(long)]
    pub python: Option<PathBuf>,
    /// Log debug messages.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match self.config {
            Some(ref path) => Config::from_toml_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(intermediate) = self.intermediate {
            config.intermediate = intermediate;
        }
        if let Some(header) = self.header {
            config.declaration = header;
        }
        if let Some(implementation) = self.implementation {
            config.implementation = implementation;
        }
        if let Some(sentinel) = self.sentinel {
            config.sentinel = sentinel;
        }
        if self.python.is_some() {
            config.python = self.python;
        }
        Ok(config)
    }
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let config = cli.into_config()?;
    let splitter = Splitter::quom(config);
    let summary = splitter
        .run()
        .with_context(|| format!("splitting {}", splitter.config().source.display()))?;
    info!(
        "done: {} header lines, {} source lines",
        summary.declaration_lines, summary.implementation_lines
    );
    Ok(())
}
