// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::flatten::{Flattener, Quom};
use crate::partition::partition;
use crate::writer::write_outputs;

/// What a run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub declaration_lines: usize,
    /// Not counting the injected include line.
    pub implementation_lines: usize,
    /// Index of the sentinel line in the flattened source.
    pub marker: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Splitter<F> {
    config: Config,
    flattener: F,
}

impl Splitter<Quom> {
    /// A splitter that flattens with quom into `config.intermediate`.
    pub fn quom(config: Config) -> Splitter<Quom> {
        let quom = Quom::new(config.python.clone(), &config.intermediate);
        Splitter::new(config, quom)
    }
}

impl<F: Flattener> Splitter<F> {
    pub fn new(config: Config, flattener: F) -> Splitter<F> {
        Splitter { config, flattener }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Checks the flattener, flattens the library, and writes the header
    /// and source files. The scratch file is removed once both are written.
    pub fn run(&self) -> Result<Summary> {
        self.flattener.ensure_available()?;
        let (lines, scratch) = self
            .flattener
            .flatten(&self.config.source, &self.config.stitch)?
            .into_parts();
        let partition = partition(lines, &self.config.sentinel);
        let summary = Summary {
            declaration_lines: partition.declaration.len(),
            implementation_lines: partition.implementation.len(),
            marker: partition.marker,
        };
        match summary.marker {
            Some(index) => info!(
                "\"{}\" found at line {}: {} header lines, {} source lines",
                self.config.sentinel,
                index + 1,
                summary.declaration_lines,
                summary.implementation_lines
            ),
            None => warn!(
                "\"{}\" not found, all {} lines go to {}",
                self.config.sentinel,
                summary.declaration_lines,
                self.config.declaration.display()
            ),
        }
        write_outputs(
            &partition,
            &self.config.include_line(),
            &self.config.declaration,
            &self.config.implementation,
        )?;
        if let Some(scratch) = scratch {
            scratch.remove()?;
        }
        Ok(summary)
    }
}
