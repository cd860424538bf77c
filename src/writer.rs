// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::fs::File;
use std::io;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::partition::Partition;

/// Writes the declaration half verbatim.
pub fn write_declaration<W: Write>(partition: &Partition, o: &mut W) -> io::Result<()> {
    write_lines(o, &partition.declaration)
}

/// Writes `include_line` followed by the implementation half verbatim.
pub fn write_implementation<W: Write>(
    partition: &Partition,
    include_line: &str,
    o: &mut W,
) -> io::Result<()> {
    o.write_all(include_line.as_bytes())?;
    write_lines(o, &partition.implementation)
}

/// Writes both halves to their files, replacing whatever was there.
pub fn write_outputs(
    partition: &Partition,
    include_line: &str,
    declaration: &Path,
    implementation: &Path,
) -> Result<()> {
    write_file(declaration, |o| write_declaration(partition, o))?;
    info!(
        "wrote {} ({} lines)",
        declaration.display(),
        partition.declaration.len()
    );
    write_file(implementation, |o| {
        write_implementation(partition, include_line, o)
    })?;
    info!(
        "wrote {} ({} lines)",
        implementation.display(),
        partition.implementation.len() + 1
    );
    Ok(())
}

fn write_lines<W: Write>(o: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        o.write_all(line.as_bytes())?;
    }
    Ok(())
}

fn write_file<F>(path: &Path, f: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let fd = File::create(path).map_err(Error::io("creating", path))?;
    let mut o = BufWriter::new(fd);
    f(&mut o)
        .and_then(|()| o.flush())
        .map_err(Error::io("writing", path))
}
