// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

// Runs the quom flattener against stand-in interpreters written as shell
// scripts. Arguments arrive as `-c <code>` for the availability check and
// `-m quom <entry> -s <stitch> <output>` for the flattening itself.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use tempfile::TempDir;

use charbrarysplitter::{Config, Error, Splitter, Summary};

type Outcome = charbrarysplitter::Result<Summary>;

// Writing a script while another test thread forks can leave it busy
// (ETXTBSY) at exec time, so scripts are written and run one at a time.
static INTERPRETER: Mutex<()> = Mutex::new(());

const PROBE_OK: &str = "if [ \"$1\" = \"-c\" ]; then exit 0; fi\n";

fn interpreter(dir: &Path, body: &str) -> Result<PathBuf> {
    let path = dir.join("python");
    fs::write(&path, format!("#!/bin/sh\n{}", body))?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

fn config_in(dir: &Path, python: PathBuf) -> Config {
    Config {
        source: dir.join("main.cpp"),
        intermediate: dir.join("flat.hpp"),
        declaration: dir.join("c.h"),
        implementation: dir.join("c.cpp"),
        python: Some(python),
        ..Config::default()
    }
}

fn run(
    body: &str,
    setup: impl FnOnce(&Config) -> Result<()>,
) -> Result<(TempDir, Config, Outcome)> {
    let _lock = INTERPRETER.lock().unwrap_or_else(|e| e.into_inner());
    let dir = TempDir::new()?;
    let python = interpreter(dir.path(), body)?;
    let config = config_in(dir.path(), python);
    setup(&config)?;
    let result = Splitter::quom(config.clone()).run();
    Ok((dir, config, result))
}

fn assert_nothing_written(config: &Config) {
    assert!(!config.declaration.exists());
    assert!(!config.implementation.exists());
    assert!(!config.intermediate.exists());
}

#[test]
fn splits_quom_output() -> Result<()> {
    let body = format!(
        "{}printf 'args %s|%s|%s|%s|%s\\nx\\nBEGIN CHARBRARY.CPP\\ny\\n' \\
         \"$1\" \"$2\" \"$3\" \"$4\" \"$5\" > \"$6\"\n",
        PROBE_OK
    );
    let (dir, config, result) = run(&body, |_| Ok(()))?;
    let summary = result?;
    assert_eq!(summary.marker, Some(2));
    let entry = dir.path().join("main.cpp");
    assert_eq!(
        fs::read_to_string(&config.declaration)?,
        format!("args -m|quom|{}|-s|~> implementation <~\nx\n", entry.display())
    );
    assert_eq!(
        fs::read_to_string(&config.implementation)?,
        "#include \"c.h\"\nBEGIN CHARBRARY.CPP\ny\n"
    );
    assert!(!config.intermediate.exists());
    Ok(())
}

#[test]
fn failing_quom_is_reported() -> Result<()> {
    let body = format!("{}echo partial > \"$6\"\nexit 3\n", PROBE_OK);
    let (_dir, config, result) = run(&body, |_| Ok(()))?;
    match result {
        Err(Error::FlattenFailed { status, .. }) => assert_eq!(status.code(), Some(3)),
        other => panic!("expected FlattenFailed, got {:?}", other),
    }
    assert_nothing_written(&config);
    Ok(())
}

#[test]
fn quom_without_output_is_reported() -> Result<()> {
    let body = format!("{}exit 0\n", PROBE_OK);
    let (_dir, config, result) = run(&body, |_| Ok(()))?;
    assert!(matches!(result, Err(Error::MissingOutput(ref p)) if *p == config.intermediate));
    assert_nothing_written(&config);
    Ok(())
}

#[test]
fn stale_intermediate_is_not_split() -> Result<()> {
    let body = format!("{}exit 0\n", PROBE_OK);
    let (_dir, config, result) = run(&body, |config| {
        fs::write(&config.intermediate, "left over\nBEGIN CHARBRARY.CPP\n")?;
        Ok(())
    })?;
    assert!(matches!(result, Err(Error::MissingOutput(_))));
    assert_nothing_written(&config);
    Ok(())
}

#[test]
fn missing_quom_module_is_reported() -> Result<()> {
    // Writes its output when asked to flatten, which must never happen.
    let body = "if [ \"$1\" = \"-c\" ]; then exit 1; fi\necho x > \"$6\"\n";
    let (_dir, config, result) = run(body, |_| Ok(()))?;
    assert!(matches!(result, Err(Error::FlattenerMissing { .. })));
    assert_nothing_written(&config);
    Ok(())
}
