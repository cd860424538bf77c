// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::{Error, Result};

const SOURCE_FILENAME: &str = "../source/Charbrary/main.cpp";
const INTERMEDIATE_FILENAME: &str = "charbrary_single-include.hpp";
const DECLARATION_FILENAME: &str = "charbrary.h";
const IMPLEMENTATION_FILENAME: &str = "charbrary.cpp";
const SENTINEL: &str = "BEGIN CHARBRARY.CPP";
const STITCH: &str = "~> implementation <~";
const INCLUDE_TEMPLATE: &str = "#include \"{header}\"";

lazy_static! {
    static ref HEADER_PLACEHOLDER_RE: Regex = Regex::new(r"\{\s*header\s*\}").unwrap();
}

/// Everything a split run needs to know: where the library starts, where
/// the scratch and final files go, and the markers used along the way.
///
/// The defaults are the paths the Charbrary `single-include` directory
/// uses, relative to that directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Entry file handed to quom.
    pub source: PathBuf,
    /// Scratch file quom writes the flattened library to.
    pub intermediate: PathBuf,
    /// Output header.
    pub declaration: PathBuf,
    /// Output source file.
    pub implementation: PathBuf,
    /// First line containing this starts the implementation part.
    pub sentinel: String,
    /// Comment quom replaces with the inlined implementation sources.
    pub stitch: String,
    /// First line of the implementation file; `{header}` expands to the
    /// declaration file name.
    pub include: String,
    /// Python interpreter that runs quom. Looked up on `PATH` when unset.
    pub python: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            source: PathBuf::from(SOURCE_FILENAME),
            intermediate: PathBuf::from(INTERMEDIATE_FILENAME),
            declaration: PathBuf::from(DECLARATION_FILENAME),
            implementation: PathBuf::from(IMPLEMENTATION_FILENAME),
            sentinel: String::from(SENTINEL),
            stitch: String::from(STITCH),
            include: String::from(INCLUDE_TEMPLATE),
            python: None,
        }
    }
}

impl Config {
    /// Reads a TOML file; keys it leaves out keep their default value.
    pub fn from_toml_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(Error::io("reading", path))?;
        Config::from_toml_str(&contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> std::result::Result<Config, toml::de::Error> {
        toml::from_str(contents)
    }

    /// The line injected at the top of the implementation file, newline
    /// terminated.
    pub fn include_line(&self) -> String {
        let header = self
            .declaration
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.declaration.display().to_string());
        let mut line = HEADER_PLACEHOLDER_RE
            .replace_all(&self.include, header.as_str())
            .into_owned();
        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }
}
