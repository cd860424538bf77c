// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no python interpreter found (tried {tried})")]
    InterpreterMissing { tried: String },

    #[error(
        "required module \"quom\" not installed. \
         You can install it using \"{python} -m pip install quom\""
    )]
    FlattenerMissing { python: String },

    #[error("flattening {} failed: quom exited with {status}", entry.display())]
    FlattenFailed { entry: PathBuf, status: ExitStatus },

    #[error("quom finished but produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    #[error("error {action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Error {
    /// Builds a `map_err` adapter that tags an I/O error with what was
    /// being done and to which file.
    pub(crate) fn io(
        action: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io {
            action,
            path,
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
