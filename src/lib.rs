// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

/*!
Package the Charbrary as a single header plus a single source file.

[quom](https://github.com/Viatorus/quom) flattens the library, starting at
its `main.cpp`, into one file. That file is then cut in two at the first
line containing the sentinel (`BEGIN CHARBRARY.CPP` by default): what comes
before it becomes `charbrary.h`, the rest becomes `charbrary.cpp`, which
gets an `#include "charbrary.h"` on top.

```no_run
use charbrarysplitter::{Config, Splitter};

let summary = Splitter::quom(Config::default()).run()?;
println!("{} header lines", summary.declaration_lines);
# Ok::<(), charbrarysplitter::Error>(())
```

Anything implementing [`Flattener`] can stand in for quom, which is how
the tests feed the splitter synthetic input.
*/

pub mod config;
pub mod error;
pub mod flatten;
pub mod logger;
pub mod partition;
pub mod splitter;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use flatten::{Flattened, Flattener, Quom, ScratchFile};
pub use partition::{partition, Mode, Partition};
pub use splitter::{Splitter, Summary};
