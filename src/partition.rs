// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

/// Where the line currently being scanned goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Declaration,
    Implementation,
}

/// The flattened lines, split in two at the first sentinel line.
///
/// Lines are kept verbatim, terminators included, and in their original
/// order inside each half.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    pub declaration: Vec<String>,
    pub implementation: Vec<String>,
    /// Index in the input of the line that switched to implementation mode.
    pub marker: Option<usize>,
}

/// Routes every line to the declaration half until one contains
/// `sentinel`; that line and everything after it go to the implementation
/// half. The switch happens at most once.
pub fn partition<I>(lines: I, sentinel: &str) -> Partition
where
    I: IntoIterator<Item = String>,
{
    let mut mode = Mode::Declaration;
    let mut result = Partition::default();
    for (index, line) in lines.into_iter().enumerate() {
        if mode == Mode::Declaration && line.contains(sentinel) {
            mode = Mode::Implementation;
            result.marker = Some(index);
        }
        match mode {
            Mode::Declaration => result.declaration.push(line),
            Mode::Implementation => result.implementation.push(line),
        }
    }
    result
}
