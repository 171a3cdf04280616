// TextFSM: Template-driven parsing of network device CLI output
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Generating all templates of a directory

use crate::{generate_file, names, CodegenError, TemplateSource};

use check_keyword::CheckKeyword;
use log::*;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension of templates
pub const TEMPLATE_EXTENSION: &str = "textfsm";

/// Result of [`generate_dir`]
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files written, in the order in which they were generated (`mod.rs` last)
    pub generated: Vec<PathBuf>,
    /// Templates that could not be generated, with the reason
    pub failed: Vec<(PathBuf, CodegenError)>,
}

impl BatchReport {
    /// Returns `true` if all templates were generated.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generate one module for every `*.textfsm` file in `input`, and write it into `output`, as
/// `<stem>.rs`. Finally, a `mod.rs` declaring all generated modules is written.
///
/// Templates are processed in the order of their file names. A template which cannot be read or
/// generated is recorded in the report, and the remaining templates are still generated. This
/// includes templates whose module name is already taken by an earlier template. Only
/// errors on the directories themselves (or on `mod.rs`) abort the batch.
pub fn generate_dir(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<BatchReport, CodegenError> {
    let input = input.as_ref();
    let output = output.as_ref();

    let mut templates = fs::read_dir(input)
        .map_err(|source| CodegenError::Io { path: input.to_path_buf(), source })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| path.extension().map(|e| e == TEMPLATE_EXTENSION).unwrap_or(false))
        .collect::<Vec<_>>();
    templates.sort();
    info!("Found {} templates in {}", templates.len(), input.display());

    fs::create_dir_all(output)
        .map_err(|source| CodegenError::Io { path: output.to_path_buf(), source })?;

    let mut report = BatchReport::default();
    let mut modules: Vec<(String, PathBuf)> = Vec::new();
    for path in templates {
        let module = path.file_stem().and_then(|s| s.to_str()).map(module_name);
        let first =
            modules.iter().find(|(m, _)| Some(m) == module.as_ref()).map(|(_, p)| p.clone());
        let result = match (module, first) {
            (Some(module), Some(first)) => Err(CodegenError::DuplicateModule { module, first }),
            _ => generate_one(&path, output),
        };
        match result {
            Ok((module, target)) => {
                info!("Generated {} from {}", target.display(), path.display());
                modules.push((module, path));
                report.generated.push(target);
            }
            Err(e) => {
                error!("Cannot generate {}: {}", path.display(), e);
                report.failed.push((path, e));
            }
        }
    }

    let mod_path = output.join("mod.rs");
    fs::write(&mod_path, mod_file(&modules)?)
        .map_err(|source| CodegenError::Io { path: mod_path.clone(), source })?;
    report.generated.push(mod_path);

    Ok(report)
}

/// Generate a single template. Returns the module name and the path of the written file.
fn generate_one(path: &Path, output: &Path) -> Result<(String, PathBuf), CodegenError> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CodegenError::InvalidTypeName(path.display().to_string()))?;
    let text = fs::read_to_string(path)
        .map_err(|source| CodegenError::Io { path: path.to_path_buf(), source })?;

    let source = TemplateSource::new(stem, text)?;
    let code = generate_file(&source)?;

    let module = module_name(stem);
    let target = output.join(format!("{}.rs", names::field_name(stem)));
    fs::write(&target, code).map_err(|source| CodegenError::Io { path: target.clone(), source })?;
    Ok((module, target))
}

/// Name under which the generated file is declared in `mod.rs`.
fn module_name(stem: &str) -> String {
    let name = names::field_name(stem);
    if name.is_keyword() {
        name.into_safe()
    } else {
        name
    }
}

fn mod_file(modules: &[(String, PathBuf)]) -> Result<String, CodegenError> {
    let mut s = String::new();
    writeln!(s, "// Code generated by textfsm_gen. DO NOT EDIT.")?;
    writeln!(s)?;
    for (module, _) in modules {
        writeln!(s, "pub mod {};", module)?;
    }
    Ok(s)
}
