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

use textfsm::{Options, Template};
use textfsm_codegen::generate_dir;

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

fn main() -> Result<(), Box<dyn Error>> {
    // initialize the env logger
    pretty_env_logger::init();
    // run clap
    let args = CommandLineArguments::parse();

    match args.cmd {
        MainCommand::Generate { input_dir, output_dir } => {
            let report = generate_dir(&input_dir, &output_dir)?;
            info!("Generated {} files into {}", report.generated.len(), output_dir.display());
            if !report.is_success() {
                for (path, e) in report.failed.iter() {
                    eprintln!("{}: {}", path.display(), e);
                }
                let message = format!("{} templates could not be generated", report.failed.len());
                return Err(message.into());
            }
        }
        MainCommand::Check { templates } => {
            let mut failed = 0;
            for path in templates.iter() {
                match read_template(path) {
                    Ok(t) => println!(
                        "{}: {} values, {} states, {} rules",
                        path.display(),
                        t.values().len(),
                        t.states().len(),
                        t.num_rules()
                    ),
                    Err(e) => {
                        eprintln!("{}: {}", path.display(), e);
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                let message = format!("{} of {} templates are invalid", failed, templates.len());
                return Err(message.into());
            }
        }
        MainCommand::Parse { template, input, record_at_eof, pretty } => {
            let template = read_template(&template)?;
            let text = if input == Path::new("-") {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                text
            } else {
                fs::read_to_string(&input)?
            };

            let records = template.run_with_options(&text, &Options { record_at_eof })?;
            info!("{}: {} records", template.name(), records.len());
            let json = if pretty {
                serde_json::to_string_pretty(&records)?
            } else {
                serde_json::to_string(&records)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

/// Read and parse a template file. The template is named after the file stem.
fn read_template(path: &Path) -> Result<Template, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!("Parsing template {} from {}", name, path.display());
    Ok(Template::named(name, &text)?)
}

/// Generate typed Rust parsers from TextFSM templates, check templates, or run a template over
/// some CLI output.
#[derive(Parser, Debug)]
#[clap(name = "textfsm_gen", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Generate one Rust module for every `*.textfsm` file of a directory
    #[clap(name = "generate")]
    Generate {
        /// Directory containing the templates
        #[clap(default_value = "templates")]
        input_dir: PathBuf,
        /// Directory into which the modules are written
        #[clap(default_value = "generated")]
        output_dir: PathBuf,
    },
    /// Parse templates and report all errors
    #[clap(name = "check")]
    Check {
        /// Template files
        #[clap(required = true)]
        templates: Vec<PathBuf>,
    },
    /// Run a template over CLI output, and print the records as JSON
    #[clap(name = "parse")]
    Parse {
        /// Template file
        template: PathBuf,
        /// File containing the CLI output, or `-` to read from stdin
        input: PathBuf,
        /// Emit the record in progress when the input ends
        #[clap(short = 'e', long)]
        record_at_eof: bool,
        /// Pretty-print the JSON output
        #[clap(short, long)]
        pretty: bool,
    },
}
