//! Minimal CLI: check schema documents, or dump their canonical form.
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use crate::lint::{self, Violation};
use crate::path_de;
use crate::property::Document;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// decode property-descriptor schema documents, lint them, or re-emit their canonical JSON
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// decode and lint documents; non-zero exit if any fails
    Check(CheckArgs),
    /// decode one or more documents and re-emit canonical pretty JSON
    Dump(DumpArgs),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    input_settings: InputSettings,
}

#[derive(Args, Debug)]
struct DumpArgs {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted; requires exactly one input)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Check(args) => args.run(),
            Command::Dump(args) => args.run(),
        }
    }
}

impl CheckArgs {
    fn run(&self) -> anyhow::Result<()> {
        let paths = resolve_file_path_patterns(&self.input_settings.input)?;
        let mut failed = 0usize;
        for path in &paths {
            let shown = path.to_string_lossy();
            match check_one(path) {
                Ok(violations) if violations.is_empty() => {
                    println!("{} {shown}", "ok".green().bold());
                }
                Ok(violations) => {
                    failed += 1;
                    println!("{} {shown}", "FAIL".red().bold());
                    for violation in violations {
                        println!("  {violation}");
                    }
                }
                Err(error) => {
                    failed += 1;
                    println!("{} {shown}", "FAIL".red().bold());
                    println!("  {error:#}");
                }
            }
        }
        if failed > 0 {
            anyhow::bail!("{failed} of {} document(s) failed", paths.len());
        }
        Ok(())
    }
}

fn check_one(path: &Path) -> anyhow::Result<Vec<Violation>> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: Document = path_de::from_str_with_path(&source)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(lint::check_document(&document))
}

impl DumpArgs {
    fn run(&self) -> anyhow::Result<()> {
        let paths = resolve_file_path_patterns(&self.input_settings.input)?;
        if self.out.is_some() && paths.len() != 1 {
            anyhow::bail!("--out requires exactly one input document");
        }
        for path in &paths {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let document: Document = path_de::from_str_with_path(&source)
                .with_context(|| format!("failed to decode {}", path.display()))?;
            let emitted = serde_json::to_string_pretty(&document)?;
            match self.out.as_ref() {
                Some(out) => {
                    if let Some(parent) = out.parent() {
                        std::fs::create_dir_all(parent)
                            .with_context(|| format!("failed to create {}", parent.display()))?;
                    }
                    std::fs::write(out, &emitted)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                }
                None => println!("{emitted}"),
            }
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                anyhow::bail!("glob pattern matched no files: {pattern}");
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
