//! `rezume init`: create a starter document from the bundled template.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::cli::Outcome;
use crate::document::Rezume;
use crate::errors::RezumeError;
use crate::persist::{self, DocumentFormat};

pub const TEMPLATE: &str = include_str!("../../assets/rezume-template.yml");

pub fn run(
    path: &Path,
    force: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Outcome> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    if path.exists() && !force {
        writeln!(out, "A {file_name} already exists at {}", path.display())?;
        let answer = prompt(input, out, "Do you want to overwrite? [y/N]")?;
        if !matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes") {
            writeln!(out, "Aborted.")?;
            return Ok(Outcome::Failure);
        }
    }

    writeln!(
        out,
        "This will generate {file_name}. Fill out your name and email to get started."
    )?;
    let name = prompt(input, out, "name")?;
    let email = prompt(input, out, "email")?;
    if name.is_empty() || email.is_empty() {
        writeln!(out, "error: name and email are both required")?;
        return Ok(Outcome::Failure);
    }

    match create(path, name, email) {
        Ok(()) => {
            writeln!(out, "Your {file_name} file has been created!")?;
            Ok(Outcome::Success)
        }
        Err(err) => {
            writeln!(out, "error: {err}")?;
            Ok(Outcome::Failure)
        }
    }
}

/// Loads the template, stamps the person's name and email on it and saves
/// it to `path`, replacing whatever is there.
pub fn create(path: &Path, name: String, email: String) -> Result<(), RezumeError> {
    let tree = persist::parse_tree(TEMPLATE, DocumentFormat::Yaml).map_err(|reason| {
        RezumeError::Configuration(format!("bundled template is unreadable: {reason}"))
    })?;

    let mut rezume = Rezume::new();
    rezume.load_data(&tree)?;
    rezume.name = Some(name);
    rezume.email = Some(email);
    rezume.save(path, true)
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<String> {
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read from stdin")?;
    if read == 0 {
        bail!("input closed before '{label}' was answered");
    }
    Ok(line.trim().to_string())
}
