// ABOUTME: Reads image sources from files or stdin into byte buffers
// ABOUTME: Decides between stdin and file arguments the way a cat-like tool does

use anyhow::{Context, Result, bail};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Bytes of one image plus the label shown by the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub label: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageSource {
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or("stdin")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputPlan {
    Stdin,
    Files(Vec<PathBuf>),
    /// Nothing to read; show usage
    Help,
}

fn is_stdin_marker(inputs: &[PathBuf]) -> bool {
    inputs.len() == 1 && inputs[0] == Path::new("-")
}

pub fn plan_inputs(inputs: &[PathBuf], stdin_is_terminal: bool) -> Result<InputPlan> {
    if !stdin_is_terminal {
        if inputs.is_empty() || is_stdin_marker(inputs) {
            return Ok(InputPlan::Stdin);
        }
        bail!("when reading from stdin, file arguments should not be given");
    }

    if is_stdin_marker(inputs) {
        return Ok(InputPlan::Stdin);
    }
    if inputs.is_empty() {
        return Ok(InputPlan::Help);
    }
    Ok(InputPlan::Files(inputs.to_vec()))
}

pub fn read_file(path: &Path) -> Result<ImageSource> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;

    Ok(ImageSource {
        label: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned()),
        bytes,
    })
}

pub fn read_stdin<R: Read>(mut reader: R) -> Result<ImageSource> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .context("Failed to read image from stdin")?;

    Ok(ImageSource { label: None, bytes })
}
