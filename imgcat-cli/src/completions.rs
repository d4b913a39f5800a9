// ABOUTME: Shell completion generation using clap_complete
// ABOUTME: Writes the completion script for the imgcat command to any writer

use crate::cli::Cli;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

pub fn write_completions<W: Write>(shell: Shell, writer: &mut W) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, writer);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_flags() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("imgcat"));
        assert!(script.contains("--pixels-per-line"));
    }

    #[test]
    fn test_all_shells_generate() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut out = Vec::new();
            write_completions(shell, &mut out);
            assert!(!out.is_empty(), "{} produced no output", shell);
        }
    }
}
