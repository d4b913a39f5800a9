// ABOUTME: CLI argument definitions for the imgcat binary
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::Parser;
use imgcat_core::{Dimension, Protocol};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "imgcat")]
#[command(about = "Display images inline in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Paths to the images ("-" reads from stdin)
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Display height: rows (N), pixels (Npx), percent of window (N%) or auto
    #[arg(long, value_parser = parse_dimension)]
    pub height: Option<Dimension>,

    /// Display width: columns (N), pixels (Npx), percent of window (N%) or auto
    #[arg(long, value_parser = parse_dimension)]
    pub width: Option<Dimension>,

    /// Stretch the image to the given width and height
    #[arg(long)]
    pub no_preserve_aspect_ratio: bool,

    /// Image protocol to emit (iterm2 or kitty)
    #[arg(long, value_parser = parse_protocol)]
    pub protocol: Option<Protocol>,

    /// Terminate iTerm2 sequences with BEL instead of ST
    #[arg(long)]
    pub bel: bool,

    /// Emit the image even if the terminal is known not to support it
    #[arg(long)]
    pub force: bool,

    /// Pixel rows per terminal line, used to derive a default height
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub pixels_per_line: Option<u32>,

    /// Remove all Kitty images from the screen and exit
    #[arg(long)]
    pub clear: bool,

    /// Print what would be written instead of writing the image
    #[arg(long)]
    pub dry_run: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Enable verbose output for debugging
    #[arg(long, short)]
    pub verbose: bool,
}

fn parse_dimension(s: &str) -> Result<Dimension, String> {
    s.parse::<Dimension>().map_err(|e| e.to_string())
}

fn parse_protocol(s: &str) -> Result<Protocol, String> {
    s.parse::<Protocol>()
}
