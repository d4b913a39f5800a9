// ABOUTME: Renders one image source: encode, choose a transport, then write the result
// ABOUTME: Unsupported terminals get a text placeholder instead of escape sequences

use crate::input::ImageSource;
use crate::options::RenderOptions;
use crate::output::{describe, place, placeholder};
use crate::sizing;
use anyhow::Result;
use imgcat_core::protocol::kitty::clear_all;
use imgcat_core::{
    Dimension, DisplayHint, Emitted, RenderRequest, TransportContext, WriteResult, emit,
};
use std::io::Write;

/// What happened to one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Frame written; number of bytes
    Shown(usize),
    /// Placeholder written; the reason the terminal was skipped
    Placeholder(String),
    /// `--dry-run` description written
    Described,
}

fn display_hint(
    source: &ImageSource,
    options: &RenderOptions,
    terminal_rows: Option<u16>,
) -> DisplayHint {
    let height = options.height.unwrap_or_else(|| {
        Dimension::Cells(sizing::default_height(
            &source.bytes,
            options.pixels_per_line,
            terminal_rows,
        ))
    });
    DisplayHint::auto()
        .with_width(options.width)
        .with_height(height)
}

fn build_request(
    source: &ImageSource,
    options: &RenderOptions,
    hint: DisplayHint,
) -> RenderRequest {
    let builder = RenderRequest::builder()
        .payload(source.bytes.as_slice())
        .hint(hint)
        .preserve_aspect_ratio(options.preserve_aspect_ratio);
    match &source.label {
        Some(label) => builder.filename(label.as_str()).build(),
        None => builder.build(),
    }
}

pub fn render_source<W: Write>(
    source: &ImageSource,
    options: &RenderOptions,
    context: &TransportContext,
    terminal_rows: Option<u16>,
    writer: &mut W,
) -> Result<Outcome> {
    let hint = display_hint(source, options, terminal_rows);
    let request = build_request(source, options, hint);

    let encoder = options.protocol.encoder_for(options.terminator, context);
    let frame = encoder.encode(&request)?;
    log::debug!(
        "Encoded {} ({} bytes) as {} frame of {} bytes",
        source.display_name(),
        source.bytes.len(),
        encoder.name(),
        frame.len()
    );

    let selector = options.selector(context);

    if options.dry_run {
        let raw = frame.as_bytes().to_vec();
        let result = selector.wrap(frame, context);
        writeln!(
            writer,
            "{}",
            describe(source.display_name(), options.protocol, &raw, &result)
        )?;
        return Ok(Outcome::Described);
    }

    let result = selector.wrap(frame, context);
    if let WriteResult::Unsupported(reason) = &result {
        writeln!(writer, "{}", placeholder(source.display_name()))?;
        writer.flush()?;
        return Ok(Outcome::Placeholder(reason.clone()));
    }

    let placed = place(result, hint.height().as_cells());
    match emit(writer, &placed)? {
        Emitted::Written(n) => Ok(Outcome::Shown(n)),
        Emitted::Skipped(reason) => Ok(Outcome::Placeholder(reason)),
    }
}

/// Delete every Kitty image placement on screen
pub fn clear_images<W: Write>(
    options: &RenderOptions,
    context: &TransportContext,
    writer: &mut W,
) -> Result<Outcome> {
    let result = options.selector(context).wrap(clear_all(), context);
    match emit(writer, &result)? {
        Emitted::Written(n) => Ok(Outcome::Shown(n)),
        Emitted::Skipped(reason) => Ok(Outcome::Placeholder(reason)),
    }
}
