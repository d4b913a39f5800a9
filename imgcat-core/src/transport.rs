// ABOUTME: Transport selection for encoded frames: direct, tmux passthrough, or unsupported
// ABOUTME: Pure decision over an explicit TransportContext; never touches the process environment

use crate::constants::{escapes, terminals};
use crate::protocol::EncodedFrame;

/// Environment signals relevant to delivering a frame.
///
/// Computed fresh for every call; see `detection.rs` for the boundary that
/// builds one from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportContext {
    pub multiplexer_active: bool,
    pub terminal_family: String,
    pub output_interactive: bool,
}

impl TransportContext {
    pub fn new(terminal_family: impl Into<String>) -> Self {
        Self {
            multiplexer_active: false,
            terminal_family: terminal_family.into(),
            output_interactive: true,
        }
    }

    pub fn with_multiplexer(mut self, active: bool) -> Self {
        self.multiplexer_active = active;
        self
    }

    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.output_interactive = interactive;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// Frame bytes to write unchanged
    DirectWrite(Vec<u8>),
    /// Frame wrapped in a tmux DCS passthrough envelope
    PassthroughWrite(Vec<u8>),
    /// Terminal known to lack inline images; nothing should be written
    Unsupported(String),
}

impl WriteResult {
    /// Bytes to write, or `None` for an unsupported outcome
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            WriteResult::DirectWrite(bytes) | WriteResult::PassthroughWrite(bytes) => {
                Some(bytes.as_slice())
            }
            WriteResult::Unsupported(_) => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, WriteResult::Unsupported(_))
    }
}

/// Decides how a frame reaches the terminal.
#[derive(Debug, Clone)]
pub struct TransportSelector {
    unsupported: Vec<String>,
    force: bool,
}

impl Default for TransportSelector {
    fn default() -> Self {
        Self {
            unsupported: terminals::KNOWN_UNSUPPORTED
                .iter()
                .map(|t| t.to_string())
                .collect(),
            force: false,
        }
    }
}

impl TransportSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a terminal family to the unsupported set
    pub fn with_unsupported(mut self, family: impl Into<String>) -> Self {
        self.unsupported.push(family.into());
        self
    }

    pub fn with_unsupported_list<I, S>(mut self, families: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unsupported.extend(families.into_iter().map(Into::into));
        self
    }

    /// Emit even for terminals in the unsupported set
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn is_unsupported(&self, family: &str) -> bool {
        self.unsupported
            .iter()
            .any(|known| known.eq_ignore_ascii_case(family))
    }

    pub fn wrap(&self, frame: EncodedFrame, context: &TransportContext) -> WriteResult {
        if self.is_unsupported(&context.terminal_family) {
            if !self.force {
                log::debug!(
                    "Terminal '{}' has no inline image support",
                    context.terminal_family
                );
                return WriteResult::Unsupported(terminals::UNSUPPORTED_REASON.to_string());
            }
            log::debug!(
                "Forcing output to unsupported terminal '{}'",
                context.terminal_family
            );
        }

        if context.multiplexer_active {
            log::debug!("Multiplexer detected; wrapping frame in tmux passthrough");
            return WriteResult::PassthroughWrite(wrap_passthrough(frame.as_bytes()));
        }

        WriteResult::DirectWrite(frame.into_bytes())
    }
}

/// `wrap` with the default unsupported set and no override
pub fn wrap(frame: EncodedFrame, context: &TransportContext) -> WriteResult {
    TransportSelector::default().wrap(frame, context)
}

/// Split a frame after every `ESC \`, so each escape command stands alone.
/// Trailing bytes without a terminator form the last command.
fn split_commands(frame: &[u8]) -> Vec<&[u8]> {
    let mut commands = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i + 1 < frame.len() {
        if frame[i..].starts_with(escapes::ST) {
            commands.push(&frame[start..i + escapes::ST.len()]);
            start = i + escapes::ST.len();
            i = start;
        } else {
            i += 1;
        }
    }
    if start < frame.len() || commands.is_empty() {
        commands.push(&frame[start..]);
    }
    commands
}

fn push_envelope(out: &mut Vec<u8>, command: &[u8]) {
    out.extend_from_slice(escapes::TMUX_WRAP_START);
    for &byte in command {
        if byte == escapes::ESC {
            out.push(escapes::ESC);
        }
        out.push(byte);
    }
    out.extend_from_slice(escapes::TMUX_WRAP_END);
}

/// `ESC P tmux ; <command with every ESC doubled> ESC \`, once per command.
///
/// A chunked frame gets one envelope per chunk; tmux drops a passthrough
/// string that outgrows its input buffer.
pub fn wrap_passthrough(frame: &[u8]) -> Vec<u8> {
    let commands = split_commands(frame);
    let escapes_inside = frame.iter().filter(|&&b| b == escapes::ESC).count();
    let mut out = Vec::with_capacity(
        frame.len()
            + escapes_inside
            + commands.len() * (escapes::TMUX_WRAP_START.len() + escapes::TMUX_WRAP_END.len()),
    );

    for command in commands {
        push_envelope(&mut out, command);
    }
    out
}

/// Reverse of [`wrap_passthrough`]: concatenates the contents of every
/// envelope. `None` if any envelope is malformed.
pub fn unwrap_passthrough(wrapped: &[u8]) -> Option<EncodedFrame> {
    let mut out = Vec::with_capacity(wrapped.len());
    let mut rest = wrapped;

    loop {
        rest = rest.strip_prefix(escapes::TMUX_WRAP_START)?;
        let mut i = 0;
        loop {
            match *rest.get(i)? {
                escapes::ESC => match *rest.get(i + 1)? {
                    escapes::ESC => {
                        out.push(escapes::ESC);
                        i += 2;
                    }
                    b'\\' => {
                        i += 2;
                        break;
                    }
                    _ => return None,
                },
                byte => {
                    out.push(byte);
                    i += 1;
                }
            }
        }
        rest = &rest[i..];
        if rest.is_empty() {
            return Some(EncodedFrame::new(out));
        }
    }
}
