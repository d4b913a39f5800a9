// ABOUTME: Final byte layout for frames written to the terminal
// ABOUTME: Adds trailing newlines and reserves rows for images drawn through tmux

use crate::constants::cursor;
use imgcat_core::constants::escapes;
use imgcat_core::protocol::iterm2::split_frame;
use imgcat_core::{Protocol, WriteResult};

/// Surround a transport result with the cursor movement it needs.
///
/// Through tmux the image is drawn behind tmux's back, so the rows it covers
/// are printed first and the cursor is moved back up over them. Everything is
/// assembled into one buffer so the caller can write it in one operation.
pub fn place(result: WriteResult, reserve_rows: Option<u32>) -> WriteResult {
    match result {
        WriteResult::DirectWrite(mut bytes) => {
            bytes.push(b'\n');
            WriteResult::DirectWrite(bytes)
        }
        WriteResult::PassthroughWrite(envelope) => match reserve_rows.filter(|&rows| rows > 0) {
            Some(rows) => WriteResult::PassthroughWrite(reserve(rows, &envelope)),
            None => {
                let mut bytes = envelope;
                bytes.push(b'\n');
                WriteResult::PassthroughWrite(bytes)
            }
        },
        unsupported @ WriteResult::Unsupported(_) => unsupported,
    }
}

fn reserve(rows: u32, envelope: &[u8]) -> Vec<u8> {
    let rows_text = rows.to_string();
    let mut out = Vec::with_capacity(envelope.len() + rows as usize + 32);

    out.extend(std::iter::repeat_n(b'\n', rows as usize));
    out.extend_from_slice(cursor::HIDE);
    // CSI <n> F: cursor to start of line n rows up
    out.extend_from_slice(escapes::CSI);
    out.extend_from_slice(rows_text.as_bytes());
    out.push(b'F');

    out.extend_from_slice(envelope);

    // CSI <n> E: back down past the image
    out.extend_from_slice(escapes::CSI);
    out.extend_from_slice(rows_text.as_bytes());
    out.push(b'E');
    out.extend_from_slice(cursor::SHOW);
    out
}

/// Text printed in place of an image the terminal cannot show
pub fn placeholder(name: &str) -> String {
    format!("[image: {}]", name)
}

/// One-line summary of a frame for `--dry-run`
pub fn describe(name: &str, protocol: Protocol, frame: &[u8], result: &WriteResult) -> String {
    let transport = match result {
        WriteResult::DirectWrite(_) => "direct".to_string(),
        WriteResult::PassthroughWrite(_) => "tmux passthrough".to_string(),
        WriteResult::Unsupported(reason) => format!("unsupported ({})", reason),
    };

    let detail = match protocol {
        Protocol::ITerm2 => split_frame(frame)
            .map(|parts| parts.attributes.to_string())
            .unwrap_or_else(|| format!("{} bytes", frame.len())),
        Protocol::Kitty => format!("{} bytes", frame.len()),
    };

    format!("{}: {} via {}: {}", name, protocol, transport, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_gets_trailing_newline() {
        let placed = place(WriteResult::DirectWrite(b"F".to_vec()), Some(3));
        assert_eq!(placed, WriteResult::DirectWrite(b"F\n".to_vec()));
    }

    #[test]
    fn test_passthrough_reserves_rows() {
        let placed = place(WriteResult::PassthroughWrite(b"ENV".to_vec()), Some(3));
        assert_eq!(
            placed,
            WriteResult::PassthroughWrite(b"\n\n\n\x1b[?25l\x1b[3FENV\x1b[3E\x1b[?25h".to_vec())
        );
    }

    #[test]
    fn test_passthrough_without_rows() {
        let placed = place(WriteResult::PassthroughWrite(b"ENV".to_vec()), None);
        assert_eq!(placed, WriteResult::PassthroughWrite(b"ENV\n".to_vec()));

        let placed = place(WriteResult::PassthroughWrite(b"ENV".to_vec()), Some(0));
        assert_eq!(placed, WriteResult::PassthroughWrite(b"ENV\n".to_vec()));
    }

    #[test]
    fn test_unsupported_untouched() {
        let result = WriteResult::Unsupported("no inline image support".to_string());
        assert_eq!(place(result.clone(), Some(5)), result);
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder("cat.png"), "[image: cat.png]");
    }

    #[test]
    fn test_describe_iterm2() {
        let frame = b"\x1b]1337;File=inline=1;size=3;preserveAspectRatio=1:AQID\x1b\\";
        let result = WriteResult::DirectWrite(frame.to_vec());
        assert_eq!(
            describe("a.png", Protocol::ITerm2, frame, &result),
            "a.png: iterm2 via direct: inline=1;size=3;preserveAspectRatio=1"
        );
    }

    #[test]
    fn test_describe_unsupported_kitty() {
        let result = WriteResult::Unsupported("no inline image support".to_string());
        assert_eq!(
            describe("stdin", Protocol::Kitty, b"12345", &result),
            "stdin: kitty via unsupported (no inline image support): 5 bytes"
        );
    }
}
