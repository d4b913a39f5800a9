// ABOUTME: iTerm2 terminal inline image protocol implementation
// ABOUTME: Handles base64 encoding with iTerm2-specific OSC 1337 escape sequences

use super::{EncodedFrame, ProtocolEncoder, validate_request};
use crate::constants::{escapes, iterm2};
use crate::error::ImgcatError;
use crate::request::RenderRequest;
use base64::{Engine, engine::general_purpose::STANDARD};

/// How the OSC sequence is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Terminator {
    /// `ESC \`
    #[default]
    St,
    /// `BEL`, accepted by older emulators
    Bel,
}

impl Terminator {
    pub fn as_bytes(&self) -> &'static [u8] {
        match self {
            Terminator::St => escapes::ST,
            Terminator::Bel => &[escapes::BEL],
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ITerm2Encoder {
    terminator: Terminator,
}

impl ITerm2Encoder {
    pub fn new(terminator: Terminator) -> Self {
        Self { terminator }
    }

    fn attributes(request: &RenderRequest) -> Vec<String> {
        let mut attributes = vec![
            "inline=1".to_string(),
            format!("size={}", request.payload.len()),
        ];

        if let Some(name) = request.filename.as_deref().filter(|n| !n.is_empty()) {
            attributes.push(format!("name={}", STANDARD.encode(name.as_bytes())));
        }
        if let Some(height) = request.hint.height().attribute_value() {
            attributes.push(format!("height={}", height));
        }
        if let Some(width) = request.hint.width().attribute_value() {
            attributes.push(format!("width={}", width));
        }

        attributes.push(format!(
            "preserveAspectRatio={}",
            u8::from(request.preserve_aspect_ratio)
        ));
        attributes
    }
}

impl ProtocolEncoder for ITerm2Encoder {
    fn encode(&self, request: &RenderRequest) -> Result<EncodedFrame, ImgcatError> {
        validate_request(request)?;

        let attributes = Self::attributes(request).join(";");
        let body = STANDARD.encode(request.payload.as_bytes());
        let terminator = self.terminator.as_bytes();

        // ESC ] 1337;File=<attributes>:<base64><ST>
        let mut out = Vec::with_capacity(
            escapes::OSC.len()
                + iterm2::FILE_PREFIX.len()
                + attributes.len()
                + 1
                + body.len()
                + terminator.len(),
        );
        out.extend_from_slice(escapes::OSC);
        out.extend_from_slice(iterm2::FILE_PREFIX);
        out.extend_from_slice(attributes.as_bytes());
        out.push(b':');
        out.extend_from_slice(body.as_bytes());
        out.extend_from_slice(terminator);

        log::debug!(
            "Encoded {} payload bytes into {} byte iTerm2 frame",
            request.payload.len(),
            out.len()
        );

        Ok(EncodedFrame::new(out))
    }

    fn name(&self) -> &'static str {
        "iterm2"
    }
}

/// The pieces of an iTerm2 frame, borrowed from the frame bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameParts<'a> {
    pub attributes: &'a str,
    pub body: &'a [u8],
    pub terminator: Terminator,
}

impl<'a> FrameParts<'a> {
    /// Look up a single attribute value by key
    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.attributes.split(';').find_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            (k == key).then_some(v)
        })
    }

    pub fn decode_body(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.body)
    }
}

/// Split a frame produced by [`ITerm2Encoder`] back into attributes and body
pub fn split_frame(frame: &[u8]) -> Option<FrameParts<'_>> {
    let rest = frame.strip_prefix(escapes::OSC)?;
    let rest = rest.strip_prefix(iterm2::FILE_PREFIX)?;

    let (rest, terminator) = if let Some(inner) = rest.strip_suffix(escapes::ST) {
        (inner, Terminator::St)
    } else if let Some(inner) = rest.strip_suffix(&[escapes::BEL]) {
        (inner, Terminator::Bel)
    } else {
        return None;
    };

    let colon = rest.iter().position(|&b| b == b':')?;
    let attributes = std::str::from_utf8(&rest[..colon]).ok()?;

    Some(FrameParts {
        attributes,
        body: &rest[colon + 1..],
        terminator,
    })
}
