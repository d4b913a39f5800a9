// ABOUTME: Kitty terminal graphics protocol implementation
// ABOUTME: Handles base64 encoding and chunking for the Kitty graphics protocol

use super::{EncodedFrame, ProtocolEncoder, validate_request};
use crate::constants::{escapes, kitty};
use crate::error::ImgcatError;
use crate::request::RenderRequest;
use base64::{Engine, engine::general_purpose::STANDARD};

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, Copy, Default)]
pub struct KittyEncoder {
    hold_cursor: bool,
}

impl KittyEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the terminal to leave the cursor where it is (`C=1`).
    ///
    /// Needed inside tmux, where the caller moves the cursor around the image
    /// itself.
    pub fn with_hold_cursor(mut self, hold_cursor: bool) -> Self {
        self.hold_cursor = hold_cursor;
        self
    }

    fn first_chunk_control(&self, request: &RenderRequest) -> String {
        let hint = request.hint;
        let mut control = format!("a=T,f={}", kitty::FORMAT_PNG);

        if let Some(rows) = hint.height().as_cells() {
            control.push_str(&format!(",r={}", rows));
        } else if !hint.height().is_auto() {
            log::debug!("Kitty protocol only sizes in cells; ignoring height hint");
        }
        if let Some(cols) = hint.width().as_cells() {
            control.push_str(&format!(",c={}", cols));
        } else if !hint.width().is_auto() {
            log::debug!("Kitty protocol only sizes in cells; ignoring width hint");
        }
        if self.hold_cursor {
            control.push_str(",C=1");
        }

        control
    }
}

impl ProtocolEncoder for KittyEncoder {
    fn encode(&self, request: &RenderRequest) -> Result<EncodedFrame, ImgcatError> {
        validate_request(request)?;

        if !request.payload.as_bytes().starts_with(PNG_SIGNATURE) {
            log::warn!("Kitty format f=100 expects PNG data; the terminal may reject this image");
        }

        let base64_data = STANDARD.encode(request.payload.as_bytes());
        let chunks: Vec<&[u8]> = base64_data.as_bytes().chunks(kitty::CHUNK_SIZE).collect();
        let mut out = Vec::with_capacity(base64_data.len() + chunks.len() * 32);

        // <ESC>_G<control data>;<payload><ESC>\
        for (i, chunk) in chunks.iter().enumerate() {
            let more = u8::from(i + 1 < chunks.len());
            let control = if i == 0 {
                format!("{},m={}", self.first_chunk_control(request), more)
            } else {
                format!("m={}", more)
            };

            out.extend_from_slice(kitty::APC_GRAPHICS);
            out.extend_from_slice(control.as_bytes());
            out.push(b';');
            out.extend_from_slice(chunk);
            out.extend_from_slice(escapes::ST);
        }

        log::debug!(
            "Encoded {} payload bytes into {} Kitty chunks",
            request.payload.len(),
            chunks.len()
        );

        Ok(EncodedFrame::new(out))
    }

    fn name(&self) -> &'static str {
        "kitty"
    }
}

/// Frame that deletes every image placement on screen
pub fn clear_all() -> EncodedFrame {
    let mut out = Vec::new();
    out.extend_from_slice(kitty::APC_GRAPHICS);
    out.extend_from_slice(b"a=d,d=A");
    out.extend_from_slice(escapes::ST);
    EncodedFrame::new(out)
}
