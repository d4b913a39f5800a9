// ABOUTME: Inline image protocol encoders and the frames they produce
// ABOUTME: Each protocol turns a render request into one complete escape-sequence frame

use crate::error::ImgcatError;
use crate::request::RenderRequest;
use crate::transport::TransportContext;
use std::fmt;
use std::str::FromStr;

pub mod iterm2;
pub mod kitty;

pub use iterm2::{ITerm2Encoder, Terminator};
pub use kitty::KittyEncoder;

pub trait ProtocolEncoder {
    /// Render a request into a complete frame, or fail before producing any bytes
    fn encode(&self, request: &RenderRequest) -> Result<EncodedFrame, ImgcatError>;

    /// Short protocol identifier used in logs
    fn name(&self) -> &'static str;
}

/// Bytes ready to be written to a terminal in a single operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame(Vec<u8>);

impl EncodedFrame {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for EncodedFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    ITerm2,
    Kitty,
}

impl Protocol {
    pub fn encoder(self, terminator: Terminator) -> Box<dyn ProtocolEncoder> {
        match self {
            Protocol::ITerm2 => Box::new(ITerm2Encoder::new(terminator)),
            Protocol::Kitty => Box::new(KittyEncoder::new()),
        }
    }

    /// Encoder tuned for where the frame will be delivered
    pub fn encoder_for(
        self,
        terminator: Terminator,
        context: &TransportContext,
    ) -> Box<dyn ProtocolEncoder> {
        match self {
            Protocol::Kitty => {
                Box::new(KittyEncoder::new().with_hold_cursor(context.multiplexer_active))
            }
            Protocol::ITerm2 => self.encoder(terminator),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::ITerm2 => "iterm2",
            Protocol::Kitty => "kitty",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "iterm2" | "iterm" => Ok(Protocol::ITerm2),
            "kitty" => Ok(Protocol::Kitty),
            _ => Err(format!(
                "Unknown protocol '{}'. Valid values: iterm2, kitty",
                s
            )),
        }
    }
}

/// Checks shared by every encoder before any bytes are produced
pub(crate) fn validate_request(request: &RenderRequest) -> Result<(), ImgcatError> {
    if request.payload.is_empty() {
        return Err(ImgcatError::InvalidPayload);
    }
    request.hint.validate()
}
