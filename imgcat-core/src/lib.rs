// ABOUTME: Inline terminal image encoder and transport selection
// ABOUTME: Turns image bytes into escape-sequence frames and wraps them for tmux when needed

pub mod constants;
pub mod detection;
pub mod emit;
pub mod error;
pub mod hint;
pub mod protocol;
pub mod request;
pub mod transport;

pub use emit::{Emitted, emit};
pub use error::ImgcatError;
pub use hint::{Dimension, DisplayHint};
pub use protocol::{
    EncodedFrame, ITerm2Encoder, KittyEncoder, Protocol, ProtocolEncoder, Terminator,
};
pub use request::{ImagePayload, RenderRequest};
pub use transport::{
    TransportContext, TransportSelector, WriteResult, unwrap_passthrough, wrap, wrap_passthrough,
};

/// Encode a payload with the iTerm2 protocol and default attributes
pub fn encode(
    payload: impl Into<ImagePayload>,
    hint: DisplayHint,
) -> Result<EncodedFrame, ImgcatError> {
    ITerm2Encoder::default().encode(&RenderRequest::new(payload, hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_idempotent() {
        let hint = DisplayHint::auto().with_width(Dimension::Pixels(64));
        let first = encode(vec![9u8; 33], hint).unwrap();
        let second = encode(vec![9u8; 33], hint).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_empty_payload() {
        assert!(matches!(
            encode(Vec::<u8>::new(), DisplayHint::auto()),
            Err(ImgcatError::InvalidPayload)
        ));
    }
}
