// ABOUTME: Render request types consumed by protocol encoders
// ABOUTME: Bundles the opaque image payload with display hints and cosmetic metadata

use crate::hint::DisplayHint;
use typed_builder::TypedBuilder;

/// Raw bytes of an image container. Never decoded, only measured and encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload(Vec<u8>);

impl ImagePayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ImagePayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ImagePayload {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct RenderRequest {
    #[builder(setter(into))]
    pub payload: ImagePayload,

    #[builder(default)]
    pub hint: DisplayHint,

    #[builder(default = true)]
    pub preserve_aspect_ratio: bool,

    /// Label shown by terminals that keep a download history
    #[builder(default, setter(strip_option, into))]
    pub filename: Option<String>,
}

impl RenderRequest {
    /// Shorthand for a request with default attributes
    pub fn new(payload: impl Into<ImagePayload>, hint: DisplayHint) -> Self {
        Self::builder().payload(payload).hint(hint).build()
    }

    /// Inline display is the only mode this crate emits
    pub fn inline(&self) -> bool {
        true
    }
}
