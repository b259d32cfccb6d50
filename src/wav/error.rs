// Codec error types

use thiserror::Error;

use super::FourCC;

/// Failure of a single encode or decode call.
///
/// Every variant is terminal: the call produced no output and retrying with
/// the same input fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WavError {
    /// Audio parameters that cannot describe a PCM stream
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Payload longer than the 32-bit size fields can describe
    #[error("Payload too large: {len} bytes (maximum {max})")]
    PayloadTooLarge { len: usize, max: usize },

    /// Fewer bytes than a full header
    #[error("Truncated header: expected {expected} bytes, got {actual}")]
    TruncatedHeader { expected: usize, actual: usize },

    /// A tag field does not hold its literal
    #[error(
        "Unknown tag at offset {offset}: expected '{}', found {found:?}",
        String::from_utf8_lossy(.expected)
    )]
    UnknownTag {
        offset: usize,
        expected: FourCC,
        found: FourCC,
    },

    /// Anything but a 16-byte linear PCM fmt chunk
    #[error(
        "Unsupported format: audio format {audio_format}, fmt chunk size {fmt_chunk_size} \
         (only 16-byte linear PCM is supported)"
    )]
    UnsupportedFormat {
        audio_format: u16,
        fmt_chunk_size: u32,
    },

    /// Header announces more payload than is present
    #[error("Truncated payload: header declares {expected} bytes, {actual} available")]
    TruncatedPayload { expected: u32, actual: usize },
}

pub type WavResult<T> = Result<T, WavError>;
