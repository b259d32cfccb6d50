// Container encode/decode
//
// Both directions are pure and all-or-nothing: on error nothing is produced.

use super::error::{WavError, WavResult};
use super::header::{AudioParams, WavHeader};
use super::WAV_HEADER_SIZE;

/// A decoded container: its header plus the payload it describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavContainer {
    header: WavHeader,
    payload: Vec<u8>,
}

impl WavContainer {
    pub fn header(&self) -> &WavHeader {
        &self.header
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_parts(self) -> (WavHeader, Vec<u8>) {
        (self.header, self.payload)
    }
}

/// Wrap `payload` in a canonical PCM WAV container.
///
/// The result is exactly `44 + payload.len()` bytes.
pub fn encode(params: &AudioParams, payload: &[u8]) -> WavResult<Vec<u8>> {
    encode_with_header(params, payload).map(|(_, bytes)| bytes)
}

/// Like [`encode`], also returning the header that was written
pub fn encode_with_header(
    params: &AudioParams,
    payload: &[u8],
) -> WavResult<(WavHeader, Vec<u8>)> {
    let header = WavHeader::for_payload_len(params, payload.len())?;

    let mut out = Vec::with_capacity(WAV_HEADER_SIZE + payload.len());
    out.extend_from_slice(&header.to_bytes());
    out.extend_from_slice(payload);
    Ok((header, out))
}

/// Parse a canonical PCM WAV container.
///
/// Exactly `data_size` bytes after the header are taken as payload; anything
/// beyond that is ignored.
pub fn decode(bytes: &[u8]) -> WavResult<WavContainer> {
    let header = WavHeader::parse(bytes)?;

    let body = &bytes[WAV_HEADER_SIZE..];
    let data_size = header.data_size();
    let payload = body
        .get(..data_size as usize)
        .ok_or(WavError::TruncatedPayload {
            expected: data_size,
            actual: body.len(),
        })?
        .to_vec();

    Ok(WavContainer { header, payload })
}
