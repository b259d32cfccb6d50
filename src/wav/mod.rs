// RIFF/WAVE container handling module
//
// Canonical PCM layout only: a 44-byte header ("RIFF" chunk descriptor,
// 16-byte "fmt " chunk, "data" chunk header) followed by the raw payload.
//
// Reference:
// - http://soundfile.sapp.org/doc/WaveFormat/

pub mod codec;
pub mod error;
pub mod header;

pub use codec::{decode, encode, encode_with_header, WavContainer};
pub use error::{WavError, WavResult};
pub use header::{AudioParams, WavHeader};

/// Four-character chunk identifier, compared byte for byte
pub type FourCC = [u8; 4];

pub const RIFF_TAG: &FourCC = b"RIFF";
pub const WAVE_TAG: &FourCC = b"WAVE";
pub const FMT_CHUNK_ID: &FourCC = b"fmt ";
pub const DATA_CHUNK_ID: &FourCC = b"data";

/// Size of the canonical header preceding the payload
pub const WAV_HEADER_SIZE: usize = 44;

/// Bytes counted by riffSize besides the payload: the rest of the header
/// after the riffTag/riffSize pair
pub const RIFF_SIZE_OVERHEAD: u32 = (WAV_HEADER_SIZE - 8) as u32;

/// fmt chunk body size for uncompressed PCM
pub const PCM_FMT_CHUNK_SIZE: u32 = 16;

/// audioFormat code for linear PCM
pub const AUDIO_FORMAT_PCM: u16 = 1;

/// Largest payload whose dataSize and riffSize both fit in 32 bits
pub const MAX_PAYLOAD_SIZE: usize = (u32::MAX - RIFF_SIZE_OVERHEAD) as usize;
