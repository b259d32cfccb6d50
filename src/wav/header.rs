// WAV header data model and field derivation

use serde::{Deserialize, Serialize};

use super::error::{WavError, WavResult};
use super::{
    FourCC, AUDIO_FORMAT_PCM, DATA_CHUNK_ID, FMT_CHUNK_ID, MAX_PAYLOAD_SIZE, PCM_FMT_CHUNK_SIZE,
    RIFF_SIZE_OVERHEAD, RIFF_TAG, WAVE_TAG, WAV_HEADER_SIZE,
};
use crate::utils::io::{fourcc_at, le_u16_at, le_u32_at};

// Field offsets within the canonical header
const RIFF_TAG_OFFSET: usize = 0;
const RIFF_SIZE_OFFSET: usize = 4;
const WAVE_TAG_OFFSET: usize = 8;
const FMT_CHUNK_ID_OFFSET: usize = 12;
const FMT_CHUNK_SIZE_OFFSET: usize = 16;
const AUDIO_FORMAT_OFFSET: usize = 20;
const CHANNELS_OFFSET: usize = 22;
const SAMPLE_RATE_OFFSET: usize = 24;
const BYTE_RATE_OFFSET: usize = 28;
const BLOCK_ALIGN_OFFSET: usize = 32;
const BITS_PER_SAMPLE_OFFSET: usize = 34;
const DATA_CHUNK_ID_OFFSET: usize = 36;
const DATA_SIZE_OFFSET: usize = 40;

/// Caller-supplied description of the PCM stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioParams {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl Default for AudioParams {
    fn default() -> Self {
        AudioParams {
            channels: 2,
            sample_rate: 44_100,
            bits_per_sample: 16,
        }
    }
}

impl AudioParams {
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16) -> Self {
        AudioParams {
            channels,
            sample_rate,
            bits_per_sample,
        }
    }

    /// Check that the parameters describe a stream with whole-byte frames
    /// whose derived fields fit their widths
    pub fn validate(&self) -> WavResult<()> {
        self.derived().map(|_| ())
    }

    /// Bytes per sample frame across all channels
    pub fn block_align(&self) -> WavResult<u16> {
        self.derived().map(|(block_align, _)| block_align)
    }

    /// Bytes of payload per second of playback
    pub fn byte_rate(&self) -> WavResult<u32> {
        self.derived().map(|(_, byte_rate)| byte_rate)
    }

    fn derived(&self) -> WavResult<(u16, u32)> {
        if self.channels == 0 {
            return Err(WavError::InvalidParameters(
                "channel count must be at least 1".to_string(),
            ));
        }
        if self.sample_rate == 0 {
            return Err(WavError::InvalidParameters(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.bits_per_sample == 0 {
            return Err(WavError::InvalidParameters(
                "bits per sample must be positive".to_string(),
            ));
        }

        let frame_bits = u32::from(self.bits_per_sample) * u32::from(self.channels);
        if frame_bits % 8 != 0 {
            return Err(WavError::InvalidParameters(format!(
                "{} bits x {} channels is not a whole number of bytes per frame",
                self.bits_per_sample, self.channels
            )));
        }

        let block_align = u16::try_from(frame_bits / 8).map_err(|_| {
            WavError::InvalidParameters(format!(
                "block align of {} bytes does not fit in 16 bits",
                frame_bits / 8
            ))
        })?;

        let byte_rate = u32::try_from(u64::from(self.sample_rate) * u64::from(block_align))
            .map_err(|_| {
                WavError::InvalidParameters(format!(
                    "byte rate for {} Hz x {} bytes per frame does not fit in 32 bits",
                    self.sample_rate, block_align
                ))
            })?;

        Ok((block_align, byte_rate))
    }
}

/// Canonical 44-byte PCM WAV header.
///
/// Fields are read-only. A header built with [`WavHeader::new`] always
/// carries byte rate and block align derived from its parameters; a header
/// produced by [`WavHeader::parse`] reports what was stored on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WavHeader {
    riff_size: u32,
    fmt_chunk_size: u32,
    audio_format: u16,
    channels: u16,
    sample_rate: u32,
    byte_rate: u32,
    block_align: u16,
    bits_per_sample: u16,
    data_size: u32,
}

impl WavHeader {
    /// Build the header for a payload of `data_size` bytes
    pub fn new(params: &AudioParams, data_size: u32) -> WavResult<Self> {
        let (block_align, byte_rate) = params.derived()?;

        let riff_size = data_size
            .checked_add(RIFF_SIZE_OVERHEAD)
            .ok_or(WavError::PayloadTooLarge {
                len: data_size as usize,
                max: MAX_PAYLOAD_SIZE,
            })?;

        Ok(WavHeader {
            riff_size,
            fmt_chunk_size: PCM_FMT_CHUNK_SIZE,
            audio_format: AUDIO_FORMAT_PCM,
            channels: params.channels,
            sample_rate: params.sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: params.bits_per_sample,
            data_size,
        })
    }

    /// Build the header for a payload of `len` bytes, rejecting lengths the
    /// 32-bit size fields cannot hold
    pub fn for_payload_len(params: &AudioParams, len: usize) -> WavResult<Self> {
        if len > MAX_PAYLOAD_SIZE {
            return Err(WavError::PayloadTooLarge {
                len,
                max: MAX_PAYLOAD_SIZE,
            });
        }
        // Bounded by MAX_PAYLOAD_SIZE above
        Self::new(params, len as u32)
    }

    /// Serialize to the exact on-disk byte layout
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_SIZE] {
        let mut out = [0u8; WAV_HEADER_SIZE];

        put(&mut out, RIFF_TAG_OFFSET, RIFF_TAG);
        put(&mut out, RIFF_SIZE_OFFSET, &self.riff_size.to_le_bytes());
        put(&mut out, WAVE_TAG_OFFSET, WAVE_TAG);

        put(&mut out, FMT_CHUNK_ID_OFFSET, FMT_CHUNK_ID);
        put(&mut out, FMT_CHUNK_SIZE_OFFSET, &self.fmt_chunk_size.to_le_bytes());
        put(&mut out, AUDIO_FORMAT_OFFSET, &self.audio_format.to_le_bytes());
        put(&mut out, CHANNELS_OFFSET, &self.channels.to_le_bytes());
        put(&mut out, SAMPLE_RATE_OFFSET, &self.sample_rate.to_le_bytes());
        put(&mut out, BYTE_RATE_OFFSET, &self.byte_rate.to_le_bytes());
        put(&mut out, BLOCK_ALIGN_OFFSET, &self.block_align.to_le_bytes());
        put(&mut out, BITS_PER_SAMPLE_OFFSET, &self.bits_per_sample.to_le_bytes());

        put(&mut out, DATA_CHUNK_ID_OFFSET, DATA_CHUNK_ID);
        put(&mut out, DATA_SIZE_OFFSET, &self.data_size.to_le_bytes());

        out
    }

    /// Parse the header at the start of `data`
    pub fn parse(data: &[u8]) -> WavResult<Self> {
        if data.len() < WAV_HEADER_SIZE {
            return Err(WavError::TruncatedHeader {
                expected: WAV_HEADER_SIZE,
                actual: data.len(),
            });
        }

        expect_tag(data, RIFF_TAG_OFFSET, RIFF_TAG)?;
        expect_tag(data, WAVE_TAG_OFFSET, WAVE_TAG)?;
        expect_tag(data, FMT_CHUNK_ID_OFFSET, FMT_CHUNK_ID)?;
        expect_tag(data, DATA_CHUNK_ID_OFFSET, DATA_CHUNK_ID)?;

        let fmt_chunk_size = le_u32_at(data, FMT_CHUNK_SIZE_OFFSET);
        let audio_format = le_u16_at(data, AUDIO_FORMAT_OFFSET);
        if audio_format != AUDIO_FORMAT_PCM || fmt_chunk_size != PCM_FMT_CHUNK_SIZE {
            return Err(WavError::UnsupportedFormat {
                audio_format,
                fmt_chunk_size,
            });
        }

        Ok(WavHeader {
            riff_size: le_u32_at(data, RIFF_SIZE_OFFSET),
            fmt_chunk_size,
            audio_format,
            channels: le_u16_at(data, CHANNELS_OFFSET),
            sample_rate: le_u32_at(data, SAMPLE_RATE_OFFSET),
            byte_rate: le_u32_at(data, BYTE_RATE_OFFSET),
            block_align: le_u16_at(data, BLOCK_ALIGN_OFFSET),
            bits_per_sample: le_u16_at(data, BITS_PER_SAMPLE_OFFSET),
            data_size: le_u32_at(data, DATA_SIZE_OFFSET),
        })
    }

    pub fn riff_size(&self) -> u32 {
        self.riff_size
    }

    pub fn fmt_chunk_size(&self) -> u32 {
        self.fmt_chunk_size
    }

    pub fn audio_format(&self) -> u16 {
        self.audio_format
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn byte_rate(&self) -> u32 {
        self.byte_rate
    }

    pub fn block_align(&self) -> u16 {
        self.block_align
    }

    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    pub fn data_size(&self) -> u32 {
        self.data_size
    }

    /// Parameters this header was built from
    pub fn params(&self) -> AudioParams {
        AudioParams::new(self.channels, self.sample_rate, self.bits_per_sample)
    }

    /// Playback length of the payload, if the byte rate is non-zero
    pub fn duration_secs(&self) -> Option<f64> {
        if self.byte_rate == 0 {
            return None;
        }
        Some(f64::from(self.data_size) / f64::from(self.byte_rate))
    }
}

fn put(out: &mut [u8; WAV_HEADER_SIZE], offset: usize, bytes: &[u8]) {
    out[offset..offset + bytes.len()].copy_from_slice(bytes);
}

fn expect_tag(data: &[u8], offset: usize, expected: &FourCC) -> WavResult<()> {
    let found = fourcc_at(data, offset);
    if &found != expected {
        return Err(WavError::UnknownTag {
            offset,
            expected: *expected,
            found,
        });
    }
    Ok(())
}
