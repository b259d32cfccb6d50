// File-level conversion between raw blobs and WAV containers
//
// Owns all file I/O around the pure codec in `wav`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::utils::io::{read_file, write_file};
use crate::wav::{self, AudioParams, WavHeader};

/// Extension given to converted files
pub const WAV_EXTENSION: &str = "wav";

/// Default output path for converting `input`.
///
/// The input's extension is replaced with `.wav`. An input that already
/// carries that extension becomes `<stem>.converted.wav` so it is never
/// overwritten by its own conversion.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let is_wav = input
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case(WAV_EXTENSION));
    if !is_wav {
        return input.with_extension(WAV_EXTENSION);
    }

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}.converted.{}", stem, WAV_EXTENSION))
}

/// Wrap the contents of `input` in a WAV container written to `output`
pub fn convert_file(input: &Path, output: &Path, params: &AudioParams) -> Result<WavHeader> {
    let payload =
        read_file(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let (header, bytes) = wav::encode_with_header(params, &payload)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    write_file(output, &bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(header)
}

/// Write the payload of the WAV container at `input` to `output`
pub fn extract_file(input: &Path, output: &Path) -> Result<WavHeader> {
    let bytes = read_file(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let (header, payload) = wav::decode(&bytes)
        .with_context(|| format!("Failed to decode {}", input.display()))?
        .into_parts();

    write_file(output, &payload)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(header)
}

/// Decode the WAV container at `path` and return its header
pub fn inspect_file(path: &Path) -> Result<WavHeader> {
    let bytes = read_file(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let container =
        wav::decode(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?;

    Ok(container.into_parts().0)
}
