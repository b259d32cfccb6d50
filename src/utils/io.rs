// I/O utilities for reading and writing container files

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::wav::FourCC;

/// Read little-endian 16-bit integer at `offset`.
///
/// Callers check that `data` is long enough.
pub fn le_u16_at(data: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([data[offset], data[offset + 1]])
}

/// Read little-endian 32-bit integer at `offset`
pub fn le_u32_at(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Read four-character code at `offset`
pub fn fourcc_at(data: &[u8], offset: usize) -> FourCC {
    [
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]
}

/// Read a whole file into memory
pub fn read_file<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let capacity = file.metadata().map(|m| m.len() as usize).unwrap_or(0);
    let mut reader = BufReader::new(file);
    let mut buffer = Vec::with_capacity(capacity);
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Create (or truncate) `path` and write `bytes` to it.
///
/// The buffer is flushed explicitly so write errors surface here instead of
/// being swallowed on drop.
pub fn write_file<P: AsRef<Path>>(path: P, bytes: &[u8]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    Ok(())
}
