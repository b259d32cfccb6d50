//! Wavify - wrap arbitrary bytes in a playable PCM WAV container
//!
//! The [`wav`] module is the pure codec: [`wav::encode`] prefixes a payload
//! with a canonical 44-byte RIFF/WAVE header and [`wav::decode`] reverses it.
//! The [`convert`] module does the file I/O around it.
//!
//! ```
//! use wavify::{decode, encode, AudioParams};
//!
//! let bytes = encode(&AudioParams::new(2, 44_100, 16), &[0xFF; 10]).unwrap();
//! assert_eq!(bytes.len(), 54);
//!
//! let container = decode(&bytes).unwrap();
//! assert_eq!(container.header().block_align(), 4);
//! assert_eq!(container.payload(), &[0xFF; 10]);
//! ```

pub mod convert;
mod utils;
pub mod wav;

pub use convert::{convert_file, derive_output_path, extract_file, inspect_file};
pub use utils::io::{read_file, write_file};
pub use wav::{
    decode, encode, encode_with_header, AudioParams, WavContainer, WavError, WavHeader, WavResult,
};
