//! huffsteg-core: Huffman-compressed LSB steganography for BMP carriers
//!
//! This library hides an arbitrary byte sequence inside a bitmap image by
//! first compressing it with a Huffman code and then writing the
//! resulting bits into the least-significant bit of the image's pixel
//! bytes. Decoding needs no side channel: the frame embedded in the
//! carrier holds the original size and the frequency table from which the
//! decoder rebuilds the identical tree.
//!
//! # Architecture
//!
//! The system is designed around clear module boundaries:
//! - `bitio`: MSB-first bit packing and unpacking
//! - `huffman`: frequency tables, deterministic tree construction, prefix
//!   codes, payload compression/decompression
//! - `carrier`: stego frame layout, capacity checking, LSB embed/extract
//! - `stats`: observable embedding statistics
//!
//! # Design Principles
//!
//! - **No panics**: all failures are structured and recoverable
//! - **Deterministic**: the same frequency table always rebuilds the same
//!   tree, on both the encode and decode side
//! - **No partial output**: encode fails before producing bytes; decode
//!   fails whole, never returning a truncated secret
//! - **Opaque carrier**: everything after the fixed 54-byte header is
//!   treated as a flat LSB-addressable byte stream

pub mod bitio;
pub mod carrier;
pub mod error;
pub mod huffman;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
