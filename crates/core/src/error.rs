//! Error types for the steganography core.
//!
//! All operations return structured errors rather than panicking.
//! Encode failures are raised before any output bytes exist; decode
//! failures abort the whole extraction, never yielding partial data.

use thiserror::Error;

/// Top-level error type for all operations in the system.
///
/// Each variant corresponds to a failure domain:
/// - Huffman: codec construction or encode/decode failures
/// - Carrier: stego frame layout, capacity, or extraction failures
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// Huffman codec error (e.g., invalid code, truncated bit stream)
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Carrier framing error (e.g., capacity, corrupt header)
    #[error("carrier error: {0}")]
    Carrier(#[from] CarrierError),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Huffman codec errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HuffmanError {
    /// An input byte has no code in the table. The table is always built
    /// from the input's own frequencies, so this is an internal fault.
    #[error("no code for byte {byte:#04x}")]
    MissingCode { byte: u8 },

    /// The bit walk reached a position with no node (malformed stream).
    #[error("invalid huffman code at bit {position}")]
    InvalidCode { position: u64 },

    /// The carrier ran out of bits before the expected output length.
    #[error("bit stream ended after {decoded} of {expected} bytes")]
    IncompleteStream { decoded: usize, expected: usize },

    /// A code exceeds the 64-bit representation limit.
    #[error("code length {length} exceeds maximum 64")]
    CodeTooLong { length: usize },
}

/// Carrier framing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CarrierError {
    /// The carrier's post-header region cannot hold the required bits.
    /// Raised on encode before any output is produced.
    #[error("carrier capacity insufficient: need {required} embeddable bits, have {available}")]
    InsufficientCapacity { required: u64, available: u64 },

    /// The stego image is too short to contain the fixed header plus the
    /// size and frequency fields.
    #[error("corrupt stego header: need at least {required} bytes, got {actual}")]
    CorruptHeader { required: usize, actual: usize },

    /// The embedded frequency table does not sum to the embedded size
    /// field, so the rebuilt tree cannot match the encoder's.
    #[error("corrupt stego header: frequency table sums to {table_total}, size field says {size}")]
    FrequencyMismatch { table_total: u64, size: u32 },

    /// The secret is too large for the 32-bit size field.
    #[error("secret of {length} bytes exceeds the 32-bit size field")]
    PayloadTooLarge { length: u64 },
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
