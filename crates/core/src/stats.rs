//! Embedding statistics for observable behavior.
//!
//! Produced by every successful embed so callers can see what the codec
//! and carrier actually did: how small the payload got and how much of
//! the carrier's LSB capacity it consumed. Plain data with no timing and
//! no global state.

/// Statistics from a single embed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedStats {
    /// Secret length in bytes (the embedded size field).
    pub secret_bytes: u64,

    /// Distinct byte values in the secret.
    pub distinct_symbols: usize,

    /// Huffman payload length in bits.
    pub payload_bits: u64,

    /// Total LSB slots the frame occupied (size + table + payload).
    pub required_bits: u64,

    /// LSB slots the carrier offered after its header.
    pub available_bits: u64,
}

impl EmbedStats {
    /// Compression ratio (payload bits / raw bits).
    ///
    /// Returns 0.0 for an empty secret.
    pub fn compression_ratio(&self) -> f64 {
        if self.secret_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / (self.secret_bytes * 8) as f64
        }
    }

    /// Fraction of the carrier's embeddable capacity used by the frame.
    pub fn carrier_utilization(&self) -> f64 {
        if self.available_bits == 0 {
            0.0
        } else {
            self.required_bits as f64 / self.available_bits as f64
        }
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("=== Embedding Summary ===");
        println!(
            "Secret: {} bytes, {} distinct byte values",
            self.secret_bytes, self.distinct_symbols
        );
        println!(
            "Payload: {} bits ({:.1}% of raw size)",
            self.payload_bits,
            self.compression_ratio() * 100.0
        );
        println!(
            "Frame: {} of {} embeddable bits ({:.1}% of carrier capacity)",
            self.required_bits,
            self.available_bits,
            self.carrier_utilization() * 100.0
        );
    }
}
