//! Stego frame layout and LSB embedding/extraction.
//!
//! The carrier is an opaque byte stream with a fixed 54-byte header; its
//! internal pixel structure is never inspected. Everything after the
//! header is an addressable sequence of least-significant bits, one per
//! carrier byte.
//!
//! # Frame Format
//!
//! ```text
//! carrier byte      content
//! +---------------+-------------------------------------------------+
//! | 0 .. 54       | BMP header, copied verbatim                     |
//! +---------------+-------------------------------------------------+
//! | 54 ..         | one frame bit per byte LSB, in order:           |
//! |               |   original size   u32, MSB first                |
//! |               |   frequency table 256 x u32, byte-value order   |
//! |               |   payload         Huffman-coded bits            |
//! +---------------+-------------------------------------------------+
//! | remainder     | copied verbatim                                 |
//! +---------------+-------------------------------------------------+
//! ```
//!
//! The frequency table is always present, all-zero for an empty secret;
//! decoding stops at the size field when it reads zero. Capacity is
//! checked before any output bytes exist, so a failed encode produces
//! nothing.

use crate::bitio::{BitReader, BitWriter};
use crate::error::{CarrierError, Result};
use crate::huffman::{FrequencyTable, HuffmanTree, SYMBOL_COUNT};
use crate::stats::EmbedStats;

/// Fixed carrier header length, copied through untouched.
pub const HEADER_LEN: usize = 54;

/// Width of the embedded size field in bits.
pub const SIZE_FIELD_BITS: u64 = 32;

/// Width of the embedded frequency table in bits (256 x 32).
pub const FREQ_TABLE_BITS: u64 = SYMBOL_COUNT as u64 * 32;

/// Total LSB slots a frame with `payload_bits` payload bits occupies.
pub fn required_bits(payload_bits: u64) -> u64 {
    SIZE_FIELD_BITS + FREQ_TABLE_BITS + payload_bits
}

/// Embeddable LSB slots in a carrier of `carrier_len` bytes.
pub fn capacity_bits(carrier_len: usize) -> u64 {
    carrier_len.saturating_sub(HEADER_LEN) as u64
}

/// Compress `secret` and embed it into a copy of `cover`.
///
/// Returns the complete stego image plus embedding statistics. The cover
/// is never modified; header bytes and any bytes past the embedded region
/// are carried over verbatim, and embedded bytes differ from the cover
/// only in their LSB.
///
/// # Errors
/// - `CarrierError::CorruptHeader` if the cover lacks even the 54-byte header
/// - `CarrierError::PayloadTooLarge` if `secret` exceeds the 32-bit size field
/// - `CarrierError::InsufficientCapacity` if the frame does not fit; raised
///   before any output exists
pub fn embed(cover: &[u8], secret: &[u8]) -> Result<(Vec<u8>, EmbedStats)> {
    if cover.len() < HEADER_LEN {
        return Err(CarrierError::CorruptHeader {
            required: HEADER_LEN,
            actual: cover.len(),
        }
        .into());
    }

    let size = u32::try_from(secret.len()).map_err(|_| CarrierError::PayloadTooLarge {
        length: secret.len() as u64,
    })?;

    let freq = FrequencyTable::from_bytes(secret);
    let tree = HuffmanTree::from_frequencies(&freq);
    let table = tree.code_table()?;
    let payload_bits = table.payload_bit_count(&freq)?;

    let required = required_bits(payload_bits);
    let available = capacity_bits(cover.len());
    if available < required {
        return Err(CarrierError::InsufficientCapacity {
            required,
            available,
        }
        .into());
    }

    // Materialize the whole frame bit stream before touching the carrier.
    let mut frame = BitWriter::with_capacity(required);
    frame.write_bits(u64::from(size), 32);
    for &count in freq.counts() {
        frame.write_bits(u64::from(count), 32);
    }
    table.compress_into(secret, &mut frame)?;

    let (frame_bytes, frame_bits) = frame.into_parts();
    debug_assert_eq!(frame_bits, required);

    let mut stego = cover.to_vec();
    for i in 0..frame_bits as usize {
        let bit = (frame_bytes[i / 8] >> (7 - (i % 8))) & 1;
        let slot = &mut stego[HEADER_LEN + i];
        *slot = (*slot & 0xFE) | bit;
    }

    let stats = EmbedStats {
        secret_bytes: u64::from(size),
        distinct_symbols: freq.distinct_symbols(),
        payload_bits,
        required_bits: required,
        available_bits: available,
    };
    Ok((stego, stats))
}

/// Extract and decompress the secret hidden in `stego`.
///
/// Reads the size field first; zero means the original was empty and the
/// table and payload regions are never touched. Otherwise the frequency
/// table is read back, checked against the size field, and used to
/// rebuild the encoder's tree for the payload walk.
///
/// # Errors
/// - `CarrierError::CorruptHeader` if the image cannot hold the size and
///   frequency fields
/// - `CarrierError::FrequencyMismatch` if the table sum disagrees with the
///   size field
/// - `HuffmanError::IncompleteStream` / `HuffmanError::InvalidCode` from
///   the payload walk
pub fn extract(stego: &[u8]) -> Result<Vec<u8>> {
    let size_region = HEADER_LEN + SIZE_FIELD_BITS as usize;
    if stego.len() < size_region {
        return Err(CarrierError::CorruptHeader {
            required: size_region,
            actual: stego.len(),
        }
        .into());
    }

    // Collect the tail's LSBs once; the frame then parses like any packed
    // bit stream.
    let tail = &stego[HEADER_LEN..];
    let mut lsbs = BitWriter::with_capacity(tail.len() as u64);
    for &byte in tail {
        lsbs.push_bit(byte & 1 == 1);
    }
    let (frame_bytes, frame_bits) = lsbs.into_parts();
    let mut reader = BitReader::with_bit_len(&frame_bytes, frame_bits);

    let size = reader.read_u32().ok_or(CarrierError::CorruptHeader {
        required: size_region,
        actual: stego.len(),
    })?;
    if size == 0 {
        return Ok(Vec::new());
    }

    let full_region = HEADER_LEN + (SIZE_FIELD_BITS + FREQ_TABLE_BITS) as usize;
    let mut counts = [0u32; SYMBOL_COUNT];
    for count in counts.iter_mut() {
        *count = reader.read_u32().ok_or(CarrierError::CorruptHeader {
            required: full_region,
            actual: stego.len(),
        })?;
    }

    let freq = FrequencyTable::from_counts(counts);
    if freq.total() != u64::from(size) {
        return Err(CarrierError::FrequencyMismatch {
            table_total: freq.total(),
            size,
        }
        .into());
    }

    let tree = HuffmanTree::from_frequencies(&freq);
    tree.decompress(&mut reader, size as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// A throwaway cover: 54 header bytes then a patterned tail.
    fn cover_with_capacity(bits: u64) -> Vec<u8> {
        let len = HEADER_LEN + bits as usize;
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn embed_extract_round_trip() {
        let secret = b"carrier round trip payload, with repetition: zzzzzzzz";
        let cover = cover_with_capacity(required_bits(8 * secret.len() as u64));

        let (stego, stats) = embed(&cover, secret).expect("embed");
        assert_eq!(stats.secret_bytes, secret.len() as u64);
        assert_eq!(extract(&stego).expect("extract"), secret);
    }

    #[test]
    fn header_and_tail_survive_verbatim() {
        let secret = b"hi";
        let cover = cover_with_capacity(required_bits(16) + 100);

        let (stego, stats) = embed(&cover, secret).unwrap();
        assert_eq!(stego.len(), cover.len());
        assert_eq!(&stego[..HEADER_LEN], &cover[..HEADER_LEN]);

        // Bytes past the embedded region are untouched.
        let end = HEADER_LEN + stats.required_bits as usize;
        assert_eq!(&stego[end..], &cover[end..]);

        // Embedded bytes differ only in their LSB.
        for (s, c) in stego[HEADER_LEN..end].iter().zip(&cover[HEADER_LEN..end]) {
            assert_eq!(s & 0xFE, c & 0xFE);
        }
    }

    #[test]
    fn capacity_boundary_is_exact() {
        let secret = b"boundary";
        let freq = FrequencyTable::from_bytes(secret);
        let table = HuffmanTree::from_frequencies(&freq).code_table().unwrap();
        let payload_bits = table.payload_bit_count(&freq).unwrap();

        let exact = cover_with_capacity(required_bits(payload_bits));
        assert!(embed(&exact, secret).is_ok());

        let short = &exact[..exact.len() - 1];
        let err = embed(short, secret).unwrap_err();
        assert!(matches!(
            err,
            Error::Carrier(CarrierError::InsufficientCapacity { .. })
        ));
    }

    #[test]
    fn empty_secret_still_frames() {
        // Size field zero, all-zero table, no payload.
        let cover = cover_with_capacity(required_bits(0));
        let (stego, stats) = embed(&cover, b"").unwrap();

        assert_eq!(stats.payload_bits, 0);
        assert_eq!(stats.required_bits, SIZE_FIELD_BITS + FREQ_TABLE_BITS);
        assert_eq!(extract(&stego).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn cover_without_header_is_rejected() {
        let err = embed(&[0u8; 10], b"x").unwrap_err();
        assert!(matches!(
            err,
            Error::Carrier(CarrierError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn stego_too_short_for_size_field() {
        let err = extract(&[0u8; HEADER_LEN + 10]).unwrap_err();
        assert!(matches!(
            err,
            Error::Carrier(CarrierError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn stego_too_short_for_frequency_table() {
        // Enough for the size field, which claims a nonzero secret, but the
        // table region is cut off.
        let mut stego = vec![0u8; HEADER_LEN + 200];
        // size = 1: set the last size-field LSB.
        stego[HEADER_LEN + 31] |= 1;

        let err = extract(&stego).unwrap_err();
        assert!(matches!(
            err,
            Error::Carrier(CarrierError::CorruptHeader { .. })
        ));
    }

    #[test]
    fn frequency_sum_mismatch_is_rejected() {
        let secret = b"mismatch target";
        let cover = cover_with_capacity(required_bits(8 * secret.len() as u64));
        let (mut stego, _) = embed(&cover, secret).unwrap();

        // Corrupt the size field: flip its lowest bit (carrier byte 54+31).
        stego[HEADER_LEN + 31] ^= 1;

        let err = extract(&stego).unwrap_err();
        assert!(matches!(
            err,
            Error::Carrier(CarrierError::FrequencyMismatch { .. })
        ));
    }
}
