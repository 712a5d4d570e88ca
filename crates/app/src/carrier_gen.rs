//! Synthetic carrier and sample-secret generation for the demo mode.
//!
//! The carrier is a minimal 24-bit BMP: a well-formed 54-byte header
//! followed by noise pixel rows. The core never parses pixel structure,
//! but the header fields are filled in correctly so the output opens in
//! an image viewer.
//!
//! Sample secrets mix compressibility levels (runs, text-like sections,
//! random bytes) so the demo's compression ratio is interesting to look
//! at. Everything is seeded: the same seed always generates the same
//! carrier and secret.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Pixels per row of generated carriers. Three bytes each makes a row
/// stride of 768 bytes, already a multiple of 4, so rows need no padding.
const WIDTH: usize = 256;
const ROW_BYTES: usize = WIDTH * 3;

/// Generate a BMP carrier with at least `capacity_bits` embeddable bytes
/// after the header.
///
/// One payload bit fits per pixel byte, so the pixel data region has at
/// least `capacity_bits` bytes, rounded up to whole rows.
pub fn generate_bmp_carrier(seed: u64, capacity_bits: u64) -> Vec<u8> {
    let rows = (capacity_bits as usize).div_ceil(ROW_BYTES).max(1);
    let pixel_bytes = rows * ROW_BYTES;
    let file_len = 54 + pixel_bytes;

    let mut image = Vec::with_capacity(file_len);

    // BITMAPFILEHEADER
    image.extend_from_slice(b"BM");
    image.extend_from_slice(&(file_len as u32).to_le_bytes());
    image.extend_from_slice(&[0u8; 4]); // reserved
    image.extend_from_slice(&54u32.to_le_bytes()); // pixel data offset

    // BITMAPINFOHEADER
    image.extend_from_slice(&40u32.to_le_bytes()); // header size
    image.extend_from_slice(&(WIDTH as i32).to_le_bytes());
    image.extend_from_slice(&(rows as i32).to_le_bytes());
    image.extend_from_slice(&1u16.to_le_bytes()); // planes
    image.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    image.extend_from_slice(&0u32.to_le_bytes()); // compression: BI_RGB
    image.extend_from_slice(&(pixel_bytes as u32).to_le_bytes());
    image.extend_from_slice(&2835i32.to_le_bytes()); // 72 DPI, both axes
    image.extend_from_slice(&2835i32.to_le_bytes());
    image.extend_from_slice(&0u32.to_le_bytes()); // palette colors
    image.extend_from_slice(&0u32.to_le_bytes()); // important colors

    debug_assert_eq!(image.len(), 54);

    // Noise pixels: LSB rewrites stay invisible in uniform noise.
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    image.extend((0..pixel_bytes).map(|_| rng.gen::<u8>()));

    image
}

/// Generate sample secret data with mixed compressibility.
pub fn generate_sample_secret(seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let chunk_size = (size_bytes - data.len()).min(1024);
        match rng.gen_range(0..3) {
            // Highly compressible: a run of one byte
            0 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(chunk_size));
            }
            // Moderately compressible: limited alphabet
            1 => {
                let alphabet = b"abcdefghijklmnopqrstuvwxyz .!,\n";
                for _ in 0..chunk_size {
                    data.push(alphabet[rng.gen_range(0..alphabet.len())]);
                }
            }
            // Incompressible: random bytes
            _ => {
                for _ in 0..chunk_size {
                    data.push(rng.gen());
                }
            }
        }
    }

    data.truncate(size_bytes);
    data
}
