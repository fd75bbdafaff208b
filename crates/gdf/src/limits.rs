//! Limits and magic numbers used while decoding.

/// Largest GDF text accepted, in bytes (after decompression).
pub const MAX_INPUT_SIZE: usize = 512 * 1024 * 1024;

/// Largest number of columns in one section header.
pub const MAX_COLUMNS: usize = 4096;

/// Floats whose canonical rendering fits in this many characters are
/// declared FLOAT, anything longer DOUBLE.
pub const MAX_FLOAT_CHARS: usize = 8;

/// Frame magic of a zstd-compressed payload.
pub const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];
