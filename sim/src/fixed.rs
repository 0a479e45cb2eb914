//! Fixed-point bookkeeping for the datapath.
//!
//! Samples and coefficients are signed 16-bit words, read as Q1.15 when all
//! fifteen fractional bits are in use. A product of two such words is exact
//! in 32 bits, and a sum of `2^k` products needs at most `32 + k` bits.

/// Bit width of samples and coefficients.
pub const SAMPLE_BITS: u32 = 16;

/// Smallest accumulator width that can hold the worst-case sum of
/// `tree_width` full-scale products.
pub fn min_accumulator_width(tree_width: usize) -> u32 {
    2 * SAMPLE_BITS + tree_width.trailing_zeros()
}

/// Whether `value` is representable in `bits`-bit two's complement.
pub fn fits_signed(value: i64, bits: u32) -> bool {
    if bits >= 64 {
        return true;
    }
    let bound = 1i64 << (bits - 1);
    (-bound..bound).contains(&value)
}

/// Final rescale of an accumulator value: arithmetic shift right by the
/// fractional bit count, then truncation to the output word. Results that
/// exceed 16 bits after the shift wrap.
pub fn rescale(acc: i64, fractional_bits: u32) -> i16 {
    (acc >> fractional_bits) as i16
}
