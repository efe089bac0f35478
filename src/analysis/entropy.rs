//! Shannon entropy calculation and byte frequency counting.
//!
//! Optimized with:
//! - 4-way parallel histogram counting to avoid cache contention
//! - Cache-aligned buffers for optimal memory access
//! - SIMD merge of the partial histograms

use wide::u32x4;

/// Largest possible entropy of a byte window, in bits.
pub const MAX_ENTROPY: f64 = 8.0;

/// Cache-aligned histogram for optimal memory access.
/// 64-byte alignment ensures each histogram starts on a cache line boundary.
#[repr(C, align(64))]
struct AlignedHistogram {
    counts: [u32; 256],
}

impl AlignedHistogram {
    #[inline(always)]
    const fn new() -> Self {
        Self {
            counts: [0u32; 256],
        }
    }
}

/// Threshold for using 4-way counting vs simple counting.
/// Below this, the setup overhead of 4-way counting isn't worth it.
const FOURWAY_THRESHOLD: usize = 256;

/// Count bytes using 4-way parallel histograms.
/// Consecutive bytes land in different tables, so repeated values do not
/// serialize on the same counter.
#[inline]
fn count_bytes_4way(data: &[u8], out: &mut [u32; 256]) {
    let mut h0 = AlignedHistogram::new();
    let mut h1 = AlignedHistogram::new();
    let mut h2 = AlignedHistogram::new();
    let mut h3 = AlignedHistogram::new();

    let chunks = data.chunks_exact(4);
    let remainder = chunks.remainder();

    for chunk in chunks {
        h0.counts[chunk[0] as usize] += 1;
        h1.counts[chunk[1] as usize] += 1;
        h2.counts[chunk[2] as usize] += 1;
        h3.counts[chunk[3] as usize] += 1;
    }

    for (i, &byte) in remainder.iter().enumerate() {
        match i {
            0 => h0.counts[byte as usize] += 1,
            1 => h1.counts[byte as usize] += 1,
            _ => h2.counts[byte as usize] += 1,
        }
    }

    // Merge 4 lanes at a time
    for i in (0..256).step_by(4) {
        let lane = |h: &AlignedHistogram| {
            u32x4::new([h.counts[i], h.counts[i + 1], h.counts[i + 2], h.counts[i + 3]])
        };
        let sum = lane(&h0) + lane(&h1) + lane(&h2) + lane(&h3);
        out[i..i + 4].copy_from_slice(&sum.to_array());
    }
}

/// Count bytes using simple sequential method (better for small data).
#[inline]
fn count_bytes_simple(data: &[u8], out: &mut [u32; 256]) {
    out.fill(0);
    for &byte in data {
        out[byte as usize] += 1;
    }
}

/// Count the occurrences of every byte value in `data`.
pub fn byte_counts(data: &[u8]) -> [u32; 256] {
    let mut counts = [0u32; 256];
    if data.len() >= FOURWAY_THRESHOLD {
        count_bytes_4way(data, &mut counts);
    } else {
        count_bytes_simple(data, &mut counts);
    }
    counts
}

/// Bytes counted per `u32` table. Small enough that no bucket can overflow.
pub const COUNT_CHUNK: usize = 1 << 24;

/// Add a `u32` table into a `u64` total.
#[inline]
pub fn add_counts(total: &mut [u64; 256], counts: &[u32; 256]) {
    for (dst, &src) in total.iter_mut().zip(counts) {
        *dst += u64::from(src);
    }
}

/// Count the occurrences of every byte value in inputs of any length.
pub fn byte_counts_wide(data: &[u8]) -> [u64; 256] {
    let mut total = [0u64; 256];
    for chunk in data.chunks(COUNT_CHUNK) {
        add_counts(&mut total, &byte_counts(chunk));
    }
    total
}

/// Calculate Shannon entropy for a byte slice.
///
/// Shannon entropy measures the average information content per byte.
/// Values range from 0 (every byte identical) to 8 (all 256 values equally
/// frequent). An empty slice has entropy 0.
pub fn calculate_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let counts = byte_counts_wide(data);
    let total = data.len() as f64;

    // H = -sum(p * log2(p))
    let mut entropy = 0.0f64;
    for &count in &counts {
        if count > 0 {
            let p = count as f64 / total;
            entropy -= p * p.log2();
        }
    }

    entropy
}
