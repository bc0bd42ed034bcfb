//! BLAKE3-derived identifiers.
//!
//! Qdrant point ids must be integers or UUIDs, while item ids are opaque
//! strings. Points are keyed by a 64-bit digest of the item id and the
//! original id travels in the payload.


/// First 8 bytes of the BLAKE3 digest of `data`, little-endian.
///
/// Collisions become plausible only around billions of distinct inputs
/// (`P ≈ n² / 2^65`). A colliding index would overwrite one item with another,
/// so collections far beyond that size should switch to UUID point ids.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[0..8]);
    u64::from_le_bytes(bytes)
}

/// Point id for an item; re-indexing the same id overwrites the same point.
#[inline]
pub fn point_id_for_item(item_id: &str) -> u64 {
    hash_to_u64(item_id.as_bytes())
}

/// Seeds a deterministic stream of values from `text`.
///
/// Used by test embedders so identical texts map to identical vectors.
pub fn seeded_unit_values(text: &str, len: usize) -> Vec<f32> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(text.as_bytes());
    let mut reader = hasher.finalize_xof();

    let mut buf = [0u8; 4];
    (0..len)
        .map(|_| {
            reader.fill(&mut buf);
            (u32::from_le_bytes(buf) as f32 / u32::MAX as f32) * 2.0 - 1.0
        })
        .collect()
}
