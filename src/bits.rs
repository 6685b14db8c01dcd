/// Pack a boolean grid into bytes, 8 samples per byte, MSB first.
///
/// The output length is `grid.len() / 8`. Trailing samples that do not
/// fill a whole byte are dropped.
pub fn pack(grid: &[bool]) -> Vec<u8> {
    log::debug!("Packing {} bits", grid.len());

    grid.chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |byte, dot| (byte << 1) | u8::from(*dot))
        })
        .collect()
}

/// Uppercase hex representation of packed bytes, as ZPL and CPCL expect.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}
