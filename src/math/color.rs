/// Parses `#rrggbb` (leading `#` optional, any case) into linear `[0, 1]` channels.
pub fn hex_to_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };

    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

/// Converts `[0, 1]` channels back to bytes, clamping out-of-range input
pub fn rgb_to_u8(rgb: [f32; 3]) -> [u8; 3] {
    rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Bytes to `[0, 1]` channels
pub fn u8_to_rgb(rgb: [u8; 3]) -> [f32; 3] {
    rgb.map(|c| c as f32 / 255.0)
}
