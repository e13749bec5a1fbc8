pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Scale an 8-bit channel by a unit-interval factor, rounding to nearest.
pub(crate) fn scale_u8(c: u8, factor: f32) -> u8 {
    (f32::from(c) * factor.clamp(0.0, 1.0)).round() as u8
}
