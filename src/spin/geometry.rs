//! Wheel angles. A rotation is the wheel angle brought under the pointer, so a
//! rest rotation `r` shows the segment containing `r mod 360`.

/// Minimum number of whole revolutions a spin adds before landing.
pub const FULL_TURNS: u32 = 5;

/// Rotations above this are folded back into `[0, 360)` once the wheel rests.
pub const NORMALIZE_ABOVE_DEG: f64 = 3600.0;

/// `[start, end)` of segment `index` on a wheel of `count` equal segments.
pub fn segment_span(index: usize, count: usize) -> (f64, f64) {
    let width = 360.0 / count.max(1) as f64;
    (index as f64 * width, (index + 1) as f64 * width)
}

/// Rotation that spins more than [`FULL_TURNS`] revolutions past `current`
/// and rests on the centre of segment `index`.
pub fn target_rotation(current: f64, index: usize, count: usize) -> f64 {
    let (start, end) = segment_span(index, count);
    let landing = (start + end) / 2.0;
    let base = (current / 360.0).floor() * 360.0 + 360.0 * f64::from(FULL_TURNS + 1);
    base + landing
}

/// Segment under the pointer for a rest rotation.
pub fn segment_at(rotation: f64, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let width = 360.0 / count as f64;
    let index = (rotation.rem_euclid(360.0) / width).floor() as usize;
    index.min(count - 1)
}

pub fn normalize_rotation(rotation: f64) -> f64 {
    if rotation > NORMALIZE_ABOVE_DEG {
        rotation.rem_euclid(360.0)
    } else {
        rotation
    }
}
