#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// `round(x * y / 255)` for 8-bit channel values.
pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Hash an integer lattice coordinate to `[0, 1)`.
fn lattice(seed: u64, i: i64) -> f64 {
    let mut h = Fnv1a64::new(seed ^ Fnv1a64::OFFSET_BASIS);
    h.write_u64(i as u64);
    // Top 53 bits give a uniformly spaced f64 mantissa.
    (h.finish() >> 11) as f64 / (1u64 << 53) as f64
}

/// Smooth 1-D value noise in `[0, 1)`.
///
/// Same `(seed, x)` always yields the same value, so shapes jittered with it stay put from frame
/// to frame.
pub(crate) fn value_noise(seed: u64, x: f64) -> f64 {
    if !x.is_finite() {
        return 0.0;
    }
    let x0 = x.floor();
    let t = x - x0;
    let i = x0 as i64;
    let a = lattice(seed, i);
    let b = lattice(seed, i.wrapping_add(1));
    let s = t * t * (3.0 - 2.0 * t);
    a + (b - a) * s
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
