/// Slab length in meters (200 mm).
pub const SLAB_LENGTH: f64 = 0.2;

/// Slab width in meters (200 mm).
pub const SLAB_WIDTH: f64 = 0.2;

/// Heat-flow cross section in m².
pub const SLAB_AREA: f64 = SLAB_LENGTH * SLAB_WIDTH;

/// Slab thickness in meters (37 mm).
pub const SLAB_THICKNESS: f64 = 0.037;

/// Fraction of electrical power that reaches the slab.
pub const SYSTEM_EFFICIENCY: f64 = 0.57;

pub const MIN_CASES: usize = 1;
pub const MAX_CASES: usize = 10;

/// Readings per test case: V, I, four inner and four outer temperatures.
pub const FIELDS_PER_CASE: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_area_is_four_hundredths() {
        assert!((SLAB_AREA - 0.04).abs() < 1e-12);
    }
}
