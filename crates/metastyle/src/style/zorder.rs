//! Z-order values and the reserved sentinel band.
//!
//! Ordinary z-orders come from feature data. The top of the `i64` range is
//! reserved for highlight layers so that probed features always draw above
//! selected ones, and selected ones above everything else:
//!
//! ```text
//! PROBED > PROBE_HALO_INNER > PROBE_HALO_OUTER > SELECTED > SELECTION_HALO > ORDINARY_MAX >= any feature z-order
//! ```

/// Namespace for z-order constants.
pub struct ZOrder;

impl ZOrder {
    /// Lead z-index of a probed feature. Outranks everything.
    pub const PROBED: i64 = i64::MAX;
    /// Inner (white) ring of the probe halo.
    pub const PROBE_HALO_INNER: i64 = i64::MAX - 1;
    /// Outer (black) ring of the probe halo.
    pub const PROBE_HALO_OUTER: i64 = i64::MAX - 2;
    /// Lead z-index of a selected feature.
    pub const SELECTED: i64 = i64::MAX - 3;
    /// Shadow drawn under a selected feature.
    pub const SELECTION_HALO: i64 = i64::MAX - 4;
    /// Largest z-order a feature may carry on its own.
    pub const ORDINARY_MAX: i64 = i64::MAX - 16;

    /// Clamps a feature's own z-order below the reserved band. Absent means 0.
    pub fn ordinary(z_order: Option<i64>) -> i64 {
        z_order.unwrap_or(0).min(Self::ORDINARY_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_ordering() {
        assert!(ZOrder::PROBED > ZOrder::PROBE_HALO_INNER);
        assert!(ZOrder::PROBE_HALO_INNER > ZOrder::PROBE_HALO_OUTER);
        assert!(ZOrder::PROBE_HALO_OUTER > ZOrder::SELECTED);
        assert!(ZOrder::SELECTED > ZOrder::SELECTION_HALO);
        assert!(ZOrder::SELECTION_HALO > ZOrder::ORDINARY_MAX);
    }

    #[test]
    fn test_ordinary_defaults_to_zero() {
        assert_eq!(ZOrder::ordinary(None), 0);
        assert_eq!(ZOrder::ordinary(Some(-7)), -7);
    }

    #[test]
    fn test_ordinary_is_clamped() {
        assert_eq!(ZOrder::ordinary(Some(i64::MAX)), ZOrder::ORDINARY_MAX);
        assert_eq!(ZOrder::ordinary(Some(ZOrder::SELECTED)), ZOrder::ORDINARY_MAX);
    }
}
