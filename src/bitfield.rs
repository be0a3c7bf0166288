//! Fixed-capacity bit set over the padded grid.

use crate::constants::FIELD_BYTES;
use crate::position::Point;

/// One bit per padded-grid coordinate, stored inline.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitfield {
    bytes: [u8; FIELD_BYTES],
}

impl Default for Bitfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Bitfield {
    /// An all-zero field.
    pub const fn new() -> Self {
        Bitfield {
            bytes: [0; FIELD_BYTES],
        }
    }

    #[inline]
    pub fn get(&self, pt: Point) -> bool {
        self.bytes[pt as usize >> 3] & mask(pt) != 0
    }

    #[inline]
    pub fn set(&mut self, pt: Point) {
        self.bytes[pt as usize >> 3] |= mask(pt);
    }

    #[inline]
    pub fn clear(&mut self, pt: Point) {
        self.bytes[pt as usize >> 3] &= !mask(pt);
    }

    /// Zero every bit.
    pub fn clear_all(&mut self) {
        self.bytes = [0; FIELD_BYTES];
    }

    /// Number of set bits.
    pub fn count(&self) -> u32 {
        self.bytes.iter().map(|b| b.count_ones()).sum()
    }

    /// True if no bit is set in both fields.
    pub fn is_disjoint(&self, other: &Bitfield) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .all(|(a, b)| a & b == 0)
    }

    /// True if every bit set here is also set in `other`.
    pub fn is_subset(&self, other: &Bitfield) -> bool {
        self.bytes
            .iter()
            .zip(other.bytes.iter())
            .all(|(a, b)| a & !b == 0)
    }
}

impl std::fmt::Debug for Bitfield {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitfield")
            .field("count", &self.count())
            .finish()
    }
}

#[inline]
fn mask(pt: Point) -> u8 {
    1 << (pt & 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DATA_LEN;

    #[test]
    fn test_set_get_clear() {
        let mut field = Bitfield::new();
        assert!(!field.get(23));
        field.set(23);
        assert!(field.get(23));
        assert!(!field.get(22));
        assert!(!field.get(24));
        field.clear(23);
        assert!(!field.get(23));
    }

    #[test]
    fn test_last_coordinate_fits() {
        let mut field = Bitfield::new();
        let last = (DATA_LEN - 1) as Point;
        field.set(last);
        assert!(field.get(last));
        assert_eq!(field.count(), 1);
    }

    #[test]
    fn test_set_relations() {
        let mut a = Bitfield::new();
        let mut b = Bitfield::new();
        a.set(5);
        b.set(5);
        b.set(9);
        assert!(a.is_subset(&b));
        assert!(!b.is_subset(&a));
        assert!(!a.is_disjoint(&b));

        a.clear_all();
        a.set(10);
        assert!(a.is_disjoint(&b));
    }
}
