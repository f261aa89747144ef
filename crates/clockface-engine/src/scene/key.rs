/// Z-ordering key for draw items.
///
/// Higher values appear on top of lower values.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }

    #[inline]
    pub const fn above(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Stable sort key for draw items.
///
/// Ordering is lexicographic over the fields, in declaration order:
/// 1) `z`: ascending (back-to-front)
/// 2) `order`: ascending (insertion order for equal z)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    pub z: ZIndex,
    pub order: u32,
}

impl SortKey {
    #[inline]
    pub const fn new(z: ZIndex, order: u32) -> Self {
        Self { z, order }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn z_dominates_insertion_order() {
        let back = SortKey::new(ZIndex::new(0), 10);
        let front = SortKey::new(ZIndex::new(1), 0);
        assert!(back < front);
    }

    #[test]
    fn insertion_order_breaks_ties() {
        let first = SortKey::new(ZIndex::new(3), 0);
        let second = SortKey::new(ZIndex::new(3), 1);
        assert!(first < second);
    }

    #[test]
    fn above_saturates() {
        assert_eq!(ZIndex::new(i32::MAX).above(), ZIndex::new(i32::MAX));
        assert_eq!(ZIndex::new(4).above(), ZIndex::new(5));
    }
}
