//! Bit and label tables.
//!
//! A [`LabelTable`] maps a small integer (a bit position or an enumerated
//! value) to a human-readable label. Tables are sparse: a missing entry means
//! "reserved" and renders as absent, never as an error. All tables are
//! `const` data shared by every decode call.

pub mod audio;

/// Label returned for enumerated values that have no table entry.
pub const UNDEFINED: &str = "undefined";

/// Sparse integer-to-label lookup table.
///
/// # Examples
/// ```
/// use uacdump_core::tables::LabelTable;
///
/// const UNITS: LabelTable = LabelTable::new("units", &[Some("Undefined"), None, Some("Samples")]);
/// assert_eq!(UNITS.label(0), Some("Undefined"));
/// assert_eq!(UNITS.label(1), None);
/// assert_eq!(UNITS.label(9), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTable {
    name: &'static str,
    entries: &'static [Option<&'static str>],
}

impl LabelTable {
    pub const fn new(name: &'static str, entries: &'static [Option<&'static str>]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of slots, including unlabeled gaps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label for `index`, or `None` when the slot is empty or out of range.
    pub fn label(&self, index: u64) -> Option<&'static str> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.entries.get(index))
            .copied()
            .flatten()
    }

    /// Label for `index`, falling back to [`UNDEFINED`].
    pub fn label_or_undefined(&self, index: u64) -> &'static str {
        self.label(index).unwrap_or(UNDEFINED)
    }

    /// Labels of every set bit among the low `bit_count` bits of `value`.
    ///
    /// Set bits without a label are skipped.
    ///
    /// # Examples
    /// ```
    /// use uacdump_core::tables::audio::UAC1_CHANNEL_NAMES;
    ///
    /// let labels = UAC1_CHANNEL_NAMES.labels_for_bits(0b11, 16);
    /// assert_eq!(labels, vec!["Left Front (L)", "Right Front (R)"]);
    /// ```
    pub fn labels_for_bits(&self, value: u64, bit_count: u32) -> Vec<&'static str> {
        (0..bit_count.min(u64::BITS))
            .filter(|bit| (value >> bit) & 1 == 1)
            .filter_map(|bit| self.label(u64::from(bit)))
            .collect()
    }

    /// Populated entries in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'static str)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, label)| label.map(|label| (index, label)))
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelTable, UNDEFINED};

    const SPARSE: LabelTable = LabelTable::new("sparse", &[Some("zero"), None, None, Some("three")]);

    #[test]
    fn label_out_of_range_is_none() {
        assert_eq!(SPARSE.label(4), None);
        assert_eq!(SPARSE.label(u64::MAX), None);
        assert_eq!(SPARSE.label_or_undefined(100), UNDEFINED);
    }

    #[test]
    fn gaps_are_absent() {
        assert_eq!(SPARSE.label(1), None);
        assert_eq!(SPARSE.label_or_undefined(2), UNDEFINED);
        assert_eq!(SPARSE.len(), 4);
    }

    #[test]
    fn labels_for_bits_skips_unlabeled_and_high_bits() {
        assert_eq!(SPARSE.labels_for_bits(0b1111, 8), vec!["zero", "three"]);
        assert_eq!(SPARSE.labels_for_bits(0b1000, 3), Vec::<&str>::new());
        assert_eq!(SPARSE.labels_for_bits(u64::MAX, 200), vec!["zero", "three"]);
    }

    #[test]
    fn iter_yields_populated_entries() {
        let entries: Vec<_> = SPARSE.iter().collect();
        assert_eq!(entries, vec![(0, "zero"), (3, "three")]);
    }
}
