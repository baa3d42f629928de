//! Name resolution at the render boundary.
//!
//! Descriptors carry string-descriptor indexes and terminal-type codes; the
//! text behind them lives elsewhere (on the device, or in a naming table).
//! The renderer asks these resolvers and shows the bare value when they have
//! no answer.

use std::collections::BTreeMap;

/// Looks up string descriptors by index.
pub trait StringResolver {
    fn resolve(&self, index: u64) -> Option<String>;
}

/// Resolver that never has a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStrings;

impl StringResolver for NoStrings {
    fn resolve(&self, _index: u64) -> Option<String> {
        None
    }
}

/// In-memory string descriptor table.
///
/// Index 0 means "no string" in USB and resolves to `(none)`.
///
/// # Examples
/// ```
/// use uacdump_core::{StringResolver, StringTable};
///
/// let strings: StringTable = [(2, "Speaker".to_string())].into_iter().collect();
/// assert_eq!(strings.resolve(2).as_deref(), Some("Speaker"));
/// assert_eq!(strings.resolve(0).as_deref(), Some("(none)"));
/// assert_eq!(strings.resolve(3), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringTable {
    strings: BTreeMap<u64, String>,
}

pub const NO_STRING: &str = "(none)";

impl StringTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: u64, text: impl Into<String>) {
        self.strings.insert(index, text.into());
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl FromIterator<(u64, String)> for StringTable {
    fn from_iter<I: IntoIterator<Item = (u64, String)>>(iter: I) -> Self {
        Self {
            strings: iter.into_iter().collect(),
        }
    }
}

impl StringResolver for StringTable {
    fn resolve(&self, index: u64) -> Option<String> {
        if index == 0 {
            return Some(NO_STRING.to_string());
        }
        self.strings.get(&index).cloned()
    }
}

/// Looks up terminal-type names by 16-bit code.
pub trait TerminalTypeResolver {
    fn name(&self, code: u64) -> Option<&str>;
}

/// Built-in USB Audio terminal types (Terminal Types 1.0, sections 2.1-2.7).
///
/// # Examples
/// ```
/// use uacdump_core::{TerminalTypeResolver, TerminalTypes};
///
/// assert_eq!(TerminalTypes.name(0x0101), Some("USB Streaming"));
/// assert_eq!(TerminalTypes.name(0x0301), Some("Speaker"));
/// assert_eq!(TerminalTypes.name(0x0800), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTypes;

// Sorted by code.
const TERMINAL_TYPE_NAMES: &[(u16, &str)] = &[
    (0x0100, "USB Undefined"),
    (0x0101, "USB Streaming"),
    (0x01ff, "USB Vendor Specific"),
    (0x0200, "Input Undefined"),
    (0x0201, "Microphone"),
    (0x0202, "Desktop Microphone"),
    (0x0203, "Personal Microphone"),
    (0x0204, "Omni-directional Microphone"),
    (0x0205, "Microphone Array"),
    (0x0206, "Processing Microphone Array"),
    (0x0300, "Output Undefined"),
    (0x0301, "Speaker"),
    (0x0302, "Headphones"),
    (0x0303, "Head Mounted Display Audio"),
    (0x0304, "Desktop Speaker"),
    (0x0305, "Room Speaker"),
    (0x0306, "Communication Speaker"),
    (0x0307, "Low Frequency Effects Speaker"),
    (0x0400, "Bidirectional Undefined"),
    (0x0401, "Handset"),
    (0x0402, "Headset"),
    (0x0403, "Speakerphone, no echo reduction"),
    (0x0404, "Echo-suppressing speakerphone"),
    (0x0405, "Echo-canceling speakerphone"),
    (0x0500, "Telephony Undefined"),
    (0x0501, "Phone line"),
    (0x0502, "Telephone"),
    (0x0503, "Down Line Phone"),
    (0x0600, "External Undefined"),
    (0x0601, "Analog Connector"),
    (0x0602, "Digital Audio Interface"),
    (0x0603, "Line Connector"),
    (0x0604, "Legacy Audio Connector"),
    (0x0605, "SPDIF interface"),
    (0x0606, "1394 DA stream"),
    (0x0607, "1394 DV stream soundtrack"),
    (0x0700, "Embedded Undefined"),
    (0x0701, "Level Calibration Noise Source"),
    (0x0702, "Equalization Noise"),
    (0x0703, "CD Player"),
    (0x0704, "DAT"),
    (0x0705, "DCC"),
    (0x0706, "MiniDisk"),
    (0x0707, "Analog Tape"),
    (0x0708, "Phonograph"),
    (0x0709, "VCR Audio"),
    (0x070a, "Video Disc Audio"),
    (0x070b, "DVD Audio"),
    (0x070c, "TV Tuner Audio"),
    (0x070d, "Satellite Receiver Audio"),
    (0x070e, "Cable Tuner Audio"),
    (0x070f, "DSS Audio"),
    (0x0710, "Radio Receiver"),
    (0x0711, "Radio Transmitter"),
    (0x0712, "Multitrack Recorder"),
    (0x0713, "Synthesizer"),
];

impl TerminalTypeResolver for TerminalTypes {
    fn name(&self, code: u64) -> Option<&str> {
        let code = u16::try_from(code).ok()?;
        TERMINAL_TYPE_NAMES
            .binary_search_by_key(&code, |(known, _)| *known)
            .ok()
            .map(|index| TERMINAL_TYPE_NAMES[index].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_table_is_sorted() {
        assert!(
            TERMINAL_TYPE_NAMES
                .windows(2)
                .all(|pair| pair[0].0 < pair[1].0)
        );
    }

    #[test]
    fn terminal_lookup_edges() {
        assert_eq!(TerminalTypes.name(0x0100), Some("USB Undefined"));
        assert_eq!(TerminalTypes.name(0x0713), Some("Synthesizer"));
        assert_eq!(TerminalTypes.name(0x0714), None);
        assert_eq!(TerminalTypes.name(0x1_0101), None);
    }

    #[test]
    fn string_table_insert_and_miss() {
        let mut strings = StringTable::new();
        assert!(strings.is_empty());
        strings.insert(4, "Clock");
        assert_eq!(strings.len(), 1);
        assert_eq!(strings.resolve(4).as_deref(), Some("Clock"));
        assert_eq!(strings.resolve(5), None);
        assert_eq!(NoStrings.resolve(0), None);
    }
}
