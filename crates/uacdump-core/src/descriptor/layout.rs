use crate::registry::DescriptorKind;

use DescriptorKind::*;

pub const LENGTH_OFFSET: usize = 0;
pub const TYPE_OFFSET: usize = 1;
pub const SUBTYPE_OFFSET: usize = 2;
pub const HEADER_LEN: usize = 3;

pub const CS_INTERFACE: u8 = 0x24;
pub const CS_ENDPOINT: u8 = 0x25;

// UAC1 Table A-5.
pub const UAC1_AC_SUBTYPES: &[(u8, DescriptorKind)] = &[
    (0x01, Header),
    (0x02, InputTerminal),
    (0x03, OutputTerminal),
    (0x04, MixerUnit),
    (0x05, SelectorUnit),
    (0x06, FeatureUnit),
    (0x07, ProcessingUnit),
    (0x08, ExtensionUnit),
];

// UAC2 Table A-9.
pub const UAC2_AC_SUBTYPES: &[(u8, DescriptorKind)] = &[
    (0x01, Header),
    (0x02, InputTerminal),
    (0x03, OutputTerminal),
    (0x04, MixerUnit),
    (0x05, SelectorUnit),
    (0x06, FeatureUnit),
    (0x07, EffectUnit),
    (0x08, ProcessingUnit),
    (0x09, ExtensionUnit),
    (0x0a, ClockSource),
    (0x0b, ClockSelector),
    (0x0c, ClockMultiplier),
    (0x0d, SampleRateConverter),
];

// UAC3 Table A-9. Subtype 4 (extended terminal) has no kind here.
pub const UAC3_AC_SUBTYPES: &[(u8, DescriptorKind)] = &[
    (0x01, Header),
    (0x02, InputTerminal),
    (0x03, OutputTerminal),
    (0x05, MixerUnit),
    (0x06, SelectorUnit),
    (0x07, FeatureUnit),
    (0x08, EffectUnit),
    (0x09, ProcessingUnit),
    (0x0a, ExtensionUnit),
    (0x0b, ClockSource),
    (0x0c, ClockSelector),
    (0x0d, ClockMultiplier),
    (0x0e, SampleRateConverter),
];

pub const AS_SUBTYPES: &[(u8, DescriptorKind)] = &[(0x01, AsInterface)];

pub const ENDPOINT_SUBTYPES: &[(u8, DescriptorKind)] = &[(0x01, IsochronousEndpoint)];
