//! Audio Device Class label tables (UAC1 and UAC2).
//!
//! Entry order matters: the index of an entry is its bit position or its
//! enumerated value on the wire.

use super::LabelTable;

pub const UAC1_CHANNEL_NAMES: LabelTable = LabelTable::new(
    "uac1-channel-names",
    &[
        Some("Left Front (L)"),
        Some("Right Front (R)"),
        Some("Center Front (C)"),
        Some("Low Frequency Enhancement (LFE)"),
        Some("Left Surround (LS)"),
        Some("Right Surround (RS)"),
        Some("Left of Center (LC)"),
        Some("Right of Center (RC)"),
        Some("Surround (S)"),
        Some("Side Left (SL)"),
        Some("Side Right (SR)"),
        Some("Top (T)"),
    ],
);

pub const UAC2_CHANNEL_NAMES: LabelTable = LabelTable::new(
    "uac2-channel-names",
    &[
        Some("Front Left (FL)"),
        Some("Front Right (FR)"),
        Some("Front Center (FC)"),
        Some("Low Frequency Effects (LFE)"),
        Some("Back Left (BL)"),
        Some("Back Right (BR)"),
        Some("Front Left of Center (FLC)"),
        Some("Front Right of Center (FRC)"),
        Some("Back Center (BC)"),
        Some("Side Left (SL)"),
        Some("Side Right (SR)"),
        Some("Top Center (TC)"),
        Some("Top Front Left (TFL)"),
        Some("Top Front Center (TFC)"),
        Some("Top Front Right (TFR)"),
        Some("Top Back Left (TBL)"),
        Some("Top Back Center (TBC)"),
        Some("Top Back Right (TBR)"),
        Some("Top Front Left of Center (TFLC)"),
        Some("Top Front Right of Center (TFRC)"),
        Some("Left Low Frequency Effects (LLFE)"),
        Some("Right Low Frequency Effects (RLFE)"),
        Some("Top Side Left (TSL)"),
        Some("Top Side Right (TSR)"),
        Some("Bottom Center (BC)"),
        Some("Back Left of Center (BLC)"),
    ],
);

pub const UAC2_INTERFACE_HEADER_CONTROLS: LabelTable =
    LabelTable::new("uac2-interface-header-controls", &[Some("Latency")]);

pub const UAC2_INPUT_TERMINAL_CONTROLS: LabelTable = LabelTable::new(
    "uac2-input-terminal-controls",
    &[
        Some("Copy Protect"),
        Some("Connector"),
        Some("Overload"),
        Some("Cluster"),
        Some("Underflow"),
        Some("Overflow"),
    ],
);

pub const UAC2_OUTPUT_TERMINAL_CONTROLS: LabelTable = LabelTable::new(
    "uac2-output-terminal-controls",
    &[
        Some("Copy Protect"),
        Some("Connector"),
        Some("Overload"),
        Some("Underflow"),
        Some("Overflow"),
    ],
);

pub const UAC2_MIXER_UNIT_CONTROLS: LabelTable = LabelTable::new(
    "uac2-mixer-unit-controls",
    &[Some("Cluster"), Some("Underflow"), Some("Overflow")],
);

pub const UAC2_SELECTOR_UNIT_CONTROLS: LabelTable =
    LabelTable::new("uac2-selector-unit-controls", &[Some("Selector")]);

/// Feature Unit controls, shared by UAC1 (one bit each) and UAC2 (two bits each).
pub const FEATURE_UNIT_CONTROLS: LabelTable = LabelTable::new(
    "feature-unit-controls",
    &[
        Some("Mute"),
        Some("Volume"),
        Some("Bass"),
        Some("Mid"),
        Some("Treble"),
        Some("Graphic Equalizer"),
        Some("Automatic Gain"),
        Some("Delay"),
        Some("Bass Boost"),
        Some("Loudness"),
        Some("Input gain"),
        Some("Input gain pad"),
        Some("Phase inverter"),
    ],
);

pub const UAC2_EXTENSION_UNIT_CONTROLS: LabelTable = LabelTable::new(
    "uac2-extension-unit-controls",
    &[
        Some("Enable"),
        Some("Cluster"),
        Some("Underflow"),
        Some("Overflow"),
    ],
);

pub const UAC2_CLOCK_SOURCE_CONTROLS: LabelTable = LabelTable::new(
    "uac2-clock-source-controls",
    &[Some("Clock Frequency"), Some("Clock Validity")],
);

/// Clock type selected by bits 0..=1 of the UAC2 clock source `bmAttributes`.
pub const UAC2_CLOCK_SOURCE_ATTRIBUTES: LabelTable = LabelTable::new(
    "uac2-clock-source-attributes",
    &[
        Some("External"),
        Some("Internal fixed"),
        Some("Internal variable"),
        Some("Internal programmable"),
    ],
);

pub const UAC3_CLOCK_SOURCE_ATTRIBUTES: LabelTable = LabelTable::new(
    "uac3-clock-source-attributes",
    &[
        Some("External"),
        Some("Internal"),
        Some("(asynchronous)"),
        Some("(synchronized to SOF)"),
    ],
);

pub const UAC2_CLOCK_SELECTOR_CONTROLS: LabelTable =
    LabelTable::new("uac2-clock-selector-controls", &[Some("Clock Selector")]);

pub const UAC2_CLOCK_MULTIPLIER_CONTROLS: LabelTable = LabelTable::new(
    "uac2-clock-multiplier-controls",
    &[Some("Clock Numerator"), Some("Clock Denominator")],
);

pub const UAC2_AS_INTERFACE_CONTROLS: LabelTable = LabelTable::new(
    "uac2-as-interface-controls",
    &[
        Some("Active Alternate Setting"),
        Some("Valid Alternate Setting"),
    ],
);

/// Type I format codes (`wFormatTag` 0x0000..=0x0005, `bmFormats` bit n => entry n+1).
pub const FORMAT_TYPE_I: LabelTable = LabelTable::new(
    "format-type-i",
    &[
        Some("TYPE_I_UNDEFINED"),
        Some("PCM"),
        Some("PCM8"),
        Some("IEEE_FLOAT"),
        Some("ALAW"),
        Some("MULAW"),
    ],
);

/// Type II format codes (`wFormatTag` 0x1000..=0x1002).
pub const FORMAT_TYPE_II: LabelTable = LabelTable::new(
    "format-type-ii",
    &[Some("TYPE_II_UNDEFINED"), Some("MPEG"), Some("AC-3")],
);

/// Type III format codes (`wFormatTag` 0x2000..=0x2006).
pub const FORMAT_TYPE_III: LabelTable = LabelTable::new(
    "format-type-iii",
    &[
        Some("TYPE_III_UNDEFINED"),
        Some("IEC1937_AC-3"),
        Some("IEC1937_MPEG-1_Layer1"),
        Some("IEC1937_MPEG-Layer2/3/NOEXT"),
        Some("IEC1937_MPEG-2_EXT"),
        Some("IEC1937_MPEG-2_Layer1_LS"),
        Some("IEC1937_MPEG-2_Layer2/3_LS"),
    ],
);

pub const UAC1_AS_ENDPOINT_ATTRIBUTES: LabelTable = LabelTable::new(
    "uac1-as-endpoint-attributes",
    &[
        Some("Sampling Frequency"),
        Some("Pitch"),
        Some("Audio Data Format Control"),
        None,
        None,
        None,
        None,
        Some("MaxPacketsOnly"),
    ],
);

pub const UAC2_AS_ENDPOINT_ATTRIBUTES: LabelTable = LabelTable::new(
    "uac2-as-endpoint-attributes",
    &[None, None, None, None, None, None, None, Some("MaxPacketsOnly")],
);

pub const UAC2_AS_ENDPOINT_CONTROLS: LabelTable = LabelTable::new(
    "uac2-as-endpoint-controls",
    &[Some("Pitch"), Some("Data Overrun"), Some("Data Underrun")],
);

pub const LOCK_DELAY_UNITS: LabelTable = LabelTable::new(
    "lock-delay-units",
    &[
        Some("Undefined"),
        Some("Milliseconds"),
        Some("Decoded PCM samples"),
    ],
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_tables_have_expected_sizes() {
        assert_eq!(UAC1_CHANNEL_NAMES.len(), 12);
        assert_eq!(UAC2_CHANNEL_NAMES.len(), 26);
    }

    #[test]
    fn endpoint_attributes_are_sparse() {
        assert_eq!(UAC1_AS_ENDPOINT_ATTRIBUTES.label(3), None);
        assert_eq!(UAC1_AS_ENDPOINT_ATTRIBUTES.label(7), Some("MaxPacketsOnly"));
        assert_eq!(UAC2_AS_ENDPOINT_ATTRIBUTES.label(0), None);
        assert_eq!(UAC2_AS_ENDPOINT_ATTRIBUTES.label(7), Some("MaxPacketsOnly"));
    }
}
