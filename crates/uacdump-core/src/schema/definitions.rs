//! Built-in Audio Device Class layouts.
//!
//! Field names, widths and table bindings follow the USB Audio Device Class
//! 1.0 and 2.0 specifications; section and table numbers are noted per
//! layout. Every layout starts after the 3-byte class-specific header.

use super::field::{ControlBits, FieldKind, FieldSpec, Repetition};
use crate::custom::{ClockSourceAttributes, FormatTag, Uac2Formats};
use crate::registry::{DescriptorKind, ProtocolGeneration};
use crate::tables::audio::*;

use FieldKind::{Bcd, Bitmap, Constant, Number, StringIndex, TerminalType};

const fn controls_1(table: &'static crate::tables::LabelTable) -> FieldKind {
    FieldKind::Controls {
        bits: ControlBits::One,
        table,
    }
}

const fn controls_2(table: &'static crate::tables::LabelTable) -> FieldKind {
    FieldKind::Controls {
        bits: ControlBits::Two,
        table,
    }
}

const BY_INPUT_PINS: Repetition = Repetition::Field("bNrInPins");
const BY_CONTROL_SIZE: Repetition = Repetition::Field("bControlSize");
const PIN_CHANNEL_MATRIX: Repetition = Repetition::Matrix {
    rows: "bNrInPins",
    columns: "bNrChannels",
};

// UAC1 4.3.2, Table 4-2.
const UAC1_AC_HEADER: &[FieldSpec] = &[
    FieldSpec::new("bcdADC", 2, Bcd),
    FieldSpec::new("wTotalLength", 2, Constant),
    FieldSpec::new("bInCollection", 1, Constant),
    FieldSpec::new("baInterfaceNr", 1, Number).repeated(Repetition::Remaining),
];

// UAC2 4.7.2, Table 4-5.
const UAC2_AC_HEADER: &[FieldSpec] = &[
    FieldSpec::new("bcdADC", 2, Bcd),
    FieldSpec::new("bCategory", 1, Constant),
    FieldSpec::new("wTotalLength", 2, Number),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_INTERFACE_HEADER_CONTROLS)),
];

// UAC2 4.7.2.10, Table 4-15.
const UAC2_EFFECT_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("wEffectType", 2, Constant),
    FieldSpec::new("bSourceID", 1, Constant),
    FieldSpec::new("bmaControls", 4, Bitmap).repeated(Repetition::Remaining),
    FieldSpec::new("iEffects", 1, StringIndex),
];

// UAC1 4.3.2.1, Table 4-3.
const UAC1_INPUT_TERMINAL: &[FieldSpec] = &[
    FieldSpec::new("bTerminalID", 1, Number),
    FieldSpec::new("wTerminalType", 2, TerminalType),
    FieldSpec::new("bAssocTerminal", 1, Constant),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "wChannelConfig",
        2,
        FieldKind::BitmapFromTable(&UAC1_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("iTerminal", 1, StringIndex),
];

// UAC2 4.7.2.4, Table 4-9.
const UAC2_INPUT_TERMINAL: &[FieldSpec] = &[
    FieldSpec::new("bTerminalID", 1, Number),
    FieldSpec::new("wTerminalType", 2, TerminalType),
    FieldSpec::new("bAssocTerminal", 1, Constant),
    FieldSpec::new("bCSourceID", 1, Constant),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "bmChannelConfig",
        4,
        FieldKind::BitmapFromTable(&UAC2_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bmControls", 2, controls_2(&UAC2_INPUT_TERMINAL_CONTROLS)),
    FieldSpec::new("iTerminal", 1, StringIndex),
];

// UAC1 4.3.2.2, Table 4-4.
const UAC1_OUTPUT_TERMINAL: &[FieldSpec] = &[
    FieldSpec::new("bTerminalID", 1, Number),
    FieldSpec::new("wTerminalType", 2, TerminalType),
    FieldSpec::new("bAssocTerminal", 1, Number),
    FieldSpec::new("bSourceID", 1, Number),
    FieldSpec::new("iTerminal", 1, StringIndex),
];

// UAC2 4.7.2.5, Table 4-10.
const UAC2_OUTPUT_TERMINAL: &[FieldSpec] = &[
    FieldSpec::new("bTerminalID", 1, Number),
    FieldSpec::new("wTerminalType", 2, TerminalType),
    FieldSpec::new("bAssocTerminal", 1, Number),
    FieldSpec::new("bSourceID", 1, Number),
    FieldSpec::new("bCSourceID", 1, Number),
    FieldSpec::new("bmControls", 2, controls_2(&UAC2_OUTPUT_TERMINAL_CONTROLS)),
    FieldSpec::new("iTerminal", 1, StringIndex),
];

// UAC1 4.3.2.3, Table 4-5.
const UAC1_MIXER_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "wChannelConfig",
        2,
        FieldKind::BitmapFromTable(&UAC1_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bmControls", 1, Bitmap).repeated(PIN_CHANNEL_MATRIX),
    FieldSpec::new("iMixer", 1, StringIndex),
];

// UAC2 4.7.2.6, Table 4-11.
const UAC2_MIXER_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "bmChannelConfig",
        4,
        FieldKind::BitmapFromTable(&UAC2_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bmMixerControls", 1, Bitmap).repeated(PIN_CHANNEL_MATRIX),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_MIXER_UNIT_CONTROLS)),
    FieldSpec::new("iMixer", 1, StringIndex),
];

// UAC1 4.3.2.4, Table 4-6.
const UAC1_SELECTOR_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("iSelector", 1, StringIndex),
];

// UAC2 4.7.2.7, Table 4-12.
const UAC2_SELECTOR_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_SELECTOR_UNIT_CONTROLS)),
    FieldSpec::new("iSelector", 1, StringIndex),
];

// UAC1 4.3.2.6, Table 4-8.
const UAC1_PROCESSING_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("wProcessType", 2, Constant),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "wChannelConfig",
        2,
        FieldKind::BitmapFromTable(&UAC1_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bControlSize", 1, Number),
    FieldSpec::new("bmControls", 1, Bitmap).repeated(BY_CONTROL_SIZE),
    FieldSpec::new("iProcessing", 1, StringIndex),
    FieldSpec::new("Process-specific", 1, Bitmap).repeated(Repetition::Remaining),
];

// UAC2 4.7.2.11, Table 4-20.
const UAC2_PROCESSING_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("wProcessType", 2, Constant),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "bmChannelConfig",
        4,
        FieldKind::BitmapFromTable(&UAC2_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bControlSize", 1, Number),
    FieldSpec::new("bmControls", 2, Bitmap).repeated(BY_CONTROL_SIZE),
    FieldSpec::new("iProcessing", 1, StringIndex),
    FieldSpec::new("Process-specific", 1, Bitmap).repeated(Repetition::Remaining),
];

// UAC1 4.3.2.5, Table 4-7.
const UAC1_FEATURE_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bSourceID", 1, Constant),
    FieldSpec::new("bControlSize", 1, Number),
    FieldSpec::sized_by(
        "bmaControls",
        "bControlSize",
        controls_1(&FEATURE_UNIT_CONTROLS),
    )
    .repeated(Repetition::Remaining),
    FieldSpec::new("iFeature", 1, StringIndex),
];

// UAC2 4.7.2.8, Table 4-13.
const UAC2_FEATURE_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("bSourceID", 1, Constant),
    FieldSpec::new("bmaControls", 4, controls_2(&FEATURE_UNIT_CONTROLS))
        .repeated(Repetition::Remaining),
    FieldSpec::new("iFeature", 1, StringIndex),
];

// UAC1 4.3.2.7, Table 4-15.
const UAC1_EXTENSION_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("wExtensionCode", 2, Constant),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "wChannelConfig",
        2,
        FieldKind::BitmapFromTable(&UAC1_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bControlSize", 1, Number),
    FieldSpec::new("bmControls", 1, Bitmap).repeated(BY_CONTROL_SIZE),
    FieldSpec::new("iExtension", 1, StringIndex),
];

// UAC2 4.7.2.12, Table 4-24.
const UAC2_EXTENSION_UNIT: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Number),
    FieldSpec::new("wExtensionCode", 2, Constant),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "bmChannelConfig",
        4,
        FieldKind::BitmapFromTable(&UAC2_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_EXTENSION_UNIT_CONTROLS)),
    FieldSpec::new("iExtension", 1, StringIndex),
];

// UAC2 4.7.2.1, Table 4-6.
const UAC2_CLOCK_SOURCE: &[FieldSpec] = &[
    FieldSpec::new("bClockID", 1, Constant),
    FieldSpec::new("bmAttributes", 1, FieldKind::Custom(&ClockSourceAttributes)),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_CLOCK_SOURCE_CONTROLS)),
    FieldSpec::new("bAssocTerminal", 1, Constant),
    FieldSpec::new("iClockSource", 1, StringIndex),
];

// UAC2 4.7.2.2, Table 4-7.
const UAC2_CLOCK_SELECTOR: &[FieldSpec] = &[
    FieldSpec::new("bClockID", 1, Number),
    FieldSpec::new("bNrInPins", 1, Number),
    FieldSpec::new("baCSourceID", 1, Number).repeated(BY_INPUT_PINS),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_CLOCK_SELECTOR_CONTROLS)),
    FieldSpec::new("iClockSelector", 1, StringIndex),
];

// UAC2 4.7.2.3, Table 4-8.
const UAC2_CLOCK_MULTIPLIER: &[FieldSpec] = &[
    FieldSpec::new("bClockID", 1, Constant),
    FieldSpec::new("bCSourceID", 1, Number),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_CLOCK_MULTIPLIER_CONTROLS)),
    FieldSpec::new("iClockMultiplier", 1, StringIndex),
];

// UAC2 4.7.2.9, Table 4-14.
const UAC2_SAMPLE_RATE_CONVERTER: &[FieldSpec] = &[
    FieldSpec::new("bUnitID", 1, Constant),
    FieldSpec::new("bSourceID", 1, Constant),
    FieldSpec::new("bCSourceInID", 1, Constant),
    FieldSpec::new("bCSourceOutID", 1, Constant),
    FieldSpec::new("iSRC", 1, StringIndex),
];

// UAC1 4.5.2, Table 4-19.
const UAC1_AS_INTERFACE: &[FieldSpec] = &[
    FieldSpec::new("bTerminalLink", 1, Constant),
    FieldSpec::new("bDelay", 1, FieldKind::NumberWithSuffix(" frames")),
    FieldSpec::new("wFormatTag", 2, FieldKind::Custom(&FormatTag)),
];

// UAC2 4.9.2, Table 4-27.
const UAC2_AS_INTERFACE: &[FieldSpec] = &[
    FieldSpec::new("bTerminalLink", 1, Number),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_AS_INTERFACE_CONTROLS)),
    FieldSpec::new("bFormatType", 1, Constant),
    FieldSpec::new("bmFormats", 4, FieldKind::Custom(&Uac2Formats)),
    FieldSpec::new("bNrChannels", 1, Number),
    FieldSpec::new(
        "bmChannelConfig",
        4,
        FieldKind::BitmapFromTable(&UAC2_CHANNEL_NAMES),
    ),
    FieldSpec::new("iChannelNames", 1, StringIndex),
];

// UAC1 4.6.1.2, Table 4-21.
const UAC1_ISOCHRONOUS_ENDPOINT: &[FieldSpec] = &[
    FieldSpec::new(
        "bmAttributes",
        1,
        FieldKind::BitmapFromTable(&UAC1_AS_ENDPOINT_ATTRIBUTES),
    ),
    FieldSpec::new(
        "bLockDelayUnits",
        1,
        FieldKind::NumberFromTable(&LOCK_DELAY_UNITS),
    ),
    FieldSpec::new("wLockDelay", 2, Number),
];

// UAC2 4.10.1.2, Table 4-34.
const UAC2_ISOCHRONOUS_ENDPOINT: &[FieldSpec] = &[
    FieldSpec::new(
        "bmAttributes",
        1,
        FieldKind::BitmapFromTable(&UAC2_AS_ENDPOINT_ATTRIBUTES),
    ),
    FieldSpec::new("bmControls", 1, controls_2(&UAC2_AS_ENDPOINT_CONTROLS)),
    FieldSpec::new(
        "bLockDelayUnits",
        1,
        FieldKind::NumberFromTable(&LOCK_DELAY_UNITS),
    ),
    FieldSpec::new("wLockDelay", 2, Number),
];

/// Every built-in layout as (kind, generation, schema name, fields).
///
/// Pairs that are absent here are unsupported.
pub(crate) const BUILTIN: &[(
    DescriptorKind,
    ProtocolGeneration,
    &str,
    &[FieldSpec],
)] = {
    use DescriptorKind::*;
    use ProtocolGeneration::{Uac1, Uac2};
    &[
        (Header, Uac1, "UAC1 AC Header", UAC1_AC_HEADER),
        (Header, Uac2, "UAC2 AC Header", UAC2_AC_HEADER),
        (InputTerminal, Uac1, "UAC1 Input Terminal", UAC1_INPUT_TERMINAL),
        (InputTerminal, Uac2, "UAC2 Input Terminal", UAC2_INPUT_TERMINAL),
        (OutputTerminal, Uac1, "UAC1 Output Terminal", UAC1_OUTPUT_TERMINAL),
        (OutputTerminal, Uac2, "UAC2 Output Terminal", UAC2_OUTPUT_TERMINAL),
        (MixerUnit, Uac1, "UAC1 Mixer Unit", UAC1_MIXER_UNIT),
        (MixerUnit, Uac2, "UAC2 Mixer Unit", UAC2_MIXER_UNIT),
        (SelectorUnit, Uac1, "UAC1 Selector Unit", UAC1_SELECTOR_UNIT),
        (SelectorUnit, Uac2, "UAC2 Selector Unit", UAC2_SELECTOR_UNIT),
        (FeatureUnit, Uac1, "UAC1 Feature Unit", UAC1_FEATURE_UNIT),
        (FeatureUnit, Uac2, "UAC2 Feature Unit", UAC2_FEATURE_UNIT),
        (ProcessingUnit, Uac1, "UAC1 Processing Unit", UAC1_PROCESSING_UNIT),
        (ProcessingUnit, Uac2, "UAC2 Processing Unit", UAC2_PROCESSING_UNIT),
        (ExtensionUnit, Uac1, "UAC1 Extension Unit", UAC1_EXTENSION_UNIT),
        (ExtensionUnit, Uac2, "UAC2 Extension Unit", UAC2_EXTENSION_UNIT),
        (EffectUnit, Uac2, "UAC2 Effect Unit", UAC2_EFFECT_UNIT),
        (ClockSource, Uac2, "UAC2 Clock Source", UAC2_CLOCK_SOURCE),
        (ClockSelector, Uac2, "UAC2 Clock Selector", UAC2_CLOCK_SELECTOR),
        (ClockMultiplier, Uac2, "UAC2 Clock Multiplier", UAC2_CLOCK_MULTIPLIER),
        (
            SampleRateConverter,
            Uac2,
            "UAC2 Sample Rate Converter",
            UAC2_SAMPLE_RATE_CONVERTER,
        ),
        (AsInterface, Uac1, "UAC1 AS Interface", UAC1_AS_INTERFACE),
        (AsInterface, Uac2, "UAC2 AS Interface", UAC2_AS_INTERFACE),
        (
            IsochronousEndpoint,
            Uac1,
            "UAC1 AS Isochronous Audio Data Endpoint",
            UAC1_ISOCHRONOUS_ENDPOINT,
        ),
        (
            IsochronousEndpoint,
            Uac2,
            "UAC2 AS Isochronous Audio Data Endpoint",
            UAC2_ISOCHRONOUS_ENDPOINT,
        ),
    ]
};
