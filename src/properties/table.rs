//! Property register database.
//!
//! Each property is a 16-bit data word on the chip. Fields occupy `width`
//! bits starting at `lsb`; signed fields are two's complement within their
//! width.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Atv,
    Common,
    Dtv,
    Tuner,
}

impl Feature {
    /// Download order used by `download_all_properties`.
    pub const ALL: [Feature; 4] = [Feature::Atv, Feature::Common, Feature::Dtv, Feature::Tuner];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// Inclusive numeric range.
    Range { min: i32, max: i32 },
    /// Enumerated `(name, value)` options.
    Options(&'static [(&'static str, i32)]),
}

impl Domain {
    pub fn contains(&self, value: i32) -> bool {
        match *self {
            Domain::Range { min, max } => value >= min && value <= max,
            Domain::Options(opts) => opts.iter().any(|&(_, v)| v == value),
        }
    }

    pub fn option_named(&self, name: &str) -> Option<i32> {
        match *self {
            Domain::Range { .. } => None,
            Domain::Options(opts) => opts
                .iter()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|&(_, v)| v),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDef {
    pub name: &'static str,
    pub lsb: u8,
    pub width: u8,
    pub signed: bool,
    pub domain: Domain,
    pub default: i32,
}

#[derive(Debug)]
pub struct PropertyDef {
    pub id: PropertyId,
    pub code: u16,
    pub name: &'static str,
    pub feature: Feature,
    pub fields: &'static [FieldDef],
}

const fn range(name: &'static str, lsb: u8, width: u8, min: i32, max: i32, default: i32) -> FieldDef {
    FieldDef {
        name,
        lsb,
        width,
        signed: min < 0,
        domain: Domain::Range { min, max },
        default,
    }
}

const fn options(
    name: &'static str,
    lsb: u8,
    width: u8,
    opts: &'static [(&'static str, i32)],
    default: i32,
) -> FieldDef {
    FieldDef {
        name,
        lsb,
        width,
        signed: false,
        domain: Domain::Options(opts),
        default,
    }
}

const fn flag(name: &'static str, lsb: u8, opts: &'static [(&'static str, i32)], default: i32) -> FieldDef {
    options(name, lsb, 1, opts, default)
}

const DISABLE_ENABLE: &[(&str, i32)] = &[("DISABLE", 0), ("ENABLE", 1)];
const OFF_ON: &[(&str, i32)] = &[("OFF", 0), ("ON", 1)];
const NORMAL_INVERTED: &[(&str, i32)] = &[("NORMAL", 0), ("INVERTED", 1)];
const LIF_ZIF: &[(&str, i32)] = &[("LIF", 0), ("ZIF", 1)];
const LO_SIDE: &[(&str, i32)] = &[("LOW_SIDE", 0), ("HIGH_SIDE", 1)];
const RF_TOP: &[(&str, i32)] = &[
    ("AUTO", 0),
    ("0DB", 6),
    ("M1DB", 7),
    ("M2DB", 8),
    ("M3DB", 9),
    ("M4DB", 10),
    ("M5DB", 11),
    ("M6DB", 12),
    ("M7DB", 13),
    ("M8DB", 14),
    ("M9DB", 15),
    ("M10DB", 16),
    ("M11DB", 17),
    ("M12DB", 18),
];
const ATV_AGC_SPEEDS: &[(&str, i32)] = &[
    ("AUTO", 0),
    ("89", 89),
    ("105", 105),
    ("121", 121),
    ("137", 137),
    ("158", 158),
    ("172", 172),
    ("178", 178),
    ("185", 185),
    ("196", 196),
    ("206", 206),
    ("216", 216),
    ("219", 219),
    ("222", 222),
    ("248", 248),
    ("250", 250),
    ("251", 251),
    ("CUSTOM", 1),
];
const DTV_AGC_SPEEDS: &[(&str, i32)] = &[
    ("AUTO", 0),
    ("39", 39),
    ("54", 54),
    ("63", 63),
    ("89", 89),
    ("105", 105),
    ("121", 121),
    ("137", 137),
    ("158", 158),
    ("172", 172),
    ("185", 185),
    ("196", 196),
    ("206", 206),
    ("216", 216),
    ("219", 219),
    ("222", 222),
];
const AGC_DECIM: &[(&str, i32)] = &[("OFF", 0), ("2", 1), ("4", 2), ("8", 3)];
const AUDIO_SYS: &[(&str, i32)] = &[
    ("DEFAULT", 0),
    ("MONO", 1),
    ("MONO_NICAM", 2),
    ("A2", 3),
    ("A2_DK2", 4),
    ("A2_DK3", 5),
    ("BTSC", 6),
    ("EIAJ", 7),
    ("SCAN", 8),
    ("A2_DK4", 9),
    ("WIDE_SCAN", 10),
    ("MONO_NICAM_6DB", 11),
    ("MONO_NICAM_10DB", 12),
];
const DEMOD_MODE: &[(&str, i32)] = &[("SIF", 0), ("AM", 1), ("FM1", 2), ("FM2", 3)];
const CHAN_BW: &[(&str, i32)] = &[
    ("DEFAULT", 0),
    ("4X_OVERMOD", 1),
    ("8X_OVERMOD", 2),
    ("12X_OVERMOD", 3),
    ("7P5_KHZ_OFFSET", 4),
    ("15_KHZ_OFFSET", 5),
    ("30_KHZ_OFFSET", 6),
    ("75_KHZ_OFFSET", 7),
    ("150_KHZ_OFFSET", 8),
];
const VIDEO_SYS: &[(&str, i32)] = &[
    ("B", 0),
    ("GH", 1),
    ("M", 2),
    ("N", 3),
    ("I", 4),
    ("DK", 5),
    ("L", 6),
    ("LP", 7),
];
const COLOR: &[(&str, i32)] = &[("PAL_NTSC", 0), ("SECAM", 1)];
const TRANS: &[(&str, i32)] = &[("TERRESTRIAL", 0), ("CABLE", 1)];
const FREEZE_LEVEL: &[(&str, i32)] = &[("LOW", 0), ("HIGH", 1)];
const FREEZE_PIN: &[(&str, i32)] = &[("NONE", 0), ("GPIO1", 1), ("GPIO2", 2), ("GPIO3", 3)];
const DTV_OUT_TYPE: &[(&str, i32)] = &[
    ("LIF_IF1", 0),
    ("LIF_IF2", 1),
    ("LIF_SE_IF1A", 4),
    ("LIF_SE_IF2A", 5),
];
const DTV_AGC_SOURCE: &[(&str, i32)] = &[
    ("INTERNAL", 0),
    ("DLIF_AGC_3DB", 1),
    ("ALIF_AGC_3DB", 2),
    ("DLIF_AGC_FULL", 3),
    ("ALIF_AGC_FULL", 4),
];
const FILTER: &[(&str, i32)] = &[("DEFAULT", 0), ("CUSTOM1", 1), ("CUSTOM2", 2)];
const DTV_BW: &[(&str, i32)] = &[("BW_6MHZ", 6), ("BW_7MHZ", 7), ("BW_8MHZ", 8)];
const MODULATION: &[(&str, i32)] = &[
    ("ATSC", 0),
    ("QAM_US", 1),
    ("DVBT", 2),
    ("DVBC", 3),
    ("ISDBT", 4),
    ("ISDBC", 5),
    ("DTMB", 6),
    ("CW", 15),
];

/// Every property known to the driver. Discriminants index `PROPERTIES`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyId {
    AtvAfcRange,
    AtvAfOut,
    AtvAgcSpeed,
    AtvAudioMode,
    AtvCvbsOut,
    AtvCvbsOutFine,
    AtvIen,
    AtvIntSense,
    AtvRfTop,
    AtvRsqRssiThreshold,
    AtvRsqSnrThreshold,
    AtvSifOut,
    AtvSoundAgcLimit,
    AtvSoundAgcSpeed,
    AtvVideoEqualizer,
    AtvVideoMode,
    AtvVsnrCap,
    CrystalTrim,
    MasterIen,
    DtvAgcFreezeInput,
    DtvAgcSpeed,
    DtvConfigIfPort,
    DtvExtAgc,
    DtvFilterSelect,
    DtvIen,
    DtvInitialAgcSpeed,
    DtvInitialAgcSpeedPeriod,
    DtvInternalZif,
    DtvIntSense,
    DtvLifFreq,
    DtvLifOut,
    DtvMode,
    DtvRfTop,
    DtvRsqRssiThreshold,
    TunerBlockedVco,
    TunerIen,
    TunerIntSense,
    TunerLoInjection,
}

pub static PROPERTIES: [PropertyDef; 38] = [
    PropertyDef {
        id: PropertyId::AtvAfcRange,
        code: 0x0610,
        name: "ATV_AFC_RANGE",
        feature: Feature::Atv,
        fields: &[range("RANGE_KHZ", 0, 16, 0, 65535, 100)],
    },
    PropertyDef {
        id: PropertyId::AtvAfOut,
        code: 0x060b,
        name: "ATV_AF_OUT",
        feature: Feature::Atv,
        fields: &[range("VOLUME", 0, 6, 0, 63, 0)],
    },
    PropertyDef {
        id: PropertyId::AtvAgcSpeed,
        code: 0x0611,
        name: "ATV_AGC_SPEED",
        feature: Feature::Atv,
        fields: &[options("IF_AGC_SPEED", 0, 8, ATV_AGC_SPEEDS, 0)],
    },
    PropertyDef {
        id: PropertyId::AtvAudioMode,
        code: 0x0602,
        name: "ATV_AUDIO_MODE",
        feature: Feature::Atv,
        fields: &[
            options("AUDIO_SYS", 0, 4, AUDIO_SYS, 0),
            options("DEMOD_MODE", 4, 2, DEMOD_MODE, 0),
            options("CHAN_BW", 8, 4, CHAN_BW, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvCvbsOut,
        code: 0x0609,
        name: "ATV_CVBS_OUT",
        feature: Feature::Atv,
        fields: &[
            range("OFFSET", 0, 8, 0, 255, 25),
            range("AMP", 8, 8, 0, 255, 200),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvCvbsOutFine,
        code: 0x0614,
        name: "ATV_CVBS_OUT_FINE",
        feature: Feature::Atv,
        fields: &[
            range("OFFSET", 0, 8, -128, 127, 0),
            range("AMP", 8, 8, 25, 100, 100),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvIen,
        code: 0x0601,
        name: "ATV_IEN",
        feature: Feature::Atv,
        fields: &[
            flag("CHLIEN", 0, DISABLE_ENABLE, 1),
            flag("PCLIEN", 1, DISABLE_ENABLE, 0),
            flag("DLIEN", 2, DISABLE_ENABLE, 0),
            flag("SNRLIEN", 3, DISABLE_ENABLE, 0),
            flag("SNRHIEN", 4, DISABLE_ENABLE, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvIntSense,
        code: 0x0613,
        name: "ATV_INT_SENSE",
        feature: Feature::Atv,
        fields: &[
            flag("CHLNEGEN", 0, DISABLE_ENABLE, 0),
            flag("PCLNEGEN", 1, DISABLE_ENABLE, 0),
            flag("DLNEGEN", 2, DISABLE_ENABLE, 0),
            flag("SNRLNEGEN", 3, DISABLE_ENABLE, 0),
            flag("SNRHNEGEN", 4, DISABLE_ENABLE, 0),
            flag("CHLPOSEN", 8, DISABLE_ENABLE, 1),
            flag("PCLPOSEN", 9, DISABLE_ENABLE, 1),
            flag("DLPOSEN", 10, DISABLE_ENABLE, 1),
            flag("SNRLPOSEN", 11, DISABLE_ENABLE, 1),
            flag("SNRHPOSEN", 12, DISABLE_ENABLE, 1),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvRfTop,
        code: 0x0612,
        name: "ATV_RF_TOP",
        feature: Feature::Atv,
        fields: &[options("ATV_RF_TOP", 0, 8, RF_TOP, 0)],
    },
    PropertyDef {
        id: PropertyId::AtvRsqRssiThreshold,
        code: 0x0605,
        name: "ATV_RSQ_RSSI_THRESHOLD",
        feature: Feature::Atv,
        fields: &[
            range("LO", 0, 8, -128, 127, -70),
            range("HI", 8, 8, -128, 127, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvRsqSnrThreshold,
        code: 0x0606,
        name: "ATV_RSQ_SNR_THRESHOLD",
        feature: Feature::Atv,
        fields: &[
            range("LO", 0, 8, 0, 255, 25),
            range("HI", 8, 8, 0, 255, 45),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvSifOut,
        code: 0x060a,
        name: "ATV_SIF_OUT",
        feature: Feature::Atv,
        fields: &[
            range("OFFSET", 0, 8, 0, 255, 135),
            range("AMP", 8, 8, 0, 255, 60),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvSoundAgcLimit,
        code: 0x0618,
        name: "ATV_SOUND_AGC_LIMIT",
        feature: Feature::Atv,
        fields: &[
            range("MAX_GAIN", 0, 8, -84, 84, 84),
            range("MIN_GAIN", 8, 8, -84, 84, -84),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvSoundAgcSpeed,
        code: 0x0619,
        name: "ATV_SOUND_AGC_SPEED",
        feature: Feature::Atv,
        fields: &[
            range("SYSTEM_L", 0, 4, 0, 15, 5),
            range("OTHER_SYSTEMS", 8, 4, 0, 15, 4),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvVideoEqualizer,
        code: 0x0608,
        name: "ATV_VIDEO_EQUALIZER",
        feature: Feature::Atv,
        fields: &[range("SLOPE", 0, 8, -8, 7, 0)],
    },
    PropertyDef {
        id: PropertyId::AtvVideoMode,
        code: 0x0604,
        name: "ATV_VIDEO_MODE",
        feature: Feature::Atv,
        fields: &[
            options("VIDEO_SYS", 0, 3, VIDEO_SYS, 0),
            options("COLOR", 4, 1, COLOR, 0),
            options("TRANS", 8, 1, TRANS, 0),
            options("INVERT_SIGNAL", 9, 1, NORMAL_INVERTED, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::AtvVsnrCap,
        code: 0x0616,
        name: "ATV_VSNR_CAP",
        feature: Feature::Atv,
        fields: &[range("ATV_VSNR_CAP", 0, 8, 0, 127, 0)],
    },
    PropertyDef {
        id: PropertyId::CrystalTrim,
        code: 0x0402,
        name: "CRYSTAL_TRIM",
        feature: Feature::Common,
        fields: &[range("XO_CAP", 0, 4, 0, 15, 8)],
    },
    PropertyDef {
        id: PropertyId::MasterIen,
        code: 0x0401,
        name: "MASTER_IEN",
        feature: Feature::Common,
        fields: &[
            flag("TUNIEN", 0, OFF_ON, 0),
            flag("ATVIEN", 1, OFF_ON, 0),
            flag("DTVIEN", 2, OFF_ON, 0),
            flag("ERRIEN", 6, OFF_ON, 0),
            flag("CTSIEN", 7, OFF_ON, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvAgcFreezeInput,
        code: 0x0711,
        name: "DTV_AGC_FREEZE_INPUT",
        feature: Feature::Dtv,
        fields: &[
            flag("LEVEL", 0, FREEZE_LEVEL, 0),
            options("PIN", 1, 3, FREEZE_PIN, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvAgcSpeed,
        code: 0x0708,
        name: "DTV_AGC_SPEED",
        feature: Feature::Dtv,
        fields: &[
            options("IF_AGC_SPEED", 0, 8, DTV_AGC_SPEEDS, 0),
            options("AGC_DECIM", 8, 2, AGC_DECIM, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvConfigIfPort,
        code: 0x0702,
        name: "DTV_CONFIG_IF_PORT",
        feature: Feature::Dtv,
        fields: &[
            options("DTV_OUT_TYPE", 0, 4, DTV_OUT_TYPE, 1),
            options("DTV_AGC_SOURCE", 8, 3, DTV_AGC_SOURCE, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvExtAgc,
        code: 0x0705,
        name: "DTV_EXT_AGC",
        feature: Feature::Dtv,
        fields: &[
            range("MIN_10MV", 0, 8, 0, 215, 50),
            range("MAX_10MV", 8, 8, 0, 215, 200),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvFilterSelect,
        code: 0x070c,
        name: "DTV_FILTER_SELECT",
        feature: Feature::Dtv,
        fields: &[options("FILTER", 0, 2, FILTER, 0)],
    },
    PropertyDef {
        id: PropertyId::DtvIen,
        code: 0x0701,
        name: "DTV_IEN",
        feature: Feature::Dtv,
        fields: &[flag("CHLIEN", 0, DISABLE_ENABLE, 1)],
    },
    PropertyDef {
        id: PropertyId::DtvInitialAgcSpeed,
        code: 0x070d,
        name: "DTV_INITIAL_AGC_SPEED",
        feature: Feature::Dtv,
        fields: &[
            options("IF_AGC_SPEED", 0, 8, DTV_AGC_SPEEDS, 0),
            options("AGC_DECIM", 8, 2, AGC_DECIM, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvInitialAgcSpeedPeriod,
        code: 0x070e,
        name: "DTV_INITIAL_AGC_SPEED_PERIOD",
        feature: Feature::Dtv,
        fields: &[range("PERIOD", 0, 16, 0, 65535, 0)],
    },
    PropertyDef {
        id: PropertyId::DtvInternalZif,
        code: 0x0710,
        name: "DTV_INTERNAL_ZIF",
        feature: Feature::Dtv,
        fields: &[
            flag("ATSC", 0, LIF_ZIF, 0),
            flag("QAM_US", 1, LIF_ZIF, 0),
            flag("DVBT", 2, LIF_ZIF, 0),
            flag("DVBC", 3, LIF_ZIF, 0),
            flag("ISDBT", 4, LIF_ZIF, 0),
            flag("ISDBC", 5, LIF_ZIF, 0),
            flag("DTMB", 6, LIF_ZIF, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvIntSense,
        code: 0x070a,
        name: "DTV_INT_SENSE",
        feature: Feature::Dtv,
        fields: &[
            flag("CHLNEGEN", 0, DISABLE_ENABLE, 0),
            flag("CHLPOSEN", 8, DISABLE_ENABLE, 1),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvLifFreq,
        code: 0x0706,
        name: "DTV_LIF_FREQ",
        feature: Feature::Dtv,
        fields: &[range("OFFSET", 0, 16, 0, 7000, 5000)],
    },
    PropertyDef {
        id: PropertyId::DtvLifOut,
        code: 0x0707,
        name: "DTV_LIF_OUT",
        feature: Feature::Dtv,
        fields: &[
            range("OFFSET", 0, 8, 0, 255, 148),
            range("AMP", 8, 8, 0, 255, 27),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvMode,
        code: 0x0703,
        name: "DTV_MODE",
        feature: Feature::Dtv,
        fields: &[
            options("BW", 0, 4, DTV_BW, 8),
            options("MODULATION", 4, 4, MODULATION, 2),
            options("INVERT_SPECTRUM", 8, 1, NORMAL_INVERTED, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::DtvRfTop,
        code: 0x0713,
        name: "DTV_RF_TOP",
        feature: Feature::Dtv,
        fields: &[options("DTV_RF_TOP", 0, 8, RF_TOP, 0)],
    },
    PropertyDef {
        id: PropertyId::DtvRsqRssiThreshold,
        code: 0x0704,
        name: "DTV_RSQ_RSSI_THRESHOLD",
        feature: Feature::Dtv,
        fields: &[
            range("LO", 0, 8, -128, 127, -80),
            range("HI", 8, 8, -128, 127, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::TunerBlockedVco,
        code: 0x0504,
        name: "TUNER_BLOCKED_VCO",
        feature: Feature::Tuner,
        fields: &[range("VCO_CODE", 0, 16, -32768, 32767, -32768)],
    },
    PropertyDef {
        id: PropertyId::TunerIen,
        code: 0x0501,
        name: "TUNER_IEN",
        feature: Feature::Tuner,
        fields: &[
            flag("TCIEN", 0, DISABLE_ENABLE, 1),
            flag("RSSILIEN", 1, DISABLE_ENABLE, 0),
            flag("RSSIHIEN", 2, DISABLE_ENABLE, 0),
        ],
    },
    PropertyDef {
        id: PropertyId::TunerIntSense,
        code: 0x0505,
        name: "TUNER_INT_SENSE",
        feature: Feature::Tuner,
        fields: &[
            flag("TCNEGEN", 0, DISABLE_ENABLE, 0),
            flag("RSSILNEGEN", 1, DISABLE_ENABLE, 0),
            flag("RSSIHNEGEN", 2, DISABLE_ENABLE, 0),
            flag("TCPOSEN", 8, DISABLE_ENABLE, 1),
            flag("RSSILPOSEN", 9, DISABLE_ENABLE, 1),
            flag("RSSIHPOSEN", 10, DISABLE_ENABLE, 1),
        ],
    },
    PropertyDef {
        id: PropertyId::TunerLoInjection,
        code: 0x0506,
        name: "TUNER_LO_INJECTION",
        feature: Feature::Tuner,
        fields: &[
            flag("BAND_1", 0, LO_SIDE, 1),
            flag("BAND_2", 1, LO_SIDE, 0),
            flag("BAND_3", 2, LO_SIDE, 0),
        ],
    },
];

impl PropertyId {
    pub fn def(self) -> &'static PropertyDef {
        &PROPERTIES[self as usize]
    }

    pub fn code(self) -> u16 {
        self.def().code
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn feature(self) -> Feature {
        self.def().feature
    }

    pub fn all() -> impl Iterator<Item = PropertyId> {
        PROPERTIES.iter().map(|p| p.id)
    }

    pub fn from_name(name: &str) -> Option<PropertyId> {
        PROPERTIES
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(|p| p.id)
    }

    pub fn from_code(code: u16) -> Option<PropertyId> {
        PROPERTIES.iter().find(|p| p.code == code).map(|p| p.id)
    }
}

/// One field of one property. Obtained from the constants below or from
/// [`Field::lookup`], so the index always names an existing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field {
    pub(crate) property: PropertyId,
    pub(crate) index: usize,
}

impl Field {
    pub(crate) const fn new(property: PropertyId, index: usize) -> Field {
        Field { property, index }
    }

    pub fn property(&self) -> PropertyId {
        self.property
    }

    /// Position of the field within its property's field list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn def(&self) -> &'static FieldDef {
        &self.property.def().fields[self.index]
    }

    pub fn lookup(property: PropertyId, name: &str) -> Option<Field> {
        property
            .def()
            .fields
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
            .map(|index| Field::new(property, index))
    }

    pub const ATV_AFC_RANGE_KHZ: Field = Field::new(PropertyId::AtvAfcRange, 0);
    pub const ATV_AUDIO_MODE_AUDIO_SYS: Field = Field::new(PropertyId::AtvAudioMode, 0);
    pub const ATV_AUDIO_MODE_DEMOD_MODE: Field = Field::new(PropertyId::AtvAudioMode, 1);
    pub const ATV_AUDIO_MODE_CHAN_BW: Field = Field::new(PropertyId::AtvAudioMode, 2);
    pub const ATV_IEN_CHLIEN: Field = Field::new(PropertyId::AtvIen, 0);
    pub const ATV_IEN_PCLIEN: Field = Field::new(PropertyId::AtvIen, 1);
    pub const ATV_IEN_DLIEN: Field = Field::new(PropertyId::AtvIen, 2);
    pub const ATV_IEN_SNRLIEN: Field = Field::new(PropertyId::AtvIen, 3);
    pub const ATV_IEN_SNRHIEN: Field = Field::new(PropertyId::AtvIen, 4);
    pub const ATV_RSSI_LO: Field = Field::new(PropertyId::AtvRsqRssiThreshold, 0);
    pub const ATV_RSSI_HI: Field = Field::new(PropertyId::AtvRsqRssiThreshold, 1);
    pub const ATV_SNR_LO: Field = Field::new(PropertyId::AtvRsqSnrThreshold, 0);
    pub const ATV_SNR_HI: Field = Field::new(PropertyId::AtvRsqSnrThreshold, 1);
    pub const ATV_VIDEO_SYS: Field = Field::new(PropertyId::AtvVideoMode, 0);
    pub const ATV_VIDEO_COLOR: Field = Field::new(PropertyId::AtvVideoMode, 1);
    pub const ATV_VIDEO_TRANS: Field = Field::new(PropertyId::AtvVideoMode, 2);
    pub const ATV_VIDEO_INVERT_SIGNAL: Field = Field::new(PropertyId::AtvVideoMode, 3);
    pub const DTV_MODE_BW: Field = Field::new(PropertyId::DtvMode, 0);
    pub const DTV_MODE_MODULATION: Field = Field::new(PropertyId::DtvMode, 1);
    pub const DTV_MODE_INVERT_SPECTRUM: Field = Field::new(PropertyId::DtvMode, 2);
    pub const TUNER_IEN_TCIEN: Field = Field::new(PropertyId::TunerIen, 0);
    pub const TUNER_IEN_RSSILIEN: Field = Field::new(PropertyId::TunerIen, 1);
    pub const TUNER_IEN_RSSIHIEN: Field = Field::new(PropertyId::TunerIen, 2);
}
