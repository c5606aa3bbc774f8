//! Property store: current field values and their 16-bit wire form.
mod table;

pub use table::{Domain, Feature, Field, FieldDef, PropertyDef, PropertyId, PROPERTIES};

use crate::error::{Result, Si21xxError};

/// Field values for every property, indexed like `PROPERTIES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyStore {
    values: Vec<Vec<i32>>,
}

impl PropertyStore {
    /// Store holding the documented default of every field.
    pub fn new() -> Self {
        PropertyStore {
            values: PROPERTIES
                .iter()
                .map(|p| p.fields.iter().map(|f| f.default).collect())
                .collect(),
        }
    }

    pub fn reset_defaults(&mut self) {
        *self = PropertyStore::new();
    }

    pub fn get(&self, field: Field) -> i32 {
        self.values[field.property as usize][field.index]
    }

    /// Stores `value` if it is inside the field's domain. An invalid value
    /// leaves the previous one untouched.
    pub fn set(&mut self, field: Field, value: i32) -> Result<()> {
        check(field.property, field.def(), value)?;
        self.values[field.property as usize][field.index] = value;
        Ok(())
    }

    /// Sets an enumerated field by option name, e.g. `("VIDEO_SYS", "M")`.
    pub fn set_named(&mut self, property: PropertyId, field: &str, option: &str) -> Result<()> {
        let field = Field::lookup(property, field)
            .ok_or_else(|| Si21xxError::UnknownField(format!("{}.{}", property.name(), field)))?;
        let value = field.def().domain.option_named(option).ok_or_else(|| {
            Si21xxError::UnknownField(format!(
                "{}.{} = {}",
                property.name(),
                field.def().name,
                option
            ))
        })?;
        self.set(field, value)
    }

    /// Packs every field of `property` into its data word.
    pub fn pack(&self, property: PropertyId) -> Result<u16> {
        let def = property.def();
        let mut data: u32 = 0;
        for (f, &value) in def.fields.iter().zip(&self.values[property as usize]) {
            check(property, f, value)?;
            data |= (value as u32 & mask(f.width)) << f.lsb;
        }
        Ok(data as u16)
    }

    /// Splits a data word read from the chip back into fields.
    pub fn unpack(&mut self, property: PropertyId, data: u16) {
        let def = property.def();
        let values = &mut self.values[property as usize];
        for (f, value) in def.fields.iter().zip(values.iter_mut()) {
            let raw = (data as u32 >> f.lsb) & mask(f.width);
            *value = if f.signed && raw & (1 << (f.width - 1)) != 0 {
                raw as i32 - (1 << f.width)
            } else {
                raw as i32
            };
        }
    }
}

impl Default for PropertyStore {
    fn default() -> Self {
        PropertyStore::new()
    }
}

fn mask(width: u8) -> u32 {
    (1u32 << width) - 1
}

fn check(property: PropertyId, field: &FieldDef, value: i32) -> Result<()> {
    if field.domain.contains(value) {
        Ok(())
    } else {
        Err(Si21xxError::InvalidFieldValue {
            property: property.name(),
            field: field.name,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_samples(domain: &Domain) -> Vec<i32> {
        match *domain {
            Domain::Range { min, max } => vec![min, min + (max - min) / 2, max],
            Domain::Options(opts) => opts.iter().map(|&(_, v)| v).collect(),
        }
    }

    #[test]
    fn table_is_indexed_by_id() {
        for (i, p) in PROPERTIES.iter().enumerate() {
            assert_eq!(p.id as usize, i, "{} out of place", p.name);
            assert_eq!(PropertyId::from_code(p.code), Some(p.id));
            assert_eq!(PropertyId::from_name(p.name), Some(p.id));
        }
    }

    #[test]
    fn fields_fit_and_do_not_overlap() {
        for p in PROPERTIES.iter() {
            let mut used = 0u32;
            for f in p.fields {
                assert!(f.lsb as u32 + f.width as u32 <= 16, "{}.{}", p.name, f.name);
                let bits = mask(f.width) << f.lsb;
                assert_eq!(used & bits, 0, "{}.{} overlaps", p.name, f.name);
                used |= bits;
                for v in domain_samples(&f.domain) {
                    let (lo, hi) = if f.signed {
                        (-(1i32 << (f.width - 1)), (1i32 << (f.width - 1)) - 1)
                    } else {
                        (0, mask(f.width) as i32)
                    };
                    assert!(v >= lo && v <= hi, "{}.{} = {} does not fit", p.name, f.name, v);
                }
                assert!(f.domain.contains(f.default), "{}.{} default", p.name, f.name);
            }
        }
    }

    #[test]
    fn every_domain_value_survives_pack_unpack() {
        for p in PROPERTIES.iter() {
            for (index, f) in p.fields.iter().enumerate() {
                let field = Field::new(p.id, index);
                for v in domain_samples(&f.domain) {
                    let mut store = PropertyStore::new();
                    store.set(field, v).unwrap();
                    let data = store.pack(p.id).unwrap();

                    let mut other = PropertyStore::new();
                    // scramble first so unpack has to overwrite every field
                    other.unpack(p.id, !data);
                    other.unpack(p.id, data);
                    assert_eq!(other.get(field), v, "{}.{}", p.name, f.name);
                    assert_eq!(other.pack(p.id).unwrap(), data);
                }
            }
        }
    }

    #[test]
    fn video_mode_packs_into_bit_fields() {
        let mut store = PropertyStore::new();
        store.set_named(PropertyId::AtvVideoMode, "VIDEO_SYS", "L").unwrap();
        store.set_named(PropertyId::AtvVideoMode, "COLOR", "SECAM").unwrap();
        store.set(Field::ATV_VIDEO_TRANS, 1).unwrap();
        assert_eq!(store.pack(PropertyId::AtvVideoMode).unwrap(), 0x0116);
    }

    #[test]
    fn signed_fields_sign_extend() {
        let mut store = PropertyStore::new();
        store.unpack(PropertyId::AtvRsqRssiThreshold, 0x05ba);
        assert_eq!(store.get(Field::ATV_RSSI_LO), -70);
        assert_eq!(store.get(Field::ATV_RSSI_HI), 5);

        store.unpack(PropertyId::TunerBlockedVco, 0x8000);
        assert_eq!(store.get(Field::new(PropertyId::TunerBlockedVco, 0)), -32768);
    }

    #[test]
    fn defaults_pack_to_expected_words() {
        let store = PropertyStore::new();
        assert_eq!(store.pack(PropertyId::AtvAfcRange).unwrap(), 100);
        assert_eq!(store.pack(PropertyId::DtvLifFreq).unwrap(), 5000);
        // BW_8MHZ, DVBT
        assert_eq!(store.pack(PropertyId::DtvMode).unwrap(), 0x0028);
        assert_eq!(store.pack(PropertyId::AtvRsqRssiThreshold).unwrap(), 0x00ba);
    }

    #[test]
    fn invalid_enum_value_is_rejected_and_previous_value_kept() {
        let mut store = PropertyStore::new();
        let err = store.set(Field::ATV_VIDEO_SYS, 8).unwrap_err();
        assert!(matches!(
            err,
            Si21xxError::InvalidFieldValue {
                property: "ATV_VIDEO_MODE",
                field: "VIDEO_SYS",
                value: 8
            }
        ));
        assert_eq!(store.get(Field::ATV_VIDEO_SYS), 0);

        // 5 MHz is not a DTV bandwidth even though it fits the bit field
        assert!(store.set(Field::DTV_MODE_BW, 5).is_err());
        assert_eq!(store.get(Field::DTV_MODE_BW), 8);
    }

    #[test]
    fn out_of_range_value_is_rejected() {
        let mut store = PropertyStore::new();
        let lo = Field::lookup(PropertyId::AtvSoundAgcLimit, "min_gain").unwrap();
        assert!(store.set(lo, -85).is_err());
        assert!(store.set(lo, -84).is_ok());
        assert!(store.set(Field::new(PropertyId::DtvLifFreq, 0), 7001).is_err());
    }

    #[test]
    fn pack_rejects_invalid_value_read_back_from_chip() {
        let mut store = PropertyStore::new();
        // DTV_MODE.bw = 15
        store.unpack(PropertyId::DtvMode, 0x002f);
        assert!(matches!(
            store.pack(PropertyId::DtvMode),
            Err(Si21xxError::InvalidFieldValue { field: "BW", .. })
        ));
    }

    #[test]
    fn lookup_yields_only_existing_fields() {
        let f = Field::lookup(PropertyId::DtvMode, "invert_spectrum").unwrap();
        assert_eq!(f.property(), PropertyId::DtvMode);
        assert_eq!(f.index(), 2);
        assert_eq!(f, Field::DTV_MODE_INVERT_SPECTRUM);
        assert_eq!(Field::lookup(PropertyId::DtvMode, "SYMBOL_RATE"), None);
        assert_eq!(Field::lookup(PropertyId::AtvAfcRange, ""), None);
    }

    #[test]
    fn unknown_names_are_reported() {
        let mut store = PropertyStore::new();
        assert!(matches!(
            store.set_named(PropertyId::DtvMode, "COLOR", "PAL"),
            Err(Si21xxError::UnknownField(_))
        ));
        assert!(matches!(
            store.set_named(PropertyId::DtvMode, "BW", "BW_5MHZ"),
            Err(Si21xxError::UnknownField(_))
        ));
    }
}
