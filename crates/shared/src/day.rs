use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    Serialize,
    Deserialize,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Day {
    Senin,
    Selasa,
    Rabu,
    Kamis,
    Jumat,
    Sabtu,
    Minggu,
}

impl Day {
    pub fn label(&self) -> &'static str {
        match self {
            Day::Senin => "Senin",
            Day::Selasa => "Selasa",
            Day::Rabu => "Rabu",
            Day::Kamis => "Kamis",
            Day::Jumat => "Jumat",
            Day::Sabtu => "Sabtu",
            Day::Minggu => "Minggu",
        }
    }
}

/// Slots every day has out of the box.
#[derive(
    Serialize,
    Deserialize,
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BaseSlot {
    Sarapan,
    Siang,
    Malam,
}

impl BaseSlot {
    pub fn label(&self) -> &'static str {
        match self {
            BaseSlot::Sarapan => "Sarapan",
            BaseSlot::Siang => "Makan Siang",
            BaseSlot::Malam => "Makan Malam",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn days_parse_from_storage_names() {
        assert_eq!(Day::from_str("senin").unwrap(), Day::Senin);
        assert_eq!(Day::Minggu.to_string(), "minggu");
        assert_eq!(Day::VARIANTS.len(), 7);
        assert!(Day::from_str("monday").is_err());
    }

    #[test]
    fn base_slots_have_fixed_labels() {
        assert_eq!(BaseSlot::from_str("siang").unwrap().label(), "Makan Siang");
        assert_eq!(BaseSlot::Sarapan.as_ref(), "sarapan");
    }
}
