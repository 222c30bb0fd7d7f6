use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TrialscopeError;

/// Medical specialty a trial is classified into. `OtherUnclear` is the
/// fallback when no specialty scores above the classification threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Specialty {
    #[serde(rename = "Cardiology")]
    Cardiology,
    #[serde(rename = "Gastroenterology")]
    Gastroenterology,
    #[serde(rename = "Oncology")]
    Oncology,
    #[serde(rename = "Pulmonology")]
    Pulmonology,
    #[serde(rename = "Neurology")]
    Neurology,
    #[serde(rename = "Nephrology")]
    Nephrology,
    #[serde(rename = "Endocrinology")]
    Endocrinology,
    #[serde(rename = "Rheumatology")]
    Rheumatology,
    #[serde(rename = "Infectious Disease")]
    InfectiousDisease,
    #[serde(rename = "Hematology")]
    Hematology,
    #[serde(rename = "Psychiatry")]
    Psychiatry,
    #[serde(rename = "Dermatology")]
    Dermatology,
    #[serde(rename = "Ophthalmology")]
    Ophthalmology,
    #[serde(rename = "Orthopedics")]
    Orthopedics,
    #[serde(rename = "Urology")]
    Urology,
    #[serde(rename = "Obstetrics/Gynecology")]
    ObstetricsGynecology,
    #[serde(rename = "Pediatrics")]
    Pediatrics,
    #[serde(rename = "Geriatrics")]
    Geriatrics,
    #[serde(rename = "Emergency Medicine")]
    EmergencyMedicine,
    #[serde(rename = "Anesthesiology")]
    Anesthesiology,
    #[serde(rename = "Radiology")]
    Radiology,
    #[serde(rename = "Allergy/Immunology")]
    AllergyImmunology,
    #[serde(rename = "Pain Medicine")]
    PainMedicine,
    #[serde(rename = "Physical Medicine/Rehabilitation")]
    PhysicalMedicineRehabilitation,
    #[default]
    #[serde(rename = "Other/Unclear")]
    OtherUnclear,
}

impl Specialty {
    /// Every label that can be scored, in table order. Excludes `OtherUnclear`.
    pub const SCORED: [Specialty; 24] = [
        Self::Cardiology,
        Self::Gastroenterology,
        Self::Oncology,
        Self::Pulmonology,
        Self::Neurology,
        Self::Nephrology,
        Self::Endocrinology,
        Self::Rheumatology,
        Self::InfectiousDisease,
        Self::Hematology,
        Self::Psychiatry,
        Self::Dermatology,
        Self::Ophthalmology,
        Self::Orthopedics,
        Self::Urology,
        Self::ObstetricsGynecology,
        Self::Pediatrics,
        Self::Geriatrics,
        Self::EmergencyMedicine,
        Self::Anesthesiology,
        Self::Radiology,
        Self::AllergyImmunology,
        Self::PainMedicine,
        Self::PhysicalMedicineRehabilitation,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Cardiology => "Cardiology",
            Self::Gastroenterology => "Gastroenterology",
            Self::Oncology => "Oncology",
            Self::Pulmonology => "Pulmonology",
            Self::Neurology => "Neurology",
            Self::Nephrology => "Nephrology",
            Self::Endocrinology => "Endocrinology",
            Self::Rheumatology => "Rheumatology",
            Self::InfectiousDisease => "Infectious Disease",
            Self::Hematology => "Hematology",
            Self::Psychiatry => "Psychiatry",
            Self::Dermatology => "Dermatology",
            Self::Ophthalmology => "Ophthalmology",
            Self::Orthopedics => "Orthopedics",
            Self::Urology => "Urology",
            Self::ObstetricsGynecology => "Obstetrics/Gynecology",
            Self::Pediatrics => "Pediatrics",
            Self::Geriatrics => "Geriatrics",
            Self::EmergencyMedicine => "Emergency Medicine",
            Self::Anesthesiology => "Anesthesiology",
            Self::Radiology => "Radiology",
            Self::AllergyImmunology => "Allergy/Immunology",
            Self::PainMedicine => "Pain Medicine",
            Self::PhysicalMedicineRehabilitation => "Physical Medicine/Rehabilitation",
            Self::OtherUnclear => "Other/Unclear",
        }
    }

    /// Default specificity order used to break score ties. Narrow specialties
    /// come first; Emergency Medicine is last because its vocabulary
    /// (sepsis, shock, trauma) over-matches.
    pub fn default_preference_order() -> Vec<Specialty> {
        vec![
            Self::Oncology,
            Self::Cardiology,
            Self::Neurology,
            Self::Nephrology,
            Self::Gastroenterology,
            Self::Pulmonology,
            Self::Endocrinology,
            Self::Rheumatology,
            Self::Hematology,
            Self::InfectiousDisease,
            Self::Psychiatry,
            Self::Dermatology,
            Self::Ophthalmology,
            Self::Urology,
            Self::ObstetricsGynecology,
            Self::Orthopedics,
            Self::AllergyImmunology,
            Self::PainMedicine,
            Self::Anesthesiology,
            Self::Radiology,
            Self::PhysicalMedicineRehabilitation,
            Self::Pediatrics,
            Self::Geriatrics,
            Self::EmergencyMedicine,
        ]
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Specialty {
    type Err = TrialscopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::SCORED
            .into_iter()
            .chain(std::iter::once(Self::OtherUnclear))
            .find(|specialty| specialty.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TrialscopeError::UnknownSpecialty(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_round_trip_through_from_str() {
        for specialty in Specialty::SCORED {
            assert_eq!(specialty.label().parse::<Specialty>().unwrap(), specialty);
        }
        assert_eq!(
            "other/unclear".parse::<Specialty>().unwrap(),
            Specialty::OtherUnclear
        );
        assert!("Podiatry".parse::<Specialty>().is_err());
    }

    #[test]
    fn default_preference_order_covers_every_scored_specialty_once() {
        let order = Specialty::default_preference_order();
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(order.len(), Specialty::SCORED.len());
        assert_eq!(unique.len(), order.len());
        assert_eq!(order.first(), Some(&Specialty::Oncology));
        assert_eq!(order.last(), Some(&Specialty::EmergencyMedicine));
    }
}
