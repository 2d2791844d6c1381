//! Regroupement d'un catalogue par tranche d'âge KEPI (affichage).

use crate::model::VaccineSchedule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Tranches d'âge, dans l'ordre d'affichage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeCategory {
    Birth,
    SixWeeks,
    TenWeeks,
    FourteenWeeks,
    SixMonths,
    NineMonths,
    TwelveMonths,
    EighteenMonths,
    TwentyFourMonths,
    FiveToSixYears,
    TenToTwelveYears,
    FifteenToEighteenYears,
}

/// Bornes hautes (incluses) en jours ; au-delà de la dernière : 15-18 ans.
const BOUNDARIES: [(u32, AgeCategory); 10] = [
    (42, AgeCategory::SixWeeks),
    (70, AgeCategory::TenWeeks),
    (98, AgeCategory::FourteenWeeks),
    (180, AgeCategory::SixMonths),
    (270, AgeCategory::NineMonths),
    (365, AgeCategory::TwelveMonths),
    (540, AgeCategory::EighteenMonths),
    (730, AgeCategory::TwentyFourMonths),
    (2190, AgeCategory::FiveToSixYears),
    (4380, AgeCategory::TenToTwelveYears),
];

impl AgeCategory {
    pub const ALL: [AgeCategory; 12] = [
        AgeCategory::Birth,
        AgeCategory::SixWeeks,
        AgeCategory::TenWeeks,
        AgeCategory::FourteenWeeks,
        AgeCategory::SixMonths,
        AgeCategory::NineMonths,
        AgeCategory::TwelveMonths,
        AgeCategory::EighteenMonths,
        AgeCategory::TwentyFourMonths,
        AgeCategory::FiveToSixYears,
        AgeCategory::TenToTwelveYears,
        AgeCategory::FifteenToEighteenYears,
    ];

    /// Tranche d'un âge recommandé en jours (0 = naissance).
    pub fn for_age_days(days: u32) -> Self {
        if days == 0 {
            return AgeCategory::Birth;
        }
        BOUNDARIES
            .iter()
            .find(|(upper, _)| days <= *upper)
            .map(|(_, cat)| *cat)
            .unwrap_or(AgeCategory::FifteenToEighteenYears)
    }

    pub fn for_vaccine(vaccine: &VaccineSchedule) -> Self {
        if vaccine.is_birth_dose {
            AgeCategory::Birth
        } else {
            Self::for_age_days(vaccine.recommended_age_days)
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeCategory::Birth => "Birth",
            AgeCategory::SixWeeks => "6 Weeks",
            AgeCategory::TenWeeks => "10 Weeks",
            AgeCategory::FourteenWeeks => "14 Weeks",
            AgeCategory::SixMonths => "6 Months",
            AgeCategory::NineMonths => "9 Months",
            AgeCategory::TwelveMonths => "12 Months",
            AgeCategory::EighteenMonths => "18 Months",
            AgeCategory::TwentyFourMonths => "24 Months",
            AgeCategory::FiveToSixYears => "5-6 Years",
            AgeCategory::TenToTwelveYears => "10-12 Years",
            AgeCategory::FifteenToEighteenYears => "15-18 Years",
        }
    }
}

impl fmt::Display for AgeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Répartit les doses par tranche ; chaque dose apparaît dans exactement
/// une tranche, dans l'ordre d'entrée. Les tranches vides sont absentes.
pub fn group_by_age_category<'a, I>(vaccines: I) -> BTreeMap<AgeCategory, Vec<&'a VaccineSchedule>>
where
    I: IntoIterator<Item = &'a VaccineSchedule>,
{
    let mut groups: BTreeMap<AgeCategory, Vec<&'a VaccineSchedule>> = BTreeMap::new();
    for v in vaccines {
        groups.entry(AgeCategory::for_vaccine(v)).or_default().push(v);
    }
    groups
}

/// Aplatit les tranches dans l'ordre des tranches.
pub fn flatten_groups<'a>(
    groups: &BTreeMap<AgeCategory, Vec<&'a VaccineSchedule>>,
) -> Vec<&'a VaccineSchedule> {
    groups.values().flat_map(|vs| vs.iter().copied()).collect()
}
