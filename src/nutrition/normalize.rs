//! Basis conversion and energy calculation.
//!
//! Everything here is pure. A non-positive or non-finite portion size
//! degrades derived values to zero instead of failing.

use std::collections::BTreeMap;

use serde::Serialize;

use super::nutrient::{Micronutrient, Nutrient};
use super::profile::{Basis, NutrientProfile, PortionInfo};

pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARBOHYDRATE: f64 = 4.0;
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_ALCOHOL: f64 = 7.0;
pub const KCAL_PER_G_ORGANIC_ACIDS: f64 = 3.0;
pub const KJ_PER_KCAL: f64 = 4.184;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn per100_from_portion(value: f64, portion_size: f64) -> f64 {
    if !portion_size.is_finite() || portion_size <= 0.0 {
        return 0.0;
    }
    round_to(value / portion_size * 100.0, 2)
}

pub fn portion_from_per100(value: f64, portion_size: f64) -> f64 {
    if !portion_size.is_finite() || portion_size <= 0.0 {
        return 0.0;
    }
    round_to(value * portion_size / 100.0, 2)
}

pub fn mg_to_g(mg: f64) -> f64 {
    mg / 1000.0
}

/// Grams of each energy-yielding component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnergyInputs {
    pub fat_g: f64,
    pub carbohydrate_g: f64,
    pub protein_g: f64,
    pub organic_acids_g: f64,
    pub alcohol_g: f64,
}

pub fn energy_kcal(inputs: EnergyInputs) -> i64 {
    let kcal = KCAL_PER_G_FAT * inputs.fat_g
        + KCAL_PER_G_CARBOHYDRATE * inputs.carbohydrate_g
        + KCAL_PER_G_PROTEIN * inputs.protein_g
        + KCAL_PER_G_ALCOHOL * inputs.alcohol_g
        + KCAL_PER_G_ORGANIC_ACIDS * inputs.organic_acids_g;
    kcal.round() as i64
}

pub fn kilojoules(kcal: i64) -> i64 {
    (kcal as f64 * KJ_PER_KCAL).round() as i64
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
    /// Also fill the kJ equivalent of each energy value.
    pub kilojoules: bool,
}

/// Every declared amount in one basis, plus the energy derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisValues {
    pub amounts: BTreeMap<Nutrient, f64>,
    pub micronutrients: Vec<(Micronutrient, f64)>,
    pub energy_kcal: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_kj: Option<i64>,
}

impl BasisValues {
    fn new(
        amounts: BTreeMap<Nutrient, f64>,
        micronutrients: Vec<(Micronutrient, f64)>,
        options: NormalizeOptions,
    ) -> Self {
        let energy_kcal = energy_kcal(energy_inputs(&amounts));
        Self {
            amounts,
            micronutrients,
            energy_kcal,
            energy_kj: options.kilojoules.then(|| kilojoules(energy_kcal)),
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.amounts.get(&nutrient).copied().unwrap_or(0.0)
    }

    pub fn is_declared(&self, nutrient: Nutrient) -> bool {
        self.amounts.contains_key(&nutrient)
    }

    pub fn micronutrient(&self, micronutrient: Micronutrient) -> f64 {
        self.micronutrients
            .iter()
            .find(|(m, _)| *m == micronutrient)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    }
}

/// The fat term never drops below the sum of the declared fractions, so trans
/// fat entered in mg reaches the formula in grams without being counted twice.
fn energy_inputs(amounts: &BTreeMap<Nutrient, f64>) -> EnergyInputs {
    let get = |n: Nutrient| amounts.get(&n).copied().unwrap_or(0.0);
    let fractions = get(Nutrient::SaturatedFat)
        + mg_to_g(get(Nutrient::TransFat))
        + get(Nutrient::MonounsaturatedFat)
        + get(Nutrient::PolyunsaturatedFat);

    EnergyInputs {
        fat_g: get(Nutrient::TotalFat).max(fractions),
        carbohydrate_g: get(Nutrient::Carbohydrate),
        protein_g: get(Nutrient::Protein),
        organic_acids_g: get(Nutrient::OrganicAcids),
        alcohol_g: get(Nutrient::Alcohol),
    }
}

/// Normalizer output: both bases fully populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutrientTable {
    pub basis: Basis,
    pub portion: PortionInfo,
    pub per_100: BasisValues,
    pub per_portion: BasisValues,
}

pub fn normalize(
    profile: &NutrientProfile,
    portion: &PortionInfo,
    options: NormalizeOptions,
) -> NutrientTable {
    let portion = portion.cleaned();
    let size = portion.size;
    if size <= 0.0 {
        tracing::debug!(size, "non-positive portion size, derived values are zero");
    }

    let convert: fn(f64, f64) -> f64 = match profile.basis() {
        Basis::PerPortion => per100_from_portion,
        Basis::Per100 => portion_from_per100,
    };

    let entered: BTreeMap<Nutrient, f64> = profile.declared().collect();
    let derived: BTreeMap<Nutrient, f64> = entered
        .iter()
        .map(|(n, v)| (*n, convert(*v, size)))
        .collect();

    let entered_micro = profile.micronutrients().to_vec();
    let derived_micro: Vec<_> = entered_micro
        .iter()
        .map(|(m, v)| (*m, convert(*v, size)))
        .collect();

    let entered = BasisValues::new(entered, entered_micro, options);
    let derived = BasisValues::new(derived, derived_micro, options);

    let (per_portion, per_100) = match profile.basis() {
        Basis::PerPortion => (entered, derived),
        Basis::Per100 => (derived, entered),
    };

    NutrientTable {
        basis: profile.basis(),
        portion,
        per_100,
        per_portion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::profile::PortionUnit;
    use proptest::prelude::*;

    fn sample_profile() -> NutrientProfile {
        NutrientProfile::new(Basis::PerPortion)
            .with(Nutrient::TotalFat, 5.0)
            .with(Nutrient::SaturatedFat, 2.0)
            .with(Nutrient::TransFat, 0.0)
            .with(Nutrient::Carbohydrate, 20.0)
            .with(Nutrient::TotalSugars, 10.0)
            .with(Nutrient::AddedSugars, 8.0)
            .with(Nutrient::Fiber, 2.0)
            .with(Nutrient::Protein, 3.0)
            .with(Nutrient::Sodium, 150.0)
    }

    #[test]
    fn energy_uses_atwater_factors() {
        let kcal = energy_kcal(EnergyInputs {
            fat_g: 10.0,
            carbohydrate_g: 20.0,
            protein_g: 5.0,
            ..Default::default()
        });
        assert_eq!(kcal, 190);

        let with_extras = energy_kcal(EnergyInputs {
            alcohol_g: 1.0,
            organic_acids_g: 1.0,
            ..Default::default()
        });
        assert_eq!(with_extras, 10);
    }

    #[test]
    fn zero_portion_degrades_to_zero() {
        assert_eq!(per100_from_portion(50.0, 0.0), 0.0);
        assert_eq!(portion_from_per100(50.0, 0.0), 0.0);
        assert_eq!(per100_from_portion(50.0, -3.0), 0.0);

        let portion = PortionInfo::new(0.0, PortionUnit::Gram, 1.0);
        let table = normalize(&sample_profile(), &portion, NormalizeOptions::default());
        assert_eq!(table.per_100.get(Nutrient::TotalFat), 0.0);
        assert_eq!(table.per_100.energy_kcal, 0);
        assert_eq!(table.per_portion.energy_kcal, 137);
    }

    #[test]
    fn end_to_end_per_portion_scenario() {
        let portion = PortionInfo::new(50.0, PortionUnit::Gram, 2.0);
        let table = normalize(&sample_profile(), &portion, NormalizeOptions::default());

        let per_100 = &table.per_100;
        assert_eq!(per_100.get(Nutrient::TotalFat), 10.0);
        assert_eq!(per_100.get(Nutrient::SaturatedFat), 4.0);
        assert_eq!(per_100.get(Nutrient::Carbohydrate), 40.0);
        assert_eq!(per_100.get(Nutrient::TotalSugars), 20.0);
        assert_eq!(per_100.get(Nutrient::AddedSugars), 16.0);
        assert_eq!(per_100.get(Nutrient::Fiber), 4.0);
        assert_eq!(per_100.get(Nutrient::Protein), 6.0);
        assert_eq!(per_100.get(Nutrient::Sodium), 300.0);

        assert_eq!(per_100.energy_kcal, 274);
        assert_eq!(table.per_portion.energy_kcal, 137);
        assert_eq!(per_100.energy_kj, None);
    }

    #[test]
    fn per_100_basis_derives_portion_values() {
        let profile = NutrientProfile::new(Basis::Per100)
            .with(Nutrient::TotalFat, 10.0)
            .with(Nutrient::Carbohydrate, 40.0)
            .with(Nutrient::Protein, 6.0);
        let portion = PortionInfo::new(30.0, PortionUnit::Gram, 4.0);
        let table = normalize(&profile, &portion, NormalizeOptions { kilojoules: true });

        assert_eq!(table.per_portion.get(Nutrient::TotalFat), 3.0);
        assert_eq!(table.per_portion.get(Nutrient::Carbohydrate), 12.0);
        assert_eq!(table.per_100.energy_kcal, 274);
        assert_eq!(table.per_100.energy_kj, Some(1146));
        // 9*3 + 4*12 + 4*1.8 = 82.2
        assert_eq!(table.per_portion.energy_kcal, 82);
    }

    #[test]
    fn trans_fat_milligrams_feed_energy_in_grams() {
        let profile = NutrientProfile::new(Basis::PerPortion).with(Nutrient::TransFat, 820.0);
        let portion = PortionInfo::new(100.0, PortionUnit::Gram, 1.0);
        let table = normalize(&profile, &portion, NormalizeOptions::default());

        assert_eq!(table.per_portion.get(Nutrient::TransFat), 820.0);
        // 9 * 0.82 = 7.38
        assert_eq!(table.per_portion.energy_kcal, 7);
    }

    #[test]
    fn declared_fractions_are_not_double_counted() {
        let profile = NutrientProfile::new(Basis::PerPortion)
            .with(Nutrient::TotalFat, 10.0)
            .with(Nutrient::SaturatedFat, 4.0)
            .with(Nutrient::TransFat, 500.0);
        let portion = PortionInfo::new(100.0, PortionUnit::Gram, 1.0);
        let table = normalize(&profile, &portion, NormalizeOptions::default());
        assert_eq!(table.per_portion.energy_kcal, 90);
    }

    #[test]
    fn micronutrients_keep_selection_order_in_both_bases() {
        let profile = NutrientProfile::new(Basis::PerPortion)
            .with_micronutrient(Micronutrient::Zinc, 1.5)
            .with_micronutrient(Micronutrient::VitaminA, 45.0);
        let portion = PortionInfo::new(50.0, PortionUnit::Gram, 1.0);
        let table = normalize(&profile, &portion, NormalizeOptions::default());

        assert_eq!(
            table.per_100.micronutrients,
            vec![(Micronutrient::Zinc, 3.0), (Micronutrient::VitaminA, 90.0)]
        );
        assert_eq!(table.per_portion.micronutrient(Micronutrient::VitaminA), 45.0);
    }

    proptest! {
        #[test]
        fn conversion_round_trips_within_rounding(
            value in 0.0f64..10_000.0,
            portion in 0.1f64..1_000.0,
        ) {
            let back = portion_from_per100(per100_from_portion(value, portion), portion);
            let tolerance = 0.005 * portion / 100.0 + 0.005 + 1e-6;
            prop_assert!((back - value).abs() <= tolerance, "{value} -> {back}");
        }
    }
}
