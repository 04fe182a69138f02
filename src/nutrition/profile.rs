use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::nutrient::{Micronutrient, Nutrient};

/// Which basis the entered amounts are expressed in. The other one is
/// always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    #[default]
    #[serde(alias = "portion")]
    PerPortion,
    #[serde(alias = "per_100", alias = "100")]
    #[value(name = "per-100")]
    Per100,
}

/// Physical state of the product; decides g vs mL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhysicalState {
    #[default]
    Solid,
    Semisolid,
    Liquid,
}

/// Whether the label belongs to a product sold as is, to an ingredient sold
/// to other manufacturers, or to both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    FinishedProduct,
    RawMaterial,
    Both,
}

impl ProductType {
    pub fn label(self) -> &'static str {
        match self {
            ProductType::FinishedProduct => "Finished product",
            ProductType::RawMaterial => "Raw material",
            ProductType::Both => "Finished product and raw material",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortionUnit {
    Gram,
    Milliliter,
}

impl PortionUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            PortionUnit::Gram => "g",
            PortionUnit::Milliliter => "mL",
        }
    }
}

impl From<PhysicalState> for PortionUnit {
    fn from(state: PhysicalState) -> Self {
        match state {
            PhysicalState::Solid | PhysicalState::Semisolid => PortionUnit::Gram,
            PhysicalState::Liquid => PortionUnit::Milliliter,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionInfo {
    pub size: f64,
    pub unit: PortionUnit,
    pub servings_per_container: f64,
    /// Servings per container is an estimate ("about 2").
    pub approximate: bool,
}

impl PortionInfo {
    /// Negative and non-finite sizes and servings are stored as 0.
    pub fn new(size: f64, unit: PortionUnit, servings_per_container: f64) -> Self {
        Self {
            size: non_negative(size),
            unit,
            servings_per_container: non_negative(servings_per_container),
            approximate: false,
        }
    }

    /// The same portion with its fields cleaned the way [`PortionInfo::new`] does.
    pub fn cleaned(&self) -> Self {
        Self {
            approximate: self.approximate,
            ..Self::new(self.size, self.unit, self.servings_per_container)
        }
    }
}

fn non_negative(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

/// Entered nutrient amounts in the authoritative basis.
///
/// Amounts are held in each nutrient's declared unit (trans fat and sodium in
/// mg). Mandatory nutrients read as 0 when never set; optional ones are only
/// present once declared.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientProfile {
    basis: Basis,
    amounts: BTreeMap<Nutrient, f64>,
    micronutrients: Vec<(Micronutrient, f64)>,
}

impl NutrientProfile {
    pub fn new(basis: Basis) -> Self {
        Self {
            basis,
            amounts: BTreeMap::new(),
            micronutrients: Vec::new(),
        }
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Negative and non-finite amounts are stored as 0.
    pub fn set(&mut self, nutrient: Nutrient, amount: f64) -> &mut Self {
        self.amounts.insert(nutrient, non_negative(amount));
        self
    }

    pub fn with(mut self, nutrient: Nutrient, amount: f64) -> Self {
        self.set(nutrient, amount);
        self
    }

    /// Adds a vitamin or mineral row. Selection order is kept; selecting the
    /// same micronutrient again replaces its amount in place.
    pub fn select(&mut self, micronutrient: Micronutrient, amount: f64) -> &mut Self {
        let amount = non_negative(amount);
        if let Some(entry) = self
            .micronutrients
            .iter_mut()
            .find(|(m, _)| *m == micronutrient)
        {
            entry.1 = amount;
        } else {
            self.micronutrients.push((micronutrient, amount));
        }
        self
    }

    pub fn with_micronutrient(mut self, micronutrient: Micronutrient, amount: f64) -> Self {
        self.select(micronutrient, amount);
        self
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.amounts.get(&nutrient).copied().unwrap_or(0.0)
    }

    pub fn is_declared(&self, nutrient: Nutrient) -> bool {
        !nutrient.is_optional() || self.amounts.contains_key(&nutrient)
    }

    /// Every nutrient that gets a value on the label, in catalog order.
    pub fn declared(&self) -> impl Iterator<Item = (Nutrient, f64)> + '_ {
        Nutrient::ALL
            .into_iter()
            .filter(|n| self.is_declared(*n))
            .map(|n| (n, self.get(n)))
    }

    pub fn micronutrients(&self) -> &[(Micronutrient, f64)] {
        &self.micronutrients
    }
}
