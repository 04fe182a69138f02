mod normalize;
mod nutrient;
mod profile;

pub use normalize::{
    BasisValues, EnergyInputs, NormalizeOptions, NutrientTable, energy_kcal, kilojoules, mg_to_g,
    normalize, per100_from_portion, portion_from_per100, round_to,
};
pub use nutrient::{MassUnit, Micronutrient, Nutrient, ValueFormat};
pub use profile::{Basis, NutrientProfile, PhysicalState, PortionInfo, PortionUnit, ProductType};
