use super::draw::RowKind;
use super::format::{ColumnGeometry, FormatDescriptor};
use super::text::{format_amount, format_energy};
use crate::nutrition::{BasisValues, Nutrient, NutrientTable};

/// Regulation order of the nutrient rows, with their indent level.
const ROW_ORDER: &[(Nutrient, u8)] = &[
    (Nutrient::TotalFat, 0),
    (Nutrient::SaturatedFat, 1),
    (Nutrient::TransFat, 1),
    (Nutrient::MonounsaturatedFat, 1),
    (Nutrient::PolyunsaturatedFat, 1),
    (Nutrient::Carbohydrate, 0),
    (Nutrient::Fiber, 1),
    (Nutrient::TotalSugars, 1),
    (Nutrient::AddedSugars, 1),
    (Nutrient::Protein, 0),
    (Nutrient::Sodium, 0),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Macronutrients,
    Micronutrients,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    pub kind: RowKind,
    pub depth: u8,
    pub section: Section,
    pub per_100: String,
    pub per_portion: String,
}

impl LabelRow {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn emphasis(&self) -> bool {
        self.kind.is_emphasized()
    }

    /// Value cells for the given geometry, left to right.
    pub fn values(&self, columns: ColumnGeometry) -> Vec<String> {
        match columns {
            ColumnGeometry::Split => vec![self.per_100.clone(), self.per_portion.clone()],
            ColumnGeometry::Combined => vec![format!("{} | {}", self.per_100, self.per_portion)],
        }
    }
}

fn nutrient_value(values: &BasisValues, nutrient: Nutrient) -> String {
    format!(
        "{} {}",
        format_amount(values.get(nutrient), nutrient.value_format()),
        nutrient.unit().symbol()
    )
}

/// Rows of a label in regulation order: energy, fats, carbohydrates,
/// protein, sodium, then the selected micronutrients.
pub fn build_rows(table: &NutrientTable, descriptor: &FormatDescriptor) -> Vec<LabelRow> {
    let mut rows = vec![LabelRow {
        kind: RowKind::Energy,
        depth: 0,
        section: Section::Macronutrients,
        per_100: format_energy(table.per_100.energy_kcal, table.per_100.energy_kj),
        per_portion: format_energy(table.per_portion.energy_kcal, table.per_portion.energy_kj),
    }];

    for &(nutrient, depth) in ROW_ORDER {
        let kind = RowKind::Nutrient(nutrient);
        if !descriptor.includes(kind) || !table.per_100.is_declared(nutrient) {
            continue;
        }
        rows.push(LabelRow {
            kind,
            depth,
            section: Section::Macronutrients,
            per_100: nutrient_value(&table.per_100, nutrient),
            per_portion: nutrient_value(&table.per_portion, nutrient),
        });
    }

    for &(micronutrient, per_100) in &table.per_100.micronutrients {
        let format = micronutrient.value_format();
        let unit = micronutrient.unit().symbol();
        let per_portion = table.per_portion.micronutrient(micronutrient);
        rows.push(LabelRow {
            kind: RowKind::Micronutrient(micronutrient),
            depth: 0,
            section: Section::Micronutrients,
            per_100: format!("{} {}", format_amount(per_100, format), unit),
            per_portion: format!("{} {}", format_amount(per_portion, format), unit),
        });
    }

    rows
}
