//! Nutrient catalog: declared units, display names and value formats.

use serde::{Deserialize, Serialize};

/// Mass unit a nutrient is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MassUnit {
    Gram,
    Milligram,
    Microgram,
    /// Micrograms retinol equivalent (vitamin A).
    MicrogramRe,
}

impl MassUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            MassUnit::Gram => "g",
            MassUnit::Milligram => "mg",
            MassUnit::Microgram => "µg",
            MassUnit::MicrogramRe => "µg RE",
        }
    }
}

/// How an amount is printed on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    /// Rounded to a whole number, no decimal point.
    Integer,
    /// One decimal, trailing zeros and trailing point stripped.
    Trimmed,
    /// One decimal, always shown.
    OneDecimal,
}

/// Nutrients entered through the form. Energy is not one of them: it is
/// always derived from the macronutrients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    TotalFat,
    SaturatedFat,
    TransFat,
    MonounsaturatedFat,
    PolyunsaturatedFat,
    Carbohydrate,
    Fiber,
    TotalSugars,
    AddedSugars,
    Protein,
    Sodium,
    OrganicAcids,
    Alcohol,
}

impl Nutrient {
    pub const ALL: [Nutrient; 13] = [
        Nutrient::TotalFat,
        Nutrient::SaturatedFat,
        Nutrient::TransFat,
        Nutrient::MonounsaturatedFat,
        Nutrient::PolyunsaturatedFat,
        Nutrient::Carbohydrate,
        Nutrient::Fiber,
        Nutrient::TotalSugars,
        Nutrient::AddedSugars,
        Nutrient::Protein,
        Nutrient::Sodium,
        Nutrient::OrganicAcids,
        Nutrient::Alcohol,
    ];

    pub fn unit(self) -> MassUnit {
        match self {
            Nutrient::TransFat | Nutrient::Sodium => MassUnit::Milligram,
            _ => MassUnit::Gram,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Nutrient::TotalFat => "Total fat",
            Nutrient::SaturatedFat => "Saturated fat",
            Nutrient::TransFat => "Trans fat",
            Nutrient::MonounsaturatedFat => "Monounsaturated fat",
            Nutrient::PolyunsaturatedFat => "Polyunsaturated fat",
            Nutrient::Carbohydrate => "Total carbohydrate",
            Nutrient::Fiber => "Dietary fiber",
            Nutrient::TotalSugars => "Total sugars",
            Nutrient::AddedSugars => "Added sugars",
            Nutrient::Protein => "Protein",
            Nutrient::Sodium => "Sodium",
            Nutrient::OrganicAcids => "Organic acids",
            Nutrient::Alcohol => "Alcohol",
        }
    }

    /// Bold on every label format.
    pub fn is_emphasized(self) -> bool {
        matches!(
            self,
            Nutrient::SaturatedFat | Nutrient::TransFat | Nutrient::AddedSugars | Nutrient::Sodium
        )
    }

    /// Zero unless the form declares it. Absent ones get no label row.
    pub fn is_optional(self) -> bool {
        matches!(
            self,
            Nutrient::MonounsaturatedFat
                | Nutrient::PolyunsaturatedFat
                | Nutrient::OrganicAcids
                | Nutrient::Alcohol
        )
    }

    pub fn value_format(self) -> ValueFormat {
        match self.unit() {
            MassUnit::Milligram => ValueFormat::Integer,
            _ => ValueFormat::Trimmed,
        }
    }
}

/// Optional vitamins and minerals a label may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Micronutrient {
    VitaminA,
    VitaminD,
    VitaminE,
    VitaminK,
    VitaminC,
    Thiamine,
    Riboflavin,
    Niacin,
    VitaminB6,
    Folate,
    VitaminB12,
    Calcium,
    Iron,
    Magnesium,
    Zinc,
    Potassium,
    Phosphorus,
    Iodine,
    Selenium,
}

impl Micronutrient {
    pub fn unit(self) -> MassUnit {
        use Micronutrient::*;
        match self {
            VitaminA => MassUnit::MicrogramRe,
            VitaminD | VitaminK | Folate | VitaminB12 | Iodine | Selenium => MassUnit::Microgram,
            VitaminE | VitaminC | Thiamine | Riboflavin | Niacin | VitaminB6 | Calcium | Iron
            | Magnesium | Zinc | Potassium | Phosphorus => MassUnit::Milligram,
        }
    }

    pub fn label(self) -> &'static str {
        use Micronutrient::*;
        match self {
            VitaminA => "Vitamin A",
            VitaminD => "Vitamin D",
            VitaminE => "Vitamin E",
            VitaminK => "Vitamin K",
            VitaminC => "Vitamin C",
            Thiamine => "Thiamine",
            Riboflavin => "Riboflavin",
            Niacin => "Niacin",
            VitaminB6 => "Vitamin B6",
            Folate => "Folate",
            VitaminB12 => "Vitamin B12",
            Calcium => "Calcium",
            Iron => "Iron",
            Magnesium => "Magnesium",
            Zinc => "Zinc",
            Potassium => "Potassium",
            Phosphorus => "Phosphorus",
            Iodine => "Iodine",
            Selenium => "Selenium",
        }
    }

    /// Macro-minerals are whole milligrams; trace minerals and mg vitamins
    /// keep a trimmed decimal; microgram amounts keep one decimal.
    pub fn value_format(self) -> ValueFormat {
        use Micronutrient::*;
        match self {
            Calcium | Magnesium | Potassium | Phosphorus => ValueFormat::Integer,
            _ => match self.unit() {
                MassUnit::Microgram | MassUnit::MicrogramRe => ValueFormat::OneDecimal,
                _ => ValueFormat::Trimmed,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trans_fat_and_sodium_are_milligrams() {
        assert_eq!(Nutrient::TransFat.unit(), MassUnit::Milligram);
        assert_eq!(Nutrient::Sodium.unit(), MassUnit::Milligram);
        assert_eq!(Nutrient::TotalFat.unit(), MassUnit::Gram);
    }

    #[test]
    fn emphasis_set_is_fixed() {
        let emphasized: Vec<_> = Nutrient::ALL
            .iter()
            .copied()
            .filter(|n| n.is_emphasized())
            .collect();
        assert_eq!(
            emphasized,
            vec![
                Nutrient::SaturatedFat,
                Nutrient::TransFat,
                Nutrient::AddedSugars,
                Nutrient::Sodium
            ]
        );
    }

    #[test]
    fn vitamin_a_uses_retinol_equivalents() {
        assert_eq!(Micronutrient::VitaminA.unit().symbol(), "µg RE");
        assert_eq!(Micronutrient::VitaminA.value_format(), ValueFormat::OneDecimal);
        assert_eq!(Micronutrient::Calcium.value_format(), ValueFormat::Integer);
        assert_eq!(Micronutrient::Iron.value_format(), ValueFormat::Trimmed);
    }
}
