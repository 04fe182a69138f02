//! The label form: what a user types in, as a JSON, TOML or YAML document.
//!
//! Every amount may be a number or text. Text accepts a decimal comma
//! (`"2,5"`); blank text leaves the field empty and anything unparseable
//! reads as 0.

use std::path::Path;

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::error::{LabelError, LabelResult};
use crate::label::{FootnoteText, LabelFormat, LabelRequest};
use crate::nutrition::{
    Basis, Micronutrient, Nutrient, NutrientProfile, PhysicalState, PortionInfo, ProductType,
};

/// A numeric form field. `None` when left blank.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FormNumber(Option<f64>);

impl FormNumber {
    pub fn blank() -> Self {
        Self(None)
    }

    pub fn new(value: f64) -> Self {
        Self(Some(value))
    }

    /// Parses typed text the way the form accepts it.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self::blank();
        }
        match trimmed.replace(',', ".").parse::<f64>() {
            Ok(value) if value.is_finite() => Self::new(value),
            Ok(_) => {
                tracing::debug!(text = trimmed, "non-finite amount, using 0");
                Self::new(0.0)
            }
            Err(_) => {
                tracing::debug!(text = trimmed, "unparseable amount, using 0");
                Self::new(0.0)
            }
        }
    }

    pub fn is_blank(&self) -> bool {
        self.0.is_none()
    }

    /// The entered amount; blank reads as 0.
    pub fn value(&self) -> f64 {
        self.0.unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Blank(()),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for FormNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawNumber::deserialize(deserializer)? {
            RawNumber::Number(value) if value.is_finite() => FormNumber::new(value),
            RawNumber::Number(_) => FormNumber::new(0.0),
            RawNumber::Text(text) => FormNumber::parse(&text),
            RawNumber::Blank(()) => FormNumber::blank(),
            RawNumber::Other(_) => FormNumber::new(0.0),
        })
    }
}

/// Macronutrient fields. Blank optional fats, organic acids and alcohol stay
/// off the label.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NutrientFields {
    pub total_fat: FormNumber,
    pub saturated_fat: FormNumber,
    /// mg
    pub trans_fat: FormNumber,
    pub monounsaturated_fat: FormNumber,
    pub polyunsaturated_fat: FormNumber,
    pub carbohydrate: FormNumber,
    pub fiber: FormNumber,
    pub total_sugars: FormNumber,
    pub added_sugars: FormNumber,
    pub protein: FormNumber,
    /// mg
    pub sodium: FormNumber,
    pub organic_acids: FormNumber,
    pub alcohol: FormNumber,
}

impl NutrientFields {
    pub fn entries(&self) -> [(Nutrient, FormNumber); 13] {
        [
            (Nutrient::TotalFat, self.total_fat),
            (Nutrient::SaturatedFat, self.saturated_fat),
            (Nutrient::TransFat, self.trans_fat),
            (Nutrient::MonounsaturatedFat, self.monounsaturated_fat),
            (Nutrient::PolyunsaturatedFat, self.polyunsaturated_fat),
            (Nutrient::Carbohydrate, self.carbohydrate),
            (Nutrient::Fiber, self.fiber),
            (Nutrient::TotalSugars, self.total_sugars),
            (Nutrient::AddedSugars, self.added_sugars),
            (Nutrient::Protein, self.protein),
            (Nutrient::Sodium, self.sodium),
            (Nutrient::OrganicAcids, self.organic_acids),
            (Nutrient::Alcohol, self.alcohol),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MicronutrientEntry {
    pub nutrient: Micronutrient,
    #[serde(default)]
    pub amount: FormNumber,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabelForm {
    pub product_name: String,
    /// Basis the nutrient amounts were entered in.
    pub basis: Basis,
    pub portion_size: FormNumber,
    pub physical_state: PhysicalState,
    pub servings_per_container: FormNumber,
    pub approximate_servings: bool,
    pub product_type: Option<ProductType>,
    pub nutrients: NutrientFields,
    /// Vitamins and minerals, in the order they should appear.
    pub micronutrients: Vec<MicronutrientEntry>,
    pub footnote: FootnoteText,
    pub format: LabelFormat,
    pub kilojoules: bool,
}

impl Default for LabelForm {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            basis: Basis::default(),
            portion_size: FormNumber::blank(),
            physical_state: PhysicalState::default(),
            servings_per_container: FormNumber::new(1.0),
            approximate_servings: false,
            product_type: None,
            nutrients: NutrientFields::default(),
            micronutrients: Vec::new(),
            footnote: FootnoteText::default(),
            format: LabelFormat::default(),
            kilojoules: false,
        }
    }
}

impl LabelForm {
    pub fn from_json(content: &str) -> LabelResult<Self> {
        serde_json::from_str(content).map_err(|e| LabelError::Form(format!("JSON: {}", e)))
    }

    pub fn from_toml(content: &str) -> LabelResult<Self> {
        toml::from_str(content).map_err(|e| LabelError::Form(format!("TOML: {}", e)))
    }

    pub fn from_yaml(content: &str) -> LabelResult<Self> {
        serde_yaml::from_str(content).map_err(|e| LabelError::Form(format!("YAML: {}", e)))
    }

    /// Tries JSON, then TOML, then YAML. Reports the first error when all
    /// three fail.
    pub fn from_any(content: &str) -> LabelResult<Self> {
        Self::from_json(content).or_else(|json_err| {
            Self::from_toml(content)
                .or_else(|_| Self::from_yaml(content))
                .map_err(|_| json_err)
        })
    }

    /// Reads a form file, or stdin when `input` is `-`.
    pub fn load(input: &Path) -> LabelResult<Self> {
        if input.to_str() == Some("-") {
            let mut buffer = String::new();
            std::io::Read::read_to_string(&mut std::io::stdin(), &mut buffer).map_err(
                |source| LabelError::Read {
                    path: input.to_path_buf(),
                    source,
                },
            )?;
            return Self::from_any(&buffer);
        }

        let content = std::fs::read_to_string(input).map_err(|source| LabelError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let ext = input
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_any(&content),
        }
    }

    /// Blank servings per container read as 1.
    pub fn portion(&self) -> PortionInfo {
        let servings = if self.servings_per_container.is_blank() {
            1.0
        } else {
            self.servings_per_container.value()
        };
        PortionInfo {
            approximate: self.approximate_servings,
            ..PortionInfo::new(
                self.portion_size.value(),
                self.physical_state.into(),
                servings,
            )
        }
    }

    pub fn profile(&self) -> NutrientProfile {
        let mut profile = NutrientProfile::new(self.basis);
        for (nutrient, amount) in self.nutrients.entries() {
            if !amount.is_blank() || !nutrient.is_optional() {
                profile.set(nutrient, amount.value());
            }
        }
        for entry in &self.micronutrients {
            profile.select(entry.nutrient, entry.amount.value());
        }
        profile
    }

    pub fn into_request(self) -> LabelRequest {
        let profile = self.profile();
        let portion = self.portion();
        LabelRequest {
            product_name: self.product_name,
            profile,
            portion,
            product_type: self.product_type,
            format: self.format,
            footnote: self.footnote,
            kilojoules: self.kilojoules,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutrition::PortionUnit;

    const JSON_FORM: &str = r#"{
        "product_name": "Granola bar",
        "basis": "portion",
        "portion_size": "50",
        "physical_state": "solid",
        "servings_per_container": 2,
        "approximate_servings": true,
        "product_type": "finished_product",
        "nutrients": {
            "total_fat": "5,0",
            "saturated_fat": 2,
            "trans_fat": "820",
            "monounsaturated_fat": "",
            "protein": "three",
            "sodium": null
        },
        "micronutrients": [
            { "nutrient": "iron", "amount": "1,25" },
            { "nutrient": "vitamin_a", "amount": 45 }
        ],
        "footnote": "vitamin C.",
        "format": "tabular",
        "kilojoules": true
    }"#;

    #[test]
    fn text_amounts_accept_decimal_comma() {
        assert_eq!(FormNumber::parse("2,5"), FormNumber::new(2.5));
        assert_eq!(FormNumber::parse(" 7 "), FormNumber::new(7.0));
        assert_eq!(FormNumber::parse("abc"), FormNumber::new(0.0));
        assert!(FormNumber::parse("   ").is_blank());
    }

    #[test]
    fn json_form_builds_request() {
        let request = LabelForm::from_json(JSON_FORM).unwrap().into_request();

        assert_eq!(request.product_name, "Granola bar");
        assert_eq!(request.format, LabelFormat::Tabular);
        assert_eq!(request.product_type, Some(ProductType::FinishedProduct));
        assert!(request.kilojoules);

        assert_eq!(request.portion.size, 50.0);
        assert_eq!(request.portion.unit, PortionUnit::Gram);
        assert_eq!(request.portion.servings_per_container, 2.0);
        assert!(request.portion.approximate);

        let profile = &request.profile;
        assert_eq!(profile.basis(), Basis::PerPortion);
        assert_eq!(profile.get(Nutrient::TotalFat), 5.0);
        assert_eq!(profile.get(Nutrient::TransFat), 820.0);
        assert_eq!(profile.get(Nutrient::Protein), 0.0);
        assert!(profile.is_declared(Nutrient::Sodium));
        assert_eq!(profile.get(Nutrient::Sodium), 0.0);
        assert!(!profile.is_declared(Nutrient::MonounsaturatedFat));
        assert_eq!(
            profile.micronutrients(),
            &[(Micronutrient::Iron, 1.25), (Micronutrient::VitaminA, 45.0)]
        );
    }

    #[test]
    fn toml_and_yaml_forms_parse_the_same_way() {
        let toml_form = r#"
product_name = "Juice"
basis = "per_100"
portion_size = 250
physical_state = "liquid"
format = "linear"

[nutrients]
carbohydrate = "11,2"
sodium = 4

[[micronutrients]]
nutrient = "vitamin_c"
amount = 30
"#;
        let yaml_form = r#"
product_name: Juice
basis: per_100
portion_size: 250
physical_state: liquid
format: linear
nutrients:
  carbohydrate: "11,2"
  sodium: 4
micronutrients:
  - nutrient: vitamin_c
    amount: 30
"#;
        let from_toml = LabelForm::from_toml(toml_form).unwrap();
        let from_yaml = LabelForm::from_yaml(yaml_form).unwrap();
        assert_eq!(from_toml, from_yaml);

        let request = from_toml.into_request();
        assert_eq!(request.portion.unit, PortionUnit::Milliliter);
        assert_eq!(request.profile.basis(), Basis::Per100);
        assert_eq!(request.profile.get(Nutrient::Carbohydrate), 11.2);
        assert_eq!(request.portion.servings_per_container, 1.0);
    }

    #[test]
    fn from_any_falls_back_through_formats() {
        let yaml_only = "product_name: Oats\nformat: simplified\n";
        let form = LabelForm::from_any(yaml_only).unwrap();
        assert_eq!(form.format, LabelFormat::Simplified);

        let toml_only = "product_name = \"Oats\"\nkilojoules = true\n";
        assert!(LabelForm::from_any(toml_only).unwrap().kilojoules);
    }

    #[test]
    fn non_finite_text_reads_as_zero() {
        assert_eq!(FormNumber::parse("NaN"), FormNumber::new(0.0));
        assert_eq!(FormNumber::parse("inf"), FormNumber::new(0.0));
        assert_eq!(FormNumber::parse("-infinity"), FormNumber::new(0.0));
    }

    #[test]
    fn non_finite_portion_never_reaches_the_label() {
        use crate::label::test_support::FixedAdvance;
        use crate::style::{LabelStyle, Units};

        for size in ["NaN", "inf"] {
            let json = format!(
                r#"{{"portion_size": "{size}", "servings_per_container": "inf",
                    "nutrients": {{"total_fat": 5, "protein": 3}}}}"#
            );
            let request = LabelForm::from_json(&json).unwrap().into_request();
            assert_eq!(request.portion.size, 0.0);
            assert_eq!(request.portion.servings_per_container, 0.0);

            let table = request.table();
            assert_eq!(table.portion.size, 0.0);
            let layout = request.render(&LabelStyle::default(), Units::Pixels, &mut FixedAdvance);
            let texts: Vec<&str> = layout.texts().map(|(text, _, _)| text).collect();
            assert!(texts.contains(&"Serving size: 0 g"));
            assert!(
                texts.iter().all(|t| !t.contains("NaN") && !t.contains("inf")),
                "{texts:?}"
            );
        }

        // TOML has native nan and inf literals.
        let form = LabelForm::from_toml("portion_size = nan\nservings_per_container = inf\n").unwrap();
        let portion = form.portion();
        assert_eq!(portion.size, 0.0);
        assert_eq!(portion.servings_per_container, 0.0);
    }

    #[test]
    fn blank_servings_read_as_one() {
        let form = LabelForm::from_json(r#"{"servings_per_container": ""}"#).unwrap();
        assert!(form.servings_per_container.is_blank());
        assert_eq!(form.portion().servings_per_container, 1.0);

        let form = LabelForm::from_json(r#"{"servings_per_container": null}"#).unwrap();
        assert_eq!(form.portion().servings_per_container, 1.0);

        let form = LabelForm::from_json(r#"{"servings_per_container": "0"}"#).unwrap();
        assert_eq!(form.portion().servings_per_container, 0.0);
    }

    #[test]
    fn negative_amounts_are_clamped() {
        let form = LabelForm::from_json(r#"{"nutrients": {"protein": "-4"}}"#).unwrap();
        assert_eq!(form.profile().get(Nutrient::Protein), 0.0);
    }

    #[test]
    fn unknown_nutrient_is_a_form_error() {
        let err = LabelForm::from_json(r#"{"nutrients": {"caffeine": 3}}"#).unwrap_err();
        assert!(matches!(err, LabelError::Form(_)));
    }
}
