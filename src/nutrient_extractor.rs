use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The seven nutrients every `FoodRecord` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
    Sugar,
    Fiber,
    Sodium,
}

impl Nutrient {
    pub const ALL: [Nutrient; 7] = [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Sugar,
        Nutrient::Fiber,
        Nutrient::Sodium,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Nutrient::Calories => "Calories",
            Nutrient::Protein => "Protein (g)",
            Nutrient::Fat => "Fat (g)",
            Nutrient::Carbs => "Carbs (g)",
            Nutrient::Sugar => "Sugar (g)",
            Nutrient::Fiber => "Fiber (g)",
            Nutrient::Sodium => "Sodium (mg)",
        }
    }
}

// FoodData Central nutrient names. Two source labels map onto Sugar.
const NUTRIENT_ALIASES: &[(&str, Nutrient)] = &[
    ("Energy", Nutrient::Calories),
    ("Protein", Nutrient::Protein),
    ("Total lipid (fat)", Nutrient::Fat),
    ("Carbohydrate, by difference", Nutrient::Carbs),
    ("Sugars, total including NLEA", Nutrient::Sugar),
    ("Total Sugars", Nutrient::Sugar),
    ("Fiber, total dietary", Nutrient::Fiber),
    ("Sodium, Na", Nutrient::Sodium),
];

pub fn canonical_nutrient(source_name: &str) -> Option<Nutrient> {
    NUTRIENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == source_name)
        .map(|(_, nutrient)| *nutrient)
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct NutrientValues {
    #[serde(rename = "Calories")]
    pub calories: f64,
    #[serde(rename = "Protein (g)")]
    pub protein_g: f64,
    #[serde(rename = "Fat (g)")]
    pub fat_g: f64,
    #[serde(rename = "Carbs (g)")]
    pub carbs_g: f64,
    #[serde(rename = "Sugar (g)")]
    pub sugar_g: f64,
    #[serde(rename = "Fiber (g)")]
    pub fiber_g: f64,
    #[serde(rename = "Sodium (mg)")]
    pub sodium_mg: f64,
}

impl NutrientValues {
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein_g,
            Nutrient::Fat => self.fat_g,
            Nutrient::Carbs => self.carbs_g,
            Nutrient::Sugar => self.sugar_g,
            Nutrient::Fiber => self.fiber_g,
            Nutrient::Sodium => self.sodium_mg,
        }
    }

    pub fn set(&mut self, nutrient: Nutrient, value: f64) {
        let slot = match nutrient {
            Nutrient::Calories => &mut self.calories,
            Nutrient::Protein => &mut self.protein_g,
            Nutrient::Fat => &mut self.fat_g,
            Nutrient::Carbs => &mut self.carbs_g,
            Nutrient::Sugar => &mut self.sugar_g,
            Nutrient::Fiber => &mut self.fiber_g,
            Nutrient::Sodium => &mut self.sodium_mg,
        };
        *slot = value;
    }
}

/// Normalized per-item nutrient snapshot. All seven nutrients are always present;
/// anything the source did not report is 0.0.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct FoodRecord {
    #[serde(rename = "Food")]
    pub name: String,
    #[serde(rename = "FDC ID")]
    pub fdc_id: String,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(flatten)]
    pub nutrients: NutrientValues,
}

// --- Raw FoodData Central payloads ---

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct NutrientInfo {
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of `foodNutrients`. Batch-fetch responses nest the name under
/// `nutrient.name` and use `amount`; search responses are flat
/// (`nutrientName`, `value`).
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodNutrientEntry {
    #[serde(default)]
    pub nutrient: Option<NutrientInfo>,
    #[serde(default)]
    pub nutrient_name: Option<String>,
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub value: Option<Value>,
}

impl FoodNutrientEntry {
    fn name(&self) -> Option<&str> {
        self.nutrient
            .as_ref()
            .and_then(|n| n.name.as_deref())
            .or(self.nutrient_name.as_deref())
    }

    fn parsed_amount(&self) -> f64 {
        self.amount
            .as_ref()
            .or(self.value.as_ref())
            .map(parse_amount)
            .unwrap_or(0.0)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodPayload {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fdc_id: Option<Value>,
    #[serde(default)]
    pub brand_owner: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub food_nutrients: Option<Vec<FoodNutrientEntry>>,
}

// Entries that do not fit `FoodNutrientEntry` (null, wrong shape) are dropped
// instead of failing the whole payload. A non-array value counts as absent.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Option<Vec<FoodNutrientEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        return Ok(None);
    };
    let entries = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<FoodNutrientEntry>(item).ok())
        .collect();
    Ok(Some(entries))
}

fn parse_amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn identifier_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn extract_one(food: &FoodPayload) -> FoodRecord {
    let mut nutrients = NutrientValues::default();

    for entry in food.food_nutrients.iter().flatten() {
        let Some(nutrient) = entry.name().and_then(canonical_nutrient) else {
            continue;
        };
        // Later entries overwrite earlier ones for the same canonical key.
        nutrients.set(nutrient, entry.parsed_amount());
    }

    FoodRecord {
        name: food.description.clone().unwrap_or_default(),
        fdc_id: food.fdc_id.as_ref().map(identifier_to_string).unwrap_or_default(),
        brand: food.brand_owner.clone().unwrap_or_default(),
        nutrients,
    }
}

/// Normalizes raw food payloads into `FoodRecord`s, preserving input order.
pub fn extract_nutrients(food_list: &[FoodPayload]) -> Vec<FoodRecord> {
    let records: Vec<FoodRecord> = food_list.iter().map(extract_one).collect();
    tracing::debug!(count = records.len(), "extracted nutrient records");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payloads(value: Value) -> Vec<FoodPayload> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_extract_empty_list() {
        assert!(extract_nutrients(&[]).is_empty());
    }

    #[test]
    fn test_extract_food_without_nutrients_defaults_to_zero() {
        let foods = payloads(json!([{ "description": "Mystery bar" }]));
        let records = extract_nutrients(&foods);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "Mystery bar");
        assert_eq!(record.fdc_id, "");
        assert_eq!(record.brand, "");
        for nutrient in Nutrient::ALL {
            assert_eq!(record.nutrients.get(nutrient), 0.0);
        }

        // Serialized form exposes all seven labelled keys.
        let serialized = serde_json::to_value(record).unwrap();
        for nutrient in Nutrient::ALL {
            assert_eq!(serialized[nutrient.label()], json!(0.0));
        }
    }

    #[test]
    fn test_extract_batch_fetch_shape() {
        let foods = payloads(json!([{
            "description": "GROUND BEEF",
            "fdcId": 2345678,
            "brandOwner": "Acme Meats",
            "foodNutrients": [
                { "nutrient": { "name": "Energy" }, "amount": 250 },
                { "nutrient": { "name": "Protein" }, "amount": 26.1 },
                { "nutrient": { "name": "Total lipid (fat)" }, "amount": "15.5" },
                { "nutrient": { "name": "Carbohydrate, by difference" }, "amount": 0 },
                { "nutrient": { "name": "Sodium, Na" }, "amount": 75 },
                { "nutrient": { "name": "Iron, Fe" }, "amount": 2.7 },
                { "nutrient": { "name": "Fiber, total dietary" }, "amount": "n/a" }
            ]
        }]));
        let records = extract_nutrients(&foods);
        let beef = &records[0];
        assert_eq!(beef.fdc_id, "2345678");
        assert_eq!(beef.brand, "Acme Meats");
        assert_eq!(beef.nutrients.calories, 250.0);
        assert_eq!(beef.nutrients.protein_g, 26.1);
        assert_eq!(beef.nutrients.fat_g, 15.5);
        assert_eq!(beef.nutrients.sodium_mg, 75.0);
        assert_eq!(beef.nutrients.fiber_g, 0.0);
        assert_eq!(beef.nutrients.sugar_g, 0.0);
    }

    #[test]
    fn test_extract_search_shape_and_sugar_aliases() {
        let foods = payloads(json!([{
            "description": "Cola",
            "fdcId": "abc-1",
            "foodNutrients": [
                { "nutrientName": "Sugars, total including NLEA", "value": 10.0 },
                { "nutrientName": "Total Sugars", "value": 11.0 },
                { "nutrientName": "Energy" }
            ]
        }]));
        let cola = &extract_nutrients(&foods)[0];
        assert_eq!(cola.fdc_id, "abc-1");
        // Last matching alias wins.
        assert_eq!(cola.nutrients.sugar_g, 11.0);
        assert_eq!(cola.nutrients.calories, 0.0);
    }

    #[test]
    fn test_extract_preserves_order() {
        let foods = payloads(json!([
            { "description": "first" },
            { "description": "second" },
            { "description": "third" }
        ]));
        let names: Vec<String> = extract_nutrients(&foods).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_entries_without_names_are_skipped() {
        let foods = payloads(json!([{
            "description": "odd",
            "foodNutrients": [ {}, { "nutrient": {} , "amount": 5 }, { "amount": 3 } ]
        }]));
        assert_eq!(extract_nutrients(&foods)[0].nutrients, NutrientValues::default());
    }

    #[test]
    fn test_malformed_entries_do_not_sink_the_batch() {
        let foods = payloads(json!([
            {
                "description": "patchy",
                "foodNutrients": [
                    null,
                    { "nutrient": "Energy", "amount": 999 },
                    { "nutrient": { "name": 7 }, "amount": 1 },
                    42,
                    { "nutrient": { "name": "Protein" }, "amount": 12.5 }
                ]
            },
            { "description": "not a list", "foodNutrients": "none" },
            { "description": "null list", "foodNutrients": null }
        ]));
        let records = extract_nutrients(&foods);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].nutrients.protein_g, 12.5);
        assert_eq!(records[0].nutrients.calories, 0.0);
        assert_eq!(records[1].nutrients, NutrientValues::default());
        assert_eq!(records[2].name, "null list");
    }
}
