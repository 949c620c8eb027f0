use serde::{Deserialize, Serialize};

use crate::nutrient_extractor::FoodPayload;

pub const FDC_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
pub const FOODS_SEARCH_PATH: &str = "/foods/search";
pub const FOODS_BATCH_PATH: &str = "/foods";

/// Only branded products are searched.
pub const SEARCH_DATA_TYPE: &str = "Branded";

#[derive(Clone, Debug, Serialize)]
pub enum Provider {
    FoodDataCentral {
        /// Name of the environment variable holding the API key, read at request time.
        api_key: String,
        base_url: String,
    },
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchQuery {
    pub query: String,
    pub page_size: u32,
    pub data_type: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultFood {
    pub fdc_id: u64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResponse {
    #[serde(default)]
    pub total_hits: Option<u64>,
    #[serde(default)]
    pub foods: Vec<SearchResultFood>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FoodsBatchRequest {
    pub fdc_ids: Vec<u64>,
}

pub type FoodsBatchResponse = Vec<FoodPayload>;
