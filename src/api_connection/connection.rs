use dotenv::dotenv;
use reqwest::{Client, Response};
use std::env;
use std::error::Error;
use std::fmt;

use super::endpoints::{
    FoodSearchQuery, FoodSearchResponse, FoodsBatchRequest, FoodsBatchResponse, Provider,
    FDC_BASE_URL, FOODS_BATCH_PATH, FOODS_SEARCH_PATH, SEARCH_DATA_TYPE,
};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

// A non-success status means "no foods" to callers; other failures still propagate.
fn empty_on_api_error<T: Default>(result: Result<T, ApiConnectionError>) -> Result<T, ApiConnectionError> {
    match result {
        Err(ApiConnectionError::ApiError { status, .. }) => {
            tracing::warn!(%status, "FoodData Central returned an error status, continuing with no foods");
            Ok(T::default())
        }
        other => other,
    }
}

async fn into_api_error(response: Response) -> ApiConnectionError {
    let status = response.status();
    let error_body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read error body".to_string());
    ApiConnectionError::ApiError { status, error_body }
}

impl Provider {
    pub fn food_data_central(api_key_env_var_name: &str) -> Self {
        dotenv().ok();
        Self::FoodDataCentral {
            api_key: api_key_env_var_name.to_string(),
            base_url: FDC_BASE_URL.to_string(),
        }
    }

    /// Points the provider at a different host, e.g. a local mirror.
    pub fn with_base_url(self, url: &str) -> Self {
        match self {
            Provider::FoodDataCentral { api_key, .. } => Provider::FoodDataCentral {
                api_key,
                base_url: url.trim_end_matches('/').to_string(),
            },
        }
    }

    fn resolve(&self) -> Result<(String, &str), ApiConnectionError> {
        match self {
            Provider::FoodDataCentral {
                api_key: api_key_env_var_name,
                base_url,
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;
                Ok((actual_api_key, base_url.as_str()))
            }
        }
    }

    /// Searches branded foods for `query` and returns their FDC ids.
    pub async fn search_food_ids(&self, query: &str, page_size: u32) -> Result<Vec<u64>, ApiConnectionError> {
        let (api_key, base_url) = self.resolve()?;
        let search = FoodSearchQuery {
            query: query.to_string(),
            page_size,
            data_type: SEARCH_DATA_TYPE.to_string(),
        };

        tracing::info!(query, page_size, "searching FoodData Central");
        let response = Client::new()
            .get(format!("{}{}", base_url, FOODS_SEARCH_PATH))
            .query(&[("api_key", api_key.as_str())])
            .query(&search)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = into_api_error(response).await;
            tracing::warn!(error = %err, "food search failed");
            return Err(err);
        }

        let body = response.json::<FoodSearchResponse>().await?;
        let ids: Vec<u64> = body.foods.into_iter().map(|food| food.fdc_id).collect();
        tracing::debug!(hits = ids.len(), "food search complete");
        Ok(ids)
    }

    /// Fetches full nutrient payloads for `fdc_ids` in a single request.
    pub async fn fetch_foods(&self, fdc_ids: &[u64]) -> Result<FoodsBatchResponse, ApiConnectionError> {
        if fdc_ids.is_empty() {
            return Ok(Vec::new());
        }
        let (api_key, base_url) = self.resolve()?;
        let request = FoodsBatchRequest {
            fdc_ids: fdc_ids.to_vec(),
        };

        tracing::info!(count = fdc_ids.len(), "fetching food details");
        let response = Client::new()
            .post(format!("{}{}", base_url, FOODS_BATCH_PATH))
            .query(&[("api_key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let foods = response.json::<FoodsBatchResponse>().await?;
            Ok(foods)
        } else {
            let err = into_api_error(response).await;
            tracing::warn!(error = %err, "food fetch failed");
            Err(err)
        }
    }

    /// Search then batch fetch. Error statuses from FoodData Central yield an
    /// empty batch instead of an error.
    pub async fn search_foods(&self, query: &str, page_size: u32) -> Result<FoodsBatchResponse, ApiConnectionError> {
        let fdc_ids = empty_on_api_error(self.search_food_ids(query, page_size).await)?;
        empty_on_api_error(self.fetch_foods(&fdc_ids).await)
    }
}
