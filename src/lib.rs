pub mod activity;
pub mod api_connection;
pub mod cli;
pub mod config;
pub mod energy;
pub mod nutrient_extractor;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod scoring;
pub mod telemetry;
pub mod user_store;
