use anyhow::{anyhow, Context, Result};
use nutri_rank::activity::calories_to_exercise;
use nutri_rank::api_connection::endpoints::Provider;
use nutri_rank::cli::{parse_args, Command};
use nutri_rank::config::AppConfig;
use nutri_rank::energy::estimate_energy;
use nutri_rank::nutrient_extractor::FoodPayload;
use nutri_rank::pipeline::rank_for_profile;
use nutri_rank::profile::{ActivityLevel, Gender, Goal, UserProfile};
use nutri_rank::report::{export_scored_csv, format_exercise, format_ranking_table, mean_calories};
use nutri_rank::scoring::top_n;
use nutri_rank::telemetry;
use nutri_rank::user_store::{JsonFileUserStore, UserRepository};
use std::path::Path;
use tokio::fs;

fn load_profile<'a>(store: &'a JsonFileUserStore, username: &str) -> Result<&'a UserProfile> {
    store
        .get(username)
        .ok_or_else(|| anyhow!("No user named '{}' in {:?}", username, store.path()))
}

fn show_profile(username: &str, profile: &UserProfile) {
    let energy = estimate_energy(profile);
    let bmi = profile.bmi();

    println!("Profile: {}", username);
    println!("  Gender:         {}", profile.gender);
    println!("  Age:            {} years", profile.age);
    println!("  Height:         {} cm", profile.height);
    println!("  Weight:         {} kg", profile.weight);
    println!("  Activity level: {}", profile.activity_level);
    println!("  Goal:           {}", profile.goal);
    println!("\nDaily energy estimates:");
    println!("  BMI: {:.1}", bmi);
    println!("  BMR: {} kcal/day", energy.bmr.round());
    println!("  TEE: {} kcal/day", energy.tee.round());
    println!("\nBurn one meal (~1/3 TEE):");
    print!("{}", format_exercise(&calories_to_exercise(energy.tee / 3.0, bmi, profile.age)));
}

async fn load_foods(config: &AppConfig, query: Option<&str>, input: Option<&Path>) -> Result<Vec<FoodPayload>> {
    if let Some(path) = input {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read food payload file '{}'", path.display()))?;
        let foods: Vec<FoodPayload> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse food payloads in '{}'", path.display()))?;
        return Ok(foods);
    }

    let query = query.ok_or_else(|| anyhow!("Either --query or --input is required"))?;
    let provider = Provider::food_data_central(&config.api_key_env_var);
    provider
        .search_foods(query, config.page_size)
        .await
        .map_err(|e| anyhow!("Food lookup failed: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = parse_args();
    let mut config = AppConfig::from_env();
    if let Some(path) = cli_args.user_db {
        config.user_db_path = path;
    }
    telemetry::init(&config.telemetry).context("Failed to initialise logging")?;

    let mut store = JsonFileUserStore::open(&config.user_db_path)
        .with_context(|| format!("Failed to open user store at {:?}", config.user_db_path))?;

    match cli_args.command {
        Command::Users => {
            for username in store.list() {
                println!("{}", username);
            }
        }
        Command::Register {
            username,
            gender,
            age,
            height,
            weight,
            activity_level,
            goal,
        } => {
            let goal: Goal = goal.parse()?;
            let profile = UserProfile {
                gender: Gender::from(gender.as_str()),
                age,
                height,
                weight,
                activity_level: ActivityLevel::from(activity_level.as_str()),
                goal,
            };
            store.register(&username, profile.clone())?;
            println!("Registered '{}'.\n", username);
            show_profile(&username, &profile);
        }
        Command::Profile { user } => {
            let profile = load_profile(&store, &user)?;
            show_profile(&user, profile);
        }
        Command::Rank {
            user,
            query,
            input,
            top,
            csv,
        } => {
            let profile = load_profile(&store, &user)?.clone();
            let foods = load_foods(&config, query.as_deref(), input.as_deref()).await?;
            let menu = rank_for_profile(&profile, &foods);

            if menu.ranked.is_empty() {
                println!("No foods found.");
                return Ok(());
            }

            if let Some(avg) = mean_calories(&menu.records) {
                println!("Average calories in this batch: {:.0} kcal. To burn that:", avg);
                print!("{}", format_exercise(&calories_to_exercise(avg, profile.bmi(), profile.age)));
                println!();
            }

            if let Some(path) = csv {
                export_scored_csv(&path, &menu.ranked)?;
                println!("Full ranking written to {}", path.display());
            }

            let label = query.unwrap_or_else(|| "input file".to_string());
            println!("Top foods for '{}' (goal: {})", label, profile.goal);
            let shown = top_n(menu.ranked, top.unwrap_or(config.top_n));
            print!("{}", format_ranking_table(&shown));
        }
    }

    Ok(())
}
