use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank foods against your daily energy needs", long_about = None)]
pub struct Cli {
    /// Override the user store location (defaults to USER_DB_PATH or user_db.json)
    #[arg(long, global = true)]
    pub user_db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered usernames
    Users,
    /// Create a new profile
    Register {
        #[arg(long)]
        username: String,
        /// male or female
        #[arg(long)]
        gender: String,
        #[arg(long)]
        age: u32,
        /// Height in centimetres
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        /// inactive, low_active, active or very_active
        #[arg(long)]
        activity_level: String,
        /// fat_loss or muscle_gain
        #[arg(long)]
        goal: String,
    },
    /// Show BMR, TEE and the exercise needed to burn one meal
    Profile {
        #[arg(short, long)]
        user: String,
    },
    /// Score and rank foods for a user
    Rank {
        #[arg(short, long)]
        user: String,
        /// Keyword to search in FoodData Central
        #[arg(short, long, conflicts_with = "input", required_unless_present = "input")]
        query: Option<String>,
        /// JSON file of food payloads to score instead of searching
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Number of foods to show
        #[arg(long)]
        top: Option<usize>,
        /// Also write the full ranking to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
