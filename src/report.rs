use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use crate::activity::{Activity, ExerciseEstimate};
use crate::nutrient_extractor::{FoodRecord, Nutrient};
use crate::scoring::ScoredFoodRecord;

/// Mean calories over a batch, or `None` when the batch is empty.
pub fn mean_calories(records: &[FoodRecord]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|r| r.nutrients.calories).sum();
    Some(total / records.len() as f64)
}

const SCORE_COLUMNS: [&str; 5] = [
    "Calories Score",
    "Protein Score",
    "Fat Score",
    "Carbs Score",
    "Total Score",
];

/// Writes every nutrient and score column, one row per food, best first.
pub fn write_scored_csv<W: Write>(writer: W, scored: &[ScoredFoodRecord]) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(writer);

    // Rows are written field by field; csv cannot serialize the flattened record.
    let mut header = vec!["Food", "FDC ID", "Brand"];
    header.extend(Nutrient::ALL.iter().map(|n| n.label()));
    header.extend(SCORE_COLUMNS);
    wtr.write_record(&header).context("Failed to write CSV header")?;

    for row in scored {
        let mut fields = vec![
            row.record.name.clone(),
            row.record.fdc_id.clone(),
            row.record.brand.clone(),
        ];
        fields.extend(Nutrient::ALL.iter().map(|n| row.record.nutrients.get(*n).to_string()));
        fields.extend(
            [
                row.calories_score,
                row.protein_score,
                row.fat_score,
                row.carbs_score,
                row.total_score,
            ]
            .iter()
            .map(|v| v.to_string()),
        );
        wtr.write_record(&fields).context("Failed to write scored food row")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn export_scored_csv(path: &Path, scored: &[ScoredFoodRecord]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV report at {:?}", path))?;
    write_scored_csv(file, scored)?;
    tracing::info!(path = ?path, rows = scored.len(), "wrote CSV report");
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

pub fn format_ranking_table(scored: &[ScoredFoodRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<36} {:<20} {:>8} {:>8} {:>8} {:>8} {:>7}",
        "#", "Food", "Brand", "kcal", "Prot(g)", "Fat(g)", "Carb(g)", "Score"
    );
    for (rank, row) in scored.iter().enumerate() {
        let n = &row.record.nutrients;
        let _ = writeln!(
            out,
            "{:>3}  {:<36} {:<20} {:>8.1} {:>8.1} {:>8.1} {:>8.1} {:>7.3}",
            rank + 1,
            truncate(&row.record.name, 36),
            truncate(&row.record.brand, 20),
            n.calories,
            n.protein_g,
            n.fat_g,
            n.carbs_g,
            row.total_score
        );
    }
    out
}

pub fn format_exercise(estimates: &BTreeMap<Activity, ExerciseEstimate>) -> String {
    let mut out = String::new();
    for (activity, stats) in estimates {
        let _ = writeln!(
            out,
            "  {:<9} {:>4} min ~ {} km ({} km/h)",
            activity.name(),
            stats.time_min,
            stats.distance_km,
            stats.speed_kmh
        );
    }
    out
}
