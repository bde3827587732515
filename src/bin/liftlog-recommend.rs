// ABOUTME: Offline CLI that runs the recommendation engine on a single set given as arguments
// ABOUTME: Prints the RPE/weight table as text or JSON without touching the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftlog Contributors

//! # Liftlog Recommend
//!
//! ```text
//! liftlog-recommend --reps 5 --weight 100 --rpe 8 --target-reps 3
//! liftlog-recommend --reps 8 --weight -10 --rpe 9 --recorded-bodyweight 82 \
//!     --current-bodyweight 80 --uses-bodyweight --json
//! ```

use std::io;

use anyhow::Result;
use clap::Parser;
use liftlog::intelligence::{recommend, RecommendationRows};
use liftlog::models::{ExerciseProfile, Profile, SetRecord};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "liftlog-recommend")]
#[command(about = "Suggest next-set weights from one logged set")]
pub struct Args {
    /// Reps performed in the logged set
    #[arg(long)]
    reps: u32,

    /// External weight of the logged set in kg (negative = assistance)
    #[arg(long, allow_hyphen_values = true)]
    weight: f64,

    /// RPE of the logged set
    #[arg(long, allow_hyphen_values = true)]
    rpe: f64,

    /// Bodyweight captured with the logged set
    #[arg(long, allow_hyphen_values = true)]
    recorded_bodyweight: Option<f64>,

    /// Bodyweight to plan the next set with
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    current_bodyweight: f64,

    /// The exercise moves the lifter's bodyweight (dips, pull-ups)
    #[arg(long)]
    uses_bodyweight: bool,

    /// Reps to recommend loads for; defaults to --reps
    #[arg(long)]
    target_reps: Option<u32>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl Args {
    fn set_record(&self) -> SetRecord {
        let record = SetRecord::new(self.reps, self.weight, self.rpe);
        match self.recorded_bodyweight {
            Some(bodyweight) => record.with_recorded_bodyweight(bodyweight),
            None => record,
        }
    }

    fn exercise_profile(&self) -> ExerciseProfile {
        if self.uses_bodyweight {
            ExerciseProfile::BODYWEIGHT_ASSISTED
        } else {
            ExerciseProfile::EXTERNAL_LOAD
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let history = args.set_record();
    let target_reps = args.target_reps.unwrap_or(args.reps);

    let rows = recommend(
        Some(&history),
        &Profile::new(args.current_bodyweight),
        args.exercise_profile(),
        target_reps,
    )?;

    let output = if args.json {
        render_json(rows, target_reps)?
    } else {
        render_table(rows, target_reps)
    };
    println!("{output}");

    Ok(())
}

fn render_json(rows: RecommendationRows, target_reps: u32) -> Result<String> {
    let estimate = rows.estimate();
    let rows: Vec<_> = rows.collect();
    Ok(serde_json::to_string_pretty(&json!({
        "target_reps": target_reps,
        "estimate": estimate,
        "rows": rows,
    }))?)
}

fn render_table(rows: RecommendationRows, target_reps: u32) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 3);
    if let Some(estimate) = rows.estimate() {
        lines.push(format!(
            "Estimated 1RM: {:.2} kg ({:.1} effective reps)",
            estimate.one_rep_max, estimate.effective_reps
        ));
    }
    lines.push(format!("Target: {target_reps} reps"));
    lines.push(format!("{:>5}  {:>10}", "RPE", "Weight"));
    lines.extend(
        rows.map(|row| format!("{:>5.1}  {:>10.2}", row.target_rpe, row.recommended_weight)),
    );
    lines.join("\n")
}
