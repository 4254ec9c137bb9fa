use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use vitalcalc_core::format::{format_timestamp, one_decimal};
use vitalcalc_core::*;

#[derive(Parser)]
#[command(name = "vitalcalc")]
#[command(about = "Calorie and BMI calculator with saved history", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate calories from macronutrient grams
    Calories {
        /// Carbohydrates in grams
        #[arg(long, allow_hyphen_values = true)]
        carbs: Option<String>,

        /// Protein in grams
        #[arg(long, allow_hyphen_values = true)]
        protein: Option<String>,

        /// Fats in grams
        #[arg(long, allow_hyphen_values = true)]
        fats: Option<String>,
    },

    /// Calculate Body Mass Index
    Bmi {
        /// Body weight (prompted for if omitted)
        #[arg(long, allow_hyphen_values = true)]
        weight: Option<String>,

        /// Weight unit (kg, lbs)
        #[arg(long)]
        weight_unit: Option<String>,

        /// Height (prompted for if omitted)
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,

        /// Height unit (m, ft, cm)
        #[arg(long)]
        height_unit: Option<String>,
    },

    /// Show saved results, newest first (default)
    History {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete all saved results
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Export saved results to a CSV file
    Export {
        /// Destination file
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    vitalcalc_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    let store = HistoryStore::new(FileSlotStorage::new(&data_dir), config.store_config());
    let mut engine = Engine::new(store);

    match cli.command {
        Some(Commands::Calories {
            carbs,
            protein,
            fats,
        }) => {
            let input =
                CalorieInput::from_raw(carbs.as_deref(), protein.as_deref(), fats.as_deref());
            cmd_calories(&mut engine, &input)
        }
        Some(Commands::Bmi {
            weight,
            weight_unit,
            height,
            height_unit,
        }) => {
            let weight_unit = match weight_unit {
                Some(unit) => unit.parse()?,
                None => config.units.weight,
            };
            let height_unit = match height_unit {
                Some(unit) => unit.parse()?,
                None => config.units.height,
            };
            cmd_bmi(&mut engine, weight, weight_unit, height, height_unit)
        }
        Some(Commands::History { json }) => cmd_history(&engine, json),
        Some(Commands::Clear { yes }) => cmd_clear(&mut engine, yes),
        Some(Commands::Export { path }) => cmd_export(&engine, &path),
        None => cmd_history(&engine, false),
    }
}

fn cmd_calories<S: SlotStorage>(engine: &mut Engine<S>, input: &CalorieInput) -> Result<()> {
    let result = match engine.calculate_calories(input) {
        Ok(result) => result,
        Err(Error::Validation(e)) => return Err(report_invalid(e)),
        Err(e) => return Err(e),
    };

    display_calories(&result);
    println!("\n✓ Calories calculated successfully!");
    Ok(())
}

fn cmd_bmi<S: SlotStorage>(
    engine: &mut Engine<S>,
    weight: Option<String>,
    weight_unit: WeightUnit,
    height: Option<String>,
    height_unit: HeightUnit,
) -> Result<()> {
    let weight = match weight {
        Some(w) => Some(w),
        None => prompt(weight_unit.placeholder())?,
    };
    let height = match height {
        Some(h) => Some(h),
        None => prompt(height_unit.placeholder())?,
    };

    let input = BmiInput::from_raw(weight.as_deref(), weight_unit, height.as_deref(), height_unit)
        .map_err(report_invalid)?;

    let result = match engine.calculate_bmi(&input) {
        Ok(result) => result,
        Err(Error::Validation(e)) => return Err(report_invalid(e)),
        Err(e) => return Err(e),
    };

    display_bmi(&result);
    println!("\n✓ BMI calculated: {}", result.category);
    Ok(())
}

fn cmd_history<S: SlotStorage>(engine: &Engine<S>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&engine.history())?);
        return Ok(());
    }

    if engine.store().is_empty() {
        println!("No saved results yet");
        return Ok(());
    }

    let entries = engine.history();
    for entry in &entries {
        let when = format_timestamp(entry.timestamp());
        match entry {
            HistoryEntry::Calorie(r) => println!(
                "{}  {} cal  |  {}g carbs  {}g protein  {}g fats",
                when,
                one_decimal(r.total_calories),
                r.carbs,
                r.protein,
                r.fats
            ),
            HistoryEntry::Bmi(r) => println!(
                "{}  BMI {}  {}  |  {}{} / {}{}",
                when,
                one_decimal(r.bmi),
                r.category,
                r.weight,
                r.weight_unit,
                r.height,
                r.height_unit
            ),
        }
    }

    Ok(())
}

fn cmd_clear<S: SlotStorage>(engine: &mut Engine<S>, yes: bool) -> Result<()> {
    if !yes && !confirm_clear()? {
        println!("History kept.");
        return Ok(());
    }

    engine.clear_history()?;
    println!("✓ History cleared successfully");
    Ok(())
}

fn cmd_export<S: SlotStorage>(engine: &Engine<S>, path: &std::path::Path) -> Result<()> {
    let count = export_csv(&engine.history(), path)?;
    println!("✓ Exported {} results", count);
    println!("  CSV: {}", path.display());
    Ok(())
}

fn display_calories(result: &CalorieResult) {
    let pct = result.percentages();

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  CALORIES");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Total:    {} cal", one_decimal(result.total_calories));
    println!(
        "  Carbs:    {} cal ({}%)",
        one_decimal(result.carb_calories),
        one_decimal(pct.carbs)
    );
    println!(
        "  Protein:  {} cal ({}%)",
        one_decimal(result.protein_calories),
        one_decimal(pct.protein)
    );
    println!(
        "  Fats:     {} cal ({}%)",
        one_decimal(result.fat_calories),
        one_decimal(pct.fats)
    );

    let slices = calorie_chart(result);
    if !slices.is_empty() {
        println!();
        for slice in &slices {
            println!(
                "  {:<14} {:<40} {}%",
                slice.label,
                bar(slice.percentage),
                one_decimal(slice.percentage)
            );
        }
    }
}

fn display_bmi(result: &BmiResult) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  BMI");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BMI:       {}", one_decimal(result.bmi));
    println!("  Category:  {}", result.category);
    println!("  Scale:     {}", category_scale(result.category));
    println!(
        "  From:      {}{} / {}{}",
        result.weight, result.weight_unit, result.height, result.height_unit
    );
}

/// All categories in ascending order, the current one bracketed
fn category_scale(current: BmiCategory) -> String {
    [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ]
    .iter()
    .map(|&category| {
        if category == current {
            format!("[{}]", category.slug())
        } else {
            category.slug().to_string()
        }
    })
    .collect::<Vec<_>>()
    .join(" | ")
}

/// Horizontal bar, 40 columns at 100%
fn bar(percentage: f64) -> String {
    let width = ((percentage / 100.0) * 40.0).round().clamp(0.0, 40.0) as usize;
    "█".repeat(width)
}

fn report_invalid(e: ValidationError) -> Error {
    eprintln!("✗ {}", e);
    Error::Validation(e)
}

fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let trimmed = input.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

fn confirm_clear() -> Result<bool> {
    println!("Are you sure you want to clear all saved results? This action cannot be undone.");
    print!("Type 'y' + Enter to confirm > ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
