use comfy_table::{Table, ContentArrangement, presets::UTF8_FULL, Cell, Color};
use textplots::{Chart, Plot, Shape};

use lotto649_db::models::{Draw, FrequencyEntry, PredictionRecord, join_numbers};

use crate::session::Submission;

const HISTORY_DATE_FORMAT: &str = "%b %d, %Y %H:%M";

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("No draws recorded yet.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Date", "Numbers", "Bonus"]);

    for (i, draw) in draws.iter().enumerate() {
        let mut sorted = draw.numbers;
        sorted.sort();

        let numbers_str = sorted
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");

        table.add_row(vec![
            &(i + 1).to_string(),
            &draw.date.format("%Y-%m-%d %H:%M").to_string(),
            &numbers_str,
            &draw.bonus.to_string(),
        ]);
    }

    println!("{table}");
}

pub fn display_submission(submission: &Submission) {
    match submission {
        Submission::Accepted(draw) => {
            println!("Draw added: {} (bonus {})", join_numbers(&draw.numbers), draw.bonus);
        }
        Submission::Discarded(reason) => {
            println!("Draw not added: {reason}");
        }
    }
}

/// Line chart of count per number, x axis 1..49.
pub fn display_frequency_chart(frequency: &[FrequencyEntry], width: u32, height: u32) {
    println!("\n📊 Number frequency\n");

    let points: Vec<(f32, f32)> = frequency
        .iter()
        .map(|f| (f.number as f32, f.count as f32))
        .collect();
    if points.is_empty() {
        println!("  (No data to plot)");
        return;
    }

    let y_max = frequency.iter().map(|f| f.count).max().unwrap_or(0).max(1) as f32;
    let x_max = frequency.iter().map(|f| f.number).max().unwrap_or(1) as f32;

    // textplots panics below these sizes
    let width = width.max(32);
    let height = height.max(3);

    Chart::new_with_y_range(width, height, 1.0, x_max, 0.0, y_max)
        .lineplot(&Shape::Lines(&points))
        .display();
}

pub fn display_frequency_table(frequency: &[FrequencyEntry]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Number", "Count", "Weight"]);

    let mut sorted = frequency.to_vec();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then(a.number.cmp(&b.number)));

    let top = sorted.first().map(|f| f.count).unwrap_or(0);
    for entry in &sorted {
        let color = if top > 0 && entry.count == top {
            Color::Green
        } else if entry.count == 0 {
            Color::DarkGrey
        } else {
            Color::White
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", entry.number)),
            Cell::new(entry.count.to_string()).fg(color),
            Cell::new(entry.weight().to_string()),
        ]);
    }
    println!("{table}");
}

pub fn display_prediction(record: &PredictionRecord) {
    println!("\n🎲 Predicted numbers: {}", record.joined());
}

pub fn format_history_entry(record: &PredictionRecord) -> String {
    format!("{} — {}", record.date.format(HISTORY_DATE_FORMAT), record.joined())
}

pub fn display_history(history: &[PredictionRecord]) {
    if history.is_empty() {
        println!("No predictions yet.");
        return;
    }

    println!("\n📜 Prediction history\n");
    for record in history {
        println!("  {}", format_history_entry(record));
    }
}
