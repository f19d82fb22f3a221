use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use lotto649_db::models::PICK_COUNT;

use crate::display::{
    display_draws, display_frequency_chart, display_frequency_table, display_history,
    display_prediction, display_submission,
};
use crate::form::DrawForm;
use crate::session::{Session, Submission};

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Add,
    Frequency,
    Predict,
    History,
    Draws,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    match input.trim().to_lowercase().as_str() {
        "1" | "add" | "a" => Some(InteractiveCommand::Add),
        "2" | "frequency" | "freq" | "f" => Some(InteractiveCommand::Frequency),
        "3" | "predict" | "pred" | "p" => Some(InteractiveCommand::Predict),
        "4" | "history" | "hist" | "h" => Some(InteractiveCommand::History),
        "5" | "draws" | "list" | "d" => Some(InteractiveCommand::Draws),
        "6" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Lotto 6/49 Predictor ──");
    println!("  1. add        Add a new draw");
    println!("  2. frequency  Number frequency chart");
    println!("  3. predict    Generate a prediction");
    println!("  4. history    Prediction history");
    println!("  5. draws      Recorded draws");
    println!("  6. quit       Quit");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Failed to read input")?;
    if read == 0 {
        bail!("End of input");
    }
    Ok(input.trim().to_string())
}

/// Shows the previous entry in brackets; an empty answer keeps it.
fn prompt_field(msg: &str, current: &str) -> Result<String> {
    if current.is_empty() {
        return prompt(&format!("{} : ", msg));
    }
    let input = prompt(&format!("{} [{}] : ", msg, current))?;
    if input.is_empty() {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

fn fill_form(form: &mut DrawForm) -> Result<()> {
    println!("Add new draw\n");

    form.date = prompt_field("Date (YYYY-MM-DD, empty = now)", &form.date)?;
    for i in 0..PICK_COUNT {
        let label = format!("Number {} of {}", i + 1, PICK_COUNT);
        form.numbers[i] = prompt_field(&label, &form.numbers[i])?;
    }
    form.bonus = prompt_field("Bonus number", &form.bonus)?;
    Ok(())
}

fn cmd_add_interactive(session: &mut Session, form: &mut DrawForm) -> Result<()> {
    fill_form(form)?;
    let submission = session.submit(form)?;
    display_submission(&submission);
    if let Submission::Discarded(_) = submission {
        println!("Your entries are kept; choose 'add' again to correct them.");
    }
    Ok(())
}

fn cmd_frequency_interactive(session: &Session) -> Result<()> {
    let config = session.config();
    println!("{} draws recorded", session.draw_count()?);
    display_frequency_chart(session.frequency(), config.chart_width, config.chart_height);
    display_frequency_table(session.frequency());
    Ok(())
}

fn cmd_predict_interactive(session: &mut Session) -> Result<()> {
    let record = session.predict()?;
    display_prediction(&record);
    Ok(())
}

pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("Welcome to the Lotto 6/49 Predictor!");
    let mut form = DrawForm::default();

    loop {
        display_menu();
        if let Some(record) = session.current_prediction() {
            println!("Last prediction: {}", record.joined());
        }

        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break,
        };

        if input.is_empty() {
            continue;
        }

        let result = match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Goodbye!");
                break;
            }
            Some(InteractiveCommand::Add) => cmd_add_interactive(session, &mut form),
            Some(InteractiveCommand::Frequency) => cmd_frequency_interactive(session),
            Some(InteractiveCommand::Predict) => cmd_predict_interactive(session),
            Some(InteractiveCommand::History) => {
                display_history(session.history());
                Ok(())
            }
            Some(InteractiveCommand::Draws) => session.draws().map(|draws| display_draws(&draws)),
            None => {
                println!("Unknown command: '{}'. Type a number (1-6) or a command name.", input);
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Error: {e:#}");
        }
    }

    Ok(())
}
