mod analysis;
mod config;
mod display;
mod form;
mod interactive;
mod session;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::PredictorConfig;
use crate::display::{display_frequency_chart, display_frequency_table, display_history};
use crate::form::DrawForm;
use crate::session::{Session, Submission};

#[derive(Parser)]
#[command(name = "lotto649", about = "Lotto 6/49 draw tracker and weighted predictor")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible predictions (overrides the configuration)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive session (default)
    Interactive,

    /// Record draws given on the command line and print predictions
    Predict {
        /// A draw as "[YYYY-MM-DD] n n n n n n / bonus", repeatable
        #[arg(short, long = "draw")]
        draws: Vec<String>,

        /// Number of predictions to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,

        /// Also plot the frequency curve
        #[arg(long)]
        chart: bool,
    },

    /// Write the default configuration to a file
    Config {
        #[arg(short, long, default_value = "lotto649.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PredictorConfig::load(path)?,
        None => PredictorConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let mut session = Session::new(config)?;
            interactive::run_interactive(&mut session)
        }
        Command::Predict { draws, count, chart } => cmd_predict(config, &draws, count, chart),
        Command::Config { output } => cmd_config(&output),
    }
}

fn cmd_predict(config: PredictorConfig, lines: &[String], count: usize, chart: bool) -> Result<()> {
    let mut session = Session::new(config)?;

    for line in lines {
        let mut form = DrawForm::from_line(line);
        if let Submission::Discarded(reason) = session.submit(&mut form)? {
            println!("Skipped '{}': {}", line, reason);
        }
    }
    println!("{} draws recorded", session.draw_count()?);

    if chart {
        let config = session.config();
        display_frequency_chart(session.frequency(), config.chart_width, config.chart_height);
    }
    display_frequency_table(session.frequency());

    for _ in 0..count {
        session.predict()?;
    }
    display_history(session.history());

    Ok(())
}

fn cmd_config(output: &Path) -> Result<()> {
    PredictorConfig::default().save(output)?;
    println!("Default configuration written to {}", output.display());
    Ok(())
}
