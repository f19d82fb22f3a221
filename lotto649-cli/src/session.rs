use anyhow::Result;
use chrono::Local;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use lotto649_db::db;
use lotto649_db::models::{Draw, FrequencyEntry, PredictionRecord};
use lotto649_db::rusqlite::Connection;

use crate::analysis::compute_frequency;
use crate::analysis::sampler;
use crate::config::PredictorConfig;
use crate::form::DrawForm;

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Accepted(Draw),
    /// The form was left untouched; the reason is for display only.
    Discarded(String),
}

/// All application state: the draw store, its frequency snapshot and the
/// predictions generated so far. Nothing outlives the session.
pub struct Session {
    conn: Connection,
    config: PredictorConfig,
    frequency: Vec<FrequencyEntry>,
    prediction: Option<PredictionRecord>,
    history: Vec<PredictionRecord>,
    rng: StdRng,
}

impl Session {
    pub fn new(config: PredictorConfig) -> Result<Self> {
        let conn = db::open_in_memory()?;
        db::migrate(&conn)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            conn,
            config,
            frequency: compute_frequency(&[]),
            prediction: None,
            history: Vec::new(),
            rng,
        })
    }

    /// Records the draw described by `form` and clears it. An incomplete or
    /// invalid form is discarded and keeps its entries.
    pub fn submit(&mut self, form: &mut DrawForm) -> Result<Submission> {
        let now = Local::now().naive_local();
        let draw = match form.to_draw(now, self.config.reject_duplicates) {
            Ok(draw) => draw,
            Err(e) => {
                warn!("Draw discarded: {e:#}");
                return Ok(Submission::Discarded(format!("{e:#}")));
            }
        };

        let id = db::insert_draw(&self.conn, &draw)?;
        self.refresh_frequency()?;
        form.clear();

        info!("Draw #{id} recorded: {:?} bonus {}", draw.numbers, draw.bonus);
        Ok(Submission::Accepted(draw))
    }

    /// Rebuilds the frequency snapshot from the whole store.
    pub fn refresh_frequency(&mut self) -> Result<()> {
        let draws = db::fetch_draws_numbers(&self.conn)?;
        self.frequency = compute_frequency(&draws);
        debug!("Frequency recomputed over {} draws", draws.len());
        Ok(())
    }

    /// Samples a new prediction and puts it at the top of the history.
    pub fn predict(&mut self) -> Result<PredictionRecord> {
        let prediction = sampler::predict(&self.frequency, self.config.max_attempts, &mut self.rng)?;
        let record = PredictionRecord {
            date: Local::now(),
            prediction,
        };

        self.history.insert(0, record.clone());
        self.prediction = Some(record.clone());
        info!("Prediction generated: {}", record.joined());
        Ok(record)
    }

    pub fn frequency(&self) -> &[FrequencyEntry] {
        &self.frequency
    }

    pub fn draws(&self) -> Result<Vec<Draw>> {
        db::fetch_draws(&self.conn)
    }

    pub fn draw_count(&self) -> Result<u32> {
        db::count_draws(&self.conn)
    }

    pub fn current_prediction(&self) -> Option<&PredictionRecord> {
        self.prediction.as_ref()
    }

    /// Newest first.
    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }
}
