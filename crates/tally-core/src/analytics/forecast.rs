//! Expense forecaster
//!
//! Fits a random-forest regression on the historical expense features and
//! predicts an aggregate daily amount for each day of a future horizon. The
//! train/test partition and the bootstrap resamples are driven by a single
//! explicit seed, so identical input always yields identical output.
//!
//! Future-day feature vectors have every category indicator set to 0: the
//! forecast is category-agnostic by design and cannot express which category
//! spending will land in, only a daily aggregate.

use chrono::{Duration, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::models::Transaction;

use super::features::FeatureFrame;
use super::forest::ForestRegressor;
use super::round2;
use super::types::{DailyPrediction, ExpenseForecast, ForecastOutcome, InsufficientData};

/// Minimum number of expense rows needed to fit a model
pub const MIN_DATA_POINTS: usize = 30;

/// Default partition/model seed
pub const DEFAULT_SEED: u64 = 42;

const N_TREES: usize = 100;
const TEST_FRACTION: f64 = 0.2;

/// Forecasts aggregate daily expenses over a future horizon
pub struct ExpenseForecaster {
    /// Number of days to forecast (default 30)
    horizon_days: u32,
    /// Seed for the train/test shuffle and bootstrap resampling
    seed: u64,
}

impl ExpenseForecaster {
    pub fn new() -> Self {
        Self {
            horizon_days: 30,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_horizon(days: u32) -> Self {
        Self {
            horizon_days: days,
            ..Self::new()
        }
    }

    /// Override the partition/model seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Forecast the next `horizon_days` starting tomorrow
    pub fn forecast(&self, transactions: &[Transaction]) -> Result<ForecastOutcome> {
        self.forecast_from(transactions, Utc::now().date_naive())
    }

    /// Forecast relative to an explicit "today" (the first predicted day is
    /// `today + 1`)
    pub fn forecast_from(
        &self,
        transactions: &[Transaction],
        today: NaiveDate,
    ) -> Result<ForecastOutcome> {
        let frame = match FeatureFrame::from_transactions(transactions) {
            Some(frame) => frame,
            None => return Ok(Self::insufficient(0)),
        };

        let expense_count = frame.expense_rows().count();
        if expense_count < MIN_DATA_POINTS {
            tracing::debug!(
                required = MIN_DATA_POINTS,
                actual = expense_count,
                "not enough expense history to forecast"
            );
            return Ok(Self::insufficient(expense_count));
        }

        let mut xs = Vec::with_capacity(expense_count);
        let mut ys = Vec::with_capacity(expense_count);
        for row in frame.expense_rows() {
            xs.push(frame.feature_vector(row));
            ys.push(row.amount);
        }

        // Reproducible 80/20 partition: shuffle once with the fixed seed,
        // hold out the leading fifth for evaluation.
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..ys.len()).collect();
        indices.shuffle(&mut rng);
        let n_test = (ys.len() as f64 * TEST_FRACTION).ceil() as usize;
        let (test_idx, train_idx) = indices.split_at(n_test);

        let train_x: Vec<Vec<f64>> = train_idx.iter().map(|&i| xs[i].clone()).collect();
        let train_y: Vec<f64> = train_idx.iter().map(|&i| ys[i]).collect();
        let test_x: Vec<Vec<f64>> = test_idx.iter().map(|&i| xs[i].clone()).collect();
        let test_y: Vec<f64> = test_idx.iter().map(|&i| ys[i]).collect();

        let forest = ForestRegressor::fit(&train_x, &train_y, N_TREES, &mut rng)?;
        let model_accuracy = round2(forest.r_squared(&test_x, &test_y)? * 100.0);

        let mut predictions = Vec::with_capacity(self.horizon_days as usize);
        for offset in 1..=i64::from(self.horizon_days) {
            let date = today + Duration::days(offset);
            let amount = forest.predict(&frame.future_feature_vector(date));
            predictions.push(DailyPrediction {
                date,
                predicted_amount: round2(amount),
            });
        }

        tracing::debug!(
            samples = expense_count,
            horizon = self.horizon_days,
            accuracy = model_accuracy,
            "expense forecast complete"
        );

        Ok(ForecastOutcome::Forecast(ExpenseForecast {
            predictions,
            model_accuracy,
        }))
    }

    fn insufficient(actual: usize) -> ForecastOutcome {
        ForecastOutcome::InsufficientData(InsufficientData {
            error: "Not enough historical data for predictions".to_string(),
            required_data_points: MIN_DATA_POINTS,
            current_data_points: actual,
        })
    }
}

impl Default for ExpenseForecaster {
    fn default() -> Self {
        Self::new()
    }
}
