//! Analytics core - forecasts and spending-pattern insights
//!
//! Two consumers share one tabular feature representation:
//!
//! - **Expense Forecaster** - fits a regression model on historical expense
//!   transactions and produces a day-by-day forecast for a future horizon,
//!   plus an accuracy score.
//! - **Pattern Analyzer** - computes monthly/day-of-week aggregates, top
//!   categories, and unusual-transaction detection over the same features.
//!
//! Both operate on an immutable snapshot of transaction records supplied by
//! the caller per invocation; there is no shared state between calls. "Not
//! enough data" conditions are ordinary result values, never errors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::analytics::{ExpenseForecaster, PatternAnalyzer};
//!
//! let forecaster = ExpenseForecaster::new();
//! let outcome = forecaster.forecast(&transactions)?;
//!
//! let analyzer = PatternAnalyzer::new();
//! let report = analyzer.analyze(&transactions);
//! ```

pub mod features;
pub mod forecast;
pub mod forest;
pub mod patterns;
pub mod types;

pub use features::{FeatureFrame, FeatureRow};
pub use forecast::ExpenseForecaster;
pub use forest::ForestRegressor;
pub use patterns::PatternAnalyzer;
pub use types::{
    CategoryInsights, CategorySpending, DailyPatterns, DailyPrediction, DaySpending,
    ExpenseForecast, ForecastOutcome, InsufficientData, MonthlyPatterns, NoDataAvailable,
    PatternOutcome, PatternReport, UnusualExpense, UnusualExpenses,
};

/// Round to 2 decimals, matching the wire format of every reported amount
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::round2;

    #[test]
    fn test_round2() {
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(12.344), 12.34);
        assert_eq!(round2(-0.005), -0.01);
    }
}
