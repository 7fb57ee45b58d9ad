//! Result types for the analytics core
//!
//! Every type here is shaped for direct serialization to a response body.
//! Recoverable "not enough data" conditions carry an `error` marker field
//! instead of being raised, so the embedding API layer can pass them through
//! unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of a forecast request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastOutcome {
    /// A fitted model produced day-by-day predictions
    Forecast(ExpenseForecast),
    /// Too little history to fit a model (recoverable, not an error)
    InsufficientData(InsufficientData),
}

impl ForecastOutcome {
    /// The forecast payload, if the model was fitted
    pub fn as_forecast(&self) -> Option<&ExpenseForecast> {
        match self {
            Self::Forecast(f) => Some(f),
            Self::InsufficientData(_) => None,
        }
    }

    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData(_))
    }

    /// The outcome as a JSON mapping, ready for a response body
    pub fn to_value(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Day-by-day expense forecast with a model accuracy score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForecast {
    /// One entry per day in the horizon, ascending by date, no gaps
    pub predictions: Vec<DailyPrediction>,
    /// R-squared on the held-out partition, as a percentage rounded to 2
    /// decimals. May be negative when the model fits worse than a constant
    /// baseline.
    pub model_accuracy: f64,
}

/// Predicted spending for a single future day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub predicted_amount: f64,
}

/// Recoverable "not enough history" result for forecasting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsufficientData {
    pub error: String,
    pub required_data_points: usize,
    pub current_data_points: usize,
}

/// Outcome of a pattern analysis request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternOutcome {
    /// Full spending-pattern report
    Report(PatternReport),
    /// No transaction data to analyze (recoverable, not an error)
    NoData(NoDataAvailable),
}

impl PatternOutcome {
    /// The report payload, if there was data to analyze
    pub fn as_report(&self) -> Option<&PatternReport> {
        match self {
            Self::Report(r) => Some(r),
            Self::NoData(_) => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    /// The outcome as a JSON mapping, ready for a response body
    pub fn to_value(&self) -> crate::error::Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Recoverable "nothing to analyze" result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoDataAvailable {
    pub error: String,
}

/// Descriptive statistics over the expense history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternReport {
    pub monthly_patterns: MonthlyPatterns,
    pub daily_patterns: DailyPatterns,
    pub category_insights: CategoryInsights,
    pub unusual_expenses: UnusualExpenses,
}

/// Per-calendar-month spending aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyPatterns {
    /// Month (1-12) with the largest expense sum; ties go to the lower month
    pub highest_spending_month: u32,
    /// Month (1-12) with the smallest expense sum; ties go to the lower month
    pub lowest_spending_month: u32,
    /// Mean of the per-month mean amounts (not the overall row mean)
    pub average_monthly_expenses: f64,
}

/// Day-of-week spending aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyPatterns {
    /// Day name (Monday..Sunday) with the highest mean amount
    pub highest_spending_day: String,
    /// Mean amount per observed day, ordered Monday through Sunday.
    /// Days with no observations are omitted, not zero-filled.
    pub spending_by_day: Vec<DaySpending>,
}

/// Mean spending for one day of the week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySpending {
    pub day: String,
    pub average: f64,
}

/// Top categories by total expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryInsights {
    /// At most 3 entries, descending by total; ties go to the lower id
    pub top_spending_categories: Vec<CategorySpending>,
}

/// Total expense for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpending {
    pub category_id: i64,
    pub total_amount: f64,
}

/// Outlier transactions above the mean + 2 sigma threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualExpenses {
    /// None when the standard deviation is undefined (fewer than 2 expenses)
    pub threshold: Option<f64>,
    pub count: usize,
    /// At most 5 examples in their original relative order
    pub examples: Vec<UnusualExpense>,
}

/// A single outlier example
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualExpense {
    pub date: NaiveDate,
    pub amount: f64,
    pub category_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_wire_shape() {
        let outcome = ForecastOutcome::InsufficientData(InsufficientData {
            error: "Not enough historical data for predictions".to_string(),
            required_data_points: 30,
            current_data_points: 5,
        });

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["error"], "Not enough historical data for predictions");
        assert_eq!(json["required_data_points"], 30);
        assert_eq!(json["current_data_points"], 5);
    }

    #[test]
    fn test_forecast_wire_shape() {
        let outcome = ForecastOutcome::Forecast(ExpenseForecast {
            predictions: vec![DailyPrediction {
                date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                predicted_amount: 42.5,
            }],
            model_accuracy: 87.12,
        });

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["predictions"][0]["date"], "2026-04-01");
        assert_eq!(json["predictions"][0]["predicted_amount"], 42.5);
        assert_eq!(json["model_accuracy"], 87.12);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_outcome_roundtrip_picks_correct_variant() {
        let json = r#"{"error":"No transaction data available"}"#;
        let outcome: PatternOutcome = serde_json::from_str(json).unwrap();
        assert!(outcome.is_no_data());
    }

    #[test]
    fn test_to_value_produces_mapping() {
        let outcome = PatternOutcome::NoData(NoDataAvailable {
            error: "No transaction data available".to_string(),
        });
        let value = outcome.to_value().unwrap();
        assert!(value.is_object());
        assert_eq!(value["error"], "No transaction data available");
    }
}
