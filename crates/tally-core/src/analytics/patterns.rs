//! Pattern analyzer
//!
//! Descriptive statistics over the expense history: per-month and
//! per-day-of-week aggregates, top categories by total spend, and unusual
//! transaction detection against a mean + 2 sigma threshold.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::Transaction;

use super::features::{FeatureFrame, FeatureRow};
use super::round2;
use super::types::{
    CategoryInsights, CategorySpending, DailyPatterns, DaySpending, MonthlyPatterns,
    NoDataAvailable, PatternOutcome, PatternReport, UnusualExpense, UnusualExpenses,
};

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Computes spending-pattern reports from a transaction snapshot
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze the snapshot. Every "not enough data" condition is a
    /// recoverable outcome; this never fails.
    pub fn analyze(&self, transactions: &[Transaction]) -> PatternOutcome {
        let frame = match FeatureFrame::from_transactions(transactions) {
            Some(frame) => frame,
            None => {
                return PatternOutcome::NoData(NoDataAvailable {
                    error: "No transaction data available".to_string(),
                })
            }
        };

        let expenses: Vec<&FeatureRow> = frame.expense_rows().collect();
        if expenses.is_empty() {
            return PatternOutcome::NoData(NoDataAvailable {
                error: "No expense transactions to analyze".to_string(),
            });
        }

        let report = PatternReport {
            monthly_patterns: monthly_patterns(&expenses),
            daily_patterns: daily_patterns(&expenses),
            category_insights: category_insights(&expenses),
            unusual_expenses: unusual_expenses(&expenses),
        };

        tracing::debug!(expenses = expenses.len(), "pattern analysis complete");
        PatternOutcome::Report(report)
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn monthly_patterns(expenses: &[&FeatureRow]) -> MonthlyPatterns {
    // month -> (sum, count); BTreeMap iteration order makes the strict
    // comparisons below resolve ties toward the lower month number
    let mut by_month: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for row in expenses {
        let entry = by_month.entry(row.month).or_insert((0.0, 0));
        entry.0 += row.amount;
        entry.1 += 1;
    }

    let mut highest = (0, f64::NEG_INFINITY);
    let mut lowest = (0, f64::INFINITY);
    let mut mean_total = 0.0;
    for (&month, &(sum, count)) in &by_month {
        if sum > highest.1 {
            highest = (month, sum);
        }
        if sum < lowest.1 {
            lowest = (month, sum);
        }
        mean_total += sum / count as f64;
    }

    MonthlyPatterns {
        highest_spending_month: highest.0,
        lowest_spending_month: lowest.0,
        // Mean of the per-month means, not the overall row mean
        average_monthly_expenses: round2(mean_total / by_month.len() as f64),
    }
}

fn daily_patterns(expenses: &[&FeatureRow]) -> DailyPatterns {
    let mut by_day: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for row in expenses {
        let entry = by_day.entry(row.day_of_week).or_insert((0.0, 0));
        entry.0 += row.amount;
        entry.1 += 1;
    }

    let mut highest = (0, f64::NEG_INFINITY);
    let mut spending_by_day = Vec::with_capacity(by_day.len());
    for (&day, &(sum, count)) in &by_day {
        let average = sum / count as f64;
        if average > highest.1 {
            highest = (day, average);
        }
        spending_by_day.push(DaySpending {
            day: DAY_NAMES[day as usize].to_string(),
            average: round2(average),
        });
    }

    DailyPatterns {
        highest_spending_day: DAY_NAMES[highest.0 as usize].to_string(),
        spending_by_day,
    }
}

fn category_insights(expenses: &[&FeatureRow]) -> CategoryInsights {
    // Uncategorized expenses carry no category id and are excluded here
    let mut by_category: BTreeMap<i64, f64> = BTreeMap::new();
    for row in expenses {
        if let Some(category_id) = row.category_id {
            *by_category.entry(category_id).or_insert(0.0) += row.amount;
        }
    }

    let mut totals: Vec<(i64, f64)> = by_category.into_iter().collect();
    totals.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

    CategoryInsights {
        top_spending_categories: totals
            .into_iter()
            .take(3)
            .map(|(category_id, total)| CategorySpending {
                category_id,
                total_amount: round2(total),
            })
            .collect(),
    }
}

/// The unusual-expense cutoff: mean + 2 sample standard deviations.
/// Undefined below 2 rows, where the Bessel-corrected denominator vanishes.
pub fn unusual_threshold(amounts: &[f64]) -> Result<f64> {
    let n = amounts.len();
    if n < 2 {
        return Err(Error::InsufficientVariance {
            required: 2,
            actual: n,
        });
    }

    let mean = amounts.iter().sum::<f64>() / n as f64;
    let variance = amounts.iter().map(|&a| (a - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Ok(mean + 2.0 * variance.sqrt())
}

fn unusual_expenses(expenses: &[&FeatureRow]) -> UnusualExpenses {
    let amounts: Vec<f64> = expenses.iter().map(|r| r.amount).collect();

    match unusual_threshold(&amounts) {
        Ok(threshold) => {
            let outliers: Vec<&&FeatureRow> =
                expenses.iter().filter(|r| r.amount > threshold).collect();

            UnusualExpenses {
                threshold: Some(round2(threshold)),
                count: outliers.len(),
                // First 5 in original relative order, not sorted by amount
                examples: outliers
                    .iter()
                    .take(5)
                    .map(|row| UnusualExpense {
                        date: row.date,
                        amount: round2(row.amount),
                        category_id: row.category_id,
                    })
                    .collect(),
            }
        }
        Err(err) => {
            tracing::debug!(error = %err, "degrading unusual-expense detection");
            UnusualExpenses {
                threshold: None,
                count: 0,
                examples: vec![],
            }
        }
    }
}
