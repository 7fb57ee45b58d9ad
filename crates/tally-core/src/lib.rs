//! Tally Core Library
//!
//! Analytics core for the Tally personal finance tracker:
//! - Domain models for transactions, categories, budgets, and savings goals
//! - Feature builder turning transaction history into a tabular frame
//! - Expense forecaster (seeded random-forest regression over a future horizon)
//! - Pattern analyzer (monthly/daily aggregates, top categories, outliers)
//! - Summary computations (monthly totals, budget status, goal progress)
//!
//! The record-management layer around this crate owns persistence, routing,
//! and auth; this core performs no I/O and holds no state between calls.
//! "Not enough data" conditions come back as ordinary serializable results,
//! never as errors.

pub mod analytics;
pub mod error;
pub mod models;
pub mod summary;

/// Test utilities including deterministic sample-data builders
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{
    ExpenseForecaster, FeatureFrame, ForecastOutcome, PatternAnalyzer, PatternOutcome,
};
pub use error::{Error, Result};
pub use models::{Budget, Category, SavingsGoal, Transaction, TransactionType};
pub use summary::{
    budget_status, goal_progress, monthly_summary, BudgetStatus, CategoryExpense, MonthlySummary,
};
