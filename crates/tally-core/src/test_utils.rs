//! Test utilities for tally-core
//!
//! Deterministic sample-record builders used by unit and integration tests.
//! Everything here is fixed data so seeded analytics stay byte-identical
//! across runs.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use crate::models::{Budget, Category, SavingsGoal, Transaction, TransactionType};

fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

/// An expense transaction with the given amount on the given date
pub fn expense(id: i64, category_id: Option<i64>, amount: f64, date: NaiveDate) -> Transaction {
    transaction(id, category_id, amount, TransactionType::Expense, date)
}

/// An income transaction with the given amount on the given date
pub fn income(id: i64, category_id: Option<i64>, amount: f64, date: NaiveDate) -> Transaction {
    transaction(id, category_id, amount, TransactionType::Income, date)
}

fn transaction(
    id: i64,
    category_id: Option<i64>,
    amount: f64,
    transaction_type: TransactionType,
    date: NaiveDate,
) -> Transaction {
    Transaction {
        id,
        user_id: 1,
        category_id,
        amount,
        transaction_type,
        description: format!("{} #{}", transaction_type, id),
        date,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        user_id: 1,
        name: name.to_string(),
        description: String::new(),
        created_at: fixed_timestamp(),
    }
}

pub fn budget(id: i64, category_id: i64, amount: f64, start: NaiveDate, end: NaiveDate) -> Budget {
    Budget {
        id,
        user_id: 1,
        category_id,
        amount,
        start_date: start,
        end_date: end,
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

pub fn savings_goal(id: i64, target_amount: f64, current_amount: f64) -> SavingsGoal {
    SavingsGoal {
        id,
        user_id: 1,
        name: format!("Goal #{}", id),
        target_amount,
        current_amount,
        target_date: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
        created_at: fixed_timestamp(),
        updated_at: fixed_timestamp(),
    }
}

/// A varied multi-month history: `n` daily expenses across three categories
/// starting 2026-01-05, plus one income row per ten expenses. Amounts cycle
/// deterministically so a model has real structure to fit.
pub fn sample_history(n: usize) -> Vec<Transaction> {
    let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    let mut txs = Vec::with_capacity(n + n / 10);

    for i in 0..n {
        let date = start + Duration::days(i as i64);
        let category = Some((i % 3) as i64 + 1);
        let amount = 15.0 + ((i * 7) % 60) as f64 + (i % 5) as f64 * 3.5;
        txs.push(expense(i as i64 + 1, category, amount, date));
    }

    for i in 0..n / 10 {
        let date = start + Duration::days(i as i64 * 10);
        txs.push(income(10_000 + i as i64, None, 2_500.0, date));
    }

    txs
}
