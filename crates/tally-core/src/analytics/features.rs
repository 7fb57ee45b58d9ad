//! Feature builder - tabular representation of a transaction history
//!
//! Converts a collection of transaction records into one row per record with
//! calendar features (month, ISO day of week, day of month) and one 0/1
//! indicator column per distinct category seen in the input. The column set
//! is data-dependent: categories absent from the input never get a column,
//! and at prediction time such columns default to 0 by construction.

use chrono::{Datelike, NaiveDate};

use crate::models::{Transaction, TransactionType};

/// One derived row, carrying the calendar features plus the fields the
/// downstream consumers need from the source record.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    /// Calendar month, 1-12
    pub month: u32,
    /// ISO weekday, 0-6 with Monday = 0
    pub day_of_week: u32,
    /// Day of month, 1-31
    pub day_of_month: u32,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub date: NaiveDate,
}

impl FeatureRow {
    fn from_transaction(tx: &Transaction) -> Self {
        Self {
            month: tx.date.month(),
            day_of_week: tx.date.weekday().num_days_from_monday(),
            day_of_month: tx.date.day(),
            category_id: tx.category_id,
            amount: tx.amount,
            transaction_type: tx.transaction_type,
            date: tx.date,
        }
    }

    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// Ephemeral feature table, built fresh per analytics request
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    rows: Vec<FeatureRow>,
    /// Distinct category ids present in the input, ascending. Each one is an
    /// indicator column in the feature vectors.
    category_columns: Vec<i64>,
}

impl FeatureFrame {
    /// Build the feature table. `None` is the NoData terminal value for an
    /// empty input; downstream consumers handle it explicitly.
    pub fn from_transactions(transactions: &[Transaction]) -> Option<Self> {
        if transactions.is_empty() {
            return None;
        }

        let rows: Vec<FeatureRow> = transactions.iter().map(FeatureRow::from_transaction).collect();

        // Indicator columns come from the whole input, income rows included,
        // so expense-only consumers still see a stable column set.
        let mut category_columns: Vec<i64> = rows.iter().filter_map(|r| r.category_id).collect();
        category_columns.sort_unstable();
        category_columns.dedup();

        Some(Self {
            rows,
            category_columns,
        })
    }

    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    pub fn category_columns(&self) -> &[i64] {
        &self.category_columns
    }

    /// Rows of EXPENSE type, in input order
    pub fn expense_rows(&self) -> impl Iterator<Item = &FeatureRow> {
        self.rows.iter().filter(|r| r.is_expense())
    }

    /// Feature vector for a historical row: the three calendar features
    /// followed by one indicator per category column, ascending by id.
    pub fn feature_vector(&self, row: &FeatureRow) -> Vec<f64> {
        let mut v = Vec::with_capacity(3 + self.category_columns.len());
        v.push(row.month as f64);
        v.push(row.day_of_week as f64);
        v.push(row.day_of_month as f64);
        for &column in &self.category_columns {
            v.push(if row.category_id == Some(column) { 1.0 } else { 0.0 });
        }
        v
    }

    /// Feature vector for a future date. All category indicators are 0:
    /// forecasts are category-agnostic by design, and a category unseen in
    /// the input has no column to set in the first place.
    pub fn future_feature_vector(&self, date: NaiveDate) -> Vec<f64> {
        let mut v = Vec::with_capacity(3 + self.category_columns.len());
        v.push(date.month() as f64);
        v.push(date.weekday().num_days_from_monday() as f64);
        v.push(date.day() as f64);
        v.resize(3 + self.category_columns.len(), 0.0);
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income};

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(FeatureFrame::from_transactions(&[]).is_none());
    }

    #[test]
    fn test_calendar_features() {
        // 2026-03-02 is a Monday
        let txs = vec![expense(1, Some(7), 20.0, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())];
        let frame = FeatureFrame::from_transactions(&txs).unwrap();

        let row = &frame.rows()[0];
        assert_eq!(row.month, 3);
        assert_eq!(row.day_of_week, 0);
        assert_eq!(row.day_of_month, 2);

        // Sunday maps to 6
        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();
        assert_eq!(sunday.weekday().num_days_from_monday(), 6);
    }

    #[test]
    fn test_category_columns_are_sorted_and_deduped() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let txs = vec![
            expense(1, Some(9), 10.0, date),
            expense(2, Some(2), 10.0, date),
            expense(3, Some(9), 10.0, date),
            expense(4, None, 10.0, date),
            income(5, Some(4), 100.0, date),
        ];
        let frame = FeatureFrame::from_transactions(&txs).unwrap();

        // Income-only categories still get a column; None never does
        assert_eq!(frame.category_columns(), &[2, 4, 9]);
    }

    #[test]
    fn test_feature_vector_indicators() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 15).unwrap();
        let txs = vec![
            expense(1, Some(2), 10.0, date),
            expense(2, Some(5), 10.0, date),
            expense(3, None, 10.0, date),
        ];
        let frame = FeatureFrame::from_transactions(&txs).unwrap();

        let v = frame.feature_vector(&frame.rows()[1]);
        assert_eq!(v, vec![5.0, 4.0, 15.0, 0.0, 1.0]); // Friday, category 5

        // Uncategorized row gets all-zero indicators
        let v = frame.feature_vector(&frame.rows()[2]);
        assert_eq!(&v[3..], &[0.0, 0.0]);
    }

    #[test]
    fn test_future_vector_zero_fills_categories() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 15).unwrap();
        let txs = vec![expense(1, Some(2), 10.0, date), expense(2, Some(5), 10.0, date)];
        let frame = FeatureFrame::from_transactions(&txs).unwrap();

        let v = frame.future_feature_vector(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(v, vec![6.0, 0.0, 1.0, 0.0, 0.0]); // 2026-06-01 is a Monday
    }
}
