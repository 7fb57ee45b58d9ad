//! Domain models for Tally
//!
//! These records are owned by the embedding record-management layer; the
//! analytics core receives them as read-only snapshots scoped to one user.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether a transaction adds to or draws from the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded income or expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    /// Category this transaction belongs to (None = uncategorized)
    pub category_id: Option<i64>,
    /// Always positive; the direction comes from `transaction_type`
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Check the positive-amount invariant
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "transaction {} has non-positive amount {}",
                self.id, self.amount
            )));
        }
        Ok(())
    }
}

/// A user-defined spending category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A spending limit for one category over a date range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    /// Budgeted amount, always positive
    pub amount: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A savings target the user is working toward
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Target amount, always positive
    pub target_amount: f64,
    /// Amount saved so far
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn transaction(amount: f64) -> Transaction {
        Transaction {
            id: 1,
            user_id: 1,
            category_id: Some(3),
            amount,
            transaction_type: TransactionType::Expense,
            description: "Groceries".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_transaction_type_roundtrip() {
        assert_eq!(TransactionType::Expense.as_str(), "EXPENSE");
        assert_eq!(
            TransactionType::from_str("income").unwrap(),
            TransactionType::Income
        );
        assert!(TransactionType::from_str("TRANSFER").is_err());
    }

    #[test]
    fn test_transaction_type_serialization() {
        let json = serde_json::to_string(&TransactionType::Income).unwrap();
        assert_eq!(json, "\"INCOME\"");
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        assert!(transaction(25.50).validate().is_ok());
        assert!(transaction(0.0).validate().is_err());
        assert!(transaction(-10.0).validate().is_err());
        assert!(transaction(f64::NAN).validate().is_err());
    }
}
