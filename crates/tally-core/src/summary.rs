//! Summary computations consumed by the record-management layer
//!
//! The small set of derived fields the CRUD side reads back from this core:
//! monthly income/expense totals with a per-category breakdown, budget
//! spent/remaining amounts, and savings-goal progress.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::analytics::round2;
use crate::models::{Budget, Category, SavingsGoal, Transaction, TransactionType};

/// Income/expense totals for one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub total_income: f64,
    pub total_expenses: f64,
    /// Per-category expense totals, ascending by category id. Categories
    /// with no expenses that month are omitted.
    pub by_category: Vec<CategoryExpense>,
}

impl MonthlySummary {
    /// Savings rate as a percentage of income, rounded to 2 decimals.
    /// None when the month has no income.
    pub fn savings_rate(&self) -> Option<f64> {
        if self.total_income > 0.0 {
            Some(round2(
                (self.total_income - self.total_expenses) / self.total_income * 100.0,
            ))
        } else {
            None
        }
    }
}

/// Expense total for one named category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category: String,
    pub amount: f64,
}

/// Spent and remaining amounts for one budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub spent_amount: f64,
    /// May go negative when the budget is exceeded
    pub remaining_amount: f64,
}

/// Totals for the given calendar month. The input snapshot is already
/// scoped to one user, so no user filtering happens here.
pub fn monthly_summary(
    transactions: &[Transaction],
    categories: &[Category],
    year: i32,
    month: u32,
) -> MonthlySummary {
    let in_month: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.date.year() == year && tx.date.month() == month)
        .collect();

    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    for tx in &in_month {
        match tx.transaction_type {
            TransactionType::Income => total_income += tx.amount,
            TransactionType::Expense => total_expenses += tx.amount,
        }
    }

    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by_key(|c| c.id);

    let mut by_category = Vec::new();
    for category in sorted {
        let amount: f64 = in_month
            .iter()
            .filter(|tx| {
                tx.transaction_type == TransactionType::Expense
                    && tx.category_id == Some(category.id)
            })
            .map(|tx| tx.amount)
            .sum();
        if amount > 0.0 {
            by_category.push(CategoryExpense {
                category: category.name.clone(),
                amount,
            });
        }
    }

    MonthlySummary {
        total_income,
        total_expenses,
        by_category,
    }
}

/// Spent/remaining for a budget: expenses in the budget's category within
/// its inclusive date range.
pub fn budget_status(budget: &Budget, transactions: &[Transaction]) -> BudgetStatus {
    let spent_amount: f64 = transactions
        .iter()
        .filter(|tx| {
            tx.transaction_type == TransactionType::Expense
                && tx.category_id == Some(budget.category_id)
                && tx.date >= budget.start_date
                && tx.date <= budget.end_date
        })
        .map(|tx| tx.amount)
        .sum();

    BudgetStatus {
        spent_amount,
        remaining_amount: budget.amount - spent_amount,
    }
}

/// Goal completion as a percentage rounded to 2 decimals. None when the
/// target is not positive.
pub fn goal_progress(goal: &SavingsGoal) -> Option<f64> {
    if goal.target_amount > 0.0 {
        Some(round2(goal.current_amount / goal.target_amount * 100.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{budget, category, expense, income, savings_goal};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_monthly_summary_totals() {
        let txs = vec![
            income(1, None, 3000.0, date(2026, 3, 1)),
            expense(2, Some(1), 120.0, date(2026, 3, 5)),
            expense(3, Some(2), 80.0, date(2026, 3, 20)),
            // Outside the requested month
            expense(4, Some(1), 999.0, date(2026, 2, 27)),
        ];
        let cats = vec![category(1, "Groceries"), category(2, "Transport")];

        let summary = monthly_summary(&txs, &cats, 2026, 3);
        assert_eq!(summary.total_income, 3000.0);
        assert_eq!(summary.total_expenses, 200.0);
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.by_category[0].category, "Groceries");
        assert_eq!(summary.by_category[0].amount, 120.0);
        assert_eq!(summary.savings_rate(), Some(93.33));
    }

    #[test]
    fn test_monthly_summary_omits_empty_categories_and_no_income() {
        let txs = vec![expense(1, Some(2), 50.0, date(2026, 3, 5))];
        let cats = vec![category(1, "Groceries"), category(2, "Transport")];

        let summary = monthly_summary(&txs, &cats, 2026, 3);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].category, "Transport");
        assert_eq!(summary.savings_rate(), None);
    }

    #[test]
    fn test_budget_status() {
        let b = budget(1, 3, 500.0, date(2026, 3, 1), date(2026, 3, 31));
        let txs = vec![
            expense(1, Some(3), 150.0, date(2026, 3, 10)),
            expense(2, Some(3), 100.0, date(2026, 3, 31)), // inclusive end
            expense(3, Some(3), 75.0, date(2026, 4, 1)),   // outside range
            expense(4, Some(9), 60.0, date(2026, 3, 15)),  // other category
            income(5, Some(3), 40.0, date(2026, 3, 12)),   // income ignored
        ];

        let status = budget_status(&b, &txs);
        assert_eq!(status.spent_amount, 250.0);
        assert_eq!(status.remaining_amount, 250.0);
    }

    #[test]
    fn test_budget_can_go_negative() {
        let b = budget(1, 3, 100.0, date(2026, 3, 1), date(2026, 3, 31));
        let txs = vec![expense(1, Some(3), 180.0, date(2026, 3, 10))];

        let status = budget_status(&b, &txs);
        assert_eq!(status.remaining_amount, -80.0);
    }

    #[test]
    fn test_goal_progress() {
        assert_eq!(goal_progress(&savings_goal(1, 1000.0, 250.0)), Some(25.0));
        assert_eq!(goal_progress(&savings_goal(2, 300.0, 100.0)), Some(33.33));
        assert_eq!(goal_progress(&savings_goal(3, 0.0, 100.0)), None);
    }
}
