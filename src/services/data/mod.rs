mod mock;

pub use mock::MockDataSource;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub merchant: String,
    pub category: String,
    /// Signed amount; outflows are negative.
    pub amount: f64,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    pub kind: TransactionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAsset {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub price: f64,
    pub change_percent: f64,
    /// Share of the total portfolio value, in percent.
    pub allocation: f64,
}

impl PortfolioAsset {
    pub fn value(&self) -> f64 {
        self.quantity * self.price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDataPoint {
    pub month: String,
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub name: String,
    pub amount: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub total_balance: f64,
    pub previous_balance: f64,
    pub monthly_income: f64,
    pub previous_income: f64,
    pub monthly_expenses: f64,
    pub previous_expenses: f64,
    pub savings_rate: f64,
    pub previous_savings_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Payment,
    Deposit,
    Transfer,
    Investment,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    pub kind: ActivityKind,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: StatsData,
    pub revenue: Vec<RevenueDataPoint>,
    pub expenses: Vec<ExpenseCategory>,
    pub portfolio: Vec<PortfolioAsset>,
    pub transactions: Vec<Transaction>,
    pub activity: Vec<ActivityItem>,
    pub notifications: Vec<Notification>,
}

impl DashboardSnapshot {
    pub fn portfolio_value(&self) -> f64 {
        self.portfolio.iter().map(PortfolioAsset::value).sum()
    }

    pub fn unread_notifications(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }
}

pub trait DataSource {
    fn stats(&self) -> StatsData;
    fn revenue(&self) -> Vec<RevenueDataPoint>;
    fn expense_categories(&self) -> Vec<ExpenseCategory>;
    fn portfolio(&self) -> Vec<PortfolioAsset>;
    fn transactions(&self) -> Vec<Transaction>;
    fn activity(&self) -> Vec<ActivityItem>;
    fn notifications(&self) -> Vec<Notification>;

    fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            stats: self.stats(),
            revenue: self.revenue(),
            expenses: self.expense_categories(),
            portfolio: self.portfolio(),
            transactions: self.transactions(),
            activity: self.activity(),
            notifications: self.notifications(),
        }
    }
}

impl DataSource for DashboardSnapshot {
    fn stats(&self) -> StatsData {
        self.stats.clone()
    }

    fn revenue(&self) -> Vec<RevenueDataPoint> {
        self.revenue.clone()
    }

    fn expense_categories(&self) -> Vec<ExpenseCategory> {
        self.expenses.clone()
    }

    fn portfolio(&self) -> Vec<PortfolioAsset> {
        self.portfolio.clone()
    }

    fn transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    fn activity(&self) -> Vec<ActivityItem> {
        self.activity.clone()
    }

    fn notifications(&self) -> Vec<Notification> {
        self.notifications.clone()
    }

    fn snapshot(&self) -> DashboardSnapshot {
        self.clone()
    }
}
