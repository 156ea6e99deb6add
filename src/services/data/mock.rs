use super::{
    ActivityItem, ActivityKind, DataSource, ExpenseCategory, Notification, NotificationKind,
    PortfolioAsset, RevenueDataPoint, StatsData, Transaction, TransactionKind, TransactionStatus,
};
use crate::format::{format_date, DateFormat, MonthStyle};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

const SEASONALITY: [f64; 12] = [
    0.0, 1_800.0, -900.0, 2_600.0, 1_200.0, -400.0, 3_100.0, 900.0, -1_500.0, 2_200.0, 4_100.0,
    5_200.0,
];

const EXPENSES: [(&str, f64); 6] = [
    ("Housing", 2_450.0),
    ("Food & Dining", 1_180.0),
    ("Transportation", 640.0),
    ("Utilities", 420.0),
    ("Entertainment", 380.0),
    ("Healthcare", 310.0),
];

const HOLDINGS: [(&str, &str, f64, f64, f64); 6] = [
    ("AAPL", "Apple Inc.", 50.0, 189.84, 1.2),
    ("MSFT", "Microsoft Corp.", 30.0, 378.91, 0.8),
    ("NVDA", "NVIDIA Corp.", 25.0, 485.09, 3.4),
    ("VOO", "Vanguard S&P 500 ETF", 40.0, 432.17, -0.3),
    ("BTC", "Bitcoin", 0.85, 43_250.0, -2.1),
    ("BND", "Vanguard Total Bond ETF", 60.0, 72.45, 0.1),
];

/// Deterministic fixture data laid out relative to an anchor instant, so
/// relative timestamps read naturally ("12 minutes ago", "Yesterday").
#[derive(Debug, Clone, Copy)]
pub struct MockDataSource {
    anchor: DateTime<Utc>,
}

impl MockDataSource {
    pub fn new(anchor: DateTime<Utc>) -> Self {
        Self { anchor }
    }

    fn ago(&self, minutes: i64) -> DateTime<Utc> {
        self.anchor - Duration::minutes(minutes)
    }
}

impl DataSource for MockDataSource {
    fn stats(&self) -> StatsData {
        let monthly_income = 12_450.0;
        let previous_income = 11_800.0;
        let monthly_expenses: f64 = EXPENSES.iter().map(|(_, amount)| amount).sum();
        let previous_expenses = 5_720.0;

        StatsData {
            total_balance: 124_563.82,
            previous_balance: 118_240.10,
            monthly_income,
            previous_income,
            monthly_expenses,
            previous_expenses,
            savings_rate: savings_rate(monthly_income, monthly_expenses),
            previous_savings_rate: savings_rate(previous_income, previous_expenses),
        }
    }

    fn revenue(&self) -> Vec<RevenueDataPoint> {
        let label = DateFormat {
            month: Some(MonthStyle::Short),
            day: None,
            year: None,
        };

        (0..12u32)
            .filter_map(|step| {
                let month = month_start(self.anchor, 11 - step)?;
                let revenue = 42_000.0 + 2_350.0 * step as f64 + SEASONALITY[step as usize];
                let expenses = (revenue * (0.58 + 0.01 * (step % 4) as f64)).round();
                Some(RevenueDataPoint {
                    month: format_date(&month, Some(label)),
                    revenue,
                    expenses,
                    profit: revenue - expenses,
                })
            })
            .collect()
    }

    fn expense_categories(&self) -> Vec<ExpenseCategory> {
        let total: f64 = EXPENSES.iter().map(|(_, amount)| amount).sum();
        EXPENSES
            .iter()
            .map(|(name, amount)| ExpenseCategory {
                name: name.to_string(),
                amount: *amount,
                percentage: (amount / total * 1000.0).round() / 10.0,
            })
            .collect()
    }

    fn portfolio(&self) -> Vec<PortfolioAsset> {
        let total: f64 = HOLDINGS
            .iter()
            .map(|(_, _, quantity, price, _)| quantity * price)
            .sum();
        HOLDINGS
            .iter()
            .map(|(symbol, name, quantity, price, change)| PortfolioAsset {
                symbol: symbol.to_string(),
                name: name.to_string(),
                quantity: *quantity,
                price: *price,
                change_percent: *change,
                allocation: (quantity * price / total * 1000.0).round() / 10.0,
            })
            .collect()
    }

    fn transactions(&self) -> Vec<Transaction> {
        use TransactionKind::*;
        use TransactionStatus::*;

        let rows: [(i64, &str, &str, &str, f64, TransactionStatus, TransactionKind); 10] = [
            (
                12,
                "Morning coffee and pastry",
                "Blue Bottle Coffee",
                "Food & Dining",
                -8.75,
                Completed,
                Expense,
            ),
            (
                125,
                "Monthly salary deposit from employer payroll",
                "Acme Corp Payroll",
                "Income",
                6_225.0,
                Completed,
                Income,
            ),
            (
                310,
                "Grocery run for the week",
                "Whole Foods Market",
                "Food & Dining",
                -142.36,
                Pending,
                Expense,
            ),
            (
                1_560,
                "Streaming subscription renewal",
                "Netflix",
                "Entertainment",
                -15.49,
                Completed,
                Expense,
            ),
            (
                2_980,
                "Transfer to high-yield savings",
                "Ally Bank",
                "Savings",
                -1_500.0,
                Completed,
                Transfer,
            ),
            (
                4_400,
                "Electricity bill for the billing period",
                "Pacific Gas & Electric",
                "Utilities",
                -128.9,
                Completed,
                Expense,
            ),
            (7_300, "Ride to the airport", "Uber", "Transportation", -46.2, Failed, Expense),
            (
                11_600,
                "Freelance design invoice #1042",
                "Studio Northwind",
                "Income",
                2_400.0,
                Completed,
                Income,
            ),
            (
                17_400,
                "Rent payment",
                "Parkside Apartments",
                "Housing",
                -2_450.0,
                Completed,
                Expense,
            ),
            (
                28_900,
                "Quarterly dividend payout",
                "Vanguard",
                "Investments",
                312.48,
                Completed,
                Income,
            ),
        ];

        rows.iter()
            .enumerate()
            .map(
                |(index, (minutes, description, merchant, category, amount, status, kind))| {
                    Transaction {
                        id: format!("txn-{:03}", index + 1),
                        description: description.to_string(),
                        merchant: merchant.to_string(),
                        category: category.to_string(),
                        amount: *amount,
                        date: self.ago(*minutes),
                        status: *status,
                        kind: *kind,
                    }
                },
            )
            .collect()
    }

    fn activity(&self) -> Vec<ActivityItem> {
        let rows: [(i64, ActivityKind, &str, &str, Option<f64>); 6] = [
            (4, ActivityKind::Payment, "Card payment", "Blue Bottle Coffee", Some(-8.75)),
            (125, ActivityKind::Deposit, "Salary received", "Acme Corp Payroll", Some(6_225.0)),
            (540, ActivityKind::Investment, "Bought NVDA", "5 shares at $485.09", Some(-2_425.45)),
            (
                1_500,
                ActivityKind::Alert,
                "Budget warning",
                "Dining is at 92% of this month's budget",
                None,
            ),
            (
                2_980,
                ActivityKind::Transfer,
                "Moved to savings",
                "Ally Bank high-yield account",
                Some(-1_500.0),
            ),
            (
                8_700,
                ActivityKind::Payment,
                "Autopay scheduled",
                "Parkside Apartments rent",
                Some(-2_450.0),
            ),
        ];

        rows.iter()
            .enumerate()
            .map(|(index, (minutes, kind, title, description, amount))| ActivityItem {
                id: format!("act-{:03}", index + 1),
                kind: *kind,
                title: title.to_string(),
                description: description.to_string(),
                timestamp: self.ago(*minutes),
                amount: *amount,
            })
            .collect()
    }

    fn notifications(&self) -> Vec<Notification> {
        let rows: [(i64, NotificationKind, &str, &str, bool); 5] = [
            (
                0,
                NotificationKind::Warning,
                "Unusual sign-in",
                "New sign-in from Denver, CO. Review if this wasn't you.",
                false,
            ),
            (
                45,
                NotificationKind::Success,
                "Payment received",
                "Studio Northwind paid invoice #1042.",
                false,
            ),
            (
                380,
                NotificationKind::Info,
                "Statement ready",
                "Your monthly statement is available to download.",
                true,
            ),
            (
                1_700,
                NotificationKind::Error,
                "Payment failed",
                "Uber charge of $46.20 was declined.",
                true,
            ),
            (
                6_000,
                NotificationKind::Info,
                "Dividend scheduled",
                "Vanguard will pay a quarterly dividend next week.",
                true,
            ),
        ];

        rows.iter()
            .enumerate()
            .map(|(index, (minutes, kind, title, message, read))| Notification {
                id: format!("ntf-{:03}", index + 1),
                kind: *kind,
                title: title.to_string(),
                message: message.to_string(),
                timestamp: self.ago(*minutes),
                read: *read,
            })
            .collect()
    }
}

fn savings_rate(income: f64, expenses: f64) -> f64 {
    ((income - expenses) / income * 1000.0).round() / 10.0
}

fn month_start(anchor: DateTime<Utc>, months_back: u32) -> Option<NaiveDate> {
    let ordinal = anchor.year() * 12 + anchor.month0() as i32 - months_back as i32;
    NaiveDate::from_ymd_opt(ordinal.div_euclid(12), ordinal.rem_euclid(12) as u32 + 1, 1)
}
