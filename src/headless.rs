use crate::context::{ContextError, RenderScope, StyleResolver, ThemeMode};
use crate::format::{
    calculate_percent_change, format_compact_number, format_currency, format_date,
    format_date_short, format_number, format_percent, format_relative_time_from, truncate_text,
    CurrencyFormat, DateFormat,
};
use crate::routes::Route;
use crate::services::data::{DashboardSnapshot, TransactionStatus};
use crate::styles::StyleRegistry;
use chrono::{DateTime, Utc};

const DESCRIPTION_WIDTH: usize = 30;

pub fn render_route(
    route: &Route,
    mode: ThemeMode,
    registry: &StyleRegistry,
    snapshot: &DashboardSnapshot,
    now: DateTime<Utc>,
) -> Result<String, ContextError> {
    let scope = RenderScope::root().with_theme(mode);
    match route {
        Route::Gallery => render_gallery(&scope, registry),
        Route::Dashboard { style } => {
            let resolver = StyleResolver::new(registry, Some(style.as_str()));
            render_dashboard(&scope.with_style(resolver.active()), snapshot, now)
        }
        Route::NotFound { path } => Ok(render_not_found(path)),
    }
}

pub fn render_gallery(
    scope: &RenderScope<'_>,
    registry: &StyleRegistry,
) -> Result<String, ContextError> {
    let mode = scope.theme()?;
    let mut lines = vec![
        format!("Finance dashboard styles ({mode} mode)"),
        String::new(),
    ];

    let routes = Route::dashboards(registry);
    for (index, (style, route)) in registry.all().iter().zip(routes).enumerate() {
        lines.push(format!("{:>2}. {} [{}]", index + 1, style.name, style.slug));
        lines.push(format!("    {}", style.description));
        lines.push(format!("    {}", style.characteristics.join(" · ")));
        lines.push(format!(
            "    primary {}  secondary {}  accent {}  background {}",
            style.colors.primary,
            style.colors.secondary,
            style.colors.accent,
            style.colors.background
        ));
        lines.push(format!("    {route}"));
    }

    Ok(lines.join("\n"))
}

pub fn render_dashboard(
    scope: &RenderScope<'_>,
    snapshot: &DashboardSnapshot,
    now: DateTime<Utc>,
) -> Result<String, ContextError> {
    let style = scope.style()?;
    let palette = scope.palette()?;
    let definition = style.definition();
    let stats = &snapshot.stats;

    let mut lines = vec![
        format!(
            "== {} ({}) · {} ==",
            definition.name,
            definition.slug,
            scope.theme()?
        ),
        definition.description.to_string(),
        format!("As of {}", format_date(&now, Some(DateFormat::LONG))),
        format!(
            "Chart colors: revenue {} · expenses {} · profit {}",
            palette.revenue, palette.expenses, palette.profit
        ),
        String::new(),
        "Overview".into(),
        stat_line(
            "Total balance",
            format_currency(stats.total_balance, Some(CurrencyFormat::CENTS)),
            calculate_percent_change(stats.total_balance, stats.previous_balance),
        ),
        stat_line(
            "Monthly income",
            format_currency(stats.monthly_income, None),
            calculate_percent_change(stats.monthly_income, stats.previous_income),
        ),
        stat_line(
            "Monthly expenses",
            format_currency(stats.monthly_expenses, None),
            calculate_percent_change(stats.monthly_expenses, stats.previous_expenses),
        ),
        stat_line(
            "Savings rate",
            format_percent(stats.savings_rate, false),
            calculate_percent_change(stats.savings_rate, stats.previous_savings_rate),
        ),
        String::new(),
        format!("Revenue ({} months)", snapshot.revenue.len()),
    ];

    for point in &snapshot.revenue {
        lines.push(format!(
            "  {:<4} revenue {:>6}  expenses {:>6}  profit {:>6}",
            point.month,
            format_compact_number(point.revenue),
            format_compact_number(point.expenses),
            format_compact_number(point.profit)
        ));
    }

    lines.push(String::new());
    lines.push("Expenses by category".into());
    for category in &snapshot.expenses {
        lines.push(format!(
            "  {:<16} {:>10} {:>7}",
            category.name,
            format_currency(category.amount, None),
            format_percent(category.percentage, false)
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Portfolio ({})",
        format_currency(snapshot.portfolio_value(), Some(CurrencyFormat::CENTS))
    ));
    for asset in &snapshot.portfolio {
        lines.push(format!(
            "  {:<5} {:<24} {:>6} @ {:>10} {:>8} {:>6}",
            asset.symbol,
            truncate_text(&asset.name, 24),
            format_number(asset.quantity),
            format_currency(asset.price, Some(CurrencyFormat::CENTS)),
            format_percent(asset.change_percent, true),
            format_percent(asset.allocation, false)
        ));
    }

    lines.push(String::new());
    lines.push("Recent transactions".into());
    for transaction in &snapshot.transactions {
        lines.push(format!(
            "  {:<8} {:<16} {:<width$} {:>12}  {}",
            format_date_short(&transaction.date),
            format_relative_time_from(transaction.date, now),
            truncate_text(&transaction.description, DESCRIPTION_WIDTH),
            signed_currency(transaction.amount),
            status_label(transaction.status),
            width = DESCRIPTION_WIDTH
        ));
    }

    lines.push(String::new());
    lines.push("Activity".into());
    for item in &snapshot.activity {
        let amount = item.amount.map(signed_currency).unwrap_or_default();
        lines.push(format!(
            "  {:<16} {} · {} {}",
            format_relative_time_from(item.timestamp, now),
            item.title,
            item.description,
            amount
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Notifications ({} unread)",
        snapshot.unread_notifications()
    ));
    for notification in &snapshot.notifications {
        let marker = if notification.read { ' ' } else { '*' };
        lines.push(format!(
            "  {marker} {} ({}): {}",
            notification.title,
            format_relative_time_from(notification.timestamp, now),
            notification.message
        ));
    }

    Ok(lines.join("\n"))
}

pub fn render_not_found(path: &str) -> String {
    format!("404: no page at {path}. Run `fingallery styles` to list dashboards.")
}

fn stat_line(label: &str, value: String, change: String) -> String {
    format!("  {label:<18} {value:>14} {change:>8}")
}

fn signed_currency(amount: f64) -> String {
    let formatted = format_currency(amount, Some(CurrencyFormat::CENTS));
    if amount > 0.0 {
        format!("+{formatted}")
    } else {
        formatted
    }
}

fn status_label(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Completed => "completed",
        TransactionStatus::Pending => "pending",
        TransactionStatus::Failed => "failed",
    }
}
