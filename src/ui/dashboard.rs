use super::theme::parse_color;
use crate::context::{ContextError, RenderScope};
use crate::format::{
    calculate_percent_change, format_compact_number, format_currency, format_date,
    format_date_short, format_number, format_percent, format_relative_time, truncate_text,
    CurrencyFormat, DateFormat,
};
use crate::services::data::{
    DashboardSnapshot, ExpenseCategory, NotificationKind, RevenueDataPoint, StatsData,
    TransactionStatus,
};
use crate::styles::ChartPalette;
use eframe::egui::{self, Color32};
use std::time::Instant;

const CHART_HEIGHT: f32 = 180.0;
const AXIS_GUTTER: f32 = 18.0;

#[derive(Debug)]
pub struct DashboardState {
    snapshot: Option<DashboardSnapshot>,
    last_updated: Option<Instant>,
    loading: bool,
    error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            last_updated: None,
            loading: true,
            error: None,
        }
    }

    pub fn set_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn update(&mut self, snapshot: DashboardSnapshot) {
        self.snapshot = Some(snapshot);
        self.last_updated = Some(Instant::now());
        self.loading = false;
        self.error = None;
    }

    /// Keeps the previous snapshot on screen next to the error.
    pub fn set_error(&mut self, error: String) {
        self.loading = false;
        self.error = Some(error);
    }

    pub fn snapshot(&self) -> Option<&DashboardSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn last_updated(&self) -> Option<Instant> {
        self.last_updated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

pub fn render(
    ui: &mut egui::Ui,
    scope: &RenderScope<'_>,
    state: &DashboardState,
) -> Result<(), ContextError> {
    let style = scope.style()?;
    let palette = scope.palette()?;
    let dark = scope.is_dark()?;
    let definition = style.definition();

    ui.horizontal(|ui| {
        ui.heading(definition.name);
        ui.label(egui::RichText::new(definition.characteristics.join(" · ")).small().weak());
    });
    ui.label(definition.description);

    if let Some(error) = state.error() {
        ui.colored_label(Color32::LIGHT_RED, error);
    }

    let Some(snapshot) = state.snapshot() else {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading dashboard data...");
        });
        return Ok(());
    };

    if let Some(updated) = state.last_updated() {
        let suffix = if state.is_loading() { " · refreshing" } else { "" };
        ui.label(
            egui::RichText::new(format!(
                "Last updated {}s ago{suffix}",
                updated.elapsed().as_secs()
            ))
            .small()
            .weak(),
        );
    }
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            stats_cards(ui, &palette, &snapshot.stats);
            ui.separator();

            ui.heading(format!(
                "Revenue · 12 months to {}",
                format_date(&chrono::Utc::now(), Some(DateFormat::MONTH_YEAR))
            ));
            revenue_chart(ui, &palette, dark, &snapshot.revenue);
            ui.separator();

            ui.columns(2, |columns| {
                columns[0].heading("Expenses by category");
                expense_breakdown(&mut columns[0], &palette, &snapshot.expenses);

                columns[1].heading("Notifications");
                notifications(&mut columns[1], &palette, snapshot);
            });
            ui.separator();

            portfolio(ui, &palette, snapshot);
            ui.separator();

            transactions(ui, &palette, snapshot);
            ui.separator();

            activity(ui, snapshot);
        });

    Ok(())
}

fn stats_cards(ui: &mut egui::Ui, palette: &ChartPalette, stats: &StatsData) {
    let cards = [
        (
            "Total balance",
            format_currency(stats.total_balance, Some(CurrencyFormat::CENTS)),
            stats.total_balance,
            stats.previous_balance,
            false,
        ),
        (
            "Monthly income",
            format_currency(stats.monthly_income, None),
            stats.monthly_income,
            stats.previous_income,
            false,
        ),
        (
            "Monthly expenses",
            format_currency(stats.monthly_expenses, None),
            stats.monthly_expenses,
            stats.previous_expenses,
            true,
        ),
        (
            "Savings rate",
            format_percent(stats.savings_rate, false),
            stats.savings_rate,
            stats.previous_savings_rate,
            false,
        ),
    ];

    ui.columns(cards.len(), |columns| {
        for (column, (label, value, current, previous, lower_is_better)) in
            columns.iter_mut().zip(cards)
        {
            egui::Frame::group(column.style()).show(column, |ui| {
                ui.label(egui::RichText::new(label).small().weak());
                ui.label(egui::RichText::new(value).size(20.0).strong());
                let improved = (current >= previous) != lower_is_better;
                let color = if improved {
                    palette.positive
                } else {
                    palette.negative
                };
                ui.colored_label(
                    parse_color(color),
                    format!("{} vs last month", calculate_percent_change(current, previous)),
                );
            });
        }
    });
}

fn revenue_chart(
    ui: &mut egui::Ui,
    palette: &ChartPalette,
    dark: bool,
    points: &[RevenueDataPoint],
) {
    let max = points
        .iter()
        .map(|point| point.revenue.max(point.expenses))
        .fold(0.0_f64, f64::max);
    if points.is_empty() || max <= 0.0 {
        ui.colored_label(Color32::GRAY, "No revenue data");
        return;
    }

    let revenue_color = parse_color(palette.revenue);
    let expense_color = parse_color(palette.expenses);
    ui.horizontal(|ui| {
        ui.colored_label(revenue_color, "■ Revenue");
        ui.colored_label(expense_color, "■ Expenses");
        ui.label(format!("Peak {}", format_compact_number(max)));
    });

    let desired = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (rect, response) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let surface = parse_color(palette.surface).linear_multiply(if dark { 0.25 } else { 0.4 });
    painter.rect_filled(rect, 4.0, surface);

    let baseline = rect.bottom() - AXIS_GUTTER;
    let usable = rect.height() - AXIS_GUTTER - 8.0;
    painter.hline(
        rect.x_range(),
        baseline,
        egui::Stroke::new(1.0, parse_color(palette.grid)),
    );

    let slot = rect.width() / points.len() as f32;
    let bar = (slot * 0.35).max(2.0);
    let label_color = ui.visuals().weak_text_color();
    let mut hovered = None;

    for (index, point) in points.iter().enumerate() {
        let left = rect.left() + slot * index as f32 + slot * 0.15;
        for (offset, value, color) in [
            (0.0, point.revenue, revenue_color),
            (bar, point.expenses, expense_color),
        ] {
            let height = (value / max) as f32 * usable;
            let bar_rect = egui::Rect::from_min_max(
                egui::pos2(left + offset, baseline - height),
                egui::pos2(left + offset + bar, baseline),
            );
            painter.rect_filled(bar_rect, 2.0, color);
        }
        painter.text(
            egui::pos2(left + bar, rect.bottom() - 2.0),
            egui::Align2::CENTER_BOTTOM,
            &point.month,
            egui::FontId::proportional(11.0),
            label_color,
        );

        if let Some(pointer) = response.hover_pos() {
            if pointer.x >= left && pointer.x < left + slot {
                hovered = Some(point);
            }
        }
    }

    if let Some(point) = hovered {
        response.on_hover_text(format!(
            "{}\nRevenue {}\nExpenses {}\nProfit {}",
            point.month,
            format_currency(point.revenue, Some(CurrencyFormat::WHOLE)),
            format_currency(point.expenses, Some(CurrencyFormat::WHOLE)),
            format_currency(point.profit, Some(CurrencyFormat::WHOLE))
        ));
    }
}

fn expense_breakdown(ui: &mut egui::Ui, palette: &ChartPalette, categories: &[ExpenseCategory]) {
    if categories.is_empty() {
        ui.colored_label(Color32::GRAY, "No expenses recorded");
        return;
    }

    for (index, category) in categories.iter().enumerate() {
        let color = parse_color(palette.categories[index % palette.categories.len()]);
        ui.horizontal(|ui| {
            ui.colored_label(color, "■");
            ui.label(&category.name);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format_percent(category.percentage, false));
                ui.strong(format_currency(category.amount, None));
            });
        });
        ui.add(
            egui::ProgressBar::new((category.percentage / 100.0).clamp(0.0, 1.0) as f32)
                .fill(color)
                .desired_height(6.0),
        );
    }
}

fn notifications(ui: &mut egui::Ui, palette: &ChartPalette, snapshot: &DashboardSnapshot) {
    ui.label(format!("{} unread", snapshot.unread_notifications()));
    for notification in &snapshot.notifications {
        let color = match notification.kind {
            NotificationKind::Info => parse_color(palette.profit),
            NotificationKind::Success => parse_color(palette.positive),
            NotificationKind::Warning => parse_color(palette.categories[4]),
            NotificationKind::Error => parse_color(palette.negative),
        };
        ui.horizontal(|ui| {
            ui.colored_label(color, if notification.read { "○" } else { "●" });
            let title = egui::RichText::new(&notification.title);
            ui.label(if notification.read { title } else { title.strong() })
                .on_hover_text(&notification.message);
            ui.label(
                egui::RichText::new(format_relative_time(notification.timestamp))
                    .small()
                    .weak(),
            );
        });
    }
}

fn portfolio(ui: &mut egui::Ui, palette: &ChartPalette, snapshot: &DashboardSnapshot) {
    ui.heading(format!(
        "Portfolio · {}",
        format_currency(snapshot.portfolio_value(), Some(CurrencyFormat::CENTS))
    ));
    egui::Grid::new("portfolio_holdings")
        .striped(true)
        .num_columns(6)
        .show(ui, |ui| {
            for header in ["Symbol", "Name", "Quantity", "Price", "Change", "Allocation"] {
                ui.strong(header);
            }
            ui.end_row();

            for asset in &snapshot.portfolio {
                ui.monospace(&asset.symbol);
                ui.label(truncate_text(&asset.name, 28));
                ui.label(format_number(asset.quantity));
                ui.label(format_currency(asset.price, Some(CurrencyFormat::CENTS)));
                let change_color = if asset.change_percent >= 0.0 {
                    palette.positive
                } else {
                    palette.negative
                };
                ui.colored_label(
                    parse_color(change_color),
                    format_percent(asset.change_percent, true),
                );
                ui.label(format_percent(asset.allocation, false));
                ui.end_row();
            }

            if snapshot.portfolio.is_empty() {
                ui.colored_label(Color32::GRAY, "No holdings");
                ui.end_row();
            }
        });
}

fn transactions(ui: &mut egui::Ui, palette: &ChartPalette, snapshot: &DashboardSnapshot) {
    ui.heading("Recent transactions");
    egui::Grid::new("recent_transactions")
        .striped(true)
        .num_columns(5)
        .show(ui, |ui| {
            for header in ["Date", "Description", "Category", "Amount", "Status"] {
                ui.strong(header);
            }
            ui.end_row();

            for transaction in &snapshot.transactions {
                ui.label(format_date_short(&transaction.date))
                    .on_hover_text(format!(
                        "{} · {}",
                        format_date(&transaction.date, Some(DateFormat::PADDED)),
                        format_relative_time(transaction.date)
                    ));
                ui.label(truncate_text(&transaction.description, 32))
                    .on_hover_text(&transaction.merchant);
                ui.label(&transaction.category);

                let amount = format_currency(transaction.amount, Some(CurrencyFormat::CENTS));
                if transaction.amount > 0.0 {
                    ui.colored_label(parse_color(palette.positive), format!("+{amount}"));
                } else {
                    ui.label(amount);
                }

                let (label, color) = match transaction.status {
                    TransactionStatus::Completed => ("Completed", parse_color(palette.positive)),
                    TransactionStatus::Pending => ("Pending", parse_color(palette.categories[4])),
                    TransactionStatus::Failed => ("Failed", parse_color(palette.negative)),
                };
                ui.colored_label(color, label);
                ui.end_row();
            }

            if snapshot.transactions.is_empty() {
                ui.colored_label(Color32::GRAY, "No transactions");
                ui.end_row();
            }
        });
}

fn activity(ui: &mut egui::Ui, snapshot: &DashboardSnapshot) {
    ui.heading("Activity");
    for item in &snapshot.activity {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format_relative_time(item.timestamp))
                    .small()
                    .weak(),
            );
            ui.strong(&item.title);
            ui.label(&item.description);
            if let Some(amount) = item.amount {
                ui.monospace(format_currency(amount, Some(CurrencyFormat::CENTS)));
            }
        });
    }
}
