use chrono::{DateTime, Datelike, Utc};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const COMPACT_SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub minimum_fraction_digits: usize,
    pub maximum_fraction_digits: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            minimum_fraction_digits: 0,
            maximum_fraction_digits: 2,
        }
    }
}

impl CurrencyFormat {
    pub const CENTS: CurrencyFormat = CurrencyFormat {
        minimum_fraction_digits: 2,
        maximum_fraction_digits: 2,
    };

    pub const WHOLE: CurrencyFormat = CurrencyFormat {
        minimum_fraction_digits: 0,
        maximum_fraction_digits: 0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStyle {
    Numeric,
    TwoDigit,
    Short,
    Long,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericStyle {
    Numeric,
    TwoDigit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat {
    pub month: Option<MonthStyle>,
    pub day: Option<NumericStyle>,
    pub year: Option<NumericStyle>,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            month: Some(MonthStyle::Short),
            day: Some(NumericStyle::Numeric),
            year: Some(NumericStyle::Numeric),
        }
    }
}

impl DateFormat {
    pub const SHORT: DateFormat = DateFormat {
        month: Some(MonthStyle::Numeric),
        day: Some(NumericStyle::Numeric),
        year: Some(NumericStyle::TwoDigit),
    };

    pub const LONG: DateFormat = DateFormat {
        month: Some(MonthStyle::Long),
        day: Some(NumericStyle::Numeric),
        year: Some(NumericStyle::Numeric),
    };

    pub const PADDED: DateFormat = DateFormat {
        month: Some(MonthStyle::TwoDigit),
        day: Some(NumericStyle::TwoDigit),
        year: Some(NumericStyle::Numeric),
    };

    pub const MONTH_YEAR: DateFormat = DateFormat {
        month: Some(MonthStyle::Short),
        day: None,
        year: Some(NumericStyle::Numeric),
    };
}

pub fn format_currency(value: f64, options: Option<CurrencyFormat>) -> String {
    let options = options.unwrap_or_default();
    if value.is_nan() {
        return "$NaN".into();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}$∞");
    }

    let maximum = options
        .maximum_fraction_digits
        .max(options.minimum_fraction_digits);
    let amount = Decimal::round(value.abs(), options.minimum_fraction_digits, maximum);
    format!("{sign}${}", amount.grouped())
}

pub fn format_compact_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).into();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let absolute = value.abs();
    let top = COMPACT_SUFFIXES.len() - 1;

    let mut magnitude = 0;
    while magnitude < top && absolute >= 1000f64.powi(magnitude as i32 + 1) {
        magnitude += 1;
    }

    let mut scaled = (absolute / 1000f64.powi(magnitude as i32) * 10.0).round() / 10.0;
    if scaled >= 1000.0 && magnitude < top {
        magnitude += 1;
        scaled /= 1000.0;
    }

    let body = Decimal::round(scaled, 0, 1);
    let body = if body.integer.len() >= 5 {
        body.grouped()
    } else {
        body.plain()
    };
    format!("{sign}{body}{}", COMPACT_SUFFIXES[magnitude])
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return non_finite(value).into();
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", Decimal::round(value.abs(), 0, 3).grouped())
}

pub fn format_percent(value: f64, include_sign: bool) -> String {
    let sign = if include_sign && value > 0.0 { "+" } else { "" };
    let body = if value.is_finite() {
        // + 0.0 turns a -0.0 result unsigned
        format!("{:.1}", round_half_away(value, 1) + 0.0)
    } else {
        non_finite(value).to_string()
    };
    format!("{sign}{body}%")
}

pub fn format_relative_time(date: DateTime<Utc>) -> String {
    format_relative_time_from(date, Utc::now())
}

pub fn format_relative_time_from(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(date).num_seconds();
    if seconds < 60 {
        return "Just now".into();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes} {} ago", plural(minutes, "minute"));
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} {} ago", plural(hours, "hour"));
    }

    match hours / 24 {
        1 => "Yesterday".into(),
        days if days < 7 => format!("{days} days ago"),
        _ => format_date(&date, None),
    }
}

pub fn format_date<D: Datelike>(date: &D, options: Option<DateFormat>) -> String {
    let mut options = options.unwrap_or_default();
    if options.month.is_none() && options.day.is_none() && options.year.is_none() {
        options = DateFormat {
            month: Some(MonthStyle::Numeric),
            day: Some(NumericStyle::Numeric),
            year: Some(NumericStyle::Numeric),
        };
    }

    let day = options.day.map(|style| numeric_field(date.day() as i32, style));
    let year = options.year.map(|style| match style {
        NumericStyle::Numeric => date.year().to_string(),
        NumericStyle::TwoDigit => format!("{:02}", date.year().rem_euclid(100)),
    });
    let month_index = date.month0() as usize;

    match options.month {
        Some(style @ (MonthStyle::Short | MonthStyle::Long)) => {
            let name = match style {
                MonthStyle::Long => MONTH_NAMES[month_index],
                _ => &MONTH_NAMES[month_index][..3],
            };
            match (day, year) {
                (Some(day), Some(year)) => format!("{name} {day}, {year}"),
                (Some(day), None) => format!("{name} {day}"),
                (None, Some(year)) => format!("{name} {year}"),
                (None, None) => name.to_string(),
            }
        }
        month => {
            let month = month.map(|style| match style {
                MonthStyle::TwoDigit => format!("{:02}", month_index + 1),
                _ => (month_index + 1).to_string(),
            });
            [month, day, year]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join("/")
        }
    }
}

pub fn format_date_short<D: Datelike>(date: &D) -> String {
    format_date(date, Some(DateFormat::SHORT))
}

/// Percent change from `previous` to `current`, rendered with a sign.
///
/// A zero `previous` is not guarded and renders as `+Infinity%`, `-Infinity%`
/// or `NaN%`; callers that can see a zero baseline must check first.
pub fn calculate_percent_change(current: f64, previous: f64) -> String {
    format_percent((current - previous) / previous * 100.0, true)
}

/// Cuts `text` to `max_length` characters including a trailing `...`.
///
/// With `max_length` below 3 the kept prefix is computed as a negative bound,
/// so `3 - max_length` characters are dropped from the end instead.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    let length = text.chars().count();
    if length <= max_length {
        return text.to_string();
    }

    let keep = if max_length >= 3 {
        max_length - 3
    } else {
        length.saturating_sub(3 - max_length)
    };
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        unit.to_string()
    } else {
        format!("{unit}s")
    }
}

fn numeric_field(value: i32, style: NumericStyle) -> String {
    match style {
        NumericStyle::Numeric => value.to_string(),
        NumericStyle::TwoDigit => format!("{value:02}"),
    }
}

/// Rounds exact ties away from zero; `{:.N}` alone rounds them to even.
fn round_half_away(value: f64, digits: usize) -> f64 {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

struct Decimal {
    integer: String,
    fraction: String,
}

impl Decimal {
    fn round(value: f64, minimum_fraction: usize, maximum_fraction: usize) -> Self {
        let value = round_half_away(value, maximum_fraction);
        let fixed = format!("{value:.maximum_fraction$}");
        let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let kept = fraction
            .trim_end_matches('0')
            .len()
            .max(minimum_fraction)
            .min(fraction.len());

        Self {
            integer: integer.to_string(),
            fraction: fraction[..kept].to_string(),
        }
    }

    fn plain(&self) -> String {
        self.join(self.integer.clone())
    }

    fn grouped(&self) -> String {
        let digits = self.integer.as_str();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        self.join(grouped)
    }

    fn join(&self, integer: String) -> String {
        if self.fraction.is_empty() {
            integer
        } else {
            format!("{integer}.{}", self.fraction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 25, 15, 30, 0).unwrap()
    }

    #[test]
    fn currency_uses_dollar_prefix_and_grouping() {
        assert_eq!(format_currency(1234.5, None), "$1,234.5");
        assert_eq!(format_currency(1234.5, Some(CurrencyFormat::CENTS)), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891, None), "$1,234,567.89");
        assert_eq!(format_currency(42.0, None), "$42");
        assert_eq!(format_currency(0.0, None), "$0");
    }

    #[test]
    fn currency_handles_negatives_and_overrides() {
        assert_eq!(format_currency(-89.99, None), "-$89.99");
        assert_eq!(format_currency(15_999.6, Some(CurrencyFormat::WHOLE)), "$16,000");
        let custom = CurrencyFormat {
            minimum_fraction_digits: 1,
            maximum_fraction_digits: 3,
        };
        assert_eq!(format_currency(2.5, Some(custom)), "$2.5");
        assert_eq!(format_currency(2.0, Some(custom)), "$2.0");
        assert_eq!(format_currency(2.12345, Some(custom)), "$2.123");
    }

    #[test]
    fn currency_never_exceeds_two_fraction_digits_by_default() {
        for value in [0.001, 12.345, 999.999, 1_000_000.5, 73_421.129] {
            let rendered = format_currency(value, None);
            assert!(rendered.starts_with('$'), "{rendered}");
            let fraction = rendered.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
            assert!(fraction <= 2, "{rendered}");
        }
        assert_eq!(format_currency(999.999, None), "$1,000");
    }

    #[test]
    fn compact_numbers() {
        assert_eq!(format_compact_number(1_200_000.0), "1.2M");
        assert_eq!(format_compact_number(1_500.0), "1.5K");
        assert_eq!(format_compact_number(999.0), "999");
        assert_eq!(format_compact_number(12.34), "12.3");
        assert_eq!(format_compact_number(2_000_000_000.0), "2B");
        assert_eq!(format_compact_number(3_460_000_000_000.0), "3.5T");
        assert_eq!(format_compact_number(-48_250.0), "-48.3K");
    }

    #[test]
    fn compact_numbers_roll_over_to_next_suffix() {
        assert_eq!(format_compact_number(999_990.0), "1M");
        assert_eq!(format_compact_number(999_960_000.0), "1B");
    }

    #[test]
    fn grouped_numbers() {
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(1234.5678), "1,234.568");
        assert_eq!(format_number(-1000.0), "-1,000");
        assert_eq!(format_number(12.0), "12");
    }

    #[test]
    fn percent_sign_rules() {
        assert_eq!(format_percent(12.5, true), "+12.5%");
        assert_eq!(format_percent(-3.2, true), "-3.2%");
        assert_eq!(format_percent(0.0, true), "0.0%");
        assert_eq!(format_percent(5.0, false), "5.0%");
        assert_eq!(format_percent(-5.0, false), "-5.0%");
    }

    #[test]
    fn percent_change_is_formatted_with_sign() {
        assert_eq!(calculate_percent_change(110.0, 100.0), "+10.0%");
        assert_eq!(calculate_percent_change(75.0, 100.0), "-25.0%");
        assert_eq!(calculate_percent_change(100.0, 100.0), "0.0%");
    }

    #[test]
    fn equal_negative_values_change_by_unsigned_zero() {
        assert_eq!(calculate_percent_change(-50.0, -50.0), "0.0%");
        assert_eq!(format_percent(-0.0, true), "0.0%");
        assert_eq!(format_percent(-0.0, false), "0.0%");
        assert_eq!(format_percent(-0.04, false), "0.0%");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_percent(12.25, true), "+12.3%");
        assert_eq!(format_percent(-12.25, false), "-12.3%");
        assert_eq!(format_currency(0.125, None), "$0.13");
        assert_eq!(format_currency(-2.5, Some(CurrencyFormat::WHOLE)), "-$3");
        assert_eq!(format_number(0.0625), "0.063");
    }

    #[test]
    fn percent_change_from_zero_baseline_is_not_finite() {
        assert_eq!(calculate_percent_change(10.0, 0.0), "+Infinity%");
        assert_eq!(calculate_percent_change(-10.0, 0.0), "-Infinity%");
        assert_eq!(calculate_percent_change(0.0, 0.0), "NaN%");
    }

    #[test]
    fn relative_time_buckets() {
        let now = anchor();
        let ago = |delta: Duration| format_relative_time_from(now - delta, now);

        assert_eq!(ago(Duration::seconds(30)), "Just now");
        assert_eq!(ago(Duration::seconds(60)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(45)), "45 minutes ago");
        assert_eq!(ago(Duration::minutes(90)), "1 hour ago");
        assert_eq!(ago(Duration::hours(5)), "5 hours ago");
        assert_eq!(ago(Duration::hours(25)), "Yesterday");
        assert_eq!(ago(Duration::hours(47)), "Yesterday");
        assert_eq!(ago(Duration::days(3)), "3 days ago");
        assert_eq!(ago(Duration::days(6)), "6 days ago");
        assert_eq!(ago(Duration::days(7)), "Nov 18, 2024");
    }

    #[test]
    fn future_dates_read_as_just_now() {
        let now = anchor();
        assert_eq!(format_relative_time_from(now + Duration::hours(2), now), "Just now");
    }

    #[test]
    fn dates_default_and_short() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 25).unwrap();
        assert_eq!(format_date(&date, None), "Nov 25, 2024");
        assert_eq!(format_date_short(&date), "11/25/24");
        assert_eq!(format_date_short(&anchor()), "11/25/24");

        let early = NaiveDate::from_ymd_opt(2005, 3, 7).unwrap();
        assert_eq!(format_date_short(&early), "3/7/05");
    }

    #[test]
    fn date_options_override_fields() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        assert_eq!(format_date(&date, Some(DateFormat::LONG)), "September 3, 2024");
        assert_eq!(format_date(&date, Some(DateFormat::MONTH_YEAR)), "Sep 2024");

        assert_eq!(format_date(&date, Some(DateFormat::PADDED)), "09/03/2024");

        let empty = DateFormat {
            month: None,
            day: None,
            year: None,
        };
        assert_eq!(format_date(&date, Some(empty)), "9/3/2024");
    }

    #[test]
    fn truncation_within_bounds_is_identity() {
        assert_eq!(truncate_text("hi", 8), "hi");
        assert_eq!(truncate_text("exactly8", 8), "exactly8");
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_text("hello world", 8), "hello...");
        assert_eq!(truncate_text("hello world", 3), "...");
        assert_eq!(truncate_text("café au lait", 7), "café...");
    }

    #[test]
    fn truncation_below_three_drops_from_the_end() {
        assert_eq!(truncate_text("hello", 2), "hell...");
        assert_eq!(truncate_text("hello", 0), "he...");
    }
}
