use crate::shared::icons::icon;
use leptos::prelude::*;

/// How a stat value is printed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatFormat {
    Integer,
    Percent { decimals: usize },
    Decimal { decimals: usize },
}

pub fn format_stat(value: f64, format: StatFormat) -> String {
    match format {
        StatFormat::Integer => format_thousands(value.round() as i64),
        StatFormat::Percent { decimals } => format!("{:.prec$}%", value, prec = decimals),
        StatFormat::Decimal { decimals } => format!("{:.prec$}", value, prec = decimals),
    }
}

/// `1234567` -> `"1,234,567"`
pub fn format_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    if n < 0 {
        result.push('-');
    }
    result.chars().rev().collect()
}

#[component]
pub fn StatCard(
    /// Label displayed above the value
    #[prop(into)]
    label: String,
    /// Icon name from the icon() helper
    #[prop(into)]
    icon_name: String,
    /// Primary value (None while loading)
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: StatFormat,
    #[prop(into, optional)] subtitle: Signal<Option<String>>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format_stat(v, format),
        None => "-".to_string(),
    };

    let subtitle_view = move || {
        subtitle.get().map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__icon">{icon(&icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_234_567), "1,234,567");
        assert_eq!(format_thousands(-4_500), "-4,500");
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat(1520.0, StatFormat::Integer), "1,520");
        assert_eq!(format_stat(66.666, StatFormat::Percent { decimals: 1 }), "66.7%");
        assert_eq!(format_stat(3.5, StatFormat::Decimal { decimals: 2 }), "3.50");
    }
}
