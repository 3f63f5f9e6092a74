//! Price formatting helpers
//!
//! Large prices (>= 1000) read best with thousands separators and two
//! decimals; small prices (alt-coins, FX) need four decimals to stay
//! meaningful.

/// Format a price level for display
pub fn format_price_level(price: f64) -> String {
    if price >= 1000.0 {
        group_thousands(price)
    } else {
        format!("{price:.4}")
    }
}

/// Percentage change from `previous` to `current`
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    (current - previous) / previous * 100.0
}

fn group_thousands(price: f64) -> String {
    let formatted = format!("{price:.2}");
    let (integer, fraction) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{grouped}.{fraction}")
}
