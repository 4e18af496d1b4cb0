//! Display formatting shared by the render models.

use chrono::NaiveDate;

/// `Jun 1, 2024`
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// `Monday, June 10, 2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `June 2024`
pub fn month_title(first_of_month: NaiveDate) -> String {
    first_of_month.format("%B %Y").to_string()
}

/// Dollar amount with thousands separators and at most three decimals,
/// trailing zeros dropped (`$12,500`, `$1,234.5`). Budgets are never
/// negative, so no sign is rendered.
pub fn money(amount: f64) -> String {
    let fixed = format!("{:.3}", amount.max(0.0));
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if frac_part.is_empty() {
        format!("${}", grouped)
    } else {
        format!("${}.{}", grouped, frac_part)
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_date_has_no_padding() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(short_date(d), "Jun 1, 2024");
    }

    #[test]
    fn long_date_includes_weekday() {
        let d = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        assert_eq!(long_date(d), "Monday, June 10, 2024");
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(999.0), "$999");
        assert_eq!(money(12500.0), "$12,500");
        assert_eq!(money(1234567.0), "$1,234,567");
    }

    #[test]
    fn money_trims_fraction() {
        assert_eq!(money(1234.5), "$1,234.5");
        assert_eq!(money(0.125), "$0.125");
        assert_eq!(money(10.0004), "$10");
    }
}
