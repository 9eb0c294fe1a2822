// Display helpers for pt-BR money and dates.

use chrono::{Datelike, NaiveDate};

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Format a value as Brazilian Real: `R$ 1.234,56`, negatives as `-R$ 10,00`
pub fn format_brl(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round() as u64;
    format!(
        "{}R$ {},{:02}",
        sign,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// Whole-real variant used on chart legends: `R$ 1.235`
pub fn format_brl_compact(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}R$ {}", sign, group_thousands(value.abs().round() as u64))
}

fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if n < 1000 {
            groups.push(n.to_string());
            break;
        }
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.reverse();
    groups.join(".")
}

/// Short month name in pt-BR (`jan`..`dez`)
pub fn month_abbrev(date: NaiveDate) -> &'static str {
    MONTHS_PT[date.month0() as usize]
}

/// Trend axis label: `01 jan`
pub fn day_label(date: NaiveDate) -> String {
    format!("{:02} {}", date.day(), month_abbrev(date))
}

/// Ledger date: `31/12`
pub fn short_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}

/// Full date: `31/12/2024`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_brl() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234.5), "R$ 1.234,50");
        assert_eq!(format_brl(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_brl(-10.0), "-R$ 10,00");
        assert_eq!(format_brl(0.005), "R$ 0,01");
    }

    #[test]
    fn test_format_brl_compact() {
        assert_eq!(format_brl_compact(1234.5), "R$ 1.235");
        assert_eq!(format_brl_compact(999.0), "R$ 999");
    }

    #[test]
    fn test_date_labels() {
        let d = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(day_label(d), "01 jan");
        assert_eq!(short_date(d), "01/01");

        let d = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        assert_eq!(day_label(d), "25 dez");
        assert_eq!(long_date(d), "25/12/2024");
    }
}
