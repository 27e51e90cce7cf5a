//! Date rendering with the widget's format tokens (`Y-m-d`, `F j, Y`, ...).

use crate::domain::model::DateValue;
use crate::utils::error::{CalendarError, Result};
use chrono::{Datelike, NaiveDate};

const TOKENS: &[char] = &['Y', 'y', 'm', 'n', 'd', 'j', 'F', 'M', 'l', 'D'];

pub fn is_token(c: char) -> bool {
    TOKENS.contains(&c)
}

/// Renders `date` using widget tokens. A backslash emits the next
/// character literally; characters that are not tokens pass through.
pub fn format_date(date: &DateValue, format: &str) -> String {
    let naive = date.naive();
    let mut out = String::with_capacity(format.len() + 8);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    out.push(next);
                }
            }
            'Y' => out.push_str(&format!("{:04}", naive.year())),
            'y' => out.push_str(&format!("{:02}", naive.year().rem_euclid(100))),
            'm' => out.push_str(&format!("{:02}", naive.month())),
            'n' => out.push_str(&naive.month().to_string()),
            'd' => out.push_str(&format!("{:02}", naive.day())),
            'j' => out.push_str(&naive.day().to_string()),
            'F' => out.push_str(&naive.format("%B").to_string()),
            'M' => out.push_str(&naive.format("%b").to_string()),
            'l' => out.push_str(&naive.format("%A").to_string()),
            'D' => out.push_str(&naive.format("%a").to_string()),
            other => out.push(other),
        }
    }

    out
}

/// Parses text typed into a field, using the same tokens as
/// [`format_date`]. Leading and trailing whitespace is ignored.
pub fn parse_date(text: &str, format: &str) -> Result<DateValue> {
    NaiveDate::parse_from_str(text.trim(), &to_chrono_format(format))
        .map(DateValue::new)
        .map_err(|_| CalendarError::DateFormatMismatch {
            value: text.to_string(),
            format: format.to_string(),
        })
}

fn to_chrono_format(format: &str) -> String {
    let mut out = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let literal = match c {
            '\\' => match chars.next() {
                Some(next) => next,
                None => continue,
            },
            'Y' => {
                out.push_str("%Y");
                continue;
            }
            'y' => {
                out.push_str("%y");
                continue;
            }
            // chrono accepts one or two digits for these when parsing.
            'm' | 'n' => {
                out.push_str("%m");
                continue;
            }
            'd' | 'j' => {
                out.push_str("%d");
                continue;
            }
            'F' => {
                out.push_str("%B");
                continue;
            }
            'M' => {
                out.push_str("%b");
                continue;
            }
            'l' => {
                out.push_str("%A");
                continue;
            }
            'D' => {
                out.push_str("%a");
                continue;
            }
            other => other,
        };
        if literal == '%' {
            out.push_str("%%");
        } else {
            out.push(literal);
        }
    }

    out
}
