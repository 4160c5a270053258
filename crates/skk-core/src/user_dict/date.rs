//! Date candidates for `today`, `きのう`, etc.

use time::{Date, Duration, OffsetDateTime};
use tracing::warn;

use crate::candidate::Candidate;

/// Readings that produce date candidates, with their day offset.
const DATE_YOMIS: &[(&str, i64)] = &[
    ("today", 0),
    ("yesterday", -1),
    ("tomorrow", 1),
    ("きょう", 0),
    ("きのう", -1),
    ("あした", 1),
];

pub(super) fn date_yomis() -> impl Iterator<Item = &'static str> {
    DATE_YOMIS.iter().map(|(y, _)| *y)
}

fn day_offset(yomi: &str) -> Option<i64> {
    DATE_YOMIS
        .iter()
        .find(|(y, _)| *y == yomi)
        .map(|(_, offset)| *offset)
}

/// Local date, falling back to UTC when the offset cannot be determined.
pub(super) fn local_today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

/// One candidate per format for `yomi`, or nothing if it is not a date reading.
/// Formats that fail to parse are skipped.
pub(super) fn date_candidates(yomi: &str, today: Date, formats: &[String]) -> Vec<Candidate> {
    let Some(date) = day_offset(yomi).and_then(|d| today.checked_add(Duration::days(d))) else {
        return Vec::new();
    };
    let mut out: Vec<Candidate> = Vec::new();
    for format in formats {
        let rendered = time::format_description::parse(format)
            .map_err(|e| e.to_string())
            .and_then(|items| date.format(&items).map_err(|e| e.to_string()));
        match rendered {
            Ok(word) => {
                if out.iter().all(|c| c.word != word) {
                    let mut candidate = Candidate::new(yomi, word);
                    candidate.save_to_user_dict = false;
                    out.push(candidate);
                }
            }
            Err(e) => warn!(format = %format, error = %e, "skipping date format"),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn formats() -> Vec<String> {
        vec![
            "[year]/[month]/[day]".to_string(),
            "[year]年[month padding:none]月[day padding:none]日".to_string(),
        ]
    }

    fn day(y: i32, m: Month, d: u8) -> Date {
        Date::from_calendar_date(y, m, d).unwrap()
    }

    #[test]
    fn today_in_each_format() {
        let words: Vec<String> = date_candidates("today", day(2024, Month::March, 5), &formats())
            .into_iter()
            .map(|c| c.word)
            .collect();
        assert_eq!(words, vec!["2024/03/05", "2024年3月5日"]);
    }

    #[test]
    fn offsets_cross_month_boundary() {
        let c = date_candidates("あした", day(2024, Month::February, 29), &formats());
        assert_eq!(c[0].word, "2024/03/01");
        let c = date_candidates("きのう", day(2024, Month::March, 1), &formats());
        assert_eq!(c[0].word, "2024/02/29");
    }

    #[test]
    fn not_saved_to_user_dict() {
        let c = date_candidates("tomorrow", day(2024, Month::March, 5), &formats());
        assert!(c.iter().all(|c| !c.save_to_user_dict));
    }

    #[test]
    fn non_date_reading() {
        assert!(date_candidates("かんじ", day(2024, Month::March, 5), &formats()).is_empty());
    }

    #[test]
    fn bad_format_is_skipped() {
        let formats = vec!["[year".to_string(), "[year]".to_string()];
        let c = date_candidates("today", day(2024, Month::March, 5), &formats);
        assert_eq!(c.len(), 1);
        assert_eq!(c[0].word, "2024");
    }
}
