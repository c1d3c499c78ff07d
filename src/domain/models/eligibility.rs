//! 연령 기반 가입 자격

use chrono::{Datelike, NaiveDate};

/// 관광객 최소 가입 연령
pub const MINIMUM_TOURIST_AGE: u32 = 18;

/// `today` 기준 만 나이. 생일이 미래면 0.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    if date_of_birth > today {
        return 0;
    }
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

pub fn is_adult(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    age_on(date_of_birth, today) >= MINIMUM_TOURIST_AGE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_counts_birthday() {
        let today = date(2026, 6, 15);

        assert_eq!(age_on(date(2008, 6, 15), today), 18);
        assert_eq!(age_on(date(2008, 6, 16), today), 17);
        assert_eq!(age_on(date(1990, 1, 1), today), 36);
    }

    #[test]
    fn test_under_eighteen_is_not_adult() {
        let today = date(2026, 6, 15);

        assert!(is_adult(date(2008, 6, 15), today));
        assert!(!is_adult(date(2008, 6, 16), today));
        assert!(!is_adult(date(2030, 1, 1), today));
    }

    #[test]
    fn test_leap_day_birthday() {
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 2, 28)), 17);
        assert_eq!(age_on(date(2008, 2, 29), date(2026, 3, 1)), 18);
    }
}
