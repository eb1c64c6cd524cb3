use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// `YYYY-MM-DD` bucket key for a day.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

pub fn week_start_from_str(raw: &str) -> Weekday {
    if raw.trim().eq_ignore_ascii_case("monday") {
        Weekday::Mon
    } else {
        Weekday::Sun
    }
}

pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1_u32)
    } else {
        (year, month + 1)
    };
    add_days(first_day_of_month(next_year, next_month), -1).day()
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(date)
}

/// Moves by whole months, keeping the day where the target month allows it.
pub fn shift_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months);
    let Ok(year) = i32::try_from(total.div_euclid(12)) else {
        return date;
    };
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub fn start_of_week(day: NaiveDate, week_start: Weekday) -> NaiveDate {
    let day_idx = i64::from(day.weekday().num_days_from_monday());
    let start_idx = i64::from(week_start.num_days_from_monday());
    let diff = (7 + day_idx - start_idx) % 7;
    add_days(day, -diff)
}

/// The seven days of the week containing `day`.
pub fn week_days(day: NaiveDate, week_start: Weekday) -> Vec<NaiveDate> {
    let start = start_of_week(day, week_start);
    (0..7).map(|offset| add_days(start, offset)).collect()
}

/// Month cells in display order: leading `None` blanks up to the first weekday, then
/// every day of the month.
pub fn month_grid(month: NaiveDate, week_start: Weekday) -> Vec<Option<NaiveDate>> {
    let first = first_day_of_month(month.year(), month.month());
    let blanks = first.weekday().days_since(week_start) as usize;
    let days = days_in_month(first.year(), first.month());

    let mut cells = vec![None; blanks];
    cells.extend((0..i64::from(days)).map(|offset| Some(add_days(first, offset))));
    cells
}

pub fn weekday_labels(week_start: Weekday) -> Vec<&'static str> {
    let mut day = week_start;
    let mut labels = Vec::with_capacity(7);
    for _ in 0..7 {
        labels.push(match day {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        });
        day = day.succ();
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn date_keys_are_zero_padded() {
        assert_eq!(date_key(ymd(2024, 3, 1)), "2024-03-01");
    }

    #[test]
    fn shift_months_clamps_day_and_crosses_years() {
        assert_eq!(shift_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(shift_months(ymd(2024, 12, 15), 1), ymd(2025, 1, 15));
        assert_eq!(shift_months(ymd(2024, 1, 15), -1), ymd(2023, 12, 15));
        assert_eq!(shift_months(ymd(2024, 5, 1), -17), ymd(2022, 12, 1));
    }

    #[test]
    fn month_grid_starts_with_blanks_until_first_weekday() {
        // 2024-03-01 is a Friday.
        let cells = month_grid(ymd(2024, 3, 20), Weekday::Sun);
        assert_eq!(cells.iter().take_while(|cell| cell.is_none()).count(), 5);
        assert_eq!(cells.len(), 5 + 31);
        assert_eq!(cells.last().copied().flatten(), Some(ymd(2024, 3, 31)));

        let monday_cells = month_grid(ymd(2024, 3, 1), Weekday::Mon);
        assert_eq!(monday_cells.iter().filter(|cell| cell.is_none()).count(), 4);
    }

    #[test]
    fn week_days_cover_the_selected_week() {
        let days = week_days(ymd(2024, 3, 6), Weekday::Sun);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0], ymd(2024, 3, 3));
        assert_eq!(days[6], ymd(2024, 3, 9));
    }

    #[test]
    fn labels_follow_week_start() {
        assert_eq!(weekday_labels(Weekday::Sun)[0], "Sun");
        assert_eq!(weekday_labels(Weekday::Mon)[6], "Sun");
        assert_eq!(week_start_from_str("Monday"), Weekday::Mon);
        assert_eq!(week_start_from_str(""), Weekday::Sun);
    }
}
