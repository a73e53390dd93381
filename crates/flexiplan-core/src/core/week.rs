//! Day navigation within the current week
//!
//! Routines are keyed by full English day names. The cursor starts on today
//! and can move back to Monday or forward to Sunday of the same week.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// Sunday-first, matching the routine keys
pub const DAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    fn step(self) -> i32 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCursor {
    today: NaiveDate,
    offset: i32,
}

impl WeekCursor {
    pub fn new(today: NaiveDate) -> Self {
        Self { today, offset: 0 }
    }

    /// Cursor on the local calendar date
    pub fn today() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn offset(&self) -> i32 {
        self.offset
    }

    fn today_index(&self) -> i32 {
        self.today.weekday().num_days_from_sunday() as i32
    }

    /// Allowed offsets: back to Monday, forward to Sunday
    pub fn bounds(&self) -> (i32, i32) {
        let days_from_monday = (self.today_index() + 6) % 7;
        (-days_from_monday, 6 - days_from_monday)
    }

    /// Move one day. Returns false and stays put at the week's edge.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let (min, max) = self.bounds();
        let next = self.offset + direction.step();
        if (min..=max).contains(&next) {
            self.offset = next;
            true
        } else {
            false
        }
    }

    /// Jump to a named day of the current week, case-insensitive
    pub fn select(&mut self, day: &str) -> bool {
        let Some(target) = DAYS.iter().position(|d| d.eq_ignore_ascii_case(day)) else {
            return false;
        };
        let (min, max) = self.bounds();
        let today = self.today_index();
        match (min..=max).find(|offset| (today + offset + 7) % 7 == target as i32) {
            Some(offset) => {
                self.offset = offset;
                true
            }
            None => false,
        }
    }

    pub fn day_name(&self) -> &'static str {
        DAYS[((self.today_index() + self.offset).rem_euclid(7)) as usize]
    }

    pub fn date(&self) -> NaiveDate {
        self.today + Duration::days(i64::from(self.offset))
    }

    pub fn heading(&self) -> String {
        if self.offset == 0 {
            "Today's To Do".to_string()
        } else {
            format!("{}'s To Do", self.day_name())
        }
    }

    /// e.g. `Oct 14 • Tuesday`
    pub fn date_label(&self) -> String {
        let date = self.date();
        format!("{} • {}", date.format("%b %-d"), self.day_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-10-16 is a Wednesday
    fn wednesday() -> WeekCursor {
        WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 16).unwrap())
    }

    #[test]
    fn test_starts_on_today() {
        let cursor = wednesday();
        assert_eq!(cursor.day_name(), "Wednesday");
        assert_eq!(cursor.heading(), "Today's To Do");
        assert_eq!(cursor.date_label(), "Oct 16 • Wednesday");
    }

    #[test]
    fn test_bounds_cover_monday_to_sunday() {
        assert_eq!(wednesday().bounds(), (-2, 4));

        let monday = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 14).unwrap());
        assert_eq!(monday.bounds(), (0, 6));

        let sunday = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 20).unwrap());
        assert_eq!(sunday.bounds(), (-6, 0));
    }

    #[test]
    fn test_shift_stops_at_monday() {
        let mut cursor = wednesday();
        assert!(cursor.shift(Direction::Previous));
        assert!(cursor.shift(Direction::Previous));
        assert_eq!(cursor.day_name(), "Monday");
        assert!(!cursor.shift(Direction::Previous));
        assert_eq!(cursor.offset(), -2);
        assert_eq!(cursor.heading(), "Monday's To Do");
    }

    #[test]
    fn test_shift_stops_at_sunday() {
        let mut cursor = wednesday();
        for _ in 0..4 {
            assert!(cursor.shift(Direction::Next));
        }
        assert_eq!(cursor.day_name(), "Sunday");
        assert!(!cursor.shift(Direction::Next));
        assert_eq!(cursor.date_label(), "Oct 20 • Sunday");
    }

    #[test]
    fn test_sunday_cannot_move_forward() {
        let mut sunday = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 20).unwrap());
        assert!(!sunday.shift(Direction::Next));
        assert!(sunday.shift(Direction::Previous));
        assert_eq!(sunday.day_name(), "Saturday");
    }

    #[test]
    fn test_select_named_day() {
        let mut cursor = wednesday();
        assert!(cursor.select("friday"));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.day_name(), "Friday");

        assert!(cursor.select("Monday"));
        assert_eq!(cursor.offset(), -2);

        assert!(!cursor.select("Someday"));
        assert_eq!(cursor.offset(), -2);
    }
}
