use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime};

use crate::models::{BookingRecord, CalendarDayCell, MonthDirection};

const GRID_CELLS: usize = 42;
const MIN_YEAR: i32 = -9999;
const MAX_YEAR: i32 = 9999;

/// Carries an out-of-range zero-based month into the year. Returns `(year, month0)`.
///
/// Results past either end of the supported range stick to its first or last month.
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let year = year.saturating_add(month.div_euclid(12));
    if year > MAX_YEAR {
        (MAX_YEAR, 11)
    } else if year < MIN_YEAR {
        (MIN_YEAR, 0)
    } else {
        (year, month.rem_euclid(12) as u32)
    }
}

pub fn shift_month(year: i32, month0: u32, direction: MonthDirection) -> (i32, u32) {
    let month = month0 as i32;
    match direction {
        MonthDirection::Previous => normalize_month(year, month - 1),
        MonthDirection::Next => normalize_month(year, month + 1),
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Builds the Sunday-first 6x7 grid for a zero-based `month`.
///
/// The grid opens with the tail of the previous month (as many days as the
/// weekday index of the 1st), continues with every day of the month and is
/// padded with the start of the next month up to 42 cells.
pub fn build_month_grid(year: i32, month: i32, today: NaiveDate) -> Vec<CalendarDayCell> {
    let (year, month0) = normalize_month(year, month);
    // Always valid once the year has been clamped.
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(NaiveDate::MIN);
    let lead = first.weekday().num_days_from_sunday();
    let start = first - Days::new(u64::from(lead));

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| CalendarDayCell {
            date,
            day_number: date.day(),
            is_current_month: date.year() == year && date.month0() == month0,
            is_today: date == today,
            is_past: date < today,
        })
        .collect()
}

pub fn generate_ics(
    record: &BookingRecord,
    clinic_name: &str,
    stamp: NaiveDateTime,
) -> Option<String> {
    let start = record.starts_at()?;
    let dtstart = start.format("%Y%m%dT%H%M%S").to_string();
    let dtend = (start + Duration::minutes(record.duration_minutes as i64))
        .format("%Y%m%dT%H%M%S")
        .to_string();
    let dtstamp = stamp.format("%Y%m%dT%H%M%S").to_string();
    let uid = format!("{}@physiobook", record.reference);
    let summary = escape_text(&format!("{} at {}", record.service, clinic_name));
    let description = escape_text(&format!("Booked for {} ({})", record.name, record.phone));

    Some(format!(
        "BEGIN:VCALENDAR\r\n\
         VERSION:2.0\r\n\
         PRODID:-//Physiobook//Appointment Booking//EN\r\n\
         BEGIN:VEVENT\r\n\
         UID:{uid}\r\n\
         DTSTAMP:{dtstamp}\r\n\
         DTSTART:{dtstart}\r\n\
         DTEND:{dtend}\r\n\
         SUMMARY:{summary}\r\n\
         DESCRIPTION:{description}\r\n\
         END:VEVENT\r\n\
         END:VCALENDAR\r\n"
    ))
}

/// Escapes an iCalendar TEXT value so user input cannot start a new property line.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() != Some(&'\n') {
                    out.push_str("\\n");
                }
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn in_month(cells: &[CalendarDayCell]) -> usize {
        cells.iter().filter(|c| c.is_current_month).count()
    }

    #[test]
    fn test_every_month_has_42_sorted_cells() {
        let today = date(2025, 6, 15);
        for year in [1999, 2000, 2023, 2024, 2025, 2100] {
            for month in 0..12 {
                let cells = build_month_grid(year, month, today);
                assert_eq!(cells.len(), 42, "{year}-{month}");
                assert!(cells.windows(2).all(|w| w[0].date < w[1].date));
                assert_eq!(
                    in_month(&cells) as u32,
                    days_in_month(year, month as u32),
                    "{year}-{month}"
                );
                assert_eq!(cells[0].date.weekday(), chrono::Weekday::Sun);
            }
        }
    }

    #[test]
    fn test_february_leap_year() {
        let cells = build_month_grid(2024, 1, date(2024, 1, 1));
        assert_eq!(in_month(&cells), 29);
    }

    #[test]
    fn test_february_non_leap_year() {
        let cells = build_month_grid(2023, 1, date(2023, 1, 1));
        assert_eq!(in_month(&cells), 28);
        assert!(!is_leap_year(2100));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_today_and_past_flags() {
        let today = date(2025, 6, 15);
        let cells = build_month_grid(2025, 5, today);

        let today_cell = cells.iter().find(|c| c.date == today).unwrap();
        assert!(today_cell.is_today);
        assert!(!today_cell.is_past);

        let yesterday = cells.iter().find(|c| c.date == date(2025, 6, 14)).unwrap();
        assert!(yesterday.is_past);
        assert!(!yesterday.is_today);

        let tomorrow = cells.iter().find(|c| c.date == date(2025, 6, 16)).unwrap();
        assert!(!tomorrow.is_past);
        assert_eq!(cells.iter().filter(|c| c.is_today).count(), 1);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_lead() {
        // 2023-01-01 is a Sunday
        let cells = build_month_grid(2023, 0, date(2023, 1, 1));
        assert_eq!(cells[0].date, date(2023, 1, 1));
        assert!(cells[0].is_current_month);
        let trailing: Vec<_> = cells.iter().skip(31).collect();
        assert_eq!(trailing.len(), 11);
        assert!(trailing.iter().all(|c| !c.is_current_month));
        assert_eq!(trailing[0].day_number, 1);
        assert_eq!(trailing[10].day_number, 11);
    }

    #[test]
    fn test_lead_cells_count_back_from_previous_month_end() {
        // 2025-10-01 is a Wednesday: Sep 28, 29, 30 lead the grid
        let cells = build_month_grid(2025, 9, date(2025, 10, 16));
        let lead: Vec<u32> = cells
            .iter()
            .take_while(|c| !c.is_current_month)
            .map(|c| c.day_number)
            .collect();
        assert_eq!(lead, vec![28, 29, 30]);
        assert_eq!(cells[3].date, date(2025, 10, 1));
    }

    #[test]
    fn test_out_of_range_month_carries_into_year() {
        let today = date(2025, 1, 1);
        assert_eq!(
            build_month_grid(2024, 12, today),
            build_month_grid(2025, 0, today)
        );
        assert_eq!(
            build_month_grid(2025, -1, today),
            build_month_grid(2024, 11, today)
        );
        assert_eq!(normalize_month(2025, 25), (2027, 1));
    }

    #[test]
    fn test_extreme_years_still_produce_a_grid() {
        let today = date(2025, 1, 1);
        assert_eq!(build_month_grid(i32::MAX, 11, today).len(), 42);
        assert_eq!(build_month_grid(i32::MIN, 0, today).len(), 42);
    }

    #[test]
    fn test_shift_month_wraps() {
        assert_eq!(shift_month(2025, 11, MonthDirection::Next), (2026, 0));
        assert_eq!(shift_month(2025, 0, MonthDirection::Previous), (2024, 11));
        assert_eq!(shift_month(2025, 5, MonthDirection::Next), (2025, 6));
    }

    #[test]
    fn test_shift_month_stops_at_year_limits() {
        assert_eq!(shift_month(MAX_YEAR, 11, MonthDirection::Next), (MAX_YEAR, 11));
        assert_eq!(shift_month(MIN_YEAR, 0, MonthDirection::Previous), (MIN_YEAR, 0));
        assert_eq!(shift_month(MAX_YEAR, 10, MonthDirection::Next), (MAX_YEAR, 11));
        assert_eq!(normalize_month(MAX_YEAR, 12), (MAX_YEAR, 11));
        assert_eq!(normalize_month(i32::MIN, 5), (MIN_YEAR, 0));
    }

    #[test]
    fn test_generate_ics() {
        let record = BookingRecord {
            reference: Uuid::nil(),
            name: "Jane".to_string(),
            phone: "9999999999".to_string(),
            service: "In-Person Consultation".to_string(),
            duration_minutes: 50,
            date: date(2025, 3, 15),
            time: "02:00 PM".to_string(),
        };
        let stamp = date(2025, 3, 10).and_hms_opt(10, 0, 0).unwrap();

        let ics = generate_ics(&record, "Physiotherapy Clinic", stamp).unwrap();
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.contains("DTSTART:20250315T140000"));
        assert!(ics.contains("DTEND:20250315T145000"));
        assert!(ics.contains("DTSTAMP:20250310T100000"));
        assert!(ics.contains("SUMMARY:In-Person Consultation at Physiotherapy Clinic"));
        assert!(ics.contains("DESCRIPTION:Booked for Jane (9999999999)"));
        assert!(ics.contains(&format!("UID:{}@physiobook", Uuid::nil())));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
    }

    #[test]
    fn test_generate_ics_unparseable_time() {
        let record = BookingRecord {
            reference: Uuid::nil(),
            name: "Jane".to_string(),
            phone: "9999999999".to_string(),
            service: "Follow-up Session".to_string(),
            duration_minutes: 30,
            date: date(2025, 3, 15),
            time: "whenever".to_string(),
        };
        let stamp = date(2025, 3, 10).and_hms_opt(10, 0, 0).unwrap();
        assert!(generate_ics(&record, "Clinic", stamp).is_none());
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("Clinic, Inc; Downtown"), "Clinic\\, Inc\\; Downtown");
        assert_eq!(escape_text("a\\b"), "a\\\\b");
        assert_eq!(escape_text("one\r\ntwo\nthree\rfour"), "one\\ntwo\\nthree\\nfour");
    }

    #[test]
    fn test_generate_ics_user_input_cannot_add_properties() {
        let record = BookingRecord {
            reference: Uuid::nil(),
            name: "Jane\r\nATTENDEE:mailto:evil@example.com".to_string(),
            phone: "9999999999\nLOCATION:elsewhere".to_string(),
            service: "Follow-up Session".to_string(),
            duration_minutes: 30,
            date: date(2025, 3, 15),
            time: "02:00 PM".to_string(),
        };
        let stamp = date(2025, 3, 10).and_hms_opt(10, 0, 0).unwrap();

        let ics = generate_ics(&record, "Clinic, Inc", stamp).unwrap();
        assert!(ics.lines().all(|l| !l.starts_with("ATTENDEE") && !l.starts_with("LOCATION")));
        assert!(ics.contains("SUMMARY:Follow-up Session at Clinic\\, Inc\r\n"));
        assert!(ics.contains(
            "DESCRIPTION:Booked for Jane\\nATTENDEE:mailto:evil@example.com (9999999999\\nLOCATION:elsewhere)\r\n"
        ));
        assert_eq!(ics.matches("\r\n").count(), ics.lines().count());
    }
}
