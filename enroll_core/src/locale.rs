use chrono::{Datelike, NaiveDate, Weekday};

/// How dates are shown to the user (e.g. `07.03.1994`).
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// How dates are sent to the server (e.g. `1994-03-07`).
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Month names, January first.
pub const MONTHS: [&str; 12] = [
    "януари",
    "февруари",
    "март",
    "април",
    "май",
    "юни",
    "юли",
    "август",
    "септември",
    "октомври",
    "ноември",
    "декември",
];

/// Weekday abbreviations. Weeks start on Monday.
pub const WEEKDAYS: [&str; 7] = ["пн", "вт", "ср", "чт", "пт", "сб", "нд"];

/// Format a date the way the form displays it.
pub fn display(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Format an optional date for a request body. An unset date is an empty
/// string, not `null`.
pub fn wire(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format(WIRE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Read a date the user typed. Accepts the display format and the wire
/// format. Blank input means "no date".
///
/// ## Errors
///
/// `chrono::ParseError` if the text is in neither format.
pub fn parse(text: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let text = text.trim();

    if text.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(text, DISPLAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, WIRE_FORMAT))
        .map(Some)
}

/// The name of the month `date` falls in.
pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// The abbreviation for a day of the week.
pub fn weekday(day: Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}
