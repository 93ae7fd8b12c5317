use chrono::{Datelike, Days, Months, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use enroll_core::locale;
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A calendar popover for picking the birth date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    /// The highlighted day
    cursor: NaiveDate,
}

/// What the user did with the picker
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Still picking
    Open,

    /// Done. `None` means the date was cleared.
    Picked(Option<NaiveDate>),

    /// Closed without changing anything
    Cancelled,
}

/// A week of the calendar, Monday first. `None` pads days outside the month.
pub type Week = [Option<u32>; 7];

impl DatePicker {
    /// Open on the current selection, or on 1 January 2000 if there isn't one.
    pub fn new(selected: Option<NaiveDate>) -> Self {
        Self {
            cursor: selected
                .or_else(|| NaiveDate::from_ymd_opt(2000, 1, 1))
                .unwrap_or_default(),
        }
    }

    /// The highlighted day
    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    /// Move the cursor or finish picking.
    pub fn handle_event(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.shift(|d| d.checked_sub_days(Days::new(1))),
            KeyCode::Right | KeyCode::Char('l') => self.shift(|d| d.checked_add_days(Days::new(1))),
            KeyCode::Up | KeyCode::Char('k') => self.shift(|d| d.checked_sub_days(Days::new(7))),
            KeyCode::Down | KeyCode::Char('j') => self.shift(|d| d.checked_add_days(Days::new(7))),
            KeyCode::PageUp | KeyCode::Char('<') => {
                self.shift(|d| d.checked_sub_months(Months::new(1)));
            }
            KeyCode::PageDown | KeyCode::Char('>') => {
                self.shift(|d| d.checked_add_months(Months::new(1)));
            }
            KeyCode::Enter => return Outcome::Picked(Some(self.cursor)),
            KeyCode::Delete | KeyCode::Backspace => return Outcome::Picked(None),
            KeyCode::Esc => return Outcome::Cancelled,
            _ => {}
        }

        Outcome::Open
    }

    /// Move the cursor, staying put if the move would leave chrono's range.
    /// Month moves clamp the day to the end of the target month.
    fn shift(&mut self, by: impl FnOnce(NaiveDate) -> Option<NaiveDate>) {
        if let Some(moved) = by(self.cursor) {
            self.cursor = moved;
        }
    }

    /// The weeks of the highlighted month.
    pub fn weeks(&self) -> Vec<Week> {
        let first = self.cursor.with_day(1).unwrap_or(self.cursor);
        let days_in_month = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .map_or(28, |last| last.day());
        let offset = first.weekday().num_days_from_monday() as usize;

        let mut weeks = Vec::with_capacity(6);
        let mut week: Week = [None; 7];

        for (slot, day) in (offset..).zip(1..=days_in_month) {
            week[slot % 7] = Some(day);

            if slot % 7 == 6 {
                weeks.push(week);
                week = [None; 7];
            }
        }

        if week.iter().any(Option::is_some) {
            weeks.push(week);
        }

        weeks
    }

    /// Render the calendar centered over the form
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        let weeks = self.weeks();

        // +1 for the weekday header, +2 for the border
        let height = weeks.len() as u16 + 1 + 2;
        let popup_vert = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
        let popup_horiz = Layout::horizontal([Constraint::Length(7 * 3 + 2)]).flex(Flex::Center);

        let [popup_area] = popup_vert.areas(body_area);
        let [popup_area] = popup_horiz.areas(popup_area);

        let mut lines = Vec::with_capacity(weeks.len() + 1);
        lines.push(Line::from(
            locale::WEEKDAYS
                .iter()
                .map(|day| Span::raw(format!("{day:>2} ")).dark_gray())
                .collect::<Vec<_>>(),
        ));

        let highlighted = self.cursor().day();
        for week in weeks {
            lines.push(Line::from(
                week.iter()
                    .flat_map(|day| {
                        let cell = match day {
                            Some(day) if *day == highlighted => {
                                Span::styled(format!("{day:>2}"), Style::new().reversed())
                            }
                            Some(day) => Span::raw(format!("{day:>2}")),
                            None => Span::raw("  "),
                        };

                        [cell, Span::raw(" ")]
                    })
                    .collect::<Vec<_>>(),
            ));
        }

        let title = format!(
            "{} {}",
            locale::month_name(self.cursor),
            self.cursor.year()
        );

        let popup = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::new().blue()),
        );

        frame.render_widget(Clear, popup_area);
        frame.render_widget(popup, popup_area);
    }
}
