use super::date_picker::{self, DatePicker};
use crate::focus_ring;
use crossterm::event::{Event, KeyCode, KeyEvent};
use enroll_core::{form::Status, Draft, Field, Form, SubmissionResult};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

/// The title of the form, also used as the submit button caption
pub const TITLE: &str = "Регистрация за курс";

focus_ring!(
    /// Where keyboard input goes
    Focus {
        /// Потребителско име
        Username,
        /// Парола
        Password,
        /// Име
        FirstName,
        /// Презиме
        MiddleName,
        /// Фамилия
        LastName,
        /// Дата на раждане (opens the date picker)
        BirthDate,
        /// Телефон
        Phone,
        /// Имейл
        Email,
        /// Град на живеене
        City,
        /// The submit button
        Submit,
    }
);

impl Focus {
    /// The form field this stop edits, if it isn't the button
    fn field(self) -> Option<Field> {
        match self {
            Self::Username => Some(Field::Username),
            Self::Password => Some(Field::Password),
            Self::FirstName => Some(Field::FirstName),
            Self::MiddleName => Some(Field::MiddleName),
            Self::LastName => Some(Field::LastName),
            Self::BirthDate => Some(Field::BirthDate),
            Self::Phone => Some(Field::Phone),
            Self::Email => Some(Field::Email),
            Self::City => Some(Field::City),
            Self::Submit => None,
        }
    }
}

/// What the form wants the app to do after a key press
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    /// Nothing beyond redrawing
    Nothing,

    /// Send this draft to the server
    Submit(Draft),
}

/// The registration form as shown in the terminal: the form state plus
/// cursor positions for each text input.
#[derive(Debug)]
pub struct RegistrationForm {
    /// Draft, errors, and submission status
    form: Form,

    /// Which stop we're on
    focus: Focus,

    /// Cursor state for the text inputs. The birth date doesn't have one;
    /// it's edited with `picker`.
    inputs: Inputs,

    /// The calendar, while it's open
    picker: Option<DatePicker>,
}

/// One `Input` per text field
#[derive(Debug, Default)]
struct Inputs {
    /// Потребителско име
    username: Input,
    /// Парола
    password: Input,
    /// Име
    first_name: Input,
    /// Презиме
    middle_name: Input,
    /// Фамилия
    last_name: Input,
    /// Телефон
    phone: Input,
    /// Имейл
    email: Input,
    /// Град на живеене
    city: Input,
}

impl Inputs {
    /// The input behind a text field
    fn get_mut(&mut self, field: Field) -> Option<&mut Input> {
        match field {
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
            Field::FirstName => Some(&mut self.first_name),
            Field::MiddleName => Some(&mut self.middle_name),
            Field::LastName => Some(&mut self.last_name),
            Field::BirthDate => None,
            Field::Phone => Some(&mut self.phone),
            Field::Email => Some(&mut self.email),
            Field::City => Some(&mut self.city),
        }
    }

    /// Read-only version of `get_mut`
    fn get(&self, field: Field) -> Option<&Input> {
        match field {
            Field::Username => Some(&self.username),
            Field::Password => Some(&self.password),
            Field::FirstName => Some(&self.first_name),
            Field::MiddleName => Some(&self.middle_name),
            Field::LastName => Some(&self.last_name),
            Field::BirthDate => None,
            Field::Phone => Some(&self.phone),
            Field::Email => Some(&self.email),
            Field::City => Some(&self.city),
        }
    }
}

impl RegistrationForm {
    /// The underlying form state
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Which stop has the keyboard
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Is the date picker open?
    pub fn is_picking(&self) -> bool {
        self.picker.is_some()
    }

    /// Route a key press to the picker, the focused input, or navigation.
    pub fn handle_event(&mut self, key: KeyEvent) -> Request {
        if let Some(picker) = &mut self.picker {
            match picker.handle_event(key) {
                date_picker::Outcome::Open => {}
                date_picker::Outcome::Picked(date) => {
                    self.form.set_birth_date(date);
                    self.picker = None;
                    self.focus = self.focus.next();
                }
                date_picker::Outcome::Cancelled => self.picker = None,
            }

            return Request::Nothing;
        }

        match (key.code, self.focus) {
            (KeyCode::Tab | KeyCode::Down, _) => self.focus = self.focus.next(),
            (KeyCode::BackTab | KeyCode::Up, _) => self.focus = self.focus.prev(),
            (KeyCode::Enter, Focus::Submit) => return self.submit(),
            (KeyCode::Enter | KeyCode::Char(' '), Focus::BirthDate) => {
                self.picker = Some(DatePicker::new(self.form.draft().birth_date()));
            }
            (KeyCode::Delete | KeyCode::Backspace, Focus::BirthDate) => {
                self.form.set_birth_date(None);
            }
            (KeyCode::Enter, _) => self.focus = self.focus.next(),
            (_, focus) => {
                let Some(field) = focus.field() else {
                    return Request::Nothing;
                };

                if let Some(input) = self.inputs.get_mut(field) {
                    if input.handle_event(&Event::Key(key)).is_some() {
                        // Text fields always accept their input; only the
                        // birth date can be rejected, and it has no `Input`.
                        if let Err(err) = self.form.update(field, input.value()) {
                            tracing::warn!(?err, %field, "field rejected text input");
                        }
                    }
                }
            }
        }

        Request::Nothing
    }

    /// Start a submission and hand back the draft to send.
    pub fn submit(&mut self) -> Request {
        Request::Submit(self.form.begin_submit())
    }

    /// Apply a submission result. On success the form starts over and the
    /// server's message is returned.
    pub fn finish(&mut self, result: SubmissionResult) -> Option<String> {
        let registered = matches!(result, SubmissionResult::Registered(_));

        self.form.finish(result);

        if registered {
            self.inputs = Inputs::default();
            self.focus = Focus::Username;
            self.picker = None;
            self.form.success().map(str::to_owned)
        } else {
            None
        }
    }

    /// Render the form and, if open, the date picker over it.
    #[expect(clippy::cast_possible_truncation)]
    pub fn render(&mut self, body_area: Rect, frame: &mut Frame<'_>) {
        let column = Layout::horizontal([Constraint::Max(60)]).flex(Flex::Center);
        let [column_area] = column.areas(body_area);

        let banner_height = u16::from(self.form.success().is_some());

        let mut constraints = vec![Constraint::Length(1), Constraint::Length(banner_height)];
        constraints.extend(Field::ALL.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Length(3));
        constraints.push(Constraint::Min(0));

        let areas = Layout::vertical(constraints).split(column_area);

        frame.render_widget(Line::from(TITLE).bold().centered(), areas[0]);

        if let Some(message) = self.form.success() {
            frame.render_widget(
                Paragraph::new(message).style(Style::new().fg(Color::Black).bg(Color::Green)),
                areas[1],
            );
        }

        for (field, area) in Field::ALL.into_iter().zip(areas.iter().skip(2)) {
            let focused = self.focus().field() == Some(field);
            let error = self.form.error(field);

            let border_style = match (error.is_some(), focused) {
                (true, _) => Style::new().fg(Color::Red),
                (false, true) => Style::new().fg(Color::Blue),
                (false, false) => Style::new().fg(Color::DarkGray),
            };

            let mut block = Block::default()
                .borders(Borders::ALL)
                .title(field.label())
                .border_style(border_style);

            if let Some(message) = error {
                block = block.title_bottom(Line::from(message).red());
            }

            let width = area.width.saturating_sub(2 + 1); // -2 for the border, -1 for the cursor

            match self.inputs.get(field) {
                Some(input) => {
                    let scroll = input.visual_scroll(width as usize);
                    let text = if field.is_secret() {
                        "*".repeat(input.value().chars().count())
                    } else {
                        input.value().to_owned()
                    };

                    frame.render_widget(
                        Paragraph::new(text).scroll((0, scroll as u16)).block(block),
                        *area,
                    );

                    if focused && self.picker.is_none() {
                        frame.set_cursor_position((
                            area.x
                                + (input.visual_cursor().max(scroll) - scroll) as u16 // current end of text
                                + 1, // just past the end of the text
                            area.y + 1, // +1 row for the border/title
                        ));
                    }
                }
                None => {
                    let shown = self.form.draft().get(field);
                    let text = if shown.is_empty() {
                        Line::from("дд.мм.гггг").dark_gray()
                    } else {
                        Line::from(shown.into_owned())
                    };

                    frame.render_widget(Paragraph::new(text).block(block), *area);
                }
            }
        }

        let button_area = areas[2 + Field::ALL.len()];
        let button_style = if self.focus == Focus::Submit {
            Style::new().fg(Color::Black).bg(Color::Yellow).bold()
        } else {
            Style::new().fg(Color::Yellow)
        };
        let caption = match self.form.status() {
            Status::Idle => TITLE.to_owned(),
            Status::Submitting => format!("{TITLE}…"),
        };
        frame.render_widget(
            Paragraph::new(caption)
                .centered()
                .style(button_style)
                .block(Block::default().borders(Borders::ALL).border_style(button_style)),
            button_area,
        );

        if let Some(picker) = &self.picker {
            picker.render(frame, body_area);
        }
    }
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            form: Form::new(),
            focus: Focus::Username,
            inputs: Inputs::default(),
            picker: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;
    use enroll_core::ErrorMap;

    fn press(form: &mut RegistrationForm, code: KeyCode) -> Request {
        form.handle_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(form: &mut RegistrationForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    #[test]
    fn tab_wraps_around() {
        let mut form = RegistrationForm::default();

        for _ in 0..10 {
            press(&mut form, KeyCode::Tab);
        }

        assert_eq!(form.focus(), Focus::Username);

        press(&mut form, KeyCode::BackTab);
        assert_eq!(form.focus(), Focus::Submit);
    }

    #[test]
    fn typing_updates_only_the_focused_field() {
        let mut form = RegistrationForm::default();

        type_text(&mut form, "ivan");
        press(&mut form, KeyCode::Tab);
        type_text(&mut form, "pw");

        let draft = form.form().draft();
        assert_eq!(draft.get(Field::Username), "ivan");
        assert_eq!(draft.get(Field::Password), "pw");
        assert_eq!(draft.get(Field::FirstName), "");
    }

    #[test]
    fn picking_a_birth_date() {
        let mut form = RegistrationForm::default();
        while form.focus() != Focus::BirthDate {
            press(&mut form, KeyCode::Tab);
        }

        press(&mut form, KeyCode::Enter);
        assert!(form.is_picking());

        press(&mut form, KeyCode::Right);
        press(&mut form, KeyCode::Enter);

        assert!(!form.is_picking());
        assert_eq!(
            form.form().draft().birth_date(),
            NaiveDate::from_ymd_opt(2000, 1, 2)
        );
        assert_eq!(form.focus(), Focus::Phone);
    }

    #[test]
    fn submit_button_submits() {
        let mut form = RegistrationForm::default();
        type_text(&mut form, "ivan");
        press(&mut form, KeyCode::BackTab);

        let request = press(&mut form, KeyCode::Enter);

        let Request::Submit(draft) = request else {
            panic!("expected a submission, got {request:?}");
        };
        assert_eq!(draft.get(Field::Username), "ivan");
        assert_eq!(form.form().status(), Status::Submitting);
    }

    #[test]
    fn success_clears_inputs() {
        let mut form = RegistrationForm::default();
        type_text(&mut form, "ivan");
        form.submit();

        let message = form.finish(SubmissionResult::Registered("OK".to_string()));

        assert_eq!(message.as_deref(), Some("OK"));
        assert!(form.form().draft().is_empty());

        // typing again starts from an empty input, not the old text
        type_text(&mut form, "x");
        assert_eq!(form.form().draft().get(Field::Username), "x");
    }

    #[test]
    fn rejection_keeps_inputs() {
        let mut form = RegistrationForm::default();
        type_text(&mut form, "ivan");
        form.submit();

        let errors: ErrorMap = [(Field::Username, vec!["Taken".to_string()])]
            .into_iter()
            .collect();
        let message = form.finish(SubmissionResult::Rejected(errors));

        assert_eq!(message, None);
        assert_eq!(form.form().error(Field::Username), Some("Taken"));
        assert_eq!(form.form().draft().get(Field::Username), "ivan");
    }
}
