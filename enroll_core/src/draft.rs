use crate::{locale, Field};
use chrono::NaiveDate;
use std::{borrow::Cow, fmt};

/// The registration record as the user has filled it in so far. Every field
/// starts empty; the server decides what's required.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Draft {
    /// Given name
    first_name: String,

    /// Patronymic
    middle_name: String,

    /// Family name
    last_name: String,

    /// Birth date, if one has been picked
    birth_date: Option<NaiveDate>,

    /// Contact phone number
    phone: String,

    /// Contact email address
    email: String,

    /// City of residence
    city: String,

    /// Login name
    username: String,

    /// Login password
    password: String,
}

impl Draft {
    /// An empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the value of a single field, leaving the others alone.
    ///
    /// The birth date is read from text with `locale::parse`, so
    /// `07.03.1994`, `1994-03-07`, and the empty string (to clear it) all work.
    ///
    /// ## Errors
    ///
    /// `InvalidDate` if `field` is `Field::BirthDate` and the text isn't a
    /// date. The draft is unchanged in that case.
    pub fn set(&mut self, field: Field, value: &str) -> Result<(), InvalidDate> {
        match self.text_mut(field) {
            Some(slot) => {
                value.clone_into(slot);
                Ok(())
            }
            None => {
                self.birth_date = locale::parse(value).map_err(|source| InvalidDate {
                    text: value.to_owned(),
                    source,
                })?;
                Ok(())
            }
        }
    }

    /// Set the birth date directly, as a date picker would.
    pub fn set_birth_date(&mut self, date: Option<NaiveDate>) {
        self.birth_date = date;
    }

    /// The selected birth date
    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    /// The current value of a field as display text. The birth date comes
    /// back in the display format, or empty if unset.
    pub fn get(&self, field: Field) -> Cow<'_, str> {
        match field {
            Field::BirthDate => {
                Cow::Owned(self.birth_date.map(locale::display).unwrap_or_default())
            }
            _ => Cow::Borrowed(self.text(field)),
        }
    }

    /// The raw value of a plain text field. Always empty for the birth date;
    /// use `birth_date` for that.
    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::MiddleName => &self.middle_name,
            Field::LastName => &self.last_name,
            Field::BirthDate => "",
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::City => &self.city,
            Field::Username => &self.username,
            Field::Password => &self.password,
        }
    }

    /// Is every field still empty?
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The storage behind a plain text field. `None` for the birth date,
    /// which isn't stored as text.
    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::FirstName => Some(&mut self.first_name),
            Field::MiddleName => Some(&mut self.middle_name),
            Field::LastName => Some(&mut self.last_name),
            Field::BirthDate => None,
            Field::Phone => Some(&mut self.phone),
            Field::Email => Some(&mut self.email),
            Field::City => Some(&mut self.city),
            Field::Username => Some(&mut self.username),
            Field::Password => Some(&mut self.password),
        }
    }
}

// Hand-written so the password never ends up in logs.
impl fmt::Debug for Draft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Draft")
            .field("first_name", &self.first_name)
            .field("middle_name", &self.middle_name)
            .field("last_name", &self.last_name)
            .field("birth_date", &self.birth_date)
            .field("phone", &self.phone)
            .field("email", &self.email)
            .field("city", &self.city)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Birth date text we couldn't make sense of.
#[derive(Debug, thiserror::Error)]
#[error("`{text}` is not a date (expected dd.mm.yyyy)")]
pub struct InvalidDate {
    /// What the user typed
    pub text: String,

    /// Why chrono rejected it
    #[source]
    pub source: chrono::ParseError,
}
