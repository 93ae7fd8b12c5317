use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// One of the nine inputs on the registration form. Variants are declared in
/// the order the form displays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(proptest_derive::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// Login name for the course platform
    Username,

    /// Login password. Never displayed in the clear.
    Password,

    /// Given name
    FirstName,

    /// Patronymic
    MiddleName,

    /// Family name
    LastName,

    /// Picked with the date picker rather than typed
    BirthDate,

    /// Contact phone number
    Phone,

    /// Contact email address
    Email,

    /// City of residence
    City,
}

impl Field {
    /// Every field, in display order.
    pub const ALL: [Field; 9] = [
        Field::Username,
        Field::Password,
        Field::FirstName,
        Field::MiddleName,
        Field::LastName,
        Field::BirthDate,
        Field::Phone,
        Field::Email,
        Field::City,
    ];

    /// The key this field uses in request bodies and server error maps.
    pub fn key(self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Password => "password",
            Self::FirstName => "first_name",
            Self::MiddleName => "middle_name",
            Self::LastName => "last_name",
            Self::BirthDate => "birth_date",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::City => "city",
        }
    }

    /// The placeholder label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Username => "Потребителско име",
            Self::Password => "Парола",
            Self::FirstName => "Име",
            Self::MiddleName => "Презиме",
            Self::LastName => "Фамилия",
            Self::BirthDate => "Дата на раждане",
            Self::Phone => "Телефон",
            Self::Email => "Имейл",
            Self::City => "Град на живеене",
        }
    }

    /// Should the input be masked when rendered?
    pub fn is_secret(self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A key that doesn't name any field on the form.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}`")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| UnknownField(key.to_owned()))
    }
}
