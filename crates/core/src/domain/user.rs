// User Domain Model

use super::passport::Passport;
use serde::{Deserialize, Serialize};

/// User ID (assigned by the store)
pub type UserId = i64;

/// Full name as returned by the name resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
}

/// User Entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport: Passport,
}

/// User that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub patronymic: String,
    pub passport: Passport,
}

impl NewUser {
    /// A user known only by passport; name fields stay empty
    pub fn from_passport(passport: Passport) -> Self {
        Self {
            name: String::new(),
            surname: String::new(),
            patronymic: String::new(),
            passport,
        }
    }

    pub fn with_name(mut self, person: PersonName) -> Self {
        self.name = person.name;
        self.surname = person.surname;
        self.patronymic = person.patronymic;
        self
    }
}

/// Partial update; `None` leaves the field as stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub passport: Option<Passport>,
}

impl User {
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(surname) = patch.surname {
            self.surname = surname;
        }
        if let Some(patronymic) = patch.patronymic {
            self.patronymic = patronymic;
        }
        if let Some(passport) = patch.passport {
            self.passport = passport;
        }
    }
}
