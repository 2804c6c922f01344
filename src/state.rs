use crate::field::UserUpdateField;
use crate::token::{Claims, TokenError};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An authenticated session. The admin flag only exists alongside a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub is_admin: bool,
    pub username: Option<String>,
}

impl Session {
    /// Builds a session from the raw token by reading its (unverified) claims.
    pub fn from_token(token: String) -> Result<Self, TokenError> {
        let claims = Claims::decode(&token)?;
        Ok(Self {
            token,
            is_admin: claims.is_admin,
            username: claims.sub,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sender: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub receiver: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub timestamp: String,
}

impl Message {
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.timestamp)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub surname: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub birthdate: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gender: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub location: String,
    #[serde(default, alias = "isAdmin")]
    pub admin: bool,
}

/// The add-user form. Unlike [`User`] it carries the password.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub surname: String,
    pub birthdate: String,
    pub gender: String,
    pub email: String,
    pub location: String,
    pub admin: bool,
}

impl NewUser {
    pub fn text(&self, field: UserUpdateField) -> Option<&str> {
        let user = self;
        Some(match field {
            UserUpdateField::Username => &user.username,
            UserUpdateField::Password => &user.password,
            UserUpdateField::Name => &user.name,
            UserUpdateField::Surname => &user.surname,
            UserUpdateField::Birthdate => &user.birthdate,
            UserUpdateField::Gender => &user.gender,
            UserUpdateField::Email => &user.email,
            UserUpdateField::Location => &user.location,
            UserUpdateField::IsAdmin => return None,
        })
    }

    /// Text input backing `field`; `None` for the admin checkbox.
    pub fn text_mut(&mut self, field: UserUpdateField) -> Option<&mut String> {
        let user = self;
        Some(match field {
            UserUpdateField::Username => &mut user.username,
            UserUpdateField::Password => &mut user.password,
            UserUpdateField::Name => &mut user.name,
            UserUpdateField::Surname => &mut user.surname,
            UserUpdateField::Birthdate => &mut user.birthdate,
            UserUpdateField::Gender => &mut user.gender,
            UserUpdateField::Email => &mut user.email,
            UserUpdateField::Location => &mut user.location,
            UserUpdateField::IsAdmin => return None,
        })
    }

    /// Every text field is filled in. The admin checkbox is never required.
    pub fn is_complete(&self) -> bool {
        [
            &self.username,
            &self.password,
            &self.name,
            &self.surname,
            &self.birthdate,
            &self.gender,
            &self.email,
            &self.location,
        ]
        .iter()
        .all(|field| !field.is_empty())
    }
}

/// A server page envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub size: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mailbox {
    Inbox,
    Outbox,
}

impl Mailbox {
    pub fn inout(self) -> &'static str {
        match self {
            Mailbox::Inbox => "in",
            Mailbox::Outbox => "out",
        }
    }
}

/// Parses the date formats the backend emits for timestamps and birthdates.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|date| date.and_utc());
    }
    raw.parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Jackson may be configured to write dates as epoch millis.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(string) => string,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}
