use crate::field::{Field, MessageField, UserField};
use crate::state::{parse_instant, Message, User};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn name(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Asc => "Ascending",
            Direction::Desc => "Descending",
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "desc" => Direction::Desc,
            _ => Direction::Asc,
        }
    }
}

/// Comparable projection of one column of a row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    /// Lowercased text.
    Text(String),
    /// `None` when the value is not a parseable date, ordered first.
    Date(Option<DateTime<Utc>>),
}

impl SortKey {
    /// Date columns compare as instants, everything else as lowercased text.
    pub fn of<F: Field>(field: F, value: &str) -> Self {
        if field.is_date() {
            SortKey::Date(parse_instant(value))
        } else {
            SortKey::Text(value.to_lowercase())
        }
    }
}

/// A row whose columns can be read as text for sorting.
pub trait Sortable {
    type Field: Field;

    fn column(&self, field: Self::Field) -> &str;

    fn sort_key(&self, field: Self::Field) -> SortKey {
        SortKey::of(field, self.column(field))
    }
}

impl Sortable for Message {
    type Field = MessageField;

    fn column(&self, field: MessageField) -> &str {
        match field {
            MessageField::Sender => &self.sender,
            MessageField::Receiver => &self.receiver,
            MessageField::Content => &self.content,
            MessageField::Timestamp => &self.timestamp,
        }
    }
}

impl Sortable for User {
    type Field = UserField;

    fn column(&self, field: UserField) -> &str {
        match field {
            UserField::Username => &self.username,
            UserField::Name => &self.name,
            UserField::Surname => &self.surname,
            UserField::Birthdate => &self.birthdate,
            UserField::Gender => &self.gender,
            UserField::Email => &self.email,
            UserField::Location => &self.location,
            UserField::Admin if self.admin => "true",
            UserField::Admin => "false",
        }
    }
}

/// Stable sort of the loaded page only. Rows with equal keys keep their
/// server order in both directions.
pub fn sort_items<T: Sortable>(items: &mut [T], field: T::Field, direction: Direction) {
    items.sort_by(|a, b| {
        let ordering: Ordering = a.sort_key(field).cmp(&b.sort_key(field));
        match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(sender: &str, content: &str, timestamp: &str) -> Message {
        Message {
            sender: sender.to_string(),
            receiver: "me".to_string(),
            content: content.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    fn senders(messages: &[Message]) -> Vec<&str> {
        messages.iter().map(|m| m.sender.as_str()).collect()
    }

    #[test]
    fn text_is_case_insensitive() {
        let mut messages = vec![
            message("bob", "", ""),
            message("Alice", "", ""),
            message("carol", "", ""),
        ];
        sort_items(&mut messages, MessageField::Sender, Direction::Asc);
        assert_eq!(senders(&messages), vec!["Alice", "bob", "carol"]);
        sort_items(&mut messages, MessageField::Sender, Direction::Desc);
        assert_eq!(senders(&messages), vec!["carol", "bob", "Alice"]);
    }

    #[test]
    fn dates_are_chronological() {
        // "early" is lexically the largest string.
        let mut messages = vec![
            message("late", "", "2024-03-01T10:00:00Z"),
            message("early", "", "2024-01-01T01:00:00+05:00"),
            message("middle", "", "2023-12-31T23:00:00Z"),
        ];
        sort_items(&mut messages, MessageField::Timestamp, Direction::Asc);
        assert_eq!(senders(&messages), vec!["early", "middle", "late"]);
        sort_items(&mut messages, MessageField::Timestamp, Direction::Desc);
        assert_eq!(senders(&messages), vec!["late", "middle", "early"]);
    }

    #[test]
    fn equal_keys_keep_server_order() {
        let mut messages = vec![
            message("a", "Same", "1"),
            message("b", "other", "2"),
            message("c", "same", "3"),
            message("d", "SAME", "4"),
        ];
        sort_items(&mut messages, MessageField::Content, Direction::Asc);
        assert_eq!(senders(&messages), vec!["b", "a", "c", "d"]);
        sort_items(&mut messages, MessageField::Content, Direction::Desc);
        assert_eq!(senders(&messages), vec!["a", "c", "d", "b"]);
    }

    #[test]
    fn key_kind_follows_column() {
        assert_eq!(
            SortKey::of(UserField::Name, "Alice"),
            SortKey::Text("alice".to_string())
        );
        assert_eq!(
            SortKey::of(UserField::Birthdate, "2000-01-01"),
            SortKey::Date(parse_instant("2000-01-01"))
        );
        assert!(matches!(
            SortKey::of(MessageField::Timestamp, "later"),
            SortKey::Date(None)
        ));
    }

    #[test]
    fn direction_names() {
        for direction in [Direction::Asc, Direction::Desc] {
            assert_eq!(Direction::from_name(direction.name()), direction);
        }
        assert_eq!(Direction::from_name("sideways"), Direction::Asc);
    }

    #[test]
    fn unparseable_dates_sort_first() {
        let mut messages = vec![
            message("valid", "", "2024-01-01T00:00:00Z"),
            message("broken", "", "not a date"),
        ];
        sort_items(&mut messages, MessageField::Timestamp, Direction::Asc);
        assert_eq!(senders(&messages), vec!["broken", "valid"]);
    }

    #[test]
    fn users_by_birthdate() {
        let user = |username: &str, birthdate: &str| User {
            username: username.to_string(),
            name: String::new(),
            surname: String::new(),
            birthdate: birthdate.to_string(),
            gender: String::new(),
            email: String::new(),
            location: String::new(),
            admin: false,
        };
        let mut users = vec![
            user("x", "2001-02-03"),
            user("y", "1999-12-31"),
            user("z", "2001-01-30"),
        ];
        sort_items(&mut users, UserField::Birthdate, Direction::Asc);
        let order: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(order, vec!["y", "z", "x"]);
    }
}
