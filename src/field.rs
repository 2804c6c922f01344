use crate::state::Mailbox;
use std::fmt::Debug;

/// A column the user can sort or filter a listing by.
pub trait Field: Copy + Debug + PartialEq + 'static {
    /// Every field, in the order the controls list them.
    const ALL: &'static [Self];

    /// Name understood by the backend and used as the `<option>` value.
    fn name(self) -> &'static str;

    fn label(self) -> &'static str;

    /// Date columns sort chronologically instead of alphabetically.
    fn is_date(self) -> bool;

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.name() == name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageField {
    Sender,
    Receiver,
    Content,
    Timestamp,
}

impl Field for MessageField {
    const ALL: &'static [Self] = &[
        MessageField::Sender,
        MessageField::Receiver,
        MessageField::Content,
        MessageField::Timestamp,
    ];

    fn name(self) -> &'static str {
        match self {
            MessageField::Sender => "sender",
            MessageField::Receiver => "receiver",
            MessageField::Content => "content",
            MessageField::Timestamp => "timestamp",
        }
    }

    fn label(self) -> &'static str {
        match self {
            MessageField::Sender => "From",
            MessageField::Receiver => "To",
            MessageField::Content => "Content",
            MessageField::Timestamp => "Timestamp",
        }
    }

    fn is_date(self) -> bool {
        self == MessageField::Timestamp
    }
}

impl MessageField {
    /// Columns the backend can filter `mailbox` by. The inbox is always
    /// addressed to the user and the outbox always sent by them, so only
    /// the other party and the content are searchable.
    pub fn filterable(mailbox: Mailbox) -> &'static [Self] {
        match mailbox {
            Mailbox::Inbox => &[MessageField::Sender, MessageField::Content],
            Mailbox::Outbox => &[MessageField::Receiver, MessageField::Content],
        }
    }

    pub fn default_filter(mailbox: Mailbox) -> Self {
        match mailbox {
            Mailbox::Inbox => MessageField::Sender,
            Mailbox::Outbox => MessageField::Receiver,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserField {
    Username,
    Name,
    Surname,
    Birthdate,
    Gender,
    Email,
    Location,
    Admin,
}

impl Field for UserField {
    const ALL: &'static [Self] = &[
        UserField::Username,
        UserField::Name,
        UserField::Surname,
        UserField::Birthdate,
        UserField::Gender,
        UserField::Email,
        UserField::Location,
        UserField::Admin,
    ];

    fn name(self) -> &'static str {
        match self {
            UserField::Username => "username",
            UserField::Name => "name",
            UserField::Surname => "surname",
            UserField::Birthdate => "birthdate",
            UserField::Gender => "gender",
            UserField::Email => "email",
            UserField::Location => "location",
            UserField::Admin => "isadmin",
        }
    }

    fn label(self) -> &'static str {
        match self {
            UserField::Username => "Username",
            UserField::Name => "Name",
            UserField::Surname => "Surname",
            UserField::Birthdate => "Birthdate",
            UserField::Gender => "Gender",
            UserField::Email => "Email",
            UserField::Location => "Location",
            UserField::Admin => "Admin",
        }
    }

    fn is_date(self) -> bool {
        self == UserField::Birthdate
    }
}

/// Fields the backend accepts on `PUT /user/{username}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UserUpdateField {
    Username,
    Password,
    Name,
    Surname,
    Birthdate,
    Gender,
    Email,
    Location,
    IsAdmin,
}

impl Field for UserUpdateField {
    const ALL: &'static [Self] = &[
        UserUpdateField::Username,
        UserUpdateField::Password,
        UserUpdateField::Name,
        UserUpdateField::Surname,
        UserUpdateField::Birthdate,
        UserUpdateField::Gender,
        UserUpdateField::Email,
        UserUpdateField::Location,
        UserUpdateField::IsAdmin,
    ];

    fn name(self) -> &'static str {
        match self {
            UserUpdateField::Username => "username",
            UserUpdateField::Password => "password",
            UserUpdateField::Name => "name",
            UserUpdateField::Surname => "surname",
            UserUpdateField::Birthdate => "birthdate",
            UserUpdateField::Gender => "gender",
            UserUpdateField::Email => "email",
            UserUpdateField::Location => "location",
            UserUpdateField::IsAdmin => "isAdmin",
        }
    }

    fn label(self) -> &'static str {
        match self {
            UserUpdateField::Username => "Username",
            UserUpdateField::Password => "Password",
            UserUpdateField::Name => "Name",
            UserUpdateField::Surname => "Surname",
            UserUpdateField::Birthdate => "Birthdate",
            UserUpdateField::Gender => "Gender",
            UserUpdateField::Email => "Email",
            UserUpdateField::Location => "Location",
            UserUpdateField::IsAdmin => "Admin",
        }
    }

    fn is_date(self) -> bool {
        self == UserUpdateField::Birthdate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for field in UserUpdateField::ALL {
            assert_eq!(UserUpdateField::from_name(field.name()), Some(*field));
        }
        assert_eq!(MessageField::from_name("timestamp"), Some(MessageField::Timestamp));
        assert_eq!(UserField::from_name("password"), None);
        assert_eq!(UserField::from_name("isadmin"), Some(UserField::Admin));
    }

    #[test]
    fn inbox_filters_by_sender_or_content() {
        let fields = MessageField::filterable(Mailbox::Inbox);
        assert_eq!(fields, &[MessageField::Sender, MessageField::Content]);
        assert!(fields.contains(&MessageField::default_filter(Mailbox::Inbox)));
    }

    #[test]
    fn outbox_filters_by_receiver_or_content() {
        let fields = MessageField::filterable(Mailbox::Outbox);
        assert_eq!(fields, &[MessageField::Receiver, MessageField::Content]);
        assert_eq!(
            MessageField::default_filter(Mailbox::Outbox),
            MessageField::Receiver
        );
    }

    #[test]
    fn date_columns() {
        assert!(MessageField::Timestamp.is_date());
        assert!(UserField::Birthdate.is_date());
        assert!(!UserField::Username.is_date());
    }
}
