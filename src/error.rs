/// Backend calls whose outcome is reported to the user. Logout is absent: it
/// always succeeds locally.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Login,
    Inbox,
    Outbox,
    ListUsers,
    SendMessage,
    SearchUsernames,
    AddUser,
    UpdateUser,
    RemoveUser,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Login => "Login failed",
            Operation::Inbox => "Failed to get inbox.",
            Operation::Outbox => "Failed to get outbox.",
            Operation::ListUsers => "Failed to list users.",
            Operation::SendMessage => "Failed to send message.",
            Operation::SearchUsernames => "Failed to search usernames.",
            Operation::AddUser => "Failed to add user",
            Operation::UpdateUser => "Failed to update user",
            Operation::RemoveUser => "Failed to remove user",
        }
    }

    pub fn success_message(self) -> Option<&'static str> {
        match self {
            Operation::SendMessage => Some("Message sent successfully"),
            Operation::AddUser => Some("User added successfully"),
            Operation::UpdateUser => Some("User updated successfully"),
            Operation::RemoveUser => Some("User removed successfully"),
            _ => None,
        }
    }

    /// Alert shown when a listing comes back with 204.
    pub fn empty_message(self) -> Option<&'static str> {
        match self {
            Operation::Inbox | Operation::Outbox => Some("No messages found."),
            Operation::ListUsers => Some("No users found."),
            _ => None,
        }
    }
}

/// Errors surfaced to the user. The `Display` text is the alert message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    #[error("All fields are required!")]
    MissingFields,

    #[error("New value is required!")]
    MissingValue,

    #[error("Please select a user to {0}")]
    NoSelection(&'static str),

    #[error("Unauthorized!")]
    Unauthorized,

    #[error("{}", .0.failure_message())]
    Failed(Operation),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_texts() {
        assert_eq!(
            ClientError::MissingFields.to_string(),
            "All fields are required!"
        );
        assert_eq!(
            ClientError::NoSelection("remove").to_string(),
            "Please select a user to remove"
        );
        assert_eq!(
            ClientError::Failed(Operation::Inbox).to_string(),
            "Failed to get inbox."
        );
        assert_eq!(ClientError::Unauthorized.to_string(), "Unauthorized!");
    }

    #[test]
    fn empty_listings() {
        assert_eq!(Operation::Outbox.empty_message(), Some("No messages found."));
        assert_eq!(Operation::ListUsers.empty_message(), Some("No users found."));
        assert_eq!(Operation::SendMessage.empty_message(), None);
    }
}
