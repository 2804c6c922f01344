use crate::api::{self, ApiRequest, ApiResponse, Filter, ListQuery, Transport};
use crate::config::Config;
use crate::error::{ClientError, Operation};
use crate::field::{MessageField, UserField, UserUpdateField};
use crate::state::{Mailbox, Message, NewUser, Page, Session, User};
use crate::storage::{Storage, AUTH_TOKEN_KEY, IS_ADMIN_KEY};
use leptos::logging::{log, warn};
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Result of a username lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty query: the suggestion list should be hidden.
    Hidden,
    Matches(Vec<String>),
    /// A newer search was issued after this one; drop the result.
    Stale,
}

/// Owns the session and performs every backend operation on its behalf.
///
/// Shared as `Rc<Controller>` on the browser main thread. Session borrows
/// never span an `.await`.
pub struct Controller {
    transport: Rc<dyn Transport>,
    storage: Rc<dyn Storage>,
    session: RefCell<Option<Session>>,
    search_generation: Cell<u64>,
    page_size: u32,
}

impl Controller {
    pub fn new(config: &Config, transport: Rc<dyn Transport>, storage: Rc<dyn Storage>) -> Self {
        Self {
            transport,
            storage,
            session: RefCell::new(None),
            search_generation: Cell::new(0),
            page_size: config.page_size,
        }
    }

    pub fn session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn token(&self) -> Option<String> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.token.clone())
    }

    fn save(&self, session: &Session) {
        self.storage.set(AUTH_TOKEN_KEY, &session.token);
        self.storage
            .set(IS_ADMIN_KEY, if session.is_admin { "true" } else { "false" });
        *self.session.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.session.borrow_mut().take();
        self.storage.remove(AUTH_TOKEN_KEY);
        self.storage.remove(IS_ADMIN_KEY);
    }

    /// Picks up a session persisted by an earlier page load. The token is
    /// decoded locally and not checked against the server or its expiry.
    pub fn restore(&self) -> Option<Session> {
        let token = self
            .storage
            .get(AUTH_TOKEN_KEY)
            .filter(|token| !token.is_empty())?;
        match Session::from_token(token) {
            Ok(session) => {
                log!("Restored session for {:?}", session.username);
                self.save(&session);
                Some(session)
            }
            Err(err) => {
                warn!("Discarding stored token {err}");
                self.clear();
                None
            }
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<Session, ClientError> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::MissingFields);
        }
        let response = self
            .transport
            .send(api::login(username, password))
            .await
            .map_err(|err| {
                warn!("Login request failed {err}");
                ClientError::Failed(Operation::Login)
            })?;
        if !response.is_success() {
            warn!("Login rejected with status {}", response.status);
            return Err(ClientError::Failed(Operation::Login));
        }
        let session = Session::from_token(response.body.trim().to_string()).map_err(|err| {
            warn!("Login returned an unreadable token {err}");
            ClientError::Failed(Operation::Login)
        })?;
        self.save(&session);
        log!("Logged in as {username}");
        Ok(session)
    }

    /// Tells the server, then drops the local session whatever it answered.
    pub async fn logout(&self) {
        if let Some(token) = self.token() {
            match self.transport.send(api::logout(&token)).await {
                Ok(response) if response.is_success() => {}
                Ok(response) => warn!("Logout answered with status {}", response.status),
                Err(err) => warn!("Logout request failed {err}"),
            }
        }
        self.clear();
        log!("Logged out");
    }

    async fn call<R>(&self, operation: Operation, request: R) -> Result<ApiResponse, ClientError>
    where
        R: FnOnce(&str) -> ApiRequest,
    {
        let token = self.token().ok_or(ClientError::Unauthorized)?;
        let response = self
            .transport
            .send(request(&token))
            .await
            .map_err(|err| {
                warn!("{operation:?} request failed {err}");
                ClientError::Failed(operation)
            })?;
        if response.status == 401 {
            warn!("{operation:?} unauthorized, logging out");
            // A late 401 for a previous session must not end the current one.
            if self.token().as_deref() == Some(token.as_str()) {
                self.clear();
            }
            return Err(ClientError::Unauthorized);
        }
        if !response.is_success() {
            warn!("{operation:?} answered with status {}", response.status);
            return Err(ClientError::Failed(operation));
        }
        Ok(response)
    }

    /// `Ok(None)` when the server has nothing to list (204).
    async fn fetch_page<T, R>(
        &self,
        operation: Operation,
        request: R,
    ) -> Result<Option<Page<T>>, ClientError>
    where
        T: DeserializeOwned,
        R: FnOnce(&str) -> ApiRequest,
    {
        let response = self.call(operation, request).await?;
        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }
        response.json().map(Some).map_err(|err| {
            warn!("{operation:?} returned an unreadable page {err}");
            ClientError::Failed(operation)
        })
    }

    pub async fn messages(
        &self,
        mailbox: Mailbox,
        page: u32,
        filter: Option<Filter<MessageField>>,
    ) -> Result<Option<Page<Message>>, ClientError> {
        let operation = match mailbox {
            Mailbox::Inbox => Operation::Inbox,
            Mailbox::Outbox => Operation::Outbox,
        };
        let query = ListQuery {
            page,
            size: self.page_size,
            filter,
        };
        self.fetch_page(operation, |token| api::messages(token, mailbox, &query))
            .await
    }

    pub async fn users(
        &self,
        page: u32,
        filter: Option<Filter<UserField>>,
    ) -> Result<Option<Page<User>>, ClientError> {
        let query = ListQuery {
            page,
            size: self.page_size,
            filter,
        };
        self.fetch_page(Operation::ListUsers, |token| api::users(token, &query))
            .await
    }

    pub async fn send_message(&self, receiver: &str, content: &str) -> Result<(), ClientError> {
        if receiver.is_empty() || content.is_empty() {
            return Err(ClientError::MissingFields);
        }
        self.call(Operation::SendMessage, |token| {
            api::send_message(token, receiver, content)
        })
        .await?;
        Ok(())
    }

    /// Numbers a username search. Take the ticket when the query changes,
    /// before awaiting anything, so issue order is preserved.
    pub fn next_search(&self) -> SearchTicket {
        let ticket = self.search_generation.get().wrapping_add(1);
        self.search_generation.set(ticket);
        SearchTicket(ticket)
    }

    /// Outdates every search in flight, e.g. once a suggestion is chosen.
    pub fn retire_search(&self) {
        self.next_search();
    }

    /// Looks up usernames containing `query`. Resolves to
    /// [`SearchOutcome::Stale`] when a newer ticket was taken meanwhile.
    pub async fn search_usernames(
        &self,
        ticket: SearchTicket,
        query: &str,
    ) -> Result<SearchOutcome, ClientError> {
        if query.is_empty() {
            return Ok(SearchOutcome::Hidden);
        }
        let result = self
            .call(Operation::SearchUsernames, |token| {
                api::search_usernames(token, query)
            })
            .await;
        let response = match result {
            Err(ClientError::Unauthorized) => return Err(ClientError::Unauthorized),
            _ if self.search_generation.get() != ticket.0 => return Ok(SearchOutcome::Stale),
            result => result?,
        };
        response.json().map(SearchOutcome::Matches).map_err(|err| {
            warn!("Username search returned an unreadable body {err}");
            ClientError::Failed(Operation::SearchUsernames)
        })
    }

    pub async fn add_user(&self, user: &NewUser) -> Result<(), ClientError> {
        if !user.is_complete() {
            return Err(ClientError::MissingFields);
        }
        self.call(Operation::AddUser, |token| api::add_user(token, user))
            .await?;
        Ok(())
    }

    pub async fn update_user(
        &self,
        selected: Option<&str>,
        field: UserUpdateField,
        value: &str,
    ) -> Result<(), ClientError> {
        let username = selected.ok_or(ClientError::NoSelection("update"))?;
        if value.is_empty() {
            return Err(ClientError::MissingValue);
        }
        self.call(Operation::UpdateUser, |token| {
            api::update_user(token, username, field, value)
        })
        .await?;
        Ok(())
    }

    /// Returns `Ok(false)` when `confirm` declines; nothing is sent then.
    pub async fn remove_user<C>(
        &self,
        selected: Option<&str>,
        confirm: C,
    ) -> Result<bool, ClientError>
    where
        C: FnOnce(&str) -> bool,
    {
        let username = selected.ok_or(ClientError::NoSelection("remove"))?;
        if !confirm(username) {
            return Ok(false);
        }
        self.call(Operation::RemoveUser, |token| api::remove_user(token, username))
            .await?;
        Ok(true)
    }
}
