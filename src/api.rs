use crate::field::{Field, MessageField, UserUpdateField};
use crate::state::{Mailbox, NewUser};
use async_trait::async_trait;
use leptos::logging::warn;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error("Base url {0} cannot carry a path")]
    BaseUrl(Url),
}

/// A backend call, independent of how it is carried over the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub authorization: Option<String>,
}

impl ApiRequest {
    fn new(method: Method, path: &[&str]) -> Self {
        Self {
            method,
            path: path.iter().map(|segment| segment.to_string()).collect(),
            query: vec![],
            body: None,
            authorization: None,
        }
    }

    fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    fn authorized(mut self, token: &str) -> Self {
        self.authorization = Some(token.to_string());
        self
    }

    /// Resolves the request against the api base. Path segments and query
    /// values are percent-encoded.
    pub fn url(&self, base: &Url) -> Result<Url, TransportError> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::BaseUrl(base.clone()))?
            .pop_if_empty()
            .extend(&self.path);
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    base: Url,
}

impl HttpTransport {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url(&self.base)?;
        let mut builder = self.client.request(request.method, url);
        if let Some(token) = &request.authorization {
            builder = builder.header(AUTHORIZATION, token.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

/// Paging and optional filtering for a listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<F> {
    pub page: u32,
    pub size: u32,
    pub filter: Option<Filter<F>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter<F> {
    pub field: F,
    pub value: String,
}

impl<F: Field> ListQuery<F> {
    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        request = request.query("page", self.page).query("size", self.size);
        match &self.filter {
            Some(filter) if !filter.value.is_empty() => request
                .query("field", filter.field.name())
                .query("value", &filter.value),
            _ => request,
        }
    }
}

pub fn login(username: &str, password: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, &["user", "login"])
        .json(json!({ "username": username, "password": password }))
}

pub fn logout(token: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, &["user", "logout"]).authorized(token)
}

/// A filter on a column the mailbox cannot be searched by is left out.
pub fn messages(token: &str, mailbox: Mailbox, query: &ListQuery<MessageField>) -> ApiRequest {
    let request = ApiRequest::new(Method::GET, &["message"])
        .authorized(token)
        .query("inout", mailbox.inout());
    match &query.filter {
        Some(filter) if !MessageField::filterable(mailbox).contains(&filter.field) => {
            warn!("{:?} cannot filter by {:?}", mailbox, filter.field);
            ListQuery {
                filter: None,
                ..*query
            }
            .apply(request)
        }
        _ => query.apply(request),
    }
}

pub fn send_message(token: &str, receiver: &str, content: &str) -> ApiRequest {
    ApiRequest::new(Method::POST, &["message"])
        .authorized(token)
        .json(json!({ "receiver": receiver, "content": content }))
}

pub fn users<F: Field>(token: &str, query: &ListQuery<F>) -> ApiRequest {
    query.apply(ApiRequest::new(Method::GET, &["user"]).authorized(token))
}

pub fn search_usernames(token: &str, username: &str) -> ApiRequest {
    ApiRequest::new(Method::GET, &["user", "search"])
        .authorized(token)
        .query("username", username)
}

pub fn add_user(token: &str, user: &NewUser) -> ApiRequest {
    ApiRequest::new(Method::POST, &["user"])
        .authorized(token)
        .json(json!(user))
}

/// The backend reads `field`/`value` from the query string; the same pair is
/// also sent as the JSON body.
pub fn update_user(token: &str, username: &str, field: UserUpdateField, value: &str) -> ApiRequest {
    let mut body = serde_json::Map::new();
    body.insert(field.name().to_string(), Value::String(value.to_string()));
    ApiRequest::new(Method::PUT, &["user", username])
        .authorized(token)
        .query("field", field.name())
        .query("value", value)
        .json(Value::Object(body))
}

pub fn remove_user(token: &str, username: &str) -> ApiRequest {
    ApiRequest::new(Method::DELETE, &["user", username]).authorized(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::UserField;

    fn base() -> Url {
        Url::parse("http://localhost:8080/api").unwrap()
    }

    #[test]
    fn inbox_url_without_filter() {
        let query = ListQuery::<MessageField> {
            page: 2,
            size: 10,
            filter: None,
        };
        let request = messages("tok", Mailbox::Inbox, &query);
        assert_eq!(request.method, Method::GET);
        assert_eq!(request.authorization.as_deref(), Some("tok"));
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "http://localhost:8080/api/message?inout=in&page=2&size=10"
        );
    }

    fn filtered<F>(field: F, value: &str) -> ListQuery<F> {
        ListQuery {
            page: 0,
            size: 10,
            filter: Some(Filter {
                field,
                value: value.to_string(),
            }),
        }
    }

    #[test]
    fn admin_filter_uses_backend_column() {
        let url = users("tok", &filtered(UserField::Admin, "true"))
            .url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/user?page=0&size=10&field=isadmin&value=true"
        );
    }

    #[test]
    fn inbox_filters() {
        let url = messages("tok", Mailbox::Inbox, &filtered(MessageField::Sender, "bob"))
            .url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/message?inout=in&page=0&size=10&field=sender&value=bob"
        );
        let url = messages("tok", Mailbox::Inbox, &filtered(MessageField::Timestamp, "2024"))
            .url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/message?inout=in&page=0&size=10"
        );
    }

    #[test]
    fn outbox_filters() {
        let url = messages("tok", Mailbox::Outbox, &filtered(MessageField::Receiver, "bob"))
            .url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/message?inout=out&page=0&size=10&field=receiver&value=bob"
        );
        let url = messages("tok", Mailbox::Outbox, &filtered(MessageField::Sender, "bob"))
            .url(&base())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/message?inout=out&page=0&size=10"
        );
    }

    #[test]
    fn filter_is_encoded_and_skipped_when_empty() {
        let mut query = ListQuery {
            page: 0,
            size: 10,
            filter: Some(Filter {
                field: UserField::Location,
                value: "New York&co".to_string(),
            }),
        };
        let url = users("tok", &query).url(&base()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/user?page=0&size=10&field=location&value=New+York%26co"
        );

        query.filter = Some(Filter {
            field: UserField::Location,
            value: String::new(),
        });
        let url = users("tok", &query).url(&base()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/user?page=0&size=10");

        query.filter = Some(Filter {
            field: UserField::Location,
            value: " ".to_string(),
        });
        let url = users("tok", &query).url(&base()).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/user?page=0&size=10&field=location&value=+"
        );
    }

    #[test]
    fn trailing_slash_base() {
        let base = Url::parse("https://chat.example.com/api/").unwrap();
        let url = logout("tok").url(&base).unwrap();
        assert_eq!(url.as_str(), "https://chat.example.com/api/user/logout");
    }

    #[test]
    fn login_has_no_authorization() {
        let request = login("alice", "secret");
        assert_eq!(request.authorization, None);
        assert_eq!(
            request.body,
            Some(json!({"username": "alice", "password": "secret"}))
        );
    }

    #[test]
    fn update_sends_field_twice() {
        let request = update_user("tok", "bob smith", UserUpdateField::IsAdmin, "true");
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.body, Some(json!({"isAdmin": "true"})));
        assert_eq!(
            request.url(&base()).unwrap().as_str(),
            "http://localhost:8080/api/user/bob%20smith?field=isAdmin&value=true"
        );
    }

    #[test]
    fn remove_targets_username() {
        let request = remove_user("tok", "bob");
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, vec!["user", "bob"]);
        assert_eq!(request.body, None);
    }

    #[test]
    fn response_status_classes() {
        let ok = ApiResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.is_success());
        let denied = ApiResponse {
            status: 401,
            body: String::new(),
        };
        assert!(!denied.is_success());
    }
}
