use crate::api::HttpTransport;
use crate::compose::Compose;
use crate::config::Config;
use crate::controller::Controller;
use crate::error::ClientError;
use crate::login::Login;
use crate::mailbox::MailboxView;
use crate::nav::Nav;
use crate::state::{Mailbox, Session};
use crate::storage::LocalStorage;
use crate::users::{AddUser, Users};
use leptos::logging::error;
use leptos::*;
use std::rc::Rc;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Section {
    Inbox,
    Outbox,
    Compose,
    Users,
    AddUser,
}

/// Shared by every component through leptos context.
#[derive(Clone)]
pub struct AppContext {
    pub controller: Rc<Controller>,
    pub session: RwSignal<Option<Session>>,
    pub section: RwSignal<Section>,
}

impl AppContext {
    pub fn alert(message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!("Could not alert {err:?}");
        }
    }

    pub fn confirm(message: &str) -> bool {
        window().confirm_with_message(message).unwrap_or(false)
    }

    /// Shows the error once. A 401 has already ended the session in the
    /// controller; mirror that into the view.
    pub fn report(&self, err: &ClientError) {
        Self::alert(&err.to_string());
        if matches!(err, ClientError::Unauthorized) {
            self.session.set(self.controller.session());
        }
    }

    pub fn logged_in(&self, session: Session) {
        self.section.set(Section::Inbox);
        self.session.set(Some(session));
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[component]
pub fn App(config: Config) -> impl IntoView {
    let transport = Rc::new(HttpTransport::new(config.api_url.clone()));
    let controller = Rc::new(Controller::new(&config, transport, Rc::new(LocalStorage)));
    let session = create_rw_signal(controller.restore());
    let section = create_rw_signal(Section::Inbox);
    provide_context(AppContext {
        controller,
        session,
        section,
    });

    view! {
        <div class="min-h-dvh dark:bg-gray-900 dark:text-white">
            {move || match session.get() {
                Some(session) => view! { <Shell session /> }.into_view(),
                None => view! { <Login /> }.into_view(),
            }}
        </div>
    }
}

#[component]
fn Shell(session: Session) -> impl IntoView {
    let section = use_app().section;
    let is_admin = session.is_admin;
    view! {
        <Nav username=session.username is_admin />
        <main class="p-4">
            {move || match section.get() {
                Section::Outbox => view! { <MailboxView mailbox=Mailbox::Outbox /> }.into_view(),
                Section::Compose => view! { <Compose /> }.into_view(),
                Section::Users if is_admin => view! { <Users /> }.into_view(),
                Section::AddUser if is_admin => view! { <AddUser /> }.into_view(),
                _ => view! { <MailboxView mailbox=Mailbox::Inbox /> }.into_view(),
            }}
        </main>
    }
}
