use crate::app::{use_app, Section};
use leptos::*;

const TAB: &str = "text-gray-900 rounded-lg dark:text-white hover:bg-gray-100 dark:hover:bg-gray-700 px-4 py-2";

#[component]
pub fn Nav(username: Option<String>, is_admin: bool) -> impl IntoView {
    let app = use_app();
    let section = app.section;
    let tab = move |target: Section, label: &'static str| {
        view! {
            <li>
                <a
                    href="#"
                    class=TAB
                    class:font-bold=move || section.get() == target
                    on:click=move |ev| {
                        ev.prevent_default();
                        section.set(target);
                    }
                >
                    {label}
                </a>
            </li>
        }
    };
    let logout = move |_| {
        let app = app.clone();
        spawn_local(async move {
            app.controller.logout().await;
            app.session.set(None);
        });
    };
    view! {
        <nav class="flex flex-row items-center border-b-2 dark:border-gray-800 p-2">
            <ul class="flex flex-row grow font-medium">
                {tab(Section::Inbox, "Inbox")}
                {tab(Section::Outbox, "Outbox")}
                {tab(Section::Compose, "Send message")}
                {is_admin.then(|| tab(Section::Users, "List users"))}
                {is_admin.then(|| tab(Section::AddUser, "Add user"))}
            </ul>
            <span class="text-sm text-gray-500 dark:text-gray-400 px-4">
                {username.unwrap_or_default()}
            </span>
            <button
                type="button"
                class="text-white bg-gray-800 hover:bg-gray-900 focus:outline-none focus:ring-4 focus:ring-gray-300 font-medium rounded-lg text-sm px-5 py-2.5 dark:bg-gray-800 dark:hover:bg-gray-700 dark:focus:ring-gray-700 dark:border-gray-700"
                on:click=logout
            >
                Logout
            </button>
        </nav>
    }
}
