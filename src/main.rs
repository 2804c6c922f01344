mod api;
mod app;
mod compose;
mod config;
mod controller;
mod controls;
mod error;
mod field;
mod loading;
mod login;
mod mailbox;
mod message;
mod nav;
mod pager;
mod sort;
mod state;
mod storage;
mod token;
mod users;

use app::*;
use config::Config;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = Config::from_build_env().expect("MESSAGING_API_URL must be a valid URL");
    mount_to_body(move || {
        view! { <App config=config.clone() /> }
    })
}
