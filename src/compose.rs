use crate::app::{use_app, AppContext, Section};
use crate::controller::SearchOutcome;
use crate::controls::{BUTTON, INPUT};
use crate::error::{ClientError, Operation};
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::logging::warn;
use leptos::*;

#[component]
pub fn Compose() -> impl IntoView {
    let app = use_app();
    let receiver = create_rw_signal(String::new());
    let content = create_rw_signal(String::new());
    let suggestions = create_rw_signal(Vec::<String>::new());

    let search_app = app.clone();
    let search = move |ev| {
        let query = event_target_value(&ev);
        receiver.set(query.clone());
        let app = search_app.clone();
        let ticket = app.controller.next_search();
        spawn_local(async move {
            match app.controller.search_usernames(ticket, &query).await {
                Ok(SearchOutcome::Hidden) => suggestions.set(vec![]),
                Ok(SearchOutcome::Matches(usernames)) => suggestions.set(usernames),
                Ok(SearchOutcome::Stale) => {}
                Err(err @ ClientError::Unauthorized) => app.report(&err),
                Err(err) => warn!("{err}"),
            }
        });
    };

    let choose_app = app.clone();
    let send = move |ev: SubmitEvent| {
        ev.prevent_default();
        let app = app.clone();
        spawn_local(async move {
            let result = app
                .controller
                .send_message(&receiver.get_untracked(), &content.get_untracked())
                .await;
            match result {
                Ok(()) => {
                    if let Some(message) = Operation::SendMessage.success_message() {
                        AppContext::alert(message);
                    }
                    app.controller.retire_search();
                    receiver.set(String::new());
                    content.set(String::new());
                    suggestions.set(vec![]);
                    app.section.set(Section::Outbox);
                }
                Err(err) => app.report(&err),
            }
        });
    };

    let suggestion_list = move || {
        let usernames = suggestions.get();
        (!usernames.is_empty()).then(|| {
            let items = usernames
                .into_iter()
                .map(|username| {
                    let label = username.clone();
                    let app = choose_app.clone();
                    view! {
                        <li
                            class="px-4 py-2 cursor-pointer hover:bg-gray-100 dark:hover:bg-gray-700"
                            on:click=move |_| {
                                app.controller.retire_search();
                                receiver.set(username.clone());
                                suggestions.set(vec![]);
                            }
                        >
                            {label}
                        </li>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <ul class="max-h-64 overflow-y-auto border border-gray-300 rounded-lg dark:border-gray-600">
                    {items}
                </ul>
            }
        })
    };

    view! {
        <form class="flex flex-col gap-4 max-w-xl" on:submit=send>
            <h5 class="text-base font-semibold text-gray-500 uppercase dark:text-gray-400">
                Send message
            </h5>
            <div>
                <input
                    class=INPUT
                    placeholder="Receiver"
                    autocomplete="off"
                    prop:value=receiver
                    on:input=search
                />
                {suggestion_list}
            </div>
            <textarea
                class=INPUT
                rows="4"
                placeholder="Your message..."
                prop:value=content
                on:input=move |ev| content.set(event_target_value(&ev))
            ></textarea>
            <div>
                <button type="submit" class=BUTTON>
                    Send
                </button>
            </div>
        </form>
    }
}
