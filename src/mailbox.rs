use crate::api::Filter;
use crate::app::{use_app, AppContext};
use crate::controls::{FilterControls, SortControls, TABLE, THEAD};
use crate::error::Operation;
use crate::field::{Field, MessageField};
use crate::loading::Loading;
use crate::message::MessageRow;
use crate::pager::{Pager, Pagination};
use crate::sort::{sort_items, Direction};
use crate::state::{Mailbox, Message, Page};
use leptos::*;

/// Inbox or outbox listing: filter, sort, table and pager.
#[component]
pub fn MailboxView(mailbox: Mailbox) -> impl IntoView {
    let app = use_app();
    let sort_field = create_rw_signal(MessageField::Timestamp);
    let direction = create_rw_signal(Direction::Desc);
    let filter_field = create_rw_signal(MessageField::default_filter(mailbox));
    let filter_value = create_rw_signal(String::new());
    let page = create_rw_signal(None::<Page<Message>>);
    let (loading, set_loading) = create_signal(false);
    let operation = match mailbox {
        Mailbox::Inbox => Operation::Inbox,
        Mailbox::Outbox => Operation::Outbox,
    };

    let fetch = move |index: u32| {
        let app = app.clone();
        let filter = Some(Filter {
            field: filter_field.get_untracked(),
            value: filter_value.get_untracked(),
        });
        set_loading.set(true);
        spawn_local(async move {
            let result = app.controller.messages(mailbox, index, filter).await;
            set_loading.set(false);
            match result {
                Ok(Some(loaded)) => page.set(Some(loaded)),
                Ok(None) => AppContext::alert(operation.empty_message().unwrap_or_default()),
                Err(err) => app.report(&err),
            }
        });
    };
    fetch(0);

    let rows = move || {
        page.with(|page| {
            page.as_ref().map(|page| {
                let mut messages = page.content.clone();
                sort_items(&mut messages, sort_field.get(), direction.get());
                messages
                    .into_iter()
                    .map(|message| view! { <MessageRow message /> })
                    .collect::<Vec<_>>()
            })
        })
    };
    let on_select = fetch.clone();
    let pager = move || {
        page.with(|page| page.as_ref().map(Pagination::from_page))
            .map(|pagination| view! { <Pager pagination on_select=on_select.clone() /> })
    };
    let apply = fetch.clone();
    let title = match mailbox {
        Mailbox::Inbox => "Inbox",
        Mailbox::Outbox => "Outbox",
    };

    view! {
        <div class="flex flex-col gap-4">
            <h5 class="text-base font-semibold text-gray-500 uppercase dark:text-gray-400">
                {title}
                {move || loading.get().then(|| view! { <Loading /> })}
            </h5>
            <div class="flex flex-row flex-wrap gap-4">
                <SortControls field=sort_field direction />
                <FilterControls
                    fields=MessageField::filterable(mailbox)
                    field=filter_field
                    value=filter_value
                    on_apply=move || apply(0)
                />
            </div>
            <table class=TABLE>
                <thead class=THEAD>
                    <tr>
                        {MessageField::ALL
                            .iter()
                            .map(|field| view! { <th class="px-6 py-3">{field.label()}</th> })
                            .collect::<Vec<_>>()}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {pager}
        </div>
    }
}
