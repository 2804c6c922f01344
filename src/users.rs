use crate::api::Filter;
use crate::app::{use_app, AppContext, Section};
use crate::controls::{
    FieldSelect, FilterControls, SortControls, BUTTON, DANGER, INPUT, SELECT, TABLE, THEAD,
};
use crate::error::Operation;
use crate::field::{Field, UserField, UserUpdateField};
use crate::loading::Loading;
use crate::pager::{Pager, Pagination};
use crate::sort::{sort_items, Direction};
use crate::state::{NewUser, Page, User};
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::*;

const REMOVE_PROMPT: &str = "Are you sure you want to remove this user?";

fn announce(operation: Operation) {
    if let Some(message) = operation.success_message() {
        AppContext::alert(message);
    }
}

/// Applies a reload of the user list and reports whether it had rows. The
/// selection is dropped either way: the selected user may be gone.
fn show_users(
    loaded: Option<Page<User>>,
    page: RwSignal<Option<Page<User>>>,
    selected: RwSignal<Option<String>>,
) -> bool {
    selected.set(None);
    match loaded {
        Some(loaded) => {
            page.set(Some(loaded));
            true
        }
        None => false,
    }
}

/// Admin listing with single-user selection for update and removal.
#[component]
pub fn Users() -> impl IntoView {
    let app = use_app();
    let sort_field = create_rw_signal(UserField::Username);
    let direction = create_rw_signal(Direction::Asc);
    let filter_field = create_rw_signal(UserField::Username);
    let filter_value = create_rw_signal(String::new());
    let page = create_rw_signal(None::<Page<User>>);
    let selected = create_rw_signal(None::<String>);
    let update_field = create_rw_signal(UserUpdateField::Name);
    let new_value = create_rw_signal(String::new());
    let (loading, set_loading) = create_signal(false);

    let fetch_app = app.clone();
    let fetch = move |index: u32| {
        let app = fetch_app.clone();
        let filter = Some(Filter {
            field: filter_field.get_untracked(),
            value: filter_value.get_untracked(),
        });
        set_loading.set(true);
        spawn_local(async move {
            let result = app.controller.users(index, filter).await;
            set_loading.set(false);
            match result {
                Ok(loaded) => {
                    if !show_users(loaded, page, selected) {
                        AppContext::alert(Operation::ListUsers.empty_message().unwrap_or_default());
                    }
                }
                Err(err) => app.report(&err),
            }
        });
    };
    fetch(0);

    let update_app = app.clone();
    let reload = fetch.clone();
    let update = move |_| {
        let app = update_app.clone();
        let reload = reload.clone();
        spawn_local(async move {
            let username = selected.get_untracked();
            let result = app
                .controller
                .update_user(
                    username.as_deref(),
                    update_field.get_untracked(),
                    &new_value.get_untracked(),
                )
                .await;
            match result {
                Ok(()) => {
                    announce(Operation::UpdateUser);
                    new_value.set(String::new());
                    reload(0);
                }
                Err(err) => app.report(&err),
            }
        });
    };

    let reload = fetch.clone();
    let remove = move |_| {
        let app = app.clone();
        let reload = reload.clone();
        spawn_local(async move {
            let username = selected.get_untracked();
            let result = app
                .controller
                .remove_user(username.as_deref(), |_| AppContext::confirm(REMOVE_PROMPT))
                .await;
            match result {
                Ok(true) => {
                    announce(Operation::RemoveUser);
                    reload(0);
                }
                Ok(false) => {}
                Err(err) => app.report(&err),
            }
        });
    };

    let rows = move || {
        page.with(|page| {
            page.as_ref().map(|page| {
                let mut users = page.content.clone();
                sort_items(&mut users, sort_field.get(), direction.get());
                users
                    .into_iter()
                    .map(|user| view! { <UserRow user selected /> })
                    .collect::<Vec<_>>()
            })
        })
    };
    let on_select = fetch.clone();
    let pager = move || {
        page.with(|page| page.as_ref().map(Pagination::from_page))
            .map(|pagination| view! { <Pager pagination on_select=on_select.clone() /> })
    };

    view! {
        <div class="flex flex-col gap-4">
            <h5 class="text-base font-semibold text-gray-500 uppercase dark:text-gray-400">
                Users
                {move || loading.get().then(|| view! { <Loading /> })}
            </h5>
            <div class="flex flex-row flex-wrap gap-4">
                <SortControls field=sort_field direction />
                <FilterControls
                    fields=UserField::ALL
                    field=filter_field
                    value=filter_value
                    on_apply=move || fetch(0)
                />
            </div>
            <table class=TABLE>
                <thead class=THEAD>
                    <tr>
                        <th class="px-6 py-3">Select</th>
                        {UserField::ALL
                            .iter()
                            .map(|field| view! { <th class="px-6 py-3">{field.label()}</th> })
                            .collect::<Vec<_>>()}
                    </tr>
                </thead>
                <tbody>{rows}</tbody>
            </table>
            {pager}
            <div class="flex flex-row flex-wrap items-center gap-2">
                <span class="text-sm">Update</span>
                <FieldSelect
                    fields=UserUpdateField::ALL
                    selected=update_field.get_untracked()
                    on_change=move |field| update_field.set(field)
                />
                <input
                    class=INPUT
                    placeholder="New value"
                    prop:value=new_value
                    on:input=move |ev| new_value.set(event_target_value(&ev))
                />
                <button type="button" class=BUTTON on:click=update>
                    Update user
                </button>
                <button type="button" class=DANGER on:click=remove>
                    Remove user
                </button>
            </div>
        </div>
    }
}

#[component]
fn UserRow(user: User, selected: RwSignal<Option<String>>) -> impl IntoView {
    let username = user.username.clone();
    let checked = username.clone();
    view! {
        <tr class="bg-white border-b dark:bg-gray-800 dark:border-gray-700">
            <td class="px-6 py-4">
                <input
                    type="checkbox"
                    name="user-select"
                    prop:checked=move || selected.get().as_deref() == Some(checked.as_str())
                    on:change=move |ev| {
                        if event_target_checked(&ev) {
                            selected.set(Some(username.clone()));
                        } else {
                            selected.set(None);
                        }
                    }
                />
            </td>
            <td class="px-6 py-4 font-medium text-gray-900 dark:text-white">{user.username}</td>
            <td class="px-6 py-4">{user.name}</td>
            <td class="px-6 py-4">{user.surname}</td>
            <td class="px-6 py-4">{user.birthdate}</td>
            <td class="px-6 py-4">{user.gender}</td>
            <td class="px-6 py-4">{user.email}</td>
            <td class="px-6 py-4">{user.location}</td>
            <td class="px-6 py-4">{user.admin.to_string()}</td>
        </tr>
    }
}

/// Add-user form.
#[component]
pub fn AddUser() -> impl IntoView {
    let app = use_app();
    let form = create_rw_signal(NewUser::default());

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let app = app.clone();
        spawn_local(async move {
            let user = form.get_untracked();
            match app.controller.add_user(&user).await {
                Ok(()) => {
                    announce(Operation::AddUser);
                    form.set(NewUser::default());
                    app.section.set(Section::Users);
                }
                Err(err) => app.report(&err),
            }
        });
    };

    let text = move |field: UserUpdateField, kind: &'static str| {
        view! {
            <input
                class=INPUT
                type=kind
                placeholder=field.label()
                prop:value=move || {
                    form.with(|user| user.text(field).unwrap_or_default().to_string())
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|user| {
                        if let Some(slot) = user.text_mut(field) {
                            *slot = value;
                        }
                    });
                }
            />
        }
    };

    view! {
        <form class="flex flex-col gap-4 max-w-xl" on:submit=submit>
            <h5 class="text-base font-semibold text-gray-500 uppercase dark:text-gray-400">
                Add user
            </h5>
            {text(UserUpdateField::Username, "text")}
            {text(UserUpdateField::Password, "password")}
            {text(UserUpdateField::Name, "text")}
            {text(UserUpdateField::Surname, "text")}
            {text(UserUpdateField::Birthdate, "date")}
            <select
                class=SELECT
                prop:value=move || form.with(|user| user.gender.clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|user| user.gender = value);
                }
            >
                <option value="">Gender</option>
                <option value="Male">Male</option>
                <option value="Female">Female</option>
                <option value="Other">Other</option>
            </select>
            {text(UserUpdateField::Email, "email")}
            {text(UserUpdateField::Location, "text")}
            <label class="flex flex-row items-center gap-2 text-sm">
                <input
                    type="checkbox"
                    prop:checked=move || form.with(|user| user.admin)
                    on:change=move |ev| {
                        let checked = event_target_checked(&ev);
                        form.update(|user| user.admin = checked);
                    }
                />
                Admin
            </label>
            <div>
                <button type="submit" class=BUTTON>
                    Add user
                </button>
            </div>
        </form>
    }
}
