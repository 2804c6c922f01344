use crate::field::Field;
use crate::sort::Direction;
use leptos::*;

pub const BUTTON: &str = "text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 me-2 mb-2 dark:bg-blue-600 dark:hover:bg-blue-700 focus:outline-none dark:focus:ring-blue-800";
pub const DANGER: &str = "text-white bg-red-700 hover:bg-red-800 focus:ring-4 focus:ring-red-300 font-medium rounded-lg text-sm px-5 py-2.5 me-2 mb-2 dark:bg-red-600 dark:hover:bg-red-700 focus:outline-none dark:focus:ring-red-900";
pub const INPUT: &str = "block p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white";
pub const SELECT: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:text-white";
pub const TABLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
pub const THEAD: &str = "text-xs text-gray-700 uppercase bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

#[component]
pub fn FieldSelect<F, C>(
    fields: &'static [F],
    selected: F,
    on_change: C,
) -> impl IntoView
where
    F: Field,
    C: Fn(F) + 'static,
{
    let options = fields
        .iter()
        .map(|field| {
            view! {
                <option value=field.name() selected=*field == selected>
                    {field.label()}
                </option>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <select
            class=SELECT
            on:change=move |ev| {
                if let Some(field) = F::from_name(&event_target_value(&ev)) {
                    on_change(field);
                }
            }
        >
            {options}
        </select>
    }
}

/// Column and direction used to order the loaded page.
#[component]
pub fn SortControls<F>(field: RwSignal<F>, direction: RwSignal<Direction>) -> impl IntoView
where
    F: Field,
{
    let initial = direction.get_untracked();
    let directions = [Direction::Asc, Direction::Desc]
        .into_iter()
        .map(|option| {
            view! {
                <option value=option.name() selected=option == initial>
                    {option.label()}
                </option>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <div class="flex flex-row items-center gap-2">
            <span class="text-sm">Sort by</span>
            <FieldSelect fields=F::ALL selected=field.get_untracked() on_change=move |f| field.set(f) />
            <select
                class=SELECT
                on:change=move |ev| direction.set(Direction::from_name(&event_target_value(&ev)))
            >
                {directions}
            </select>
        </div>
    }
}

/// Single field/value filter sent to the server with the next fetch.
/// `fields` are the columns the listing endpoint can filter by.
#[component]
pub fn FilterControls<F, A>(
    fields: &'static [F],
    field: RwSignal<F>,
    value: RwSignal<String>,
    on_apply: A,
) -> impl IntoView
where
    F: Field,
    A: Fn() + 'static,
{
    view! {
        <div class="flex flex-row items-center gap-2">
            <span class="text-sm">Filter</span>
            <FieldSelect fields selected=field.get_untracked() on_change=move |f| field.set(f) />
            <input
                class=INPUT
                placeholder="Value"
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <button type="button" class=BUTTON on:click=move |_| on_apply()>
                Apply
            </button>
        </div>
    }
}
