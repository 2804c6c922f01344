use crate::controls::SELECT;
use crate::state::Page;
use leptos::*;

const BUTTON: &str = "text-white bg-gray-800 hover:bg-gray-900 focus:outline-none focus:ring-4 focus:ring-gray-300 font-medium rounded-lg text-sm px-5 py-2.5 dark:bg-gray-800 dark:hover:bg-gray-700 dark:focus:ring-gray-700 dark:border-gray-700";

/// Position within a paged listing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageOption {
    pub value: u32,
    pub label: String,
    pub selected: bool,
}

impl Pagination {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        Self {
            current: page.number,
            total: page.total_pages,
        }
    }

    /// One option per page, zero-based values, one-based labels.
    pub fn options(&self) -> Vec<PageOption> {
        (0..self.total)
            .map(|value| PageOption {
                value,
                label: (value + 1).to_string(),
                selected: value == self.current,
            })
            .collect()
    }

    /// The same listing positioned at `current`.
    pub fn at(self, current: u32) -> Self {
        Self { current, ..self }
    }

    /// `None` at the first page.
    pub fn previous(&self) -> Option<u32> {
        if self.current == 0 || self.total == 0 {
            return None;
        }
        Some((self.current - 1).min(self.total - 1))
    }

    /// `None` at the last page.
    pub fn next(&self) -> Option<u32> {
        let next = self.current.checked_add(1)?;
        (next < self.total).then_some(next)
    }
}

/// Page selector with Previous/Next. Steps are taken from the page the
/// selector shows, which can differ from the loaded page after a failed fetch.
#[component]
pub fn Pager<F>(pagination: Pagination, on_select: F) -> impl IntoView
where
    F: Fn(u32) + 'static + Clone,
{
    let shown = create_rw_signal(pagination.current);
    let select = on_select.clone();
    let on_change = move |ev| {
        if let Ok(page) = event_target_value(&ev).parse::<u32>() {
            shown.set(page);
            select(page);
        }
    };
    let step = move |target: fn(&Pagination) -> Option<u32>| {
        let on_select = on_select.clone();
        move |_: ev::MouseEvent| {
            if let Some(page) = target(&pagination.at(shown.get_untracked())) {
                shown.set(page);
                on_select(page);
            }
        }
    };
    let options = pagination
        .options()
        .into_iter()
        .map(|option| {
            view! {
                <option value=option.value.to_string() selected=option.selected>
                    {option.label}
                </option>
            }
        })
        .collect::<Vec<_>>();
    view! {
        <div class="flex flex-row items-center gap-2 m-4">
            <button type="button" class=BUTTON on:click=step(Pagination::previous)>
                Previous
            </button>
            <select
                class=SELECT
                prop:value=move || shown.get().to_string()
                on:change=on_change
            >
                {options}
            </select>
            <button type="button" class=BUTTON on:click=step(Pagination::next)>
                Next
            </button>
        </div>
    }
}
