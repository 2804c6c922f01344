use crate::app::use_app;
use crate::controls::INPUT;
use crate::loading::Loading;
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::*;

#[component]
pub fn Login() -> impl IntoView {
    let app = use_app();
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (clicked, set_clicked) = create_signal(false);

    let submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let app = app.clone();
        set_clicked.set(true);
        spawn_local(async move {
            let result = app
                .controller
                .login(&username.get_untracked(), &password.get_untracked())
                .await;
            set_clicked.set(false);
            match result {
                Ok(session) => app.logged_in(session),
                Err(err) => app.report(&err),
            }
        });
    };

    view! {
        <div class="flex items-center justify-center border border-gray-200 bg-gray-50 dark:bg-gray-800 dark:border-gray-700 w-full h-screen">
            <form class="flex flex-col gap-4 w-72" on:submit=submit>
                <h5 class="text-base font-semibold text-gray-500 uppercase dark:text-gray-400">
                    Login
                </h5>
                <input
                    class=INPUT
                    placeholder="Username"
                    autocomplete="username"
                    prop:value=username
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    class=INPUT
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || {
                    if clicked.get() {
                        view! {
                            <button
                                disabled
                                type="button"
                                class="text-white bg-blue-700 font-medium rounded-lg text-sm px-5 py-2.5 text-center dark:bg-blue-600 inline-flex items-center justify-center cursor-not-allowed"
                            >
                                <Loading />
                                Logging in...
                            </button>
                        }
                    } else {
                        view! {
                            <button
                                type="submit"
                                class="text-white bg-blue-700 hover:bg-blue-800 focus:ring-4 focus:ring-blue-300 font-medium rounded-lg text-sm px-5 py-2.5 dark:bg-blue-600 dark:hover:bg-blue-700 focus:outline-none dark:focus:ring-blue-800"
                            >
                                Login
                            </button>
                        }
                    }
                }}
            </form>
        </div>
    }
}
