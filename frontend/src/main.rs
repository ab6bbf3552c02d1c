mod components;
mod services;

use std::rc::Rc;

use chrono::NaiveDate;
use gloo::timers::callback::Interval;
use shared::api::LoginRequest;
use shared::models::{Email, EmailFilter};
use shared::state::{Action, AppState, View};
use validator::Validate;
use yew::prelude::*;

use crate::components::email_detail::EmailDetail;
use crate::components::email_list::EmailList;
use crate::components::filter_bar::FilterBar;
use crate::components::header::Header;
use crate::components::login_form::LoginForm;
use crate::components::task_panel::TaskPanel;
use crate::services::api::ApiService;
use crate::services::storage;

const SYNC_INTERVAL_MS: u32 = 10 * 60 * 1000;
const TASK_REFRESH_INTERVAL_MS: u32 = 60 * 60 * 1000;

/// Reducer wrapper so `AppState` can drive `use_reducer`.
#[derive(Default, PartialEq)]
struct Store(AppState);

impl Reducible for Store {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Action) -> Rc<Self> {
        let mut state = self.0.clone();
        state.apply(action);
        Rc::new(Store(state))
    }
}

type Dispatcher = UseReducerDispatcher<Store>;

async fn fetch_emails(dispatch: Dispatcher, token: String, filter: EmailFilter) {
    match ApiService::fetch_emails(&token, &filter).await {
        Ok(emails) => dispatch.dispatch(Action::EmailsLoaded(emails)),
        Err(e) => {
            tracing::error!("Fetch error: {}", e);
            dispatch.dispatch(Action::EmailsFailed(e));
        }
    }
}

async fn fetch_tasks(dispatch: Dispatcher, token: String) {
    dispatch.dispatch(Action::TasksRequested);
    match ApiService::fetch_tasks(&token).await {
        Ok(tasks) => dispatch.dispatch(Action::TasksLoaded(tasks)),
        Err(e) => {
            tracing::error!("Error fetching tasks: {}", e);
            dispatch.dispatch(Action::TasksFailed);
        }
    }
}

async fn sync_emails(dispatch: Dispatcher, token: String, filter: EmailFilter) {
    dispatch.dispatch(Action::SyncStarted);
    match ApiService::sync_emails(&token).await {
        Ok(body) => {
            tracing::info!("Sync finished: {}", body);
            dispatch.dispatch(Action::SyncSucceeded);
            fetch_emails(dispatch, token, filter).await;
        }
        Err(e) => {
            tracing::error!("Sync error: {}", e);
            dispatch.dispatch(Action::SyncFailed(e));
        }
    }
}

async fn login(dispatch: Dispatcher, username: String, password: String) {
    let request = LoginRequest::new(username, password);
    if let Err(e) = request.validate() {
        tracing::warn!("Rejected login input: {}", e);
        dispatch.dispatch(Action::LoginFailed);
        return;
    }

    match ApiService::login(&request).await {
        Ok(token) => {
            storage::save_token(&token.access_token);
            dispatch.dispatch(Action::LoggedIn(token.access_token));
        }
        Err(e) => {
            tracing::error!("Login error: {}", e);
            dispatch.dispatch(Action::LoginFailed);
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(|| Store(AppState::restored(storage::load_token())));
    let state = &store.0;
    let token = state.session.token().map(str::to_string);

    // Initial load plus the two refresh timers. Re-runs when the session or
    // the filter changes; dropping the intervals cancels them.
    {
        let dispatch = store.dispatcher();
        use_effect_with(
            (token.clone(), state.filter.clone()),
            move |(token, filter)| {
                let mut intervals = Vec::new();

                if let Some(token) = token.clone() {
                    let filter = filter.clone();
                    wasm_bindgen_futures::spawn_local(fetch_emails(
                        dispatch.clone(),
                        token.clone(),
                        filter.clone(),
                    ));
                    wasm_bindgen_futures::spawn_local(fetch_tasks(dispatch.clone(), token.clone()));

                    intervals.push({
                        let (dispatch, token) = (dispatch.clone(), token.clone());
                        Interval::new(SYNC_INTERVAL_MS, move || {
                            wasm_bindgen_futures::spawn_local(sync_emails(
                                dispatch.clone(),
                                token.clone(),
                                filter.clone(),
                            ));
                        })
                    });
                    intervals.push(Interval::new(TASK_REFRESH_INTERVAL_MS, move || {
                        wasm_bindgen_futures::spawn_local(fetch_tasks(
                            dispatch.clone(),
                            token.clone(),
                        ));
                    }));
                }

                move || drop(intervals)
            },
        );
    }

    let on_login = {
        let dispatch = store.dispatcher();
        Callback::from(move |(username, password): (String, String)| {
            wasm_bindgen_futures::spawn_local(login(dispatch.clone(), username, password));
        })
    };

    let on_logout = {
        let dispatch = store.dispatcher();
        Callback::from(move |_: ()| {
            storage::clear_token();
            dispatch.dispatch(Action::LoggedOut);
        })
    };

    let on_sync = {
        let dispatch = store.dispatcher();
        let token = token.clone();
        let filter = state.filter.clone();
        Callback::from(move |_: ()| {
            if let Some(token) = token.clone() {
                wasm_bindgen_futures::spawn_local(sync_emails(
                    dispatch.clone(),
                    token,
                    filter.clone(),
                ));
            }
        })
    };

    let on_search = {
        let dispatch = store.dispatcher();
        Callback::from(move |term: String| dispatch.dispatch(Action::SetSearch(term)))
    };
    let on_start_date = {
        let dispatch = store.dispatcher();
        Callback::from(move |date: Option<NaiveDate>| dispatch.dispatch(Action::SetStartDate(date)))
    };
    let on_end_date = {
        let dispatch = store.dispatcher();
        Callback::from(move |date: Option<NaiveDate>| dispatch.dispatch(Action::SetEndDate(date)))
    };
    let on_select = {
        let dispatch = store.dispatcher();
        Callback::from(move |email: Email| dispatch.dispatch(Action::SelectEmail(email)))
    };
    let on_back = {
        let dispatch = store.dispatcher();
        Callback::from(move |_: ()| dispatch.dispatch(Action::BackToList))
    };

    let main = match state.view() {
        View::Login => {
            return html! {
                <LoginForm error={state.login_error.clone()} on_submit={on_login} />
            };
        }
        View::Inbox => html! {
            <>
                <FilterBar
                    filter={state.filter.clone()}
                    syncing={state.sync_status.is_syncing()}
                    on_search={on_search}
                    on_start_date={on_start_date}
                    on_end_date={on_end_date}
                    on_sync={on_sync}
                />
                <EmailList pane={state.emails.clone()} on_select={on_select} />
            </>
        },
        View::Detail(email) => html! {
            <EmailDetail email={email.clone()} on_back={on_back} />
        },
    };

    html! {
        <div id="app">
            <Header on_logout={on_logout} />
            <div class="container layout">
                <main class="email-pane">{ main }</main>
                <TaskPanel pane={state.tasks.clone()} />
            </div>
        </div>
    }
}

fn main() {
    tracing_wasm::set_as_global_default();

    yew::Renderer::<App>::new().render();
}
