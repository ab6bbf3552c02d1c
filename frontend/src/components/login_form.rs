use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::alert::Alert;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub error: Option<String>,
    /// Receives `(username, password)`.
    pub on_submit: Callback<(String, String)>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let username = use_state(String::new);
    let password = use_state(String::new);

    let on_username_input = {
        let username = username.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            username.set(input.value());
        })
    };

    let on_password_input = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(((*username).clone(), (*password).clone()));
        })
    };

    html! {
        <div class="login-container">
            <div class="card login-card">
                <h2>{ "CCL Email Fetcher" }</h2>
                <form onsubmit={on_submit}>
                    <input
                        type="text"
                        placeholder="Username"
                        value={(*username).clone()}
                        oninput={on_username_input}
                    />
                    <input
                        type="password"
                        placeholder="Password"
                        value={(*password).clone()}
                        oninput={on_password_input}
                    />
                    if let Some(error) = &props.error {
                        <Alert message={error.clone()} destructive=true />
                    }
                    <button type="submit" class="btn btn-primary">{ "Login" }</button>
                </form>
            </div>
        </div>
    }
}
