use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub on_logout: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let on_logout = props.on_logout.reform(|_: MouseEvent| ());

    html! {
        <header class="header">
            <div class="container">
                <h1>{ "CCL Email Fetcher" }</h1>
                <button class="btn btn-outline" onclick={on_logout}>{ "Logout" }</button>
            </div>
        </header>
    }
}
