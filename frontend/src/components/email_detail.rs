use shared::models::Email;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct EmailDetailProps {
    pub email: Email,
    pub on_back: Callback<()>,
}

#[function_component(EmailDetail)]
pub fn email_detail(props: &EmailDetailProps) -> Html {
    let email = &props.email;
    let on_back = props.on_back.reform(|_: MouseEvent| ());

    html! {
        <div class="card email-detail">
            <button class="btn btn-outline" onclick={on_back}>{ "Back to Inbox" }</button>
            <h2>{ email.subject.clone() }</h2>
            <div class="email-meta">
                <p>{ "From: " }{ email.sender.clone() }</p>
                <p>{ "To: " }{ email.recipient.clone() }</p>
                <p>{ email.date.format("%Y-%m-%d %H:%M:%S UTC").to_string() }</p>
            </div>
            <div class="email-body">{ email.body.clone() }</div>
        </div>
    }
}
