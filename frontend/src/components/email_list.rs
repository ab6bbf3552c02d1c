use shared::models::Email;
use shared::state::EmailPane;
use yew::prelude::*;

use crate::components::alert::Alert;

#[derive(Properties, PartialEq)]
pub struct EmailListProps {
    pub pane: EmailPane,
    pub on_select: Callback<Email>,
}

/// What the list area shows. An error wins over the loading placeholder.
#[derive(Debug, PartialEq)]
enum Content<'a> {
    Error(&'a str),
    Loading,
    Emails(&'a [Email]),
}

fn content(pane: &EmailPane) -> Content<'_> {
    match &pane.error {
        Some(error) => Content::Error(error),
        None if pane.loading => Content::Loading,
        None => Content::Emails(&pane.emails),
    }
}

#[function_component(EmailList)]
pub fn email_list(props: &EmailListProps) -> Html {
    let emails = match content(&props.pane) {
        Content::Error(error) => {
            return html! { <Alert message={error.to_string()} destructive=true /> };
        }
        Content::Loading => {
            return html! {
                <div class="loading">{ "Loading..." }</div>
            };
        }
        Content::Emails(emails) => emails,
    };

    html! {
        <div class="email-list">
            { for emails.iter().map(|email| {
                let on_click = {
                    let email = email.clone();
                    props.on_select.reform(move |_: MouseEvent| email.clone())
                };
                html! {
                    <div class="card email-item" key={email.id} onclick={on_click}>
                        <div class="email-header">
                            <h3>{ email.subject.clone() }</h3>
                            <span class="email-date">{ email.date.format("%Y-%m-%d").to_string() }</span>
                        </div>
                        <p class="email-sender">{ email.sender.clone() }</p>
                        <p class="email-preview">{ email.body.clone() }</p>
                    </div>
                }
            }) }
        </div>
    }
}
