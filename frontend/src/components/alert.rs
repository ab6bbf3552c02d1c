use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct AlertProps {
    pub message: AttrValue,
    #[prop_or_default]
    pub destructive: bool,
}

#[function_component(Alert)]
pub fn alert(props: &AlertProps) -> Html {
    let class = if props.destructive {
        "alert alert-destructive"
    } else {
        "alert"
    };

    html! {
        <div class={class} role="alert">
            <div class="alert-description">{ props.message.clone() }</div>
        </div>
    }
}
