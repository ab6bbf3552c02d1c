use chrono::NaiveDate;
use shared::models::EmailFilter;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filter: EmailFilter,
    pub syncing: bool,
    pub on_search: Callback<String>,
    pub on_start_date: Callback<Option<NaiveDate>>,
    pub on_end_date: Callback<Option<NaiveDate>>,
    pub on_sync: Callback<()>,
}

/// Value of an `<input type="date">`; cleared or malformed input is unset.
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let on_search = props.on_search.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    });

    let on_start_date = props.on_start_date.reform(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        parse_date_input(&input.value())
    });

    let on_end_date = props.on_end_date.reform(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        parse_date_input(&input.value())
    });

    let on_sync = props.on_sync.reform(|_: MouseEvent| ());

    html! {
        <div class="filter-bar">
            <input
                type="text"
                class="search-input"
                placeholder="Search emails..."
                value={props.filter.search_term.clone()}
                oninput={on_search}
            />
            <input
                type="date"
                value={date_value(props.filter.start_date)}
                onchange={on_start_date}
            />
            <input
                type="date"
                value={date_value(props.filter.end_date)}
                onchange={on_end_date}
            />
            <button class="btn btn-primary" onclick={on_sync} disabled={props.syncing}>
                { if props.syncing { "Syncing..." } else { "Sync" } }
            </button>
        </div>
    }
}
