use shared::state::TaskPane;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TaskPanelProps {
    pub pane: TaskPane,
}

#[function_component(TaskPanel)]
pub fn task_panel(props: &TaskPanelProps) -> Html {
    let pane = &props.pane;

    let content = if pane.loading {
        html! { <p>{ "Loading tasks..." }</p> }
    } else if pane.tasks.is_empty() {
        html! { <p>{ "No tasks found for this week" }</p> }
    } else {
        html! {
            <>{ for pane.tasks.iter().map(|task| html! {
                <div class="card task-item">
                    <p class="task-description">{ task.description.clone() }</p>
                    <p class="task-assignee">{ "Assignee: " }{ task.assignee.clone() }</p>
                    if let Some(deadline) = task.deadline {
                        <p class="task-deadline">
                            { "Deadline: " }{ deadline.format("%Y-%m-%d").to_string() }
                        </p>
                    }
                    if let Some(priority) = task.priority_label() {
                        <span class="task-priority">{ priority }</span>
                    }
                </div>
            }) }</>
        }
    };

    html! {
        <aside class="task-panel">
            <h2>{ "This Week's Tasks" }</h2>
            { content }
        </aside>
    }
}
