pub mod alert;
pub mod email_detail;
pub mod email_list;
pub mod filter_bar;
pub mod header;
pub mod login_form;
pub mod task_panel;
