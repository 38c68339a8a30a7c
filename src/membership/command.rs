pub mod add_member_cmd;
pub mod remove_member_cmd;
pub mod show_member_cmd;
pub mod update_email_cmd;
