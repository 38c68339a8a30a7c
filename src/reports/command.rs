pub mod borrows_per_member_cmd;
pub mod overdue_members_cmd;
pub mod top_borrowed_cmd;
