pub mod api;
pub mod drafts;
pub mod history;
pub mod plans;
pub mod projects;
