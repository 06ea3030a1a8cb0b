pub mod dispatch;
pub mod fetch;
pub mod post;
pub mod report;
pub mod schema;
pub mod summarize;
