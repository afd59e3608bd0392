pub mod client;
pub mod types;

pub use client::{HomeworkApi, PracticumClient};
pub use types::{check_response, parse_status, HomeworkStatus};
