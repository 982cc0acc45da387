pub mod health;
pub mod reports;
pub mod students;

pub use health::health_check;
pub use reports::{cleanup_reports, generate_report};
pub use students::list_students;
