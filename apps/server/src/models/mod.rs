pub mod bug;
pub mod email;
pub mod user;

pub use bug::{BugReport, CreateBug, Priority, Status, StatusIcon};
pub use email::{is_valid_email, MAX_EMAIL_LEN};
pub use user::{CreateUserRequest, LoginRequest, User};
