pub mod bug;
pub mod mailer;
pub mod notification;
pub mod submission;
pub mod users;

pub use bug::{BugStore, PgBugStore};
pub use mailer::{create_mailer, EmailSender, MailError, OutgoingEmail};
pub use notification::{BugNotifier, FunctionNotifier, NotifyError};
pub use submission::{BugSubmission, SubmitError};
pub use users::UsersService;
