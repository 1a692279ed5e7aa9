pub mod extractors;
pub mod session;

pub use extractors::FunctionAuth;
pub use session::{
    clear_session, get_user_id_from_session, set_flash, set_user_session, take_flash,
    AuthenticatedUser,
};
