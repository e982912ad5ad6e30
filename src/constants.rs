pub const SESSION_COOKIE: &str = "clinic_session";

pub const MSG_REGISTERED: &str = "You are now registered and can log in";
pub const MSG_LOGGED_IN: &str = "You are now logged in";
pub const MSG_LOGGED_OUT: &str = "You are now logged out";
pub const MSG_UNAUTHORIZED: &str = "Unauthorized, Please login";
pub const MSG_PATIENT_ADDED: &str = "New Patient has been successfully added!";
pub const MSG_PATIENT_DELETED: &str = "The patient has been deleted!";
pub const MSG_POST_ADDED: &str = "New Article has been successfully added!";
pub const MSG_POST_DELETED: &str = "The Article is deleted!";

pub const NAME_MAX_LEN: usize = 50;
pub const USERNAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 100;
pub const PHONE_MAX_LEN: usize = 50;
pub const AGE_MAX_LEN: usize = 50;
pub const APPOINTMENT_MAX_LEN: usize = 20;
pub const TITLE_MAX_LEN: usize = 50;
pub const AUTHOR_MAX_LEN: usize = 20;
