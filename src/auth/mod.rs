mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod redirect;
mod register;
mod session;

pub use cookie::{
    DEFAULT_COOKIE_DURATION, get_session_from_cookies, invalidate_session_cookie,
    set_session_cookie,
};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use redirect::normalize_redirect_url;
pub use register::{get_register_page, register_user};
pub use session::Session;
