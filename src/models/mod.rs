mod notice;
mod request;
mod scrub;
mod session;

pub use notice::{Notice, NoticeFields};
pub use request::Request;
pub use scrub::FILTERED;
pub use session::Session;

pub(crate) use scrub::scrub;
