mod session;

pub use session::{Session, SessionSnapshot, SessionStatus};
