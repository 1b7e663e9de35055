pub mod state;

pub use state::{SessionIdentity, SessionState};
