mod dispatch;
mod event_loop;

pub use dispatch::{Envelope, PairingStats};
pub use event_loop::PairingEventLoop;
