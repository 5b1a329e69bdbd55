pub mod error;
pub mod registry;
pub mod session_directory;
pub mod waiting_queue;

pub use error::PairingError;
pub use registry::ConnectionRegistry;
pub use session_directory::SessionDirectory;
pub use waiting_queue::WaitingQueue;
