pub mod ack;
pub mod agenda;
pub mod appointment;
pub mod config;
pub mod dateparse;
pub mod error;
pub mod io;
pub mod notify;
pub mod paths;
pub mod store;
pub mod window;

pub use appointment::Appointment;
pub use error::{MtgError, Result};
pub use store::{FileBlob, MemoryBlob, Persistence, Store};
