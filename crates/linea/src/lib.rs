// Linea library exports

pub mod config;
pub mod session;
pub mod term;

pub use config::Config;
pub use session::{ReadOutcome, Session};
pub use term::CrosstermTty;
