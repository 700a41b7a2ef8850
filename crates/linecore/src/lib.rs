// Linecore library exports

pub mod history;
pub mod layout;
pub mod line;
pub mod state;
pub mod tty;
pub mod width;

pub use history::History;
pub use layout::{Layout, Position};
pub use line::LineBuffer;
pub use state::State;
pub use tty::{Tty, VirtualTty};

#[cfg(test)]
mod tests;
