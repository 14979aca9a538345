pub mod initialize_jar;
pub mod send_tip;
pub mod withdraw;

pub use initialize_jar::*;
pub use send_tip::*;
pub use withdraw::*;
