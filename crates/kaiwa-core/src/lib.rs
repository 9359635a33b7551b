pub mod actions;
pub mod config;
pub mod dialog;
pub mod keywords;
pub mod reducer;
pub mod state;

pub use actions::*;
pub use dialog::*;
pub use keywords::*;
pub use reducer::*;
pub use state::*;
