//! Application state module

mod app_state;
mod entities;
mod forms;
mod route;

pub use app_state::*;
pub use entities::*;
pub use forms::*;
pub use route::*;
