pub mod dataset;
pub mod db;
pub mod routes;
pub mod startup;
pub mod templates;
mod utils;

pub use dataset::*;
pub use db::*;
pub use routes::*;
pub use startup::*;
pub use utils::*;
