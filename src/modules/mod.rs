pub mod audit;
pub mod auth;
pub mod dish;
pub mod media;
pub mod setmeal;

mod router;
pub use router::get_router;
