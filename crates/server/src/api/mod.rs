pub mod auctions;
pub mod handlers;
pub mod middleware;
pub mod registrations;
pub mod routes;

pub use routes::create_router;
