// Routes module

pub mod health;
pub mod messages;
pub mod models;

pub use health::health_routes;
pub use messages::messages_routes;
pub use models::models_routes;
