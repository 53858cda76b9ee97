pub mod client;
pub mod models;
pub mod paginator;

pub use client::RobotEventsClient;
