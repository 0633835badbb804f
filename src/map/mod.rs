pub mod campus;
pub mod consts;
pub mod geofence;
pub mod handlers;
pub mod models;
pub mod responses;
pub mod scoring;
