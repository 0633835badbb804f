pub mod consts;
pub mod handlers;
pub mod models;
pub mod requests;
pub mod responses;
pub mod services;
#[cfg(test)]
pub mod tests;
