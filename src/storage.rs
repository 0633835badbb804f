pub mod games;
pub mod interface;
