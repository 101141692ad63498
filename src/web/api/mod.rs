pub mod databank;
pub mod error;
pub mod ping;
