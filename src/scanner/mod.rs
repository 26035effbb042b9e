pub mod abi;
pub mod concern;
pub mod contracts;
pub mod parser;
pub mod trade;
