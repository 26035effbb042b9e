pub mod node;
pub mod scanner;
pub mod utils;
