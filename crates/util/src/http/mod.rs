pub mod http_path_resolution;
pub mod parser;

pub use http_path_resolution::*;
pub use parser::*;
