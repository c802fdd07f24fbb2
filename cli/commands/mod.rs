pub mod extensions;
pub mod extract;
pub mod serve;
pub mod tree;
