pub mod access;
pub mod combinators;
pub mod streams;

pub use access::StreamIter;
