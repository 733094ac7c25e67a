mod vm;

pub use vm::*;
