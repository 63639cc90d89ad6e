pub mod program;
pub mod source_tree;
pub mod visitor;

pub use program::{FileIr, LazyProgram, Program};
pub use source_tree::SourceTree;
pub use visitor::{BindingIr, FunctionIr, MethodCallIr};
