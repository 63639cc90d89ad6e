pub mod context;
pub mod descriptor;
pub mod registry;
pub mod traits;

pub use context::CheckContext;
pub use descriptor::CheckerDescriptor;
pub use registry::CheckerRegistry;
pub use traits::Checker;
