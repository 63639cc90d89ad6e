mod shadowing;
mod todo_marker;
mod typecheck;
mod unwrap_used;

pub use shadowing::Shadowing;
pub use todo_marker::TodoMarker;
pub use typecheck::Typecheck;
pub use unwrap_used::UnwrapUsed;

use lintsift::checker::Checker;

/// All built-in checkers in registration order.
pub fn all_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(Typecheck),
        Box::new(Shadowing),
        Box::new(UnwrapUsed),
        Box::new(TodoMarker),
    ]
}
