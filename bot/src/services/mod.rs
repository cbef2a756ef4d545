pub mod alert;
pub mod notifier;
pub mod scanner;
