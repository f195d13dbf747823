pub mod demo;
pub mod interactive;
pub mod oneshot;

pub use demo::demo_command;
pub use interactive::interactive_command;
pub use oneshot::oneshot_command;
