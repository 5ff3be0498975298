pub mod loader;
pub mod process;
pub mod xes;
