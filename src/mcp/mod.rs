pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod tools;
