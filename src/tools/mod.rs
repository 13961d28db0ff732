//! Tool system: trait, argument parsing, and the country lookups.

pub mod arguments;
pub mod country;
pub mod tool;
pub mod types;

pub use arguments::ToolArguments;
pub use tool::{FunctionTool, Tool};
pub use types::ToolParameters;
