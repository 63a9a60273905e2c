use crate::error::Error as CrateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },
}

impl From<ToolError> for CrateError {
    fn from(err: ToolError) -> Self {
        CrateError::Tool(err.to_string())
    }
}
