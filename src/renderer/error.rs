use thiserror::Error;

use super::device::ShaderStage;

/// Failure while building the renderer's GL objects.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("error creating {stage} shader object")]
    CreateShader { stage: ShaderStage },
    #[error("error compiling {stage} shader: '{log}'")]
    Compile { stage: ShaderStage, log: String },
    #[error("error creating shader program")]
    CreateProgram,
    #[error("error linking shader program: '{log}'")]
    Link { log: String },
    #[error("invalid shader program: '{log}'")]
    Validate { log: String },
    #[error("error creating {0}")]
    CreateObject(&'static str),
    #[error("shader program has no active `{0}` attribute")]
    MissingAttribute(&'static str),
}
