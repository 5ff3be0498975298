use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessModelError {
    #[error("InvalidParameter({0})")]
    InvalidParameter(String),
    #[error("NotFound({0})")]
    NotFound(String),
    #[error("AlreadyExists({0})")]
    AlreadyExists(String),
    #[error("serde_json error({0:?})")]
    SerdeJsonError(serde_json::error::Error),
    #[error("serde_yaml error({0:?})")]
    SerdeYamlError(serde_yaml::Error),
    #[error("IoError({0:?})")]
    IoError(std::io::Error),
    #[error("RuntimeError({0})")]
    RuntimeError(String),
}

impl From<serde_json::Error> for ProcessModelError {
    fn from(e: serde_json::Error) -> Self {
        ProcessModelError::SerdeJsonError(e)
    }
}
impl From<serde_yaml::Error> for ProcessModelError {
    fn from(e: serde_yaml::Error) -> Self {
        ProcessModelError::SerdeYamlError(e)
    }
}
impl From<std::io::Error> for ProcessModelError {
    fn from(e: std::io::Error) -> Self {
        ProcessModelError::IoError(e)
    }
}
