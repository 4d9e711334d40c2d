use thiserror::Error;

use crate::value::Value;

#[derive(Error, Debug)]
pub enum FloeError {
    #[error("attribute `{0}` has already been declared")]
    DuplicateAttribute(String),

    #[error("`{0}` is not a freeze policy (expected \"deep\", \"shallow\", or \"none\")")]
    InvalidFreezePolicy(String),

    #[error("construction input must be a map, got: {0}")]
    InvalidInput(&'static str),

    #[error("attribute `{0}` missing from input")]
    MissingAttribute(String),

    #[error("attribute `{name}` received invalid value: {value:?}")]
    InvalidValue { name: String, value: Value },

    #[error("attribute `{name}` is declared with an invalid default value: {value:?}")]
    InvalidDefaultValue { name: String, value: Value },
}

pub type Result<T> = std::result::Result<T, FloeError>;
