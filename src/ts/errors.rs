use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeSitterError {
    #[error("failed to set language for parser: {message}")]
    LanguageSet { message: String },

    #[error("failed to parse source code")]
    ParseFailed,
}
