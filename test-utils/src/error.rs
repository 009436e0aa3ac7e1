use thiserror::Error;

/// Errors that can occur while setting up a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// Binding or inspecting the mock server socket failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
