use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("tensor error: {0}")]
    Tensor(#[from] tm_tensor::TensorError),
}

pub type Result<T> = std::result::Result<T, CliError>;
