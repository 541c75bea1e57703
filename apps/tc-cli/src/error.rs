use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] tc_project::ProjectError),

    #[error("Lifecycle error: {0}")]
    Problem(#[from] tc_problem::ProblemError),

    #[error("Solve failed: {0}")]
    Solve(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type CliResult<T> = Result<T, CliError>;
