/// Fatal conditions of a check run
#[derive(Debug)]
pub enum CheckError {
    /// No override was given and the conventional install path does not exist
    MissingExecutable(String),
    /// The executable string was empty after splitting
    EmptyCommand,
    /// The executable string could not be split into words
    BadCommand(shell_words::ParseError),
    /// The checker process could not be started
    Launch(String, std::io::Error),
    /// Checker stdout was not JSON at all
    InvalidJson(serde_json::Error),
    /// Checker stdout was JSON, but not a flow report
    UnexpectedShape(serde_json::Error),
}

impl std::fmt::Display for CheckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckError::MissingExecutable(guess) => write!(
                f,
                "No flow-bin found at '{}' (pass in as an input)",
                guess
            ),
            CheckError::EmptyCommand => write!(f, "Flow executable is empty"),
            CheckError::BadCommand(e) => write!(f, "Failed to parse flow executable: {}", e),
            CheckError::Launch(cmd, e) => write!(f, "Failed to launch '{}': {}", cmd, e),
            CheckError::InvalidJson(e) => write!(f, "Flow output is not valid JSON: {}", e),
            CheckError::UnexpectedShape(e) => {
                write!(f, "Flow output does not look like a flow report: {}", e)
            }
        }
    }
}

impl std::error::Error for CheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CheckError::BadCommand(e) => Some(e),
            CheckError::Launch(_, e) => Some(e),
            CheckError::InvalidJson(e) | CheckError::UnexpectedShape(e) => Some(e),
            CheckError::MissingExecutable(_) | CheckError::EmptyCommand => None,
        }
    }
}

impl CheckError {
    /// Classify a serde_json failure as either broken JSON or a shape mismatch
    pub fn from_json(e: serde_json::Error) -> Self {
        match e.classify() {
            serde_json::error::Category::Data => CheckError::UnexpectedShape(e),
            _ => CheckError::InvalidJson(e),
        }
    }
}
