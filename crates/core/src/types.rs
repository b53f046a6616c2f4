/// Content of a file to be included as context for code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// File path (relative or absolute).
    pub path: String,
    /// Full text content of the file.
    pub content: String,
}

/// A resolved code-generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// The task describing what code to generate or modify.
    pub prompt: String,
    /// Technology or framework the task targets.
    pub technology: Option<String>,
    /// Files to include as context.
    pub files: Vec<FileContent>,
}
