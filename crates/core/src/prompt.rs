use crate::context::file_context;
use crate::types::GenerateRequest;

/// Build the code-generation prompt for a request.
pub fn build_generate_prompt(request: &GenerateRequest) -> String {
    let technology = request.technology.as_deref().unwrap_or("Not specified");
    let context = file_context(&request.files);

    format!(
        "\
Task: {task}

Technical Context: {technology}

Existing Codebase Context:
{context}

Please provide:
1. Complete, working code solution
2. Explanation of the implementation
3. Integration suggestions with existing code
4. Best practices and potential improvements
",
        task = request.prompt,
    )
}

/// Build the single-file analysis prompt.
pub fn build_analysis_prompt(path: &str, content: &str) -> String {
    format!(
        "\
Analyze this file and provide insights:

File: {path}
Content:
```
{content}
```

Please provide:
1. File purpose and main functionality
2. Key components or configurations
3. Potential issues or improvements
"
    )
}

/// Build the roll-up prompt combining per-file analyses for a query.
pub fn build_summary_prompt(analyses: &[String], query: &str) -> String {
    let analyses = analyses.join("\n");

    format!(
        "\
As a project manager, review these file analyses and answer the query: \"{query}\"

Individual file analyses:
{analyses}

Please provide a comprehensive summary including:
1. Overall project status and structure
2. Key findings and insights
3. Recommended next steps
4. Potential improvements

Format your response with clear sections and bullet points."
    )
}

/// Build the new-file creation prompt.
pub fn build_creation_prompt(path: &str, description: &str) -> String {
    format!(
        "\
Create a new file: {path}
Description: {description}

Please provide:
1. Complete file content
2. Explanation of the implementation
3. Integration notes
"
    )
}
