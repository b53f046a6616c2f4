use regex::Regex;
use serde::{Deserialize, Serialize};

/// Language assigned to fenced blocks that carry no tag.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// One unit of a parsed model reply: free-text explanation, or a code
/// block with its language tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Explanation { content: String },
    Code { language: String, content: String },
}

/// The ordered result of extracting one model reply.
///
/// Serializes transparently as an array of segment records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub segments: Vec<Segment>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The first code segment in the document, if any.
    pub fn first_code(&self) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|segment| matches!(segment, Segment::Code { .. }))
    }

    /// Render the document back into fenced-block text.
    ///
    /// For well-formed documents, `extract(doc.to_markdown())` yields a
    /// document equal to `doc`.
    pub fn to_markdown(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Explanation { content } => content.clone(),
                Segment::Code { language, content } => {
                    format!("```{language}\n{content}\n```")
                }
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Split a model reply into alternating explanation and code segments.
///
/// A fenced block opens with a line-initial triple backtick and its body
/// runs to the next triple backtick wherever it occurs; fences do not
/// nest. The run of word characters immediately after the opening marker
/// is the language tag; an empty tag becomes `"plaintext"`, and anything
/// else on the opening line (a space, a `+` in `c++`) belongs to the body,
/// not the tag. An opening marker with no closing marker is not a fence
/// and stays in place as ordinary text.
///
/// Explanation segments are trimmed and dropped when whitespace-only.
/// Code segments are trimmed but always kept, even with an empty body.
/// Never fails: any input produces a (possibly empty) document.
pub fn extract(text: &str) -> Document {
    let re = Regex::new(r"(?m)^```([0-9A-Za-z_]*)(?s:(.*?))```").unwrap();

    let mut segments = Vec::new();
    let mut last_end = 0;

    for captures in re.captures_iter(text) {
        let fence = captures.get(0).unwrap();

        let leading = text[last_end..fence.start()].trim();
        if !leading.is_empty() {
            segments.push(Segment::Explanation {
                content: leading.to_string(),
            });
        }

        let tag = captures.get(1).map_or("", |m| m.as_str());
        let language = if tag.is_empty() { DEFAULT_LANGUAGE } else { tag };
        let body = captures.get(2).map_or("", |m| m.as_str()).trim();

        segments.push(Segment::Code {
            language: language.to_string(),
            content: body.to_string(),
        });

        last_end = fence.end();
    }

    let trailing = text[last_end..].trim();
    if !trailing.is_empty() {
        segments.push(Segment::Explanation {
            content: trailing.to_string(),
        });
    }

    Document { segments }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explanation(content: &str) -> Segment {
        Segment::Explanation {
            content: content.to_string(),
        }
    }

    fn code(language: &str, content: &str) -> Segment {
        Segment::Code {
            language: language.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_text_around_tagged_block() {
        let doc = extract("Here is code:\n```python\nprint(1)\n```\nDone.");
        assert_eq!(
            doc.segments,
            vec![
                explanation("Here is code:"),
                code("python", "print(1)"),
                explanation("Done."),
            ]
        );
    }

    #[test]
    fn test_untagged_block_defaults_to_plaintext() {
        let doc = extract("```\nx=1\n```");
        assert_eq!(doc.segments, vec![code("plaintext", "x=1")]);
    }

    #[test]
    fn test_plain_text_only() {
        let doc = extract("Just text, no code.");
        assert_eq!(doc.segments, vec![explanation("Just text, no code.")]);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(extract("").is_empty());
        assert!(extract("   ").is_empty());
        assert!(extract(" \n\t\n ").is_empty());
    }

    #[test]
    fn test_single_block_without_surrounding_text() {
        let doc = extract("```rust\nfn main() {}\n```");
        assert_eq!(doc.segments, vec![code("rust", "fn main() {}")]);
    }

    #[test]
    fn test_back_to_back_blocks_have_no_empty_explanation() {
        let doc = extract("```rust\nlet a = 1;\n```\n```toml\nkey = 1\n```");
        assert_eq!(
            doc.segments,
            vec![code("rust", "let a = 1;"), code("toml", "key = 1")]
        );
    }

    #[test]
    fn test_unterminated_fence_is_ordinary_text() {
        let doc = extract("```python\nprint(1)");
        assert_eq!(doc.segments, vec![explanation("```python\nprint(1)")]);
    }

    #[test]
    fn test_unterminated_fence_after_closed_block() {
        let doc = extract("```\nok\n```\n```python\nprint(1)");
        assert_eq!(
            doc.segments,
            vec![code("plaintext", "ok"), explanation("```python\nprint(1)")]
        );
    }

    #[test]
    fn test_order_preserved_across_blocks() {
        let doc = extract("Intro\n```js\na()\n```\nMiddle\n```css\nb {}\n```\nEnd");
        assert_eq!(
            doc.segments,
            vec![
                explanation("Intro"),
                code("js", "a()"),
                explanation("Middle"),
                code("css", "b {}"),
                explanation("End"),
            ]
        );
    }

    #[test]
    fn test_empty_body_block_is_kept() {
        let doc = extract("```\n```");
        assert_eq!(doc.segments, vec![code("plaintext", "")]);
    }

    #[test]
    fn test_non_word_tag_characters_fall_into_body() {
        let doc = extract("```c++\nstd::cout << 1;\n```");
        assert_eq!(doc.segments, vec![code("c", "++\nstd::cout << 1;")]);
    }

    #[test]
    fn test_underscore_tag_is_a_word_tag() {
        let doc = extract("```objective_c\nid x;\n```");
        assert_eq!(doc.segments, vec![code("objective_c", "id x;")]);
    }

    #[test]
    fn test_mid_line_marker_does_not_open_a_block() {
        let doc = extract("inline ``` marker only");
        assert_eq!(doc.segments, vec![explanation("inline ``` marker only")]);
    }

    #[test]
    fn test_first_code_skips_explanations() {
        let doc = extract("Intro\n```sh\nls\n```");
        assert_eq!(doc.first_code(), Some(&code("sh", "ls")));
        assert_eq!(extract("no code here").first_code(), None);
    }

    #[test]
    fn test_round_trip_is_stable() {
        let doc = extract("Here is code:\n```python\nprint(1)\n```\nDone.\n```\nx=1\n```");
        let rendered = doc.to_markdown();
        assert_eq!(extract(&rendered), doc);
    }

    #[test]
    fn test_serializes_as_tagged_records() {
        let doc = extract("Intro\n```python\nprint(1)\n```");
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                { "type": "explanation", "content": "Intro" },
                { "type": "code", "language": "python", "content": "print(1)" },
            ])
        );
    }
}
