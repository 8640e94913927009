//! Unified-diff previews of a fixed document

use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};

use crate::document::SourceDocument;

/// Preview of the fixes applied to one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixPreview {
    /// Path of the document, when it has one
    pub file: Option<PathBuf>,
    /// Text before fixing
    pub original_content: String,
    /// Text after fixing
    pub modified_content: String,
    /// Number of violations whose fix was applied
    pub applied_fixes: usize,
    /// Unified diff from the original to the modified text
    pub diff: String,
}

impl FixPreview {
    pub fn new(original: &SourceDocument, modified: &SourceDocument, applied_fixes: usize) -> Self {
        let label = original
            .path()
            .map_or_else(|| PathBuf::from("<document>"), Path::to_path_buf);
        Self {
            file: original.path().map(Path::to_path_buf),
            original_content: original.text().to_string(),
            modified_content: modified.text().to_string(),
            applied_fixes,
            diff: unified_diff(original.text(), modified.text(), &label),
        }
    }

    pub fn has_changes(&self) -> bool {
        self.original_content != self.modified_content
    }
}

/// Render a unified diff with three lines of context
pub fn unified_diff(original: &str, modified: &str, path: &Path) -> String {
    let diff = TextDiff::from_lines(original, modified);
    let mut output = String::new();

    output.push_str(&format!("--- {}\n", path.display()));
    output.push_str(&format!("+++ {} (fixed)\n", path.display()));

    for group in diff.grouped_ops(3) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            continue;
        };
        let old_start = first.old_range().start;
        let new_start = first.new_range().start;
        let old_len = last.old_range().end - old_start;
        let new_len = last.new_range().end - new_start;
        output.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start + 1,
            old_len,
            new_start + 1,
            new_len
        ));

        for op in &group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                let line = change.value();
                output.push(sign);
                output.push_str(line);
                // A changed last line without a line break still ends the diff line
                if !line.ends_with('\n') {
                    output.push('\n');
                }
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_diff() {
        let original = SourceDocument::new("class C\n{\n  int x;\n    int y;\n}\n").with_path("src/c.kt");
        let modified = original
            .with_text("class C\n{\n    int x;\n    int y;\n}\n".to_string(), "test")
            .unwrap();
        let preview = FixPreview::new(&original, &modified, 1);

        assert!(preview.has_changes());
        assert_eq!(preview.file.as_deref(), Some(Path::new("src/c.kt")));
        insta::assert_snapshot!(preview.diff, @r"
        --- src/c.kt
        +++ src/c.kt (fixed)
        @@ -1,5 +1,5 @@
         class C
         {
        -  int x;
        +    int x;
             int y;
         }
        ");
    }

    #[test]
    fn test_unchanged_document_has_empty_diff() {
        let document = SourceDocument::new("a();\n");
        let preview = FixPreview::new(&document, &document, 0);
        assert!(!preview.has_changes());
        assert_eq!(preview.diff, "--- <document>\n+++ <document> (fixed)\n");
    }
}
