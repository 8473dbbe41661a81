use similar::TextDiff;

#[derive(Debug, Clone)]
pub struct FileDiff {
    pub path: String,
    pub old_content: Option<String>,
    pub new_content: Option<String>,
    pub binary: bool,
}

impl FileDiff {
    /// Two versions of a file ready for rendering. A missing side is treated
    /// as empty; non-UTF-8 content on either side marks the diff as binary.
    pub fn between(path: impl Into<String>, old: Option<&[u8]>, new: Option<&[u8]>) -> Self {
        let old_content = old.and_then(|bytes| String::from_utf8(bytes.to_vec()).ok());
        let new_content = new.and_then(|bytes| String::from_utf8(bytes.to_vec()).ok());

        let binary = (old.is_some() && old_content.is_none())
            || (new.is_some() && new_content.is_none());

        FileDiff {
            path: path.into(),
            old_content,
            new_content,
            binary,
        }
    }

    /// Unified diff text; empty when the file is binary or unchanged.
    pub fn format_unified(&self, context_lines: usize) -> String {
        let old = self.old_content.as_deref().unwrap_or("");
        let new = self.new_content.as_deref().unwrap_or("");
        if self.binary || old == new {
            return String::new();
        }

        let old_header = if self.old_content.is_some() {
            format!("a/{}", self.path)
        } else {
            "/dev/null".to_string()
        };
        let new_header = if self.new_content.is_some() {
            format!("b/{}", self.path)
        } else {
            "/dev/null".to_string()
        };

        TextDiff::from_lines(old, new)
            .unified_diff()
            .context_radius(context_lines)
            .header(&old_header, &new_header)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_is_all_additions() {
        let diff = FileDiff::between("a.txt", None, Some(b"one\ntwo\n".as_slice()));

        assert!(!diff.binary);
        let unified = diff.format_unified(3);
        assert!(unified.starts_with("--- /dev/null\n+++ b/a.txt\n@@"));
        assert!(unified.contains("\n+one\n+two\n"));
        assert!(!unified.contains("\n-"));
    }

    #[test]
    fn test_unchanged_file_renders_nothing() {
        let diff = FileDiff::between(
            "a.txt",
            Some(b"same\n".as_slice()),
            Some(b"same\n".as_slice()),
        );

        assert!(diff.format_unified(3).is_empty());
    }

    #[test]
    fn test_binary_content_renders_nothing() {
        let diff = FileDiff::between(
            "blob.bin",
            Some([0xff, 0xfe].as_slice()),
            Some([0x00, 0xff].as_slice()),
        );

        assert!(diff.binary);
        assert!(diff.format_unified(3).is_empty());
    }

    #[test]
    fn test_format_unified() {
        let diff = FileDiff::between(
            "a.txt",
            Some(b"hello\n".as_slice()),
            Some(b"world\n".as_slice()),
        );

        let unified = diff.format_unified(3);
        assert!(unified.starts_with("--- a/a.txt\n+++ b/a.txt\n@@"));
        assert!(unified.contains("\n-hello\n+world\n"));
    }
}
