//! # Source Model
//!
//! Lightweight structural view of the TypeScript files the generator appends
//! to (DAL, breadcrumb builder, metadata helpers). A file is loaded into a
//! [`SourceDocument`]; named regions of it (a comment-headed [`Section`] or a
//! class body) are indexed into ordered lists of [`Declaration`]s with byte
//! spans. Writers insert against that index and write the whole document back.
//!
//! Only members at the shallowest indentation inside a region count as
//! declarations, so nested object keys and statements inside method bodies are
//! ignored.

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A named member inside a region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Byte span covering the member's lines
    pub span: Range<usize>,
}

/// An indexed region of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    /// Byte range from just after the header line to the start of the line that ends the region
    pub body: Range<usize>,
    /// Members in source order
    pub entries: Vec<Declaration>,
}

impl Section {
    /// Offset at which a member named `name` keeps the section sorted.
    ///
    /// That is the start of the first entry whose name sorts after `name`, or
    /// the end of the last entry when none does. Empty sections insert right
    /// after the header.
    pub fn sorted_insert_offset(&self, name: &str) -> usize {
        if let Some(next) = self.successor(name) {
            return next.span.start;
        }
        self.entries
            .last()
            .map(|e| e.span.end)
            .unwrap_or(self.body.start)
    }

    /// First entry whose name sorts after `name`.
    pub fn successor(&self, name: &str) -> Option<&Declaration> {
        self.entries.iter().find(|e| e.name.as_str() > name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }
}

/// A named re-export statement (`export { a, b } from "./metadata";`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportList {
    pub module: String,
    pub span: Range<usize>,
    pub names: Vec<String>,
}

impl ExportList {
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Add `name` before the first export that sorts after it.
    pub fn insert(&mut self, name: &str) {
        if self.contains(name) {
            return;
        }
        let at = self
            .names
            .iter()
            .position(|n| n.as_str() > name)
            .unwrap_or(self.names.len());
        self.names.insert(at, name.to_string());
    }

    /// Render as a multi-line export statement.
    pub fn render(&self) -> String {
        let body: String = self.names.iter().map(|n| format!("  {n},\n")).collect();
        format!("export {{\n{body}}} from \"{}\";", self.module)
    }
}

#[allow(clippy::expect_used)]
static MEMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^(?P<indent>[ \t]+)(?:(?:public|private|protected|static|async|readonly|get)\s+)*(?P<name>[A-Za-z_$][\w$]*)\s*(?:\?\s*)?[:(<=]",
    )
    .expect("member regex")
});

#[allow(clippy::expect_used)]
static CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:export\s+)?(?:default\s+)?class\s+(?P<name>[A-Za-z_$][\w$]*)[^{\n]*\{[ \t]*$")
        .expect("class regex")
});

#[allow(clippy::expect_used)]
static CLOSING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\}").expect("closing regex"));

const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "for", "while", "switch", "return", "catch", "else", "try", "throw", "await",
];

/// A source file held in memory for structural edits
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
}

impl SourceDocument {
    /// Read `path` in full.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(SourceDocument {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        SourceDocument {
            path: path.into(),
            text: text.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Write the document back to its path.
    pub fn save(&self) -> anyhow::Result<()> {
        std::fs::write(&self.path, &self.text)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    /// Whether `name` is declared anywhere in the document as a member,
    /// function, or binding.
    pub fn declares(&self, name: &str) -> bool {
        let escaped = regex::escape(name);
        let pattern = format!(
            r"(?m)(?:^[ \t]*(?:(?:public|private|protected|static|async|readonly)\s+)*{escaped}\s*(?:\?\s*)?[:(<=])|(?:\b(?:function|const|let|var)\s+{escaped}\b)"
        );
        Regex::new(&pattern)
            .map(|re| re.is_match(&self.text))
            .unwrap_or(false)
    }

    /// Splice `snippet` in at byte `offset`.
    pub fn insert_at(&mut self, offset: usize, snippet: &str) {
        self.text.insert_str(offset, snippet);
    }

    /// Append `snippet` after the last non-blank content, separated by one blank line.
    pub fn append(&mut self, snippet: &str) {
        let trimmed_len = self.text.trim_end().len();
        self.text.truncate(trimmed_len);
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(snippet.trim_end());
        self.text.push('\n');
    }

    /// Replace the bytes in `range` with `text`.
    pub fn replace_range(&mut self, range: Range<usize>, text: &str) {
        self.text.replace_range(range, text);
    }

    /// The `export { ... } from "<module>"` statement, if there is one.
    pub fn export_list(&self, module: &str) -> Option<ExportList> {
        let re = Regex::new(&format!(
            r#"export\s*\{{(?P<names>[^}}]*)\}}\s*from\s*["']{}["'];?"#,
            regex::escape(module)
        ))
        .ok()?;
        let caps = re.captures(&self.text)?;
        let whole = caps.get(0)?;
        let names = caps["names"]
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        Some(ExportList {
            module: module.to_string(),
            span: whole.range(),
            names,
        })
    }

    /// Whether the document has `export * from "<module>"`.
    pub fn reexports_all(&self, module: &str) -> bool {
        Regex::new(&format!(
            r#"export\s*\*\s*from\s*["']{}["']"#,
            regex::escape(module)
        ))
        .map(|re| re.is_match(&self.text))
        .unwrap_or(false)
    }

    /// Index the section headed by a `// <title>` comment.
    ///
    /// The section runs until the next header listed in `all_titles` or the
    /// first column-zero closing brace, whichever comes first.
    pub fn comment_section(&self, title: &str, all_titles: &[&str]) -> Option<Section> {
        let header_re = Regex::new(&format!(r"(?m)^[ \t]*//[ \t]*{}[^\n]*\n", regex::escape(title))).ok()?;
        let header = header_re.find(&self.text)?;
        let body_start = header.end();

        let mut body_end = CLOSING_RE
            .find_at(&self.text, body_start)
            .map(|m| m.start())
            .unwrap_or(self.text.len());
        for other in all_titles.iter().filter(|t| **t != title) {
            let Ok(re) = Regex::new(&format!(r"(?m)^[ \t]*//[ \t]*{}", regex::escape(other))) else {
                continue;
            };
            if let Some(m) = re.find_at(&self.text, body_start) {
                let line_start = self.text[..m.start()].rfind('\n').map_or(0, |i| i + 1);
                body_end = body_end.min(line_start);
            }
        }

        Some(self.index_region(title, body_start..body_end))
    }

    /// Index the body of `class <name>` (or the first class when `name` is `None`).
    pub fn class_section(&self, name: Option<&str>) -> Option<Section> {
        let class = CLASS_RE
            .captures_iter(&self.text)
            .find(|c| name.is_none_or(|n| &c["name"] == n))?;
        let whole = class.get(0)?;
        let title = class["name"].to_string();
        let body_start = (whole.end() + 1).min(self.text.len());
        let body_end = CLOSING_RE
            .find_at(&self.text, body_start)
            .map(|m| m.start())
            .unwrap_or(self.text.len());
        Some(self.index_region(&title, body_start..body_end))
    }

    /// Move a line start back over the comment lines directly above it.
    fn leading_comments_start(&self, line_start: usize, floor: usize) -> usize {
        let mut start = line_start;
        while start > floor {
            let prev_end = start - 1;
            let prev_start = self.text[..prev_end]
                .rfind('\n')
                .map_or(0, |i| i + 1)
                .max(floor);
            let line = self.text[prev_start..prev_end].trim_start();
            if line.starts_with("//") || line.starts_with("/*") || line.starts_with('*') {
                start = prev_start;
            } else {
                break;
            }
        }
        start
    }

    fn index_region(&self, title: &str, body: Range<usize>) -> Section {
        let region = &self.text[body.clone()];
        let candidates: Vec<(usize, usize, String)> = MEMBER_RE
            .captures_iter(region)
            .filter_map(|c| {
                let indent = c.name("indent")?;
                let name = c.name("name")?.as_str();
                if STATEMENT_KEYWORDS.contains(&name) {
                    return None;
                }
                Some((indent.as_str().len(), body.start + indent.start(), name.to_string()))
            })
            .collect();

        let min_indent = candidates.iter().map(|(w, _, _)| *w).min();
        let starts: Vec<(usize, String)> = candidates
            .into_iter()
            .filter(|(w, _, _)| Some(*w) == min_indent)
            .map(|(_, start, name)| (self.leading_comments_start(start, body.start), name))
            .collect();

        // Last entry ends after the final non-blank line of the body.
        let content_end = {
            let trimmed = region.trim_end();
            let end = body.start + trimmed.len();
            match self.text[end..body.end].find('\n') {
                Some(nl) => end + nl + 1,
                None => body.end,
            }
        };

        let entries = starts
            .iter()
            .enumerate()
            .map(|(i, (start, name))| {
                let end = starts.get(i + 1).map_or(content_end, |(next, _)| *next);
                Declaration {
                    name: name.clone(),
                    span: *start..end,
                }
            })
            .collect();

        Section {
            title: title.to_string(),
            body,
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILDER: &str = r#"export const bc = {
  // Static Routes
  home: { label: "Home", href: "/" },
  mailchimp: { label: "Mailchimp", href: "/mailchimp" },
  reports: { label: "Reports", href: "/mailchimp/reports" },

  // Dynamic Route Functions
  reportDetail: (id: string) => ({
    label: "Report",
    href: `/mailchimp/reports/${id}`,
  }),
  listDetail: (id: string) => ({ label: "List", href: `/mailchimp/lists/${id}` }),
};
"#;

    const TITLES: &[&str] = &["Static Routes", "Dynamic Route Functions"];

    #[test]
    fn test_comment_sections_are_indexed() {
        let doc = SourceDocument::from_text("bc.ts", BUILDER);
        let stat = doc.comment_section("Static Routes", TITLES).unwrap();
        assert_eq!(stat.names(), vec!["home", "mailchimp", "reports"]);
        let dynamic = doc.comment_section("Dynamic Route Functions", TITLES).unwrap();
        // nested `label:` / `href:` keys are deeper and ignored
        assert_eq!(dynamic.names(), vec!["reportDetail", "listDetail"]);
    }

    #[test]
    fn test_sorted_insert_into_section() {
        let mut doc = SourceDocument::from_text("bc.ts", BUILDER);
        let section = doc.comment_section("Static Routes", TITLES).unwrap();
        let offset = section.sorted_insert_offset("lists");
        doc.insert_at(offset, "  lists: { label: \"Lists\", href: \"/mailchimp/lists\" },\n");
        let stat = doc.comment_section("Static Routes", TITLES).unwrap();
        assert_eq!(stat.names(), vec!["home", "lists", "mailchimp", "reports"]);
    }

    #[test]
    fn test_insert_after_last_entry_keeps_blank_line() {
        let mut doc = SourceDocument::from_text("bc.ts", BUILDER);
        let section = doc.comment_section("Static Routes", TITLES).unwrap();
        let offset = section.sorted_insert_offset("zzz");
        doc.insert_at(offset, "  zzz: { label: \"Z\", href: \"/z\" },\n");
        assert!(doc
            .text()
            .contains("zzz: { label: \"Z\", href: \"/z\" },\n\n  // Dynamic Route Functions"));
    }

    #[test]
    fn test_class_section() {
        let src = "export class MailchimpDAL {\n  constructor(private client: Client) {}\n\n  async fetchLists(params: P) {\n    if (x) {\n      return 1;\n    }\n    return this.client.get(\"/lists\");\n  }\n}\n\nexport const mailchimpDAL = new MailchimpDAL();\n";
        let doc = SourceDocument::from_text("dal.ts", src);
        let class = doc.class_section(Some("MailchimpDAL")).unwrap();
        assert_eq!(class.names(), vec!["constructor", "fetchLists"]);
        assert!(doc.declares("fetchLists"));
        assert!(doc.declares("mailchimpDAL"));
        assert!(!doc.declares("fetchReports"));
    }

    #[test]
    fn test_doc_comments_belong_to_the_member_below() {
        let src = "export class Dal {\n  /**\n   * Lists\n   */\n  async fetchLists() {\n    return 1;\n  }\n\n  // Reports\n  async fetchReports() {\n    return 2;\n  }\n}\n";
        let doc = SourceDocument::from_text("dal.ts", src);
        let class = doc.class_section(None).unwrap();
        let reports = class.successor("fetchMembers").unwrap();
        assert_eq!(reports.name, "fetchReports");
        assert!(doc.text()[reports.span.clone()].starts_with("  // Reports\n"));
        assert!(doc.text()[class.entries[0].span.clone()].starts_with("  /**\n"));
    }

    #[test]
    fn test_export_list_insert_keeps_order() {
        let src = "export { a, c } from \"./metadata\";\nexport * from \"./other\";\n";
        let doc = SourceDocument::from_text("index.ts", src);
        assert!(doc.reexports_all("./other"));
        assert!(!doc.reexports_all("./metadata"));
        let mut exports = doc.export_list("./metadata").unwrap();
        assert!(exports.contains("a"));
        exports.insert("b");
        assert_eq!(exports.names, vec!["a", "b", "c"]);
        assert!(exports.render().contains("  b,\n"));
    }

    #[test]
    fn test_append() {
        let mut doc = SourceDocument::from_text("m.ts", "export const a = 1;\n\n\n");
        doc.append("export const b = 2;\n");
        assert_eq!(doc.text(), "export const a = 1;\n\nexport const b = 2;\n");
    }
}
