//! Named line recognizers.
//!
//! Each recognizer matches one structural shape on a single line and returns
//! the captured parts, or `None`. Recognizers that mention the struct
//! instance or a function name are compiled from [`PatternConfig`]; the rest
//! are fixed.

use lockstep_config::PatternConfig;
use regex::Regex;

use crate::error::ScanError;

fn compile(name: &'static str, pattern: &str) -> Result<Regex, ScanError> {
    Regex::new(pattern).map_err(|source| ScanError::Pattern { name, source })
}

fn capture(caps: &regex::Captures<'_>, i: usize) -> Option<String> {
    caps.get(i).map(|m| m.as_str().trim().to_string())
}

/// Drop a trailing `//` or `/* ... */` comment that is not inside a string
/// literal. A block comment followed by more code is left in place.
#[must_use]
pub fn code_part(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => {
                i += 2;
                continue;
            }
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => {
                return line[..i].trim_end();
            }
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'*') => {
                let Some(close) = line[i + 2..].find("*/") else {
                    return line[..i].trim_end();
                };
                let after = i + 2 + close + 2;
                if code_part(&line[after..]).trim_start().is_empty() {
                    return line[..i].trim_end();
                }
                i = after;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    line.trim_end()
}

/// Whether a `/*` on this line is left open at the end of it.
#[must_use]
pub fn opens_block_comment(line: &str) -> bool {
    line.rfind("/*")
        .is_some_and(|open| !line[open + 2..].contains("*/"))
}

/// Whole-line comment in C-family source.
#[must_use]
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

// ---------------------------------------------------------------------------
// Schema block
// ---------------------------------------------------------------------------

/// `struct Name {` / `typedef struct {` opening the canonical block.
#[derive(Debug, Clone)]
pub struct SchemaOpen {
    re: Regex,
}

impl SchemaOpen {
    pub fn new(struct_name: &str) -> Result<Self, ScanError> {
        let pattern = if struct_name.is_empty() {
            r"^\s*(?:typedef\s+)?struct\b\s*(?:[A-Za-z_]\w*)?\s*\{".to_string()
        } else {
            format!(
                r"^\s*(?:typedef\s+)?struct\s+{}\s*\{{",
                regex::escape(struct_name)
            )
        };
        Ok(Self {
            re: compile("schema_open", &pattern)?,
        })
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        self.re.is_match(line)
    }
}

/// `};` or `} Config;` closing the canonical block.
#[derive(Debug, Clone)]
pub struct SchemaClose {
    re: Regex,
}

impl SchemaClose {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            re: compile("schema_close", r"^\s*\}\s*(?:[A-Za-z_]\w*\s*)?;")?,
        })
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        self.re.is_match(line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclMatch {
    pub name: String,
    /// Type with whitespace removed and array suffix appended.
    pub ty: String,
}

/// `type name[size];` inside the schema block.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    re: Regex,
}

impl FieldDecl {
    pub fn new() -> Result<Self, ScanError> {
        let pattern = concat!(
            r"^\s*((?:(?:unsigned|signed|const|long|short|volatile|struct|enum)\s+)*[A-Za-z_]\w*)",
            r"(\s*\*\s*|\s+)",
            r"([A-Za-z_]\w*)\s*",
            r"(\[[^\]]*\])?\s*",
            r"(?:=[^;]*)?;\s*$",
        );
        Ok(Self {
            re: compile("field_decl", pattern)?,
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<FieldDeclMatch> {
        let caps = self.re.captures(line)?;
        let mut ty = caps.get(1)?.as_str().to_string();
        if caps.get(2).is_some_and(|m| m.as_str().contains('*')) {
            ty.push('*');
        }
        if let Some(suffix) = caps.get(4) {
            ty.push_str(suffix.as_str());
        }
        ty.retain(|c| !c.is_whitespace());
        Some(FieldDeclMatch {
            name: caps.get(3)?.as_str().to_string(),
            ty,
        })
    }
}

// ---------------------------------------------------------------------------
// Persistence shapes
// ---------------------------------------------------------------------------

/// `doc["key"] | default` as the source of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyedSource {
    pub document: String,
    pub key: String,
    pub default: Option<String>,
}

#[derive(Debug, Clone)]
pub struct KeyedSourceRecognizer {
    re: Regex,
}

impl KeyedSourceRecognizer {
    pub fn new() -> Result<Self, ScanError> {
        Ok(Self {
            re: compile(
                "keyed_source",
                r#"^([A-Za-z_]\w*)\s*\[\s*"([^"]*)"\s*\](?:\s*\|\s*(.+?))?$"#,
            )?,
        })
    }

    #[must_use]
    pub fn recognize(&self, expr: &str) -> Option<KeyedSource> {
        let caps = self.re.captures(expr.trim())?;
        Some(KeyedSource {
            document: capture(&caps, 1)?,
            key: caps.get(2)?.as_str().to_string(),
            default: capture(&caps, 3),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectReadMatch {
    pub field: String,
    pub source: KeyedSource,
}

/// `Config.field = doc["key"] | default;`
#[derive(Debug, Clone)]
pub struct DirectRead {
    re: Regex,
    source: KeyedSourceRecognizer,
}

impl DirectRead {
    pub fn new(instance: &str) -> Result<Self, ScanError> {
        let pattern = format!(
            r"^\s*{}\.([A-Za-z_]\w*)\s*=\s*(.+?)\s*;\s*$",
            regex::escape(instance)
        );
        Ok(Self {
            re: compile("direct_read", &pattern)?,
            source: KeyedSourceRecognizer::new()?,
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<DirectReadMatch> {
        let caps = self.re.captures(line)?;
        Some(DirectReadMatch {
            field: capture(&caps, 1)?,
            source: self.source.recognize(caps.get(2)?.as_str())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundedCopyMatch {
    pub field: String,
    /// Second argument, verbatim.
    pub source: String,
    /// Field named inside `sizeof(...)`, instance prefix removed.
    pub size_of: String,
}

/// `strlcpy(Config.field, source, sizeof(Config.field));`
#[derive(Debug, Clone)]
pub struct BoundedCopy {
    re: Regex,
    instance_prefix: String,
}

impl BoundedCopy {
    pub fn new(copy_fn: &str, instance: &str) -> Result<Self, ScanError> {
        let inst = regex::escape(instance);
        let pattern = format!(
            r"^\s*{copy}\s*\(\s*{inst}\.([A-Za-z_]\w*)\s*,\s*(.+?)\s*,\s*sizeof\s*\(?\s*([A-Za-z_][\w\.]*)\s*\)?\s*(?:-\s*\d+\s*)?\)\s*;",
            copy = regex::escape(copy_fn),
        );
        Ok(Self {
            re: compile("bounded_copy", &pattern)?,
            instance_prefix: format!("{instance}."),
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<BoundedCopyMatch> {
        let caps = self.re.captures(line)?;
        let size_arg = caps.get(3)?.as_str();
        Some(BoundedCopyMatch {
            field: capture(&caps, 1)?,
            source: capture(&caps, 2)?,
            size_of: size_arg
                .strip_prefix(&self.instance_prefix)
                .unwrap_or(size_arg)
                .to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentWriteMatch {
    pub document: String,
    pub key: String,
    pub field: String,
}

/// `doc["key"] = Config.field;`
#[derive(Debug, Clone)]
pub struct DocumentWrite {
    re: Regex,
}

impl DocumentWrite {
    pub fn new(instance: &str) -> Result<Self, ScanError> {
        let pattern = format!(
            r#"^\s*([A-Za-z_]\w*)\s*\[\s*"([^"]*)"\s*\]\s*=\s*{}\.([A-Za-z_]\w*)\s*;"#,
            regex::escape(instance)
        );
        Ok(Self {
            re: compile("document_write", &pattern)?,
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<DocumentWriteMatch> {
        let caps = self.re.captures(line)?;
        Some(DocumentWriteMatch {
            document: capture(&caps, 1)?,
            key: caps.get(2)?.as_str().to_string(),
            field: capture(&caps, 3)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Runtime shapes
// ---------------------------------------------------------------------------

/// `strcmp(option, "key")`, anywhere on the line.
#[derive(Debug, Clone)]
pub struct OptionCompare {
    re: Regex,
}

impl OptionCompare {
    pub fn new(compare_fn: &str) -> Result<Self, ScanError> {
        let pattern = format!(
            r#"\b{}\s*\(\s*[A-Za-z_][\w\.\->]*\s*,\s*"([^"]*)"\s*\)"#,
            regex::escape(compare_fn)
        );
        Ok(Self {
            re: compile("option_compare", &pattern)?,
        })
    }

    /// Every compared key on the line, left to right.
    #[must_use]
    pub fn keys(&self, line: &str) -> Vec<String> {
        self.re
            .captures_iter(line)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadIntoMatch {
    pub target: String,
    pub field: String,
}

/// `out += Config.field;` / `doc[option] = String(Config.field);`
#[derive(Debug, Clone)]
pub struct ReadInto {
    re: Regex,
}

impl ReadInto {
    pub fn new(instance: &str) -> Result<Self, ScanError> {
        let pattern = format!(
            r#"^\s*([A-Za-z_][\w\[\]"]*)\s*\+?=\s*(?:[A-Za-z_]\w*\s*\(\s*)?{}\.([A-Za-z_]\w*)\b"#,
            regex::escape(instance)
        );
        Ok(Self {
            re: compile("read_into", &pattern)?,
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<ReadIntoMatch> {
        let caps = self.re.captures(line)?;
        Some(ReadIntoMatch {
            target: capture(&caps, 1)?,
            field: capture(&caps, 2)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAssignMatch {
    pub field: String,
    /// Function wrapping the right-hand side, if any.
    pub parser: Option<String>,
}

/// `Config.field = atoi(value);`
#[derive(Debug, Clone)]
pub struct ParsedAssign {
    re: Regex,
}

impl ParsedAssign {
    pub fn new(instance: &str) -> Result<Self, ScanError> {
        let pattern = format!(
            r"^\s*{}\.([A-Za-z_]\w*)\s*(==?)\s*(?:([A-Za-z_]\w*)\s*\()?",
            regex::escape(instance)
        );
        Ok(Self {
            re: compile("parsed_assign", &pattern)?,
        })
    }

    #[must_use]
    pub fn recognize(&self, line: &str) -> Option<ParsedAssignMatch> {
        let caps = self.re.captures(line)?;
        if caps.get(2)?.as_str() == "==" {
            return None;
        }
        Some(ParsedAssignMatch {
            field: capture(&caps, 1)?,
            parser: capture(&caps, 3),
        })
    }
}

// ---------------------------------------------------------------------------
// Documentation table
// ---------------------------------------------------------------------------

/// Split a markdown table row into trimmed cells.
///
/// Returns `None` for lines that are not table rows.
#[must_use]
pub fn table_cells(line: &str) -> Option<Vec<&str>> {
    let trimmed = line.trim();
    let inner = trimmed.strip_prefix('|')?;
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    Some(inner.split('|').map(str::trim).collect())
}

/// `|---|:---:|` header separator.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
    table_cells(line).is_some_and(|cells| {
        !cells.is_empty()
            && cells.iter().all(|cell| {
                cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
            })
    })
}

/// Opening or closing run of a fenced code block (three or more backticks or
/// tildes), returned without the info string.
#[must_use]
pub fn fence_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let fence = trimmed.chars().next().filter(|c| matches!(c, '`' | '~'))?;
    let run = trimmed.len() - trimmed.trim_start_matches(fence).len();
    (run >= 3).then(|| &trimmed[..run])
}

/// Remove one layer of wrapping backticks.
#[must_use]
pub fn strip_code_span(cell: &str) -> &str {
    cell.strip_prefix('`')
        .and_then(|inner| inner.strip_suffix('`'))
        .map_or(cell, str::trim)
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

/// Recognizers for the canonical declaration.
#[derive(Debug, Clone)]
pub struct SchemaPatterns {
    pub open: SchemaOpen,
    pub close: SchemaClose,
    pub field: FieldDecl,
}

impl SchemaPatterns {
    pub fn new(config: &PatternConfig) -> Result<Self, ScanError> {
        Ok(Self {
            open: SchemaOpen::new(&config.struct_name)?,
            close: SchemaClose::new()?,
            field: FieldDecl::new()?,
        })
    }
}

/// Recognizers for the persistence and runtime artifacts.
#[derive(Debug, Clone)]
pub struct CodePatterns {
    pub direct_read: DirectRead,
    pub bounded_copy: BoundedCopy,
    pub keyed_source: KeyedSourceRecognizer,
    pub document_write: DocumentWrite,
    pub option_compare: OptionCompare,
    pub read_into: ReadInto,
    pub parsed_assign: ParsedAssign,
}

impl CodePatterns {
    pub fn new(config: &PatternConfig) -> Result<Self, ScanError> {
        Ok(Self {
            direct_read: DirectRead::new(&config.instance)?,
            bounded_copy: BoundedCopy::new(&config.copy_fn, &config.instance)?,
            keyed_source: KeyedSourceRecognizer::new()?,
            document_write: DocumentWrite::new(&config.instance)?,
            option_compare: OptionCompare::new(&config.compare_fn)?,
            read_into: ReadInto::new(&config.instance)?,
            parsed_assign: ParsedAssign::new(&config.instance)?,
        })
    }
}
