//! Schema extraction from the canonical struct declaration.

use lockstep_core::{Schema, SchemaField};

use crate::recognizers::{SchemaPatterns, code_part, is_comment_line, opens_block_comment};

/// A field name declared more than once; the first declaration is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateField {
    pub name: String,
    pub ty: String,
    pub line: usize,
    pub first_line: usize,
}

/// A line inside the block that is neither a field nor a known non-field
/// shape, e.g. `int a, b;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrecognizedLine {
    pub line: usize,
    pub text: String,
}

/// Result of scanning the schema artifact.
#[derive(Debug, Clone, Default)]
pub struct SchemaExtraction {
    pub schema: Schema,
    pub duplicates: Vec<DuplicateField>,
    pub unrecognized: Vec<UnrecognizedLine>,
    /// Whether the opening line of the block was seen at all.
    pub block_found: bool,
}

/// Extract the schema block from the canonical declaration text.
///
/// Only the first matching block is read. Blank lines, comments, preprocessor
/// directives, access labels and member functions inside the block are
/// skipped. Any other line that is not a field declaration is collected in
/// [`SchemaExtraction::unrecognized`].
#[must_use]
pub fn extract_schema(text: &str, patterns: &SchemaPatterns) -> SchemaExtraction {
    let mut extraction = SchemaExtraction::default();
    let mut inside = false;
    let mut in_comment = false;

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if !inside {
            if patterns.open.matches(raw) {
                tracing::debug!(line = line_no, "schema block opens");
                inside = true;
                extraction.block_found = true;
            }
            continue;
        }

        if in_comment {
            in_comment = !raw.contains("*/");
            continue;
        }
        let line = code_part(raw);
        in_comment = leaves_comment_open(raw, line);
        if raw.trim().is_empty() || is_comment_line(raw) {
            continue;
        }
        if patterns.close.matches(line) {
            tracing::debug!(
                line = line_no,
                fields = extraction.schema.len(),
                "schema block closes"
            );
            break;
        }

        let Some(decl) = patterns.field.recognize(line) else {
            if is_known_non_field(line) {
                tracing::trace!(line = line_no, "skipping non-field line in schema block");
            } else {
                tracing::debug!(line = line_no, text = line.trim(), "unrecognized schema line");
                extraction.unrecognized.push(UnrecognizedLine {
                    line: line_no,
                    text: line.trim().to_string(),
                });
            }
            continue;
        };

        let field = SchemaField::new(decl.name, decl.ty, line_no);
        if let Err(first) = extraction.schema.insert(field.clone()) {
            let first_line = first.line;
            extraction.duplicates.push(DuplicateField {
                name: field.name,
                ty: field.ty,
                line: line_no,
                first_line,
            });
        }
    }

    extraction
}

/// Whether the comment stripped from `raw` is a block comment left open.
fn leaves_comment_open(raw: &str, code: &str) -> bool {
    let rest = raw[code.len()..].trim_start();
    rest.starts_with("/*") && opens_block_comment(rest)
}

/// Preprocessor lines, `public:` style labels and member functions.
fn is_known_non_field(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.starts_with('#') || trimmed.ends_with(':') || trimmed.contains('(')
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_config::PatternConfig;
    use lockstep_core::TypeCategory;
    use pretty_assertions::assert_eq;

    fn patterns() -> SchemaPatterns {
        SchemaPatterns::new(&PatternConfig::default()).expect("default patterns compile")
    }

    const HEADER: &str = r"#pragma once

#define SSID_LEN 32

struct ConfigStruct {
  // Network
  char ssid[SSID_LEN];
  int  port;      // http

  /* feature flags */
  bool enabled;
  float gain = 1.0;
  void reset();
};

struct Other {
  int ignored;
};
";

    #[test]
    fn extracts_fields_in_order_with_normalized_types() {
        let extraction = extract_schema(HEADER, &patterns());
        assert!(extraction.block_found);
        assert!(extraction.duplicates.is_empty());
        assert!(extraction.unrecognized.is_empty());

        let fields = extraction
            .schema
            .iter()
            .map(|f| (f.name.as_str(), f.ty.as_str(), f.line))
            .collect::<Vec<_>>();
        assert_eq!(
            fields,
            vec![
                ("ssid", "char[SSID_LEN]", 7),
                ("port", "int", 8),
                ("enabled", "bool", 11),
                ("gain", "float", 12),
            ]
        );
        assert_eq!(
            extraction.schema.get("ssid").map(SchemaField::category),
            Some(TypeCategory::StringLike)
        );
    }

    #[test]
    fn stops_at_first_closing_brace() {
        let extraction = extract_schema(HEADER, &patterns());
        assert!(!extraction.schema.contains("ignored"));
    }

    #[test]
    fn missing_block_yields_empty_schema() {
        let extraction = extract_schema("int port;\nbool enabled;\n", &patterns());
        assert!(!extraction.block_found);
        assert!(extraction.schema.is_empty());
    }

    #[test]
    fn duplicate_names_are_reported_and_first_kept() {
        let text = "struct C {\n  int port;\n  char port[8];\n};\n";
        let extraction = extract_schema(text, &patterns());
        assert_eq!(extraction.schema.len(), 1);
        assert_eq!(extraction.schema.get("port").map(|f| f.ty.as_str()), Some("int"));
        assert_eq!(
            extraction.duplicates,
            vec![DuplicateField {
                name: "port".to_string(),
                ty: "char[8]".to_string(),
                line: 3,
                first_line: 2,
            }]
        );
    }

    #[test]
    fn trailing_block_comment_keeps_the_field() {
        let text = "struct C {\n  int port;\n  int timeout; /* seconds */\n};\n";
        let extraction = extract_schema(text, &patterns());
        let names = extraction
            .schema
            .iter()
            .map(|f| (f.name.as_str(), f.line))
            .collect::<Vec<_>>();
        assert_eq!(names, vec![("port", 2), ("timeout", 3)]);
        assert!(extraction.unrecognized.is_empty());
    }

    #[test]
    fn multi_line_comment_is_skipped() {
        let text = "struct C {\n  int a; /* starts here\n     int hidden;\n  */\n  /*\n   * int also_hidden;\n   */\n  int b;\n};\n";
        let extraction = extract_schema(text, &patterns());
        let names = extraction
            .schema
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["a", "b"]);
        assert!(extraction.unrecognized.is_empty());
    }

    #[test]
    fn unrecognized_lines_are_collected() {
        let text = "struct C {\n#ifdef DEBUG\n  int a, b;\npublic:\n  void reset();\n  int port;\n  Color tint{1};\n#endif\n};\n";
        let extraction = extract_schema(text, &patterns());
        assert_eq!(
            extraction.unrecognized,
            vec![
                UnrecognizedLine {
                    line: 3,
                    text: "int a, b;".to_string(),
                },
                UnrecognizedLine {
                    line: 7,
                    text: "Color tint{1};".to_string(),
                },
            ]
        );
        assert_eq!(extraction.schema.len(), 1);
    }

    #[test]
    fn named_struct_selects_block() {
        let config = PatternConfig {
            struct_name: "Other".to_string(),
            ..PatternConfig::default()
        };
        let patterns = SchemaPatterns::new(&config).expect("compiles");
        let extraction = extract_schema(HEADER, &patterns);
        let names = extraction
            .schema
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["ignored"]);
    }
}
