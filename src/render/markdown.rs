//! GitHub-flavored markdown renderer.
//!
//! One section per file: a level-1 title, then every block with its reserved
//! fields, a table of custom fields and its code snippets, closed by `---`.

use crate::delimiters::base_name;
use crate::error::Result;
use crate::model::{DocumentBuffer, ParsedFile, ReservedTag, TagMap};
use crate::render::Renderer;
use regex::Regex;
use std::sync::LazyLock;

pub struct MarkdownRenderer;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static RE_WORD_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\s_-]+").unwrap());

static RE_BACKTICKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`+").unwrap());

impl Renderer for MarkdownRenderer {
    fn render_file(&self, file: &ParsedFile) -> Result<String> {
        let mut lines: Vec<String> = vec![format!("# {}", title(&file.name)), String::new()];
        for block in &file.blocks {
            lines.extend(render_block(block, &file.extension));
        }
        lines.push("---".to_string());
        Ok(lines.join("\n") + "\n")
    }

    fn assemble(&self, buffer: &DocumentBuffer, footer: Option<&str>) -> String {
        let mut doc = buffer.sections().join("\n");
        if let Some(footer) = footer {
            doc.push('\n');
            doc.push_str(footer);
            doc.push('\n');
        }
        doc
    }

    fn file_extension(&self) -> &str {
        "md"
    }
}

/// Render one block; every paragraph is followed by a blank line.
fn render_block(block: &TagMap, extension: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    if let Some(name) = block.reserved(ReservedTag::Name) {
        lines.push(format!("## {}\n", collapse(name)));
    }
    if let Some(brief) = block.reserved(ReservedTag::Brief) {
        lines.push(format!("> {}\n", collapse(brief)));
    }
    if let Some(notes) = block.reserved(ReservedTag::Notes) {
        lines.push(format!("{}\n", notes));
    }
    if let Some(inputs) = block.reserved(ReservedTag::Inputs) {
        lines.push("### Inputs\n".to_string());
        lines.push(format!("{}\n", inputs));
    }
    if let Some(outputs) = block.reserved(ReservedTag::Outputs) {
        lines.push("### Outputs\n".to_string());
        lines.push(format!("{}\n", outputs));
    }

    let rows: Vec<String> = block
        .custom()
        .map(|(name, content)| format!("|**{}**|{}|", title_case(name), table_cell(content)))
        .collect();
    if !rows.is_empty() {
        lines.push("|Field Name|Description|".to_string());
        lines.push("|:---:|:---:|".to_string());
        lines.extend(rows);
        lines.push(String::new());
    }

    for (_, code) in block.snippets() {
        let ticks = fence(code);
        lines.push(format!("{}{}", ticks, extension));
        lines.push(code.to_string());
        lines.push(ticks);
        lines.push(String::new());
    }
    lines
}

/// Backtick fence longer than any backtick run inside `code`.
fn fence(code: &str) -> String {
    let longest = RE_BACKTICKS
        .find_iter(code)
        .map(|m| m.len())
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// File title: base name up to the first `.`, first letter uppercased.
fn title(file_name: &str) -> String {
    let base = base_name(file_name);
    let stem = match base.split('.').next() {
        Some(stem) if !stem.is_empty() => stem,
        _ => base,
    };
    capitalize(stem)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `see_also` → `See Also`
fn title_case(tag: &str) -> String {
    RE_WORD_SEP
        .split(tag)
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn collapse(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Keep a cell on one table row.
fn table_cell(content: &str) -> String {
    content.replace('|', "\\|").replace('\n', "<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    fn block(fields: &[(&str, &str)]) -> TagMap {
        let mut map = TagMap::new();
        for (name, content) in fields {
            map.insert(Field::classify(name, content.to_string()));
        }
        map
    }

    fn file(name: &str, ext: &str, blocks: Vec<TagMap>) -> ParsedFile {
        ParsedFile {
            name: name.to_string(),
            extension: ext.to_string(),
            blocks,
        }
    }

    #[test]
    fn name_only_block() {
        let out = render_block(&block(&[("name", "X")]), "js");
        assert_eq!(out, vec!["## X\n".to_string()]);
    }

    #[test]
    fn full_section() {
        let mut map = block(&[
            ("name", "Add"),
            ("brief", "adds two\n numbers"),
            ("notes", "pure"),
            ("inputs", "- a\n- b"),
            ("outputs", "- sum"),
            ("author", "me"),
        ]);
        map.insert(Field::Snippet {
            index: 0,
            content: "add(1, 2);".to_string(),
        });
        let out = MarkdownRenderer
            .render_file(&file("src/math.js", "js", vec![map]))
            .unwrap();
        assert_eq!(
            out,
            "# Math\n\n## Add\n\n> adds two numbers\n\npure\n\n### Inputs\n\n- a\n- b\n\n\
             ### Outputs\n\n- sum\n\n|Field Name|Description|\n|:---:|:---:|\n|**Author**|me|\n\n\
             ```js\nadd(1, 2);\n```\n\n---\n"
        );
    }

    #[test]
    fn custom_rows_stay_on_one_line() {
        let out = render_block(&block(&[("see_also-this", "a|b\nc")]), "c");
        assert_eq!(out[2], "|**See Also This**|a\\|b<br>c|");
    }

    #[test]
    fn snippets_in_index_order() {
        let mut map = TagMap::new();
        map.insert(Field::Snippet { index: 2, content: "two".into() });
        map.insert(Field::Snippet { index: 1, content: "one".into() });
        let out = render_block(&map, "py").join("\n");
        assert!(out.find("one").unwrap() < out.find("two").unwrap());
        assert!(out.starts_with("```py\none"));
    }

    #[test]
    fn fence_outgrows_backticks_in_code() {
        let mut map = TagMap::new();
        map.insert(Field::Snippet {
            index: 0,
            content: "const md = `\n```js\nx\n```\n`;".into(),
        });
        let out = render_block(&map, "js");
        assert_eq!(out[0], "````js");
        assert_eq!(out[2], "````");
        assert_eq!(fence("a `b` c"), "```");
    }

    #[test]
    fn titles() {
        assert_eq!(title("dir/math.test.js"), "Math");
        assert_eq!(title("C:\\src\\stack.c"), "Stack");
        assert_eq!(title(".hidden.py"), ".hidden.py");
        assert_eq!(title("émile.js"), "Émile");
    }

    #[test]
    fn assemble_with_footer() {
        let mut buffer = DocumentBuffer::default();
        buffer.push_section("# A\n\n---\n".into());
        buffer.push_section("# B\n\n---\n".into());
        assert_eq!(
            MarkdownRenderer.assemble(&buffer, Some("footer")),
            "# A\n\n---\n\n# B\n\n---\n\nfooter\n"
        );
        assert_eq!(MarkdownRenderer.assemble(&buffer, None), "# A\n\n---\n\n# B\n\n---\n");
    }
}
