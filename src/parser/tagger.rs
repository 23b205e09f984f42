//! Tagger: splits a field blob into tag/content pairs.

use crate::delimiters::Markers;
use crate::error::{Result, StructuralError};
use crate::model::{Field, FieldBlob, TagMap};
use regex::Regex;

/// Splits field blobs on `@<identifier>:` boundaries.
#[derive(Debug, Clone)]
pub struct Tagger {
    boundary: Regex,
    tag: char,
    escape: char,
}

impl Tagger {
    pub fn new(markers: &Markers) -> Result<Self> {
        let pattern = format!(
            r"^{}([\w-]+){}",
            regex::escape(&markers.tag.to_string()),
            regex::escape(&markers.description.to_string())
        );
        Ok(Self {
            boundary: Regex::new(&pattern)?,
            tag: markers.tag,
            escape: markers.escape,
        })
    }

    /// Tag a blob: parsed fields from its body, then its snippets.
    pub fn tag(&self, blob: &FieldBlob) -> std::result::Result<TagMap, StructuralError> {
        let mut map = self.tag_str(&blob.body)?;
        for snippet in &blob.snippets {
            map.insert(Field::Snippet {
                index: snippet.index,
                content: snippet.text.clone(),
            });
        }
        Ok(map)
    }

    /// Tag a bare body.
    ///
    /// Every tag must be followed by non-empty content and no text may come
    /// before the first tag; otherwise both lists are returned in the error.
    pub fn tag_str(&self, body: &str) -> std::result::Result<TagMap, StructuralError> {
        // (name, offset of the tag, offset of its content)
        let mut boundaries: Vec<(String, usize, usize)> = Vec::new();
        let mut tags: Vec<String> = Vec::new();
        let mut dangling = false;
        let mut prev: Option<char> = None;

        for (i, c) in body.char_indices() {
            if c == self.tag && prev != Some(self.escape) {
                if let Some(caps) = self.boundary.captures(&body[i..]) {
                    let name = caps[1].to_lowercase();
                    tags.push(format!("{}{}", self.tag, name));
                    boundaries.push((name, i, i + caps[0].len()));
                } else {
                    let next = body[i + c.len_utf8()..].chars().next();
                    if prev.map_or(true, char::is_whitespace) || next.map_or(true, char::is_whitespace) {
                        tags.push(self.tag.to_string());
                        dangling = true;
                    }
                }
            }
            prev = Some(c);
        }

        let leading_end = boundaries.first().map_or(body.len(), |b| b.1);
        let leading = self.clean(&body[..leading_end]);

        let mut contents: Vec<String> = Vec::new();
        if !leading.is_empty() {
            contents.push(leading.clone());
        }
        let mut fields: Vec<(String, String)> = Vec::new();
        for (i, (name, _, content_start)) in boundaries.iter().enumerate() {
            let content_end = boundaries.get(i + 1).map_or(body.len(), |b| b.1);
            let content = self.clean(&body[*content_start..content_end]);
            if !content.is_empty() {
                contents.push(content.clone());
            }
            fields.push((name.clone(), content));
        }

        let aligned = leading.is_empty() && !dangling && fields.iter().all(|(_, c)| !c.is_empty());
        if !aligned {
            return Err(StructuralError { tags, contents });
        }

        let mut map = TagMap::new();
        for (name, content) in fields {
            map.insert(Field::classify(&name, content));
        }
        Ok(map)
    }

    /// Trim and drop the escape in front of literal tag delimiters.
    fn clean(&self, segment: &str) -> String {
        let escaped = format!("{}{}", self.escape, self.tag);
        segment.trim().replace(&escaped, &self.tag.to_string())
    }
}
