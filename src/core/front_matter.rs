//! Front matter boundary scanning and extraction
//!
//! A document may open with a YAML block fenced by lines that read `---`
//! (surrounding Unicode whitespace allowed). The first such line opens the block, the
//! next one closes it, and what follows is the body. Only lines ending in a
//! newline count as delimiters.

use crate::core::collection::{MutableProperties, PropertyCollection};
use crate::core::collection_factory::CollectionFactory;
use crate::core::factory::CreateOptions;
use crate::core::value::Value;
use crate::error::{PropertiesError, Result};
use log::debug;
use std::borrow::Cow;
use std::collections::HashMap;

const DELIMITER: &[u8] = b"---";

/// Byte offsets of a front matter block inside a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatterRegion {
    /// First byte of the YAML payload, just past the opening delimiter line
    pub start: usize,
    /// One past the last byte of the YAML payload, where the closing delimiter line begins
    pub end: usize,
    /// First byte after the closing delimiter line
    pub body_start: usize,
}

/// Locate the front matter block in `content`
///
/// Returns `Ok(None)` when there is no opening delimiter and
/// [`PropertiesError::MalformedFrontMatter`] when the block is never closed.
pub fn scan(content: &[u8]) -> Result<Option<FrontMatterRegion>> {
    let mut consumed = 0;
    let mut start = None;

    while let Some(len) = content[consumed..].iter().position(|&b| b == b'\n') {
        let line_start = consumed;
        let line = &content[line_start..line_start + len];
        consumed += len + 1;

        if trim_space(line) != DELIMITER {
            continue;
        }

        match start {
            None => start = Some(consumed),
            Some(start) => {
                return Ok(Some(FrontMatterRegion {
                    start,
                    end: line_start,
                    body_start: consumed,
                }));
            }
        }
    }

    match start {
        None => Ok(None),
        Some(start) => Err(PropertiesError::unclosed_front_matter(start)),
    }
}

/// Strip leading and trailing Unicode whitespace
///
/// Bytes that are not valid UTF-8 are never whitespace, so trimming stops at
/// them.
fn trim_space(bytes: &[u8]) -> &[u8] {
    let leading = match std::str::from_utf8(bytes) {
        Ok(text) => text.len() - text.trim_start().len(),
        Err(e) => {
            let valid = std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default();
            valid.len() - valid.trim_start().len()
        }
    };
    let rest = &bytes[leading..];

    let trailing = match rest.utf8_chunks().last() {
        Some(chunk) if chunk.invalid().is_empty() => {
            chunk.valid().len() - chunk.valid().trim_end().len()
        }
        _ => 0,
    };
    &rest[..rest.len() - trailing]
}

/// What to do when the YAML inside the block cannot be decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YamlErrorMode {
    /// Report the failure as an error
    #[default]
    Strict,
    /// Drop the front matter silently: no collection, no error
    Lenient,
}

/// Options for [`extract_front_matter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions<'a> {
    /// Read every value as text and infer its type (flag, date-time, integer, text)
    pub smart_parse: bool,
    pub yaml_errors: YamlErrorMode,
    /// Passed to the property factory for every entry
    pub create: CreateOptions<'a>,
}

impl ExtractOptions<'_> {
    pub fn smart() -> Self {
        Self {
            smart_parse: true,
            ..Default::default()
        }
    }

    pub fn lenient(mut self) -> Self {
        self.yaml_errors = YamlErrorMode::Lenient;
        self
    }
}

/// A document split into its body and its front matter properties
#[derive(Debug)]
pub struct FrontMatter<'a> {
    /// The document without its front matter, trimmed when front matter was present
    pub body: Cow<'a, [u8]>,
    /// `None` when the document had no front matter (or it was dropped leniently)
    pub properties: Option<PropertyCollection>,
    /// Number of properties accepted into the collection
    pub count: usize,
}

impl FrontMatter<'_> {
    /// The body as text, replacing invalid UTF-8
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn has_front_matter(&self) -> bool {
        self.properties.is_some()
    }

    pub fn into_owned(self) -> FrontMatter<'static> {
        FrontMatter {
            body: Cow::Owned(self.body.into_owned()),
            properties: self.properties,
            count: self.count,
        }
    }
}

/// Split `content` into body and properties using `factory` for the collection
pub fn extract_front_matter<'a>(
    factory: &CollectionFactory,
    content: &'a [u8],
    options: &ExtractOptions<'_>,
) -> Result<FrontMatter<'a>> {
    let Some(region) = scan(content)? else {
        return Ok(FrontMatter {
            body: Cow::Borrowed(content),
            properties: None,
            count: 0,
        });
    };

    debug!(
        "front matter found: payload {}..{}, body from {}",
        region.start, region.end, region.body_start
    );

    let payload = &content[region.start..region.end];
    let body = Cow::Borrowed(trim_space(&content[region.body_start..]));

    let decoded = if options.smart_parse {
        decode_text_map(payload).map(Decoded::Text)
    } else {
        decode_value_map(payload).map(Decoded::Values)
    };

    let decoded = match decoded {
        Ok(decoded) => decoded,
        Err(e) if options.yaml_errors == YamlErrorMode::Lenient => {
            debug!("ignoring undecodable front matter: {}", e);
            return Ok(FrontMatter {
                body,
                properties: None,
                count: 0,
            });
        }
        Err(e) => return Err(e),
    };

    let properties = factory.empty_mutable();
    let added = match decoded {
        Decoded::Values(items) => properties.add_map(items, &options.create),
        Decoded::Text(items) => properties.add_text_map(items, &options.create),
    };

    match added {
        Ok(count) => Ok(FrontMatter {
            body,
            properties: Some(properties),
            count,
        }),
        Err(e) => {
            let partial = FrontMatter {
                body: Cow::Owned(body.into_owned()),
                properties: Some(properties),
                count: e.accepted(),
            };
            Err(PropertiesError::partial_front_matter(partial, e))
        }
    }
}

enum Decoded {
    Values(HashMap<String, Value>),
    Text(HashMap<String, String>),
}

fn decode_mapping(payload: &[u8]) -> Result<Vec<(String, serde_yaml::Value)>> {
    let value: serde_yaml::Value = serde_yaml::from_slice(payload)?;
    let map = match value {
        serde_yaml::Value::Null => return Ok(Vec::new()),
        serde_yaml::Value::Mapping(map) => map,
        other => {
            return Err(PropertiesError::invalid_front_matter(format!(
                "expected a mapping, found {}",
                Value::from_yaml(other).type_name()
            )));
        }
    };

    map.into_iter()
        .map(|(k, v)| match k {
            serde_yaml::Value::String(key) => Ok((key, v)),
            other => Err(PropertiesError::invalid_front_matter(format!(
                "non-string key found: {:?}",
                other
            ))),
        })
        .collect()
}

fn decode_value_map(payload: &[u8]) -> Result<HashMap<String, Value>> {
    Ok(decode_mapping(payload)?
        .into_iter()
        .map(|(k, v)| (k, Value::from_yaml(v)))
        .collect())
}

fn decode_text_map(payload: &[u8]) -> Result<HashMap<String, String>> {
    let entries = decode_mapping(payload)?;
    if entries.is_empty() {
        return Ok(HashMap::new());
    }
    if let Some((k, v)) = entries.iter().find(|(_, v)| v.is_sequence() || v.is_mapping()) {
        return Err(PropertiesError::invalid_front_matter(format!(
            "expected a scalar for {:?}, found {}",
            k,
            Value::from_yaml(v.clone()).type_name()
        )));
    }

    // Decode again straight into strings so scalars keep their source text.
    let raw: HashMap<String, Option<String>> = serde_yaml::from_slice(payload)?;
    Ok(raw
        .into_iter()
        .map(|(k, v)| (k, v.unwrap_or_default()))
        .collect())
}
