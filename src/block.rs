//! Block schema and factory.
//!
//! A page is an ordered list of typed [`Block`]s. The set of block types is
//! closed: [`BlockType`] is a sum type with one variant per supported tag so
//! the render engine can match exhaustively, plus an [`BlockType::Unknown`]
//! carrier so block lists persisted with a tag this build does not recognize
//! still deserialize and render a marker instead of failing the document.
//!
//! [`Block::new`] is the creation-time gate: it refuses unknown tags and
//! stamps out a block with the type's registered default content and
//! properties.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::{Error, Result};

/// Closed set of block type tags.
///
/// Tags serialize to the wire strings used by the editor and the persisted
/// record shape (`"heading"`, `"customHtml"`, ...). Deserializing a tag
/// outside the set yields `Unknown` rather than an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlockType {
    Heading,
    Paragraph,
    List,
    Image,
    Video,
    Container,
    Section,
    Row,
    Input,
    Button,
    Form,
    CustomHtml,
    Link,
    /// Tag not present in the registry. Never produced by the factory;
    /// exists so already-persisted data cannot poison a whole block list.
    Unknown(String),
}

impl BlockType {
    /// Every registered type, in palette order.
    pub const ALL: [BlockType; 13] = [
        BlockType::Container,
        BlockType::Section,
        BlockType::Row,
        BlockType::Heading,
        BlockType::Paragraph,
        BlockType::List,
        BlockType::Image,
        BlockType::Video,
        BlockType::Input,
        BlockType::Button,
        BlockType::Form,
        BlockType::CustomHtml,
        BlockType::Link,
    ];

    /// The wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            BlockType::Heading => "heading",
            BlockType::Paragraph => "paragraph",
            BlockType::List => "list",
            BlockType::Image => "image",
            BlockType::Video => "video",
            BlockType::Container => "container",
            BlockType::Section => "section",
            BlockType::Row => "row",
            BlockType::Input => "input",
            BlockType::Button => "button",
            BlockType::Form => "form",
            BlockType::CustomHtml => "customHtml",
            BlockType::Link => "link",
            BlockType::Unknown(tag) => tag,
        }
    }
}

impl From<String> for BlockType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "heading" => BlockType::Heading,
            "paragraph" => BlockType::Paragraph,
            "list" => BlockType::List,
            "image" => BlockType::Image,
            "video" => BlockType::Video,
            "container" => BlockType::Container,
            "section" => BlockType::Section,
            "row" => BlockType::Row,
            "input" => BlockType::Input,
            "button" => BlockType::Button,
            "form" => BlockType::Form,
            "customHtml" => BlockType::CustomHtml,
            "link" => BlockType::Link,
            _ => BlockType::Unknown(tag),
        }
    }
}

impl From<&str> for BlockType {
    fn from(tag: &str) -> Self {
        BlockType::from(tag.to_string())
    }
}

impl From<BlockType> for String {
    fn from(kind: BlockType) -> String {
        kind.as_str().to_string()
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Property map: property name to string, number, or boolean value.
///
/// Kept as a loose JSON map because persisted data may carry a partial set of
/// keys; renderers read it through typed accessors that fall back to the
/// registered defaults key by key.
pub type Properties = Map<String, Value>;

/// Type-dependent block payload.
///
/// Text-bearing blocks carry a string, list blocks carry an ordered list of
/// item strings. `Other` absorbs any payload shape a foreign writer produced
/// so one odd block cannot fail deserialization of the list; renderers treat
/// it like a missing payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Content {
    Text(String),
    Items(Vec<String>),
    Other(Value),
}

impl Content {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[String]> {
        match self {
            Content::Items(items) => Some(items),
            _ => None,
        }
    }
}

/// One typed, positioned unit of page content.
///
/// `id` is generated at creation and stable for the block's lifetime; list
/// position is the only ordering signal. `children` is declared and carried
/// through persistence but the engine does not render it recursively —
/// structural blocks emit placeholder markup instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(default)]
    pub children: Vec<Block>,
}

impl Block {
    /// Create a new block of the given type with its registered defaults.
    ///
    /// Fails with [`Error::UnknownBlockType`] for tags outside the registry;
    /// the factory never fabricates a block for an invalid type.
    pub fn new(kind: BlockType) -> Result<Self> {
        if let BlockType::Unknown(tag) = &kind {
            return Err(Error::UnknownBlockType(tag.clone()));
        }
        Ok(Block {
            id: Uuid::new_v4().to_string(),
            content: default_content(&kind),
            properties: default_properties(&kind),
            kind,
            children: Vec::new(),
        })
    }
}

/// Default editor content for a block type, if the type carries content.
pub fn default_content(kind: &BlockType) -> Option<Content> {
    match kind {
        BlockType::Heading => Some(Content::Text("Sample Heading".to_string())),
        BlockType::Paragraph => Some(Content::Text(
            "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Nullam in dui mauris."
                .to_string(),
        )),
        BlockType::List => Some(Content::Items(vec![
            "Item 1".to_string(),
            "Item 2".to_string(),
            "Item 3".to_string(),
        ])),
        BlockType::CustomHtml => Some(Content::Text(
            "<div>Custom HTML goes here</div>".to_string(),
        )),
        BlockType::Link => Some(Content::Text("Click here".to_string())),
        _ => None,
    }
}

/// Default property set for a block type, if the type declares properties.
pub fn default_properties(kind: &BlockType) -> Option<Properties> {
    let props = match kind {
        BlockType::Heading => json!({ "level": 2, "align": "left" }),
        BlockType::Paragraph => json!({ "align": "left" }),
        BlockType::List => json!({ "type": "unordered" }),
        BlockType::Image => json!({
            "src": "",
            "alt": "",
            "width": "100%",
            "height": "auto",
            "align": "center",
        }),
        BlockType::Video => json!({
            "src": "",
            "type": "youtube",
            "width": "100%",
            "height": "315",
            "controls": true,
            "autoplay": false,
        }),
        BlockType::Container => json!({
            "maxWidth": "100%",
            "padding": "1rem",
            "margin": "0 auto",
            "backgroundColor": "",
            "textColor": "",
        }),
        BlockType::Section => json!({
            "height": "auto",
            "padding": "2rem 1rem",
            "backgroundColor": "",
            "backgroundImage": "",
        }),
        BlockType::Row => json!({ "columns": 2, "gap": "1rem", "alignment": "stretch" }),
        BlockType::Input => json!({
            "label": "Input Label",
            "name": "input-name",
            "type": "text",
            "placeholder": "Enter value...",
            "required": false,
        }),
        BlockType::Button => json!({
            "text": "Submit",
            "type": "submit",
            "variant": "primary",
            "size": "medium",
        }),
        BlockType::Form => json!({ "action": "", "method": "post" }),
        BlockType::CustomHtml | BlockType::Unknown(_) => return None,
        BlockType::Link => json!({ "href": "#", "target": "_self", "style": "default" }),
    };
    match props {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
