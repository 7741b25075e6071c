//! Collection document models
//!
//! The document is parsed as a [`serde_json::Value`] once, and each node is
//! classified into a [`CollectionNode`] right before it is visited. A broken
//! node therefore costs only itself, never its siblings.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::constants::{
    DEFAULT_COLLECTION_NAME, DEFAULT_FOLDER_NAME, DEFAULT_METHOD, DEFAULT_REQUEST_NAME,
};
use crate::error::{ConvertError, SkipReason};

/// Treats an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of entries that must each be a JSON object; `null` is empty
fn object_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    entries
        .into_iter()
        .map(|entry| match entry {
            Value::Object(_) => T::deserialize(entry).map_err(D::Error::custom),
            other => Err(D::Error::custom(format!(
                "expected an object entry, got {}",
                value_kind(&other)
            ))),
        })
        .collect()
}

/// Key/value entry used by headers, query params and urlencoded bodies
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct KeyValue {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        KeyValue {
            key: Some(key.into()),
            value: Some(value.into()),
            disabled: false,
        }
    }

    /// Key and value when the entry is enabled and has a non-empty key
    pub fn active(&self) -> Option<(&str, &str)> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() && !self.disabled => {
                Some((key, self.value.as_deref().unwrap_or("")))
            }
            _ => None,
        }
    }
}

/// Kind of a multipart form field
#[derive(Clone, Debug, PartialEq)]
pub enum FormFieldKind {
    Text,
    File,
}

/// Multipart form field
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FormParam {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled: bool,
}

impl FormParam {
    pub fn kind(&self) -> FormFieldKind {
        match self.kind.as_deref() {
            Some("file") => FormFieldKind::File,
            _ => FormFieldKind::Text,
        }
    }

    pub fn active(&self) -> Option<(&str, &str)> {
        match self.key.as_deref() {
            Some(key) if !key.is_empty() && !self.disabled => {
                Some((key, self.value.as_deref().unwrap_or("")))
            }
            _ => None,
        }
    }
}

/// Host or path parts: usually a list of segments, sometimes one string
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Segments {
    List(Vec<String>),
    Single(String),
}

impl Segments {
    pub fn join(&self, separator: &str) -> String {
        match self {
            Segments::List(parts) => parts.join(separator),
            Segments::Single(part) => part.clone(),
        }
    }
}

/// URL broken into its parts
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct StructuredUrl {
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub host: Option<Segments>,
    #[serde(default)]
    pub path: Option<Segments>,
    #[serde(default, deserialize_with = "object_list")]
    pub query: Vec<KeyValue>,
    #[serde(default)]
    pub raw: Option<String>,
}

/// The shapes a request URL can take
#[derive(Clone, Debug, PartialEq)]
pub enum UrlSpec {
    Raw(String),
    Structured(StructuredUrl),
    /// Anything else, including objects with ill-typed parts; kept so the
    /// translator can report it
    Unsupported(Value),
}

impl<'de> Deserialize<'de> for UrlSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(raw) => UrlSpec::Raw(raw),
            Value::Object(_) => match StructuredUrl::deserialize(&value) {
                Ok(parts) => UrlSpec::Structured(parts),
                Err(_) => UrlSpec::Unsupported(value),
            },
            other => UrlSpec::Unsupported(other),
        })
    }
}

impl Default for UrlSpec {
    fn default() -> Self {
        UrlSpec::Structured(StructuredUrl::default())
    }
}

#[derive(Deserialize)]
struct RawBody {
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    raw: Option<String>,
    #[serde(default, deserialize_with = "object_list")]
    formdata: Vec<FormParam>,
    #[serde(default, deserialize_with = "object_list")]
    urlencoded: Vec<KeyValue>,
}

/// Request body, tagged by its `mode`
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "RawBody")]
pub enum BodySpec {
    #[default]
    None,
    Raw(String),
    FormData(Vec<FormParam>),
    UrlEncoded(Vec<KeyValue>),
}

impl From<RawBody> for BodySpec {
    fn from(body: RawBody) -> Self {
        match body.mode.as_deref() {
            Some("raw") => BodySpec::Raw(body.raw.unwrap_or_default()),
            Some("formdata") => BodySpec::FormData(body.formdata),
            Some("urlencoded") => BodySpec::UrlEncoded(body.urlencoded),
            _ => BodySpec::None,
        }
    }
}

/// A single HTTP request as described by the collection
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RequestSpec {
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub url: UrlSpec,
    #[serde(default, rename = "header", deserialize_with = "object_list")]
    pub headers: Vec<KeyValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: BodySpec,
}

impl RequestSpec {
    /// A plain GET of `url`, used for the shorthand `"request": "<url>"`
    pub fn from_url(url: impl Into<String>) -> Self {
        RequestSpec {
            url: UrlSpec::Raw(url.into()),
            ..Default::default()
        }
    }

    /// Upper-cased method, `GET` when absent
    pub fn method(&self) -> String {
        self.method
            .as_deref()
            .unwrap_or(DEFAULT_METHOD)
            .to_uppercase()
    }
}

/// A classified node of the collection tree
#[derive(Clone, Debug, PartialEq)]
pub enum CollectionNode<'a> {
    Folder {
        name: String,
        children: &'a [Value],
    },
    Request {
        name: String,
        spec: RequestSpec,
    },
}

impl<'a> CollectionNode<'a> {
    /// Decides once whether a raw node is a folder, a request, or neither.
    ///
    /// A node carrying an `item` key is a folder even if it also has a
    /// `request`.
    pub fn classify(node: &'a Value) -> Result<Self, SkipReason> {
        let object = node.as_object().ok_or(SkipReason::UnrecognizedNode)?;

        if let Some(children) = object.get("item") {
            let children: &'a [Value] = match children {
                Value::Array(items) => items.as_slice(),
                Value::Null => &[],
                other => {
                    return Err(SkipReason::MalformedFolder(format!(
                        "`item` must be an array, got {}",
                        value_kind(other)
                    )))
                }
            };
            return Ok(CollectionNode::Folder {
                name: node_name(node, DEFAULT_FOLDER_NAME).to_string(),
                children,
            });
        }

        if let Some(request) = object.get("request") {
            let spec = match request {
                Value::String(url) => RequestSpec::from_url(url.as_str()),
                other => RequestSpec::deserialize(other)
                    .map_err(|e| SkipReason::MalformedRequest(e.to_string()))?,
            };
            return Ok(CollectionNode::Request {
                name: node_name(node, DEFAULT_REQUEST_NAME).to_string(),
                spec,
            });
        }

        Err(SkipReason::UnrecognizedNode)
    }
}

/// The node's `name`, or `fallback` when it has none
pub fn node_name<'a>(node: &'a Value, fallback: &'a str) -> &'a str {
    node.get("name").and_then(Value::as_str).unwrap_or(fallback)
}

/// Short description of a JSON value's type, for log messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The root document: a name and the top-level nodes
#[derive(Clone, Debug)]
pub struct Collection {
    pub name: String,
    pub items: Vec<Value>,
}

impl Collection {
    /// Splits a parsed document into its name and top-level items.
    ///
    /// A missing or non-array `item` yields no items, which callers report
    /// as an empty collection.
    pub fn from_value(doc: Value) -> Result<Self, ConvertError> {
        let Value::Object(mut root) = doc else {
            return Err(ConvertError::NotACollection);
        };

        let name = root
            .get("info")
            .and_then(|info| info.get("name"))
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_COLLECTION_NAME)
            .to_string();

        let items = match root.remove("item") {
            Some(Value::Array(items)) => items,
            Some(other) => {
                tracing::debug!(kind = value_kind(&other), "Top-level `item` is not an array");
                Vec::new()
            }
            None => Vec::new(),
        };

        Ok(Collection { name, items })
    }
}
