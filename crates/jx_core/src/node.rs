//! JSON node representation.
//!
//! A `Node` is one JSON value. Containers hold `NodeId`s into the shared
//! `NodeStore` rather than owning their children, so a node can be referenced
//! from several containers and from live handles at the same time.

use crate::store::NodeId;
use ahash::RandomState;
use indexmap::IndexMap;

/// Insertion-ordered object map. Key order is significant and survives
/// encode/decode unless the caller asks for sorted output.
pub type ObjectMap = IndexMap<String, NodeId, RandomState>;

fn object_hasher() -> RandomState {
    RandomState::with_seeds(0, 0, 0, 0)
}

pub fn object_map_new() -> ObjectMap {
    IndexMap::with_hasher(object_hasher())
}

pub fn object_map_with_capacity(cap: usize) -> ObjectMap {
    IndexMap::with_capacity_and_hasher(cap, object_hasher())
}

/// A JSON value. Closed set of variants; there is no "unknown" case.
#[derive(Debug, Clone)]
pub enum Node {
    Object(ObjectMap),
    Array(Vec<NodeId>),
    String(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
    Null,
}

impl Node {
    pub fn object() -> Node {
        Node::Object(object_map_new())
    }

    pub fn array() -> Node {
        Node::Array(Vec::new())
    }

    pub fn json_type(&self) -> JsonType {
        match self {
            Node::Object(_) => JsonType::Object,
            Node::Array(_) => JsonType::Array,
            Node::String(_) => JsonType::String,
            Node::Integer(_) => JsonType::Integer,
            Node::Real(_) => JsonType::Real,
            Node::Bool(true) => JsonType::True,
            Node::Bool(false) => JsonType::False,
            Node::Null => JsonType::Null,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.json_type().name()
    }
}

/// Type discriminant exposed to callers. Discriminant values are stable and
/// follow the jansson numbering, so scripts can switch on the raw integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum JsonType {
    Object = 0,
    Array = 1,
    String = 2,
    Integer = 3,
    Real = 4,
    True = 5,
    False = 6,
    Null = 7,
}

impl JsonType {
    pub fn name(self) -> &'static str {
        match self {
            JsonType::Object => "object",
            JsonType::Array => "array",
            JsonType::String => "string",
            JsonType::Integer => "integer",
            JsonType::Real => "real",
            JsonType::True => "true",
            JsonType::False => "false",
            JsonType::Null => "null",
        }
    }
}
