//! Encoding: our own writer over the node store.
//!
//! Layout contract: key/value separator is `": "`, item separator is `","`
//! followed by newline and indentation when `indent > 0`. Empty containers
//! collapse to `{}`/`[]`. `sort_keys` emits objects in lexicographic key
//! order and wins over `preserve_order`; otherwise objects emit in storage
//! (insertion) order. Non-finite reals and circular references abort the
//! encode with no partial output at the call boundary.
//!
//! The walk runs on an explicit task stack, like the store's teardown, so
//! tree depth is bounded by the heap and not the call stack. Containers
//! still open when a node is reached again mark a cycle; shared acyclic
//! subtrees are emitted once per reference as usual.

use ahash::AHashSet;
use jx_core::{Node, NodeId, NodeStore};

use crate::codec::flags::{DumpFlags, MAX_INDENT};

pub(crate) fn dump_to_string(
    store: &NodeStore,
    root: NodeId,
    flags: DumpFlags,
) -> Option<String> {
    let dumper = Dumper {
        store,
        flags,
        indent: flags.indent.min(MAX_INDENT),
        open: AHashSet::default(),
        tasks: Vec::new(),
        out: String::new(),
    };
    dumper.run(root)
}

enum Task<'a> {
    Value { id: NodeId, depth: usize },
    Key(&'a str),
    Text(&'static str),
    Break(usize),
    Close { id: NodeId, text: &'static str },
}

struct Dumper<'a> {
    store: &'a NodeStore,
    flags: DumpFlags,
    indent: u8,
    /// Containers entered but not yet closed; re-entering one is a cycle.
    open: AHashSet<NodeId>,
    tasks: Vec<Task<'a>>,
    out: String,
}

impl<'a> Dumper<'a> {
    fn run(mut self, root: NodeId) -> Option<String> {
        self.tasks.push(Task::Value { id: root, depth: 0 });
        while let Some(task) = self.tasks.pop() {
            match task {
                Task::Value { id, depth } => self.value(id, depth)?,
                Task::Key(key) => {
                    dump_string(key, self.flags.ensure_ascii, &mut self.out);
                    self.out.push_str(": ");
                }
                Task::Text(text) => self.out.push_str(text),
                Task::Break(depth) => break_line(self.indent, depth, &mut self.out),
                Task::Close { id, text } => {
                    self.open.remove(&id);
                    self.out.push_str(text);
                }
            }
        }
        Some(self.out)
    }

    /// Emit a scalar, or open a container and queue its pieces. Queued
    /// tasks are pushed in reverse so they pop in emission order; the
    /// stray leading item separator is dropped after the loop.
    fn value(&mut self, id: NodeId, depth: usize) -> Option<()> {
        let store = self.store;
        match store.get(id) {
            Node::Null => self.out.push_str("null"),
            Node::Bool(true) => self.out.push_str("true"),
            Node::Bool(false) => self.out.push_str("false"),
            Node::Integer(n) => {
                let mut buf = itoa::Buffer::new();
                self.out.push_str(buf.format(*n));
            }
            Node::Real(x) => {
                if !x.is_finite() {
                    return None;
                }
                let mut buf = ryu::Buffer::new();
                self.out.push_str(buf.format(*x));
            }
            Node::String(s) => dump_string(s, self.flags.ensure_ascii, &mut self.out),
            Node::Array(items) => {
                if items.is_empty() {
                    self.out.push_str("[]");
                    return Some(());
                }
                if !self.open.insert(id) {
                    return None;
                }
                self.out.push('[');
                self.tasks.push(Task::Close { id, text: "]" });
                self.tasks.push(Task::Break(depth));
                for &child in items.iter().rev() {
                    self.tasks.push(Task::Value {
                        id: child,
                        depth: depth + 1,
                    });
                    self.tasks.push(Task::Break(depth + 1));
                    self.tasks.push(Task::Text(","));
                }
                self.tasks.pop();
            }
            Node::Object(map) => {
                if map.is_empty() {
                    self.out.push_str("{}");
                    return Some(());
                }
                if !self.open.insert(id) {
                    return None;
                }
                self.out.push('{');
                let mut keys: Vec<&'a str> = map.keys().map(String::as_str).collect();
                if self.flags.sort_keys {
                    keys.sort_unstable();
                }
                self.tasks.push(Task::Close { id, text: "}" });
                self.tasks.push(Task::Break(depth));
                for &key in keys.iter().rev() {
                    let child = *map.get(key).expect("key listed from this map");
                    self.tasks.push(Task::Value {
                        id: child,
                        depth: depth + 1,
                    });
                    self.tasks.push(Task::Key(key));
                    self.tasks.push(Task::Break(depth + 1));
                    self.tasks.push(Task::Text(","));
                }
                self.tasks.pop();
            }
        }
        Some(())
    }
}

fn break_line(indent: u8, depth: usize, out: &mut String) {
    if indent == 0 {
        return;
    }
    out.push('\n');
    for _ in 0..depth * indent as usize {
        out.push(' ');
    }
}

fn dump_string(text: &str, ensure_ascii: bool, out: &mut String) {
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => push_escape(ch as u32, out),
            ch if ensure_ascii && !ch.is_ascii() => {
                let cp = ch as u32;
                if cp > 0xffff {
                    // Astral plane: UTF-16 surrogate pair.
                    let v = cp - 0x10000;
                    push_escape(0xd800 + (v >> 10), out);
                    push_escape(0xdc00 + (v & 0x3ff), out);
                } else {
                    push_escape(cp, out);
                }
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

fn push_escape(code: u32, out: &mut String) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    out.push_str("\\u");
    for shift in [12, 8, 4, 0] {
        out.push(HEX[((code >> shift) & 0xf) as usize] as char);
    }
}

#[cfg(test)]
mod tests {
    use jx_core::{Node, NodeStore, object_map_new};

    use super::*;

    fn singleton(store: &mut NodeStore, key: &str, node: Node) -> NodeId {
        let child = store.alloc(node);
        let mut map = object_map_new();
        map.insert(key.to_string(), child);
        store.alloc(Node::Object(map))
    }

    #[test]
    fn compact_layout_keeps_key_separator_spaced() {
        let mut store = NodeStore::new();
        let root = singleton(&mut store, "x", Node::Integer(5));
        let text = dump_to_string(&store, root, DumpFlags::default()).unwrap();
        assert_eq!(text, "{\"x\": 5}");
    }

    #[test]
    fn indented_layout_breaks_and_nests() {
        let mut store = NodeStore::new();
        let inner = store.alloc(Node::Integer(1));
        let arr = store.alloc(Node::Array(vec![inner]));
        let mut map = object_map_new();
        map.insert("a".to_string(), arr);
        let root = store.alloc(Node::Object(map));
        let text = dump_to_string(&store, root, DumpFlags::with_indent(2)).unwrap();
        assert_eq!(text, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn empty_containers_collapse() {
        let mut store = NodeStore::new();
        let obj = store.alloc(Node::Object(object_map_new()));
        let arr = store.alloc(Node::Array(Vec::new()));
        let flags = DumpFlags::with_indent(4);
        assert_eq!(dump_to_string(&store, obj, flags).unwrap(), "{}");
        assert_eq!(dump_to_string(&store, arr, flags).unwrap(), "[]");
    }

    #[test]
    fn sort_keys_orders_lexicographically() {
        let mut store = NodeStore::new();
        let b = store.alloc(Node::Integer(2));
        let a = store.alloc(Node::Integer(1));
        let mut map = object_map_new();
        map.insert("b".to_string(), b);
        map.insert("a".to_string(), a);
        let root = store.alloc(Node::Object(map));
        let flags = DumpFlags {
            sort_keys: true,
            preserve_order: true,
            ..DumpFlags::default()
        };
        assert_eq!(dump_to_string(&store, root, flags).unwrap(), "{\"a\": 1,\"b\": 2}");
    }

    #[test]
    fn ensure_ascii_escapes_bmp_and_astral() {
        let mut store = NodeStore::new();
        let root = store.alloc(Node::String("π🎈".to_string()));
        let flags = DumpFlags {
            ensure_ascii: true,
            ..DumpFlags::default()
        };
        assert_eq!(
            dump_to_string(&store, root, flags).unwrap(),
            "\"\\u03c0\\ud83c\\udf88\""
        );
    }

    #[test]
    fn control_characters_are_escaped() {
        let mut store = NodeStore::new();
        let root = store.alloc(Node::String("a\tb\u{1}".to_string()));
        let text = dump_to_string(&store, root, DumpFlags::default()).unwrap();
        assert_eq!(text, "\"a\\tb\\u0001\"");
    }

    #[test]
    fn non_finite_real_fails_the_encode() {
        let mut store = NodeStore::new();
        let root = singleton(&mut store, "x", Node::Real(f64::NAN));
        assert_eq!(dump_to_string(&store, root, DumpFlags::default()), None);
    }

    #[test]
    fn reals_keep_a_fractional_point() {
        let mut store = NodeStore::new();
        let root = store.alloc(Node::Real(1.0));
        assert_eq!(dump_to_string(&store, root, DumpFlags::default()).unwrap(), "1.0");
    }

    #[test]
    fn circular_reference_fails_the_encode() {
        let mut store = NodeStore::new();
        let a = store.alloc(Node::object());
        let b = store.alloc(Node::object());
        store.incref(b);
        if let Node::Object(map) = store.get_mut(a) {
            map.insert("b".to_string(), b);
        }
        store.incref(a);
        if let Node::Object(map) = store.get_mut(b) {
            map.insert("a".to_string(), a);
        }
        assert_eq!(dump_to_string(&store, a, DumpFlags::default()), None);
        assert_eq!(dump_to_string(&store, a, DumpFlags::with_indent(2)), None);
    }

    #[test]
    fn shared_subtrees_are_not_cycles() {
        let mut store = NodeStore::new();
        let shared = store.alloc(Node::Integer(1));
        store.incref(shared);
        let root = store.alloc(Node::Array(vec![shared, shared]));
        assert_eq!(
            dump_to_string(&store, root, DumpFlags::default()).unwrap(),
            "[1,1]"
        );
    }

    #[test]
    fn deep_tree_dump_does_not_recurse() {
        let mut store = NodeStore::new();
        let mut inner = store.alloc(Node::Integer(0));
        for _ in 0..100_000 {
            inner = store.alloc(Node::Array(vec![inner]));
        }
        let text = dump_to_string(&store, inner, DumpFlags::default()).unwrap();
        assert_eq!(text.len(), 200_001);
        assert!(text.starts_with("[[") && text.ends_with("]]"));
    }
}
