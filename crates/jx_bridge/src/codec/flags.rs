/// Largest honored indent width; wider requests are clamped.
pub const MAX_INDENT: u8 = 31;

/// Encoder options. `indent == 0` emits a single line.
///
/// `preserve_order` is accepted for surface compatibility but is a no-op:
/// objects are stored in insertion order and the encoder emits that order
/// unless `sort_keys` overrides it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DumpFlags {
    pub indent: u8,
    pub ensure_ascii: bool,
    pub sort_keys: bool,
    pub preserve_order: bool,
}

impl DumpFlags {
    pub fn with_indent(indent: u8) -> Self {
        Self {
            indent: indent.min(MAX_INDENT),
            ..Self::default()
        }
    }
}
