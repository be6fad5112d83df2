//! Load and dump natives over the codec boundary.

use std::fs;
use std::path::Path;

use crate::bridge::JsonBridge;
use crate::codec::{self, DUMP_FAILED, DumpFlags, LoadOutcome, ParseFailure};
use crate::errors::NativeResult;
use crate::handles::{Ident, RawHandle};

impl JsonBridge {
    /// Parse `text` into a fresh tree. Failure is logged and reported as
    /// the BAD sentinel; use [`JsonBridge::load_ex`] for the diagnostics.
    pub fn load(&mut self, caller: Ident, text: &str) -> NativeResult<RawHandle> {
        match self.load_ex(caller, text)? {
            LoadOutcome::Loaded(handle) => Ok(handle),
            LoadOutcome::Invalid(failure) => {
                tracing::error!(
                    line = failure.line,
                    column = failure.column,
                    "json parse failed: {}",
                    failure.text
                );
                Ok(RawHandle::BAD)
            }
        }
    }

    /// Parse `text`, returning the failure as data instead of logging it.
    pub fn load_ex(&mut self, caller: Ident, text: &str) -> NativeResult<LoadOutcome> {
        match codec::parse_text(&mut self.store, text) {
            Ok(id) => Ok(LoadOutcome::Loaded(self.mint_owned(id, caller, "Object")?)),
            Err(failure) => Ok(LoadOutcome::Invalid(failure)),
        }
    }

    pub fn load_file(&mut self, caller: Ident, path: &Path) -> NativeResult<RawHandle> {
        match self.load_file_ex(caller, path)? {
            LoadOutcome::Loaded(handle) => Ok(handle),
            LoadOutcome::Invalid(failure) => {
                tracing::error!(
                    path = %path.display(),
                    line = failure.line,
                    column = failure.column,
                    "json parse failed: {}",
                    failure.text
                );
                Ok(RawHandle::BAD)
            }
        }
    }

    pub fn load_file_ex(&mut self, caller: Ident, path: &Path) -> NativeResult<LoadOutcome> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                // Unreadable input is reported through the same channel as
                // a syntax error, with no position.
                return Ok(LoadOutcome::Invalid(ParseFailure {
                    text: format!("unable to read {}: {err}", path.display()),
                    line: 0,
                    column: 0,
                }));
            }
        };
        self.load_ex(caller, &text)
    }

    /// Encode to a fresh string; `None` means the encode failed.
    pub fn dump(
        &self,
        caller: Ident,
        h: RawHandle,
        flags: DumpFlags,
    ) -> NativeResult<Option<String>> {
        let id = self.node(caller, h)?;
        Ok(codec::dump_to_string(&self.store, id, flags))
    }

    /// Encode into a caller-provided buffer. Returns the byte length on
    /// success and [`DUMP_FAILED`] when the encode fails or the buffer is
    /// too small; a failed call writes nothing.
    pub fn dump_into(
        &self,
        caller: Ident,
        h: RawHandle,
        flags: DumpFlags,
        buf: &mut [u8],
    ) -> NativeResult<i64> {
        let id = self.node(caller, h)?;
        match codec::dump_to_string(&self.store, id, flags) {
            Some(text) if text.len() <= buf.len() => {
                buf[..text.len()].copy_from_slice(text.as_bytes());
                Ok(text.len() as i64)
            }
            _ => Ok(DUMP_FAILED),
        }
    }

    /// Encode straight to a file; `false` covers both encode and write
    /// failures.
    pub fn dump_file(
        &self,
        caller: Ident,
        h: RawHandle,
        path: &Path,
        flags: DumpFlags,
    ) -> NativeResult<bool> {
        let id = self.node(caller, h)?;
        match codec::dump_to_string(&self.store, id, flags) {
            Some(text) => Ok(fs::write(path, text).is_ok()),
            None => Ok(false),
        }
    }
}
