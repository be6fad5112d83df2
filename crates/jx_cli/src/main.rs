use std::io::Write;
use std::path::Path;

use jx_bridge::{DumpFlags, Ident, JsonBridge, LoadOutcome};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const USAGE: &str = "Usage: jx <check|fmt> [--indent N] [--ascii] [--sort-keys] <file> [out]";

fn main() {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();
    let Some(cmd) = argv.first().cloned() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    argv.remove(0);
    let mut indent: u8 = 4;
    let mut ascii = false;
    let mut sort_keys = false;
    let mut positional: Vec<String> = Vec::new();

    let mut i = 0;
    while i < argv.len() {
        let a = &argv[i];
        if a == "--indent" {
            i += 1;
            let Some(n) = argv.get(i).and_then(|v| v.parse::<u8>().ok()) else {
                eprintln!("--indent needs a number");
                std::process::exit(2);
            };
            indent = n;
        } else if a == "--ascii" {
            ascii = true;
        } else if a == "--sort-keys" {
            sort_keys = true;
        } else {
            positional.push(a.clone());
        }
        i += 1;
    }

    let mut bridge = JsonBridge::new();
    let host = Ident::HOST;

    match cmd.as_str() {
        "check" => {
            if positional.len() != 1 {
                eprintln!("Missing <file>");
                std::process::exit(2);
            }
            match bridge.load_file_ex(host, Path::new(&positional[0])) {
                Ok(LoadOutcome::Loaded(handle)) => {
                    let _ = bridge.close(host, handle);
                }
                Ok(LoadOutcome::Invalid(failure)) => {
                    eprintln!("{}:{}: {}", failure.line, failure.column, failure.text);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            }
        }
        "fmt" => {
            if positional.is_empty() || positional.len() > 2 {
                eprintln!("Missing <file>");
                std::process::exit(2);
            }
            let handle = match bridge.load_file_ex(host, Path::new(&positional[0])) {
                Ok(LoadOutcome::Loaded(handle)) => handle,
                Ok(LoadOutcome::Invalid(failure)) => {
                    eprintln!("{}:{}: {}", failure.line, failure.column, failure.text);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };
            let flags = DumpFlags {
                indent,
                ensure_ascii: ascii,
                sort_keys,
                preserve_order: false,
            };
            let text = match bridge.dump(host, handle, flags) {
                Ok(Some(text)) => text,
                Ok(None) => {
                    eprintln!("encode failed");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };
            if let Some(out_path) = positional.get(1) {
                if let Err(e) = std::fs::write(out_path, text + "\n") {
                    eprintln!("unable to write {out_path}: {e}");
                    std::process::exit(2);
                }
            } else {
                let mut out = std::io::stdout().lock();
                if let Err(e) = writeln!(out, "{text}") {
                    if e.kind() == std::io::ErrorKind::BrokenPipe {
                        return;
                    }
                    eprintln!("stdout error: {e}");
                    std::process::exit(2);
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {cmd}");
            std::process::exit(2);
        }
    }
}
