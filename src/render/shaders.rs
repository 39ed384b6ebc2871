// src/render/shaders.rs
//
// Kernel source loading. WGSL has no native include mechanism in wgpu, so
// kernel files are expanded textually before compilation:
//
//   #include "relative/path"   -- spliced in place, resolved against the root
//   #pragma kernel NAME        -- optional; names the dispatch entry point
//
// Includes are expanded first match to last in a linear scan, recursively.
// A file currently being expanded may not be included again (cycle check).

use std::path::{Path, PathBuf};

use crate::config;
use crate::error::{RenderError, RenderResult};

const INCLUDE_DIRECTIVE: &str = "#include \"";
const KERNEL_PRAGMA: &str = "#pragma kernel ";

/// Fully expanded kernel source plus its dispatch entry symbol.
pub struct ShaderSource {
    pub source: String,
    pub entry: String,
}

/// Load and expand the kernel at `path` (relative to `root`).
pub fn preprocess(root: &Path, path: &str) -> RenderResult<ShaderSource> {
    let mut stack = Vec::new();
    let expanded = expand(root, path, &mut stack)?;
    let (source, entry) = extract_entry(expanded);

    Ok(ShaderSource {
        source,
        entry: entry.unwrap_or_else(|| config::DEFAULT_KERNEL_ENTRY.to_owned()),
    })
}

fn expand(root: &Path, path: &str, stack: &mut Vec<PathBuf>) -> RenderResult<String> {
    let full = root.join(path);
    if stack.contains(&full) {
        return Err(RenderError::CyclicInclude { path: full });
    }

    let text = std::fs::read_to_string(&full).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RenderError::SourceNotFound { path: full.clone() }
        } else {
            RenderError::Io(e)
        }
    })?;

    stack.push(full);

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();

    while let Some(pos) = rest.find(INCLUDE_DIRECTIVE) {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + INCLUDE_DIRECTIVE.len()..];

        // The closing quote must sit on the same line; otherwise the text is
        // not a directive and passes through untouched.
        let line_end = after.find('\n').unwrap_or(after.len());
        match after[..line_end].find('"') {
            Some(end) => {
                out.push_str(&expand(root, &after[..end], stack)?);
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(INCLUDE_DIRECTIVE);
                rest = after;
            }
        }
    }
    out.push_str(rest);

    stack.pop();
    Ok(out)
}

/// Capture the first `#pragma kernel NAME` and strip the directive.
fn extract_entry(source: String) -> (String, Option<String>) {
    let Some(pos) = source.find(KERNEL_PRAGMA) else {
        return (source, None);
    };

    let after = &source[pos + KERNEL_PRAGMA.len()..];
    let name_len = after
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(after.len());

    if name_len == 0 {
        return (source, None);
    }

    let name = after[..name_len].to_owned();
    let mut stripped = String::with_capacity(source.len());
    stripped.push_str(&source[..pos]);
    stripped.push_str(&after[name_len..]);

    (stripped, Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, text: &str) {
        if let Some(parent) = dir.join(name).parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(dir.join(name), text).unwrap();
    }

    #[test]
    fn include_is_spliced_in_place() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "top\n#include \"b.wgsl\"\nbottom\n");
        write(dir.path(), "b.wgsl", "X");

        let out = preprocess(dir.path(), "a.wgsl").unwrap();
        assert_eq!(out.source, "top\nX\nbottom\n");
        assert!(!out.source.contains("#include"));
    }

    #[test]
    fn includes_expand_recursively() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "#include \"sub/b.wgsl\"");
        write(dir.path(), "sub/b.wgsl", "#include \"c.wgsl\" tail");
        write(dir.path(), "c.wgsl", "leaf");

        let out = preprocess(dir.path(), "a.wgsl").unwrap();
        assert_eq!(out.source, "leaf tail");
    }

    #[test]
    fn pragma_names_the_entry_and_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "k.wgsl", "// header\n#pragma kernel Foo\nfn f() {}\n");

        let out = preprocess(dir.path(), "k.wgsl").unwrap();
        assert_eq!(out.entry, "Foo");
        assert!(!out.source.contains("#pragma"));
        assert!(out.source.contains("fn f() {}"));
    }

    #[test]
    fn missing_pragma_falls_back_to_default_entry() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "k.wgsl", "fn f() {}\n");

        let out = preprocess(dir.path(), "k.wgsl").unwrap();
        assert_eq!(out.entry, config::DEFAULT_KERNEL_ENTRY);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        match preprocess(dir.path(), "nope.wgsl") {
            Err(RenderError::SourceNotFound { path }) => {
                assert!(path.ends_with("nope.wgsl"));
            }
            other => panic!("expected SourceNotFound, got {:?}", other.map(|s| s.source)),
        }
    }

    #[test]
    fn missing_include_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "#include \"gone.wgsl\"");

        assert!(matches!(
            preprocess(dir.path(), "a.wgsl"),
            Err(RenderError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn cyclic_includes_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "#include \"b.wgsl\"");
        write(dir.path(), "b.wgsl", "#include \"a.wgsl\"");

        assert!(matches!(
            preprocess(dir.path(), "a.wgsl"),
            Err(RenderError::CyclicInclude { .. })
        ));
    }

    #[test]
    fn diamond_includes_are_not_a_cycle() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "#include \"b.wgsl\"#include \"c.wgsl\"");
        write(dir.path(), "b.wgsl", "#include \"d.wgsl\"");
        write(dir.path(), "c.wgsl", "#include \"d.wgsl\"");
        write(dir.path(), "d.wgsl", "D");

        let out = preprocess(dir.path(), "a.wgsl").unwrap();
        assert_eq!(out.source, "DD");
    }

    #[test]
    fn repository_kernels_expand_cleanly() {
        let root = Path::new(config::SHADER_ROOT);

        let trace = preprocess(root, "trace.wgsl").unwrap();
        assert_eq!(trace.entry, "trace_main");
        assert!(trace.source.contains("fn trace_main"));
        assert!(!trace.source.contains("#include"));
        assert!(!trace.source.contains("#pragma"));

        let accumulate = preprocess(root, "accumulate.wgsl").unwrap();
        assert_eq!(accumulate.entry, "accumulate_main");

        let blit = preprocess(root, "blit.wgsl").unwrap();
        assert_eq!(blit.entry, config::DEFAULT_KERNEL_ENTRY);
    }

    #[test]
    fn unterminated_include_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.wgsl", "#include \"broken\nrest");

        let out = preprocess(dir.path(), "a.wgsl").unwrap();
        assert_eq!(out.source, "#include \"broken\nrest");
    }
}
