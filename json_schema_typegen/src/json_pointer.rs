//! JSON Pointer (RFC 6901) handling for `$ref` fragments.
//!
//! Segments are `/`-separated, with `~` escaped as `~0` and `/` escaped as `~1`.

/// Appends a segment to a JSON Pointer path, applying RFC 6901 escaping.
pub fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    for c in segment.chars() {
        match c {
            '~' => path.push_str("~0"),
            '/' => path.push_str("~1"),
            other => path.push(other),
        }
    }
}

/// Returns a new JSON Pointer path by appending a segment to the given path.
#[must_use]
pub fn format(path: &str, segment: &str) -> String {
    let mut result: String = path.to_string();
    push_segment(&mut result, segment);
    result
}

/// Splits a pointer into unescaped segments. `""` and `"/"`-less input yield
/// no segments; a pointer must otherwise start with `/`.
#[must_use]
pub fn segments(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    let rest = pointer.strip_prefix('/')?;
    Some(
        rest.split('/')
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect(),
    )
}

/// Location of a definition, as written in a `$ref` fragment.
#[must_use]
pub fn definition(keyword: &str, name: &str) -> String {
    format(&format("", keyword), name)
}
