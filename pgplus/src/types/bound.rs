//! Range bound formatting.

/// Characters that force a bound to be quoted.
const SPECIAL: &[char] = &['(', ')', '[', ']', ',', '"', '\\'];

/// Format one side of a range.
///
/// Absent value is formatted as an empty string, which postgres read as
/// unbounded, while present value rendered as empty text is written as `""`.
/// Rendered text containing any of `()[],"\` is double quoted, with
/// every `\` and `"` escaped by a backslash.
///
/// ```
/// use pgplus::types::format_bound;
///
/// assert_eq!(format_bound(Some(&5), |e| e.to_string()), "5");
/// assert_eq!(format_bound(None::<&i32>, |e| e.to_string()), "");
/// assert_eq!(format_bound(Some(&"a,b"), |e| e.to_string()), "\"a,b\"");
/// ```
pub fn format_bound<T>(value: Option<&T>, render: impl FnOnce(&T) -> String) -> String {
    let mut buf = String::new();
    write_bound(&mut buf, value.map(render).as_deref());
    buf
}

/// Append already rendered bound to `buf`.
pub(crate) fn write_bound(buf: &mut String, rendered: Option<&str>) {
    let Some(text) = rendered else {
        return;
    };

    if !text.is_empty() && !text.contains(SPECIAL) {
        buf.push_str(text);
        return;
    }

    buf.reserve(text.len() + 2);
    buf.push('"');
    for ch in text.chars() {
        if matches!(ch, '\\' | '"') {
            buf.push('\\');
        }
        buf.push(ch);
    }
    buf.push('"');
}
