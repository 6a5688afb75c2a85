//! Capture variable name adaptation
//!
//! Policy variables may contain `_` and `-`; regex group names may not.
//! Names are camel-cased at every separator and the separators dropped:
//! `host_name` becomes `hostName`, `host_name-too` becomes `hostNameToo`.

/// Check whether a name is already a usable group name
///
/// Matches `^[A-Za-z][A-Za-z0-9]+$`.
pub fn is_regex_group_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    let rest = chars.as_str();
    !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Convert a policy variable name into a regex capture group name
pub fn adapt_var_name(name: &str) -> String {
    if is_regex_group_name(name) {
        return name.to_string();
    }

    let mut adapted = String::with_capacity(name.len());
    let mut prev: Option<char> = None;
    for c in name.chars() {
        let after_separator = prev.is_some_and(|p| !p.is_ascii_alphanumeric());
        if c.is_ascii_alphanumeric() {
            if after_separator && c.is_ascii_lowercase() {
                adapted.push(c.to_ascii_uppercase());
            } else {
                adapted.push(c);
            }
        }
        prev = Some(c);
    }
    adapted
}
