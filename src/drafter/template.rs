//! `$PLACEHOLDER` substitution.
//!
//! A placeholder is `$` followed by an uppercase letter and then any run of
//! uppercase letters, digits and underscores. Known names are replaced once;
//! unknown ones are left as written.

/// Renders `template`, substituting each `(name, value)` pair.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = placeholder_len(after);

        if name_len == 0 {
            out.push('$');
            rest = after;
            continue;
        }

        let name = &after[..name_len];
        match vars.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }

    out.push_str(rest);
    out
}

/// Byte length of the placeholder name at the start of `s`, 0 if none.
fn placeholder_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    if !bytes.first().is_some_and(u8::is_ascii_uppercase) {
        return 0;
    }
    bytes
        .iter()
        .take_while(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || **b == b'_')
        .count()
}
