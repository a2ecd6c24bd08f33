//! Quoting of plain scalars that YAML 1.1 readers would retype.
//!
//! `serde_yaml` quotes strings by the YAML 1.2 core schema only, so a value
//! such as `on`, `yes`, `n` or `1_000` is written as a plain scalar. Readers
//! that still resolve YAML 1.1 (the Kubernetes apimachinery stack among them)
//! load those as booleans or numbers. This pass runs over the emitter's output
//! and single-quotes such scalars. It relies on two properties of that output:
//! lines are never folded, and strings with line breaks are literal blocks.

/// Single-quote every plain key or value in `doc` that is a string under
/// YAML 1.2 but would resolve to a bool, number or timestamp under YAML 1.1.
pub(crate) fn quote_yaml11_ambiguous(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    // Indent of the line that opened the literal block we are inside.
    let mut block_indent: Option<usize> = None;

    for line in doc.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let ending = &line[body.len()..];
        let indent = body.len() - body.trim_start_matches(' ').len();

        if let Some(open) = block_indent {
            if body.trim().is_empty() || indent > open {
                out.push_str(line);
                continue;
            }
            block_indent = None;
        }

        let (rewritten, opens_block) = rewrite_line(body, indent);
        if opens_block {
            block_indent = Some(indent);
        }
        out.push_str(&rewritten);
        out.push_str(ending);
    }
    out
}

fn rewrite_line(body: &str, indent: usize) -> (String, bool) {
    let mut prefix_len = indent;
    let mut in_sequence = false;
    while body[prefix_len..].starts_with("- ") {
        prefix_len += 2;
        in_sequence = true;
    }
    let (prefix, rest) = body.split_at(prefix_len);

    match split_key(rest) {
        Some((key, value)) => {
            let key = quote_if_ambiguous(key);
            if value.is_empty() {
                (format!("{prefix}{key}:"), false)
            } else {
                let opens_block = is_block_header(value);
                let value = if opens_block {
                    value.to_owned()
                } else {
                    quote_if_ambiguous(value)
                };
                (format!("{prefix}{key}: {value}"), opens_block)
            }
        }
        None if in_sequence => {
            if is_block_header(rest) {
                (body.to_owned(), true)
            } else {
                (format!("{prefix}{}", quote_if_ambiguous(rest)), false)
            }
        }
        None => (body.to_owned(), is_block_header(rest)),
    }
}

/// Split `key: value` (or `key:`) into its parts. Quoted keys are kept
/// verbatim including their quotes.
fn split_key(rest: &str) -> Option<(&str, &str)> {
    let key_end = match rest.as_bytes().first()? {
        b'\'' => closing_single_quote(rest)? + 1,
        b'"' => closing_double_quote(rest)? + 1,
        b'?' if rest == "?" || rest.starts_with("? ") => return None,
        _ => rest
            .find(": ")
            .or_else(|| rest.strip_suffix(':').map(str::len))?,
    };
    let (key, after) = rest.split_at(key_end);
    if after == ":" {
        return Some((key, ""));
    }
    after.strip_prefix(": ").map(|value| (key, value))
}

fn closing_single_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

fn closing_double_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn is_block_header(token: &str) -> bool {
    let mut chars = token.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c.is_ascii_digit() || c == '+' || c == '-')
}

fn quote_if_ambiguous(token: &str) -> String {
    if is_ambiguous(token) {
        format!("'{}'", token.replace('\'', "''"))
    } else {
        token.to_owned()
    }
}

fn is_ambiguous(token: &str) -> bool {
    resolves_differently_in_yaml11(token)
        && matches!(
            serde_yaml::from_str::<serde_yaml::Value>(token),
            Ok(serde_yaml::Value::String(_))
        )
}

fn resolves_differently_in_yaml11(token: &str) -> bool {
    if matches!(
        token,
        "y" | "Y"
            | "yes"
            | "Yes"
            | "YES"
            | "n"
            | "N"
            | "no"
            | "No"
            | "NO"
            | "on"
            | "On"
            | "ON"
            | "off"
            | "Off"
            | "OFF"
            | "true"
            | "True"
            | "TRUE"
            | "false"
            | "False"
            | "FALSE"
    ) {
        return true;
    }
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    // Ints with `_` separators, sexagesimal numbers, dates and other
    // numeric-looking forms the 1.1 resolvers accept.
    unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.')
        && unsigned
            .chars()
            .all(|c| c.is_ascii_hexdigit() || matches!(c, '_' | '.' | ':' | 'x' | 'o' | '+' | '-'))
}
