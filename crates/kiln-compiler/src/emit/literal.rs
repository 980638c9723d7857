//! JavaScript literal text.

use kiln_core::Literal;

/// Double-quoted JavaScript string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' | '\u{2029}' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

fn negative_wrapped(text: String) -> String {
    if text.starts_with('-') {
        format!("({text})")
    } else {
        text
    }
}

fn floating(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        negative_wrapped(if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string())
    } else {
        negative_wrapped(format!("{v:?}"))
    }
}

/// Constant text for a literal.
///
/// Strings render inline here; method bodies and field defaults route them
/// through the string pool instead.
pub fn constant(lit: &Literal) -> String {
    match lit {
        Literal::Null => "null".to_string(),
        Literal::Bool(v) => v.to_string(),
        Literal::Int(v) => negative_wrapped(v.to_string()),
        Literal::Long(v) => {
            let high = (*v >> 32) as i32;
            let low = *v as i32;
            format!("N.lnew({high}, {low})")
        }
        Literal::Float(v) => floating(f64::from(*v)),
        Literal::Double(v) => floating(*v),
        Literal::Char(v) => v.to_string(),
        Literal::String(s) => quote(s),
    }
}
