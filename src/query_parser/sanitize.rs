//! Cleans up free-text user input before it's parsed as a dismax query

use regex::Regex;


lazy_static! {
    // "+ -foo" and "--foo" collapse into a single space
    static ref CONSECUTIVE_OPERATORS: Regex = Regex::new(r"\s+[+-](?:\s*[+-]+)+").unwrap();

    // Operators with nothing after them
    static ref DANGLING_OPERATORS: Regex = Regex::new(r"\s+[-+\s]+$").unwrap();
}


/// Removes every double quote if the quotes don't pair up
pub fn strip_unbalanced_quotes(text: &str) -> String {
    if text.matches('"').count() % 2 == 0 {
        text.to_owned()
    } else {
        text.replace('"', " ")
    }
}


/// Backslash-escapes query syntax characters, leaving `+`, `-` and `"` usable
pub fn partial_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\\' | '!' | '(' | ')' | ':' | '^' | '[' | ']' | '/' | '{' | '}' | '~' | '*' | '?' => {
                escaped.push('\\');
            }
            _ => {}
        }

        escaped.push(c);
    }

    escaped
}


/// Removes `+`/`-` operators that are doubled up or have nothing to apply to
pub fn strip_illegal_operators(text: &str) -> String {
    let text = CONSECUTIVE_OPERATORS.replace_all(text, " ");
    DANGLING_OPERATORS.replace_all(&text, "").into_owned()
}


/// Applies all the clean ups in the order the dismax parser expects
pub fn sanitize(text: &str) -> String {
    strip_illegal_operators(&partial_escape(&strip_unbalanced_quotes(text)))
}
