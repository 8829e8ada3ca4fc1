/// Shorten a string for a one-line diagnostic.
pub fn preview(s: &str) -> String {
    let s = s.replace('\n', "\\n");
    match s.char_indices().nth(80) {
        Some((i, _)) => format!("{}…", &s[..i]),
        None => s,
    }
}
