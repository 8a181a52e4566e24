use unicode_width::UnicodeWidthStr;

/// Column width used for scene cluster labels.
pub const LABEL_WRAP_WIDTH: usize = 40;

/// Re-flows `text` into lines of at most `width` columns, joined by `\n`.
///
/// Breaks only between words. Whitespace runs collapse to a single space, and a word wider than
/// `width` is kept whole on its own line.
pub fn wrap(text: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        if !line.is_empty() && line_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += word_width;
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.join("\n")
}
