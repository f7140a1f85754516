/// Words of plot shown before "..." when a long text is collapsed
pub const COLLAPSED_WORDS: usize = 10;

/// First `max_words` words of `text` followed by "...", or `text` unchanged if it is short enough
pub fn collapse_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    format!("{}...", words[..max_words].join(" "))
}
