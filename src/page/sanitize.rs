//! Text cleanup for captions, descriptions and shell arguments.

/// Glyph substituted for every character that is unsafe in a filename.
pub const PLACEHOLDER: char = '★';

/// Characters replaced by [`PLACEHOLDER`] in filename text.
const UNSAFE_FILENAME_CHARS: &[char] = &['<', '>', '|', '\\', ':', '(', ')', '&', ';', '#'];

/// ASCII punctuation left bare in a shell argument; all other ASCII punctuation is escaped.
const SHELL_INERT_CHARS: &[char] = &['_', '-', '.', '/', ',', '+', '@', '%', ':'];

/// Replace filename-unsafe characters with the placeholder glyph and trim.
///
/// Never fails and enforces no length limit.
pub fn sanitize_filename_text(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| {
            if UNSAFE_FILENAME_CHARS.contains(&c) {
                PLACEHOLDER
            } else {
                c
            }
        })
        .collect();

    replaced.trim().to_string()
}

/// Replace every line break (`\r\n`, `\n` or `\r`) with a single space.
pub fn collapse_to_one_line(input: &str) -> String {
    input.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Backslash-escape shell specials and whitespace so the result survives as one argument.
///
/// Quotes, `$`, `!`, `\`, `;`, every other ASCII punctuation mark that a POSIX shell
/// treats specially, and all whitespace are escaped. Letters, digits and non-ASCII
/// text pass through.
pub fn escape_for_shell_argument(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len() * 2);
    for c in input.chars() {
        let special = c.is_ascii_punctuation() && !SHELL_INERT_CHARS.contains(&c);
        if special || c.is_whitespace() {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
