//! Line tokenization for the REPL

use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split a line into words the way a POSIX shell would.
///
/// Whitespace separates words except inside single or double quotes.
/// Backslash escapes the next character outside quotes, and `"` or `\`
/// inside double quotes. Adjacent quoted and unquoted text joins into one
/// word, and `""` yields an empty word.
pub fn split_command_line(line: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Quote::None, c) if c.is_whitespace() => {
                if in_word {
                    out.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (Quote::None, '\'') => {
                quote = Quote::Single;
                in_word = true;
            }
            (Quote::None, '"') => {
                quote = Quote::Double;
                in_word = true;
            }
            (Quote::None, '\\') => {
                let next = chars
                    .next()
                    .ok_or_else(|| Error::ParseError("No escaped character".into()))?;
                current.push(next);
                in_word = true;
            }
            (Quote::Single, '\'') | (Quote::Double, '"') => quote = Quote::None,
            (Quote::Double, '\\') => match chars.next() {
                Some(next @ ('"' | '\\')) => current.push(next),
                Some(next) => {
                    current.push('\\');
                    current.push(next);
                }
                None => return Err(Error::ParseError("No closing quotation".into())),
            },
            (_, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote != Quote::None {
        return Err(Error::ParseError("No closing quotation".into()));
    }
    if in_word {
        out.push(current);
    }

    Ok(out)
}

/// Split a line into a lowercased command name and its arguments.
///
/// Blank input yields an empty name and no arguments.
pub fn parse_input(line: &str) -> Result<(String, Vec<String>)> {
    let mut parts = split_command_line(line)?.into_iter();
    match parts.next() {
        Some(name) => Ok((name.to_lowercase(), parts.collect())),
        None => Ok((String::new(), Vec::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        split_command_line(line).unwrap()
    }

    #[test]
    fn test_parse_input() {
        let (cmd, args) = parse_input("add 2 3").unwrap();
        assert_eq!(cmd, "add");
        assert_eq!(args, vec!["2", "3"]);

        let (cmd, args) = parse_input("").unwrap();
        assert_eq!(cmd, "");
        assert!(args.is_empty());

        let (cmd, args) = parse_input(r#"add "1.5" "2.5""#).unwrap();
        assert_eq!(cmd, "add");
        assert_eq!(args, vec!["1.5", "2.5"]);

        let (cmd, args) = parse_input(r#"DIVIDE 10 "2.5""#).unwrap();
        assert_eq!(cmd, "divide");
        assert_eq!(args, vec!["10", "2.5"]);
    }

    #[test]
    fn test_whitespace_handling() {
        assert_eq!(words("  add\t1   2  "), vec!["add", "1", "2"]);
        assert!(words("   ").is_empty());
    }

    #[test]
    fn test_quotes_keep_spaces() {
        assert_eq!(words(r#"echo "a b" 'c d'"#), vec!["echo", "a b", "c d"]);
        assert_eq!(words(r#"say ab"c d"e"#), vec!["say", "abc de"]);
        assert_eq!(words(r#"x "" ''"#), vec!["x", "", ""]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(words(r"a\ b c"), vec!["a b", "c"]);
        assert_eq!(words(r#""say \"hi\"""#), vec![r#"say "hi""#]);
        assert_eq!(words(r#""a\nb""#), vec![r"a\nb"]);
        assert_eq!(words(r"'a\b'"), vec![r"a\b"]);
    }

    #[test]
    fn test_unbalanced_input() {
        let err = split_command_line(r#"add "1 2"#).unwrap_err();
        assert_eq!(err.to_string(), "No closing quotation");
        assert!(err.is_user_error());

        assert!(split_command_line("add 'oops").is_err());
        assert!(split_command_line("add \\").is_err());
    }
}
