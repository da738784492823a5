/// Splits one script line into argument tokens.
///
/// Tokens are separated by blanks. A double quote groups blanks into a
/// single token and is itself dropped. A `#` at the start of a token
/// comments out the rest of the line.
pub fn lex(s: &str) -> Vec<String> {
    ShellLexer {
        chars: s.chars().peekable(),
    }
    .collect()
}

fn is_shell_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_shell_whitespace(*pk) {
                break;
            }
            self.chars().next();
        }
    }

    fn word(&mut self) -> String {
        let mut s = String::new();
        let mut quoted = false;
        while let Some(pk) = self.chars().peek() {
            if !quoted && is_shell_whitespace(*pk) {
                break;
            }
            match self.chars().next() {
                Some('"') => quoted = !quoted,
                Some(ch) => s.push(ch),
                None => break,
            }
        }
        s
    }
}

struct ShellLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for ShellLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for ShellLexer<'a> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        self.whitespace();
        match self.chars.peek()? {
            '#' => {
                self.chars.by_ref().for_each(drop);
                None
            }
            _ => Some(self.word()),
        }
    }
}
