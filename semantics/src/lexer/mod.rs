//! Token stream over an immutable source snapshot.
//!
//! This is not a full lexer for the source language; it covers the token
//! surface the completion engine reads: identifiers (including `@` escapes),
//! literals, punctuation (including `?.`), and trivia (comments,
//! preprocessor directive lines, newlines). Unrecognized characters become
//! [`TokenKind::Unknown`] so broken mid-edit code still tokenizes.

mod token;

pub use token::{Lit, LitKind, Span, Symbol, Token, TokenKind};

/// Lex the input into tokens, trivia included, ending with `Eof`.
pub fn lex(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut iter = input.char_indices().peekable();

    while let Some((start, ch)) = iter.next() {
        // Skip spaces/tabs but keep newlines as trivia tokens.
        if matches!(ch, ' ' | '\t' | '\r') {
            continue;
        }

        if ch == '\n' {
            tokens.push(token(TokenKind::Newline, start, start + 1));
            continue;
        }

        if ch == '#' && at_line_start(input, start) {
            let end = eat_line(&mut iter, start + 1);
            tokens.push(token(
                TokenKind::Directive(Symbol::new(&input[start..end])),
                start,
                end,
            ));
            continue;
        }

        if ch == '/' {
            match iter.peek() {
                Some(&(_, '/')) => {
                    iter.next();
                    let end = eat_line(&mut iter, start + 2);
                    tokens.push(token(
                        TokenKind::LineComment(Symbol::new(&input[start..end])),
                        start,
                        end,
                    ));
                    continue;
                }
                Some(&(_, '*')) => {
                    iter.next();
                    let end = eat_block_comment(&mut iter, input.len(), start + 2);
                    tokens.push(token(
                        TokenKind::BlockComment(Symbol::new(&input[start..end])),
                        start,
                        end,
                    ));
                    continue;
                }
                _ => {
                    tokens.push(token(TokenKind::Slash, start, start + 1));
                    continue;
                }
            }
        }

        if ch == '"' {
            let end = eat_string(&mut iter, input.len());
            tokens.push(token(
                TokenKind::Literal(Lit {
                    kind: LitKind::String,
                    symbol: Symbol::new(&input[start..end]),
                }),
                start,
                end,
            ));
            continue;
        }

        if ch == '\'' {
            let end = eat_char_literal(&mut iter, input.len());
            tokens.push(token(
                TokenKind::Literal(Lit {
                    kind: LitKind::Char,
                    symbol: Symbol::new(&input[start..end]),
                }),
                start,
                end,
            ));
            continue;
        }

        if ch.is_ascii_digit() {
            let end = eat_number(input, &mut iter, start + ch.len_utf8());
            tokens.push(token(
                TokenKind::Literal(Lit {
                    kind: LitKind::Number,
                    symbol: Symbol::new(&input[start..end]),
                }),
                start,
                end,
            ));
            continue;
        }

        if is_ident_start(ch) || (ch == '@' && matches!(iter.peek(), Some(&(_, c)) if is_ident_start(c)))
        {
            let mut end = start + ch.len_utf8();
            while let Some(&(i, c)) = iter.peek() {
                if !is_ident_continue(c) {
                    break;
                }
                iter.next();
                end = i + c.len_utf8();
            }
            tokens.push(token(
                TokenKind::Ident(Symbol::new(&input[start..end])),
                start,
                end,
            ));
            continue;
        }

        // Two-char operators first.
        let (kind, takes_second) = match (ch, iter.peek().map(|&(_, c)| c)) {
            ('?', Some('.')) => (TokenKind::QuestionDot, true),
            ('=', Some('=')) => (TokenKind::EqEq, true),
            ('=', Some('>')) => (TokenKind::Arrow, true),
            ('!', Some('=')) => (TokenKind::Ne, true),
            ('?', _) => (TokenKind::Question, false),
            ('.', _) => (TokenKind::Dot, false),
            (',', _) => (TokenKind::Comma, false),
            (';', _) => (TokenKind::Semi, false),
            (':', _) => (TokenKind::Colon, false),
            ('(', _) => (TokenKind::OpenParen, false),
            (')', _) => (TokenKind::CloseParen, false),
            ('{', _) => (TokenKind::OpenBrace, false),
            ('}', _) => (TokenKind::CloseBrace, false),
            ('[', _) => (TokenKind::OpenBracket, false),
            (']', _) => (TokenKind::CloseBracket, false),
            ('<', _) => (TokenKind::Lt, false),
            ('>', _) => (TokenKind::Gt, false),
            ('=', _) => (TokenKind::Eq, false),
            ('!', _) => (TokenKind::Bang, false),
            ('+', _) => (TokenKind::Plus, false),
            ('-', _) => (TokenKind::Minus, false),
            ('*', _) => (TokenKind::Star, false),
            ('%', _) => (TokenKind::Percent, false),
            ('&', _) => (TokenKind::Amp, false),
            ('|', _) => (TokenKind::Pipe, false),
            _ => (TokenKind::Unknown(ch), false),
        };
        let len = if takes_second {
            iter.next();
            2
        } else {
            ch.len_utf8()
        };
        tokens.push(token(kind, start, start + len));
    }

    tokens.push(token(TokenKind::Eof, input.len(), input.len()));
    tokens
}

fn token(kind: TokenKind, start: usize, end: usize) -> Token {
    Token {
        kind,
        span: Span {
            start: start as u32,
            end: end as u32,
        },
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}

/// True when only spaces/tabs precede `offset` on its line.
fn at_line_start(input: &str, offset: usize) -> bool {
    input[..offset]
        .chars()
        .rev()
        .take_while(|&c| c != '\n')
        .all(|c| matches!(c, ' ' | '\t' | '\r'))
}

fn eat_line(
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    fallback_end: usize,
) -> usize {
    let mut end = fallback_end;
    while let Some(&(i, c)) = iter.peek() {
        if c == '\n' {
            break;
        }
        iter.next();
        end = i + c.len_utf8();
    }
    end
}

fn eat_block_comment(
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    input_len: usize,
    fallback_end: usize,
) -> usize {
    let mut end = fallback_end;
    let mut prev_star = false;
    for (i, c) in iter.by_ref() {
        end = i + c.len_utf8();
        if prev_star && c == '/' {
            return end;
        }
        prev_star = c == '*';
    }
    // Unterminated comment runs to end of input.
    end.max(fallback_end).min(input_len)
}

fn eat_string(
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    input_len: usize,
) -> usize {
    let mut end = input_len;
    let mut escaped = false;
    for (i, c) in iter.by_ref() {
        if c == '\n' {
            // Unterminated string stops at the line break.
            return i;
        }
        if !escaped && c == '"' {
            return i + 1;
        }
        escaped = !escaped && c == '\\';
        end = i + c.len_utf8();
    }
    end
}

fn eat_char_literal(
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    input_len: usize,
) -> usize {
    let mut end = input_len;
    let mut escaped = false;
    for (i, c) in iter.by_ref() {
        if c == '\n' {
            return i;
        }
        if !escaped && c == '\'' {
            return i + 1;
        }
        escaped = !escaped && c == '\\';
        end = i + c.len_utf8();
    }
    end
}

fn eat_number(
    input: &str,
    iter: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    fallback_end: usize,
) -> usize {
    let mut end = fallback_end;
    while let Some(&(i, c)) = iter.peek() {
        if c.is_ascii_digit() || c == '_' {
            iter.next();
            end = i + c.len_utf8();
            continue;
        }
        // A dot continues the number only when a digit follows (`1.5`); a
        // trailing `1.` stays a number token plus a dot token.
        if c == '.' {
            let digit_follows = input[i + 1..].chars().next().is_some_and(|d| d.is_ascii_digit());
            if digit_follows {
                iter.next();
                end = i + 1;
                continue;
            }
            break;
        }
        // Type suffixes (`1f`, `10UL`, `2.5m`).
        if matches!(c, 'f' | 'F' | 'd' | 'D' | 'm' | 'M' | 'u' | 'U' | 'l' | 'L') {
            iter.next();
            end = i + c.len_utf8();
            continue;
        }
        break;
    }
    end
}
