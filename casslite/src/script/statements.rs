//! CQL statement splitting.

/// Split script text into individual statements.
///
/// A `;` outside quotes and comments terminates a statement. `--` and `//`
/// line comments and `/* */` block comments are dropped; quoted text,
/// including doubled `''` escapes, passes through untouched. A trailing
/// statement without a terminator is kept. Beyond that the content is opaque.
pub fn split_statements(script: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut chars = script.chars().peekable();
    let mut in_single = false;
    let mut in_double = false;

    while let Some(c) = chars.next() {
        if in_single {
            current.push(c);
            if c == '\'' {
                in_single = false;
            }
            continue;
        }
        if in_double {
            current.push(c);
            if c == '"' {
                in_double = false;
            }
            continue;
        }
        match c {
            '\'' => {
                in_single = true;
                current.push(c);
            }
            '"' => {
                in_double = true;
                current.push(c);
            }
            '-' if chars.peek() == Some(&'-') => skip_line(&mut chars),
            '/' if chars.peek() == Some(&'/') => skip_line(&mut chars),
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_block(&mut chars);
                current.push(' ');
            }
            ';' => flush(&mut statements, &mut current),
            _ => current.push(c),
        }
    }
    flush(&mut statements, &mut current);
    statements
}

fn skip_line(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(&c) = chars.peek() {
        if c == '\n' {
            break;
        }
        chars.next();
    }
}

fn skip_block(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'/') {
            chars.next();
            break;
        }
    }
}

fn flush(statements: &mut Vec<String>, current: &mut String) {
    let statement = current.trim();
    if !statement.is_empty() {
        statements.push(statement.to_string());
    }
    current.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_semicolons() {
        let statements = split_statements("CREATE ROLE admin;\nCREATE KEYSPACE test;\n");
        assert_eq!(statements, vec!["CREATE ROLE admin", "CREATE KEYSPACE test"]);
    }

    #[test]
    fn keeps_trailing_statement_without_terminator() {
        let statements = split_statements("USE test;\nSELECT * FROM roles");
        assert_eq!(statements, vec!["USE test", "SELECT * FROM roles"]);
    }

    #[test]
    fn semicolons_inside_quotes_do_not_split() {
        let statements = split_statements("INSERT INTO t (v) VALUES ('a;b');");
        assert_eq!(statements, vec!["INSERT INTO t (v) VALUES ('a;b')"]);

        let statements = split_statements("SELECT \"weird;name\" FROM t;");
        assert_eq!(statements, vec!["SELECT \"weird;name\" FROM t"]);
    }

    #[test]
    fn doubled_single_quote_escape_passes_through() {
        let statements = split_statements("INSERT INTO t (v) VALUES ('it''s;fine');");
        assert_eq!(statements, vec!["INSERT INTO t (v) VALUES ('it''s;fine')"]);
    }

    #[test]
    fn line_comments_are_dropped() {
        let statements = split_statements("-- header\nUSE test; // tail\nSELECT 1;");
        assert_eq!(statements, vec!["USE test", "SELECT 1"]);
    }

    #[test]
    fn block_comments_are_replaced_by_a_space() {
        let statements = split_statements("CREATE/* keyspace */KEYSPACE test;");
        assert_eq!(statements, vec!["CREATE KEYSPACE test"]);
    }

    #[test]
    fn comment_markers_inside_quotes_are_literal() {
        let statements = split_statements("INSERT INTO t (v) VALUES ('-- not a comment');");
        assert_eq!(statements, vec!["INSERT INTO t (v) VALUES ('-- not a comment')"]);
    }

    #[test]
    fn blank_statements_are_skipped() {
        let statements = split_statements(";;  ;\nUSE test;");
        assert_eq!(statements, vec!["USE test"]);
    }
}
