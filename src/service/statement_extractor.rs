//! Naive statement splitting.
//!
//! The split is purely lexical: a `;` inside a string literal, quoted identifier or
//! dollar-quoted body still ends the statement. Only whole lines starting with `--`
//! are treated as comments.

pub const STATEMENT_DELIMITER: char = ';';
pub const COMMENT_MARKER: &str = "--";

/// Split `sql` into trimmed, non-empty statements with comment lines removed.
pub fn extract_statements(sql: &str) -> Vec<String> {
    sql.split(STATEMENT_DELIMITER)
        .filter_map(clean_piece)
        .collect()
}

fn clean_piece(piece: &str) -> Option<String> {
    let kept: Vec<&str> = piece
        .lines()
        .filter(|line| !is_comment_line(line))
        .collect();
    let statement = kept.join("\n");
    let statement = statement.trim();
    (!statement.is_empty()).then(|| statement.to_string())
}

fn is_comment_line(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_script(statements: &[String]) -> String {
        statements
            .iter()
            .map(|s| format!("{s}{STATEMENT_DELIMITER}\n"))
            .collect()
    }

    #[test]
    fn trailing_comment_does_not_swallow_next_statement() {
        assert_eq!(
            extract_statements("SELECT 1; -- comment\nSELECT 2;"),
            vec!["SELECT 1", "SELECT 2"]
        );
    }

    #[test]
    fn trims_and_drops_empty_pieces() {
        let sql = "  CREATE TABLE a (id int) ;\n\n ; ;\nDROP TABLE b;   ";
        assert_eq!(
            extract_statements(sql),
            vec!["CREATE TABLE a (id int)", "DROP TABLE b"]
        );
    }

    #[test]
    fn comment_only_pieces_are_dropped() {
        let sql = "-- header\n-- more header;\n  -- indented;\nSELECT 1;";
        assert_eq!(extract_statements(sql), vec!["SELECT 1"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(extract_statements("").is_empty());
        assert!(extract_statements("  \n\t ").is_empty());
        assert!(extract_statements(";;;").is_empty());
    }

    #[test]
    fn multiline_statement_keeps_inner_lines() {
        let sql = "ALTER TABLE user_profiles\n  -- add column\n  ADD COLUMN bio text;";
        assert_eq!(
            extract_statements(sql),
            vec!["ALTER TABLE user_profiles\n  ADD COLUMN bio text"]
        );
    }

    #[test]
    fn inline_dashes_are_not_comments() {
        let sql = "SELECT 5 - -1; SELECT 'a' -- trailing\n;";
        assert_eq!(
            extract_statements(sql),
            vec!["SELECT 5 - -1", "SELECT 'a' -- trailing"]
        );
    }

    #[test]
    fn quoted_semicolons_are_split() {
        let sql = "INSERT INTO t VALUES ('a;b');";
        assert_eq!(
            extract_statements(sql),
            vec!["INSERT INTO t VALUES ('a", "b')"]
        );
    }

    #[test]
    fn rendered_script_extracts_to_the_same_statements() {
        let sql = "-- fixes\nCREATE INDEX i ON t(c);\n\nGRANT SELECT ON t TO anon;\n";
        let statements = extract_statements(sql);
        let script = render_script(&statements);
        assert_eq!(
            script,
            "CREATE INDEX i ON t(c);\nGRANT SELECT ON t TO anon;\n"
        );
        assert_eq!(extract_statements(&script), statements);
    }
}
