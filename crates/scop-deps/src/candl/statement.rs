use std::collections::BTreeMap;

use log::trace;

use super::scan::Cursor;
use crate::error::{DepsError, Result};

/// Marker line opening the statement block in Candl output.
pub const STATEMENT_INFO_HEADER: &str = "# Statement information";

/// Loop depth and enclosing iterators of one SCoP statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementInfo {
    /// Statement name, e.g. `S1`.
    pub name: String,
    /// Number of enclosing loops.
    pub depth: usize,
    /// Enclosing loop iterators, outermost first.
    pub iterators: Vec<String>,
}

impl StatementInfo {
    /// Parse a line of the form `S1 [depth=2, iterators="i,j"]`.
    ///
    /// Whitespace around the punctuation is optional and trailing text after
    /// the closing bracket is ignored. Returns `Ok(None)` when the line does
    /// not have this form.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Option<StatementInfo>> {
        let Some((name, depth, iterators)) = scan_statement(line) else {
            return Ok(None);
        };
        let depth = depth.parse::<usize>().map_err(|_| DepsError::InvalidNumber {
            line: line_no,
            text: depth.to_string(),
        })?;
        let iterators = if iterators.is_empty() {
            Vec::new()
        } else {
            iterators.split(',').map(|it| it.trim().to_string()).collect()
        };
        Ok(Some(StatementInfo {
            name: format!("S{}", name),
            depth,
            iterators,
        }))
    }
}

fn scan_statement(line: &str) -> Option<(&str, &str, &str)> {
    let mut c = Cursor::new(line);
    c.eat("S")?;
    let name = c.digits()?;
    c.skip_ws();
    c.eat("[")?;
    c.skip_ws();
    c.eat("depth")?;
    c.skip_ws();
    c.eat("=")?;
    c.skip_ws();
    let depth = c.digits()?;
    c.skip_ws();
    c.eat(",")?;
    c.skip_ws();
    c.eat("iterators")?;
    c.skip_ws();
    c.eat("=")?;
    c.skip_ws();
    c.eat("\"")?;
    let iterators = c.until('"')?;
    c.skip_ws();
    c.eat("]")?;
    Some((name, depth, iterators))
}

/// Depth and iterators of every statement listed in a Candl report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementTable {
    statements: BTreeMap<String, StatementInfo>,
}

impl StatementTable {
    /// Parse the statement block of a Candl report.
    ///
    /// Lines before [`STATEMENT_INFO_HEADER`] are ignored. The block ends at
    /// the first blank line or the next `#` line. Lines inside the block that
    /// are not statement descriptions are skipped. A statement listed twice
    /// keeps its last description.
    pub fn parse(text: &str) -> Result<StatementTable> {
        let mut table = StatementTable::default();
        let mut in_block = false;

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if !in_block {
                if line.starts_with(STATEMENT_INFO_HEADER) {
                    in_block = true;
                }
                continue;
            }
            if line.is_empty() || line.starts_with('#') {
                break;
            }
            match StatementInfo::parse_line(line, idx + 1)? {
                Some(info) => table.insert(info),
                None => trace!("skipping statement line {}: {:?}", idx + 1, line),
            }
        }

        Ok(table)
    }

    pub fn insert(&mut self, info: StatementInfo) {
        self.statements.insert(info.name.clone(), info);
    }

    pub fn get(&self, name: &str) -> Option<&StatementInfo> {
        self.statements.get(name)
    }

    /// Loop depth of `name`, if listed.
    pub fn depth(&self, name: &str) -> Option<usize> {
        self.get(name).map(|s| s.depth)
    }

    /// Iterators of `name`; empty if the statement is not listed.
    pub fn iterators(&self, name: &str) -> &[String] {
        self.get(name).map(|s| s.iterators.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Statements in name order.
    pub fn iter(&self) -> impl Iterator<Item = &StatementInfo> {
        self.statements.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let info = StatementInfo::parse_line("S2 [depth=3, iterators=\"i,j,k\"]", 1)
            .unwrap()
            .unwrap();
        assert_eq!(info.name, "S2");
        assert_eq!(info.depth, 3);
        assert_eq!(info.iterators, vec!["i", "j", "k"]);
    }

    #[test]
    fn test_parse_line_loose_whitespace() {
        let info = StatementInfo::parse_line("S7[ depth = 1 ,iterators = \" t , i \" ] extra", 1)
            .unwrap()
            .unwrap();
        assert_eq!(info.name, "S7");
        assert_eq!(info.depth, 1);
        assert_eq!(info.iterators, vec!["t", "i"]);
    }

    #[test]
    fn test_parse_line_empty_iterators() {
        let info = StatementInfo::parse_line("S1 [depth=0, iterators=\"\"]", 1)
            .unwrap()
            .unwrap();
        assert!(info.iterators.is_empty());
    }

    #[test]
    fn test_parse_line_not_a_statement() {
        assert!(StatementInfo::parse_line("S1 -> S2", 1).unwrap().is_none());
        assert!(StatementInfo::parse_line("T1 [depth=1, iterators=\"i\"]", 1)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_line_depth_overflow() {
        let err = StatementInfo::parse_line(
            "S1 [depth=99999999999999999999999, iterators=\"i\"]",
            4,
        )
        .unwrap_err();
        assert!(matches!(err, DepsError::InvalidNumber { line: 4, .. }));
    }

    #[test]
    fn test_table_block_bounds() {
        let text = "\
S9 [depth=9, iterators=\"z\"]
# Statement information
S1 [depth=2, iterators=\"i,j\"]
  not a statement
S2 [depth=3, iterators=\"i,j,k\"]

S3 [depth=1, iterators=\"i\"]
";
        let table = StatementTable::parse(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.depth("S1"), Some(2));
        assert_eq!(table.iterators("S2"), &["i", "j", "k"]);
        // Before the header and after the blank line.
        assert_eq!(table.depth("S9"), None);
        assert_eq!(table.depth("S3"), None);
        assert!(table.iterators("S3").is_empty());
    }

    #[test]
    fn test_table_stops_at_comment() {
        let text = "# Statement information\nS1 [depth=1, iterators=\"i\"]\n# end\nS2 [depth=1, iterators=\"i\"]\n";
        let table = StatementTable::parse(text).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_without_header_is_empty() {
        let table = StatementTable::parse("S1 [depth=1, iterators=\"i\"]\n").unwrap();
        assert!(table.is_empty());
    }
}
