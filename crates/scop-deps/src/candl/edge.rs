use super::scan::Cursor;

/// One dependence reported by Candl between two array references.
///
/// Candl prints these as, e.g.,
/// `S1 -> S2 [label=" RAW depth 1, ref 0->1 var C->C"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    /// Source statement, e.g. `S1`.
    pub source: String,
    /// Target statement.
    pub target: String,
    /// Reference index within the source statement, as printed.
    pub source_ref: String,
    /// Reference index within the target statement, as printed.
    pub target_ref: String,
    /// Array variable the dependence is carried on.
    pub variable: String,
}

impl Edge {
    /// Find the first dependence description anywhere in `line`.
    ///
    /// The line must contain `S<n> -> S<m>`, followed somewhere later by
    /// `ref <a>-><b>`, followed somewhere later by `var <x>-><y>`. The earliest
    /// statement arrow that can be completed wins; for it, the earliest
    /// completing `ref` and then `var` are used.
    pub fn find(line: &str) -> Option<Edge> {
        line.match_indices('S')
            .find_map(|(start, _)| Self::match_at(&line[start..]))
    }

    fn match_at(s: &str) -> Option<Edge> {
        let mut c = Cursor::new(s);
        c.eat("S")?;
        let source = c.digits()?;
        c.skip_ws();
        c.eat("->")?;
        c.skip_ws();
        c.eat("S")?;
        let target = c.digits()?;
        let rest = c.rest();

        rest.match_indices("ref").find_map(|(ref_at, _)| {
            let mut c = Cursor::new(&rest[ref_at + "ref".len()..]);
            c.skip_ws();
            let source_ref = c.digits()?;
            c.eat("->")?;
            let target_ref = c.digits()?;
            let variable = find_variable(c.rest())?;
            Some(Edge {
                source: format!("S{}", source),
                target: format!("S{}", target),
                source_ref: source_ref.to_string(),
                target_ref: target_ref.to_string(),
                variable: variable.to_string(),
            })
        })
    }

    /// Graph node id of the source reference: `<stmt>_r<ref>_<var>`.
    pub fn source_node(&self) -> String {
        format!("{}_r{}_{}", self.source, self.source_ref, self.variable)
    }

    /// Graph node id of the target reference.
    pub fn target_node(&self) -> String {
        format!("{}_r{}_{}", self.target, self.target_ref, self.variable)
    }
}

fn find_variable(s: &str) -> Option<&str> {
    s.match_indices("var").find_map(|(var_at, _)| {
        let mut c = Cursor::new(&s[var_at + "var".len()..]);
        c.skip_ws();
        let variable = c.word()?;
        c.eat("->")?;
        c.word()?;
        Some(variable)
    })
}
