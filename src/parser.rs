//! Edge-list line format: `id;in1,in2,...;out1,out2,...`.

use crate::error::{Error, Result};

/// One parsed input line: a node and its declared neighbours in both directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<'a> {
    pub id: &'a str,
    pub incoming: Vec<&'a str>,
    pub outgoing: Vec<&'a str>,
}

impl<'a> Record<'a> {
    /// Directed edges implied by this record, incoming first.
    pub fn edges(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        let id = self.id;
        self.incoming
            .iter()
            .map(move |&from| (from, id))
            .chain(self.outgoing.iter().map(move |&to| (id, to)))
    }
}

/// Parses a single line. `line_no` is 1-based and only used for error reporting.
///
/// Fields past the third are ignored.
pub fn parse_line(line: &str, line_no: usize) -> Result<Record<'_>> {
    let trimmed = line.trim();
    let mut fields = trimmed.split(';');

    match (fields.next(), fields.next(), fields.next()) {
        (Some(id), Some(incoming), Some(outgoing)) => Ok(Record {
            id,
            incoming: neighbours(incoming),
            outgoing: neighbours(outgoing),
        }),
        _ => Err(Error::Format {
            line: line_no,
            content: trimmed.to_string(),
            fields: trimmed.split(';').count(),
        }),
    }
}

// An empty field means no neighbours, not a single node named "".
fn neighbours(field: &str) -> Vec<&str> {
    if field.is_empty() {
        return Vec::new();
    }
    field.split(',').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fields_yield_no_neighbours() {
        let record = parse_line("A;;", 1).unwrap();
        assert_eq!(record.id, "A");
        assert!(record.incoming.is_empty());
        assert!(record.outgoing.is_empty());
        assert_eq!(record.edges().count(), 0);
    }

    #[test]
    fn test_edges_follow_direction() {
        let record = parse_line("A;B,C;D", 1).unwrap();
        assert_eq!(record.incoming, vec!["B", "C"]);
        assert_eq!(record.outgoing, vec!["D"]);

        let edges: Vec<_> = record.edges().collect();
        assert_eq!(edges, vec![("B", "A"), ("C", "A"), ("A", "D")]);
    }

    #[test]
    fn test_surrounding_whitespace_stripped() {
        let record = parse_line("  nypost.com;pepper.com;\r\n", 1).unwrap();
        assert_eq!(record.id, "nypost.com");
        assert_eq!(record.incoming, vec!["pepper.com"]);
        assert!(record.outgoing.is_empty());
    }

    #[test]
    fn test_two_fields_is_format_error() {
        let err = parse_line("A;B", 7).unwrap_err();
        match err {
            Error::Format {
                line,
                content,
                fields,
            } => {
                assert_eq!(line, 7);
                assert_eq!(content, "A;B");
                assert_eq!(fields, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_line_is_format_error() {
        assert!(matches!(
            parse_line("   ", 3),
            Err(Error::Format { fields: 1, .. })
        ));
    }
}
