use std::fmt;

use serde::{Deserialize, Serialize};

/// Reading emitted when a term has no recorded reading
pub const MISSING_READING: &str = "*";

/// One extracted term
/// `term` is unique within a result list, `reading` is the reading seen at
/// the term's first occurrence in the corpus.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TermRecord {
    pub term: String,
    pub reading: String,
    pub count: u64,
}

impl TermRecord {
    pub fn new(term: impl Into<String>, reading: impl Into<String>, count: u64) -> Self {
        Self {
            term: term.into(),
            reading: reading.into(),
            count,
        }
    }
}

/// `term<TAB>reading<TAB>count`
impl fmt::Display for TermRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.term, self.reading, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_tab_separated() {
        let record = TermRecord::new("プログラミング", "プログラミング", 2);
        assert_eq!(record.to_string(), "プログラミング\tプログラミング\t2");
    }

    #[test]
    fn json_field_names() {
        let record = TermRecord::new("Python", "Python", 12);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"term": "Python", "reading": "Python", "count": 12})
        );
    }
}
