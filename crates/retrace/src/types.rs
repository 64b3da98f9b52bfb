//! Core position types

use serde::{Deserialize, Serialize};

/// Sentinel stored in a mapping array for original characters that no
/// longer exist in the edited text
pub(crate) const UNMAPPED: i64 = -1;

/// A line/column position (both 0-indexed, columns counted in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Line number
    pub line: usize,
    /// Column within the line
    pub column: usize,
}

impl Location {
    pub fn new(line: usize, column: usize) -> Self {
        Location { line, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_ordering() {
        let a = Location::new(0, 5);
        let b = Location::new(1, 0);
        let c = Location::new(1, 3);

        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_serialization_location() {
        let loc = Location::new(5, 10);
        let json = serde_json::to_string(&loc).unwrap();
        assert_eq!(json, r#"{"line":5,"column":10}"#);
        let deserialized: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(loc, deserialized);
    }
}
