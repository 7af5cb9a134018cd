use crate::model::{LINE_IDS, Schedule};

/// Why raw form input was rejected at the boundary.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing was submitted.
    Empty,
    /// Not valid JSON of the expected shape.
    Malformed(String),
    /// A required line id is absent.
    MissingLine(u8),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "no schedule data submitted"),
            ParseError::Malformed(e) => write!(f, "invalid schedule JSON: {e}"),
            ParseError::MissingLine(id) => write!(f, "schedule is missing line {id}"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse raw form text into a typed schedule.
///
/// All validation happens here; past this point the rotation engine assumes
/// well-formed data. Line ids arrive as JSON object keys (strings) and come
/// out as `u8`.
pub fn parse_schedule(raw: &str) -> Result<Schedule, ParseError> {
    if raw.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let schedule: Schedule =
        serde_json::from_str(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;

    if let Some(id) = schedule.missing_lines().first() {
        return Err(ParseError::MissingLine(*id));
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SENTINEL;

    const VALID: &str = r#"{
        "1": {"a": "Andi", "b": "WSF"},
        "2": {"a": "Budi"},
        "3": {"a": "Citra"},
        "5": {"a": "Dewi"},
        "6": {"a": "Eka"}
    }"#;

    #[test]
    fn valid_input_parses() {
        let schedule = parse_schedule(VALID).unwrap();
        assert!(schedule.missing_lines().is_empty());
        assert_eq!(schedule.line(1).unwrap().get("b"), Some(SENTINEL));
        assert_eq!(schedule.line(6).unwrap().get("a"), Some("Eka"));
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert_eq!(parse_schedule(""), Err(ParseError::Empty));
        assert_eq!(parse_schedule("  \n\t "), Err(ParseError::Empty));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            parse_schedule("{ not json"),
            Err(ParseError::Malformed(_))
        ));
    }

    #[test]
    fn non_object_line_rejected() {
        let raw = r#"{"1": "oops", "2": {}, "3": {}, "5": {}, "6": {}}"#;
        assert!(matches!(parse_schedule(raw), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn non_numeric_line_key_rejected() {
        let raw = r#"{"satu": {"a": "X"}}"#;
        assert!(matches!(parse_schedule(raw), Err(ParseError::Malformed(_))));
    }

    #[test]
    fn missing_required_line_reported() {
        let raw = r#"{
            "1": {"a": "Andi"},
            "2": {"a": "Budi"},
            "3": {"a": "Citra"},
            "6": {"a": "Eka"}
        }"#;
        assert_eq!(parse_schedule(raw), Err(ParseError::MissingLine(5)));
    }

    #[test]
    fn extra_line_is_kept() {
        let raw = r#"{
            "1": {"a": "Andi"},
            "2": {"a": "Budi"},
            "3": {"a": "Citra"},
            "4": {"a": "Tamu"},
            "5": {"a": "Dewi"},
            "6": {"a": "Eka"}
        }"#;
        let schedule = parse_schedule(raw).unwrap();
        assert_eq!(schedule.line(4).unwrap().get("a"), Some("Tamu"));
    }

    #[test]
    fn line_order_follows_input() {
        let raw = r#"{
            "6": {"a": "Eka"},
            "5": {"a": "Dewi"},
            "3": {"a": "Citra"},
            "2": {"a": "Budi"},
            "1": {"a": "Andi"}
        }"#;
        let schedule = parse_schedule(raw).unwrap();
        let ids: Vec<u8> = schedule.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![6, 5, 3, 2, 1]);
    }
}
