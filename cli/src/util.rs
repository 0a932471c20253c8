use graph_walk_core::Direction;

use crate::error::CliError;

/// Parse a direction flag.
///
/// Accepts: "outgoing", "out", "next", "incoming", "in", "prev"
/// (case-insensitive).
pub fn parse_direction(s: &str) -> Result<Direction, CliError> {
    match s.to_lowercase().as_str() {
        "outgoing" | "out" | "next" => Ok(Direction::Outgoing),
        "incoming" | "in" | "prev" => Ok(Direction::Incoming),
        _ => Err(CliError::InvalidArgument {
            param: "direction",
            value: s.to_string(),
            reason: "use 'outgoing' or 'incoming'",
        }),
    }
}

/// Which records a load-time type list keeps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Set(Vec<String>),
}

impl TypeFilter {
    /// `*` keeps everything; otherwise a comma-separated list of types.
    /// Blank entries are ignored.
    pub fn parse(list: &str) -> Self {
        if list.trim() == "*" {
            TypeFilter::All
        } else {
            TypeFilter::Set(
                list.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            )
        }
    }

    pub fn matches(&self, ty: &str) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Set(types) => types.iter().any(|t| t == ty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_direction() {
        assert_eq!(parse_direction("outgoing").unwrap(), Direction::Outgoing);
        assert_eq!(parse_direction("OUT").unwrap(), Direction::Outgoing);
        assert_eq!(parse_direction("In").unwrap(), Direction::Incoming);
        assert_eq!(parse_direction("prev").unwrap(), Direction::Incoming);
        assert!(matches!(
            parse_direction("sideways"),
            Err(CliError::InvalidArgument { param: "direction", .. })
        ));
    }

    #[test]
    fn test_type_filter_all() {
        let f = TypeFilter::parse(" * ");
        assert_eq!(f, TypeFilter::All);
        assert!(f.matches("anything"));
    }

    #[test]
    fn test_type_filter_list() {
        let f = TypeFilter::parse("x, y,,");
        assert_eq!(f, TypeFilter::Set(vec!["x".into(), "y".into()]));
        assert!(f.matches("y"));
        assert!(!f.matches("z"));
        assert!(!TypeFilter::parse("").matches("x"));
    }
}
