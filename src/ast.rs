use std::time::Duration;

pub const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Parse(String),
    Expand(String),
    Equals(String, String),
    Contains(String, u8, u8),
    Scan(Duration),
    List,
    Find(String),
    Help,
    Exit,
}

impl Command {
    pub fn all_strings() -> Vec<String> {
        vec![
            "parse".to_string(),
            "expand".to_string(),
            "eq".to_string(),
            "contains".to_string(),
            "scan".to_string(),
            "list".to_string(),
            "find".to_string(),
            "help".to_string(),
            "exit".to_string(),
        ]
    }
}
