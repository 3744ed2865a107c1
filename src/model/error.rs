use std::fmt;

// 牌・手牌・鳴き候補の表記のパースエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub input: String,
    pub message: String,
}

impl ParseError {
    pub fn new(input: &str, message: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error on '{}': {}", self.input, self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug)]
pub enum Error {
    /// 牌文字列・手牌文字列のパースエラー
    Parse(ParseError),
    /// パラメータ式, 設定JSONの不正
    Config { message: String },
    /// 局面スナップショットの不整合 (枚数超過など)
    State { message: String },
}

impl Error {
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    pub fn state(message: impl Into<String>) -> Self {
        Error::State {
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse(e) => write!(f, "{}", e),
            Error::Config { message } => write!(f, "invalid config: {}", message),
            Error::State { message } => write!(f, "invalid state: {}", message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::config(e.to_string())
    }
}

pub type AdvisorResult<T> = Result<T, Error>;

#[test]
fn test_error_display() {
    let e = ParseError::new("1x", "invalid suit: 'x'");
    assert_eq!(e.to_string(), "parse error on '1x': invalid suit: 'x'");

    let e: Error = e.into();
    assert!(matches!(e, Error::Parse(_)));
    assert_eq!(Error::state("15 tiles").to_string(), "invalid state: 15 tiles");
}
