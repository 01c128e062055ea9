use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected token at {pos}: expected {expected}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Unexpected end of template at {pos}: expected {expected}")]
    UnexpectedEof { pos: usize, expected: String },

    #[error("Invalid syntax at {pos}: {message}")]
    InvalidSyntax { pos: usize, message: String },
}

impl ParseError {
    pub fn unexpected_token(
        pos: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::UnexpectedToken {
            pos,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn unexpected_eof(pos: usize, expected: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            pos,
            expected: expected.into(),
        }
    }

    pub fn invalid_syntax(pos: usize, message: impl Into<String>) -> Self {
        Self::InvalidSyntax {
            pos,
            message: message.into(),
        }
    }

    pub fn pos(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { pos, .. } => *pos,
            ParseError::UnexpectedEof { pos, .. } => *pos,
            ParseError::InvalidSyntax { pos, .. } => *pos,
        }
    }
}

/// Pretty-print a parse error with source context using ariadne.
pub fn format_errors(source: &str, filename: &str, error: &ParseError) -> String {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let pos = error.pos().min(source.len());
    let end = (pos + 1).min(source.len());
    let mut output = Vec::new();

    let report = Report::build(ReportKind::Error, filename, pos)
        .with_message(error.to_string())
        .with_label(
            Label::new((filename, pos..end))
                .with_color(Color::Red)
                .with_message(match error {
                    ParseError::UnexpectedToken { expected, .. } => format!("expected {expected}"),
                    ParseError::UnexpectedEof { expected, .. } => format!("expected {expected}"),
                    ParseError::InvalidSyntax { message, .. } => message.clone(),
                }),
        )
        .finish();

    if report
        .write((filename, Source::from(source)), &mut output)
        .is_err()
    {
        return error.to_string();
    }

    String::from_utf8(output).unwrap_or_else(|_| error.to_string())
}
