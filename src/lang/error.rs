use super::LineNumber;

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    line_number: Option<LineNumber>,
    command: &'static str,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, $line:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_line_number($line)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, $line:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_line_number($line)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            line_number: None,
            command: "",
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn line_number(&self) -> Option<LineNumber> {
        self.line_number
    }

    /// Errors that stop the running script. Everything else is reported
    /// and execution carries on.
    pub fn aborts_script(&self) -> bool {
        !matches!(
            self.code,
            ErrorCode::OnlyInScript | ErrorCode::UnknownCommand
        )
    }

    pub fn in_line_number(self, line: Option<LineNumber>) -> Error {
        debug_assert!(self.line_number.is_none());
        Error {
            line_number: line,
            ..self
        }
    }

    pub fn in_command(self, command: &'static str) -> Error {
        Error { command, ..self }
    }

    pub fn message(self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            message: message.to_string(),
            ..self
        }
    }

    /// Re-labels a failure as a syntax error of the same line and command.
    /// Used by handlers where only "no corresponding for" keeps its own code.
    pub fn as_syntax_error(self) -> Error {
        Error {
            code: ErrorCode::SyntaxError,
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NoCorrespondingFor = 1,
    SyntaxError = 2,
    TooManyArguments = 3,
    NoForStatement = 4,
    LabelNotFound = 5,
    OnlyInScript = 6,
    OutOfMemory = 7,
    BadFilePosition = 8,
    UnknownCommand = 9,
    Break = 10,
    InternalError = 51,
    FileNotFound = 53,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self {
            NoCorrespondingFor => "NO CORRESPONDING FOR",
            SyntaxError => "SYNTAX ERROR",
            TooManyArguments => "TOO MANY ARGUMENTS",
            NoForStatement => "NO FOR STATEMENT",
            LabelNotFound => "LABEL NOT FOUND",
            OnlyInScript => "ONLY SUPPORTED IN SCRIPT",
            OutOfMemory => "OUT OF MEMORY",
            BadFilePosition => "BAD FILE POSITION",
            UnknownCommand => "UNKNOWN COMMAND",
            Break => "BREAK",
            InternalError => "INTERNAL ERROR",
            FileNotFound => "FILE NOT FOUND",
        };
        write!(f, "{}", code_str)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if !self.command.is_empty() {
            write!(f, "{}: ", self.command)?;
        }
        write!(f, "{}", self.code)?;
        if let Some(line_number) = self.line_number {
            write!(f, " IN LINE {}", line_number)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}
