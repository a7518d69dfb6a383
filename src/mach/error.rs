/// Interpreter error. Everything fallible in the machine funnels one of
/// these into `Vm::recover`, which prints the diagnostic and puts the
/// interpreter back in command mode. Errors never cross the host
/// boundary except as printed output.
pub struct Error {
    code: ErrorCode,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err).message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error { code, message: "" }
    }

    pub fn message(self, message: &'static str) -> Error {
        Error {
            code: self.code,
            message,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    ExpressionOverflow,
    ExpressionUnderflow,
    GosubOverflow,
    GosubUnderflow,
    DivisionByZero,
    UndefinedLine,
    OutOfMemory,
    IllegalOpcode,
    BadSubroutine,
    ControlCharacter,
    BranchOffset,
    Break,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let code_str = match self.code {
            ErrorCode::ExpressionOverflow => "EXPRESSION STACK OVERFLOW",
            ErrorCode::ExpressionUnderflow => "EXPRESSION STACK UNDERFLOW",
            ErrorCode::GosubOverflow => "GOSUB STACK OVERFLOW",
            ErrorCode::GosubUnderflow => "GOSUB STACK UNDERFLOW",
            ErrorCode::DivisionByZero => "DIVISION BY ZERO",
            ErrorCode::UndefinedLine => "UNDEFINED LINE",
            ErrorCode::OutOfMemory => "OUT OF MEMORY",
            ErrorCode::IllegalOpcode => "ILLEGAL OPCODE",
            ErrorCode::BadSubroutine => "BAD SUBROUTINE",
            ErrorCode::ControlCharacter => "CONTROL CHARACTER IN STRING",
            ErrorCode::BranchOffset => "ZERO BRANCH OFFSET",
            ErrorCode::Break => "BREAK",
        };
        if self.message.is_empty() {
            write!(f, "{}", code_str)
        } else {
            write!(f, "{}; {}", code_str, self.message)
        }
    }
}
