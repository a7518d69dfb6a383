/// ## IL instruction set
///
/// One decoded IL opcode. The byte encoding partitions on the high
/// bits: everything below 0x30 is a single-byte operation (some with
/// inline operands fetched by the dispatch arm), 0x30-0x3F are the
/// 11-bit call/jump pair, 0x40-0x7F is the relative branch, and the
/// four upper quarters are the conditional branches that drive BASIC
/// parsing. Ranged variants carry the raw opcode byte because the
/// offset or target lives in its low bits.
///
/// The mnemonics in the `Display` impl are the ones from the Tiny
/// BASIC Experimenter's Kit listing.
#[derive(Clone, Copy, PartialEq)]
pub enum Opcode {
    /// SX n: exchange the top expression-stack byte with the byte n
    /// deep. SX 0 does nothing.
    StackExchange(u8),
    /// NO: space filler, e.g. to absorb a compare skip.
    Nop,
    /// LB n: push the following IL byte.
    LiteralByte,
    /// LN n: push the following IL word.
    LiteralNumber,
    /// DS: duplicate the top word.
    Duplicate,
    /// SP: pop and discard the top word.
    Drop,
    /// Default fill of unprogrammed IL space; error stop and halt.
    Bad,
    /// SB: save the BASIC pointer.
    SaveBasic,
    /// RB: restore the BASIC pointer.
    RestoreBasic,
    /// FV: fetch variable, byte address -> word value.
    FetchVariable,
    /// SV: store variable.
    StoreVariable,
    /// GS: push the current line number on the gosub stack.
    GosubSave,
    /// RS: pop the gosub stack into the current line number.
    RestoreSaved,
    /// GO: goto the popped line number.
    Goto,
    /// NE: negate the top word.
    Negate,
    /// AD: add.
    Add,
    /// SU: subtract.
    Subtract,
    /// MP: multiply.
    Multiply,
    /// DV: signed divide; zero divisor is an error stop.
    Divide,
    /// CP: signed three-way compare with mask-selected skip of the
    /// next IL byte.
    Compare,
    /// NX: next BASIC statement, or restart the IL in command mode.
    NextStatement,
    /// LS: list the stored program.
    ListProgram,
    /// PN: print the top word in decimal.
    PrintNumber,
    /// PQ: print the quoted string at the BASIC pointer.
    PrintQuoted,
    /// PT: space to the next multiple-of-8 column.
    PrintTab,
    /// NL: newline.
    NewLine,
    /// PC "...": print the inline literal (last byte has bit 7 set).
    PrintLiteral,
    /// GL: read one input line into the line buffer.
    GetLine,
    /// IL: insert the current line into the stored program.
    InsertLine,
    /// MT: mark the program space empty (cold start).
    MarkEmpty,
    /// XQ: enter run mode.
    Execute,
    /// WS: warm stop back to command mode.
    WarmStop,
    /// US: machine-language subroutine call.
    UsrCall,
    /// RT: return from an IL subroutine.
    SubReturn,
    /// JS a: IL subroutine call, 11-bit offset from the IL front.
    Call(u8),
    /// J a: unconditional jump, same addressing.
    Jump(u8),
    /// BR a: relative branch, sign in bit 5, zero offset illegal.
    Relative(u8),
    /// BC a "...": branch unless the inline string matches the BASIC
    /// text at the BASIC pointer.
    MatchString(u8),
    /// BV a: branch if not a variable name.
    TestVariable(u8),
    /// BN a: branch if not a number.
    TestNumber(u8),
    /// BE a: branch if not at end of line.
    TestEndline(u8),
}

impl Opcode {
    pub fn decode(op: u8) -> Opcode {
        use Opcode::*;
        match op {
            0x00..=0x07 => StackExchange(op),
            0x09 => LiteralByte,
            0x0A => LiteralNumber,
            0x0B => Duplicate,
            0x0C => Drop,
            0x0F => Bad,
            0x10 => SaveBasic,
            0x11 => RestoreBasic,
            0x12 => FetchVariable,
            0x13 => StoreVariable,
            0x14 => GosubSave,
            0x15 => RestoreSaved,
            0x16 => Goto,
            0x17 => Negate,
            0x18 => Add,
            0x19 => Subtract,
            0x1A => Multiply,
            0x1B => Divide,
            0x1C => Compare,
            0x1D => NextStatement,
            0x1F => ListProgram,
            0x20 => PrintNumber,
            0x21 => PrintQuoted,
            0x22 => PrintTab,
            0x23 => NewLine,
            0x24 => PrintLiteral,
            0x27 => GetLine,
            0x2A => InsertLine,
            0x2B => MarkEmpty,
            0x2C => Execute,
            0x2D => WarmStop,
            0x2E => UsrCall,
            0x2F => SubReturn,
            0x30..=0x37 => Call(op),
            0x38..=0x3F => Jump(op),
            0x40..=0x7F => Relative(op),
            0x80..=0x9F => MatchString(op),
            0xA0..=0xBF => TestVariable(op),
            0xC0..=0xDF => TestNumber(op),
            0xE0..=0xFF => TestEndline(op),
            // 0x08 and the unassigned low codes are space fillers.
            _ => Nop,
        }
    }
}

impl std::fmt::Debug for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            StackExchange(op) => write!(f, "SX {}", op),
            Nop => write!(f, "NO"),
            LiteralByte => write!(f, "LB"),
            LiteralNumber => write!(f, "LN"),
            Duplicate => write!(f, "DS"),
            Drop => write!(f, "SP"),
            Bad => write!(f, "BAD"),
            SaveBasic => write!(f, "SB"),
            RestoreBasic => write!(f, "RB"),
            FetchVariable => write!(f, "FV"),
            StoreVariable => write!(f, "SV"),
            GosubSave => write!(f, "GS"),
            RestoreSaved => write!(f, "RS"),
            Goto => write!(f, "GO"),
            Negate => write!(f, "NE"),
            Add => write!(f, "AD"),
            Subtract => write!(f, "SU"),
            Multiply => write!(f, "MP"),
            Divide => write!(f, "DV"),
            Compare => write!(f, "CP"),
            NextStatement => write!(f, "NX"),
            ListProgram => write!(f, "LS"),
            PrintNumber => write!(f, "PN"),
            PrintQuoted => write!(f, "PQ"),
            PrintTab => write!(f, "PT"),
            NewLine => write!(f, "NL"),
            PrintLiteral => write!(f, "PC"),
            GetLine => write!(f, "GL"),
            InsertLine => write!(f, "IL"),
            MarkEmpty => write!(f, "MT"),
            Execute => write!(f, "XQ"),
            WarmStop => write!(f, "WS"),
            UsrCall => write!(f, "US"),
            SubReturn => write!(f, "RT"),
            Call(op) => write!(f, "JS {:03X}", (*op as u16 & 0x07) << 8),
            Jump(op) => write!(f, "J {:03X}", (*op as u16 & 0x07) << 8),
            Relative(op) => write!(f, "BR {:+}", *op as i16 - 0x60),
            MatchString(op) => write!(f, "BC {}", op & 0x1F),
            TestVariable(op) => write!(f, "BV {}", op & 0x1F),
            TestNumber(op) => write!(f, "BN {}", op & 0x1F),
            TestEndline(op) => write!(f, "BE {}", op & 0x1F),
        }
    }
}
