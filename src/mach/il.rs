/*!
## Standard IL program

The original Tiny BASIC intermediate interpreter, assembled from the
Experimenter's Kit listing. This 343-byte program is what turns the
IL machine into a BASIC: it reads input lines, inserts numbered ones
into the program space, and parses and executes statements through
the string-match and test branches. The label comments give the
offsets from the IL front as in the listing.
*/

/// The assembled standard IL program.
pub const STANDARD_IL: [u8; 343] = [
    // 0000 :STRT
    0x24, 0x3A, 0x91, 0x27, 0x10, 0xE1, 0x59, 0xC5, 0x2A, 0x56,
    // 000A :XEC
    0x10, 0x11, 0x2C,
    // 000D :STMT
    0x8B, 0x4C, 0x45, 0xD4, 0xA0, 0x80, 0xBD, 0x30, 0xBC, 0xE0, 0x13, 0x1D,
    // 0019 :GOTO
    0x94, 0x47, 0xCF, 0x88, 0x54, 0xCF, 0x30, 0xBC, 0xE0, 0x10, 0x11, 0x16,
    // 0025 :GOSB
    0x80, 0x53, 0x55, 0xC2, 0x30, 0xBC, 0xE0, 0x14, 0x16,
    // 002E :PRNT
    0x90, 0x50, 0xD2, 0x83, 0x49, 0x4E, 0xD4, 0xE5, 0x71, 0x88, 0xBB, 0xE1,
    // 003A
    0x1D, 0x8F, 0xA2, 0x21, 0x58, 0x6F, 0x83, 0xAC, 0x22, 0x55, 0x83, 0xBA,
    // 0046
    0x24, 0x93, 0xE0, 0x23, 0x1D, 0x30, 0xBC, 0x20, 0x48,
    // 004F :IF
    0x91, 0x49, 0xC6, 0x30, 0xBC, 0x31, 0x34, 0x30, 0xBC, 0x84, 0x54, 0x48,
    // 005B
    0x45, 0xCE, 0x1C, 0x1D, 0x38, 0x0D,
    // 0061 :INPT
    0x9A, 0x49, 0x4E, 0x50, 0x55, 0xD4, 0xA0, 0x10, 0xE7, 0x24, 0x3F, 0x20,
    // 006D
    0x91, 0x27, 0xE1, 0x59, 0x81, 0xAC, 0x30, 0xBC, 0x13, 0x11, 0x82, 0xAC,
    // 0079
    0x4D, 0xE0, 0x1D,
    // 007C :RETN
    0x89, 0x52, 0x45, 0x54, 0x55, 0x52, 0xCE, 0xE0, 0x15, 0x1D,
    // 0086 :END
    0x85, 0x45, 0x4E, 0xC4, 0xE0, 0x2D,
    // 008C :LIST
    0x98, 0x4C, 0x49, 0x53, 0xD4, 0xEC, 0x24, 0x00, 0x00, 0x00, 0x00, 0x0A,
    // 0098
    0x80, 0x1F, 0x24, 0x93, 0x23, 0x1D, 0x30, 0xBC, 0xE1, 0x50, 0x80, 0xAC,
    // 00A4
    0x59,
    // 00A5 :RUN
    0x85, 0x52, 0x55, 0xCE, 0x38, 0x0A,
    // 00AB :CLER
    0x86, 0x43, 0x4C, 0x45, 0x41, 0xD2, 0x2B,
    // 00B2 :REM
    0x84, 0x52, 0x45, 0xCD, 0x1D,
    // 00B7 :DFLT
    0xA0, 0x80, 0xBD, 0x38, 0x14,
    // 00BC :EXPR
    0x85, 0xAD, 0x30, 0xD3, 0x17, 0x64, 0x81, 0xAB, 0x30, 0xD3, 0x85, 0xAB,
    // 00C8
    0x30, 0xD3, 0x18, 0x5A, 0x85, 0xAD, 0x30, 0xD3, 0x19, 0x54, 0x2F,
    // 00D3 :TERM
    0x30, 0xE2, 0x85, 0xAA, 0x30, 0xE2, 0x1A, 0x5A, 0x85, 0xAF, 0x30, 0xE2,
    // 00DF
    0x1B, 0x54, 0x2F,
    // 00E2 :FACT
    0x97, 0x52, 0x4E, 0xC4, 0x0A, 0x80, 0x80, 0x12, 0x0A, 0x09, 0x29, 0x1A,
    // 00EE
    0x0A, 0x1A, 0x85, 0x18, 0x13, 0x09, 0x80, 0x12, 0x0B, 0x31, 0x30, 0x61,
    // 00FA
    0x73, 0x0B, 0x02, 0x04, 0x02, 0x03, 0x05, 0x03, 0x1B, 0x1A, 0x19, 0x0B,
    // 0106
    0x09, 0x06, 0x0A, 0x00, 0x00, 0x1C, 0x17, 0x2F, 0x8F, 0x55, 0x53, 0xD2,
    // 0112
    0x80, 0xA8, 0x30, 0xBC, 0x31, 0x2A, 0x31, 0x2A, 0x80, 0xA9, 0x2E, 0x2F,
    // 011E
    0xA2, 0x12, 0x2F, 0xC1, 0x2F, 0x80, 0xA8, 0x30, 0xBC, 0x80, 0xA9, 0x2F,
    // 012A :ARG
    0x83, 0xAC, 0x38, 0xBC, 0x0B, 0x2F,
    // 0130 :FUNC
    0x80, 0xA8, 0x52, 0x2F,
    // 0134 :RELO
    0x84, 0xBD, 0x09, 0x02, 0x2F, 0x8E, 0xBC, 0x84, 0xBD, 0x09, 0x03, 0x2F,
    // 0140
    0x84, 0xBE, 0x09, 0x05, 0x2F, 0x09, 0x01, 0x2F, 0x80, 0xBE, 0x84, 0xBD,
    // 014C
    0x09, 0x06, 0x2F, 0x84, 0xBC, 0x09, 0x05, 0x2F, 0x09, 0x04, 0x2F,
];
