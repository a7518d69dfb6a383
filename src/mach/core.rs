use super::Address;

/// Well-known core addresses. The layout is the original Tiny BASIC
/// one and is part of the program-image exchange format, so none of
/// these may move.
pub const CORE_SIZE: usize = 0x10000;
/// Word: front of the stored BASIC program.
pub const USER_PROG: Address = 0x20;
/// Word: end of stack/user space.
pub const END_USER: Address = 0x22;
/// Word: end of the stored BASIC program.
pub const END_PROG: Address = 0x24;
/// Word: gosub stack top.
pub const GOSTK_TOP: Address = 0x26;
/// Word: current BASIC line number, mirrored at USR calls.
pub const LINO_CORE: Address = 0x28;
/// Word: IL program counter, mirrored at USR calls.
pub const ILPC_CORE: Address = 0x2A;
/// Word: BASIC pointer, mirrored at USR calls.
pub const BP_CORE: Address = 0x2C;
/// Word: saved pointer, mirrored at USR calls.
pub const SVPT_CORE: Address = 0x2E;
/// Front of the input line buffer.
pub const IN_LINE: Address = 0x30;
/// Expression stack ceiling (stack empty). Variables A-Z live in the
/// word slots from here up.
pub const EXPN_STK: Address = 0x80;
/// Byte: output column counter, for tabs.
pub const TAB_HERE: Address = 0xBF;
/// USR target: debug watchpoint.
pub const WACH_POINT: Address = 0xFF;
/// USR target: cold start.
pub const COLD_GO: Address = 0x100;
/// USR target: warm start.
pub const WARM_GO: Address = 0x103;
/// USR target: char input.
pub const INCH_SUB: Address = 0x106;
/// USR target: char output.
pub const OUTCH_SUB: Address = 0x109;
/// USR target: break test.
pub const BREAK_SUB: Address = 0x10C;
/// Byte: backspace code honored by the line editor.
pub const BS_CODE: Address = 0x10F;
/// Byte: line cancel code honored by the line editor.
pub const CAN_CODE: Address = 0x110;
/// USR target: debug core dump.
pub const DUMP_SUB: Address = 0x111;
/// USR target: byte peek.
pub const PEEK_SUB: Address = 0x114;
/// USR target: word peek.
pub const PEEK2_SUB: Address = 0x115;
/// USR target: byte poke.
pub const POKE_SUB: Address = 0x118;
/// USR target: debug trace log.
pub const TRLOG_SUB: Address = 0x11B;
/// Word: address of the front of the IL program (normally 0x120).
pub const IL_FRONT: Address = 0x11E;

/// ## Linear core memory
///
/// A flat 64KiB byte arena. Everything else in the machine lives in
/// here by convention of the fixed addresses above: the IL program,
/// the stored BASIC source, the input line, the expression stack and
/// the gosub stack. Words are big-endian.
pub struct Core {
    bytes: Box<[u8; CORE_SIZE]>,
}

impl Core {
    pub fn new() -> Core {
        Core {
            bytes: Box::new([0; CORE_SIZE]),
        }
    }

    pub fn peek(&self, loc: Address) -> u8 {
        self.bytes[loc as usize]
    }

    pub fn poke(&mut self, loc: Address, valu: u8) {
        self.bytes[loc as usize] = valu;
    }

    pub fn peek2(&self, loc: Address) -> u16 {
        let hi = self.bytes[loc as usize];
        let lo = self.bytes[loc.wrapping_add(1) as usize];
        u16::from_be_bytes([hi, lo])
    }

    pub fn poke2(&mut self, loc: Address, valu: u16) {
        let [hi, lo] = valu.to_be_bytes();
        self.bytes[loc as usize] = hi;
        self.bytes[loc.wrapping_add(1) as usize] = lo;
    }

    /// Named sub-view of the arena. Callers pass an explicit
    /// offset/length pair instead of indexing with ambient constants.
    pub fn view(&self, front: Address, end: Address) -> &[u8] {
        debug_assert!(front <= end);
        &self.bytes[front as usize..end as usize]
    }

    pub fn view_mut(&mut self, front: Address, end: Address) -> &mut [u8] {
        debug_assert!(front <= end);
        &mut self.bytes[front as usize..end as usize]
    }

    /// Copy an image (IL code, or a program image in the exchange
    /// format) into the arena at `front`.
    pub fn load(&mut self, front: Address, image: &[u8]) {
        let front = front as usize;
        self.bytes[front..front + image.len()].copy_from_slice(image);
    }
}

impl Default for Core {
    fn default() -> Core {
        Core::new()
    }
}
