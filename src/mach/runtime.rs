use super::core::{
    BP_CORE, BREAK_SUB, BS_CODE, CAN_CODE, COLD_GO, Core, DUMP_SUB, END_PROG, END_USER, EXPN_STK,
    GOSTK_TOP, ILPC_CORE, IL_FRONT, INCH_SUB, IN_LINE, LINO_CORE, OUTCH_SUB, PEEK2_SUB, PEEK_SUB,
    POKE_SUB, SVPT_CORE, TAB_HERE, TRLOG_SUB, USER_PROG, WACH_POINT, WARM_GO,
};
use super::trace::Trace;
use super::{Address, Error, Host, Opcode, STANDARD_IL};
use crate::error;
use std::collections::VecDeque;

type Result<T> = std::result::Result<T, Error>;

/// Why `interpret` came back to the host.
#[derive(Debug, PartialEq, Copy, Clone)]
pub enum Event {
    /// The input opcode wants a character and `char_in` had none.
    /// Feed characters (or call `run_line`) and interpret again.
    AwaitingInput,
    /// The IL ran an unprogrammed opcode. The machine is wedged until
    /// a cold or warm start.
    Stopped,
}

/// What a dispatch arm tells the fetch loop.
enum Flow {
    Continue,
    Await,
    Halt,
}

/// ## Interpreter runtime
///
/// One whole Tiny BASIC machine: the 64KiB core plus the register
/// file the IL interpreter runs on. Registers live in the struct and
/// are mirrored into their fixed core addresses only where user code
/// can observe them (USR calls); everything else goes through the
/// typed fields so the borrow checker, not convention, guards them.
///
/// `interpret` runs the fetch/dispatch loop until the machine either
/// needs input or stops; all output produced along the way goes out
/// through the `Host` passed in. There is no internal error state:
/// fallible steps return `Err`, the loop prints the diagnostic,
/// unwinds to command mode and keeps going.
pub struct Vm {
    pub(super) core: Core,
    pub(super) lino: u16,
    pub(super) ilpc: Address,
    /// Restart the IL from its front before the next fetch. Set by
    /// errors, edits and statement ends in command mode.
    pub(super) reload_il: bool,
    pub(super) bp: Address,
    pub(super) svpt: Address,
    pub(super) sub_stk: Address,
    pub(super) expn_top: Address,
    pub(super) in_lend: Address,
    pub(super) src_end: Address,
    pub(super) user_end: Address,
    pub(super) il_end: Address,
    xq_here: Address,
    /// A GL opcode is half-finished; keep the input buffer on resume.
    pending_input: bool,
    typeahead: VecDeque<u8>,
    pub(super) trace: Trace,
}

impl Vm {
    /// A machine with the standard IL loaded and cold-started.
    pub fn new() -> Vm {
        let mut vm = Vm {
            core: Core::new(),
            lino: 0,
            ilpc: 0,
            reload_il: false,
            bp: 0,
            svpt: 0,
            sub_stk: 0,
            expn_top: 0,
            in_lend: 0,
            src_end: 0,
            user_end: 0,
            il_end: 0,
            xq_here: 0,
            pending_input: false,
            typeahead: VecDeque::new(),
            trace: Trace::new(),
        };
        vm.load_il(&STANDARD_IL);
        vm
    }

    /// Load an IL program at the conventional spot just past the
    /// vector table, then cold-start on it.
    pub fn load_il(&mut self, il: &[u8]) {
        let front = IL_FRONT + 2;
        self.core.poke2(IL_FRONT, front);
        self.core.load(front, il);
        self.cold_start(front.wrapping_add(il.len() as u16));
    }

    /// Wipe the program and all machine state. A zero `il_end` keeps
    /// the current IL extent.
    pub fn cold_start(&mut self, il_end: Address) {
        if il_end != 0 {
            self.il_end = il_end;
        }
        let front = self.core.peek2(IL_FRONT);
        if front != IL_FRONT + 2 {
            // relocated IL of unknown size; allow it a full 2K
            self.il_end = front.wrapping_add(0x800);
        }
        self.xq_here = 0;
        self.core
            .poke2(USER_PROG, self.il_end.wrapping_add(0xFF) & 0xFF00);
        self.core.poke2(END_USER, 0xFFFE);
        self.core.poke2(0xFFFE, 0xDEAD);
        if self.core.peek(BS_CODE) == 0 {
            self.core.poke(BS_CODE, 0x08);
        }
        if self.core.peek(CAN_CODE) == 0 {
            self.core.poke(CAN_CODE, 0x18);
        }
        self.warm_start();
        // empty program is just the sentinel line 0
        self.src_end = self.core.peek2(USER_PROG);
        self.core.poke2(self.src_end, 0);
        self.src_end = self.src_end.wrapping_add(2);
        self.core.poke2(END_PROG, self.src_end);
    }

    /// Reset the stacks and pointers but keep the stored program.
    pub fn warm_start(&mut self) {
        self.user_end = self.core.peek2(END_USER);
        self.sub_stk = self.user_end;
        self.core.poke2(GOSTK_TOP, self.sub_stk);
        self.expn_top = EXPN_STK;
        self.lino = 0;
        self.reload_il = true;
        self.bp = IN_LINE;
        self.svpt = IN_LINE;
        self.in_lend = IN_LINE;
        self.core.poke(self.bp, 0);
        self.core.poke(TAB_HERE, 0);
        self.pending_input = false;
    }

    /// Queue one line of input (a CR is appended) and interpret until
    /// the machine wants more.
    pub fn run_line<H: Host>(&mut self, host: &mut H, line: &str) -> Event {
        for ch in line.bytes() {
            self.typeahead.push_back(ch);
        }
        self.typeahead.push_back(0x0D);
        self.interpret(host)
    }

    /// The fetch/dispatch loop. Runs until input starves or an
    /// unprogrammed opcode stops the machine.
    pub fn interpret<H: Host>(&mut self, host: &mut H) -> Event {
        loop {
            if host.break_requested() {
                self.out_ln(host);
                self.out_str(host, "*** BREAK ***");
                self.recover(host, error!(Break));
            }
            if self.reload_il {
                self.reload_il = false;
                self.ilpc = self.core.peek2(IL_FRONT);
                self.trace.log_it(-(self.ilpc as i32));
                if self.trace.verbosity > 0 {
                    self.out_ln(host);
                    self.out_str(host, "[IL=");
                    self.out_hex(host, self.ilpc as i32, 4);
                    self.ouch(host, 0x5D);
                }
            }
            if self.trace.watcher > 0 {
                let seen = self.core.peek(self.trace.watcher) as i32;
                let hit = if self.trace.watchee < 0 {
                    self.trace.watchee + 0x100 + seen != 0
                } else {
                    self.trace.watchee == seen
                };
                if hit {
                    self.out_ln(host);
                    self.out_str(host, "[Watch ");
                    self.out_hex(host, self.trace.watcher as i32, 4);
                    self.out_str(host, " = ");
                    self.out_int(host, seen);
                    self.out_str(host, " *** ");
                    self.trace.watcher = 0;
                    self.recover(host, error!(Break; "WATCHPOINT"));
                    continue;
                }
            }
            let op = self.core.peek(self.ilpc);
            self.ilpc = self.ilpc.wrapping_add(1);
            if self.trace.verbosity > 0 {
                let front = self.core.peek2(IL_FRONT);
                self.out_ln(host);
                self.out_str(host, "[IL+");
                self.out_hex(host, self.ilpc.wrapping_sub(front) as i32 - 1, 3);
                self.ouch(host, 0x3D);
                self.out_hex(host, op as i32, 2);
                self.ouch(host, 0x5D);
            }
            match self.step(host, Opcode::decode(op)) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Await) => return Event::AwaitingInput,
                Ok(Flow::Halt) => return Event::Stopped,
                Err(err) => self.recover(host, err),
            }
        }
    }

    /// One decoded opcode.
    fn step<H: Host>(&mut self, host: &mut H, opcode: Opcode) -> Result<Flow> {
        match opcode {
            Opcode::Bad => {
                self.recover(host, error!(IllegalOpcode));
                return Ok(Flow::Halt);
            }
            Opcode::Nop => {}
            Opcode::StackExchange(depth) => self.exchange_ex(host, depth)?,
            Opcode::LiteralByte => {
                let valu = self.core.peek(self.ilpc);
                self.ilpc = self.ilpc.wrapping_add(1);
                self.push_ex_byte(host, valu)?;
            }
            Opcode::LiteralNumber => {
                let valu = self.core.peek2(self.ilpc);
                self.ilpc = self.ilpc.wrapping_add(2);
                self.push_ex_int(host, valu)?;
            }
            Opcode::Duplicate => {
                let valu = self.pop_ex_int(host)?;
                self.push_ex_int(host, valu)?;
                self.push_ex_int(host, valu)?;
            }
            Opcode::Drop => {
                self.pop_ex_int(host)?;
            }
            Opcode::SaveBasic => self.line_swap(self.bp),
            Opcode::RestoreBasic => self.line_swap(self.svpt),
            Opcode::FetchVariable => {
                let slot = self.pop_ex_byte(host)?;
                let valu = self.core.peek2(slot as Address);
                self.push_ex_int(host, valu)?;
                if self.trace.verbosity > 1 {
                    self.show_vars(host, slot);
                }
            }
            Opcode::StoreVariable => {
                let valu = self.pop_ex_int(host)?;
                let slot = self.pop_ex_byte(host)?;
                self.core.poke2(slot as Address, valu);
                self.trace
                    .log_it((valu as i32 & 0xFFFF) + ((slot as i32 - 0x100) << 16));
                if self.trace.verbosity > 0 {
                    self.show_vars(host, slot);
                    if self.trace.verbosity > 1 {
                        self.show_ex_st(host);
                    }
                }
            }
            Opcode::GosubSave => {
                let lino = self.lino;
                self.push_sub(host, lino)?;
            }
            Opcode::RestoreSaved => {
                self.lino = self.pop_sub(host)?;
                self.go_to_lino()?;
            }
            Opcode::Goto => {
                self.lino = self.pop_ex_int(host)?;
                if self.xq_here == 0 {
                    // GOTO before anything ever ran; nowhere to go
                    self.reload_il = true;
                } else {
                    self.ilpc = self.xq_here;
                    self.trace.log_it(-(self.ilpc as i32));
                    self.go_to_lino()?;
                }
            }
            Opcode::Negate => {
                let valu = self.pop_ex_int(host)? as i16;
                self.push_ex_int(host, valu.wrapping_neg() as u16)?;
            }
            Opcode::Add => {
                let rhs = self.pop_ex_int(host)? as i16;
                let lhs = self.pop_ex_int(host)? as i16;
                self.push_ex_int(host, lhs.wrapping_add(rhs) as u16)?;
            }
            Opcode::Subtract => {
                let rhs = self.pop_ex_int(host)? as i16;
                let lhs = self.pop_ex_int(host)? as i16;
                self.push_ex_int(host, lhs.wrapping_sub(rhs) as u16)?;
            }
            Opcode::Multiply => {
                let rhs = self.pop_ex_int(host)? as i16;
                let lhs = self.pop_ex_int(host)? as i16;
                self.push_ex_int(host, lhs.wrapping_mul(rhs) as u16)?;
            }
            Opcode::Divide => {
                let rhs = self.pop_ex_int(host)? as i16;
                let lhs = self.pop_ex_int(host)? as i16;
                if rhs == 0 {
                    return Err(error!(DivisionByZero));
                }
                self.push_ex_int(host, lhs.wrapping_div(rhs) as u16)?;
            }
            Opcode::Compare => {
                let rhs = self.pop_ex_int(host)? as i16;
                let mask = self.pop_ex_byte(host)?;
                let lhs = self.pop_ex_int(host)? as i16;
                let diff = lhs as i32 - rhs as i32;
                let bit: u8 = if diff < 0 {
                    1
                } else if diff > 0 {
                    4
                } else {
                    2
                };
                if bit & mask != 0 {
                    // relation true: skip the else-jump that follows
                    self.ilpc = self.ilpc.wrapping_add(1);
                }
                if self.trace.verbosity > 0 {
                    self.show_ex_st(host);
                }
            }
            Opcode::NextStatement => {
                if self.lino == 0 {
                    // command line done, go get another
                    self.reload_il = true;
                } else {
                    self.bp = self.skip_to(self.bp, 0x0D);
                    self.lino = self.core.peek2(self.bp);
                    if self.lino == 0 {
                        return Err(error!(UndefinedLine; "RAN OFF PROGRAM END"));
                    }
                    self.bp = self.bp.wrapping_add(2);
                    self.ilpc = self.xq_here;
                    self.trace.log_it(-(self.ilpc as i32));
                }
                self.trace.log_line(self.lino as i32);
                if self.trace.verbosity > 0 {
                    self.out_str(host, " [#");
                    self.out_int(host, self.lino as i32);
                    self.ouch(host, 0x5D);
                }
            }
            Opcode::ListProgram => {
                // all stacked numbers, last two meaningful
                let mut to: u16 = 0;
                let mut from: u16 = 0;
                while self.expn_top < EXPN_STK {
                    to = from;
                    from = self.pop_ex_int(host)?;
                }
                if (from as i16) < 0 || (to as i16) < 0 {
                    return Err(error!(UndefinedLine; "NEGATIVE LINE NUMBER"));
                }
                self.list(host, from, to);
            }
            Opcode::PrintNumber => {
                let valu = self.pop_ex_int(host)? as i16;
                self.out_int(host, valu as i32);
            }
            Opcode::PrintQuoted => loop {
                let ch = self.core.peek(self.bp);
                self.bp = self.bp.wrapping_add(1);
                if ch == 0x22 {
                    break;
                }
                if ch < 0x20 {
                    return Err(error!(ControlCharacter; "UNTERMINATED STRING"));
                }
                self.ouch(host, ch);
            },
            Opcode::PrintTab => loop {
                self.ouch(host, 0x20);
                if self.core.peek(TAB_HERE) % 8 == 0 {
                    break;
                }
            },
            Opcode::NewLine => self.ouch(host, 0x0D),
            Opcode::PrintLiteral => loop {
                let ch = self.core.peek(self.ilpc);
                self.ilpc = self.ilpc.wrapping_add(1);
                self.ouch(host, ch & 0x7F);
                if ch & 0x80 != 0 {
                    break;
                }
            },
            Opcode::GetLine => return self.get_line(host),
            Opcode::InsertLine => {
                let lino = self.pop_ex_int(host)?;
                self.insert_line(lino)?;
                if self.trace.verbosity > 0 && self.reload_il {
                    self.list(host, 0, 0);
                }
            }
            Opcode::MarkEmpty => {
                self.cold_start(0);
                if self.trace.verbosity > 0 {
                    self.show_subs(host);
                    self.show_ex_st(host);
                    self.show_vars(host, 0);
                }
            }
            Opcode::Execute => {
                self.xq_here = self.ilpc;
                self.bp = self.core.peek2(USER_PROG);
                self.lino = self.core.peek2(self.bp);
                self.bp = self.bp.wrapping_add(2);
                if self.lino == 0 {
                    return Err(error!(UndefinedLine; "EMPTY PROGRAM"));
                }
                self.trace.log_line(self.lino as i32);
                if self.trace.verbosity > 0 {
                    self.out_str(host, " [#");
                    self.out_int(host, self.lino as i32);
                    self.ouch(host, 0x5D);
                }
            }
            Opcode::WarmStop => {
                self.warm_start();
                if self.trace.verbosity > 0 {
                    self.show_subs(host);
                }
            }
            Opcode::UsrCall => return self.usr_step(host),
            Opcode::SubReturn => {
                let back = self.pop_sub(host)?;
                let front = self.core.peek2(IL_FRONT);
                if back < front || back >= self.il_end {
                    return Err(error!(BadSubroutine; "RETURN OUTSIDE IL"));
                }
                self.ilpc = back;
                self.trace.log_it(-(self.ilpc as i32));
            }
            Opcode::Call(op) => {
                let back = self.ilpc.wrapping_add(1);
                self.push_sub(host, back)?;
                let target = ((op as u16 & 0x07) << 8) | self.core.peek(self.ilpc) as u16;
                self.ilpc = target.wrapping_add(self.core.peek2(IL_FRONT));
                self.trace.log_it(-(self.ilpc as i32));
            }
            Opcode::Jump(op) => {
                let target = ((op as u16 & 0x07) << 8) | self.core.peek(self.ilpc) as u16;
                self.ilpc = target.wrapping_add(self.core.peek2(IL_FRONT));
                self.trace.log_it(-(self.ilpc as i32));
            }
            Opcode::Relative(op) => {
                if op == 0x60 {
                    return Err(error!(BranchOffset));
                }
                self.ilpc = (self.ilpc as i32 + op as i32 - 0x60) as Address;
                self.trace.log_it(-(self.ilpc as i32));
            }
            Opcode::MatchString(op) => {
                let fail = if op == 0x80 {
                    0
                } else {
                    self.ilpc.wrapping_add((op & 0x1F) as u16)
                };
                let chpt = self.bp;
                loop {
                    while self.core.peek(self.bp) == 0x20 {
                        self.bp = self.bp.wrapping_add(1);
                    }
                    let want = self.core.peek(self.ilpc);
                    self.ilpc = self.ilpc.wrapping_add(1);
                    let got = self.core.peek(self.bp);
                    self.bp = self.bp.wrapping_add(1);
                    if want & 0x7F != upper(got) {
                        self.bp = chpt;
                        if fail == 0 {
                            return Err(error!(BranchOffset; "NO KEYWORD MATCH"));
                        }
                        self.ilpc = fail;
                        break;
                    }
                    if want & 0x80 != 0 {
                        break;
                    }
                }
                self.trace.log_it(-(self.ilpc as i32));
            }
            Opcode::TestVariable(op) => {
                while self.core.peek(self.bp) == 0x20 {
                    self.bp = self.bp.wrapping_add(1);
                }
                let ch = upper(self.core.peek(self.bp));
                if ch > 0x40 && ch < 0x5B {
                    self.bp = self.bp.wrapping_add(1);
                    self.push_ex_byte(host, (ch & 0x5F).wrapping_mul(2))?;
                } else if op == 0xA0 {
                    return Err(error!(BranchOffset; "VARIABLE EXPECTED"));
                } else {
                    self.ilpc = self.ilpc.wrapping_add((op - 0xA0) as u16);
                    self.trace.log_it(-(self.ilpc as i32));
                }
            }
            Opcode::TestNumber(op) => {
                while self.core.peek(self.bp) == 0x20 {
                    self.bp = self.bp.wrapping_add(1);
                }
                let ch = self.core.peek(self.bp);
                if ch > 0x2F && ch < 0x3A {
                    let mut valu: u16 = 0;
                    loop {
                        let ch = self.core.peek(self.bp);
                        if ch == 0x20 {
                            self.bp = self.bp.wrapping_add(1);
                            continue;
                        }
                        if ch < 0x30 || ch > 0x39 {
                            break;
                        }
                        valu = valu.wrapping_mul(10).wrapping_add((ch & 0x0F) as u16);
                        self.bp = self.bp.wrapping_add(1);
                    }
                    self.push_ex_int(host, valu)?;
                } else if op == 0xC0 {
                    return Err(error!(BranchOffset; "NUMBER EXPECTED"));
                } else {
                    self.ilpc = self.ilpc.wrapping_add((op - 0xC0) as u16);
                    self.trace.log_it(-(self.ilpc as i32));
                }
            }
            Opcode::TestEndline(op) => {
                while self.core.peek(self.bp) == 0x20 {
                    self.bp = self.bp.wrapping_add(1);
                }
                if self.core.peek(self.bp) == 0x0D {
                    // leave the CR for NX to test
                } else if op == 0xE0 {
                    return Err(error!(BranchOffset; "END OF LINE EXPECTED"));
                } else {
                    self.ilpc = self.ilpc.wrapping_add((op - 0xE0) as u16);
                    self.trace.log_it(-(self.ilpc as i32));
                }
            }
        }
        Ok(Flow::Continue)
    }

    /// GL: read one line into the input buffer, with backspace and
    /// cancel editing. Suspends (resumably) when input runs dry.
    fn get_line<H: Host>(&mut self, host: &mut H) -> Result<Flow> {
        if !self.pending_input {
            self.in_lend = IN_LINE;
        }
        self.pending_input = false;
        loop {
            let mut ch = match self.take_char(host) {
                Some(ch) => ch,
                None => {
                    // back onto the GL opcode so interpret resumes here
                    self.pending_input = true;
                    self.ilpc = self.ilpc.wrapping_sub(1);
                    return Ok(Flow::Await);
                }
            };
            if ch == 0x0D {
                break;
            }
            if ch == 0x09 {
                // tab toggles opcode tracing, then lands as a space
                self.trace.verbosity ^= 1;
                ch = 0x20;
            } else if ch == self.core.peek(BS_CODE) {
                if self.in_lend > IN_LINE {
                    self.in_lend -= 1;
                } else {
                    self.ouch(host, 0x0D);
                    break;
                }
                continue;
            } else if ch == self.core.peek(CAN_CODE) {
                self.in_lend = IN_LINE;
                self.ouch(host, 0x0D);
                break;
            } else if ch < 0x20 || ch > 0x7E {
                continue;
            }
            if self.in_lend > self.expn_top.wrapping_sub(2) {
                // buffer full, discard
                continue;
            }
            self.core.poke(self.in_lend, ch);
            self.in_lend = self.in_lend.wrapping_add(1);
        }
        while self.in_lend > IN_LINE && self.core.peek(self.in_lend - 1) == 0x20 {
            self.in_lend -= 1;
        }
        self.core.poke(self.in_lend, 0x0D);
        self.in_lend = self.in_lend.wrapping_add(1);
        self.core.poke(self.in_lend, 0);
        self.bp = IN_LINE;
        Ok(Flow::Continue)
    }

    /// US: pop (address, X, A); either call an IL subroutine or one
    /// of the fixed machine-language entry points.
    fn usr_step<H: Host>(&mut self, host: &mut H) -> Result<Flow> {
        self.sync_registers();
        let a = self.pop_ex_int(host)?;
        let x = self.pop_ex_int(host)?;
        let target = self.pop_ex_int(host)?;
        if target >= self.core.peek2(IL_FRONT) && target < self.il_end {
            self.push_ex_int(host, x)?;
            self.push_ex_int(host, a)?;
            let back = self.ilpc;
            self.push_sub(host, back)?;
            self.ilpc = target;
            self.trace.log_it(-(self.ilpc as i32));
            return Ok(Flow::Continue);
        }
        match self.machine_call(host, target, x, a)? {
            Flow::Await => {
                // starved resumably: restore the arguments and back up
                self.push_ex_int(host, target)?;
                self.push_ex_int(host, x)?;
                self.push_ex_int(host, a)?;
                self.ilpc = self.ilpc.wrapping_sub(1);
                Ok(Flow::Await)
            }
            flow => Ok(flow),
        }
    }

    /// The fixed USR targets. Every arm but the two starts leaves one
    /// word, the function result, on the expression stack.
    fn machine_call<H: Host>(
        &mut self,
        host: &mut H,
        target: u16,
        x: u16,
        a: u16,
    ) -> Result<Flow> {
        match target as Address {
            WACH_POINT => {
                self.trace.watcher = x;
                self.trace.watchee = if a > 0x7FFF {
                    // negative: fire on any change from the current value
                    -(self.core.peek(x) as i32) - 0x100
                } else {
                    a as i32
                };
                if self.trace.verbosity > 0 {
                    self.out_ln(host);
                    self.out_str(host, "[Watching ");
                    self.out_hex(host, x as i32, 4);
                    self.ouch(host, 0x5D);
                }
                let seen = self.core.peek(x);
                self.push_ex_int(host, seen as u16)?;
            }
            COLD_GO => self.cold_start(0),
            WARM_GO => self.warm_start(),
            INCH_SUB => match self.take_char(host) {
                Some(ch) => self.push_ex_int(host, ch as u16)?,
                None => return Ok(Flow::Await),
            },
            OUTCH_SUB => {
                self.ouch(host, (a & 0x7F) as u8);
                self.push_ex_int(host, 0)?;
            }
            BREAK_SUB => {
                let broke = host.break_requested() as u16;
                self.push_ex_int(host, broke)?;
            }
            PEEK_SUB => {
                let valu = self.core.peek(x);
                self.push_ex_int(host, valu as u16)?;
            }
            PEEK2_SUB => {
                let valu = self.core.peek2(x);
                self.push_ex_int(host, valu)?;
            }
            POKE_SUB => {
                let valu = a & 0xFF;
                self.core.poke(x, valu as u8);
                self.push_ex_int(host, valu)?;
                self.trace.log_it(((valu as i32 + 0x100) << 16) + x as i32);
                // user code may have moved the registers
                self.lino = self.core.peek2(LINO_CORE);
                self.ilpc = self.core.peek2(ILPC_CORE);
                self.bp = self.core.peek2(BP_CORE);
                self.svpt = self.core.peek2(SVPT_CORE);
                if self.ilpc == 0 {
                    self.reload_il = true;
                }
            }
            DUMP_SUB => {
                self.show_mem_dump(host, x, a);
                self.push_ex_int(host, x.wrapping_add(a))?;
            }
            TRLOG_SUB => {
                self.show_log(host);
                let count = self.trace.entries();
                self.push_ex_int(host, count)?;
            }
            _ => return Err(error!(BadSubroutine)),
        }
        Ok(Flow::Continue)
    }

    /// Call a fixed USR target from the host side, outside any IL.
    /// Returns the function result, or `None` when the target leaves
    /// nothing (the starts) or prints a diagnostic instead.
    pub fn usr_call<H: Host>(&mut self, host: &mut H, target: u16, x: u16, a: u16) -> Option<u16> {
        self.sync_registers();
        match self.machine_call(host, target, x, a) {
            Ok(Flow::Continue) if self.expression_depth() >= 2 => self.pop_ex_int(host).ok(),
            Ok(_) => None,
            Err(err) => {
                self.recover(host, err);
                None
            }
        }
    }

    /// Print the error diagnostic and unwind to command mode. Errors
    /// raised while a restart is already pending are swallowed, so
    /// recovery never cascades.
    pub(super) fn recover<H: Host>(&mut self, host: &mut H, error: Error) {
        if self.reload_il {
            return;
        }
        self.trace.log_it(-(self.ilpc as i32) - 0x8000);
        let offset = self.ilpc.wrapping_sub(self.core.peek2(IL_FRONT));
        self.out_ln(host);
        self.out_str(host, "! ");
        self.out_int(host, offset as i32);
        if self.lino > 0 {
            self.out_str(host, " AT #");
            self.out_int(host, self.lino as i32);
        }
        self.out_ln(host);
        if self.trace.verbosity > 0 {
            let text = error.to_string();
            self.ouch(host, 0x5B);
            self.out_str(host, &text);
            self.ouch(host, 0x5D);
            self.show_subs(host);
            self.show_ex_st(host);
            self.show_vars(host, 0);
            self.out_ln(host);
            self.out_str(host, "[BP=");
            self.out_hex(host, self.bp as i32, 4);
            self.out_str(host, " Prog=");
            self.out_hex(host, self.core.peek2(USER_PROG) as i32, 4);
            self.out_str(host, " IL=");
            self.out_hex(host, self.core.peek2(IL_FRONT) as i32, 4);
            self.ouch(host, 0x5D);
            let dump = self.bp.wrapping_sub(30) & 0xFF00;
            self.show_mem_dump(host, dump, 0x100);
        }
        self.lino = 0;
        self.expn_top = EXPN_STK;
        self.bp = IN_LINE;
        self.reload_il = true;
    }

    /// Mirror the register file into its fixed core addresses, where
    /// peek/poke user code expects to see it.
    fn sync_registers(&mut self) {
        self.core.poke2(LINO_CORE, self.lino);
        self.core.poke2(ILPC_CORE, self.ilpc);
        self.core.poke2(BP_CORE, self.bp);
        self.core.poke2(SVPT_CORE, self.svpt);
    }

    /// Next input character: queued typeahead first, then the host.
    /// Linefeeds arrive as CR.
    fn take_char<H: Host>(&mut self, host: &mut H) -> Option<u8> {
        let ch = match self.typeahead.pop_front() {
            Some(ch) => ch,
            None => host.char_in()?,
        };
        if ch == 0x0A {
            self.core.poke(TAB_HERE, 0);
            Some(0x0D)
        } else {
            Some(ch)
        }
    }

    /// Emit one character. CR becomes a newline and resets the output
    /// column; other control characters are dropped.
    pub(super) fn ouch<H: Host>(&mut self, host: &mut H, ch: u8) {
        if ch == 0x0D {
            self.core.poke(TAB_HERE, 0);
            host.char_out(0x0A);
        } else if ch >= 0x20 && ch <= 0x7E {
            let col = self.core.peek(TAB_HERE).wrapping_add(1);
            self.core.poke(TAB_HERE, col);
            host.char_out(ch);
        }
    }

    pub(super) fn out_ln<H: Host>(&mut self, host: &mut H) {
        self.ouch(host, 0x0D);
    }

    pub(super) fn out_str<H: Host>(&mut self, host: &mut H, text: &str) {
        for ch in text.bytes() {
            self.ouch(host, ch);
        }
    }

    /// Signed decimal, no padding.
    pub(super) fn out_int<H: Host>(&mut self, host: &mut H, num: i32) {
        let mut num = num;
        if num < 0 {
            self.ouch(host, 0x2D);
            num = -num;
        }
        let mut digits = [0u8; 10];
        let mut nd = 0;
        loop {
            digits[nd] = 0x30 + (num % 10) as u8;
            num /= 10;
            nd += 1;
            if num == 0 {
                break;
            }
        }
        while nd > 0 {
            nd -= 1;
            self.ouch(host, digits[nd]);
        }
    }

    /// Fixed-width hex, `nd` digits.
    pub(super) fn out_hex<H: Host>(&mut self, host: &mut H, num: i32, nd: u32) {
        for shift in (0..nd).rev() {
            let digit = ((num >> (shift * 4)) & 0x0F) as u8;
            self.ouch(host, if digit > 9 { digit + 0x37 } else { digit + 0x30 });
        }
    }

    /// Current BASIC line number; 0 in command mode.
    pub fn line_number(&self) -> u16 {
        self.lino
    }

    pub fn verbosity(&self) -> u8 {
        self.trace.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: u8) {
        self.trace.verbosity = verbosity;
    }

    pub fn peek(&self, loc: Address) -> u8 {
        self.core.peek(loc)
    }

    pub fn poke(&mut self, loc: Address, valu: u8) {
        self.core.poke(loc, valu);
    }

    pub fn peek2(&self, loc: Address) -> u16 {
        self.core.peek2(loc)
    }

    pub fn poke2(&mut self, loc: Address, valu: u16) {
        self.core.poke2(loc, valu);
    }
}

impl Default for Vm {
    fn default() -> Self {
        Vm::new()
    }
}

/// ASCII fold to upper case; everything else unchanged.
fn upper(ch: u8) -> u8 {
    if ch > 0x60 && ch < 0x7B {
        ch & 0x5F
    } else {
        ch & 0x7F
    }
}
