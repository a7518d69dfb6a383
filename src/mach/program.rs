use super::core::{END_PROG, IN_LINE, USER_PROG};
use super::runtime::Vm;
use super::{Address, Error, Host};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// ## Program space manager
///
/// The stored BASIC program is a run of line records inside the core:
/// a big-endian line number word, the text bytes, a terminating CR.
/// Records sit back-to-back sorted ascending by line number, closed by
/// a sentinel record whose line number is 0. Zero never names a real
/// line, so "find" can report end-of-program without a special case.
/// Edits shift the tail of the program by the size delta, which keeps
/// the image in the exchange format at all times.
impl Vm {
    /// Scan forward from `here` to just past the next `fch`, stopping
    /// at a NUL.
    pub(super) fn skip_to(&self, mut here: Address, fch: u8) -> Address {
        loop {
            let ch = self.core.peek(here);
            here = here.wrapping_add(1);
            if ch == fch {
                return here;
            }
            if ch == 0 {
                return here.wrapping_sub(1);
            }
        }
    }

    /// Address of the first stored line whose number is >= `theline`,
    /// or of the sentinel if none qualifies.
    pub(super) fn find_line(&self, theline: u16) -> Address {
        let mut here = self.core.peek2(USER_PROG);
        loop {
            let ix = self.core.peek2(here);
            if theline <= ix || ix == 0 {
                return here;
            }
            here = self.skip_to(here.wrapping_add(2), 0x0D);
        }
    }

    /// Position the BASIC pointer at the front of line `lino`, or at
    /// the input buffer when `lino` is 0 (command mode).
    pub(super) fn go_to_lino(&mut self) -> Result<()> {
        if self.lino == 0 {
            self.bp = IN_LINE;
            self.trace.log_line(0);
            return Ok(());
        }
        self.trace.log_line(self.lino as i32);
        self.bp = self.find_line(self.lino);
        let here = self.core.peek2(self.bp);
        if here == 0 || self.lino != here {
            return Err(error!(UndefinedLine));
        }
        self.bp = self.bp.wrapping_add(2);
        Ok(())
    }

    /// List stored lines as `<number><space><text>`. `(0, 0)` lists
    /// everything; `(n, 0)` lists exactly line n. The break poll is
    /// honored once per line.
    pub(super) fn list<H: Host>(&mut self, host: &mut H, mut from: u16, mut to: u16) {
        if from == 0 {
            to = 0xFFFF;
            from = 1;
        } else if to == 0 {
            to = from;
        }
        let mut here = self.find_line(from);
        while !host.break_requested() {
            from = self.core.peek2(here);
            if from > to || from == 0 {
                break;
            }
            here = here.wrapping_add(2);
            self.out_int(host, from as i32);
            self.ouch(host, 0x20);
            loop {
                let ch = self.core.peek(here);
                here = here.wrapping_add(1);
                self.ouch(host, ch);
                if ch <= 0x0D {
                    break;
                }
            }
        }
    }

    /// Swap the saved pointer and the BASIC pointer, unless `here` is
    /// inside the input line buffer (then only save). This is the
    /// whole of SB/RB: which register the caller passes decides the
    /// direction.
    pub(super) fn line_swap(&mut self, here: Address) {
        if here < IN_LINE || here >= self.in_lend {
            let here = self.svpt;
            self.svpt = self.bp;
            self.bp = here;
        } else {
            self.svpt = self.bp;
        }
    }

    /// Insert, replace or delete the line numbered `lino`, taking the
    /// text from the BASIC pointer to the end of the input line. Text
    /// of just a CR deletes. Growth that would collide with the gosub
    /// stack is rejected without mutation. A successful edit forces
    /// the interpreter back to command mode.
    pub(super) fn insert_line(&mut self, lino: u16) -> Result<()> {
        self.lino = lino;
        if lino == 0 || (lino as i16) < 0 {
            return Err(error!(UndefinedLine; "LINE NUMBER MUST BE 1..32767"));
        }
        while self.core.peek(self.bp) == 0x20 {
            self.bp = self.bp.wrapping_add(1);
        }
        // ix = bytes to add, op = bytes to delete, as in the listing
        let ix: u16 = if self.core.peek(self.bp) == 0x0D {
            0
        } else {
            self.in_lend.wrapping_sub(self.bp).wrapping_add(2)
        };
        let mut chpt = self.find_line(lino);
        let op: u16 = if self.core.peek2(chpt) == lino {
            self.skip_to(chpt.wrapping_add(2), 0x0D).wrapping_sub(chpt)
        } else {
            0
        };
        if ix == 0 && op == 0 {
            // nothing to add nor delete
            self.lino = 0;
            return Ok(());
        }
        let delta = ix as i32 - op as i32;
        if self.src_end as i32 + delta >= self.sub_stk as i32 {
            return Err(error!(OutOfMemory; "PROGRAM SPACE FULL"));
        }
        self.src_end = (self.src_end as i32 + delta) as u16;
        if delta > 0 {
            // shift the back end right, tail first
            let mut here = self.src_end;
            while {
                here = here.wrapping_sub(1);
                here >= chpt.wrapping_add(ix)
            } {
                let byte = self.core.peek((here as i32 - delta) as u16);
                self.core.poke(here, byte);
            }
        } else if delta < 0 {
            // shift left to close the gap
            let mut here = chpt.wrapping_add(ix);
            while here < self.src_end {
                let byte = self.core.peek((here as i32 - delta) as u16);
                self.core.poke(here, byte);
                here = here.wrapping_add(1);
            }
        }
        if ix > 0 {
            self.core.poke2(chpt, lino);
            chpt = chpt.wrapping_add(1);
            let mut ix = ix;
            while ix > 2 {
                chpt = chpt.wrapping_add(1);
                let byte = self.core.peek(self.bp);
                self.bp = self.bp.wrapping_add(1);
                self.core.poke(chpt, byte);
                ix -= 1;
            }
        }
        self.core.poke2(END_PROG, self.src_end);
        self.reload_il = true;
        self.lino = 0;
        Ok(())
    }

    /// The stored program in the exchange format, sentinel included.
    pub fn program_image(&self) -> &[u8] {
        self.core.view(self.core.peek2(USER_PROG), self.src_end)
    }
}
