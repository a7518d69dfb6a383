use super::core::EXPN_STK;
use super::runtime::Vm;
use super::{Address, Host};

/// Ring capacity of the activity log, in entries.
const LOG_SIZE: usize = 0x1000;

/// ## Debug and trace
///
/// A verbosity-gated diagnostic aid, not part of the machine's
/// correctness contract. Verbosity 0 still records the activity log
/// (line transfers, IL jumps, stores, pokes, errors) into a ring that
/// the trace-log USR can replay; verbosity 1 narrates every opcode,
/// stack movement and error; verbosity 2 adds variable dumps on
/// fetch/store. The tab key in the line editor toggles verbosity.
pub struct Trace {
    pub(super) verbosity: u8,
    pub(super) watcher: Address,
    pub(super) watchee: i32,
    log: Vec<i32>,
    log_here: usize,
}

impl Trace {
    pub(super) fn new() -> Trace {
        Trace {
            verbosity: 0,
            watcher: 0,
            watchee: 0,
            log: vec![0; LOG_SIZE],
            log_here: 0,
        }
    }

    /// Insert one coded entry into the activity log. The coding is
    /// positional: below -0x10000 a variable store, -0x10000..-0x8000
    /// an error (IL offset), negative an IL transfer, 0..0x10000 a
    /// BASIC line transfer, above that a poke.
    pub(super) fn log_it(&mut self, valu: i32) {
        self.log[self.log_here & (LOG_SIZE - 1)] = valu;
        self.log_here = self.log_here.wrapping_add(1);
    }

    pub(super) fn log_line(&mut self, lino: i32) {
        self.log_it(lino);
    }

    pub(super) fn entries(&self) -> u16 {
        self.log_here as u16
    }
}

impl Vm {
    /// Display the gosub stack.
    pub(super) fn show_subs<H: Host>(&mut self, host: &mut H) {
        self.out_ln(host);
        self.out_str(host, "[Gosub stack ");
        self.out_hex(host, self.sub_stk as i32, 5);
        let mut ix = self.sub_stk;
        while ix < self.user_end {
            self.ouch(host, 0x20);
            self.out_int(host, self.core.peek2(ix) as i32);
            ix = ix.wrapping_add(2);
        }
        self.ouch(host, 0x5D);
    }

    /// Display the expression stack: words when the top is aligned to
    /// the ceiling, individual bytes otherwise.
    pub(super) fn show_ex_st<H: Host>(&mut self, host: &mut H) {
        self.out_ln(host);
        self.out_str(host, "[Expn stack ");
        self.out_hex(host, self.expn_top as i32, 3);
        if (self.expn_top & 1) == (EXPN_STK & 1) {
            let mut ix = self.expn_top;
            while ix < EXPN_STK {
                self.ouch(host, 0x20);
                self.out_int(host, self.core.peek2(ix) as i32);
                ix = ix.wrapping_add(2);
            }
        } else {
            let mut ix = self.expn_top;
            while ix < EXPN_STK {
                self.ouch(host, 0x2E);
                self.out_int(host, self.core.peek(ix) as i32);
                ix = ix.wrapping_add(1);
            }
        }
        self.ouch(host, 0x5D);
    }

    /// Display one variable by its doubled-ASCII address, or all 26
    /// with runs of zeros elided when `whom` is 0.
    pub(super) fn show_vars<H: Host>(&mut self, host: &mut H, whom: u8) {
        let (mut from, to) = if whom == 0 {
            (1u16, 26u16)
        } else {
            let w = (whom as u16 >> 1) & 0x1F;
            (w, w)
        };
        self.out_ln(host);
        self.out_str(host, "[Vars");
        let mut prior = 1u16;
        while from <= to {
            let valu = self.core.peek2(from * 2 + EXPN_STK);
            if valu != 0 || prior != 0 {
                prior = valu;
                self.ouch(host, 0x0D);
                self.ouch(host, (from as u8) + 0x40);
                self.ouch(host, 0x3D);
                self.out_int(host, valu as i16 as i32);
            } else {
                prior = valu;
            }
            from += 1;
        }
        self.ouch(host, 0x5D);
    }

    /// Hex dump of `nlocs` bytes around `here`, sixteen to a row with
    /// an ASCII gutter. CR shows as backslash, other control
    /// characters as backquote, non-ASCII as tilde.
    pub(super) fn show_mem_dump<H: Host>(&mut self, host: &mut H, here: Address, nlocs: u16) {
        let first = here & 0xFFF0;
        let last = here.wrapping_add(nlocs);
        let mut row = first;
        while row < last || row == first {
            self.out_ln(host);
            self.out_hex(host, row as i32, 4);
            self.ouch(host, 0x3A);
            self.ouch(host, 0x20);
            for ix in 0..16u16 {
                let loc = row.wrapping_add(ix);
                self.ouch(host, 0x20);
                if loc >= here && loc < last {
                    self.out_hex(host, self.core.peek(loc) as i32, 2);
                } else {
                    self.ouch(host, 0x20);
                    self.ouch(host, 0x20);
                }
            }
            self.ouch(host, 0x20);
            self.ouch(host, 0x20);
            for ix in 0..16u16 {
                let loc = row.wrapping_add(ix);
                if loc >= here && loc < last {
                    let ch = self.core.peek(loc);
                    let shown = match ch {
                        0x0D => 0x5C,
                        c if c < 0x20 => 0x60,
                        c if c > 0x7E => 0x7E,
                        c => c,
                    };
                    self.ouch(host, shown);
                }
            }
            match row.checked_add(16) {
                Some(next) => row = next,
                None => break,
            }
            if row >= last {
                break;
            }
        }
        self.out_ln(host);
    }

    /// Format one activity-log entry.
    fn show_log_val<H: Host>(&mut self, host: &mut H, valu: i32) {
        self.out_ln(host);
        if valu < -0x10000 {
            // store to a variable
            self.ouch(host, (((valu >> 17) & 0x1F) as u8) + 0x40);
            self.ouch(host, 0x3D);
            self.out_int(host, (valu & 0x7FFF) - (valu & 0x8000));
        } else if valu < -0x8000 {
            self.out_str(host, "err ");
            self.out_int(host, -valu - 0x8000);
        } else if valu < 0 {
            // IL sequence change
            self.out_str(host, "IL+");
            let front = self.core.peek2(super::core::IL_FRONT) as i32;
            self.out_hex(host, -front - valu, 3);
        } else if valu < 0x10000 {
            // BASIC line transfer
            self.ouch(host, 0x23);
            self.out_int(host, valu);
        } else {
            // poked memory byte
            self.ouch(host, 0x21);
            self.out_hex(host, valu, 4);
            self.ouch(host, 0x3D);
            self.out_int(host, valu >> 0x10);
        }
    }

    /// Replay the activity log, oldest entry first.
    pub(super) fn show_log<H: Host>(&mut self, host: &mut H) {
        self.out_ln(host);
        self.out_str(host, "Log: ");
        self.out_int(host, self.trace.log_here as i32);
        self.out_str(host, " ***");
        let mask = LOG_SIZE - 1;
        let here = self.trace.log_here;
        if here >= LOG_SIZE {
            for ix in (here & mask)..LOG_SIZE {
                let valu = self.trace.log[ix];
                self.show_log_val(host, valu);
            }
        }
        for ix in 0..(here & mask) {
            let valu = self.trace.log[ix];
            self.show_log_val(host, valu);
        }
        self.out_ln(host);
        self.out_str(host, "*****");
        self.out_ln(host);
    }
}
