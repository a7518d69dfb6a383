use super::core::{EXPN_STK, GOSTK_TOP};
use super::runtime::Vm;
use super::Error;
use super::Host;
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// ## Stack manager
///
/// Two inward-growing stacks inside the core. The gosub stack holds
/// words only and grows down from the top of user memory toward the
/// end of the stored program; it carries both BASIC line numbers and
/// IL return addresses, distinguished solely by call-site discipline.
/// The expression stack interleaves bytes and words and grows down
/// from its fixed ceiling toward the end of the input line; callers
/// must match push and pop widths.
///
/// Every primitive is bounds-checked against the live program-text
/// boundary and reports overflow or underflow as an `Err`, which the
/// dispatch loop funnels into recovery. With verbosity raised, each
/// push and pop dumps the affected stack.
impl Vm {
    pub(super) fn push_sub<H: Host>(&mut self, host: &mut H, valu: u16) -> Result<()> {
        if self.sub_stk <= self.src_end {
            return Err(error!(GosubOverflow));
        }
        self.sub_stk -= 2;
        self.core.poke2(GOSTK_TOP, self.sub_stk);
        self.core.poke2(self.sub_stk, valu);
        if self.trace.verbosity > 0 {
            self.show_subs(host);
        }
        Ok(())
    }

    pub(super) fn pop_sub<H: Host>(&mut self, host: &mut H) -> Result<u16> {
        if self.sub_stk >= self.user_end.wrapping_sub(1) {
            return Err(error!(GosubUnderflow));
        }
        if self.trace.verbosity > 0 {
            self.show_subs(host);
        }
        self.sub_stk += 2;
        self.core.poke2(GOSTK_TOP, self.sub_stk);
        Ok(self.core.peek2(self.sub_stk - 2))
    }

    pub(super) fn push_ex_byte<H: Host>(&mut self, host: &mut H, valu: u8) -> Result<()> {
        if self.expn_top <= self.in_lend {
            return Err(error!(ExpressionOverflow));
        }
        self.expn_top -= 1;
        self.core.poke(self.expn_top, valu);
        if self.trace.verbosity > 0 {
            self.show_ex_st(host);
        }
        Ok(())
    }

    pub(super) fn pop_ex_byte<H: Host>(&mut self, host: &mut H) -> Result<u8> {
        if self.expn_top >= EXPN_STK {
            return Err(error!(ExpressionUnderflow));
        }
        if self.trace.verbosity > 0 {
            self.show_ex_st(host);
        }
        let valu = self.core.peek(self.expn_top);
        self.expn_top += 1;
        Ok(valu)
    }

    pub(super) fn push_ex_int<H: Host>(&mut self, host: &mut H, valu: u16) -> Result<()> {
        if self.expn_top < self.in_lend.wrapping_add(2) {
            return Err(error!(ExpressionOverflow));
        }
        self.expn_top -= 2;
        self.core.poke2(self.expn_top, valu);
        if self.trace.verbosity > 0 {
            self.show_ex_st(host);
        }
        Ok(())
    }

    pub(super) fn pop_ex_int<H: Host>(&mut self, host: &mut H) -> Result<u16> {
        if self.expn_top.wrapping_add(2) > EXPN_STK {
            return Err(error!(ExpressionUnderflow));
        }
        if self.trace.verbosity > 0 {
            self.show_ex_st(host);
        }
        let valu = self.core.peek2(self.expn_top);
        self.expn_top += 2;
        Ok(valu)
    }

    /// SX n: exchange the top expression-stack byte with the byte
    /// `depth` bytes in. Depth 0 exchanges the top with itself.
    pub(super) fn exchange_ex<H: Host>(&mut self, host: &mut H, depth: u8) -> Result<()> {
        if depth == 0 {
            return Ok(());
        }
        let other = self.expn_top.wrapping_add(depth as u16);
        if other >= EXPN_STK {
            return Err(error!(ExpressionUnderflow; "SX BELOW STACK DEPTH"));
        }
        let top = self.core.peek(self.expn_top);
        let swap = self.core.peek(other);
        self.core.poke(self.expn_top, swap);
        self.core.poke(other, top);
        if self.trace.verbosity > 0 {
            self.show_ex_st(host);
        }
        Ok(())
    }

    /// Number of bytes currently on the expression stack.
    pub fn expression_depth(&self) -> usize {
        (EXPN_STK - self.expn_top) as usize
    }
}
