/*!
## Rust Terminal Module

An interactive console wrapped around the machine. Output streams
through the line editor's writer; whatever the machine has printed
since the last newline (the `:` or `? ` prompt) becomes the readline
prompt, so editing happens on the same line the interpreter prompted
on. Ctrl-C raises the machine's break poll.

*/

extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use crate::mach::{Event, Host, Vm};
use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

struct Console {
    term: Arc<Interface<DefaultTerminal>>,
    interrupted: Arc<AtomicBool>,
    line: String,
}

impl Console {
    /// Everything printed since the last newline, surrendered to
    /// serve as the readline prompt.
    fn take_prompt(&mut self) -> String {
        std::mem::take(&mut self.line)
    }
}

impl Host for Console {
    fn char_out(&mut self, ch: u8) {
        if ch == 0x0A {
            let _ = self
                .term
                .write_fmt(format_args!("{}\n", self.line));
            self.line.clear();
        } else {
            self.line.push(ch as char);
        }
    }
    fn char_in(&mut self) -> Option<u8> {
        None
    }
    fn break_requested(&mut self) -> bool {
        self.interrupted.swap(false, Ordering::SeqCst)
    }
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let term = Arc::new(Interface::new("tinybasic")?);
    term.set_report_signal(Signal::Interrupt, true);
    term.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint("TINY BASIC")
    ))?;
    let mut vm = Vm::default();
    let mut console = Console {
        term: term.clone(),
        interrupted,
        line: String::new(),
    };
    let mut pending: Option<String> = None;
    loop {
        let event = match pending.take() {
            Some(line) => vm.run_line(&mut console, &line),
            None => vm.interpret(&mut console),
        };
        match event {
            Event::AwaitingInput => {
                term.set_prompt(&console.take_prompt())?;
                match term.read_line()? {
                    ReadResult::Input(line) => {
                        if !line.trim().is_empty() {
                            term.add_history_unique(line.clone());
                        }
                        pending = Some(line);
                    }
                    ReadResult::Signal(Signal::Interrupt) => {
                        term.cancel_read_line()?;
                        console.interrupted.store(false, Ordering::SeqCst);
                        pending = Some(String::new());
                    }
                    ReadResult::Signal(_) | ReadResult::Eof => break,
                }
            }
            Event::Stopped => {
                term.write_fmt(format_args!(
                    "{}\n",
                    Style::new().bold().paint("MACHINE STOPPED")
                ))?;
                break;
            }
        }
    }
    Ok(())
}
