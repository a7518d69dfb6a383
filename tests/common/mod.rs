use tinybasic::mach::{Event, Host, Vm};

/// Captures everything the machine prints; input arrives only through
/// `enter`, so `char_in` is always dry.
pub struct Console {
    pub out: Vec<u8>,
}

impl Console {
    pub fn new() -> Console {
        Console { out: Vec::new() }
    }
}

impl Host for Console {
    fn char_out(&mut self, ch: u8) {
        self.out.push(ch);
    }
    fn char_in(&mut self) -> Option<u8> {
        None
    }
    fn break_requested(&mut self) -> bool {
        false
    }
}

/// Feed one line and return what it printed, colon prompts stripped.
pub fn enter(vm: &mut Vm, console: &mut Console, line: &str) -> String {
    let event = vm.run_line(console, line);
    assert_eq!(event, Event::AwaitingInput);
    let text = String::from_utf8_lossy(&console.out).to_string();
    console.out.clear();
    text.trim_start_matches(':')
        .trim_end_matches(':')
        .to_string()
}
