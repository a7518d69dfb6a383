use super::{ErrorCode, Event, Host, Vm};

mod expr_test;
mod program_test;

/// Captures output, never has live input (tests feed lines through
/// `run_line`), and can schedule a break after N polls.
pub struct TestHost {
    pub out: Vec<u8>,
    pub break_after: Option<usize>,
    polls: usize,
}

impl TestHost {
    fn new() -> TestHost {
        TestHost {
            out: Vec::new(),
            break_after: None,
            polls: 0,
        }
    }
}

impl Host for TestHost {
    fn char_out(&mut self, ch: u8) {
        self.out.push(ch);
    }
    fn char_in(&mut self) -> Option<u8> {
        None
    }
    fn break_requested(&mut self) -> bool {
        self.polls += 1;
        match self.break_after {
            Some(after) if self.polls >= after => {
                self.break_after = None;
                true
            }
            _ => false,
        }
    }
}

/// Feed one line and return what it printed, colon prompts stripped.
fn enter(vm: &mut Vm, host: &mut TestHost, line: &str) -> String {
    let event = vm.run_line(host, line);
    assert_eq!(event, Event::AwaitingInput);
    let text = String::from_utf8_lossy(&host.out).to_string();
    host.out.clear();
    text.trim_start_matches(':')
        .trim_end_matches(':')
        .to_string()
}
