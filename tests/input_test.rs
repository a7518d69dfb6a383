mod common;
use common::*;
use tinybasic::mach::{Event, Vm};

#[test]
fn test_input_suspends_and_resumes() {
    let mut vm = Vm::default();
    let mut console = Console::new();
    enter(&mut vm, &mut console, "10 INPUT A");
    enter(&mut vm, &mut console, "20 PRINT A*A");
    enter(&mut vm, &mut console, "30 END");
    assert_eq!(enter(&mut vm, &mut console, "RUN"), "? ");
    assert_eq!(enter(&mut vm, &mut console, "12"), "144\n");
}

#[test]
fn test_input_expression() {
    let mut vm = Vm::default();
    let mut console = Console::new();
    enter(&mut vm, &mut console, "10 INPUT A");
    enter(&mut vm, &mut console, "20 PRINT A");
    enter(&mut vm, &mut console, "30 END");
    enter(&mut vm, &mut console, "RUN");
    // INPUT takes any expression, not just a number
    assert_eq!(enter(&mut vm, &mut console, "2+3"), "5\n");
}

#[test]
fn test_input_loop() {
    let mut vm = Vm::default();
    let mut console = Console::new();
    enter(&mut vm, &mut console, "10 INPUT A");
    enter(&mut vm, &mut console, "20 PRINT A");
    enter(&mut vm, &mut console, "30 GOTO 10");
    enter(&mut vm, &mut console, "RUN");
    assert_eq!(enter(&mut vm, &mut console, "1"), "1\n? ");
    assert_eq!(enter(&mut vm, &mut console, "2"), "2\n? ");
}

#[test]
fn test_typeahead_splits_into_lines() {
    let mut vm = Vm::default();
    let mut console = Console::new();
    // one call can carry several CR-separated lines
    let event = vm.run_line(&mut console, "10 PRINT 8\r20 END\rRUN");
    assert_eq!(event, Event::AwaitingInput);
    let text = String::from_utf8_lossy(&console.out).to_string();
    assert!(text.contains("8\n"), "got {:?}", text);
}
