use super::*;

#[test]
fn test_insert_and_list() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "10 PRINT 1+2"), "");
    assert_eq!(enter(&mut vm, &mut host, "20 END"), "");
    assert_eq!(
        enter(&mut vm, &mut host, "LIST"),
        "10 PRINT 1+2\n20 END\n\n"
    );
}

#[test]
fn test_lines_stay_sorted() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "30 END");
    enter(&mut vm, &mut host, "10 PRINT 1");
    enter(&mut vm, &mut host, "20 PRINT 2");
    assert_eq!(
        enter(&mut vm, &mut host, "LIST"),
        "10 PRINT 1\n20 PRINT 2\n30 END\n\n"
    );
}

#[test]
fn test_replace_and_delete() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1");
    enter(&mut vm, &mut host, "20 END");
    enter(&mut vm, &mut host, "10 PRINT 9");
    assert_eq!(
        enter(&mut vm, &mut host, "LIST"),
        "10 PRINT 9\n20 END\n\n"
    );
    // a bare line number deletes
    enter(&mut vm, &mut host, "10");
    assert_eq!(enter(&mut vm, &mut host, "LIST"), "20 END\n\n");
    // deleting a line that is not there changes nothing
    enter(&mut vm, &mut host, "15");
    assert_eq!(enter(&mut vm, &mut host, "LIST"), "20 END\n\n");
}

#[test]
fn test_list_range() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1");
    enter(&mut vm, &mut host, "20 PRINT 2");
    enter(&mut vm, &mut host, "30 END");
    assert_eq!(enter(&mut vm, &mut host, "LIST 20"), "20 PRINT 2\n\n");
    assert_eq!(
        enter(&mut vm, &mut host, "LIST 10,20"),
        "10 PRINT 1\n20 PRINT 2\n\n"
    );
}

#[test]
fn test_line_zero_rejected() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "0 PRINT 1"), "\n! 9\n");
    assert_eq!(enter(&mut vm, &mut host, "LIST"), "\n");
}

#[test]
fn test_run() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1+2");
    enter(&mut vm, &mut host, "20 END");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "3\n");
    // program survives the run
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "3\n");
}

#[test]
fn test_run_empty_program() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "\n! 13\n");
}

#[test]
fn test_run_off_program_end() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1");
    // the line number is already consumed when the end is noticed,
    // so the diagnostic carries no AT
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "1\n\n! 75\n");
}

#[test]
fn test_goto() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 GOTO 40");
    enter(&mut vm, &mut host, "20 PRINT 2");
    enter(&mut vm, &mut host, "30 END");
    enter(&mut vm, &mut host, "40 PRINT 4");
    enter(&mut vm, &mut host, "50 GOTO 20");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "4\n2\n");
}

#[test]
fn test_goto_undefined_line() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 GOTO 99");
    let out = enter(&mut vm, &mut host, "RUN");
    // the line number reported is the missing target
    assert!(out.contains("AT #99"), "got {:?}", out);
}

#[test]
fn test_break_stops_a_loop() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1");
    enter(&mut vm, &mut host, "20 GOTO 10");
    host.break_after = Some(2000);
    let out = enter(&mut vm, &mut host, "RUN");
    assert!(out.starts_with("1\n1\n"), "got {:?}", out);
    assert!(out.contains("*** BREAK ***"), "got {:?}", out);
    // still responsive afterwards
    assert_eq!(enter(&mut vm, &mut host, "PRINT 5"), "5\n");
}

#[test]
fn test_break_truncates_list() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    for i in 1..=20 {
        enter(&mut vm, &mut host, &format!("{} PRINT {}", i * 10, i));
    }
    // land the break on one of the per-line polls mid-listing
    host.break_after = Some(host.polls + 25);
    let out = enter(&mut vm, &mut host, "LIST");
    assert!(out.contains("10 PRINT 1"), "got {:?}", out);
    assert!(!out.contains("200 PRINT"), "got {:?}", out);
    // still responsive afterwards
    assert_eq!(enter(&mut vm, &mut host, "PRINT 9"), "9\n");
}

#[test]
fn test_gosub_return() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 GOSUB 40");
    enter(&mut vm, &mut host, "20 PRINT 1");
    enter(&mut vm, &mut host, "30 END");
    enter(&mut vm, &mut host, "40 PRINT 2");
    enter(&mut vm, &mut host, "50 RETURN");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "2\n1\n");
}

#[test]
fn test_gosub_overflow() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 GOSUB 10");
    let out = enter(&mut vm, &mut host, "RUN");
    assert!(out.contains("AT #10"), "got {:?}", out);
}

#[test]
fn test_return_without_gosub() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    let out = enter(&mut vm, &mut host, "RETURN");
    assert!(out.starts_with("\n! "), "got {:?}", out);
}

#[test]
fn test_end_in_command_mode() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "END"), "");
}

#[test]
fn test_rem_is_ignored() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 REM NOTHING TO SEE");
    enter(&mut vm, &mut host, "20 PRINT 7");
    enter(&mut vm, &mut host, "30 END");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "7\n");
}

#[test]
fn test_clear_wipes_program() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 PRINT 1");
    enter(&mut vm, &mut host, "CLEAR");
    assert_eq!(enter(&mut vm, &mut host, "LIST"), "\n");
    assert_eq!(vm.program_image(), &[0, 0]);
}

#[test]
fn test_input() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 INPUT A");
    enter(&mut vm, &mut host, "20 PRINT A*2");
    enter(&mut vm, &mut host, "30 END");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "? ");
    assert_eq!(enter(&mut vm, &mut host, "21"), "42\n");
}

#[test]
fn test_input_two_variables() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 INPUT A,B");
    enter(&mut vm, &mut host, "20 PRINT A+B");
    enter(&mut vm, &mut host, "30 END");
    assert_eq!(enter(&mut vm, &mut host, "RUN"), "? ");
    assert_eq!(enter(&mut vm, &mut host, "1,2"), "3\n");
}

#[test]
fn test_backspace_edits_line() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "PRINT 1\x082"), "2\n");
}

#[test]
fn test_cancel_discards_line() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    let out = enter(&mut vm, &mut host, "PRINT 1\x18PRINT 3");
    assert!(out.ends_with("3\n"), "got {:?}", out);
}

#[test]
fn test_empty_line_reprompts() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, ""), "");
    assert_eq!(enter(&mut vm, &mut host, "PRINT 1"), "1\n");
}

#[test]
fn test_keywords_fold_case() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    enter(&mut vm, &mut host, "10 print 3");
    enter(&mut vm, &mut host, "20 end");
    assert_eq!(enter(&mut vm, &mut host, "run"), "3\n");
}
