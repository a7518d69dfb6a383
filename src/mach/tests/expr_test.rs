use super::*;

#[test]
fn test_print_arithmetic() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "PRINT 1+2"), "3\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT 2+3*4"), "14\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT 10-4/2"), "8\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT (1+2)*3"), "9\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT -5"), "-5\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT 7/2"), "3\n");
}

#[test]
fn test_print_strings() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "PRINT \"HELLO WORLD\""), "HELLO WORLD\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT \"A\";\"B\""), "AB\n");
    // trailing semicolon suppresses the newline
    assert_eq!(enter(&mut vm, &mut host, "PRINT \"A\";"), "A");
}

#[test]
fn test_print_comma_tabs() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    // prompt takes column 1, so "1" lands in column 2 and the comma
    // pads with spaces through column 8
    assert_eq!(enter(&mut vm, &mut host, "PRINT 1,2"), "1      2\n");
}

#[test]
fn test_variables() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "LET A=5"), "");
    assert_eq!(enter(&mut vm, &mut host, "PRINT A"), "5\n");
    // LET keyword is optional
    assert_eq!(enter(&mut vm, &mut host, "B=A*2"), "");
    assert_eq!(enter(&mut vm, &mut host, "PRINT B"), "10\n");
    // unset variables read as zero
    assert_eq!(enter(&mut vm, &mut host, "PRINT Z"), "0\n");
}

#[test]
fn test_variables_fold_case() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "let q=7"), "");
    assert_eq!(enter(&mut vm, &mut host, "PRINT Q"), "7\n");
}

#[test]
fn test_if_comparisons() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "IF 1<2 THEN PRINT 1"), "1\n");
    assert_eq!(enter(&mut vm, &mut host, "IF 2<1 THEN PRINT 1"), "");
    assert_eq!(enter(&mut vm, &mut host, "IF 2=2 THEN PRINT 2"), "2\n");
    assert_eq!(enter(&mut vm, &mut host, "IF 2<>2 THEN PRINT 2"), "");
    assert_eq!(enter(&mut vm, &mut host, "IF 3>=3 THEN PRINT 3"), "3\n");
    // THEN is a noiseword
    assert_eq!(enter(&mut vm, &mut host, "IF 1<2 PRINT 4"), "4\n");
}

#[test]
fn test_negative_compare() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    assert_eq!(enter(&mut vm, &mut host, "LET A=0-5"), "");
    assert_eq!(enter(&mut vm, &mut host, "IF A<0 THEN PRINT 1"), "1\n");
}

#[test]
fn test_divide_by_zero() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    // diagnostic is the IL offset of the opcode after DV
    assert_eq!(enter(&mut vm, &mut host, "PRINT 1/0"), "\n! 224\n");
    // the machine recovers; next command runs normally
    assert_eq!(enter(&mut vm, &mut host, "PRINT 5"), "5\n");
}

#[test]
fn test_rnd_sequence() {
    let mut vm = Vm::default();
    let mut host = TestHost::new();
    // seeded from a zeroed core, the generator is deterministic
    assert_eq!(enter(&mut vm, &mut host, "PRINT RND(10)"), "9\n");
    assert_eq!(enter(&mut vm, &mut host, "PRINT RND(10)"), "6\n");
}
