use synacor_machine::{ExitStatus, FaultKind, Machine, VecIo};

fn image_from_words(words: &[u16]) -> synacor_image::image::Image {
    let bytes: Vec<u8> = words.iter().flat_map(|word| word.to_le_bytes()).collect();
    synacor_image::image::Image::from_bytes(&bytes).unwrap()
}

#[test]
fn halt_first_word() {
    let image = image_from_words(&[0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    assert_eq!(machine.run(&mut io), Ok(ExitStatus::Halted));
    assert!(io.output.is_empty());
}

#[test]
fn print_a_and_halt() {
    let image = image_from_words(&[19, 65, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    assert_eq!(machine.run(&mut io), Ok(ExitStatus::Halted));
    assert_eq!(io.output_as_string(), "A");
}

#[test]
fn load_register_and_print() {
    // set R0=66, out R0, halt
    let image = image_from_words(&[1, 32768, 66, 19, 32768, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    assert_eq!(io.output_as_string(), "B");
}

#[test]
fn conditional_jump_taken_skips_the_output() {
    // jt 1 -> 5; 5 is the halt
    let image = image_from_words(&[7, 1, 5, 19, 88, 0, 19, 89, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    assert!(io.output.is_empty());
}

#[test]
fn conditional_jump_not_taken_falls_through_to_the_output() {
    let image = image_from_words(&[7, 0, 5, 19, 88, 0, 19, 89, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    assert_eq!(io.output_as_string(), "X");
}

#[test]
fn add_modulo_wraps_around() {
    // R0 := (32767+2) mod 32768 = 1 -> out -> halt
    let image = image_from_words(&[9, 32768, 32767, 2, 19, 32768, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    assert_eq!(io.output, vec![1]);
}

#[test]
fn call_ret_round_trip_halts_with_an_empty_stack() {
    // call 4 (ret), which pops return address 3 and halts via the 0 at address 3
    let image = image_from_words(&[17, 4, 0, 0, 18]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    assert_eq!(machine.run(&mut io), Ok(ExitStatus::Halted));
    assert!(machine.vm().stack.is_empty());
}

#[test]
fn pop_on_empty_stack_faults() {
    let image = image_from_words(&[3, 32768]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    let fault = machine.run(&mut io).unwrap_err();
    assert_eq!(fault.kind, FaultKind::StackUnderflow);
    assert_eq!(fault.opcode_word, 3);
    assert_eq!(fault.address, 0);
}

#[test]
fn mod_with_zero_divisor_faults() {
    let image = image_from_words(&[11, 32768, 5, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    let fault = machine.run(&mut io).unwrap_err();
    assert_eq!(fault.kind, FaultKind::DivideByZero);
}

#[test]
fn set_with_a_literal_first_operand_faults() {
    let image = image_from_words(&[1, 5, 10]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    let fault = machine.run(&mut io).unwrap_err();
    assert_eq!(fault.kind, FaultKind::ExpectedRegister(5));
}

#[test]
fn operand_word_32776_faults() {
    let image = image_from_words(&[19, 32776]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    let fault = machine.run(&mut io).unwrap_err();
    assert_eq!(fault.kind, FaultKind::InvalidOperand(32776));
}

#[test]
fn a_multi_operand_instruction_near_the_top_of_memory_faults_instead_of_panicking() {
    // add at the last valid address: its operand words would fall past
    // the end of the 32768-word memory array.
    let mut words = vec![0u16; 32767];
    words.push(9);
    let image = image_from_words(&words);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    let fault = machine.run(&mut io).unwrap_err();
    assert_eq!(fault.kind, FaultKind::AddressOutOfRange(32768));
    assert_eq!(fault.address, 32767);
}

#[test]
fn eq_and_gt_and_mult_and_and_or_and_not_compute_correctly() {
    // eq r0 4 4; gt r1 5 4; mult r2 20000 20000; and r3 12 10; or r4 12 10;
    // not r5 0; out r0..r5 isn't needed -- inspect registers directly.
    let image = image_from_words(&[
        4, 32768, 4, 4, 5, 32769, 5, 4, 10, 32770, 20000, 20000, 12, 32771, 12, 10, 13, 32772,
        12, 10, 14, 32773, 0,
    ]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    let vm = machine.vm();

    assert_eq!(vm.registers[0], 1);
    assert_eq!(vm.registers[1], 1);
    assert_eq!(vm.registers[2], (20000u32 * 20000u32 % 32768) as u16);
    assert_eq!(vm.registers[3], 12 & 10);
    assert_eq!(vm.registers[4], 12 | 10);
    assert_eq!(vm.registers[5], 0x7FFF);
}

#[test]
fn rmem_reads_the_highest_valid_address() {
    // wmem 32767 42; rmem r0 32767; out r0; halt
    let image = image_from_words(&[16, 32767, 42, 15, 32768, 32767, 19, 32768, 0]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    machine.run(&mut io).unwrap();
    assert_eq!(io.output, vec![42]);
}

#[test]
fn jmp_to_32767_runs_the_cell_stored_there_in_place() {
    // wmem 32767 0 (halt); jmp 32767
    let image = image_from_words(&[16, 32767, 0, 6, 32767]);
    let mut machine = Machine::with_image(&image);
    let mut io = VecIo::new();

    assert_eq!(machine.run(&mut io), Ok(ExitStatus::Halted));
}
