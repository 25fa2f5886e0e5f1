use std::io::{self, BufRead, Write};

use synacor_machine::Io;

/// Connects the VM's `in`/`out` opcodes to the process's real standard
/// input and output.
///
/// `out` writes one character at a time; `in` hands out one buffered
/// character at a time and only blocks on stdin when the buffer runs dry,
/// reading a full line (including the trailing newline) per read so a
/// guest program that consumes input character-by-character doesn't cause
/// a terminal prompt per character.
pub struct TerminalIo {
    stdout: io::Stdout,
    stdin: io::Stdin,
    pending_input: std::collections::VecDeque<u16>,
}

impl TerminalIo {
    pub fn new() -> TerminalIo {
        TerminalIo {
            stdout: io::stdout(),
            stdin: io::stdin(),
            pending_input: std::collections::VecDeque::new(),
        }
    }

    fn fill_input_buffer(&mut self) {
        let mut line = String::new();
        match self.stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF: hand out a newline so a blocking `in` doesn't spin.
                self.pending_input.push_back(b'\n' as u16);
            }
            Ok(_) => {
                self.pending_input
                    .extend(line.bytes().map(|byte| byte as u16));
            }
            Err(error) => panic!("failed to read from stdin: {error}"),
        }
    }
}

impl Default for TerminalIo {
    fn default() -> TerminalIo {
        TerminalIo::new()
    }
}

impl Io for TerminalIo {
    fn output(&mut self, code: u16) {
        let byte = code as u8;
        self.stdout
            .write_all(&[byte])
            .and_then(|_| self.stdout.flush())
            .expect("failed to write to stdout");
    }

    fn input(&mut self) -> u16 {
        if self.pending_input.is_empty() {
            self.fill_input_buffer();
        }

        self.pending_input
            .pop_front()
            .expect("input buffer was refilled but is still empty")
    }
}
