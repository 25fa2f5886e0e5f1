/// The VM's single serial character I/O channel. `Vm::run`/`Vm::step` stay
/// generic over `Io` so the core never talks to a terminal directly, which
/// is what makes it trivial to test headlessly.
pub trait Io {
    /// Emit one character code, produced by the `out` opcode.
    fn output(&mut self, code: u16);

    /// Return the next character code, for the `in` opcode. Implementations
    /// that have no buffered input left must block until a full line is
    /// available and then hand out its characters one at a time, including
    /// the trailing newline.
    fn input(&mut self) -> u16;
}

/// An in-memory `Io` used for tests: output is captured in a buffer and
/// input is drawn from a pre-loaded queue rather than a real terminal.
#[derive(Default, Debug)]
pub struct VecIo {
    pub output: Vec<u16>,
    pub input: std::collections::VecDeque<u16>,
}

impl VecIo {
    pub fn new() -> VecIo {
        VecIo::default()
    }

    pub fn with_input(mut self, codes: impl IntoIterator<Item = u16>) -> VecIo {
        self.input.extend(codes);
        self
    }

    /// The captured output, decoded as ASCII. Panics on non-ASCII codes;
    /// tests that exercise arbitrary `out` codes should inspect `output`
    /// directly instead.
    pub fn output_as_string(&self) -> String {
        self.output.iter().map(|&code| code as u8 as char).collect()
    }
}

impl Io for VecIo {
    fn output(&mut self, code: u16) {
        self.output.push(code);
    }

    fn input(&mut self) -> u16 {
        self.input
            .pop_front()
            .expect("VecIo ran out of buffered input")
    }
}
