mod error;
mod instruction;
mod io;
mod opcode;
mod operand;

pub use error::{Fault, FaultKind};
pub use instruction::Instruction;
pub use io::{Io, VecIo};
pub use opcode::Opcode;
pub use operand::Operand;

use operand::REGISTER_COUNT;

pub type Result<A> = std::result::Result<A, Fault>;

pub type Address = u16;

/// Size of the address space in words, per the architecture's 15-bit
/// addressing: registers, memory cells and literals all live in `[0, 32768)`.
pub const MEMORY_WORDS: usize = 32768;

/// How a run ended when it didn't fault.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExitStatus {
    /// `halt` executed.
    Halted,

    /// The program counter walked off the end of memory without hitting
    /// `halt`, rather than faulting on a decode.
    EndOfMemory,
}

/// `Vm` emulates the Synacor Challenge architecture: eight registers, a
/// 32768-word memory, an unbounded stack and a single serial I/O channel.
///
/// `Vm` owns its own memory and registers directly rather than through a
/// generic bus — the architecture has no memory-mapped devices, so there's
/// nothing for a bus abstraction to buy here. I/O is the one thing that
/// varies between a real terminal and a test, so that's the one seam made
/// generic, via `Io`.
#[derive(Debug)]
pub struct Vm {
    /// The eight general-purpose registers.
    pub registers: [u16; REGISTER_COUNT as usize],

    /// The full 32768-word address space: program, data and scratch all
    /// share this one array.
    pub memory: Box<[u16; MEMORY_WORDS]>,

    /// The unbounded LIFO stack used by `push`/`pop`/`call`/`ret`.
    pub stack: Vec<u16>,

    /// `pc` is the address of the next instruction to decode.
    pub pc: u16,

    /// Set by `halt`. Once set, `run` stops without decoding any further
    /// instructions.
    pub halted: bool,
}

impl Vm {
    /// A `Vm` with zeroed memory and registers, program counter at 0.
    pub fn new() -> Vm {
        Vm {
            registers: [0; REGISTER_COUNT as usize],
            memory: Box::new([0; MEMORY_WORDS]),
            stack: Vec::new(),
            pc: 0,
            halted: false,
        }
    }

    /// Load a program image into memory starting at address 0. Cells beyond
    /// the image's length stay zeroed. `words` longer than `MEMORY_WORDS` is
    /// a caller error (image loading rejects this before a `Vm` ever exists),
    /// so this only takes as much as fits.
    pub fn load(words: &[u16]) -> Vm {
        let mut vm = Vm::new();
        let len = words.len().min(MEMORY_WORDS);
        vm.memory[..len].copy_from_slice(&words[..len]);
        vm
    }

    /// Decode and execute instructions until the program halts, walks off
    /// the end of memory, or faults.
    pub fn run(&mut self, io: &mut impl Io) -> Result<ExitStatus> {
        loop {
            if self.halted {
                return Ok(ExitStatus::Halted);
            }

            if self.pc as usize >= MEMORY_WORDS {
                return Ok(ExitStatus::EndOfMemory);
            }

            self.step(io)?;
        }
    }

    /// Decode and execute a single instruction at the current `pc`.
    pub fn step(&mut self, io: &mut impl Io) -> Result<()> {
        let (instruction, words_used) = Instruction::decode(self.pc, &self.memory)?;
        self.execute(instruction, words_used, io)
    }

    /// Execute one already-decoded instruction, then attach this
    /// instruction's opcode word and address to any fault it raises, so a
    /// fault always identifies the instruction that caused it (spec'd on
    /// the CLI's one-line fault report).
    fn execute(&mut self, instruction: Instruction, words_used: u16, io: &mut impl Io) -> Result<()> {
        self.execute_kind(instruction, words_used, io)
            .map_err(|kind| Fault {
                kind,
                opcode_word: instruction.opcode_word,
                address: instruction.address,
            })
    }

    fn execute_kind(
        &mut self,
        instruction: Instruction,
        words_used: u16,
        io: &mut impl Io,
    ) -> std::result::Result<(), FaultKind> {
        let operands = instruction.operands;

        // Control-transfer opcodes overwrite `pc` themselves; every other
        // opcode just advances past its operands. Setting the default here
        // and overriding it below keeps each arm focused on its own effect
        // rather than repeating `self.pc = instruction.address + words_used`
        // in every non-branching case.
        self.pc = instruction.address.wrapping_add(words_used);

        match instruction.opcode {
            Opcode::Halt => {
                self.halted = true;
            }

            Opcode::Set => {
                let value = self.read_value(operands[1])?;
                self.write_register(operands[0], value)?;
            }

            Opcode::Push => {
                let value = self.read_value(operands[0])?;
                self.stack.push(value);
            }

            Opcode::Pop => {
                let value = self.stack.pop().ok_or(FaultKind::StackUnderflow)?;
                self.write_register(operands[0], value)?;
            }

            Opcode::Eq => {
                let b = self.read_value(operands[1])?;
                let c = self.read_value(operands[2])?;
                self.write_register(operands[0], (b == c) as u16)?;
            }

            Opcode::Gt => {
                let b = self.read_value(operands[1])?;
                let c = self.read_value(operands[2])?;
                self.write_register(operands[0], (b > c) as u16)?;
            }

            Opcode::Jmp => {
                self.pc = self.read_value(operands[0])?;
            }

            Opcode::Jt => {
                let condition = self.read_value(operands[0])?;
                let target = self.read_value(operands[1])?;
                if condition != 0 {
                    self.pc = target;
                }
            }

            Opcode::Jf => {
                let condition = self.read_value(operands[0])?;
                let target = self.read_value(operands[1])?;
                if condition == 0 {
                    self.pc = target;
                }
            }

            Opcode::Add => {
                let b = self.read_value(operands[1])? as u32;
                let c = self.read_value(operands[2])? as u32;
                self.write_register(operands[0], ((b + c) % MEMORY_WORDS as u32) as u16)?;
            }

            Opcode::Mult => {
                let b = self.read_value(operands[1])? as u32;
                let c = self.read_value(operands[2])? as u32;
                self.write_register(operands[0], ((b * c) % MEMORY_WORDS as u32) as u16)?;
            }

            Opcode::Mod => {
                let b = self.read_value(operands[1])?;
                let c = self.read_value(operands[2])?;
                if c == 0 {
                    return Err(FaultKind::DivideByZero);
                }
                self.write_register(operands[0], b % c)?;
            }

            Opcode::And => {
                let b = self.read_value(operands[1])?;
                let c = self.read_value(operands[2])?;
                self.write_register(operands[0], b & c)?;
            }

            Opcode::Or => {
                let b = self.read_value(operands[1])?;
                let c = self.read_value(operands[2])?;
                self.write_register(operands[0], b | c)?;
            }

            Opcode::Not => {
                let b = self.read_value(operands[1])?;
                self.write_register(operands[0], (!b) & 0x7FFF)?;
            }

            Opcode::Rmem => {
                let address = self.read_value(operands[1])?;
                let value = self.read_memory(address)?;
                self.write_register(operands[0], value)?;
            }

            Opcode::Wmem => {
                let address = self.read_value(operands[0])?;
                let value = self.read_value(operands[1])?;
                self.write_memory(address, value)?;
            }

            Opcode::Call => {
                let return_address = instruction.address.wrapping_add(words_used);
                let target = self.read_value(operands[0])?;
                self.stack.push(return_address);
                self.pc = target;
            }

            Opcode::Ret => match self.stack.pop() {
                Some(address) => self.pc = address,
                None => self.halted = true,
            },

            Opcode::Out => {
                let value = self.read_value(operands[0])?;
                io.output(value);
            }

            Opcode::In => {
                let value = io.input();
                self.write_register(operands[0], value)?;
            }

            Opcode::Noop => {}
        }

        Ok(())
    }

    /// Resolve an operand word to its value: a literal reads as itself, a
    /// register reads as its current contents.
    fn read_value(&self, word: u16) -> std::result::Result<u16, FaultKind> {
        match Operand::decode(word)? {
            Operand::Literal(value) => Ok(value),
            Operand::Register(register) => Ok(self.registers[register as usize]),
        }
    }

    /// Resolve a write-target operand word to a register index and store
    /// `value` there. Rejects literal words; only `decode_register`-shaped
    /// operands may be write targets.
    fn write_register(&mut self, word: u16, value: u16) -> std::result::Result<(), FaultKind> {
        let register = Operand::decode_register(word)?;
        self.registers[register as usize] = value;
        Ok(())
    }

    /// Values produced by `read_value` are always in `[0, 32768)` — every
    /// write to a register or memory cell in this file already stores a
    /// value in that range, so `address` here can never exceed the memory
    /// array's bounds. The check stays in as the defined fault for anyone
    /// who adds a write path that doesn't preserve that invariant.
    fn read_memory(&self, address: u16) -> std::result::Result<u16, FaultKind> {
        if address as usize >= MEMORY_WORDS {
            return Err(FaultKind::AddressOutOfRange(address));
        }
        Ok(self.memory[address as usize])
    }

    fn write_memory(&mut self, address: u16, value: u16) -> std::result::Result<(), FaultKind> {
        if address as usize >= MEMORY_WORDS {
            return Err(FaultKind::AddressOutOfRange(address));
        }
        self.memory[address as usize] = value;
        Ok(())
    }
}

impl Default for Vm {
    fn default() -> Vm {
        Vm::new()
    }
}
