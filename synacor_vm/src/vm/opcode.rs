use super::error::FaultKind;

/// The 22 opcodes of the architecture, together with the number of operand
/// words each one consumes.
///
/// `Opcode` only knows its own identity and arity; it doesn't know how to
/// execute itself. Dispatch lives in `Vm::execute`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Opcode {
    /// Stop execution and terminate the program.
    Halt,

    /// `set a b` — set register `a` to the value of `b`.
    Set,

    /// `push a` — push `a` onto the stack.
    Push,

    /// `pop a` — remove the top element from the stack and write it into `a`.
    Pop,

    /// `eq a b c` — set `a` to 1 if `b == c`, else 0.
    Eq,

    /// `gt a b c` — set `a` to 1 if `b > c`, else 0.
    Gt,

    /// `jmp a` — jump to `a`.
    Jmp,

    /// `jt a b` — if `a` is nonzero, jump to `b`.
    Jt,

    /// `jf a b` — if `a` is zero, jump to `b`.
    Jf,

    /// `add a b c` — `a := (b + c) mod 32768`.
    Add,

    /// `mult a b c` — `a := (b * c) mod 32768`.
    Mult,

    /// `mod a b c` — `a := b mod c`.
    Mod,

    /// `and a b c` — `a := b & c`.
    And,

    /// `or a b c` — `a := b | c`.
    Or,

    /// `not a b` — `a := ~b`, 15-bit.
    Not,

    /// `rmem a b` — read memory at address `b` and write it to `a`.
    Rmem,

    /// `wmem a b` — write the value from `b` into memory at address `a`.
    Wmem,

    /// `call a` — push the address of the next instruction, then jump to `a`.
    Call,

    /// `ret` — pop the stack and jump to it; on an empty stack, halt.
    Ret,

    /// `out a` — write the character whose code is `a` to the output.
    Out,

    /// `in a` — read a character from the input and write its code to `a`.
    In,

    /// No operation.
    Noop,
}

impl Opcode {
    /// How many operand words follow the opcode word for this instruction.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Halt => 0,
            Opcode::Set => 2,
            Opcode::Push => 1,
            Opcode::Pop => 1,
            Opcode::Eq => 3,
            Opcode::Gt => 3,
            Opcode::Jmp => 1,
            Opcode::Jt => 2,
            Opcode::Jf => 2,
            Opcode::Add => 3,
            Opcode::Mult => 3,
            Opcode::Mod => 3,
            Opcode::And => 3,
            Opcode::Or => 3,
            Opcode::Not => 2,
            Opcode::Rmem => 2,
            Opcode::Wmem => 2,
            Opcode::Call => 1,
            Opcode::Ret => 0,
            Opcode::Out => 1,
            Opcode::In => 1,
            Opcode::Noop => 0,
        }
    }

    /// Decode an opcode word. Returns a bare `FaultKind` on an unassigned
    /// word; the caller attaches the address it was read from.
    pub fn decode(word: u16) -> Result<Opcode, FaultKind> {
        match word {
            0 => Ok(Opcode::Halt),
            1 => Ok(Opcode::Set),
            2 => Ok(Opcode::Push),
            3 => Ok(Opcode::Pop),
            4 => Ok(Opcode::Eq),
            5 => Ok(Opcode::Gt),
            6 => Ok(Opcode::Jmp),
            7 => Ok(Opcode::Jt),
            8 => Ok(Opcode::Jf),
            9 => Ok(Opcode::Add),
            10 => Ok(Opcode::Mult),
            11 => Ok(Opcode::Mod),
            12 => Ok(Opcode::And),
            13 => Ok(Opcode::Or),
            14 => Ok(Opcode::Not),
            15 => Ok(Opcode::Rmem),
            16 => Ok(Opcode::Wmem),
            17 => Ok(Opcode::Call),
            18 => Ok(Opcode::Ret),
            19 => Ok(Opcode::Out),
            20 => Ok(Opcode::In),
            21 => Ok(Opcode::Noop),
            _ => Err(FaultKind::UnknownOpcode),
        }
    }
}
