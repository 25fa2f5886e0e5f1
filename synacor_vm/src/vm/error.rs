use thiserror::Error;

/// The kind of fault raised while decoding or executing an instruction,
/// without the context of which instruction raised it. `Fault` pairs this
/// with that context.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    #[error("unknown opcode")]
    UnknownOpcode,

    #[error("invalid operand word {0:#06x}")]
    InvalidOperand(u16),

    #[error("expected a register operand but found literal {0:#06x}")]
    ExpectedRegister(u16),

    #[error("pop from an empty stack")]
    StackUnderflow,

    #[error("mod by zero")]
    DivideByZero,

    #[error("address {0:#06x} is out of range")]
    AddressOutOfRange(u16),
}

/// A fault is a non-recoverable condition raised while decoding or executing
/// an instruction. Faults propagate out of `Vm::step`/`Vm::run` and
/// terminate the run; they are distinct from the non-fault terminal states
/// `Halted` and `EndOfMemory`.
///
/// Every fault carries the word and address of the instruction that was
/// executing when it happened, not just the `kind` of failure, so a caller
/// can always report which instruction faulted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} (opcode word {opcode_word:#06x} at address {address:#06x})")]
pub struct Fault {
    pub kind: FaultKind,
    pub opcode_word: u16,
    pub address: u16,
}
