use super::error::FaultKind;

/// Number of general-purpose registers.
pub const REGISTER_COUNT: u16 = 8;

/// Words `0..32768` are literals; `32768..32776` name registers; anything at
/// or above `32776` is an invalid encoding.
const REGISTER_BASE: u16 = 32768;
const REGISTER_LIMIT: u16 = REGISTER_BASE + REGISTER_COUNT;

/// A decoded operand word: either a literal value or a reference to one of
/// the eight registers.
///
/// `Operand` has no side effects and never advances `PC` — it's purely the
/// "what does this word mean" half of the resolver; reading the operand's
/// actual value (which requires the current register file) happens in `Vm`.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Operand {
    Literal(u16),
    Register(u16),
}

impl Operand {
    /// Decode a raw instruction word as an operand. Fails if the word falls
    /// in the unassigned range above the eight register aliases.
    ///
    /// Returns a bare `FaultKind` rather than a `Fault`: this layer doesn't
    /// know which instruction is being decoded, so attaching that context is
    /// the caller's job.
    pub fn decode(word: u16) -> Result<Operand, FaultKind> {
        if word < REGISTER_BASE {
            Ok(Operand::Literal(word))
        } else if word < REGISTER_LIMIT {
            Ok(Operand::Register(word - REGISTER_BASE))
        } else {
            Err(FaultKind::InvalidOperand(word))
        }
    }

    /// Decode a raw instruction word that must name a register (used for
    /// write-target operands like the `a` in `set a b`). Unlike `decode`,
    /// this rejects literals outright rather than accepting them — an
    /// instruction that writes into a literal "register" is a decode fault,
    /// not silently-accepted nonsense.
    pub fn decode_register(word: u16) -> Result<u16, FaultKind> {
        match Operand::decode(word)? {
            Operand::Register(register) => Ok(register),
            Operand::Literal(_) => Err(FaultKind::ExpectedRegister(word)),
        }
    }
}
