use super::error::{Fault, FaultKind};
use super::opcode::Opcode;

/// The maximum number of operand words any opcode in the table takes (`eq`,
/// `gt`, `add`, `mult`, `mod`, `and`, `or` all take three).
const MAX_OPERANDS: usize = 3;

/// Size of the address space in words, matching `super::MEMORY_WORDS` — kept
/// local so `decode`'s signature doesn't need to reach back up for it.
const MEMORY_WORDS: usize = 32768;

/// A fully decoded instruction: an opcode plus its raw operand words, not
/// yet resolved to values or register indices. Resolving operands (literal
/// vs. register, and reading the current register value) happens when the
/// instruction is executed, since some opcodes interpret the same operand
/// word differently (e.g. a write-target operand must be a register).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: [u16; MAX_OPERANDS],
    pub operand_count: usize,

    /// The raw word the opcode was decoded from, kept around so faults
    /// raised while executing this instruction can report it.
    pub opcode_word: u16,

    /// The address of the opcode word itself, used to compute `call`'s
    /// return address and to enrich fault messages.
    pub address: u16,
}

impl Instruction {
    /// Decode the instruction starting at `address` in `memory`. Returns the
    /// instruction together with the number of words consumed (1 for the
    /// opcode, plus one per operand).
    ///
    /// An instruction placed close enough to the top of the address space
    /// can have operand words that would fall at or past address 32768;
    /// `memory` has nothing there to read, so that's a fault
    /// (`AddressOutOfRange`), not a read of zero-filled memory.
    pub fn decode(address: u16, memory: &[u16; MEMORY_WORDS]) -> Result<(Instruction, u16), Fault> {
        let opcode_word = memory[address as usize];
        let fault = |kind: FaultKind| Fault {
            kind,
            opcode_word,
            address,
        };

        let opcode = Opcode::decode(opcode_word).map_err(fault)?;
        let operand_count = opcode.operand_count();

        let mut operands = [0u16; MAX_OPERANDS];
        for (i, slot) in operands.iter_mut().take(operand_count).enumerate() {
            let operand_address = address.wrapping_add(1 + i as u16);
            if operand_address as usize >= MEMORY_WORDS {
                return Err(fault(FaultKind::AddressOutOfRange(operand_address)));
            }
            *slot = memory[operand_address as usize];
        }

        let instruction = Instruction {
            opcode,
            operands,
            operand_count,
            opcode_word,
            address,
        };

        Ok((instruction, 1 + operand_count as u16))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_with(words: &[u16]) -> [u16; 32768] {
        let mut memory = [0u16; 32768];
        memory[..words.len()].copy_from_slice(words);
        memory
    }

    #[test]
    fn decode_reads_no_operands_for_halt() {
        let memory = memory_with(&[0]);
        let (instruction, words_used) = Instruction::decode(0, &memory).unwrap();

        assert_eq!(instruction.opcode, Opcode::Halt);
        assert_eq!(instruction.operand_count, 0);
        assert_eq!(words_used, 1);
    }

    #[test]
    fn decode_reads_three_operands_for_add() {
        let memory = memory_with(&[9, 32768, 1, 2]);
        let (instruction, words_used) = Instruction::decode(0, &memory).unwrap();

        assert_eq!(instruction.opcode, Opcode::Add);
        assert_eq!(&instruction.operands[..3], &[32768, 1, 2]);
        assert_eq!(words_used, 4);
    }

    #[test]
    fn decode_reports_the_address_it_started_from() {
        let memory = memory_with(&[21, 21, 0]);
        let (instruction, _) = Instruction::decode(1, &memory).unwrap();

        assert_eq!(instruction.address, 1);
    }

    #[test]
    fn decode_propagates_unknown_opcode_faults() {
        let memory = memory_with(&[22]);
        let result = Instruction::decode(0, &memory);

        assert_eq!(
            result,
            Err(Fault {
                kind: FaultKind::UnknownOpcode,
                opcode_word: 22,
                address: 0,
            })
        );
    }

    #[test]
    fn decode_faults_instead_of_reading_operand_words_past_the_end_of_memory() {
        // add at the last valid address: its three operands would fall at
        // 32768, 32769 and 32770, past the end of the 32768-word array.
        let mut memory = [0u16; 32768];
        memory[32767] = 9;
        let result = Instruction::decode(32767, &memory);

        assert_eq!(
            result,
            Err(Fault {
                kind: FaultKind::AddressOutOfRange(32768),
                opcode_word: 9,
                address: 32767,
            })
        );
    }
}
