pub use synacor_image::image::Image;
pub use synacor_vm::vm::{ExitStatus, Fault, FaultKind, Io, VecIo, Vm};

/// `Machine` pairs a loaded program image with a `Vm` and runs it to
/// completion, so a caller doesn't have to know how an `Image`'s words
/// get into VM memory, only that it can load one and run it.
pub struct Machine {
    vm: Vm,
}

impl Machine {
    pub fn new() -> Machine {
        Machine { vm: Vm::new() }
    }

    pub fn with_image(image: &Image) -> Machine {
        Machine {
            vm: Vm::load(&image.words),
        }
    }

    /// Run the loaded program to completion against `io`.
    pub fn run(&mut self, io: &mut impl Io) -> Result<ExitStatus, Fault> {
        self.vm.run(io)
    }

    pub fn vm(&self) -> &Vm {
        &self.vm
    }
}

impl Default for Machine {
    fn default() -> Machine {
        Machine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_image_loads_the_image_into_vm_memory() {
        let image = Image::from_bytes(&[0, 0]).unwrap();
        let machine = Machine::with_image(&image);

        assert_eq!(machine.vm().memory[0], 0);
    }

    #[test]
    fn run_drives_the_vm_to_completion() {
        // out 65; out 66; halt
        let words: Vec<u16> = vec![19, 65, 19, 66, 0];
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let image = Image::from_bytes(&bytes).unwrap();

        let mut machine = Machine::with_image(&image);
        let mut io = VecIo::new();

        assert_eq!(machine.run(&mut io), Ok(ExitStatus::Halted));
        assert_eq!(io.output_as_string(), "AB");
    }
}
