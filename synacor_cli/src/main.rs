mod terminal_io;

use log::error;
use synacor_image::image::Image;
use synacor_machine::{ExitStatus, Machine};
use terminal_io::TerminalIo;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let image_path = args.get(1).unwrap_or_else(|| {
        eprintln!("Usage: synacor <program-image>");
        std::process::exit(1);
    });

    let image = Image::from_file(image_path).unwrap_or_else(|error| {
        error!("failed to load program image {image_path}: {error}");
        eprintln!("failed to load program image: {error}");
        std::process::exit(1);
    });

    let mut machine = Machine::with_image(&image);
    let mut io = TerminalIo::new();

    match machine.run(&mut io) {
        Ok(ExitStatus::Halted) => {}
        Ok(ExitStatus::EndOfMemory) => {
            error!("program counter ran off the end of memory without halting");
        }
        Err(fault) => {
            error!("machine fault: {fault}");
            eprintln!("\n{fault}");
            std::process::exit(1);
        }
    }
}
