use rforth::{
    lang::source::Source,
    runtime::{error::ForthError, interpreter::Interpreter},
};
use std::{env::args, process::ExitCode};

fn main() -> ExitCode {
    let args: Vec<String> = args().collect();
    let mut interpreter = Interpreter::new();

    // With a file argument the whole session is that file, echoed line by line.  Without one
    // we read from the terminal until quit, exit, or end of input.
    if args.len() >= 2 {
        match Source::from_file(&args[1]) {
            Ok(mut source) => interpreter.run(&mut source),

            Err(_) => {
                interpreter
                    .console()
                    .diagnostic(&ForthError::BadLoad(args[1].clone()));

                return ExitCode::FAILURE;
            }
        }
    } else {
        let mut source = Source::interactive();
        interpreter.run(&mut source);
    }

    ExitCode::SUCCESS
}
