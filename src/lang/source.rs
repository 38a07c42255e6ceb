use std::{
    collections::VecDeque,
    fs::File,
    io::{self, stdin, stdout, BufRead, BufReader, Write},
};

/// A line-oriented input to the interpreter.
///
/// The interpreter itself only ever asks for the next logical line, everything else about the
/// input is hidden in here.  An interactive source shows a prompt before reading, a file
/// source echoes every line back so a scripted session reads like a transcript, and a script
/// source hands out pre-supplied lines silently for the tests.
pub struct Source {
    input: SourceInput,
}

enum SourceInput {
    /// The user's terminal.
    Interactive(io::Stdin),

    /// A file opened by the command line or the load word.
    File(BufReader<File>),

    /// An in-memory list of lines.
    Script(VecDeque<String>),
}

impl Source {
    /// Create a source reading from the terminal.
    pub fn interactive() -> Source {
        Source {
            input: SourceInput::Interactive(stdin()),
        }
    }

    /// Create a source reading from a file.  The file is closed when the source is dropped.
    pub fn from_file(path: &str) -> io::Result<Source> {
        let file = File::open(path)?;

        Ok(Source {
            input: SourceInput::File(BufReader::new(file)),
        })
    }

    /// Create a source from in-memory text, one source line per text line.
    pub fn from_script(text: &str) -> Source {
        Source {
            input: SourceInput::Script(text.lines().map(|line| line.to_string()).collect()),
        }
    }

    /// Read the next logical line, without its trailing newline.  Returns `None` once the
    /// input is exhausted.
    ///
    /// Interactive sources print a `"> "` prompt first when asked to, which the interpreter
    /// does for fresh lines but not for the continuation lines pulled by structured words.
    /// File sources echo `"> <line>"` after the read regardless, so output produced while
    /// loading can be matched up with the code that produced it.
    pub fn read_line(&mut self, prompt: bool) -> Option<String> {
        match &mut self.input {
            SourceInput::Interactive(input) => {
                if prompt {
                    print!("> ");
                    let _ = stdout().flush();
                }

                let mut line = String::new();

                match input.read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => Some(line.trim_end_matches(['\n', '\r']).to_string()),
                }
            }

            SourceInput::File(reader) => {
                let mut line = String::new();

                match reader.read_line(&mut line) {
                    Ok(0) | Err(_) => None,
                    Ok(_) => {
                        let line = line.trim_end_matches(['\n', '\r']).to_string();
                        println!("> {}", line);

                        Some(line)
                    }
                }
            }

            SourceInput::Script(lines) => lines.pop_front(),
        }
    }
}
