//! REPL (Read-Eval-Print Loop) with readline support.
//!
//! Every line is played against one shared environment, so variables
//! persist across inputs. Results print in the `D` dump form.

use knight::{play, Environment};
use rustyline::DefaultEditor;

const HISTORY_FILE: &str = ".knight_history";

pub fn run(env: &mut Environment) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(err) => {
            eprintln!("error: cannot start repl: {}", err);
            std::process::exit(1);
        }
    };

    let history = history_file_path();
    let _ = editor.load_history(&history);

    println!("Knight v0.1.0");
    println!("Press ctrl-d to quit");
    println!();

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(_) => break,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = editor.add_history_entry(line);

        match play(line.as_bytes(), env) {
            Ok(result) => {
                println!("{:?}", result);
                result.decrement();
            }
            Err(err) => eprintln!("error: {}", err),
        }
    }

    let _ = editor.save_history(&history);
}

fn history_file_path() -> String {
    match std::env::var("HOME") {
        Ok(home) => format!("{}/{}", home, HISTORY_FILE),
        Err(_) => HISTORY_FILE.to_string(),
    }
}
