use knight::{play, Environment};

mod repl;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut env = Environment::new();

    match args.len() {
        1 => repl::run(&mut env),
        2 => run_file(&args[1], &mut env),
        3 if args[1] == "-e" => run_source(args[2].as_bytes(), &mut env),
        _ => {
            eprintln!("usage: {} [-e expression | file]", args[0]);
            std::process::exit(2);
        }
    }
}

fn run_file(path: &str, env: &mut Environment) {
    let source = match std::fs::read(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {}: {}", path, err);
            std::process::exit(1);
        }
    };
    run_source(&source, env);
}

fn run_source(source: &[u8], env: &mut Environment) {
    match play(source, env) {
        Ok(result) => result.decrement(),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}
