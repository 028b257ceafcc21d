use std::process;

use cli::{
    config::Config,
    render,
    run::{self, print_banner, print_solution},
};

fn main() {
    env_logger::init();

    ctrlc::set_handler(move || {
        render::restore_terminal();
        println!("\nMaze run interrupted.");
        process::exit(130);
    })
    .expect("error setting Ctrl-C handler");

    let args = match Config::parse_args() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            process::exit(1);
        }
        Err(e) => e.exit(),
    };

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let solution = match run::run(&config) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    print_banner(&config);
    if solution.path.is_none() {
        eprintln!("Error: no path from entrance to exit.");
        eprintln!("Details: every carved maze is connected, so this is a generator bug.");
        eprintln!("{}", solution.maze);
        process::exit(2);
    }
    print_solution(&config, &solution);
}
