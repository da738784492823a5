use crate::lang::Error;
use crate::mach::*;


fn run(script: &str) -> String {
    let mut runtime = Runtime::default();
    runtime.run_script(script);
    run_cycles(&mut runtime, 5000)
}

fn run_cycles(runtime: &mut Runtime, cycles: usize) -> String {
    let mut s = String::new();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(cycles);
        match &event {
            Event::Stopped => {
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
            }
            Event::Running => {
                if prev_running {
                    s.push_str(&format!("\n{} Execution cycles exceeded.\n", cycles));
                    break;
                }
            }
            Event::Print(ps) => {
                s.push_str(&ps);
            }
            Event::Load(path) => {
                s.push_str(&format!("LOAD {}\n", path));
            }
        }
        match event {
            Event::Running => prev_running = true,
            _ => prev_running = false,
        }
    }
    s
}

/// Reads the next script line and hands it to its handler, the way the
/// runtime does outside of a jump scan.
fn step(session: &mut Session) -> Result<(), Error> {
    let line = session.next_line().expect("script ended early");
    let args = line.args().to_vec();
    match args.first().map(String::as_str) {
        Some("for") => for_command(session, &args),
        Some("endfor") => endfor_command(session, &args),
        Some("goto") => goto_command(session, &args),
        _ => Ok(()),
    }
}

fn current(session: &Session, variable: char) -> Option<String> {
    session.statements().lookup(variable).map(String::from)
}
