use std::{
    error::Error,
    io::{self, Write},
    process,
};

mod app;
pub(crate) use app::App;

mod cmds;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn main() {
    env_logger::init();

    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = {
        let mut stdin = stdin.lock();
        let mut stdout = stdout.lock();

        let mut app = App {
            arg_matches: app::clap_app().get_matches(),
            stdin: &mut stdin,
            stdout: &mut stdout,
        };

        app.run().and_then(|()| app.flush().map_err(Into::into))
    };

    process::exit(exit_code(result, &mut io::stderr()));
}

// Reports a failed command on `stderr` and maps the outcome to a process
// exit status.
fn exit_code(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            log::debug!("{:?}", err);
            let _ = writeln!(stderr, "ERROR: {}", err);
            1
        }
    }
}
