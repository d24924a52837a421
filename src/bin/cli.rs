use std::io::{self, BufRead, Write};

use clap::Parser;
use tracing::{debug, info};

use replaytty::{App, Command, Config, Error, HELP};

fn main() -> Result<(), Error> {
    let config = Config::parse();
    config.init_logging(true)?;
    info!(order = %config.order, "starting line-mode game");

    let mut app = App::new(config.order);
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Welcome to Tic Tac Toe! Type `help` for commands.\n")?;
    print_game(&mut stdout, &app)?;

    let stdin = io::stdin().lock();
    for line in stdin.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => writeln!(stdout, "{}", HELP)?,
            Ok(Command::Event(event)) => match app.handle(event) {
                Ok(()) => print_game(&mut stdout, &app)?,
                Err(err) => writeln!(stdout, "{}", err)?,
            },
            Err(err) => {
                debug!(%err, input = %line, "unparseable input");
                writeln!(stdout, "{}", err)?;
            }
        }
    }

    info!("leaving line-mode game");
    Ok(())
}

fn print_game(out: &mut impl Write, app: &App) -> io::Result<()> {
    writeln!(out, "{}", app.render_input().board)?;
    writeln!(out, "{}", app.status())?;
    writeln!(out, "\nMoves (sort: {}):", app.order())?;
    for entry in app.move_list() {
        let marker = if entry.is_current { '>' } else { ' ' };
        writeln!(out, " {} {:>2}. {}", marker, entry.step, entry.description)?;
    }
    writeln!(out)?;
    out.flush()
}
