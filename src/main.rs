// Rolldeck: terminal client for table-pack expression evaluation servers

use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rolldeck::client::PackClient;
use rolldeck::ui::App;

#[derive(Parser, Debug)]
#[command(name = "rolldeck", version, about = "Evaluate table-pack expressions from the terminal")]
struct Args {
    /// Base URL of the evaluation server
    #[arg(long = "url", env = "ROLLDECK_URL", default_value = "http://localhost:8080")]
    url: String,

    /// Request timeout in seconds (no timeout when omitted)
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let client = PackClient::new(&args.url, args.timeout.map(Duration::from_secs))?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(client);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
