use std::env;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use orthokeys::config::Settings;
use orthokeys::extension::load_accelerators;
use orthokeys::logging;
use orthokeys::remap::Accelerators;
use orthokeys::ui::shortcut_editor::{self, ShortcutsDialog};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!("orthokeys {} - Orthodox keyboard shortcuts for dual-pane file managers", VERSION);
    println!();
    println!("USAGE:");
    println!("    orthokeys [OPTIONS]");
    println!();
    println!("Without options, opens the keyboard shortcuts editor.");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help              Print help information");
    println!("    -v, --version           Print version information");
    println!("    -l, --list              Print every action path and its shortcut");
    println!();
    println!("FILES:");
    println!("    ~/.orthokeys/settings.json   Settings");
    println!("    ~/.orthokeys/accels.json     Saved shortcuts");
}

fn print_version() {
    println!("orthokeys {}", VERSION);
}

fn print_list(table: &Accelerators) {
    for (path, label) in table.enumerate() {
        println!("{}\t{}", path, label);
    }
}

fn main() -> io::Result<()> {
    logging::init();

    let args: Vec<String> = env::args().collect();
    let mut list = false;
    if args.len() > 1 {
        match args[1].as_str() {
            "-h" | "--help" => {
                print_help();
                return Ok(());
            }
            "-v" | "--version" => {
                print_version();
                return Ok(());
            }
            "-l" | "--list" => list = true,
            _ => {
                eprintln!("Unknown option: {}", args[1]);
                eprintln!("Use --help for usage information");
                return Ok(());
            }
        }
    }

    let settings = Settings::load();
    let accels_path = Settings::accels_path();
    let mut table = load_accelerators(&settings, accels_path.as_deref());

    if list {
        print_list(&table);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        EnterAlternateScreen
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut dialog = ShortcutsDialog::default();
    let result = run_app(&mut terminal, &mut table, &mut dialog);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0),
        crossterm::cursor::Show
    )?;

    if let Err(err) = result {
        eprintln!("Error: {}", err);
    }

    if let Some(path) = accels_path {
        if let Err(err) = table.save(&path) {
            eprintln!("Error: could not save {}: {}", path.display(), err);
        }
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    table: &mut Accelerators,
    dialog: &mut ShortcutsDialog,
) -> io::Result<()> {
    let view = dialog.present();
    loop {
        terminal.draw(|f| {
            let area = f.area();
            shortcut_editor::draw(f, &mut view.borrow_mut(), table, area);
        })?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if view.borrow_mut().handle_input(table, key.code, key.modifiers) {
                    dialog.close();
                    return Ok(());
                }
            }
        }
    }
}
