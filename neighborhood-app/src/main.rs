use anyhow::Context;
use neighborhood_map::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

/// Terminal driver: stdin is the input surface, the headless surface is the map
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            AppConfig::load(&path).with_context(|| format!("loading config from {}", path))?
        }
        None => AppConfig::default(),
    };

    LocalSet::new().run_until(run(config)).await
}

#[derive(Debug, PartialEq)]
enum Command {
    Event(UiEvent),
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim_start().starts_with('{') {
        return serde_json::from_str(line)
            .map(Command::Event)
            .map_err(|e| format!("bad event: {}", e));
    }

    let (word, rest) = match line.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (line.trim(), ""),
    };
    match word {
        "filter" | "f" => Ok(Command::Event(UiEvent::FilterInput {
            text: rest.to_string(),
        })),
        "click" | "c" => rest
            .trim()
            .parse()
            .map(|index| Command::Event(UiEvent::MarkerClicked { index }))
            .map_err(|_| format!("not a marker index: {:?}", rest.trim())),
        "show" | "s" | "" => Ok(Command::Show),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: {}", other)),
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let surface = Rc::new(RefCell::new(HeadlessSurface::new()));
    let source = Rc::new(WikipediaSource::new(&config.fetch)?);
    let vm = ViewModel::new(&config, surface, source, Rc::new(TokioRuntime))?;

    for place in vm.neighborhood().places() {
        let name = place.name().to_owned();
        place
            .content()
            .subscribe(move |text: &String| println!("\n[{}] {}", name, text));
    }

    print_help();
    print_state(&vm);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => print_help(),
            Ok(Command::Show) => print_state(&vm),
            Ok(Command::Event(event)) => match vm.handle_event(event) {
                Ok(_) => print_state(&vm),
                Err(e) => eprintln!("error: {}", e),
            },
            Err(message) => eprintln!("{}", message),
        }
    }

    log::info!("{} description requests issued", vm.fetcher().requests_issued());
    Ok(())
}

fn print_help() {
    println!("commands:");
    println!("  filter <text>   show only places whose name contains <text>");
    println!("  click <index>   open the popup of a marker");
    println!("  show            print the map state");
    println!("  quit");
    println!("  or a JSON event, e.g. {{\"type\":\"marker_clicked\",\"index\":0}}");
}

fn print_state(vm: &ViewModel<HeadlessSurface>) {
    print!("{}", render_state(vm));
}

fn render_state(vm: &ViewModel<HeadlessSurface>) -> String {
    format!("filter: {:?}\n{}", vm.filter(), vm.surface().borrow().describe())
}
