// SPDX-License-Identifier: MPL-2.0
use flfm_viewer::app::{paths, ViewerContext, ViewerSession};
use flfm_viewer::application::query::NavigatorEvent;
use flfm_viewer::config;
use flfm_viewer::domain::media::MediaKind;
use flfm_viewer::domain::viewer::SlideshowDelay;
use flfm_viewer::error::{Error, Result};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
flfm-viewer: drive the FLFM media navigator against a live server

USAGE:
  flfm-viewer [OPTIONS] <COMMAND> [ARGS]

COMMANDS:
  list <file>            Print the siblings of <file>
  next <file>            Step forward from <file>
  prev <file>            Step back from <file>
  slideshow <file>       Auto-advance from <file> (--count steps)
  play <file>            Negotiate video playback of <file>
  text <file>            Print a text file
  open <viewer-url>      Print the position of the file a viewer URL points at
  set-delay <ms>         Save the slideshow delay preference

OPTIONS:
  --server <url>         Server origin, e.g. http://nas.local:5000
  --root <path>          Path prefix the file manager is mounted under
  --socket <url>         Socket.IO server for video [default: --server]
  --kind <kind>          image, video or text [default: image]
  --count <n>            Slideshow steps before exiting [default: 3]
  --data-dir <dir>       Override the data directory
  --config-dir <dir>     Override the config directory
  -h, --help             Print this help
";

struct Args {
    server: Option<String>,
    root: Option<String>,
    socket: Option<String>,
    kind: MediaKind,
    count: usize,
    data_dir: Option<String>,
    config_dir: Option<String>,
    command: Option<String>,
    target: Option<String>,
}

fn parse_args() -> std::result::Result<Option<Args>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        server: args.opt_value_from_str("--server")?,
        root: args.opt_value_from_str("--root")?,
        socket: args.opt_value_from_str("--socket")?,
        kind: args
            .opt_value_from_str("--kind")?
            .unwrap_or(MediaKind::Image),
        count: args.opt_value_from_str("--count")?.unwrap_or(3),
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        command: args.opt_free_from_str()?,
        target: args.opt_free_from_str()?,
    };
    Ok(Some(parsed))
}

fn target(args: &Args) -> Result<&str> {
    args.target
        .as_deref()
        .ok_or_else(|| Error::Config("missing argument, see --help".to_string()))
}

async fn print_position(session: &ViewerSession) -> Result<()> {
    let navigator = session.navigator();
    let info = navigator.navigation_info().await?;
    println!(
        "{} ({} of {})",
        navigator.current_identifier(),
        info.current_index.map_or(0, |i| i + 1),
        info.total_count
    );
    Ok(())
}

async fn run(args: Args) -> Result<()> {
    paths::init_cli_overrides(args.data_dir.clone(), args.config_dir.clone());

    let mut config = config::load()?;
    if args.server.is_some() {
        config.server_origin.clone_from(&args.server);
    }
    if args.root.is_some() {
        config.root.clone_from(&args.root);
    }
    if args.socket.is_some() {
        config.socket_url.clone_from(&args.socket);
    }

    let context = ViewerContext::connect(&config, None)?;
    let command = args.command.as_deref().unwrap_or("help");

    match command {
        "list" => {
            let session = context.mount(target(&args)?, args.kind);
            let list = session.navigator().load_media_list().await?;
            let current = session.navigator().current_identifier();
            for id in list.identifiers() {
                let marker = if id == current { '>' } else { ' ' };
                println!("{marker} {id}");
            }
        }
        "next" | "prev" => {
            let session = context.mount(target(&args)?, args.kind);
            let effect = if command == "next" {
                session.navigator().step_next().await?
            } else {
                session.navigator().step_previous().await?
            };
            match effect {
                Some(effect) => println!("{}", effect.url()),
                None => println!("already at the end"),
            }
        }
        "slideshow" => {
            let session = context.mount(target(&args)?, args.kind);
            let navigator = session.navigator();
            let mut events = navigator.subscribe();
            let delay = navigator.start_slideshow_with_saved_delay();
            println!("slideshow every {} ms", delay.millis());

            let mut steps = 0;
            while steps < args.count {
                match events.recv().await {
                    Ok(NavigatorEvent::Navigated { identifier, .. }) => {
                        steps += 1;
                        println!("{identifier}");
                    }
                    Ok(NavigatorEvent::SlideshowStopped) | Err(_) => break,
                    Ok(NavigatorEvent::SlideshowStarted { .. }) => {}
                }
            }
            session.teardown();
        }
        "play" => {
            let session = context.mount(target(&args)?, MediaKind::Video);
            println!("{}", session.play_video().await?);
        }
        "text" => {
            let session = context.mount(target(&args)?, MediaKind::Text);
            print!("{}", session.read_text().await?);
        }
        "open" => {
            let session = context.mount_url(target(&args)?)?;
            session.prefetch_current().await?;
            print_position(&session).await?;
        }
        "set-delay" => {
            let delay = SlideshowDelay::parse(target(&args)?)
                .ok_or_else(|| Error::Config("delay must be a number of milliseconds".into()))?;
            let session = context.mount("/", args.kind);
            session.navigator().set_slideshow_delay(delay)?;
            println!("slideshow delay set to {} ms", delay.millis());
        }
        _ => print!("{HELP}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return std::process::ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}");
            return std::process::ExitCode::FAILURE;
        }
    };

    match run(args).await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::ExitCode::FAILURE
        }
    }
}
