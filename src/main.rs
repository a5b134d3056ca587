use std::sync::Arc;
use std::time::Duration;

use agentdash::app::App;
use agentdash::cli::{parse_args, run_cli_command, CliCommand};
use agentdash::client::PipelineClient;
use agentdash::config::DashboardConfig;
use agentdash::error::DashError;
use agentdash::logging::{init_logging, LogTarget};
use agentdash::terminal::{setup_panic_hook, TerminalManager};
use agentdash::ui;

use color_eyre::{eyre::eyre, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::Terminal;
use tracing::{error, info};

/// Print a user-facing error and exit non-zero.
fn exit_with(err: &DashError) -> ! {
    error!(code = err.error_code(), category = %err.category(), "{}", err);
    eprintln!("Error: {}", err.user_message());
    eprintln!("{}", err.recovery_hint());
    std::process::exit(1);
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = parse_args(std::env::args());

    let mut config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Some(url) = args.base_url {
        config = config.with_base_url(url);
    }

    // Non-interactive commands own stdout, so logs go to stderr
    if matches!(
        args.command,
        CliCommand::Headless { .. } | CliCommand::FetchResult { .. }
    ) {
        init_logging(&config, &LogTarget::Stderr)?;
    }

    if let Some(result) = run_cli_command(&args.command, &config) {
        return match result {
            Ok(()) => Ok(()),
            Err(e) => exit_with(&e),
        };
    }

    init_logging(&config, &LogTarget::for_tui(&config))?;
    setup_panic_hook();

    info!(base_url = %config.base_url, "starting dashboard");

    let runtime = tokio::runtime::Runtime::new()?;
    let backend = Arc::new(PipelineClient::with_base_url(config.base_url.clone()));
    let mut app = App::new(backend, &config);

    let mut term_manager = TerminalManager::new()?;
    let result = runtime.block_on(run_app(term_manager.terminal(), &mut app));

    app.controller.shutdown();
    term_manager.restore()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("controller receiver already taken"))?;

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        // 16ms tick drives the spinner and the elapsed clock
        let timeout = tokio::time::sleep(Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => app.handle_key_event(key),
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => return Ok(()),
                }
            }

            Some(message) = message_rx.recv() => {
                app.handle_message(message);
            }
        }
    }
}
