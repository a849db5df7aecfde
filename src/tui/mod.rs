pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::app::{AppContext, Result};
use crate::config::Config;
use crate::domain::{Filter, PostList};

use self::app::Dashboard;
use self::event::{AppEvent, EventHandler};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard on `initial`, which was built for [`Filter::Front`].
pub async fn run(ctx: Arc<AppContext>, config: Arc<Config>, initial: PostList) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, config, initial).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(
    terminal: &mut Tui,
    ctx: Arc<AppContext>,
    config: Arc<Config>,
    initial: PostList,
) -> Result<()> {
    let mut dashboard = Dashboard::new(initial, Filter::Front, ctx.urls.clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));

    loop {
        terminal.draw(|frame| {
            layout::render(frame, &mut dashboard, &config.colors, &config.keybindings)
        })?;

        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = config.keybindings.get_action(&key);

                if dashboard.needs_rebuild(action) {
                    // Rebuilds block input; show that something is happening first.
                    dashboard.is_refreshing = true;
                    terminal.draw(|frame| {
                        layout::render(frame, &mut dashboard, &config.colors, &config.keybindings)
                    })?;
                } else {
                    dashboard.clear_status();
                }

                dashboard.apply(action, &ctx.builder, &ctx.opener).await;
                dashboard.is_refreshing = false;
            }
            AppEvent::Tick => {}
        }

        if dashboard.should_quit {
            break;
        }
    }

    Ok(())
}
