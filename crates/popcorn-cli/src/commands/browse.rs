use super::render;
use crate::output::Output;
use crate::terminal::TerminalTitle;
use color_eyre::Result;
use popcorn_core::{Applied, MovieSession, SearchView, SessionEvent};
use popcorn_sources::MovieSource;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Type a title and press enter to search.
  :open N         show details for result N
  :rate N         add the open movie to your watched list with rating N (0-10)
  :back, esc      close the open movie
  :rm ID          remove a movie from your watched list
  :watched        show the watched list even while a movie is open
  :toggle results|watched
                  collapse or expand a panel
  :help           show this help
  :quit           leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Results,
    Watched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Query(String),
    Open(usize),
    Rate(u8),
    Back,
    Remove(String),
    Toggle(Panel),
    Watched,
    Help,
    Quit,
    Invalid(String),
}

/// Parse one input line. Anything not starting with ':' is a search query.
pub fn parse_command(line: &str) -> BrowseCommand {
    let trimmed = line.trim();

    // A bare Escape key arrives as the ESC control character
    if trimmed == "esc" || trimmed == "\u{1b}" {
        return BrowseCommand::Back;
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return BrowseCommand::Query(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or("");
    let arg = parts.next();

    match (name, arg) {
        ("q" | "quit" | "exit", _) => BrowseCommand::Quit,
        ("h" | "help", _) => BrowseCommand::Help,
        ("back" | "close", _) => BrowseCommand::Back,
        ("w" | "watched", _) => BrowseCommand::Watched,
        ("open" | "o", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => BrowseCommand::Open(n),
            _ => BrowseCommand::Invalid(format!("Not a result number: {}", n)),
        },
        ("rate" | "r", Some(n)) => match n.parse::<u8>() {
            Ok(n) if n <= 10 => BrowseCommand::Rate(n),
            _ => BrowseCommand::Invalid("Rating must be between 0 and 10".to_string()),
        },
        ("rm" | "remove", Some(id)) => BrowseCommand::Remove(id.to_string()),
        ("toggle" | "t", Some("results")) => BrowseCommand::Toggle(Panel::Results),
        ("toggle" | "t", Some("watched")) => BrowseCommand::Toggle(Panel::Watched),
        ("toggle" | "t", Some(other)) => BrowseCommand::Invalid(format!("No panel named {}", other)),
        ("open" | "o" | "rate" | "r" | "rm" | "remove" | "toggle" | "t", None) => {
            BrowseCommand::Invalid(format!(":{} needs an argument", name))
        }
        _ => BrowseCommand::Invalid(format!("Unknown command :{} (try :help)", name)),
    }
}

/// Open/closed state of the two panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub results_open: bool,
    pub watched_open: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            results_open: true,
            watched_open: true,
        }
    }
}

impl Panels {
    pub fn toggle(&mut self, panel: Panel) {
        match panel {
            Panel::Results => self.results_open = !self.results_open,
            Panel::Watched => self.watched_open = !self.watched_open,
        }
    }
}

enum Step {
    Input(std::io::Result<Option<String>>),
    Event(Option<SessionEvent>),
}

pub async fn run_browse(output: &Output) -> Result<()> {
    if !output.is_human() {
        output.warn("browse is interactive; ignoring --output");
    }

    let config = super::load_config()?;
    let mut session = super::open_session(&config)?.with_hooks(Box::new(TerminalTitle::new()));
    let mut panels = Panels::default();

    println!("🍿 usePopcorn");
    println!("{}", HELP);
    render_panels(&session, &panels);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let step = tokio::select! {
            line = lines.next_line() => Step::Input(line),
            event = session.next_event() => Step::Event(event),
        };

        match step {
            Step::Input(Err(e)) => {
                session.shutdown();
                return Err(e.into());
            }
            Step::Input(Ok(None)) => break,
            Step::Input(Ok(Some(line))) => match parse_command(&line) {
                BrowseCommand::Quit => break,
                BrowseCommand::Help => println!("{}", HELP),
                BrowseCommand::Invalid(message) => output.warn(message),
                BrowseCommand::Query(query) => {
                    session.set_query(query);
                    render_panels(&session, &panels);
                }
                BrowseCommand::Open(n) => {
                    let id = match session.search_view() {
                        SearchView::Results(items) => items.get(n - 1).map(|item| item.id.clone()),
                        _ => None,
                    };
                    match id {
                        Some(id) => {
                            session.select(&id);
                            render_panels(&session, &panels);
                        }
                        None => output.warn(format!("No result number {}", n)),
                    }
                }
                BrowseCommand::Rate(rating) => match session.add_selected_to_watched(rating) {
                    Ok(true) => {
                        output.success(format!("Added with your rating {}/10", rating));
                        render_panels(&session, &panels);
                    }
                    Ok(false) => {
                        output.warn("Already in your watched list");
                        render_panels(&session, &panels);
                    }
                    Err(e) => output.warn(e.to_string()),
                },
                BrowseCommand::Back => {
                    session.close_detail();
                    render_panels(&session, &panels);
                }
                BrowseCommand::Remove(id) => match session.remove_watched(&id) {
                    Ok(true) => {
                        output.success(format!("Removed {}", id));
                        render_panels(&session, &panels);
                    }
                    Ok(false) => output.warn(format!("{} is not in your watched list", id)),
                    Err(e) => output.error(e.to_string()),
                },
                BrowseCommand::Watched => render_watched(&session),
                BrowseCommand::Toggle(panel) => {
                    panels.toggle(panel);
                    render_panels(&session, &panels);
                }
            },
            Step::Event(Some(event)) => {
                if session.apply(event) != Applied::Stale {
                    render_panels(&session, &panels);
                }
            }
            Step::Event(None) => break,
        }
    }

    debug!("Leaving browse session");
    session.shutdown();
    Ok(())
}

fn render_panels<S: MovieSource + 'static>(session: &MovieSession<S>, panels: &Panels) {
    println!();
    if panels.results_open {
        match session.search_view() {
            SearchView::Loading => println!("Loading..."),
            SearchView::Error(message) => println!("🚫 {}", message),
            SearchView::Results(items) if items.is_empty() => {}
            SearchView::Results(items) => println!("{}", render::results_table(items)),
        }
    } else {
        println!("[+] results");
    }

    if !panels.watched_open {
        println!("[+] watched");
        return;
    }

    let detail = session.detail_state();
    if detail.is_loading {
        println!("Loading...");
    } else if let Some(movie) = &detail.movie {
        let user_rating = session.watched().user_rating_for(&movie.id);
        for line in render::detail_lines(movie, user_rating, false) {
            println!("{}", line);
        }
        if user_rating.is_none() {
            println!("\nRate it with :rate N, or :back to close");
        }
    } else {
        render_watched(session);
    }
}

fn render_watched<S: MovieSource + 'static>(session: &MovieSession<S>) {
    println!("{}", render::summary_line(&session.summary()));
    if !session.watched().is_empty() {
        println!("{}", render::watched_table(session.watched()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_query() {
        assert_eq!(parse_command("inception"), BrowseCommand::Query("inception".to_string()));
        assert_eq!(parse_command("the matrix\n"), BrowseCommand::Query("the matrix".to_string()));
        assert_eq!(parse_command(""), BrowseCommand::Query(String::new()));
    }

    #[test]
    fn test_escape_closes_detail() {
        assert_eq!(parse_command("esc"), BrowseCommand::Back);
        assert_eq!(parse_command("\u{1b}"), BrowseCommand::Back);
        assert_eq!(parse_command(":back"), BrowseCommand::Back);
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(parse_command(":open 2"), BrowseCommand::Open(2));
        assert_eq!(parse_command(":rate 10"), BrowseCommand::Rate(10));
        assert_eq!(parse_command(":rm tt1375666"), BrowseCommand::Remove("tt1375666".to_string()));
        assert_eq!(parse_command(":toggle watched"), BrowseCommand::Toggle(Panel::Watched));
        assert_eq!(parse_command(":watched"), BrowseCommand::Watched);
        assert_eq!(parse_command(":q"), BrowseCommand::Quit);
    }

    #[test]
    fn test_bad_arguments_rejected() {
        assert!(matches!(parse_command(":open 0"), BrowseCommand::Invalid(_)));
        assert!(matches!(parse_command(":rate 11"), BrowseCommand::Invalid(_)));
        assert!(matches!(parse_command(":open"), BrowseCommand::Invalid(_)));
        assert!(matches!(parse_command(":frobnicate"), BrowseCommand::Invalid(_)));
    }

    #[test]
    fn test_panels_toggle_independently() {
        let mut panels = Panels::default();
        panels.toggle(Panel::Results);
        assert!(!panels.results_open);
        assert!(panels.watched_open);
        panels.toggle(Panel::Results);
        assert_eq!(panels, Panels::default());
    }
}
