//! Terminal rendering for the two screens.
//!
//! Rendering is a pure function of the current `App` state: four labeled
//! horizontal card rows on the list screen, and title/poster/synopsis on the
//! detail screen. Poster artwork itself is out of scope for a terminal; a
//! card shows a placeholder band and the detail screen shows the derived
//! poster URL.

use cinenow_core::{Category, FetchState, Movie, MovieDetailState};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{App, Screen};

const CARD_WIDTH: u16 = 24;

pub fn draw(f: &mut Frame, app: &App) {
    // Title (1), body (min), help bar (1).
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "CineNow",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    f.render_widget(title, chunks[0]);

    match &app.screen {
        Screen::List => draw_list(f, chunks[1], app),
        Screen::Detail(detail) => draw_detail(f, chunks[1], detail),
    }

    let help = match app.screen {
        Screen::List => "↑/↓/←/→: move  Enter: open  r: retry failed  q: quit",
        Screen::Detail(_) => "Esc/Backspace: back  r: retry  q: quit",
    };
    f.render_widget(Paragraph::new(help), chunks[2]);
}

fn draw_list(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, category) in Category::ALL.into_iter().enumerate() {
        let selected_col = (app.cursor.row == i).then_some(app.cursor.col);
        draw_row(f, rows[i], category, app.list.slice(category), selected_col);
    }
}

fn draw_row(
    f: &mut Frame,
    area: Rect,
    category: Category,
    slice: &FetchState<Vec<Movie>>,
    selected_col: Option<usize>,
) {
    let block = Block::default().borders(Borders::ALL).title(category.label());
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    match slice {
        FetchState::Idle => {}
        FetchState::Loading => {
            f.render_widget(Paragraph::new("Loading…"), inner);
        }
        FetchState::Failed(msg) => {
            let line = Line::from(Span::styled(
                format!("{msg} — press r to retry"),
                Style::default().fg(Color::Red),
            ));
            f.render_widget(Paragraph::new(line), inner);
        }
        FetchState::Loaded(movies) if movies.is_empty() => {
            f.render_widget(Paragraph::new("No movies."), inner);
        }
        FetchState::Loaded(movies) => draw_cards(f, inner, movies, selected_col),
    }
}

fn draw_cards(f: &mut Frame, area: Rect, movies: &[Movie], selected_col: Option<usize>) {
    let visible = (area.width / CARD_WIDTH).max(1) as usize;
    // Scroll the row just enough to keep the highlighted card in view.
    let start = match selected_col {
        Some(col) if col >= visible => col + 1 - visible,
        _ => 0,
    };

    for (slot, idx) in (start..movies.len().min(start + visible)).enumerate() {
        let x = area.x + slot as u16 * CARD_WIDTH;
        let width = CARD_WIDTH.min(area.right().saturating_sub(x));
        if width < 4 {
            break;
        }
        let card_area = Rect::new(x, area.y, width, area.height);
        draw_card(f, card_area, &movies[idx], selected_col == Some(idx));
    }
}

fn draw_card(f: &mut Frame, area: Rect, movie: &Movie, selected: bool) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let width = inner.width as usize;
    let mut lines = Vec::new();
    // Placeholder band where the poster would be.
    for _ in 0..inner.height.saturating_sub(2) {
        let band = if movie.poster_path.is_some() {
            Span::styled("▒".repeat(width), Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(truncate("(no poster)", width), Style::default().fg(Color::DarkGray))
        };
        lines.push(Line::from(band));
    }
    lines.push(Line::from(Span::styled(
        truncate(&movie.title, width),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(truncate(&movie.overview, width)));

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_detail(f: &mut Frame, area: Rect, detail: &MovieDetailState) {
    let block = Block::default().borders(Borders::ALL).title("Movie Detail");
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    match detail.state() {
        FetchState::Idle | FetchState::Loading => {
            f.render_widget(Paragraph::new("Loading…"), inner);
        }
        FetchState::Failed(msg) => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Could not load movie {}", detail.movie_id()),
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Red))),
                Line::from("Press r to retry, Esc to go back."),
            ];
            f.render_widget(Paragraph::new(lines), inner);
        }
        FetchState::Loaded(movie) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(inner);

            let header = vec![
                Line::from(Span::styled(
                    movie.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    movie.poster_url(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
            ];
            f.render_widget(Paragraph::new(header), chunks[0]);

            let synopsis =
                Paragraph::new(movie.overview.clone()).wrap(Wrap { trim: true });
            f.render_widget(synopsis, chunks[1]);
        }
    }
}

/// Truncate to `width` display slots, ending with an ellipsis when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
