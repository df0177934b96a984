use crate::app::App;
use crate::braille;
use crate::field::AnimationMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SIDEBAR_WIDTH: u16 = 24;

/// Max scroll for help content (generous to account for text wrapping on small screens)
pub const HELP_CONTENT_LINES: u16 = 40;

// UI color scheme
const BORDER_COLOR: Color = Color::Cyan;
const HIGHLIGHT_COLOR: Color = Color::Yellow;
const TEXT_COLOR: Color = Color::White;
const DIM_TEXT_COLOR: Color = Color::Gray;

/// Creates a standard styled block with rounded borders
fn styled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_COLOR))
        .title(title)
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    if app.fullscreen_mode {
        render_card(frame, area, app);
    } else {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);

        render_sidebar(frame, layout[0], app);
        render_card(frame, layout[1], app);
    }

    if app.show_help {
        render_help_overlay(frame, area, app);
    }
}

/// Screen area of the card canvas (inside its border)
pub fn get_canvas_area(frame_area: Rect, fullscreen: bool) -> Rect {
    let outer = if fullscreen {
        frame_area
    } else {
        Rect {
            x: frame_area.x + SIDEBAR_WIDTH.min(frame_area.width),
            y: frame_area.y,
            width: frame_area.width.saturating_sub(SIDEBAR_WIDTH),
            height: frame_area.height,
        }
    };
    Block::default().borders(Borders::ALL).inner(outer)
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),  // Status
            Constraint::Length(9),  // Parameters
            Constraint::Min(6),     // Controls
        ])
        .split(area);

    render_status_box(frame, sections[0], app);
    render_params_box(frame, sections[1], app);
    render_controls_box(frame, sections[2]);
}

fn render_status_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Pixel Card ");
    let field = &app.card.field;
    let stats = field.stats();

    let (status_text, status_color) = match (field.is_running(), field.mode()) {
        (true, Some(AnimationMode::Appear)) if stats.shimmering > 0 => ("SHIMMERING", HIGHLIGHT_COLOR),
        (true, Some(AnimationMode::Appear)) => ("APPEARING", BORDER_COLOR),
        (true, Some(AnimationMode::Disappear)) => ("FADING", BORDER_COLOR),
        (false, Some(AnimationMode::Appear)) => ("SETTLED", Color::Green),
        _ => ("IDLE", DIM_TEXT_COLOR),
    };

    let visible_width = (area.width.saturating_sub(4)) as usize;
    let filled = if stats.total == 0 {
        0
    } else {
        stats.visible * visible_width / stats.total
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("{} px  {}x{}", stats.total, field.width, field.height),
            Style::default().fg(TEXT_COLOR),
        )),
        Line::from(vec![
            Span::styled("█".repeat(filled), Style::default().fg(Color::Green)),
            Span::styled(
                "░".repeat(visible_width.saturating_sub(filled)),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(status_text, Style::default().fg(status_color))),
        Line::from(Span::styled(
            format!("frames {}  idle {}", field.frames, stats.idle),
            Style::default().fg(DIM_TEXT_COLOR),
        )),
    ];

    if let Some(message) = &app.message {
        content.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_params_box(frame: &mut Frame, area: Rect, app: &App) {
    let block = styled_block(" Parameters ");
    let settings = &app.card.settings;

    let make_line = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {}: ", label), Style::default().fg(DIM_TEXT_COLOR)),
            Span::styled(value, Style::default().fg(TEXT_COLOR)),
        ])
    };

    let swatches: Vec<Span> = std::iter::once(Span::styled("  Colors: ", Style::default().fg(DIM_TEXT_COLOR)))
        .chain(
            app.card
                .field
                .palette
                .colors()
                .iter()
                .map(|c| Span::styled("██", Style::default().fg((*c).into()))),
        )
        .collect();

    let on_off = |b: bool| (if b { "on" } else { "off" }).to_string();

    let content = vec![
        make_line("Variant", settings.variant.name().to_string()),
        make_line("Gap", format!("{}", settings.gap)),
        make_line("Speed", format!("{:.0}", settings.speed)),
        Line::from(swatches),
        make_line("Focus", on_off(!settings.no_focus)),
        make_line("Reduced", on_off(settings.reduced_motion)),
        make_line("Palette", format!("{} colors", app.card.field.palette.len())),
    ];

    let paragraph = Paragraph::new(content).block(block);
    frame.render_widget(paragraph, area);
}

fn render_controls_box(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(HIGHLIGHT_COLOR);
    let desc_style = Style::default().fg(DIM_TEXT_COLOR);

    // Helper to create a control line
    let make_control = |key: &str, desc: &str| -> Line<'_> {
        Line::from(vec![
            Span::styled(format!("{:>5}", key), key_style),
            Span::styled(format!(" {}", desc), desc_style),
        ])
    };

    let content = vec![
        make_control("Mouse", "hover the card"),
        make_control("Tab", "focus / blur"),
        make_control("C", "next variant"),
        make_control("X", "prev variant"),
        make_control("+/-", "speed"),
        make_control("[/]", "gap"),
        make_control("V", "fullscreen"),
        make_control("H", "help"),
        make_control("Q", "quit"),
    ];

    let paragraph = Paragraph::new(content).block(styled_block(" Controls "));
    frame.render_widget(paragraph, area);
}

fn render_card(frame: &mut Frame, area: Rect, app: &App) {
    let border_color: Color = match app.card.settings.variant.preset().active_color {
        Some(active) if app.is_active() => active.into(),
        None if app.is_active() => TEXT_COLOR,
        _ => BORDER_COLOR,
    };
    let title = if app.focused { " focused " } else { "" };
    let block = styled_block(title).border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = braille::render_to_braille(&app.surface, inner.width, inner.height);

    for cell in cells {
        let x = inner.x + cell.x;
        let y = inner.y + cell.y;

        if x < inner.x + inner.width && y < inner.y + inner.height {
            let cell_rect = Rect {
                x,
                y,
                width: 1,
                height: 1,
            };
            let span = Span::styled(cell.char.to_string(), Style::default().fg(cell.color));
            let paragraph = Paragraph::new(Line::from(span));
            frame.render_widget(paragraph, cell_rect);
        }
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let canvas_x = if app.fullscreen_mode { 0 } else { SIDEBAR_WIDTH };
    let canvas_width = if app.fullscreen_mode {
        area.width
    } else {
        area.width.saturating_sub(SIDEBAR_WIDTH)
    };

    // Center the help dialog within the canvas
    let help_width = 56.min(canvas_width.saturating_sub(4));
    let help_height = area.height.saturating_sub(4).min(30);
    let x = canvas_x + (canvas_width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = Rect {
        x: area.x + x,
        y: area.y + y,
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled("PIXEL CARD", Style::default().fg(BORDER_COLOR))),
        Line::from(""),
        Line::from("Hovering the card (or focusing it with Tab) reveals a grid of pixels radially from the center. Once a pixel reaches its full size it keeps twinkling until the pointer leaves, then every pixel shrinks away."),
        Line::from(""),
        Line::from(Span::styled("VARIANTS (C/X):", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("default, blue, yellow, pink. Pink ignores keyboard focus."),
        Line::from(""),
        Line::from(Span::styled("SPEED (+/-)", Style::default().fg(TEXT_COLOR))),
        Line::from("0-100, how fast shimmering pixels twinkle"),
        Line::from(""),
        Line::from(Span::styled("GAP ([/])", Style::default().fg(TEXT_COLOR))),
        Line::from("Distance between pixels, in Braille dots"),
        Line::from(""),
        Line::from(Span::styled("REDUCED MOTION", Style::default().fg(TEXT_COLOR))),
        Line::from("Start with --reduced-motion: no radial reveal and no shimmer"),
        Line::from(""),
        Line::from(Span::styled("BASIC CONTROLS:", Style::default().fg(HIGHLIGHT_COLOR))),
        Line::from("Tab=Focus, Esc=Blur, V=Fullscreen, H=Help, Q=Quit"),
        Line::from(""),
    ];

    let content_height = content.len() as u16;
    let visible_height = help_height.saturating_sub(2); // minus borders
    let is_scrollable = content_height > visible_height;

    let title = if is_scrollable {
        " Help (J/K scroll, H to close) "
    } else {
        " Help (H to close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(HIGHLIGHT_COLOR))
        .title(title);

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll, 0));

    frame.render_widget(paragraph, help_area);
}
