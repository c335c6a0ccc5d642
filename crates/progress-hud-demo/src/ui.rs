//! Terminal rendering for the HUD demo

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use progress_hud_core::{BackgroundStyle, Child, Container, Hud, HudSnapshot, IndicatorKind};
use unicode_width::UnicodeWidthStr;

use crate::state::{CustomGlyph, DemoState};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const PIE: [&str; 5] = ["○", "◔", "◑", "◕", "●"];
const ARC: [&str; 5] = ["◌", "◜", "◠", "◝", "◯"];
const BAR_WIDTH: usize = 12;

const HUD_CYAN: Color = Color::Rgb { r: 0, g: 200, b: 255 };
const HUD_DIM: Color = Color::Rgb { r: 90, g: 90, b: 110 };

/// Cells per layout unit
const CELL_SCALE: f32 = 10.0;

pub fn render<W: Write>(out: &mut W, state: &DemoState) -> io::Result<()> {
    let (width, height) = terminal::size()?;
    queue!(out, Clear(ClearType::All))?;

    render_header(out, state)?;
    render_children(out, state)?;
    render_feed(out, state, height)?;

    for hud in paint_order(&state.container) {
        render_bezel(out, state, &hud, width, height)?;
    }

    queue!(out, ResetColor)?;
    out.flush()
}

/// HUDs in drawing order: bottom of the stack first, topmost last
pub fn paint_order(container: &Container) -> Vec<Hud> {
    container.huds()
}

fn render_header<W: Write>(out: &mut W, state: &DemoState) -> io::Result<()> {
    queue!(
        out,
        MoveTo(0, 0),
        SetForegroundColor(HUD_CYAN),
        Print("progress-hud demo"),
        SetForegroundColor(HUD_DIM),
        Print("  s show  h hide  d hide in 2s  m mode  p +10%  w work  v view  q quit"),
    )?;
    if let Some(status) = &state.status_message {
        queue!(out, MoveTo(0, 1), ResetColor, Print(status))?;
    }
    Ok(())
}

fn render_children<W: Write>(out: &mut W, state: &DemoState) -> io::Result<()> {
    queue!(
        out,
        MoveTo(0, 3),
        SetForegroundColor(HUD_DIM),
        Print(format!("{} ({})", state.container.name(), state.container.id())),
    )?;

    for (row, child) in state.container.children().iter().enumerate() {
        let line = match child {
            Child::View(name) => format!("  ▸ {}", name),
            Child::Hud(hud) => {
                let snap = hud.snapshot();
                format!(
                    "  ▣ {} [{}] {} {:.0}%",
                    snap.id,
                    snap.phase.name(),
                    snap.mode.name(),
                    snap.progress * 100.0
                )
            }
        };
        queue!(out, MoveTo(0, 4 + row as u16), Print(line))?;
    }
    Ok(())
}

fn render_feed<W: Write>(out: &mut W, state: &DemoState, height: u16) -> io::Result<()> {
    let feed = state.presenter.feed();
    let top = height.saturating_sub(feed.len() as u16);
    queue!(out, SetForegroundColor(HUD_DIM))?;
    for (row, line) in feed.iter().enumerate() {
        queue!(out, MoveTo(0, top + row as u16), Print(line))?;
    }
    Ok(())
}

fn render_bezel<W: Write>(
    out: &mut W,
    state: &DemoState,
    hud: &Hud,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let alpha = state.presenter.alpha(hud.id());
    if alpha <= 0.0 {
        return Ok(());
    }

    let snap = hud.snapshot();
    let lines = bezel_lines(hud, &snap, state.tick);
    let (box_w, box_h) = bezel_size(&snap, &lines);
    let (box_w, box_h) = (box_w.min(width), box_h.min(height));

    let x = width.saturating_sub(box_w) / 2;
    let center_y = (height.saturating_sub(box_h) / 2) as i32;
    let max_y = height.saturating_sub(box_h) as i32;
    let offset = (snap.layout.offset_y / CELL_SCALE).round() as i32;
    let y = center_y.saturating_add(offset).clamp(0, max_y) as u16;
    let inner = box_w.saturating_sub(2) as usize;

    let color = if alpha < 0.5 { HUD_DIM } else { HUD_CYAN };
    queue!(out, SetForegroundColor(color))?;
    if alpha < 0.5 {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }

    let fill = match snap.background {
        BackgroundStyle::SolidColor => " ",
        BackgroundStyle::Blur => "░",
    };
    let top_pad = (box_h.saturating_sub(2) as usize).saturating_sub(lines.len()) / 2;

    queue!(out, MoveTo(x, y), Print(format!("╭{}╮", "─".repeat(inner))))?;
    for row in 0..box_h.saturating_sub(2) as usize {
        let text = row
            .checked_sub(top_pad)
            .and_then(|i| lines.get(i))
            .map(String::as_str)
            .unwrap_or("");
        queue!(
            out,
            MoveTo(x, y + 1 + row as u16),
            Print(format!("│{}│", center(text, inner, fill)))
        )?;
    }
    queue!(
        out,
        MoveTo(x, y + box_h.saturating_sub(1)),
        Print(format!("╰{}╯", "─".repeat(inner)))
    )?;

    queue!(out, SetAttribute(Attribute::Reset), ResetColor)
}

/// Text rows of a bezel, indicator first
pub fn bezel_lines(hud: &Hud, snap: &HudSnapshot, tick: u64) -> Vec<String> {
    let mut lines = Vec::new();

    match snap.indicator {
        IndicatorKind::Spinner => lines.push(SPINNER[(tick as usize) % SPINNER.len()].to_string()),
        IndicatorKind::Ring => lines.push(ring(snap.progress, snap.annular)),
        IndicatorKind::Bar => lines.push(bar(snap.progress, BAR_WIDTH)),
        IndicatorKind::CustomContent => {
            let indicator = hud.indicator();
            let glyph = indicator
                .custom_view()
                .and_then(|view| view.downcast_ref::<CustomGlyph>())
                .map(|glyph| glyph.0)
                .unwrap_or("?");
            lines.push(glyph.to_string());
        }
        IndicatorKind::None => {}
    }

    for text in [&snap.label, &snap.details] {
        if !text.is_empty() {
            lines.push(text.clone());
        }
    }
    if !snap.button_title.is_empty() {
        lines.push(format!("[ {} ]", snap.button_title));
    }
    lines
}

/// Outer bezel size in cells, honouring margin, minimum size and squareness
pub fn bezel_size(snap: &HudSnapshot, lines: &[String]) -> (u16, u16) {
    let pad = (snap.layout.margin / CELL_SCALE).round().max(0.0) as u16;
    let content_w = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16;
    let content_h = lines.len() as u16;

    let (min_w, min_h) = snap.layout.min_size;
    let mut w = content_w
        .saturating_add(pad.saturating_mul(2))
        .saturating_add(2)
        .max((min_w / CELL_SCALE).round() as u16);
    let mut h = content_h
        .saturating_add(pad)
        .saturating_add(2)
        .max((min_h / CELL_SCALE).round() as u16);

    // Terminal cells are about twice as tall as they are wide
    if snap.layout.square {
        w = w.max(h.saturating_mul(2));
        h = h.max(w / 2);
    }
    (w, h)
}

fn ring(progress: f32, annular: bool) -> String {
    let p = progress.clamp(0.0, 1.0);
    let index = (p * 4.0).round() as usize;
    let glyph = if annular { ARC[index] } else { PIE[index] };
    format!("{} {:>3.0}%", glyph, p * 100.0)
}

fn bar(progress: f32, width: usize) -> String {
    let p = progress.clamp(0.0, 1.0);
    let filled = ((p * width as f32).round() as usize).min(width);
    format!("{}{} {:>3.0}%", "█".repeat(filled), "░".repeat(width - filled), p * 100.0)
}

fn center(text: &str, width: usize, fill: &str) -> String {
    let text_w = text.width().min(width);
    let left = (width - text_w) / 2;
    let right = width - text_w - left;
    format!("{}{}{}", fill.repeat(left), text, fill.repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use progress_hud_core::{HudConfig, HudMode, HudRegistry, ManualScheduler};
    use std::rc::Rc;

    fn hud() -> Hud {
        let container = Container::new("root");
        Hud::new(&container, Rc::new(ManualScheduler::new()))
    }

    #[test]
    fn test_bar_clamps_for_display() {
        assert_eq!(bar(0.5, 4), "██░░  50%");
        assert_eq!(bar(1.7, 4), "████ 100%");
        assert_eq!(bar(-1.0, 4), "░░░░   0%");
    }

    #[test]
    fn test_ring_glyphs() {
        assert!(ring(0.0, false).starts_with('○'));
        assert!(ring(1.0, false).starts_with('●'));
        assert!(ring(1.0, true).starts_with('◯'));
    }

    #[test]
    fn test_center_uses_display_width() {
        assert_eq!(center("ab", 6, " "), "  ab  ");
        assert_eq!(center("✔", 3, "░"), "░✔░");
    }

    #[test]
    fn test_lines_follow_mode() {
        let hud = hud();
        hud.set_label("Loading");
        hud.set_mode(HudMode::TextOnly);
        assert_eq!(bezel_lines(&hud, &hud.snapshot(), 0), vec!["Loading".to_string()]);

        hud.set_mode(HudMode::DeterminateBar);
        hud.set_progress(0.25);
        let lines = bezel_lines(&hud, &hud.snapshot(), 0);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("25%"));
    }

    #[test]
    fn test_custom_glyph_downcast() {
        let hud = hud();
        hud.set_custom_view(Some(crate::state::checkmark()));
        hud.set_mode(HudMode::CustomContent);
        assert_eq!(bezel_lines(&hud, &hud.snapshot(), 0), vec!["✔".to_string()]);
    }

    #[test]
    fn test_square_bezel() {
        let hud = hud();
        hud.update_layout(|layout| layout.square = true);
        let snap = hud.snapshot();
        let (w, h) = bezel_size(&snap, &["x".to_string()]);
        assert!(w >= h * 2);
    }

    #[test]
    fn test_huge_margin_saturates() {
        let config = HudConfig::from_toml_str("margin = 1000000.0").unwrap();
        let hud = hud();
        config.apply(&hud);

        let (w, h) = bezel_size(&hud.snapshot(), &["x".to_string()]);
        assert_eq!(w, u16::MAX);
        assert_eq!(h, u16::MAX);
    }

    #[test]
    fn test_topmost_hud_painted_last() {
        let scheduler = Rc::new(ManualScheduler::new());
        let registry = HudRegistry::new(scheduler);
        let container = Container::new("root");
        container.add_view("background");

        let first = registry.show_hud(&container, false);
        let second = registry.show_hud(&container, false);

        let order = paint_order(&container);
        assert_eq!(order, vec![first, second]);
        assert_eq!(order.last(), HudRegistry::find_hud(&container).as_ref());
    }
}
