use crate::color::Rgb;
use crate::graphics::{Framebuffer, Overlay};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};

/// Current terminal size in cells (columns, rows)
pub fn size() -> io::Result<(u16, u16)> {
    match termsize::get() {
        Some(size) if size.cols > 0 && size.rows > 0 => Ok((size.cols, size.rows)),
        _ => terminal::size(),
    }
}

fn to_color(color: Rgb) -> Color {
    let (r, g, b) = color.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Raw-mode alternate screen with mouse capture, restored on drop
pub struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(mut out: W) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        Ok(TerminalGuard { out })
    }

    /// Draws the framebuffer two pixels per cell with the overlay on top
    pub fn present(&mut self, frame: &Framebuffer, overlay: &Overlay) -> io::Result<()> {
        write_frame(&mut self.out, frame, overlay)?;
        self.out.flush()
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            ResetColor,
            cursor::Show,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Queues the commands for one frame without flushing
pub fn write_frame<W: Write>(out: &mut W, frame: &Framebuffer, overlay: &Overlay) -> io::Result<()> {
    let rows = overlay.rows().min(frame.height() / 2);
    let columns = overlay.columns().min(frame.width());
    let mut current: Option<(Color, Color)> = None;

    for row in 0..rows {
        queue!(out, cursor::MoveTo(0, row as u16))?;
        for column in 0..columns {
            let top = frame.pixel(column, row * 2);
            let bottom = frame.pixel(column, row * 2 + 1);
            let (fg, bg, ch) = match overlay.glyph(column, row) {
                Some(glyph) => (to_color(glyph.color), to_color(top.lerp(bottom, 0.5)), glyph.ch),
                None => (to_color(top), to_color(bottom), '▀'),
            };
            if current != Some((fg, bg)) {
                queue!(out, SetForegroundColor(fg), SetBackgroundColor(bg))?;
                current = Some((fg, bg));
            }
            queue!(out, Print(ch))?;
        }
    }
    queue!(out, ResetColor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_frame_emits_cells_and_text() {
        let frame = Framebuffer::new(3, 4);
        let mut overlay = Overlay::new(3, 2);
        overlay.put_text(0, 1, "hi", Rgb::WHITE);

        let mut out = Vec::new();
        write_frame(&mut out, &frame, &overlay).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches('▀').count(), 4);
        assert!(text.contains('h'));
        assert!(text.contains('i'));
    }

    #[test]
    fn test_write_frame_skips_repeated_colors() {
        let frame = Framebuffer::new(4, 2);
        let overlay = Overlay::new(4, 1);
        let mut out = Vec::new();
        write_frame(&mut out, &frame, &overlay).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("\x1b[38;2;").count(), 1);
    }
}
