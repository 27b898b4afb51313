//! Styled console logging
//!
//! Stage banners and info lines go to stdout; errors are printed by
//! `core::error::print_error`. Styling degrades gracefully on dumb
//! terminals since anstyle only emits standard ANSI sequences.

use anstyle::{AnsiColor, Color, Style};

const SECTION: Style = Style::new()
  .bold()
  .fg_color(Some(Color::Ansi(AnsiColor::Yellow)));

/// Print a pipeline stage banner
pub fn section(msg: &str) {
  println!("{}🚀 -------- {}{}", SECTION.render(), msg, SECTION.render_reset());
}

/// Print an informational line
pub fn info(msg: &str) {
  println!("   {}", msg);
}

/// Print the success summary
pub fn success(msg: &str) {
  println!("\n✅ {}", msg);
}
