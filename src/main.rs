use clap::Parser;
use relpack::commands;
use relpack::core::error::{PackError, print_error};
use std::path::PathBuf;

/// Build full and incremental release bundles from two repository revisions
#[derive(Parser)]
#[command(name = "relpack")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct RelpackCli {
  /// Output prefix directory (default: current working directory)
  #[arg(short, long)]
  prefix: Option<PathBuf>,

  /// Revision to build the release from
  #[arg(short, long)]
  current: String,

  /// Previously released revision (omit for a first release)
  #[arg(short, long)]
  last: Option<String>,

  /// Repository URL or local path
  #[arg(short, long)]
  repository: String,
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let heading = Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
  let error = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));

  clap::builder::Styles::styled()
    .usage(heading)
    .header(heading)
    .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .invalid(error)
    .error(error)
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

fn main() {
  let cli = RelpackCli::parse();

  if let Err(err) = commands::run_build(cli.prefix, cli.current, cli.last, cli.repository) {
    handle_error(err);
  }
}

fn handle_error(err: PackError) -> ! {
  print_error(&err);
  eprintln!("❌ build error");
  std::process::exit(err.exit_code().as_i32());
}
