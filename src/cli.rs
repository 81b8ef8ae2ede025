use crate::config::MAX_CONTEXT_LINES;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "drawline-migrate")]
#[command(about = "Rewrite drawLine() test snippets to use drawLineAndOpenModal()")]
#[command(long_about = "drawline-migrate is a one-shot migration for the line properties modal E2E suite.

It rewrites every occurrence of

      // Draw a line (modal opens automatically)
      await page.getByRole('button', { name: 'Enable Draw tool' }).click();
      await drawLine(page, X1, Y1, X2, Y2);

into

      // Draw a line and open modal
      await page.getByRole('button', { name: 'Enable Draw tool' }).click();
      await drawLineAndOpenModal(page, X1, Y1, X2, Y2);

and overwrites the file in place. Running it again is a no-op.

EXAMPLES:
  drawline-migrate                                   Rewrite the default spec file
  drawline-migrate tests/e2e/other.spec.ts           Rewrite another file
  drawline-migrate --dry-run                         Preview the rewrite
  drawline-migrate config                            Show effective configuration")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Spec file to rewrite (default: tests/e2e/line-properties-modal.spec.ts)
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Preview the rewrite without modifying the file
    #[arg(short = 'd', long)]
    dry_run: bool,

    /// Number of context lines to show in the preview (0-10)
    #[arg(short = 'n', long, value_name = "NUM", value_parser = parse_context)]
    context: Option<usize>,

    /// Write a debug log to ~/.drawline-migrate/drawline-migrate.log
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the effective configuration
    #[command(long_about = "Print the effective configuration as TOML.

Settings are read from ~/.drawline-migrate/config.toml when it exists.

  [rewrite]
    target = \"tests/e2e/line-properties-modal.spec.ts\"
  [output]
    context_lines = 2             # Context lines in --dry-run output (max 10)
  [logging]
    debug = false                 # Log every run

EXAMPLES:
  drawline-migrate config                   Show configuration
  drawline-migrate config --path            Show config file location")]
    Config {
        /// Print the config file location instead
        #[arg(long)]
        path: bool,
    },
}

#[derive(Debug, PartialEq)]
pub enum Args {
    Rewrite {
        file: Option<String>,
        dry_run: bool,
        context: Option<usize>,
        debug: bool,
    },
    Config {
        path: bool,
    },
}

fn parse_context(value: &str) -> Result<usize, String> {
    let lines: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number of lines", value))?;

    if lines > MAX_CONTEXT_LINES {
        return Err(format!("at most {} context lines are allowed", MAX_CONTEXT_LINES));
    }

    Ok(lines)
}

pub fn parse_args() -> Args {
    Cli::parse().into()
}

impl From<Cli> for Args {
    fn from(cli: Cli) -> Self {
        match cli.command {
            Some(Commands::Config { path }) => Args::Config { path },
            None => Args::Rewrite {
                file: cli.file,
                dry_run: cli.dry_run,
                context: cli.context,
                debug: cli.debug,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Cli::try_parse_from(argv).unwrap().into()
    }

    #[test]
    fn test_no_arguments_rewrites_default_target() {
        assert_eq!(
            parse(&["drawline-migrate"]),
            Args::Rewrite { file: None, dry_run: false, context: None, debug: false }
        );
    }

    #[test]
    fn test_file_and_flags() {
        assert_eq!(
            parse(&["drawline-migrate", "-d", "-n", "0", "--debug", "a.spec.ts"]),
            Args::Rewrite {
                file: Some("a.spec.ts".to_string()),
                dry_run: true,
                context: Some(0),
                debug: true,
            }
        );
    }

    #[test]
    fn test_config_subcommand() {
        assert_eq!(parse(&["drawline-migrate", "config"]), Args::Config { path: false });
        assert_eq!(parse(&["drawline-migrate", "config", "--path"]), Args::Config { path: true });
    }

    #[test]
    fn test_invalid_context_rejected() {
        assert!(Cli::try_parse_from(["drawline-migrate", "-n", "lots"]).is_err());
    }

    #[test]
    fn test_context_upper_bound() {
        assert_eq!(
            parse(&["drawline-migrate", "-n", "10"]),
            Args::Rewrite { file: None, dry_run: false, context: Some(10), debug: false }
        );
        assert!(Cli::try_parse_from(["drawline-migrate", "-n", "11"]).is_err());
        assert!(Cli::try_parse_from(["drawline-migrate", "-d", "-n", "18446744073709551615"]).is_err());
    }
}
