use anyhow::Result;
use drawline_migrate::cli::{parse_args, Args};
use drawline_migrate::{config, logger, DiffFormatter, Migration, Rewriter};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args = parse_args();

    // The config file location must stay reachable even when the file is broken
    if args == (Args::Config { path: true }) {
        println!("{}", config::config_file_path()?.display());
        return Ok(());
    }

    let config = config::load_config()?;

    match args {
        Args::Rewrite {
            file,
            dry_run,
            context,
            debug,
        } => {
            if let Some(log_path) = logger::init_debug_logging(debug || config.logging.debug)? {
                tracing::debug!(log = %log_path.display(), "debug logging enabled");
            }

            let target = PathBuf::from(file.unwrap_or_else(|| config.rewrite.target.clone()));
            let context = context.unwrap_or(config.output.context_lines);
            rewrite(&target, dry_run, context)?;
        }
        Args::Config { .. } => {
            print!("{}", config::to_toml(&config)?);
        }
    }

    Ok(())
}

fn rewrite(target: &Path, dry_run: bool, context: usize) -> Result<()> {
    let rewriter = Rewriter::new(Migration::draw_line_and_open_modal()?);

    if dry_run {
        let diff = rewriter.preview(target)?;
        print!("{}", DiffFormatter::format_diff_with_context(&diff, context));
        return Ok(());
    }

    rewriter.apply_to_file(target)?;
    println!("Updated test file successfully!");

    Ok(())
}
