//! コマンドライン - 引数解析と実行

use crate::pdf::PdfDocument;
use crate::renamer::{self, RunConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

/// Trade Republic のPDF明細を内容に基づいてリネーム
#[derive(Parser, Debug)]
#[command(
    name = "tr_renamer",
    version,
    about = "Rename Trade Republic PDF statements based on their content"
)]
pub struct Cli {
    /// Path to directory or PDF file (default: current directory)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Perform a dry run without renaming files
    #[arg(long, env = "TR_RENAMER_DRY_RUN")]
    pub dry_run: bool,

    /// Print the text fragments of every processed PDF
    #[arg(long)]
    pub print_fragments: bool,
}

impl Cli {
    pub fn config(&self) -> RunConfig {
        RunConfig {
            dry_run: self.dry_run,
            print_fragments: self.print_fragments,
        }
    }

    /// 入力パス（指定なしならカレントディレクトリ）
    fn input_paths(&self) -> Result<Vec<PathBuf>> {
        if !self.paths.is_empty() {
            return Ok(self.paths.clone());
        }
        let cwd = std::env::current_dir().context("Cannot determine current directory")?;
        Ok(vec![cwd])
    }

    /// 実行
    pub fn execute(&self) -> Result<()> {
        let config = self.config();
        let paths = self.input_paths()?;

        let stdout = io::stdout();
        let mut out = stdout.lock();

        if config.dry_run {
            writeln!(out, "Performing dry-run. No files will be renamed.")?;
        }

        let summary = renamer::run::<PdfDocument, _>(&paths, &config, &mut out)?;
        tracing::debug!("{:?}", summary);
        Ok(())
    }
}

/// 引数を解析して実行
pub fn run() -> Result<()> {
    Cli::parse().execute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_paths() {
        let cli = Cli::try_parse_from(["tr_renamer", "--dry-run", "a.pdf", "statements"]).unwrap();
        assert_eq!(cli.paths, vec![PathBuf::from("a.pdf"), PathBuf::from("statements")]);
        assert_eq!(
            cli.config(),
            RunConfig {
                dry_run: true,
                print_fragments: false
            }
        );
    }

    #[test]
    fn no_paths_means_current_directory() {
        let cli = Cli::try_parse_from(["tr_renamer", "--print-fragments"]).unwrap();
        assert!(cli.config().print_fragments);
        let paths = cli.input_paths().unwrap();
        assert_eq!(paths, vec![std::env::current_dir().unwrap()]);
    }
}
