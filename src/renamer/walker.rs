//! 入力パスの走査

use super::{FileOutcome, RunConfig, process_file};
use crate::pdf::TextFragmentSource;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// 実行全体を止めるエラー
#[derive(Debug, Error)]
pub enum RunError {
    #[error("{0:?} is neither a file nor a directory")]
    InvalidPath(PathBuf),

    #[error("Failed to write report: {0}")]
    Output(#[from] io::Error),
}

/// 集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Renamed(_) => self.renamed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
            FileOutcome::Failed { .. } => self.failed += 1,
        }
    }
}

/// すべての入力パスを順に処理
///
/// ディレクトリは再帰的に走査して `.pdf` ファイルだけを、ファイルは拡張子に関係なく処理する。
/// 存在しないパスに当たった時点で中断する。
pub fn run<S, W>(paths: &[PathBuf], config: &RunConfig, out: &mut W) -> Result<RunSummary, RunError>
where
    S: TextFragmentSource,
    W: Write,
{
    let mut summary = RunSummary::default();

    for path in paths {
        let files = if path.is_dir() {
            collect_pdfs(path)
        } else if path.is_file() {
            vec![path.clone()]
        } else {
            writeln!(out, "Error for {}: Error with given path.", path.display())?;
            return Err(RunError::InvalidPath(path.clone()));
        };

        for file in files {
            let outcome = process_file::<S, W>(&file, config, out)?;
            writeln!(out, "{}", outcome.report_line())?;
            summary.record(&outcome);
        }
    }

    tracing::info!(
        "done: {} renamed, {} skipped, {} failed",
        summary.renamed,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

/// ディレクトリ配下の `.pdf` を走査順に集める
///
/// 先に一覧を作るので、処理中のリネームが走査に影響しない。
fn collect_pdfs(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("skipping unreadable entry under {:?}: {}", dir, e);
                None
            }
        })
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".pdf"))
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .collect()
}
