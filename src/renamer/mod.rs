//! リネーム処理 - 1ファイルごとの 判定 → 抽出 → リネーム

mod walker;

pub use walker::{RunError, RunSummary, run};

use crate::parser::{Classification, ExtractError, classify};
use crate::pdf::{PdfError, TextFragmentSource};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 実行設定（起動後は変更しない）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// リネームせずに結果だけ表示する
    pub dry_run: bool,
    /// 各PDFのテキスト断片を表示する（マーカー調査用）
    pub print_fragments: bool,
}

/// リネーム計画
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// 1ファイル分の処理で起きた問題
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Load(#[from] PdfError),

    #[error("Does not seem to be a Trade Republic file. Skipping.")]
    ForeignIssuer,

    #[error("PDF file could not be matched to any known document type.")]
    Unrecognized,

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("File already exists. Skipping.")]
    TargetExists,

    #[error("Rename failed: {0}")]
    Rename(#[source] io::Error),
}

/// 処理結果
#[derive(Debug)]
pub enum FileOutcome {
    /// リネームした（ドライランでは予定）
    Renamed(RenamePlan),
    /// 対象外・既存ファイルのためスキップ
    Skipped { subject: String, reason: FileError },
    /// 読み込み・抽出・リネームに失敗
    Failed { subject: String, reason: FileError },
}

impl FileOutcome {
    /// 報告用の1行
    pub fn report_line(&self) -> String {
        match self {
            Self::Renamed(plan) => {
                format!("{} -> {}", plan.source.display(), plan.target.display())
            }
            Self::Skipped { subject, reason } | Self::Failed { subject, reason } => {
                format!("Error for {subject}: {reason}")
            }
        }
    }
}

/// 単一のPDFファイルを処理
///
/// 文書は関数を抜ける時点でドロップされる。`out` は断片表示にだけ使う。
pub fn process_file<S, W>(path: &Path, config: &RunConfig, out: &mut W) -> io::Result<FileOutcome>
where
    S: TextFragmentSource,
    W: Write,
{
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let document = match S::load(path) {
        Ok(document) => document,
        Err(e) => {
            return Ok(FileOutcome::Failed {
                subject: file_name,
                reason: e.into(),
            });
        }
    };
    let fragments = document.fragments();

    if config.print_fragments {
        for fragment in fragments {
            writeln!(out, "{}", fragment.text)?;
        }
    }

    let doc_type = match classify(fragments) {
        Classification::Known(doc_type) => doc_type,
        Classification::ForeignIssuer => {
            return Ok(FileOutcome::Skipped {
                subject: file_name,
                reason: FileError::ForeignIssuer,
            });
        }
        Classification::Unrecognized => {
            return Ok(FileOutcome::Skipped {
                subject: path.display().to_string(),
                reason: FileError::Unrecognized,
            });
        }
    };
    tracing::debug!("{:?}: classified as {:?}", path, doc_type);

    let new_name = match doc_type.build_filename(fragments) {
        Ok(name) => name,
        Err(e) => {
            return Ok(FileOutcome::Failed {
                subject: file_name,
                reason: e.into(),
            });
        }
    };

    // リネーム前に文書を解放
    drop(document);

    let directory = path.parent().unwrap_or(Path::new(""));
    let plan = RenamePlan {
        source: path.to_path_buf(),
        target: directory.join(new_name),
    };

    if plan.target.exists() {
        return Ok(FileOutcome::Skipped {
            subject: plan.target.display().to_string(),
            reason: FileError::TargetExists,
        });
    }

    if !config.dry_run {
        if let Err(e) = std::fs::rename(&plan.source, &plan.target) {
            return Ok(FileOutcome::Failed {
                subject: plan.source.display().to_string(),
                reason: FileError::Rename(e),
            });
        }
        tracing::info!("renamed {:?} -> {:?}", plan.source, plan.target);
    }

    Ok(FileOutcome::Renamed(plan))
}
