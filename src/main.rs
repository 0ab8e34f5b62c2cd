//! TR明細リネーマー - メインエントリポイント

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 環境変数の読み込み（.env の RUST_LOG も反映させるため先に読む）
    dotenvy::dotenv().ok();

    // ロギング初期化（標準出力は結果表示に使うので stderr へ）
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tr_renamer=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tr_renamer::cli::run()
}
