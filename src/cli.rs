use clap::{Parser, Subcommand};
use codeshift_common::ProcessingMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "codeshift")]
#[command(about = "AIコード変換・デプロイ設定生成・クラスタテストツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// フォルダ内のファイルをAIで変換して保存
    Convert {
        /// 変換対象フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 変換指示
        #[arg(short, long)]
        prompt: String,

        /// 変換モード (single/multi)
        #[arg(short, long)]
        mode: Option<ProcessingMode>,

        /// 出力ディレクトリ（デフォルト: 入力フォルダ/codeshift-out）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 隠しファイル・ビルドディレクトリも含める
        #[arg(long)]
        include_hidden: bool,
    },

    /// 変換からデプロイ/テストまで一括実行
    Run {
        /// 変換対象フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 変換指示
        #[arg(short, long)]
        prompt: String,

        /// 変換モード (single/multi)
        #[arg(short, long)]
        mode: Option<ProcessingMode>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// デプロイ設定を生成してクラスタへ送信
        #[arg(long)]
        deploy: bool,

        /// ユニットテストを生成してクラスタで実行
        #[arg(long)]
        test: bool,

        /// 隠しファイル・ビルドディレクトリも含める
        #[arg(long)]
        include_hidden: bool,
    },

    /// 対話式コントロールパネル
    Console {
        /// 変換対象フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,

        /// 変換モード (single/multi)
        #[arg(short, long)]
        mode: Option<ProcessingMode>,

        /// 出力ディレクトリ
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 隠しファイル・ビルドディレクトリも含める
        #[arg(long)]
        include_hidden: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 変換APIのベースURLを設定
        #[arg(long)]
        set_ai_url: Option<String>,

        /// クラスタ実行APIのベースURLを設定
        #[arg(long)]
        set_deploy_url: Option<String>,

        /// 変換APIのタイムアウト（秒）を設定
        #[arg(long)]
        set_timeout: Option<u64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
