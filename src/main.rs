use clap::Parser;
use codeshift::{cli, client, config, console, error, export, logging, reporter, scanner};
use cli::{Cli, Commands};
use codeshift_common::{convert_files, deploy_all, test_project, ProcessingMode, SessionEvent, SessionState};
use config::Config;
use error::Result;
use reporter::Reporter;
use scanner::IntakeOptions;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Convert { folder, prompt, mode, output, include_hidden } => {
            println!("🔁 codeshift - 変換\n");
            let mode = mode.unwrap_or(config.default_mode);
            let output_dir = export::resolve_output_dir(&folder, output, config.output_dir.as_deref());
            let backend = client::HttpBackend::from_config(&config)?;

            let mut reporter = load(&folder, mode, include_hidden, 3)?;
            convert(&backend, &mut reporter, &prompt, 3).await?;
            save_conversion(&reporter.state, &output_dir, 3)?;

            println!("\n✅ 変換完了");
        }

        Commands::Run { folder, prompt, mode, output, deploy, test, include_hidden } => {
            println!("🚀 codeshift - 一括処理\n");
            let mode = mode.unwrap_or(config.default_mode);
            let output_dir = export::resolve_output_dir(&folder, output, config.output_dir.as_deref());
            let backend = client::HttpBackend::from_config(&config)?;
            let steps = 3 + usize::from(deploy) + usize::from(test);
            let mut step = 2;

            let mut reporter = load(&folder, mode, include_hidden, steps)?;
            convert(&backend, &mut reporter, &prompt, steps).await?;

            if deploy {
                step += 1;
                println!("[{}/{}] デプロイ設定を生成して送信中...", step, steps);
                let records = reporter.state.records.clone();
                let mut downloader = export::DirDownloader::new(&output_dir);
                let summary = deploy_all(&backend, &mut downloader, &records, |ev| reporter.apply(ev)).await;
                println!("✔ 送信 {}件 / 失敗 {}件\n", summary.submitted, summary.failed);
                // テストでログが差し替わる前に保存
                export::write_logs(&reporter.state.logs, &output_dir.join("deploy"))?;
            }

            if test {
                step += 1;
                println!("[{}/{}] プロジェクトをテスト中...", step, steps);
                let records = reporter.state.records.clone();
                let summary = test_project(&backend, &records, |ev| reporter.apply(ev)).await;
                println!("✔ 送信 {}件 / 失敗 {}件\n", summary.submitted, summary.failed);
                export::write_logs(&reporter.state.logs, &output_dir.join("test"))?;
            }

            save_conversion(&reporter.state, &output_dir, steps)?;
            println!("\n✅ 完了");
        }

        Commands::Console { folder, mode, output, include_hidden } => {
            let mode = mode.unwrap_or(config.default_mode);
            let output_dir = export::resolve_output_dir(&folder, output, config.output_dir.as_deref());
            let backend = client::HttpBackend::from_config(&config)?;

            let records = scanner::read_folder(&folder, IntakeOptions { include_hidden })?;
            println!("✔ {}件のファイルを読み込み\n", records.len());
            let mut state = SessionState::new(mode);
            state.apply(SessionEvent::Uploaded(records));

            console::Console::new(&backend, state, output_dir).run().await?;
        }

        Commands::Config { set_ai_url, set_deploy_url, set_timeout, show } => {
            let mut config = config;

            if let Some(url) = set_ai_url {
                config.set_ai_url(url)?;
                println!("✔ 変換APIのURLを設定しました");
            }

            if let Some(url) = set_deploy_url {
                config.set_deploy_url(url)?;
                println!("✔ クラスタ実行APIのURLを設定しました");
            }

            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました");
            }

            if show {
                println!("設定:");
                println!("  変換API: {}", config.ai_url());
                println!("  クラスタ実行API: {}", config.deploy_url());
                println!("  タイムアウト: {}秒（クラスタ実行: {}秒）", config.timeout_seconds, config.deploy_timeout_seconds);
                println!("  デフォルトモード: {}", config.default_mode.label());
                println!(
                    "  出力先: {}",
                    config
                        .output_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "入力フォルダ/codeshift-out".into())
                );
            }
        }
    }

    Ok(())
}

fn load(folder: &Path, mode: ProcessingMode, include_hidden: bool, steps: usize) -> Result<Reporter> {
    println!("[1/{}] フォルダを読み込み中...", steps);
    let records = scanner::read_folder(folder, IntakeOptions { include_hidden })?;
    let unreadable = records.iter().filter(|r| r.has_error()).count();
    println!("✔ {}件のファイルを読み込み（読み込み失敗 {}件）\n", records.len(), unreadable);

    let mut reporter = Reporter::new(SessionState::new(mode));
    reporter.apply(SessionEvent::Uploaded(records));
    Ok(reporter)
}

async fn convert(backend: &client::HttpBackend, reporter: &mut Reporter, prompt: &str, steps: usize) -> Result<()> {
    let mode = reporter.state.mode;
    println!("[2/{}] AI変換中...（{}）", steps, mode.label());
    let records = reporter.state.records.clone();
    convert_files(backend, mode, &records, prompt, |ev| reporter.apply(ev)).await?;

    let failed = reporter.state.records.iter().filter(|r| r.has_error()).count();
    println!("✔ 変換完了（失敗 {}件）\n", failed);
    Ok(())
}

fn save_conversion(state: &SessionState, output_dir: &Path, steps: usize) -> Result<()> {
    println!("[{}/{}] 結果を保存中...", steps, steps);
    let files = export::write_converted_files(&state.records, output_dir)?;
    let report = export::write_advice_report(&state.records, output_dir)?;
    println!("✔ 変換結果 {}件: {}", files.len(), output_dir.display());
    println!("✔ レポート: {}", report.display());
    Ok(())
}
