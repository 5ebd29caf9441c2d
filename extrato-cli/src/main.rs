use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use extrato_core::{filter_stats, filter_transactions, format_brl};
use extrato_ingest::{ExtractError, FileFormat};

mod app;
mod config;
mod gemini;
mod home;
mod pipeline;
mod report;

#[derive(Parser, Debug)]
#[command(name = "extrato", version, about = "Análise de extratos bancários com IA")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Painel interativo (TUI)
    Dashboard {
        /// Extrato (PDF ou Excel) para analisar já na abertura
        file: Option<PathBuf>,
    },

    /// Análise única: extrai, interpreta e imprime a tabela
    Analyze {
        /// Caminho do extrato (PDF ou Excel)
        file: PathBuf,

        /// Filtra transações por trecho da descrição
        #[arg(long)]
        search: Option<String>,

        /// Gera também o relatório em PDF
        #[arg(long)]
        export: bool,

        /// Imprime o extrato estruturado como JSON
        #[arg(long)]
        json: bool,
    },

    /// Imprime o texto bruto extraído do arquivo (sem chamar a IA)
    Extract {
        file: PathBuf,
    },

    /// Configuração em ~/.extrato/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Grava a configuração padrão
    Init,
    /// Mostra a configuração ativa
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EXTRATO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Dashboard { file } => {
            let cfg = config::load_config()?;
            let interpreter = gemini::GeminiInterpreter::from_config(&cfg)?;
            app::run_dashboard(&interpreter, file, cfg.export_dir())?;
        }

        Command::Analyze { file, search, export, json } => {
            analyze(&file, search.as_deref(), export, json)?;
        }

        Command::Extract { file } => {
            let bytes = std::fs::read(&file).with_context(|| format!("lendo {}", file.display()))?;
            let format = FileFormat::from_path(&file)
                .or_else(|| FileFormat::sniff(&bytes))
                .ok_or(ExtractError::UnsupportedFormat)?;
            print!("{}", extrato_ingest::extract_text(&bytes, format)?);
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                print!("{}", toml::to_string_pretty(&cfg)?);
            }
        },
    }

    Ok(())
}

fn analyze(file: &Path, search: Option<&str>, export: bool, json: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let interpreter = gemini::GeminiInterpreter::from_config(&cfg)?;

    let data = match pipeline::process_upload(file, &interpreter) {
        Ok(data) => data,
        Err(err) => bail!(pipeline::error_message(&err)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let term = search.unwrap_or_default();
    let filtered = filter_transactions(&data.transactions, term);
    let stats = filter_stats(&filtered);

    let bank = if data.bank_name.is_empty() { "Análise de Extrato" } else { &data.bank_name };
    println!("# {bank}");
    if !data.period.is_empty() {
        println!("Período: {}", data.period);
    }
    if !term.trim().is_empty() {
        println!("Filtro de busca: {}", term.trim());
    }
    println!("{} transações | Valor Total: R$ {}\n", stats.count, format_brl(stats.total));

    if filtered.is_empty() {
        println!("Nenhuma transação encontrada com os critérios de busca.");
    } else {
        println!("{:<12} {:<44} {:<8} {:>16}", "Data", "Descrição", "Tipo", "Valor");
        for row in report::report_rows(&filtered) {
            println!("{:<12} {:<44} {:<8} {:>16}", row[0], row[1], row[2], row[3]);
        }
    }

    if export {
        match report::export_report(&data, &filtered, term, &stats, &cfg.export_dir())? {
            Some(path) => println!("\nRelatório salvo em {}", path.display()),
            None => println!("\nNada para exportar."),
        }
    }

    Ok(())
}
