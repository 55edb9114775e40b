mod display;
mod import;
mod process;
mod query;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::display::{
    display_draw_detail, display_draws, display_process_summary, display_report,
};
use crate::import::{parse_date, read_csv};
use crate::process::process_draws;
use lotofacil_db::db::{
    db_path, delete_all_draws, fetch_draw, fetch_latest_draws, insert_draw, insert_draws, migrate,
    open_db,
};
use lotofacil_db::models::{Draw, PICK_COUNT, validate_numbers};
use lotofacil_db::rusqlite::Connection;
use lotofacil_stats::{StatsConfig, StatsEngine, TopK};

#[derive(Parser)]
#[command(name = "lotofacil", about = "Estatísticas dos concursos da Lotofácil")]
struct Cli {
    /// Caminho da base SQLite
    #[arg(long, global = true, env = "LOTOFACIL_DB")]
    db: Option<PathBuf>,

    /// Arquivo JSON de configuração das estatísticas
    #[arg(long, global = true, env = "LOTOFACIL_STATS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importar os concursos de um arquivo CSV
    Import {
        /// Caminho do arquivo CSV (separador ';')
        #[arg(short, long, default_value = "assets/lotofacil.csv")]
        file: PathBuf,
    },

    /// Mostrar o caminho da base de dados
    DbPath,

    /// Listar os últimos concursos
    List {
        /// Quantidade de concursos (1-100)
        #[arg(short, long, default_value = "10")]
        last: u32,

        /// Listar todos os concursos
        #[arg(long, conflicts_with = "last")]
        all: bool,
    },

    /// Detalhar um concurso
    Show {
        number: u32,
    },

    /// Estatísticas: mais sorteadas, mais atrasadas e sequências
    Stats {
        /// Janela de análise (padrão: latest_window da configuração)
        #[arg(short, long)]
        window: Option<u32>,

        /// Tamanho do ranking (padrão: top_k da configuração)
        #[arg(short, long)]
        top: Option<usize>,

        /// Saída em JSON
        #[arg(long)]
        json: bool,
    },

    /// Importar, vincular e anotar os concursos novos
    Process {
        /// Caminho do arquivo CSV (separador ';')
        #[arg(short, long, default_value = "assets/lotofacil.csv")]
        file: PathBuf,
    },

    /// Adicionar um concurso manualmente
    Add,

    /// Apagar todos os concursos da base
    Reset {
        /// Não pedir confirmação
        #[arg(long)]
        yes: bool,
    },
}

fn load_config(path: Option<&Path>) -> Result<StatsConfig> {
    match path {
        Some(path) => StatsConfig::load(path)
            .with_context(|| format!("Configuração inválida em {:?}", path)),
        None => Ok(StatsConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let path = cli.db.clone().unwrap_or_else(db_path);
    let engine = StatsEngine::new(load_config(cli.config.as_deref())?)?;

    let conn = open_db(&path)?;
    migrate(&conn)?;
    log::debug!("Base aberta em {}", path.display());

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last, all } => cmd_list(&conn, last, all),
        Command::Show { number } => cmd_show(&conn, number),
        Command::Stats { window, top, json } => cmd_stats(&conn, &engine, window, top, json),
        Command::Process { file } => cmd_process(&conn, &engine, &file),
        Command::Add => cmd_add(&conn),
        Command::Reset { yes } => cmd_reset(&conn, yes),
    }
}

fn cmd_import(conn: &Connection, file: &Path) -> Result<()> {
    let result = read_csv(file)?;
    let inserted = insert_draws(conn, &result.draws)?;

    println!("Importação concluída:");
    println!("  Linhas lidas      : {}", result.total_records);
    println!("  Inseridos         : {}", inserted);
    println!("  Já existentes     : {}", result.draws.len() - inserted);
    if result.errors > 0 {
        println!("  Erros             : {}", result.errors);
    }
    Ok(())
}

fn empty_base(conn: &Connection) -> Result<bool> {
    if query::count(conn)? == 0 {
        println!("Base vazia. Execute antes: lotofacil import");
        return Ok(true);
    }
    Ok(false)
}

fn cmd_list(conn: &Connection, last: u32, all: bool) -> Result<()> {
    if empty_base(conn)? {
        return Ok(());
    }
    let draws = if all {
        query::all(conn)?
    } else {
        query::latest(conn, last)?
    };
    display_draws(&draws);
    Ok(())
}

fn cmd_show(conn: &Connection, number: u32) -> Result<()> {
    match query::by_number(conn, number)? {
        Some(draw) => display_draw_detail(&draw),
        None => println!("Concurso {} não encontrado.", number),
    }
    Ok(())
}

fn cmd_stats(
    conn: &Connection,
    engine: &StatsEngine,
    window: Option<u32>,
    top: Option<usize>,
    json: bool,
) -> Result<()> {
    if empty_base(conn)? {
        return Ok(());
    }
    let window = window.unwrap_or(engine.config().latest_window);
    if window == 0 {
        bail!("A janela de análise deve ser positiva");
    }
    let top_k = match top {
        Some(k) => TopK::new(k)?,
        None => engine.config().top_k,
    };

    let draws = fetch_latest_draws(conn, window)?;
    let report = engine.compute_top(&draws, top_k);

    if json {
        println!("{}", report.to_json()?);
    } else {
        display_report(&report);
    }
    Ok(())
}

fn cmd_process(conn: &Connection, engine: &StatsEngine, file: &Path) -> Result<()> {
    log::info!("Iniciando o processamento de {:?}", file);
    let imported = read_csv(file)?;
    let result = process_draws(conn, &imported.draws, engine)?;
    display_process_summary(&result, imported.errors);
    Ok(())
}

fn cmd_add(conn: &Connection) -> Result<()> {
    println!("Adicionar concurso manualmente\n");

    let number: u32 = prompt("Número do concurso : ")?
        .parse()
        .context("Número de concurso inválido")?;
    let date = parse_date(&prompt("Data (DD/MM/AAAA) : ")?)?;
    let numbers = prompt_numbers()?;

    let mut draw = Draw::new(number, date, &numbers)?;
    if number > 1 {
        let previous = fetch_draw(conn, number - 1)?;
        draw.link_previous(previous.as_ref());
    }

    println!("\nConcurso a inserir :");
    display_draws(std::slice::from_ref(&draw));

    let confirm = prompt("\nConfirmar a inserção ? (s/n) : ")?;
    if confirm.trim().eq_ignore_ascii_case("s") {
        if insert_draw(conn, &draw)? {
            println!("Concurso inserido com sucesso.");
        } else {
            println!("Este concurso já existe (ignorado).");
        }
    } else {
        println!("Inserção cancelada.");
    }
    Ok(())
}

fn cmd_reset(conn: &Connection, yes: bool) -> Result<()> {
    if !yes {
        let confirm = prompt("Apagar todos os concursos ? (s/n) : ")?;
        if !confirm.trim().eq_ignore_ascii_case("s") {
            println!("Operação cancelada.");
            return Ok(());
        }
    }
    let deleted = delete_all_draws(conn)?;
    println!("{} concursos apagados.", deleted);
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erro de leitura")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers() -> Result<Vec<u8>> {
    loop {
        let input = prompt("15 dezenas (separadas por espaço, 1-25) : ")?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == PICK_COUNT => match validate_numbers(&v) {
                Ok(()) => return Ok(v),
                Err(e) => println!("{}. Tente novamente.", e),
            },
            _ => println!("Informe exatamente 15 dezenas. Tente novamente."),
        }
    }
}
