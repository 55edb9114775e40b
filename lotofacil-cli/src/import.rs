use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::path::Path;

use lotofacil_db::models::{Draw, PICK_COUNT};

const MIN_COLUMNS: usize = 18;
const FIRST_NUMBER_COLUMN: usize = 2;
const REVENUE_COLUMN: usize = 17;

/// Accepts `109156,50`, `1.234.567,89` and plain `42.5`.
pub fn parse_brazilian_decimal(s: &str) -> Result<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let normalized = if s.contains(',') {
        s.replace('.', "").replace(',', ".")
    } else {
        s.to_string()
    };
    normalized
        .parse::<f64>()
        .with_context(|| format!("Não foi possível interpretar o número: '{}'", s))
}

pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    let parts: Vec<&str> = raw.split(['/', '-']).collect();
    if parts.len() != 3 {
        bail!("Formato de data inválido: '{}'", raw);
    }
    if parts[0].len() == 4 {
        return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Data ISO inválida: '{}'", raw));
    }
    let day: u32 = parts[0].parse().with_context(|| format!("Dia inválido: '{}'", raw))?;
    let month: u32 = parts[1].parse().with_context(|| format!("Mês inválido: '{}'", raw))?;
    let mut year: i32 = parts[2].parse().with_context(|| format!("Ano inválido: '{}'", raw))?;
    if parts[2].len() == 2 {
        year += if year >= 70 { 1900 } else { 2000 };
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("Data inexistente: '{}'", raw))
}

fn field(record: &csv::StringRecord, idx: usize) -> Result<&str> {
    record
        .get(idx)
        .map(str::trim)
        .with_context(|| format!("Campo ausente no índice {}", idx))
}

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    if record.len() < MIN_COLUMNS {
        bail!("Linha com {} colunas (mínimo {})", record.len(), MIN_COLUMNS);
    }
    let get = |idx: usize| field(record, idx);

    let number_raw = get(0)?;
    let number: u32 = number_raw
        .parse()
        .with_context(|| format!("Número de concurso inválido: '{}'", number_raw))?;

    let date = parse_date(get(1)?)?;

    let numbers = (FIRST_NUMBER_COLUMN..FIRST_NUMBER_COLUMN + PICK_COUNT)
        .map(|idx| {
            let s = get(idx)?;
            s.parse::<u8>()
                .with_context(|| format!("Dezena inválida '{}' (índice {})", s, idx))
        })
        .collect::<Result<Vec<u8>>>()?;

    let revenue = parse_brazilian_decimal(get(REVENUE_COLUMN)?).unwrap_or(0.0);

    let draw = Draw::new(number, date, &numbers)
        .with_context(|| format!("Concurso {} inválido", number))?;
    Ok(draw.with_revenue(revenue))
}

#[derive(Debug)]
pub struct ImportResult {
    pub total_records: u32,
    pub errors: u32,
    /// Sorted by draw number, oldest first.
    pub draws: Vec<Draw>,
}

pub fn read_csv(path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Não foi possível abrir {:?}", path))?;

    let mut result = ImportResult {
        total_records: 0,
        errors: 0,
        draws: Vec::new(),
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result.map_err(anyhow::Error::from).and_then(|r| parse_record(&r)) {
            Ok(draw) => result.draws.push(draw),
            Err(e) => {
                log::warn!("Erro ao processar linha {}: {:#}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    // Stable sort, so the first row of a repeated draw number is the one kept.
    result.draws.sort_by_key(|d| d.number);
    let before = result.draws.len();
    result.draws.dedup_by_key(|d| d.number);
    let duplicates = (before - result.draws.len()) as u32;
    if duplicates > 0 {
        log::warn!("{} linhas com número de concurso repetido ignoradas", duplicates);
        result.errors += duplicates;
    }
    log::info!(
        "{} concursos encontrados em {:?} ({} linhas com erro)",
        result.draws.len(),
        path,
        result.errors
    );
    Ok(result)
}
