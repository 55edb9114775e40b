use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::path::{Path, PathBuf};

use crate::models::{Draw, PICK_COUNT, Prizes, validate_numbers};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    number                  INTEGER PRIMARY KEY,
    date                    TEXT NOT NULL,
    numbers                 TEXT NOT NULL,
    total_revenue           REAL NOT NULL DEFAULT 0.0,
    winners_15              INTEGER NOT NULL DEFAULT 0,
    winners_14              INTEGER NOT NULL DEFAULT 0,
    winners_13              INTEGER NOT NULL DEFAULT 0,
    winners_12              INTEGER NOT NULL DEFAULT 0,
    winners_11              INTEGER NOT NULL DEFAULT 0,
    payout_15               REAL NOT NULL DEFAULT 0.0,
    payout_14               REAL NOT NULL DEFAULT 0.0,
    payout_13               REAL NOT NULL DEFAULT 0.0,
    payout_12               REAL NOT NULL DEFAULT 0.0,
    payout_11               REAL NOT NULL DEFAULT 0.0,
    jackpot_15              REAL NOT NULL DEFAULT 0.0,
    absent_in_previous      TEXT NOT NULL DEFAULT '',
    repeated_from_previous  TEXT NOT NULL DEFAULT '',
    pre_draw_most_drawn     TEXT NOT NULL DEFAULT '',
    pre_draw_most_overdue   TEXT NOT NULL DEFAULT ''
);
";

const COLUMNS: &str = "number, date, numbers, total_revenue,
    winners_15, winners_14, winners_13, winners_12, winners_11,
    payout_15, payout_14, payout_13, payout_12, payout_11, jackpot_15,
    absent_in_previous, repeated_from_previous, pre_draw_most_drawn, pre_draw_most_overdue";

pub fn db_path() -> PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotofacil.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Não foi possível criar o diretório {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Não foi possível abrir a base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Falha na migração")?;
    Ok(())
}

fn join_numbers(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_numbers(raw: &str) -> Result<Vec<u8>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u8>()
                .with_context(|| format!("Dezena inválida na base: '{}'", s))
        })
        .collect()
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let changed = conn.execute(
        &format!(
            "INSERT OR IGNORE INTO draws ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
        ),
        params![
            draw.number,
            draw.date.format("%Y-%m-%d").to_string(),
            join_numbers(&draw.numbers),
            draw.total_revenue,
            draw.prizes.winners_15,
            draw.prizes.winners_14,
            draw.prizes.winners_13,
            draw.prizes.winners_12,
            draw.prizes.winners_11,
            draw.prizes.payout_15,
            draw.prizes.payout_14,
            draw.prizes.payout_13,
            draw.prizes.payout_12,
            draw.prizes.payout_11,
            draw.prizes.jackpot_15,
            join_numbers(&draw.absent_in_previous),
            join_numbers(&draw.repeated_from_previous),
            join_numbers(&draw.pre_draw_most_drawn),
            join_numbers(&draw.pre_draw_most_overdue),
        ],
    ).with_context(|| format!("Falha ao inserir o concurso {}", draw.number))?;
    Ok(changed > 0)
}

/// Inserts a batch in one transaction and returns how many rows were new.
pub fn insert_draws(conn: &Connection, draws: &[Draw]) -> Result<usize> {
    let tx = conn.unchecked_transaction()
        .context("Não foi possível iniciar a transação")?;
    let mut inserted = 0;
    for draw in draws {
        if insert_draw(&tx, draw)? {
            inserted += 1;
        }
    }
    tx.commit().context("Falha no commit")?;
    Ok(inserted)
}

/// Rewrites the derived fields of an already stored draw.
pub fn update_draw(conn: &Connection, draw: &Draw) -> Result<()> {
    let changed = conn.execute(
        "UPDATE draws SET
            absent_in_previous = ?2,
            repeated_from_previous = ?3,
            pre_draw_most_drawn = ?4,
            pre_draw_most_overdue = ?5
         WHERE number = ?1",
        params![
            draw.number,
            join_numbers(&draw.absent_in_previous),
            join_numbers(&draw.repeated_from_previous),
            join_numbers(&draw.pre_draw_most_drawn),
            join_numbers(&draw.pre_draw_most_overdue),
        ],
    ).with_context(|| format!("Falha ao atualizar o concurso {}", draw.number))?;
    if changed == 0 {
        bail!("Concurso {} não encontrado", draw.number);
    }
    Ok(())
}

struct RawDraw {
    number: u32,
    date: String,
    numbers: String,
    total_revenue: f64,
    prizes: Prizes,
    absent_in_previous: String,
    repeated_from_previous: String,
    pre_draw_most_drawn: String,
    pre_draw_most_overdue: String,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawDraw> {
    Ok(RawDraw {
        number: row.get(0)?,
        date: row.get(1)?,
        numbers: row.get(2)?,
        total_revenue: row.get(3)?,
        prizes: Prizes {
            winners_15: row.get(4)?,
            winners_14: row.get(5)?,
            winners_13: row.get(6)?,
            winners_12: row.get(7)?,
            winners_11: row.get(8)?,
            payout_15: row.get(9)?,
            payout_14: row.get(10)?,
            payout_13: row.get(11)?,
            payout_12: row.get(12)?,
            payout_11: row.get(13)?,
            jackpot_15: row.get(14)?,
        },
        absent_in_previous: row.get(15)?,
        repeated_from_previous: row.get(16)?,
        pre_draw_most_drawn: row.get(17)?,
        pre_draw_most_overdue: row.get(18)?,
    })
}

impl RawDraw {
    fn into_draw(self) -> Result<Draw> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .with_context(|| format!("Data inválida na base: '{}'", self.date))?;
        let numbers = split_numbers(&self.numbers)?;
        validate_numbers(&numbers)
            .with_context(|| format!("Concurso {} corrompido na base", self.number))?;
        let mut fixed = [0u8; PICK_COUNT];
        fixed.copy_from_slice(&numbers);
        fixed.sort_unstable();

        Ok(Draw {
            number: self.number,
            date,
            numbers: fixed,
            total_revenue: self.total_revenue,
            prizes: self.prizes,
            absent_in_previous: split_numbers(&self.absent_in_previous)?,
            repeated_from_previous: split_numbers(&self.repeated_from_previous)?,
            pre_draw_most_drawn: split_numbers(&self.pre_draw_most_drawn)?,
            pre_draw_most_overdue: split_numbers(&self.pre_draw_most_overdue)?,
        })
    }
}

fn query_draws<P: rusqlite::Params>(conn: &Connection, tail: &str, params: P) -> Result<Vec<Draw>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM draws {tail}"))?;
    let rows = stmt.query_map(params, read_row)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(RawDraw::into_draw).collect()
}

pub fn fetch_draw(conn: &Connection, number: u32) -> Result<Option<Draw>> {
    let raw = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM draws WHERE number = ?1"),
            [number],
            read_row,
        )
        .optional()?;
    raw.map(RawDraw::into_draw).transpose()
}

pub fn fetch_all_draws(conn: &Connection) -> Result<Vec<Draw>> {
    query_draws(conn, "ORDER BY number ASC", params![])
}

/// Most recent first.
pub fn fetch_latest_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    query_draws(conn, "ORDER BY number DESC LIMIT ?1", [limit])
}

/// Inclusive on both ends, oldest first.
pub fn fetch_draws_between(conn: &Connection, start: u32, end: u32) -> Result<Vec<Draw>> {
    query_draws(
        conn,
        "WHERE number >= ?1 AND number <= ?2 ORDER BY number ASC",
        [start, end],
    )
}

pub fn draw_exists(conn: &Connection, number: u32) -> Result<bool> {
    let found: Option<u32> = conn
        .query_row("SELECT number FROM draws WHERE number = ?1", [number], |row| row.get(0))
        .optional()?;
    Ok(found.is_some())
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

pub fn delete_all_draws(conn: &Connection) -> Result<usize> {
    let deleted = conn.execute("DELETE FROM draws", [])
        .context("Falha ao apagar os concursos")?;
    log::info!("{deleted} concursos apagados");
    Ok(deleted)
}
