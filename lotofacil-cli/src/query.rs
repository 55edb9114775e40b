use anyhow::{Result, bail};
use lotofacil_db::db::{count_draws, fetch_all_draws, fetch_draw, fetch_latest_draws};
use lotofacil_db::models::Draw;
use lotofacil_db::rusqlite::Connection;

pub const MAX_LATEST: u32 = 100;

pub fn latest(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    if limit == 0 || limit > MAX_LATEST {
        bail!("Limite deve estar entre 1 e {}", MAX_LATEST);
    }
    fetch_latest_draws(conn, limit)
}

pub fn by_number(conn: &Connection, number: u32) -> Result<Option<Draw>> {
    if number == 0 {
        bail!("Número do concurso deve ser maior que zero");
    }
    fetch_draw(conn, number)
}

pub fn count(conn: &Connection) -> Result<u32> {
    count_draws(conn)
}

pub fn all(conn: &Connection) -> Result<Vec<Draw>> {
    fetch_all_draws(conn)
}
