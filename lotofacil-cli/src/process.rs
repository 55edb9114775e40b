use std::collections::{HashMap, HashSet};

use anyhow::Result;
use lotofacil_db::db::{
    draw_exists, fetch_draw, fetch_draws_between, fetch_latest_draws, insert_draws, update_draw,
};
use lotofacil_db::models::Draw;
use lotofacil_db::rusqlite::Connection;
use lotofacil_stats::{StatisticsReport, StatsEngine};

const BATCH_SIZE: usize = 100;

pub struct ProcessResult {
    pub total_processed: usize,
    pub total_new: usize,
    pub report: StatisticsReport,
}

/// Stores the draws that are not in the base yet, linked to their previous
/// draw and annotated with the rankings of the window that preceded them,
/// then ranks the latest stored window.
pub fn process_draws(conn: &Connection, draws: &[Draw], engine: &StatsEngine) -> Result<ProcessResult> {
    // First copy of a draw number wins; later copies are skipped below.
    let mut index: HashMap<u32, &Draw> = HashMap::new();
    for draw in draws {
        index.entry(draw.number).or_insert(draw);
    }
    let mut seen = HashSet::new();
    let window = engine.config().latest_window;
    let mut total_new = 0;

    for (batch_no, chunk) in draws.chunks(BATCH_SIZE).enumerate() {
        let mut fresh = Vec::new();
        for draw in chunk {
            if !seen.insert(draw.number) {
                log::warn!("Concurso {} repetido na entrada, ignorado", draw.number);
                continue;
            }
            if draw_exists(conn, draw.number)? {
                continue;
            }
            let mut draw = draw.clone();
            if draw.number > 1 {
                let stored;
                let previous = match index.get(&(draw.number - 1)) {
                    Some(&prev) => Some(prev),
                    None => {
                        stored = fetch_draw(conn, draw.number - 1)?;
                        stored.as_ref()
                    }
                };
                draw.link_previous(previous);
            }
            fresh.push(draw);
        }

        if fresh.is_empty() {
            continue;
        }
        let inserted = insert_draws(conn, &fresh)?;
        total_new += inserted;
        log::info!("{} novos concursos salvos (lote {})", inserted, batch_no + 1);

        for draw in fresh.iter_mut().filter(|d| d.number > window) {
            let preceding = fetch_draws_between(conn, draw.number - window, draw.number - 1)?;
            let report = engine.compute(&preceding);
            draw.pre_draw_most_drawn = report.most_drawn_numbers();
            draw.pre_draw_most_overdue = report.most_overdue_numbers();
            update_draw(conn, draw)?;
        }
    }

    log::info!("Calculando estatísticas dos últimos {} concursos", window);
    let latest = fetch_latest_draws(conn, window)?;
    let report = engine.compute(&latest);

    Ok(ProcessResult {
        total_processed: draws.len(),
        total_new,
        report,
    })
}
