use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::process::ProcessResult;
use lotofacil_db::models::Draw;
use lotofacil_stats::StatisticsReport;
use lotofacil_stats::runs::RunLengthRecord;

fn join_numbers(numbers: &[u8]) -> String {
    if numbers.is_empty() {
        return "—".to_string();
    }
    numbers
        .iter()
        .map(|n| format!("{:02}", n))
        .collect::<Vec<_>>()
        .join(" ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Nenhum concurso para exibir.");
        return;
    }

    let mut table = new_table(vec!["Concurso", "Data", "Dezenas", "Arrecadação"]);
    for draw in draws {
        let revenue = if draw.total_revenue > 0.0 {
            format!("R$ {:.2}", draw.total_revenue)
        } else {
            "—".to_string()
        };
        table.add_row(vec![
            draw.number.to_string(),
            draw.date.format("%d/%m/%Y").to_string(),
            join_numbers(&draw.numbers),
            revenue,
        ]);
    }
    println!("{table}");
}

pub fn display_draw_detail(draw: &Draw) {
    println!("\nConcurso {} — {}\n", draw.number, draw.date.format("%d/%m/%Y"));

    let mut table = new_table(vec!["Campo", "Valor"]);
    table.add_row(vec!["Dezenas".to_string(), join_numbers(&draw.numbers)]);
    table.add_row(vec!["Não sorteadas".to_string(), join_numbers(&draw.not_drawn())]);
    table.add_row(vec!["Repetidas do anterior".to_string(), join_numbers(&draw.repeated_from_previous)]);
    table.add_row(vec!["Ausentes no anterior".to_string(), join_numbers(&draw.absent_in_previous)]);
    table.add_row(vec!["Mais sorteadas antes".to_string(), join_numbers(&draw.pre_draw_most_drawn)]);
    table.add_row(vec!["Mais atrasadas antes".to_string(), join_numbers(&draw.pre_draw_most_overdue)]);
    table.add_row(vec!["Arrecadação".to_string(), format!("R$ {:.2}", draw.total_revenue)]);
    table.add_row(vec!["Ganhadores 15".to_string(), draw.prizes.winners_15.to_string()]);
    println!("{table}");
}

pub fn display_report(report: &StatisticsReport) {
    if report.is_empty() {
        println!("Nenhum concurso analisado.");
        return;
    }

    println!("\n📊 Estatísticas dos últimos {} concursos\n", report.total_analyzed());

    println!("── Mais sorteadas ──");
    let mut table = new_table(vec!["Dezena", "Ocorrências"]);
    for c in report.most_drawn() {
        table.add_row(vec![format!("{:02}", c.number), c.occurrences.to_string()]);
    }
    println!("{table}");

    println!("\n── Mais atrasadas ──");
    let mut table = new_table(vec!["Dezena", "Concursos sem sair", "Último concurso"]);
    for a in report.most_overdue() {
        let last_seen = a
            .last_seen_draw_number
            .map_or_else(|| "—".to_string(), |n| n.to_string());
        let color = if a.last_seen_draw_number.is_none() { Color::Red } else { Color::White };
        table.add_row(vec![
            Cell::new(format!("{:02}", a.number)),
            Cell::new(a.draws_since_last_seen).fg(color),
            Cell::new(last_seen),
        ]);
    }
    println!("{table}");

    println!("\n── Maiores sequências (saindo) ──");
    display_runs(report.longest_occurrence_runs());

    println!("\n── Maiores sequências (ausente) ──");
    display_runs(report.longest_absence_runs());
}

fn display_runs(records: &[RunLengthRecord]) {
    let mut table = new_table(vec!["Dezena", "Maior", "Sequências"]);
    for r in records {
        let runs = if r.runs.is_empty() {
            "—".to_string()
        } else {
            r.runs.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
        };
        table.add_row(vec![format!("{:02}", r.number), r.longest().to_string(), runs]);
    }
    println!("{table}");
}

pub fn display_process_summary(result: &ProcessResult, errors: u32) {
    println!("Processamento concluído:");
    println!("  Concursos na planilha : {}", result.total_processed);
    println!("  Novos                 : {}", result.total_new);
    if errors > 0 {
        println!("  Linhas com erro       : {}", errors);
    }
    display_report(&result.report);
}
