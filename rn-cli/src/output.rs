use chrono::{DateTime, Utc};

use rn_core::engine::Countdown;
use rn_core::stats::{format_best_time, EventStats};
use rn_core::{Event, RunnerStatistics};

/// One line per event, mirroring the fields on the site's event cards.
pub fn print_events(filtered: &[Event], total: usize, now: DateTime<Utc>) {
    println!("Viser {} av {} arrangementer", filtered.len(), total);
    println!();

    if filtered.is_empty() {
        println!("Ingen arrangementer matcher filtrene.");
        return;
    }

    for event in filtered {
        let countdown = event
            .event_date
            .map(|date| Countdown::new(date, now).to_string())
            .unwrap_or_else(|| "dato ukjent".to_string());
        let price = if event.is_free {
            "Gratis".to_string()
        } else {
            format!("{:.0} kr", event.entry_fee)
        };
        let registration = if event.registration_open {
            "Påmelding åpen"
        } else {
            "Påmelding stengt"
        };
        let date = event
            .event_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "?".to_string());

        println!(
            "{:<35} {:<10} {:<22} {:<13} {:<10} {:<16} {}",
            event.title,
            date,
            event.county.to_string(),
            event.distance_category.to_string(),
            price,
            registration,
            countdown
        );
    }
}

pub fn print_leaderboard(rows: &[RunnerStatistics], year: i32) {
    println!("Topp {} løpere {}", rows.len(), year);
    println!();
    for (rank, row) in rows.iter().enumerate() {
        let name = row.full_name.as_deref().unwrap_or("(ukjent)");
        let county = row
            .home_county
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>3}. {:<25} {:<22} {:>5} poeng  {:>3} løp  {:>8.1} km  5K {:<8} 10K {:<8}",
            rank + 1,
            name,
            county,
            row.ranking_points,
            row.total_races,
            row.total_distance_km,
            format_best_time(row.best_5k_time),
            format_best_time(row.best_10k_time),
        );
    }
}

pub fn print_event_stats(stats: &EventStats) {
    println!("Totalt antall arrangementer: {}", stats.total_events);
    println!("Kommende arrangementer:      {}", stats.upcoming_events);
    println!("Påmeldte deltakere:          {}", stats.total_participants);
}
