use chrono::{Datelike, Utc};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

const DURATION_SECS: u64 = 20;
const RACE_WRITERS: usize = 50;

struct Target {
    name: &'static str,
    url: String,
}

fn base_url() -> String {
    std::env::var("BENCH_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

#[tokio::main]
async fn main() {
    let base = base_url();
    println!("{}", "🚀 Starting Benchmark Suite".bold().green());
    println!("Target URL: {}", base);

    let client = match Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{} {}", "❌ Could not build HTTP client:".red().bold(), e);
            return;
        }
    };

    if client.get(format!("{}/health", base)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base).red().bold());
        return;
    }

    same_slot_race(&client, &base).await;

    let next_year = Utc::now().year() + 1;
    let targets = vec![
        Target { name: "Health Check", url: format!("{}/health", base) },
        Target { name: "Booked Dates", url: format!("{}/api/booked-dates", base) },
        Target { name: "Month Calendar (big hall)", url: format!("{}/api/calendar/big?year={}&month=6", base, next_year) },
        Target { name: "Price Quote", url: format!("{}/api/quote?hall=small&package=premium", base) },
        Target { name: "Booking List", url: format!("{}/api/bookings", base) },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }
}

/// Fires many simultaneous bookings for one (hall, date). Exactly one should
/// win while all writers hit the same process.
async fn same_slot_race(client: &Client, base: &str) {
    println!("\n{}", "⚙️  Same-slot race...".yellow());

    let date = format!("{}-12-{:02}", Utc::now().year() + 2, (Utc::now().timestamp() % 28) + 1);
    let payload = json!({
        "name": "Bench Runner",
        "email": "bench@example.com",
        "phone": "050-000-0000",
        "date": date,
        "guests": 100,
        "eventType": "benchmark",
        "hall": "small",
        "package": "basic"
    });

    let mut handles = Vec::with_capacity(RACE_WRITERS);
    for _ in 0..RACE_WRITERS {
        let client = client.clone();
        let url = format!("{}/api/book", base);
        let payload = payload.clone();
        handles.push(tokio::spawn(async move {
            let res = client.post(&url).json(&payload).send().await.ok()?;
            let status = res.status();
            let body: Value = res.json().await.unwrap_or(Value::Null);
            Some((status, body))
        }));
    }

    let mut winners = Vec::new();
    let mut conflicts = 0;
    let mut errors = 0;
    for handle in handles {
        match handle.await.ok().flatten() {
            Some((StatusCode::OK, body)) => winners.push(body["booking"]["id"].as_str().unwrap_or_default().to_string()),
            Some((StatusCode::BAD_REQUEST, _)) => conflicts += 1,
            _ => errors += 1,
        }
    }

    let verdict = if winners.len() == 1 { "OK".green().bold() } else { "DUPLICATES".red().bold() };
    println!(
        "   {} writers on small/{}: {} booked, {} conflicts, {} errors -> {}",
        RACE_WRITERS, date, winners.len(), conflicts, errors, verdict
    );

    for id in winners {
        let _ = client.delete(format!("{}/api/bookings/{}", base, id)).send().await;
    }
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let Some(per_second) = NonZeroU32::new(rps) else {
        return;
    };
    let limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = client.get(&url).send().await;
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let Ok(mut histogram) = Histogram::<u64>::new(3) else {
        return;
    };
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        let _ = histogram.record(latency.as_micros() as u64);
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}
