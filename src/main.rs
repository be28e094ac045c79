#[tokio::main]
async fn main() {
    if let Err(e) = hall_booking::run().await {
        tracing::error!("Fatal: {}", e);
        eprintln!("hall-booking failed to start: {}", e);
        std::process::exit(1);
    }
}
