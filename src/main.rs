use readarr_provider::{init_logging, serve, ReadarrProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "readarr provider starting");

    serve(ReadarrProvider::new()).await
}
