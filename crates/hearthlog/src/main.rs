use hearthlog::runtime::{boot, serve};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();
    let config = boot::boot(std::env::args())?;
    serve::serve(config).await
}
