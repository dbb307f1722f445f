#[tokio::main]
async fn main() {
    if let Err(err) = user_upload::run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
