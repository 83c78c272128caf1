use std::process;

#[tokio::main]
async fn main() {
    let code = sem_cli::run().await;
    process::exit(code);
}
