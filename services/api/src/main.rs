use sale_advisor_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("sale advisor error: {err}");
        std::process::exit(1);
    }
}
