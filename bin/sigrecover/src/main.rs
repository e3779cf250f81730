use tracing::error;

fn main() {
    if let Err(err) = sigrecover::cli::run() {
        error!("Error: {:?}", err);
        std::process::exit(1);
    }
}
