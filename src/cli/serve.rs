use crate::{config::Config, error, info, logging, server};

pub async fn serve(config: Config) {
    if let Err(e) = logging::init(&config.log_file, true) {
        error!(
            "Cannot open log file {}. Err: {}",
            config.log_file.display(),
            e
        );
    }

    info!("Starting server on {}", config.server_addr);
    if let Err(e) = server::start_api_server(config).await {
        error!("Server stopped. Err: {}", e);
    }
}
