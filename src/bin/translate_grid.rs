//! Reads a JSON grid request on stdin and prints the translated query options.
//!
//! Usage: `translate_grid [config.yaml] < request.json`

use std::env;
use std::io::{self, Read};

use dotenvy::dotenv;

use pushkind_grid::domain::request::GridRequest;
use pushkind_grid::models::config::load_config;
use pushkind_grid::services::translate_with;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config_path = env::args().nth(1);

    let grid_config = match load_config(config_path.as_deref()) {
        Ok(grid_config) => grid_config,
        Err(err) => {
            log::error!("Error loading grid config: {err}");
            std::process::exit(1);
        }
    };

    let fields = match grid_config.field_map() {
        Ok(fields) => fields,
        Err(err) => {
            log::error!("Error building field map: {err}");
            std::process::exit(1);
        }
    };

    match &fields {
        Some(fields) => log::info!("Restricting requests to {} fields", fields.len()),
        None => log::info!("No fields configured, passing field names through"),
    }

    let mut payload = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut payload) {
        log::error!("Error reading request: {err}");
        std::process::exit(1);
    }

    let request = match GridRequest::from_json(&payload) {
        Ok(request) => request,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    let options = translate_with(
        &request,
        fields.as_ref(),
        &grid_config.translate_options(),
    );

    match serde_json::to_string(&options) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            log::error!("Error serializing query options: {err}");
            std::process::exit(1);
        }
    }
}
