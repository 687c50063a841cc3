//! Web server entry point

use wordclean::core::{print_error_message, CleanOptions};
use wordclean::env::generate_env_docs;
use wordclean::logging::init_tracing;
use wordclean::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let mut web_config = WebConfig::default();

    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    print_error_message("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        print_error_message("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    print_error_message("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                print_error_message(&format!("Error: Unknown argument: {}", args[i]));
                print_help();
                std::process::exit(1);
            }
        }
    }

    web_config.validate()?;

    let clean_options = CleanOptions {
        silent: true,
        ..Default::default()
    };

    let server = WebServer::new(web_config, clean_options);
    server.start().await?;

    Ok(())
}

fn print_help() {
    println!("wordclean web server");
    println!();
    println!("USAGE:");
    println!("    wordclean-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("    -h, --help               Print help information");
    println!();
    println!("ENDPOINTS:");
    println!("    POST /api/WordToHtml/clean-word-html   multipart/form-data, part \"file\"");
    println!();
    print!("{}", generate_env_docs());
}
