//! Web 服务器主程序入口

use richpaste::env::EnvConfig;
use richpaste::utils::init_tracing;
use richpaste::web::{WebConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    let log_level = EnvConfig::from_env()
        .map(|config| config.log_level)
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(&log_level);

    let mut web_config = WebConfig::from_env()?;

    // 命令行参数覆盖环境变量
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" | "-b" => {
                if i + 1 < args.len() {
                    web_config.bind_addr = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --bind requires an address");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    web_config.port = args[i + 1].parse().unwrap_or_else(|_| {
                        eprintln!("Error: Invalid port number");
                        std::process::exit(1);
                    });
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a port number");
                    std::process::exit(1);
                }
            }
            "--env-docs" => {
                print!("{}", richpaste::env::generate_env_docs());
                return Ok(());
            }
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {
                eprintln!("Error: Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    web_config.validate()?;

    let server = WebServer::new(web_config);
    server.start().await?;

    Ok(())
}

fn print_help() {
    println!("RichPaste Web Server");
    println!();
    println!("USAGE:");
    println!("    richpaste-web [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -b, --bind <ADDRESS>     Bind address [default: 127.0.0.1]");
    println!("    -p, --port <PORT>        Port number [default: 7080]");
    println!("        --env-docs           Print the environment variable reference");
    println!("    -h, --help               Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    richpaste-web");
    println!("    richpaste-web --bind 0.0.0.0 --port 3000");
}
