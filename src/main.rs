use chrono::Local;
use clap::Parser;
use iss_spotter::utils::logger;
use iss_spotter::{
    CliConfig, Command, Coordinates, FlyoverSource, IssClient, PassRecord, SpotterError,
};

fn print_passes(passes: &[PassRecord], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(passes)?);
        return Ok(());
    }

    if passes.is_empty() {
        println!("No upcoming passes were reported for this location.");
    }
    for pass in passes {
        println!("{}", pass.describe(&Local));
    }
    Ok(())
}

async fn run(client: &IssClient, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Next => {
            let passes = client.next_iss_times_for_my_location().await?;
            print_passes(&passes, json)?;
        }
        Command::Ip => {
            let ip = client.fetch_my_ip().await?;
            if json {
                println!("{}", serde_json::json!({ "ip": ip }));
            } else {
                println!("{}", ip);
            }
        }
        Command::Coords { ip } => {
            let coords = client.fetch_coords_by_ip(&ip).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&coords)?);
            } else {
                println!("{}, {}", coords.latitude, coords.longitude);
            }
        }
        Command::Passes { lat, lon } => {
            let passes = client
                .fetch_iss_flyover_times(&Coordinates::new(lat, lon))
                .await?;
            print_passes(&passes, json)?;
        }
    }
    Ok(())
}

fn exit_with(e: &SpotterError) -> ! {
    tracing::error!("❌ {} (Category: {:?})", e, e.category());
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting iss-spotter");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = config.settings().unwrap_or_else(|e| exit_with(&e));
    let client = IssClient::new(&settings).unwrap_or_else(|e| exit_with(&e));

    if let Err(err) = run(&client, config.command(), config.json).await {
        match err.downcast_ref::<SpotterError>() {
            Some(e) => exit_with(e),
            None => return Err(err),
        }
    }

    Ok(())
}
