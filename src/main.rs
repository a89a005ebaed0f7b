use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::utils::logger;
use secret_santa::{CliConfig, Dispatcher, SantaConfig, SantaError, SecretSantaDraw, SnsNotifier};

#[tokio::main]
async fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🎅 Starting secret-santa");
    tracing::debug!("CLI config: {:?}", args);

    if let Err(e) = run(&args).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ secret-santa failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );

        // 輸出用戶友好的錯誤信息
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        std::process::exit(e.exit_code());
    }
}

async fn run(args: &CliConfig) -> Result<(), SantaError> {
    tracing::info!("📁 Loading configuration from: {}", args.config);
    let config = SantaConfig::from_file(&args.config)?;
    let draw = SecretSantaDraw::from_config(&config)?;

    let mut rng = match args.seed {
        Some(seed) => {
            tracing::info!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };
    let result = draw.draw(&mut rng)?;

    if !args.send {
        tracing::info!("🔍 DRY RUN MODE - no messages will be sent");
        if args.json {
            println!("{}", result.to_json()?);
        } else {
            println!("{}", result.summary());
        }
        return Ok(());
    }

    let notifier = SnsNotifier::from_profile(&args.aws_profile, &args.aws_region).await?;
    let dispatcher = Dispatcher::new(notifier)
        .with_delay(args.send_delay())
        .with_policy(args.failure_policy());

    // 每則訊息送出後立即輸出，中止時已送出的部分仍可見
    let receipts = dispatcher
        .dispatch_with(&result.messages, |receipt| {
            println!(
                "SMS messaged {} <{}> at {}",
                receipt.giver,
                logger::mask_phone(&receipt.destination),
                receipt.sent_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        })
        .await?;
    println!("✅ Sent {} message(s)", receipts.len());

    Ok(())
}
