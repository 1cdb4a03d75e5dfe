use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use k8s_readycheck::utils::{logger, validation::Validate};
use k8s_readycheck::{CliArgs, HttpApiClient, Readiness, ReadinessChecker};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // clap's own exit path uses code 2 for usage errors; the kubelet only knows 0 and 1.
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    // Exit code is the whole contract with the kubelet: 0 ready, 1 anything else.
    let exit_code = match run(args).await {
        Ok(readiness) => {
            match &readiness {
                Readiness::Ready => tracing::debug!("✅ Database is ready"),
                Readiness::NotReady { diagnostic } => println!("{}", diagnostic),
            }
            readiness.exit_code()
        }
        Err(e) => {
            tracing::error!("❌ Readiness probe could not run: {:#}", e);
            println!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run(args: CliArgs) -> anyhow::Result<Readiness> {
    let config = args.into_config().context("failed to load probe settings")?;
    tracing::debug!(
        "Probing {} in {:?} mode (timeout {}s)",
        config.api_url(),
        config.mode,
        config.timeout_secs
    );
    config.validate().context("invalid probe settings")?;

    let client = HttpApiClient::new(&config).context("failed to build HTTP client")?;
    let checker = ReadinessChecker::new(client, config.mode);
    Ok(checker.check().await)
}
